use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::NaiveDateTime;

use crate::countdown::clock::Clock;
use crate::countdown::engine::{Countdown, YearlyTarget};
use crate::countdown::phase::{PhaseReading, PhaseTable};
use crate::foundation::error::{MissionError, MissionResult};

/// One recomputation of the countdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountdownTick {
    /// 0 for the immediate first tick, then 1, 2, ...
    pub seq: u64,
    /// Clock reading used for this tick.
    pub now: NaiveDateTime,
    /// Time remaining.
    pub countdown: Countdown,
    /// Phase classification and dialog.
    pub reading: PhaseReading,
}

/// Scoped fixed-interval countdown timer.
///
/// Emits one tick immediately, then one per `interval`, until stopped or dropped. Dropping the
/// ticker stops the timer and joins its thread.
pub struct Ticker {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
    ticks: Receiver<CountdownTick>,
}

impl Ticker {
    /// Start ticking toward `target`.
    pub fn spawn<C: Clock + 'static>(
        clock: C,
        target: YearlyTarget,
        table: PhaseTable,
        interval: Duration,
    ) -> MissionResult<Self> {
        if interval.is_zero() {
            return Err(MissionError::validation("tick interval must be > 0"));
        }
        table.validate()?;
        let first = tick(&clock, target, &table, 0)?;

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (tick_tx, ticks) = mpsc::channel::<CountdownTick>();
        // First tick is delivered before the thread starts so callers never see an empty view.
        let _ = tick_tx.send(first);

        let handle = std::thread::Builder::new()
            .name("missionday-ticker".to_owned())
            .spawn(move || {
                let mut seq = 1u64;
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    match tick(&clock, target, &table, seq) {
                        Ok(t) => {
                            if tick_tx.send(t).is_err() {
                                break;
                            }
                        }
                        Err(err) => tracing::warn!(%err, "countdown tick failed"),
                    }
                    seq += 1;
                }
            })
            .map_err(|e| MissionError::Other(anyhow::Error::new(e)))?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
            ticks,
        })
    }

    /// Wait up to `timeout` for the next tick.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<CountdownTick> {
        self.ticks.recv_timeout(timeout).ok()
    }

    /// Block until the next tick, or `None` once the timer has stopped.
    pub fn recv(&self) -> Option<CountdownTick> {
        self.ticks.recv().ok()
    }

    /// Stop the timer and release its thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn tick<C: Clock>(
    clock: &C,
    target: YearlyTarget,
    table: &PhaseTable,
    seq: u64,
) -> MissionResult<CountdownTick> {
    let now = clock.now();
    let countdown = target.countdown(now)?;
    let reading = table.read(&countdown);
    tracing::trace!(
        seq,
        days = countdown.total_days_remaining,
        phase = %reading.phase,
        "countdown tick"
    );
    Ok(CountdownTick {
        seq,
        now,
        countdown,
        reading,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/countdown/ticker.rs"]
mod tests;
