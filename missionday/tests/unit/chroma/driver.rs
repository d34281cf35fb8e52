use super::*;
use crate::chroma::key::ChromaKey;
use crate::chroma::sink::{ChannelSink, InMemorySink};
use crate::chroma::source::LoopingFrames;
use crate::chroma::surface::RasterSurface;
use crate::foundation::core::{Fps, PixelFrame};

fn compositor() -> Compositor<LoopingFrames, RasterSurface> {
    let frames = (0..4u8)
        .map(|i| PixelFrame::filled(2, 2, [i, 200, 0, 255]).unwrap())
        .collect();
    let src = LoopingFrames::new(frames, Fps::new(100, 1).unwrap()).unwrap();
    Compositor::new(src, RasterSurface::new(2, 2).unwrap(), ChromaKey::default())
}

#[test]
fn playhead_stands_still_while_paused() {
    let t0 = Instant::now();
    let mut ph = Playhead::new(t0);
    let ms = Duration::from_millis;

    assert_eq!(ph.tick(t0 + ms(100), true), Some(ms(100)));
    assert_eq!(ph.tick(t0 + ms(500), false), None);
    assert_eq!(ph.tick(t0 + ms(900), false), None);
    // Resumes where it paused instead of jumping by the paused time.
    assert_eq!(ph.tick(t0 + ms(950), true), Some(ms(150)));
}

#[test]
fn paused_source_keeps_its_frame_across_resume() {
    let mut src = compositor().into_parts().0;
    let t0 = Instant::now();
    let mut ph = Playhead::new(t0);

    if let Some(p) = ph.tick(t0 + Duration::from_millis(20), src.is_playing()) {
        src.seek(p);
    }
    let before = src.presented().unwrap().0;
    src.pause();
    if let Some(p) = ph.tick(t0 + Duration::from_secs(3), src.is_playing()) {
        src.seek(p);
    }
    assert_eq!(src.presented().unwrap().0, before);
    src.play();
    if let Some(p) = ph.tick(t0 + Duration::from_secs(3), src.is_playing()) {
        src.seek(p);
    }
    assert_eq!(src.presented().unwrap().0, before);
}

#[test]
fn zero_refresh_rate_is_rejected() {
    assert!(CompositorLoop::spawn(compositor(), InMemorySink::new(), 0).is_err());
}

#[test]
fn loop_delivers_keyed_frames_in_increasing_order() {
    let (tx, rx) = std::sync::mpsc::sync_channel(64);
    let lp = CompositorLoop::spawn(compositor(), ChannelSink::new(tx), 200).unwrap();

    let (first, frame) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 0));
    let (second, _) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(second > first);

    let (_, stats) = lp.stop().unwrap();
    assert!(stats.keyed_frames >= 2);
}

#[test]
fn stop_returns_sink_and_joins_worker() {
    let lp = CompositorLoop::spawn(compositor(), InMemorySink::new(), 200).unwrap();
    std::thread::sleep(Duration::from_millis(50));
    assert!(lp.is_running());
    let (sink, stats) = lp.stop().unwrap();
    assert_eq!(sink.frames().len() as u64, stats.keyed_frames);
    assert!(sink.config().is_some());
}

#[test]
fn drop_releases_the_loop() {
    let (tx, rx) = std::sync::mpsc::sync_channel(1024);
    {
        let _lp = CompositorLoop::spawn(compositor(), ChannelSink::new(tx), 200).unwrap();
        std::thread::sleep(Duration::from_millis(20));
    }
    // The sink (and its sender) went away with the worker thread.
    while rx.try_recv().is_ok() {}
    assert!(matches!(
        rx.try_recv(),
        Err(std::sync::mpsc::TryRecvError::Disconnected)
    ));
}
