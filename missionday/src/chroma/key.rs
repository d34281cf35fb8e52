use rayon::prelude::*;

use crate::foundation::error::{MissionError, MissionResult};

/// Pixels per rayon work item in [`ChromaKey::key_in_place_par`].
const PAR_CHUNK_PIXELS: usize = 4096;

/// Green-screen classification rule.
///
/// A pixel is background when `g > min_green`, `g > dominance * r` and `g > dominance * b`.
/// The products are compared in `f64`, so `1.4 * 85` rounds just below 119 and (85, 119, 0)
/// counts as background.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChromaKey {
    /// Green channel must exceed this value.
    pub min_green: u8,
    /// Green must exceed red and blue scaled by this factor.
    pub dominance: f64,
}

impl Default for ChromaKey {
    fn default() -> Self {
        Self {
            min_green: 100,
            dominance: 1.4,
        }
    }
}

impl ChromaKey {
    /// Reject rules that would key nothing or everything by accident.
    pub fn validate(&self) -> MissionResult<()> {
        if !self.dominance.is_finite() || self.dominance < 1.0 {
            return Err(MissionError::validation(
                "chroma dominance must be finite and >= 1.0",
            ));
        }
        Ok(())
    }

    /// Return `true` when the color is green-screen background.
    #[inline]
    pub fn is_background(&self, r: u8, g: u8, b: u8) -> bool {
        let gf = f64::from(g);
        g > self.min_green
            && gf > f64::from(r) * self.dominance
            && gf > f64::from(b) * self.dominance
    }

    /// Zero the alpha of every background pixel in a straight RGBA8 buffer.
    ///
    /// Color channels are never touched. Returns the number of keyed pixels.
    pub fn key_in_place(&self, rgba: &mut [u8]) -> MissionResult<usize> {
        check_rgba8(rgba)?;
        Ok(self.key_chunk(rgba))
    }

    /// Same result as [`ChromaKey::key_in_place`], split across the rayon pool.
    pub fn key_in_place_par(&self, rgba: &mut [u8]) -> MissionResult<usize> {
        check_rgba8(rgba)?;
        Ok(rgba
            .par_chunks_mut(PAR_CHUNK_PIXELS * 4)
            .map(|chunk| self.key_chunk(chunk))
            .sum())
    }

    fn key_chunk(&self, rgba: &mut [u8]) -> usize {
        let mut keyed = 0usize;
        for px in rgba.chunks_exact_mut(4) {
            if self.is_background(px[0], px[1], px[2]) {
                px[3] = 0;
                keyed += 1;
            }
        }
        keyed
    }
}

fn check_rgba8(rgba: &[u8]) -> MissionResult<()> {
    if !rgba.len().is_multiple_of(4) {
        return Err(MissionError::keying(format!(
            "rgba8 buffer length {} is not a multiple of 4",
            rgba.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/chroma/key.rs"]
mod tests;
