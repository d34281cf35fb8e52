use std::path::{Path, PathBuf};

use crate::chroma::source::LoopingFrames;
use crate::foundation::core::Fps;
use crate::foundation::error::{MissionError, MissionResult};

/// Basic metadata about a source video file.
#[derive(Clone, Debug)]
pub struct VideoSourceInfo {
    /// Path used for probing/decoding.
    #[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
    pub source_path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Native frame rate.
    pub fps: Fps,
}

/// Parse an ffprobe rate such as `30000/1001`.
#[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
pub(crate) fn parse_frame_rate(rate: &str) -> MissionResult<Fps> {
    let (num, den) = rate.split_once('/').unwrap_or((rate, "1"));
    let num = num
        .trim()
        .parse::<u32>()
        .map_err(|e| MissionError::media(format!("bad frame rate '{rate}': {e}")))?;
    let den = den
        .trim()
        .parse::<u32>()
        .map_err(|e| MissionError::media(format!("bad frame rate '{rate}': {e}")))?;
    Fps::new(num, den).map_err(|e| MissionError::media(format!("bad frame rate '{rate}': {e}")))
}

/// Probe source video metadata through `ffprobe`.
#[cfg(feature = "media-ffmpeg")]
pub fn probe_video(source_path: &Path) -> MissionResult<VideoSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
    }

    let out = std::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(source_path)
        .output()
        .map_err(|e| MissionError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(MissionError::media(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| MissionError::media(format!("ffprobe json parse failed: {e}")))?;
    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| MissionError::media("no video stream found"))?;
    let width = video
        .width
        .ok_or_else(|| MissionError::media("missing video width from ffprobe"))?;
    let height = video
        .height
        .ok_or_else(|| MissionError::media("missing video height from ffprobe"))?;
    let fps = parse_frame_rate(video.r_frame_rate.as_deref().unwrap_or("30/1"))?;

    Ok(VideoSourceInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        fps,
    })
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Probe source video metadata through `ffprobe`.
///
/// Returns an error when the `media-ffmpeg` feature is disabled.
pub fn probe_video(_source_path: &Path) -> MissionResult<VideoSourceInfo> {
    Err(MissionError::media(
        "video sources require the 'media-ffmpeg' feature",
    ))
}

/// Decode up to `max_frames` frames of a video into a looping in-memory clip.
#[cfg(feature = "media-ffmpeg")]
#[tracing::instrument]
pub fn open_video(source_path: &Path, max_frames: u32) -> MissionResult<LoopingFrames> {
    use crate::foundation::core::{PixelFrame, rgba8_len};

    if max_frames == 0 {
        return Err(MissionError::validation("max_frames must be > 0"));
    }
    let info = probe_video(source_path)?;

    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(&info.source_path)
        .args([
            "-frames:v",
            &max_frames.to_string(),
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "pipe:1",
        ])
        .output()
        .map_err(|e| MissionError::media(format!("failed to run ffmpeg for video decode: {e}")))?;
    if !out.status.success() {
        return Err(MissionError::media(format!(
            "ffmpeg video decode failed for '{}': {}",
            info.source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let frame_len = rgba8_len(info.width, info.height)?;
    if frame_len == 0 {
        return Err(MissionError::media("decoded video frame size is zero"));
    }
    if out.stdout.is_empty() || !out.stdout.len().is_multiple_of(frame_len) {
        return Err(MissionError::media(format!(
            "decoded video has invalid size: got {} bytes, expected multiples of {frame_len}",
            out.stdout.len()
        )));
    }

    let frames = out
        .stdout
        .chunks_exact(frame_len)
        .map(|chunk| PixelFrame::from_rgba8(info.width, info.height, chunk.to_vec()))
        .collect::<MissionResult<Vec<_>>>()?;
    tracing::debug!(frames = frames.len(), "decoded video");
    LoopingFrames::new(frames, info.fps)
}

#[cfg(not(feature = "media-ffmpeg"))]
/// Decode up to `max_frames` frames of a video into a looping in-memory clip.
///
/// Returns an error when the `media-ffmpeg` feature is disabled.
pub fn open_video(_source_path: &Path, _max_frames: u32) -> MissionResult<LoopingFrames> {
    Err(MissionError::media(
        "video sources require the 'media-ffmpeg' feature",
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/chroma/media.rs"]
mod tests;
