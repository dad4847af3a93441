//! Video decoding through the `ffmpeg` / `ffprobe` command-line tools.
//!
//! Frames are decoded in real time (`-re`) and looped, so the latest frame in
//! the shared slot follows the video's own clock.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::thread;

use image::RgbaImage;
use parking_lot::Mutex;
use serde::Deserialize;

use super::{ChromaError, Playback, VideoSource};

/// Stream facts reported by ffprobe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
}

/// Read the first video stream's size and frame rate
pub fn probe_video(path: &Path) -> Result<VideoInfo, ChromaError> {
    #[derive(Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
    }
    #[derive(Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
    }

    let out = Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(path)
        .output()?;
    if !out.status.success() {
        return Err(ChromaError::Probe(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| ChromaError::Probe(format!("ffprobe json parse failed: {e}")))?;
    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| ChromaError::Probe("no video stream found".into()))?;

    Ok(VideoInfo {
        width: stream.width.unwrap_or(0),
        height: stream.height.unwrap_or(0),
        frame_rate: stream
            .r_frame_rate
            .as_deref()
            .and_then(parse_ratio)
            .unwrap_or(0.0),
    })
}

fn parse_ratio(s: &str) -> Option<f64> {
    let (num, den) = s.split_once('/').unwrap_or((s, "1"));
    let num: f64 = num.trim().parse().ok()?;
    let den: f64 = den.trim().parse().ok()?;
    if den == 0.0 {
        None
    } else {
        Some(num / den)
    }
}

struct Slot {
    stopped: bool,
    playback: Playback,
    dimensions: Option<(u32, u32)>,
    frame_rate: Option<f64>,
    latest: Option<RgbaImage>,
}

/// A looping video file decoded by a background `ffmpeg` process.
///
/// Until probing finishes the source reports no dimensions. If ffmpeg is
/// missing or fails, the source ends; nothing is surfaced as an error.
pub struct FfmpegVideo {
    path: PathBuf,
    slot: Arc<Mutex<Slot>>,
    child: Arc<Mutex<Option<Child>>>,
}

impl FfmpegVideo {
    /// Start probing and decoding `path` in the background
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slot = Arc::new(Mutex::new(Slot {
            stopped: false,
            playback: Playback::Playing,
            dimensions: None,
            frame_rate: None,
            latest: None,
        }));
        let child = Arc::new(Mutex::new(None));

        let thread_path = path.clone();
        let thread_slot = Arc::clone(&slot);
        let thread_child = Arc::clone(&child);
        let spawned = thread::Builder::new()
            .name("ffmpeg-decode".into())
            .spawn(move || {
                if let Err(e) = decode_loop(&thread_path, &thread_slot, &thread_child) {
                    tracing::warn!(
                        path = %thread_path.display(),
                        error = %e,
                        "Video decode stopped"
                    );
                }
                thread_slot.lock().playback = Playback::Ended;
            });
        if let Err(e) = spawned {
            tracing::warn!(error = %e, "Failed to spawn decode thread");
            slot.lock().playback = Playback::Ended;
        }

        Self { path, slot, child }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn decode_loop(
    path: &Path,
    slot: &Mutex<Slot>,
    child_slot: &Mutex<Option<Child>>,
) -> Result<(), ChromaError> {
    let info = probe_video(path)?;
    if info.width == 0 || info.height == 0 {
        return Err(ChromaError::Probe("video reports zero dimensions".into()));
    }
    {
        let mut slot = slot.lock();
        slot.dimensions = Some((info.width, info.height));
        slot.frame_rate = Some(info.frame_rate).filter(|r| r.is_finite() && *r > 0.0);
    }
    tracing::debug!(
        width = info.width,
        height = info.height,
        frame_rate = info.frame_rate,
        "Probed video"
    );

    let mut child = Command::new("ffmpeg")
        .args(["-v", "error", "-re", "-stream_loop", "-1", "-i"])
        .arg(path)
        .args(["-an", "-f", "rawvideo", "-pix_fmt", "rgba", "pipe:1"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| ChromaError::Probe("ffmpeg stdout unavailable".into()))?;
    {
        let mut guard = child_slot.lock();
        if slot.lock().stopped {
            kill_child(&mut child);
            return Ok(());
        }
        *guard = Some(child);
    }

    let frame_len = info.width as usize * info.height as usize * 4;
    loop {
        let mut buf = vec![0u8; frame_len];
        if stdout.read_exact(&mut buf).is_err() {
            break;
        }
        let mut slot = slot.lock();
        if slot.stopped {
            break;
        }
        if let Some(frame) = RgbaImage::from_raw(info.width, info.height, buf) {
            slot.latest = Some(frame);
        }
    }
    Ok(())
}

fn kill_child(child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::debug!(error = %e, "Failed to kill ffmpeg");
    }
    let _ = child.wait();
}

impl VideoSource for FfmpegVideo {
    fn playback(&self) -> Playback {
        self.slot.lock().playback
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        self.slot.lock().dimensions
    }

    fn current_frame(&mut self) -> Option<RgbaImage> {
        self.slot.lock().latest.clone()
    }

    fn frame_rate(&self) -> Option<f64> {
        self.slot.lock().frame_rate
    }
}

impl Drop for FfmpegVideo {
    fn drop(&mut self) {
        let mut child = self.child.lock();
        self.slot.lock().stopped = true;
        if let Some(mut child) = child.take() {
            kill_child(&mut child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratio() {
        assert_eq!(parse_ratio("30/1"), Some(30.0));
        assert_eq!(parse_ratio("25"), Some(25.0));
        assert_eq!(parse_ratio("30000/1001").map(|f| (f * 100.0).round()), Some(2997.0));
        assert_eq!(parse_ratio("1/0"), None);
        assert_eq!(parse_ratio("abc"), None);
    }

    #[test]
    fn test_missing_file_degrades_to_ended() {
        let source = FfmpegVideo::open("/nonexistent/definitely-missing.mp4");
        for _ in 0..200 {
            if source.playback() == Playback::Ended {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert_eq!(source.playback(), Playback::Ended);
        assert_eq!(source.dimensions(), None);
        assert_eq!(source.frame_rate(), None);
    }
}
