use std::sync::Arc;

use image::RgbaImage;
use parking_lot::Mutex;

/// Playback state of a video source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Playing,
    Paused,
    Ended,
}

/// A decoded video the compositor can sample
pub trait VideoSource: Send {
    fn playback(&self) -> Playback;

    /// Native decoded size, or `None` while the stream is still starting.
    /// A zero-sized answer is treated the same as `None`.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// A fresh copy of the frame at the current playback position
    fn current_frame(&mut self) -> Option<RgbaImage>;

    /// Native frames per second, once known
    fn frame_rate(&self) -> Option<f64> {
        None
    }
}

impl<S: VideoSource + ?Sized> VideoSource for Box<S> {
    fn playback(&self) -> Playback {
        (**self).playback()
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        (**self).dimensions()
    }

    fn current_frame(&mut self) -> Option<RgbaImage> {
        (**self).current_frame()
    }

    fn frame_rate(&self) -> Option<f64> {
        (**self).frame_rate()
    }
}

/// Shared play/pause switch for a [`LoopingFrames`] source
#[derive(Debug, Clone)]
pub struct PlaybackControl {
    state: Arc<Mutex<Playback>>,
}

impl PlaybackControl {
    pub fn state(&self) -> Playback {
        *self.state.lock()
    }

    pub fn play(&self) {
        let mut state = self.state.lock();
        if *state == Playback::Paused {
            *state = Playback::Playing;
        }
    }

    pub fn pause(&self) {
        let mut state = self.state.lock();
        if *state == Playback::Playing {
            *state = Playback::Paused;
        }
    }
}

/// In-memory frames played back in order, optionally looping
pub struct LoopingFrames {
    frames: Vec<RgbaImage>,
    cursor: usize,
    looping: bool,
    frame_rate: Option<f64>,
    control: PlaybackControl,
}

impl LoopingFrames {
    pub fn new(frames: Vec<RgbaImage>) -> Self {
        let initial = if frames.is_empty() {
            Playback::Ended
        } else {
            Playback::Playing
        };
        Self {
            frames,
            cursor: 0,
            looping: true,
            frame_rate: None,
            control: PlaybackControl {
                state: Arc::new(Mutex::new(initial)),
            },
        }
    }

    /// Stop at the last frame instead of wrapping
    pub fn once(mut self) -> Self {
        self.looping = false;
        self
    }

    /// Report `rate` as the native frame rate
    pub fn with_frame_rate(mut self, rate: f64) -> Self {
        self.frame_rate = Some(rate);
        self
    }

    pub fn control(&self) -> PlaybackControl {
        self.control.clone()
    }
}

impl VideoSource for LoopingFrames {
    fn playback(&self) -> Playback {
        self.control.state()
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        self.frames.first().map(|f| f.dimensions())
    }

    fn current_frame(&mut self) -> Option<RgbaImage> {
        let frame = self.frames.get(self.cursor)?.clone();
        self.cursor += 1;
        if self.cursor >= self.frames.len() {
            if self.looping {
                self.cursor = 0;
            } else {
                *self.control.state.lock() = Playback::Ended;
            }
        }
        Some(frame)
    }

    fn frame_rate(&self) -> Option<f64> {
        self.frame_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn frames(n: u8) -> Vec<RgbaImage> {
        (0..n)
            .map(|i| RgbaImage::from_pixel(2, 1, Rgba([i, 0, 0, 255])))
            .collect()
    }

    #[test]
    fn test_loops_by_default() {
        let mut source = LoopingFrames::new(frames(2));
        let reds: Vec<u8> = (0..5)
            .map(|_| source.current_frame().unwrap().get_pixel(0, 0)[0])
            .collect();
        assert_eq!(reds, vec![0, 1, 0, 1, 0]);
        assert_eq!(source.playback(), Playback::Playing);
    }

    #[test]
    fn test_once_ends_after_last_frame() {
        let mut source = LoopingFrames::new(frames(2)).once();
        source.current_frame();
        source.current_frame();
        assert_eq!(source.playback(), Playback::Ended);
    }

    #[test]
    fn test_control_pauses_and_resumes() {
        let source = LoopingFrames::new(frames(1));
        let control = source.control();
        control.pause();
        assert_eq!(source.playback(), Playback::Paused);
        control.play();
        assert_eq!(source.playback(), Playback::Playing);
    }

    #[test]
    fn test_empty_source_has_no_dimensions() {
        let source = LoopingFrames::new(Vec::new());
        assert_eq!(source.dimensions(), None);
        assert_eq!(source.playback(), Playback::Ended);
    }
}
