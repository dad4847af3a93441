use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use super::{key_out_green, Playback, Raster, VideoSource};

/// Frame rate used until the source reports its own
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// Tick period for a frame rate; non-positive or absurd rates fall back to the default
pub fn frame_period(frame_rate: f64) -> Duration {
    let rate = if frame_rate.is_finite() && frame_rate > 0.0 && frame_rate <= 240.0 {
        frame_rate
    } else {
        DEFAULT_FRAME_RATE
    };
    Duration::from_secs_f64(1.0 / rate)
}

/// What one compositor tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Stream still starting: no size or no frame yet
    NotReady,
    /// Paused or ended; nothing drawn
    Idle,
    /// A keyed frame is in the raster
    Rendered,
}

/// Samples a video source into a raster with the backdrop keyed out
pub struct Compositor<S> {
    source: S,
    raster: Raster,
}

impl<S: VideoSource> Compositor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            raster: Raster::new(),
        }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Run one frame. Never fails; anything not ready is reported as such.
    pub fn step(&mut self) -> FrameStep {
        if self.source.playback() != Playback::Playing {
            return FrameStep::Idle;
        }
        let Some((width, height)) = self.source.dimensions().filter(|&(w, h)| w > 0 && h > 0)
        else {
            return FrameStep::NotReady;
        };
        let Some(frame) = self.source.current_frame() else {
            return FrameStep::NotReady;
        };

        self.raster.ensure_size(width, height);
        self.raster.draw(&frame);
        key_out_green(self.raster.image_mut());
        FrameStep::Rendered
    }
}

/// Handle to a running compositor task.
///
/// Dropping the handle cancels the task.
pub struct CompositorHandle {
    frames: watch::Receiver<Option<Arc<RgbaImage>>>,
    task: Option<JoinHandle<()>>,
}

impl CompositorHandle {
    /// Most recent keyed frame, if any has been rendered
    pub fn latest(&self) -> Option<Arc<RgbaImage>> {
        self.frames.borrow().clone()
    }

    /// Receiver that is notified on every new frame
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<RgbaImage>>> {
        self.frames.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the frame loop
    pub fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Compositor stopped");
        }
    }
}

impl Drop for CompositorHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn ticker(start: Instant, period: Duration) -> Interval {
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Drive `source` on a tokio task, publishing keyed frames.
///
/// Ticks at the source's native frame rate once it reports one, or at
/// `rate_override` when given. Must be called from within a tokio runtime.
pub fn spawn_compositor<S>(source: S, rate_override: Option<f64>) -> CompositorHandle
where
    S: VideoSource + 'static,
{
    let (tx, rx) = watch::channel(None);
    let mut period = frame_period(
        rate_override
            .or_else(|| source.frame_rate())
            .unwrap_or(DEFAULT_FRAME_RATE),
    );
    tracing::debug!(period_ms = period.as_millis() as u64, "Compositor started");

    let task = tokio::spawn(async move {
        let mut compositor = Compositor::new(source);
        let mut ticks = ticker(Instant::now(), period);

        loop {
            ticks.tick().await;

            // Video sources learn their rate after probing
            if rate_override.is_none() {
                if let Some(native) = compositor.source.frame_rate().map(frame_period) {
                    if native != period {
                        tracing::debug!(period_ms = native.as_millis() as u64, "Compositor retimed");
                        period = native;
                        ticks = ticker(Instant::now() + period, period);
                    }
                }
            }

            if compositor.step() == FrameStep::Rendered {
                let frame = Arc::new(compositor.raster().image().clone());
                if tx.send(Some(frame)).is_err() {
                    break;
                }
            } else if tx.is_closed() {
                break;
            }
        }
    });

    CompositorHandle {
        frames: rx,
        task: Some(task),
    }
}
