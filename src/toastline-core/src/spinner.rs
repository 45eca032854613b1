//! Frame state for animated loading icons.

use std::time::Duration;

use crate::icons::{LoadingIcon, SpinnerConfig};

/// Frame cursor of one mounted loading toast.
///
/// Only exists while a toast is mounted, of kind loading, and the loading
/// icon is animated. The toaster advances it on an interval equal to
/// [`SpinnerConfig::interval`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinnerState {
    frames: Vec<String>,
    interval_ms: u64,
    current_frame: usize,
}

impl SpinnerState {
    /// Creates a spinner at its first frame. Returns `None` for an empty frame list.
    pub fn new(config: &SpinnerConfig) -> Option<Self> {
        if config.frames.is_empty() {
            return None;
        }
        Some(Self {
            frames: config.frames.clone(),
            interval_ms: config.interval,
            current_frame: 0,
        })
    }

    /// Creates a spinner for an animated loading icon; `None` for static ones.
    pub fn for_icon(icon: &LoadingIcon) -> Option<Self> {
        icon.spinner().and_then(Self::new)
    }

    /// Returns the current frame.
    #[inline]
    pub fn frame(&self) -> &str {
        &self.frames[self.current_frame]
    }

    /// Moves to the next frame (wrapping) and returns it.
    pub fn advance(&mut self) -> &str {
        self.current_frame = (self.current_frame + 1) % self.frames.len();
        self.frame()
    }

    /// Returns the current frame index.
    pub fn current_index(&self) -> usize {
        self.current_frame
    }

    /// Returns the total number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Tick interval, never shorter than one millisecond.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}
