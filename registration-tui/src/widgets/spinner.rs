//! Spinner widget for loading states.
//!
//! Based on the snake spinner pattern - a bouncing gradient bar.

use std::time::Duration;

/// One character of a spinner frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinnerCell {
    /// Empty track.
    Track,
    /// Part of the snake; `0.0` is the dim tail, `1.0` the bright head.
    Snake(f32),
}

impl SpinnerCell {
    pub fn glyph(&self) -> char {
        match self {
            Self::Track => '⬝',
            Self::Snake(_) => '■',
        }
    }
}

/// Configuration for the spinner.
#[derive(Clone, Debug)]
pub struct Spinner {
    /// Width of the track in characters.
    track_width: u16,
    /// Length of the snake/bar.
    snake_len: u16,
    /// Pause frames at right end.
    right_pause: usize,
    /// Pause frames at left end.
    left_pause: usize,
    /// Frame duration in milliseconds.
    frame_ms: u64,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            track_width: 8,
            snake_len: 6,
            right_pause: 1,
            left_pause: 20,
            frame_ms: 60,
        }
    }
}

impl Spinner {
    /// Create a new spinner with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time between frames.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Number of frames in one full cycle.
    pub fn frame_count(&self) -> usize {
        let pass = (self.track_width + self.snake_len - 1) as usize;
        pass * 2 + self.right_pause + self.left_pause
    }

    /// The frame shown after `elapsed` of animation.
    pub fn frame_at(&self, elapsed: Duration) -> Vec<SpinnerCell> {
        let index = (elapsed.as_millis() / self.frame_ms.max(1) as u128) as usize;
        self.frame(index % self.frame_count())
    }

    /// Frame `index` of the cycle: right pass, pause, left pass, pause.
    pub fn frame(&self, index: usize) -> Vec<SpinnerCell> {
        let pass = (self.track_width + self.snake_len - 1) as usize;

        if index < pass {
            return self.snake_frame(index as i32, true);
        }
        let index = index - pass;
        if index < self.right_pause {
            return self.empty_frame();
        }
        let index = index - self.right_pause;
        if index < pass {
            return self.snake_frame((pass - 1 - index) as i32, false);
        }
        self.empty_frame()
    }

    fn empty_frame(&self) -> Vec<SpinnerCell> {
        vec![SpinnerCell::Track; self.track_width as usize]
    }

    fn snake_frame(&self, head_pos: i32, moving_right: bool) -> Vec<SpinnerCell> {
        let snake_len = self.snake_len as i32;
        let snake_start = head_pos - snake_len + 1;

        (0..self.track_width as i32)
            .map(|i| {
                if i < snake_start || i > head_pos {
                    return SpinnerCell::Track;
                }
                let t = (i - snake_start) as f32 / (snake_len - 1) as f32;
                SpinnerCell::Snake(if moving_right { t } else { 1.0 - t })
            })
            .collect()
    }
}
