// ============================================================
// Layer 4 — Token Windows
// ============================================================
// Splits a long run of context tokens into overlapping windows
// so that every window fits in the encoder next to the question.
//
// The same sliding-window idea as word chunking, but over token
// indices: each window holds up to `window_size` tokens and
// shares `overlap` tokens with the next one, so an answer that
// straddles a boundary appears whole in at least one window.
//
// Example with window_size=4, overlap=2 over 7 tokens:
//   Window 1: 0..4
//   Window 2: 2..6
//   Window 3: 4..7   (last window, shorter)

use std::ops::Range;

pub struct TokenWindows {
    /// Maximum number of context tokens per window
    window_size: usize,
    /// Number of tokens shared between adjacent windows
    overlap: usize,
}

impl TokenWindows {
    /// Create a new window splitter.
    ///
    /// An overlap that is not smaller than the window is clamped
    /// to `window_size - 1` so the stride is always at least one.
    pub fn new(window_size: usize, overlap: usize) -> Self {
        let window_size = window_size.max(1);
        let overlap     = overlap.min(window_size - 1);
        Self { window_size, overlap }
    }

    /// Token index ranges covering `0..len`.
    /// Returns no ranges when there are no tokens.
    pub fn split(&self, len: usize) -> Vec<Range<usize>> {
        if len == 0 {
            return Vec::new();
        }

        let stride = self.window_size - self.overlap;
        let mut ranges = Vec::new();
        let mut start  = 0usize;

        loop {
            let end = (start + self.window_size).min(len);
            ranges.push(start..end);
            if end == len {
                break;
            }
            start += stride;
        }

        ranges
    }
}
