//! Nesting depth tracking across loop-open / block-close events
//!
//! Depth is a true counter so multiple simultaneously open blocks are
//! represented; a boolean "in a block" flag would under-count nested and
//! sequential constructs.

/// Tracks the number of concurrently open blocks and the scan maximum.
///
/// Fresh per source unit; never reused across units.
#[derive(Debug, Default)]
pub struct NestingTracker {
    depth: usize,
    max_depth: usize,
}

impl NestingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a loop-open event.
    pub fn open(&mut self) {
        self.depth += 1;
        if self.depth > self.max_depth {
            self.max_depth = self.depth;
        }
    }

    /// Record a block-close event. A close with no matching open is
    /// ignored rather than driving the depth negative.
    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current depth at this scan position.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Maximum depth reached so far during the scan.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
