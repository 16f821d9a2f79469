pub const NAVIGATION_ID: &str = "navigation";
pub const SCROLLED_CLASS: &str = "scrolled";

#[derive(Debug, Clone)]
pub struct ScrollTracker {
    threshold: f64,
    scrolled: bool,
    generation: u64,
}

impl ScrollTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            scrolled: false,
            generation: 0,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Records the offset of a scroll event; returns the new state only when
    /// the offset crossed the threshold.
    pub fn observe(&mut self, scroll_y: f64) -> Option<bool> {
        let scrolled = scroll_y > self.threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }

    /// Starts a new debounce window and returns its generation.
    pub fn bump_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn is_latest(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

#[cfg(test)]
#[path = "tests/scroll_tests.rs"]
mod tests;
