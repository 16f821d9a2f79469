use std::{fmt, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{debug, warn};

use crate::surface::{Deferred, PageSurface};

pub const SKILLS_SECTION_ID: &str = "skills";
pub const PROGRESS_SELECTOR: &str = ".progress";
pub const LEVEL_SELECTOR: &str = ".skill-level";

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percent(f64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a percentage between 0 and 100")]
pub struct ParsePercentError(pub String);

impl Percent {
    pub const ZERO: Percent = Percent(0.0);

    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && (0.0..=100.0).contains(&value)).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for Percent {
    type Err = ParsePercentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        number
            .parse::<f64>()
            .ok()
            .and_then(Percent::new)
            .ok_or_else(|| ParsePercentError(s.to_string()))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}%", self.0)
        } else {
            write!(f, "{}%", self.0)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevealPhase {
    #[default]
    Waiting,
    Scheduled,
}

#[derive(Debug)]
pub struct ProgressReveal {
    phase: RevealPhase,
    stagger: Duration,
}

impl ProgressReveal {
    pub fn new(stagger: Duration) -> Self {
        Self {
            phase: RevealPhase::Waiting,
            stagger,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Collapses every bar to zero width and re-arms the reveal.
    pub fn reset<S: PageSurface>(&mut self, page: &mut S) {
        for bar in page.query_selector_all(PROGRESS_SELECTOR) {
            page.set_style(&bar, "width", &Percent::ZERO.to_string());
        }
        self.phase = RevealPhase::Waiting;
    }

    /// Schedules each bar to fill, `stagger * index` apart. Once scheduled,
    /// further calls are no-ops until the next [`reset`](Self::reset).
    pub fn reveal<S: PageSurface>(&mut self, page: &mut S) -> usize {
        if self.phase == RevealPhase::Scheduled {
            return 0;
        }
        self.phase = RevealPhase::Scheduled;

        let mut scheduled = 0;
        for (index, bar) in page.query_selector_all(PROGRESS_SELECTOR).into_iter().enumerate() {
            let Some(width) = target_width(page, &bar) else {
                continue;
            };
            let delay = self.stagger * index as u32;
            page.schedule(delay, Deferred::FillProgress { bar, width });
            scheduled += 1;
        }
        debug!(bars = scheduled, "progress reveal scheduled");
        scheduled
    }

    pub fn fill<S: PageSurface>(page: &mut S, bar: &S::Node, width: Percent) {
        page.set_style(bar, "width", &width.to_string());
    }
}

/// The level label lives two levels up from the bar, beside its track.
fn target_width<S: PageSurface>(page: &S, bar: &S::Node) -> Option<Percent> {
    let item = page.parent(bar).and_then(|track| page.parent(&track))?;
    let label = page.query_within(&item, LEVEL_SELECTOR)?;
    let text = page.text_content(&label);
    match text.parse::<Percent>() {
        Ok(width) => Some(width),
        Err(err) => {
            warn!(error = %err, "skipping progress bar with unreadable level");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/progress_tests.rs"]
mod tests;
