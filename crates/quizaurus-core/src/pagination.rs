//! Page state machine over the stage sequence.
//!
//! The quiz starts in `Answering(0)`. Advancing from the last content page
//! switches to `Results(0)`; from there the pages can still be browsed but the
//! results state is never left without a reset.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Where the user currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageState {
    Answering(usize),
    Results(usize),
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTransition {
    /// The page index changed.
    Moved { from: usize, to: usize },
    /// The last content page was left; results are now shown. Reported once.
    Finished,
    /// The completeness gate refused to advance.
    Blocked,
    /// Already at the boundary; nothing changed.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePagination {
    page: usize,
    show_results: bool,
    stages_per_page: usize,
    stage_count: usize,
}

impl StagePagination {
    /// A `stages_per_page` of 0 is treated as 1.
    pub fn new(stage_count: usize, stages_per_page: usize) -> Self {
        Self {
            page: 0,
            show_results: false,
            stages_per_page: stages_per_page.max(1),
            stage_count,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn show_results(&self) -> bool {
        self.show_results
    }

    pub fn stages_per_page(&self) -> usize {
        self.stages_per_page
    }

    pub fn state(&self) -> PageState {
        if self.show_results {
            PageState::Results(self.page)
        } else {
            PageState::Answering(self.page)
        }
    }

    pub fn page_count(&self) -> usize {
        self.stage_count.div_ceil(self.stages_per_page)
    }

    fn last_page(&self) -> usize {
        self.page_count().saturating_sub(1)
    }

    /// Stage indices shown on the current page.
    pub fn window(&self) -> Range<usize> {
        let start = (self.page * self.stages_per_page).min(self.stage_count);
        let end = (start + self.stages_per_page).min(self.stage_count);
        start..end
    }

    pub fn is_last_page(&self) -> bool {
        self.page >= self.last_page()
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 0
    }

    /// Whether a next page (or the results) exists, ignoring the
    /// completeness gate.
    pub fn can_go_next(&self) -> bool {
        !self.show_results || !self.is_last_page()
    }

    /// True on the last content page, where advancing shows the results.
    pub fn is_final_step(&self) -> bool {
        !self.show_results && self.is_last_page()
    }

    pub fn previous(&mut self) -> PageTransition {
        if self.page == 0 {
            return PageTransition::Unchanged;
        }
        let from = self.page;
        self.page -= 1;
        tracing::debug!(from, to = self.page, results = self.show_results, "previous page");
        PageTransition::Moved {
            from,
            to: self.page,
        }
    }

    /// Advances one page. `window_complete` is the completeness gate for the
    /// current window; it is ignored once results are shown.
    pub fn next(&mut self, window_complete: bool) -> PageTransition {
        if !self.show_results {
            if !window_complete {
                tracing::debug!(page = self.page, "advance blocked by incomplete answers");
                return PageTransition::Blocked;
            }
            if self.is_last_page() {
                self.show_results = true;
                self.page = 0;
                tracing::debug!("switched to results");
                return PageTransition::Finished;
            }
        }

        let from = self.page;
        self.page = (self.page + 1).min(self.last_page());
        if self.page == from {
            return PageTransition::Unchanged;
        }
        tracing::debug!(from, to = self.page, results = self.show_results, "next page");
        PageTransition::Moved {
            from,
            to: self.page,
        }
    }

    /// Back to `Answering(0)`.
    pub fn reset(&mut self) {
        self.page = 0;
        self.show_results = false;
    }
}
