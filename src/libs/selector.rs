use std::time::{Duration, Instant};

/// Hard cap on how many concentrations may be picked at once.
pub(crate) const MAX_SELECTED: usize = 2;

/// How long the reject cue stays visible after a blocked select.
const REJECT_CUE: Duration = Duration::from_millis(500);

/// Interaction state machine of the picker, independent of any rendering.
///
/// Owns the working copy of the selection; the page mirrors every mutation to
/// the host via an action. The candidate list is fixed for the lifetime of
/// the selector and filtering always preserves its order.
#[derive(Clone, Debug)]
pub(crate) struct Selector {
    candidates: Vec<String>,
    selected: Vec<String>,
    query: String,
    highlight: Option<usize>,
    open: bool,
    reject_until: Option<Instant>,
}

/// What happened to a select attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SelectOutcome {
    /// Candidate appended to the selection.
    Added,
    /// Selection already holds the cap; reject cue armed.
    Capped,
    /// Candidate is already selected.
    Duplicate,
    /// Nothing was highlighted or the index was out of range.
    Ignored,
}

impl Selector {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            selected: Vec::new(),
            query: String::new(),
            highlight: None,
            open: false,
            reject_until: None,
        }
    }

    /// Seed the selection from the host, deduplicated and truncated to the cap.
    pub fn with_selected(mut self, seed: Vec<String>) -> Self {
        for value in seed {
            if self.selected.len() == MAX_SELECTED {
                break;
            }
            if !self.selected.contains(&value) {
                self.selected.push(value);
            }
        }
        self
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= MAX_SELECTED
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Candidates whose lowercase form contains the lowercase query, in
    /// source order.
    pub fn filtered(&self) -> Vec<&str> {
        let needle = self.query.to_lowercase();
        self.candidates
            .iter()
            .filter(|c| c.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// Replace the query. The highlight pointed into the old filtered list,
    /// so it resets.
    pub fn set_query(&mut self, query: String) {
        if self.query != query {
            self.query = query;
            self.highlight = None;
        }
    }

    /// Open the dropdown. Refused while the selection is full.
    pub fn open(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.open = true;
        true
    }

    /// Close the dropdown and drop the transient search state. Used by
    /// escape and outside clicks.
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.highlight = None;
    }

    /// Advance the highlight, clamped at the last filtered candidate.
    pub fn highlight_next(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            self.highlight = None;
            return;
        }
        self.highlight = Some(match self.highlight {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        });
    }

    /// Retreat the highlight, flooring at "none highlighted".
    pub fn highlight_prev(&mut self) {
        self.highlight = match self.highlight {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn select_highlighted(&mut self, now: Instant) -> SelectOutcome {
        match self.highlight {
            Some(i) => self.select_filtered(i, now),
            None => SelectOutcome::Ignored,
        }
    }

    /// Select by index into the current filtered list (keyboard or mouse).
    pub fn select_filtered(&mut self, index: usize, now: Instant) -> SelectOutcome {
        let candidate = match self.filtered().get(index) {
            Some(c) => c.to_string(),
            None => return SelectOutcome::Ignored,
        };
        self.select_value(candidate, now)
    }

    fn select_value(&mut self, candidate: String, now: Instant) -> SelectOutcome {
        if self.is_full() {
            self.shake(now);
            return SelectOutcome::Capped;
        }
        if self.selected.contains(&candidate) {
            return SelectOutcome::Duplicate;
        }
        self.selected.push(candidate);
        self.query.clear();
        self.highlight = None;
        if self.is_full() {
            self.open = false;
        }
        SelectOutcome::Added
    }

    /// Remove the entry at `index`. The selection is below the cap
    /// afterwards, so the dropdown reopens.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.selected.len() {
            return None;
        }
        let removed = self.selected.remove(index);
        self.open = true;
        Some(removed)
    }

    /// Drop the whole selection and close the dropdown.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.query.clear();
        self.highlight = None;
        self.open = false;
    }

    /// Arm the reject cue.
    pub fn shake(&mut self, now: Instant) {
        self.reject_until = Some(now + REJECT_CUE);
    }

    pub fn shake_active(&self, now: Instant) -> bool {
        self.reject_until.is_some_and(|until| now < until)
    }
}
