use crate::Millis;

/// Quiet window after the last keystroke before a search is committed.
pub const SEARCH_DEBOUNCE_MS: Millis = 500;

/// Holds at most one pending search value and the time it becomes effective.
///
/// Every new input replaces the pending value and restarts the window, so
/// only the last value typed within a window is ever emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDebouncer {
    quiet_window: Millis,
    pending: Option<PendingQuery>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingQuery {
    value: String,
    deadline: Millis,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE_MS)
    }
}

impl SearchDebouncer {
    pub fn new(quiet_window: Millis) -> Self {
        Self {
            quiet_window,
            pending: None,
        }
    }

    pub fn input(&mut self, value: impl Into<String>, now: Millis) {
        self.pending = Some(PendingQuery {
            value: value.into(),
            deadline: now.saturating_add(self.quiet_window),
        });
    }

    /// Returns the pending value once its window has elapsed, clearing it.
    pub fn poll(&mut self, now: Millis) -> Option<String> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
