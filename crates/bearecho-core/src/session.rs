//! Search input rules for the home screen.
//!
//! The input shows the animation's revealed text while it plays and the
//! user's own text otherwise. Edits are ignored while the animation plays,
//! and a search is only issued for a non-blank value when no other search is
//! in flight.

use std::{fmt, time::Duration};

use crate::engine::Snapshot;

/// Delay of the stubbed search request.
pub const SEARCH_STUB_DELAY: Duration = Duration::from_millis(1500);

/// A trimmed, non-empty search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim `raw`; `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let term = raw.trim();
        if term.is_empty() {
            None
        } else {
            Some(Self(term.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Manual input and busy state owned by the home screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    manual_input: String,
    searching: bool,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text typed by the user.
    pub fn manual_input(&self) -> &str {
        &self.manual_input
    }

    /// Whether a search is in flight.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Value the input should show for this animation snapshot.
    pub fn effective_value<'a>(&'a self, snapshot: &'a Snapshot) -> &'a str {
        if snapshot.is_animating {
            &snapshot.display_text
        } else {
            &self.manual_input
        }
    }

    /// Apply a user edit. Returns `false` (and keeps the old text) while the
    /// animation is playing.
    pub fn edit(&mut self, value: impl Into<String>, animating: bool) -> bool {
        if animating {
            return false;
        }
        self.manual_input = value.into();
        true
    }

    /// Begin a search for `value`.
    ///
    /// Returns `None` without touching the busy flag when the trimmed value is
    /// empty or a search is already running.
    pub fn submit(&mut self, value: &str) -> Option<SearchQuery> {
        if self.searching {
            return None;
        }
        let query = SearchQuery::new(value)?;
        self.searching = true;
        tracing::debug!(query = %query, "search submitted");
        Some(query)
    }

    /// Mark the in-flight search as finished.
    pub fn finish(&mut self) {
        self.searching = false;
    }
}
