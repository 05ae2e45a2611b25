//! Per-session document state.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use scribelint_plugin::Lint;

/// Identifies one editing session (a text field, a buffer, a file).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Current snapshot and latest results of one session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The most recently submitted text.
    pub text: String,
    /// Incremented on every submitted text.
    pub version: u64,
    /// Lints of the last completed pass over `text`.
    pub lints: Vec<Lint>,
    /// When false, submissions are recorded but not linted.
    pub enabled: bool,
    /// When false, the AI reviewer is not consulted.
    pub ai_enabled: bool,
}

impl SessionState {
    fn new(ai_enabled: bool) -> Self {
        Self {
            text: String::new(),
            version: 0,
            lints: Vec::new(),
            enabled: true,
            ai_enabled,
        }
    }
}

/// Thread-safe map of session states.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionState>>,
    /// Initial AI toggle for new sessions.
    ai_default: bool,
}

impl SessionStore {
    /// Creates an empty store whose new sessions start with AI review set to `ai_default`.
    pub fn new(ai_default: bool) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ai_default,
        }
    }

    /// Records `text` as the session's current snapshot and returns the new version.
    ///
    /// Lints of the previous snapshot are cleared: their spans no longer apply.
    pub fn update_text(&self, id: &SessionId, text: impl Into<String>) -> u64 {
        let mut sessions = self.sessions.write();
        let state = sessions
            .entry(id.clone())
            .or_insert_with(|| SessionState::new(self.ai_default));
        state.text = text.into();
        state.version += 1;
        state.lints.clear();
        state.version
    }

    /// Returns the session's current text.
    pub fn current_text(&self, id: &SessionId) -> Option<String> {
        self.sessions.read().get(id).map(|s| s.text.clone())
    }

    /// Returns true if `version` is still the session's current snapshot.
    ///
    /// Resubmitting identical text still makes a new version, so the text
    /// alone does not identify a snapshot.
    pub fn is_current(&self, id: &SessionId, version: u64) -> bool {
        self.sessions
            .read()
            .get(id)
            .is_some_and(|s| s.version == version)
    }

    /// Stores lints computed for snapshot `version`, unless a newer one arrived.
    ///
    /// Returns false when the lints were dropped as stale.
    pub fn set_lints(&self, id: &SessionId, version: u64, lints: Vec<Lint>) -> bool {
        let mut sessions = self.sessions.write();
        match sessions.get_mut(id) {
            Some(state) if state.version == version => {
                state.lints = lints;
                true
            }
            _ => false,
        }
    }

    /// Returns the latest lints of the session.
    pub fn lints(&self, id: &SessionId) -> Vec<Lint> {
        self.sessions
            .read()
            .get(id)
            .map(|s| s.lints.clone())
            .unwrap_or_default()
    }

    /// Returns a copy of the session state.
    pub fn get(&self, id: &SessionId) -> Option<SessionState> {
        self.sessions.read().get(id).cloned()
    }

    /// Enables or disables linting for the session. Disabling clears its lints.
    pub fn set_enabled(&self, id: &SessionId, enabled: bool) {
        let mut sessions = self.sessions.write();
        let state = sessions
            .entry(id.clone())
            .or_insert_with(|| SessionState::new(self.ai_default));
        state.enabled = enabled;
        if !enabled {
            state.lints.clear();
        }
    }

    /// Returns true if linting is enabled for the session.
    pub fn is_enabled(&self, id: &SessionId) -> bool {
        self.sessions.read().get(id).is_none_or(|s| s.enabled)
    }

    /// Enables or disables AI review for the session.
    pub fn set_ai_enabled(&self, id: &SessionId, enabled: bool) {
        let mut sessions = self.sessions.write();
        sessions
            .entry(id.clone())
            .or_insert_with(|| SessionState::new(self.ai_default))
            .ai_enabled = enabled;
    }

    /// Returns true if AI review is enabled for the session.
    pub fn is_ai_enabled(&self, id: &SessionId) -> bool {
        self.sessions
            .read()
            .get(id)
            .map_or(self.ai_default, |s| s.ai_enabled)
    }

    /// Forgets the session.
    pub fn remove(&self, id: &SessionId) -> Option<SessionState> {
        self.sessions.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
