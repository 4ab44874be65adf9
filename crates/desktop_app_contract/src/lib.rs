//! Shared contract types between the desktop window manager runtime and managed apps.
//!
//! Apps are identified by a stable string [`ApplicationId`] and participate in window
//! transitions through the [`AppHooks`] capability trait. The runtime invokes hooks after it
//! has already committed the window state change, so a hook always observes post-transition
//! state and can never veto or roll back a transition.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Stable identifier for a desktop application.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` is a lowercase slug (`terminal`, `file-explorer`,
    /// `core_sentinel`).
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected a lowercase slug"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for compile-time/runtime trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 64 {
        return false;
    }
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() {
        return false;
    }
    if raw.ends_with('-') || raw.ends_with('_') {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-' || *b == b'_')
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Options passed through an open request to the app's `on_open` hook.
pub struct OpenOptions {
    /// Play the taskbar-to-window transmute when restoring a minimized window.
    #[serde(default)]
    pub transmute: bool,
    /// Free-form launch parameters (for example `{ "file_path": "/README.md" }`).
    #[serde(default)]
    pub launch_params: Value,
}

impl OpenOptions {
    /// Options for a restore from the taskbar.
    pub fn restore() -> Self {
        Self {
            transmute: true,
            launch_params: Value::Null,
        }
    }

    /// Options carrying launch parameters.
    pub fn with_params(launch_params: Value) -> Self {
        Self {
            transmute: false,
            launch_params,
        }
    }

    /// Options that hand a document path to the app as the `file_path` launch parameter.
    pub fn for_file(path: impl Into<String>) -> Self {
        Self::with_params(serde_json::json!({ "file_path": path.into() }))
    }

    /// Returns a string launch parameter by key.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.launch_params.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Lifecycle events that carry an app hook.
pub enum AppLifecycleEvent {
    /// Window was opened (or restored) and focused.
    Opened,
    /// Window was closed.
    Closed,
}

impl AppLifecycleEvent {
    /// Returns the name of the hook run for this event.
    pub const fn hook_name(self) -> &'static str {
        match self {
            Self::Opened => "on_open",
            Self::Closed => "on_close",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure raised by an app lifecycle hook.
pub enum HookError {
    /// The hook could not complete its work.
    #[error("hook failed: {0}")]
    Failed(String),
    /// The hook rejected the launch parameters it was given.
    #[error("invalid launch params: {0}")]
    InvalidParams(String),
}

/// Lifecycle capability pair implemented by apps that react to window transitions.
///
/// Both hooks default to no-ops, so an app only implements the side it cares about.
pub trait AppHooks {
    /// Called after the app window has been opened and focused.
    fn on_open(&mut self, options: &OpenOptions) -> Result<(), HookError> {
        let _ = options;
        Ok(())
    }

    /// Called after the app window has been closed.
    fn on_close(&mut self) -> Result<(), HookError> {
        Ok(())
    }
}
