//! Error taxonomy for desktop runtime transitions.
//!
//! Every variant is absorbed by [`crate::runtime::DesktopRuntime`] with a logged diagnostic;
//! none of them is fatal and none is surfaced to the user.

use desktop_app_contract::{AppLifecycleEvent, ApplicationId, HookError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Recoverable runtime errors raised while applying desktop actions.
pub enum RuntimeError {
    /// The action referenced an app id with no registry entry.
    #[error("unknown app `{0}`")]
    UnknownApp(String),
    /// A UI node the renderer expected (window or taskbar icon) is absent.
    #[error("missing render target `{0}`")]
    MissingRenderTarget(String),
    /// An app lifecycle hook failed after its transition was committed.
    #[error("{} hook for `{app_id}` failed: {source}", .event.hook_name())]
    HookFault {
        /// App whose hook failed.
        app_id: ApplicationId,
        /// Transition the hook was reacting to.
        event: AppLifecycleEvent,
        /// Underlying hook failure.
        #[source]
        source: HookError,
    },
}

impl RuntimeError {
    pub(crate) fn unknown(app_id: &ApplicationId) -> Self {
        Self::UnknownApp(app_id.to_string())
    }
}
