//! App lifecycle hook dispatch around window-manager transitions.

use std::collections::HashMap;

use desktop_app_contract::{AppHooks, AppLifecycleEvent, ApplicationId, OpenOptions};

use crate::error::RuntimeError;

/// Maps app ids to their lifecycle hooks. Apps without hooks are simply absent.
#[derive(Default)]
pub struct AppDispatcher {
    hooks: HashMap<ApplicationId, Box<dyn AppHooks>>,
}

impl AppDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers hooks for `app_id`, replacing any previous registration.
    pub fn register(&mut self, app_id: ApplicationId, hooks: impl AppHooks + 'static) {
        self.hooks.insert(app_id, Box::new(hooks));
    }

    pub fn has_hooks(&self, app_id: &ApplicationId) -> bool {
        self.hooks.contains_key(app_id)
    }

    /// Runs `on_open` once. A failure is returned as `HookFault`; it never undoes the open.
    pub fn invoke_open(
        &mut self,
        app_id: &ApplicationId,
        options: &OpenOptions,
    ) -> Result<(), RuntimeError> {
        let Some(hooks) = self.hooks.get_mut(app_id) else {
            return Ok(());
        };
        hooks
            .on_open(options)
            .map_err(|source| RuntimeError::HookFault {
                app_id: app_id.clone(),
                event: AppLifecycleEvent::Opened,
                source,
            })
    }

    /// Runs `on_close` once. A failure is returned as `HookFault`; it never undoes the close.
    pub fn invoke_close(&mut self, app_id: &ApplicationId) -> Result<(), RuntimeError> {
        let Some(hooks) = self.hooks.get_mut(app_id) else {
            return Ok(());
        };
        hooks.on_close().map_err(|source| RuntimeError::HookFault {
            app_id: app_id.clone(),
            event: AppLifecycleEvent::Closed,
            source,
        })
    }
}

impl std::fmt::Debug for AppDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut apps: Vec<_> = self.hooks.keys().map(ApplicationId::as_str).collect();
        apps.sort_unstable();
        f.debug_struct("AppDispatcher").field("apps", &apps).finish()
    }
}
