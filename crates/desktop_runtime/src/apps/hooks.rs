//! Lifecycle hooks for the built-in apps that keep runtime-side state.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use desktop_app_contract::{AppHooks, ApplicationId, HookError, OpenOptions};

use crate::dispatcher::AppDispatcher;

/// Shared, renderer-readable state the built-in hooks maintain.
#[derive(Debug, Clone, Default)]
pub struct BuiltinAppState {
    /// File the editor was last opened with.
    pub editor_file: Rc<RefCell<Option<String>>>,
    /// Whether the system monitor sampler is running.
    pub monitor_sampling: Rc<Cell<bool>>,
    /// Number of times the system monitor sampler was (re)started.
    pub monitor_starts: Rc<Cell<u32>>,
}

struct EditorHooks {
    file: Rc<RefCell<Option<String>>>,
}

impl AppHooks for EditorHooks {
    fn on_open(&mut self, options: &OpenOptions) -> Result<(), HookError> {
        if options.launch_params.is_null() {
            return Ok(());
        }
        let path = options
            .param_str("file_path")
            .ok_or_else(|| HookError::InvalidParams("missing `file_path`".to_string()))?;
        *self.file.borrow_mut() = Some(path.to_string());
        Ok(())
    }
}

struct SystemMonitorHooks {
    sampling: Rc<Cell<bool>>,
    starts: Rc<Cell<u32>>,
}

impl AppHooks for SystemMonitorHooks {
    fn on_open(&mut self, _: &OpenOptions) -> Result<(), HookError> {
        // Restarting an already running sampler replaces it.
        self.sampling.set(true);
        self.starts.set(self.starts.get() + 1);
        Ok(())
    }

    fn on_close(&mut self) -> Result<(), HookError> {
        self.sampling.set(false);
        Ok(())
    }
}

/// Builds the dispatcher for the shipped catalog plus the state its hooks share.
pub fn builtin_dispatcher() -> (AppDispatcher, BuiltinAppState) {
    let shared = BuiltinAppState::default();
    let mut dispatcher = AppDispatcher::new();
    dispatcher.register(
        ApplicationId::trusted("editor"),
        EditorHooks {
            file: shared.editor_file.clone(),
        },
    );
    dispatcher.register(
        ApplicationId::trusted("system-monitor"),
        SystemMonitorHooks {
            sampling: shared.monitor_sampling.clone(),
            starts: shared.monitor_starts.clone(),
        },
    );
    (dispatcher, shared)
}
