//! Owned desktop runtime: reducer state, app registry, and hook dispatch behind one entry point.
//!
//! [`DesktopRuntime::dispatch`] applies an action, runs lifecycle hooks for the effects that
//! request them, and hands the remaining presentational effects back to the caller. Every
//! [`RuntimeError`] is absorbed here with a logged diagnostic.

use desktop_app_contract::{ApplicationId, OpenOptions};
use leptos::logging;

use crate::{
    apps::{
        builtin_dispatcher, load_builtin_catalog, AppRegistry, BuiltinAppState, CatalogError,
        DesktopConfig,
    },
    dispatcher::AppDispatcher,
    error::RuntimeError,
    gesture::InteractionState,
    model::{DesktopState, WindowRect},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    shortcuts::{match_shortcut, KeyChord},
    taskbar::{render_taskbar, TaskbarEntry},
    transmute::{TransmuteDirection, TransmutePlan},
};

#[derive(Debug)]
pub struct DesktopRuntime {
    registry: AppRegistry,
    config: DesktopConfig,
    state: DesktopState,
    interaction: InteractionState,
    dispatcher: AppDispatcher,
    builtin: BuiltinAppState,
}

impl DesktopRuntime {
    pub fn new(
        registry: AppRegistry,
        config: DesktopConfig,
        dispatcher: AppDispatcher,
        builtin: BuiltinAppState,
    ) -> Self {
        let state = registry.initial_state(&config);
        Self {
            registry,
            config,
            state,
            interaction: InteractionState::default(),
            dispatcher,
            builtin,
        }
    }

    /// Boots a runtime from the shipped catalog with the built-in app hooks registered.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the embedded catalog cannot be parsed.
    pub fn builtin() -> Result<Self, CatalogError> {
        let (registry, config) = load_builtin_catalog()?;
        let (dispatcher, builtin) = builtin_dispatcher();
        logging::log!("desktop runtime booted with {} apps", registry.len());
        Ok(Self::new(registry, config, dispatcher, builtin))
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn builtin_state(&self) -> &BuiltinAppState {
        &self.builtin
    }

    /// Applies `action` and returns the effects left for the renderer.
    ///
    /// Hook effects are consumed here, after the state transition is committed.
    pub fn dispatch(&mut self, action: DesktopAction) -> Vec<RuntimeEffect> {
        match reduce_desktop(
            &mut self.state,
            &mut self.interaction,
            &self.registry,
            action,
        ) {
            Ok(effects) => self.run_hooks(effects),
            Err(err) => {
                logging::warn!("desktop reducer error: {err}");
                Vec::new()
            }
        }
    }

    /// Opens an app named by an unvalidated string.
    pub fn open_by_name(&mut self, raw: &str, options: OpenOptions) -> Vec<RuntimeEffect> {
        match self.registry.resolve(raw) {
            Ok(app_id) => self.dispatch(DesktopAction::Open { app_id, options }),
            Err(err) => {
                logging::warn!("desktop reducer error: {err}");
                Vec::new()
            }
        }
    }

    /// Runs the binding for `pressed`. Returns `None` when no binding matched.
    pub fn handle_shortcut(&mut self, pressed: &KeyChord) -> Option<Vec<RuntimeEffect>> {
        let shortcut = match_shortcut(&self.config, pressed)?;
        let action = shortcut.into_action(&self.config);
        Some(self.dispatch(action))
    }

    pub fn taskbar(&self) -> Vec<TaskbarEntry> {
        render_taskbar(&self.state, &self.registry)
    }

    /// Geometry for animating `app_id` between its window and its taskbar icon.
    ///
    /// `rendered` is the window's measured on-screen rect, which differs from the descriptor
    /// bounds while maximized. An absent or zero-sized measurement falls back to the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingRenderTarget`] when either end of the morph is absent.
    pub fn transmute_plan(
        &self,
        app_id: &ApplicationId,
        direction: TransmuteDirection,
        rendered: Option<WindowRect>,
        icon: Option<WindowRect>,
    ) -> Result<TransmutePlan, RuntimeError> {
        let bounds = self.state.descriptor(app_id).map(|w| w.bounds);
        let window = rendered
            .filter(|rect| bounds.is_some() && rect.w > 0 && rect.h > 0)
            .or(bounds)
            .ok_or_else(|| RuntimeError::MissingRenderTarget(format!("window for {app_id}")))?;
        TransmutePlan::new(
            app_id,
            direction,
            window,
            icon,
            self.config.transmute_duration_ms,
        )
    }

    fn run_hooks(&mut self, effects: Vec<RuntimeEffect>) -> Vec<RuntimeEffect> {
        let dispatcher = &mut self.dispatcher;
        effects
            .into_iter()
            .filter_map(|effect| {
                let outcome = match effect {
                    RuntimeEffect::InvokeOpenHook { app_id, options } => {
                        dispatcher.invoke_open(&app_id, &options)
                    }
                    RuntimeEffect::InvokeCloseHook { app_id } => dispatcher.invoke_close(&app_id),
                    other => return Some(other),
                };
                if let Err(err) = outcome {
                    logging::warn!("desktop hook error: {err}");
                }
                None
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::WindowState;

    fn runtime() -> DesktopRuntime {
        DesktopRuntime::builtin().expect("builtin runtime")
    }

    fn id(raw: &str) -> ApplicationId {
        ApplicationId::trusted(raw)
    }

    fn open(raw: &str) -> DesktopAction {
        DesktopAction::Open {
            app_id: id(raw),
            options: OpenOptions::default(),
        }
    }

    #[test]
    fn boots_with_default_pins_and_empty_desktop() {
        let runtime = runtime();
        let labels: Vec<_> = runtime.taskbar().into_iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Terminal", "File Explorer", "Contact"]);
        assert!(runtime.state().windows.is_empty());
        assert_eq!(runtime.state().z_counter, 30);
        assert_eq!(runtime.config().default_app, id("terminal"));
    }

    #[test]
    fn hook_effects_are_consumed_and_presentational_ones_returned() {
        let mut runtime = runtime();
        let effects = runtime.dispatch(open("system-monitor"));
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::RenderTaskbar,
                RuntimeEffect::FocusWindowInput(id("system-monitor")),
            ]
        );
        assert!(runtime.builtin_state().monitor_sampling.get());

        runtime.dispatch(DesktopAction::Close {
            app_id: id("system-monitor"),
        });
        assert!(!runtime.builtin_state().monitor_sampling.get());
    }

    #[test]
    fn closing_an_app_twice_runs_its_close_hook_once() {
        let mut runtime = runtime();
        runtime.dispatch(open("system-monitor"));
        runtime.dispatch(DesktopAction::Close {
            app_id: id("system-monitor"),
        });
        runtime.dispatch(open("system-monitor"));
        assert_eq!(runtime.builtin_state().monitor_starts.get(), 2);

        runtime.dispatch(DesktopAction::Close {
            app_id: id("system-monitor"),
        });
        let effects = runtime.dispatch(DesktopAction::Close {
            app_id: id("system-monitor"),
        });
        assert!(effects.is_empty());
        assert!(!runtime.builtin_state().monitor_sampling.get());
    }

    #[test]
    fn failing_hook_does_not_undo_open() {
        let mut runtime = runtime();
        runtime.dispatch(DesktopAction::Open {
            app_id: id("editor"),
            options: OpenOptions::with_params(json!({ "path": 3 })),
        });
        assert_eq!(runtime.state().window_state(&id("editor")), WindowState::OpenFocused);
        assert_eq!(*runtime.builtin_state().editor_file.borrow(), None);

        runtime.dispatch(DesktopAction::Open {
            app_id: id("editor"),
            options: OpenOptions::with_params(json!({ "file_path": "/documents/notes.txt" })),
        });
        assert_eq!(
            runtime.builtin_state().editor_file.borrow().as_deref(),
            Some("/documents/notes.txt")
        );
    }

    #[test]
    fn unknown_names_are_absorbed_without_state_change() {
        let mut runtime = runtime();
        let before = runtime.state().clone();
        assert!(runtime.open_by_name("paint", OpenOptions::default()).is_empty());
        assert!(runtime
            .dispatch(DesktopAction::Focus {
                app_id: id("paint")
            })
            .is_empty());
        assert_eq!(runtime.state(), &before);

        runtime.open_by_name("contact", OpenOptions::default());
        assert!(runtime.state().is_running(&id("contact")));
    }

    #[test]
    fn keyboard_shortcuts_open_terminal_and_minimize_focused() {
        let mut runtime = runtime();
        assert_eq!(runtime.handle_shortcut(&KeyChord::new("x").ctrl()), None);

        runtime
            .handle_shortcut(&KeyChord::new("T").ctrl().alt())
            .expect("open shortcut");
        assert_eq!(runtime.state().focused_app_id(), Some(&id("terminal")));

        runtime
            .handle_shortcut(&KeyChord::new("Escape"))
            .expect("escape shortcut");
        assert_eq!(runtime.state().window_state(&id("terminal")), WindowState::Minimized);
    }

    #[test]
    fn transmute_plan_requires_window_and_icon() {
        let mut runtime = runtime();
        let icon = WindowRect {
            x: 0,
            y: 700,
            w: 40,
            h: 40,
        };
        assert!(matches!(
            runtime.transmute_plan(
                &id("terminal"),
                TransmuteDirection::ToTaskbar,
                None,
                Some(icon)
            ),
            Err(RuntimeError::MissingRenderTarget(_))
        ));

        runtime.dispatch(open("terminal"));
        let plan = runtime
            .transmute_plan(&id("terminal"), TransmuteDirection::ToTaskbar, None, Some(icon))
            .expect("plan");
        assert_eq!(plan.duration_ms, 500);
        assert!(runtime
            .transmute_plan(&id("terminal"), TransmuteDirection::ToTaskbar, None, None)
            .is_err());
    }

    #[test]
    fn transmute_plan_prefers_rendered_window_rect() {
        let mut runtime = runtime();
        runtime.dispatch(open("terminal"));
        runtime.dispatch(DesktopAction::ToggleMaximize {
            app_id: id("terminal"),
        });
        let icon = WindowRect {
            x: 0,
            y: 700,
            w: 40,
            h: 40,
        };
        let screen = WindowRect {
            x: 0,
            y: 0,
            w: 1280,
            h: 680,
        };

        let measured = runtime
            .transmute_plan(
                &id("terminal"),
                TransmuteDirection::ToTaskbar,
                Some(screen),
                Some(icon),
            )
            .expect("measured plan");
        let fallback = runtime
            .transmute_plan(&id("terminal"), TransmuteDirection::ToTaskbar, None, Some(icon))
            .expect("fallback plan");
        assert_eq!(measured.window, screen);
        let hidden = runtime
            .transmute_plan(
                &id("terminal"),
                TransmuteDirection::ToTaskbar,
                Some(WindowRect { w: 0, h: 0, ..screen }),
                Some(icon),
            )
            .expect("hidden plan");
        assert_eq!(hidden.window, fallback.window);
        assert_eq!(
            fallback.window,
            runtime.state().descriptor(&id("terminal")).expect("descriptor").bounds
        );
    }
}
