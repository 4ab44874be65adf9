//! Taskbar derivation, pinning, icon-click dispatch, and per-icon context menus.

use desktop_app_contract::{ApplicationId, OpenOptions};

use crate::{
    apps::AppRegistry, error::RuntimeError, model::DesktopState, reducer::DesktopAction,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub app_id: ApplicationId,
    pub label: String,
    pub icon: String,
    pub is_running: bool,
    pub is_pinned: bool,
    pub is_focused: bool,
    pub is_minimized: bool,
}

/// Derives the taskbar from `(pinned ∪ running) ∩ registry`, in registry order.
pub fn render_taskbar(state: &DesktopState, registry: &AppRegistry) -> Vec<TaskbarEntry> {
    registry
        .iter()
        .filter(|app| state.is_pinned(&app.app_id) || state.is_running(&app.app_id))
        .map(|app| TaskbarEntry {
            app_id: app.app_id.clone(),
            label: app.display_name.clone(),
            icon: app.icon.clone(),
            is_running: state.is_running(&app.app_id),
            is_pinned: state.is_pinned(&app.app_id),
            is_focused: state.is_focused(&app.app_id),
            is_minimized: state.is_minimized(&app.app_id),
        })
        .collect()
}

/// Adds `app_id` to the pinned set. Returns `true` when membership changed.
pub fn pin_app(
    state: &mut DesktopState,
    registry: &AppRegistry,
    app_id: &ApplicationId,
) -> Result<bool, RuntimeError> {
    registry.require(app_id)?;
    Ok(state.pinned.insert(app_id.clone()))
}

/// Removes `app_id` from the pinned set. Returns `true` when membership changed.
pub fn unpin_app(
    state: &mut DesktopState,
    registry: &AppRegistry,
    app_id: &ApplicationId,
) -> Result<bool, RuntimeError> {
    registry.require(app_id)?;
    Ok(state.pinned.remove(app_id))
}

/// Resolves a taskbar icon click into the window-manager action it stands for.
pub fn taskbar_click_action(state: &DesktopState, app_id: &ApplicationId) -> DesktopAction {
    let app_id = app_id.clone();
    if !state.is_running(&app_id) {
        return DesktopAction::Open {
            app_id,
            options: OpenOptions::default(),
        };
    }
    if state.is_minimized(&app_id) {
        return DesktopAction::Open {
            app_id,
            options: OpenOptions::restore(),
        };
    }
    if state.is_focused(&app_id) {
        return DesktopAction::Minimize { app_id };
    }
    DesktopAction::Focus { app_id }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuAction {
    Open,
    Close,
    Minimize,
    Pin,
    Unpin,
}

impl ContextMenuAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Close => "Close",
            Self::Minimize => "Minimize",
            Self::Pin => "Pin to taskbar",
            Self::Unpin => "Unpin from taskbar",
        }
    }

    pub fn into_action(self, app_id: ApplicationId) -> DesktopAction {
        match self {
            Self::Open => DesktopAction::Open {
                app_id,
                options: OpenOptions::default(),
            },
            Self::Close => DesktopAction::Close { app_id },
            Self::Minimize => DesktopAction::Minimize { app_id },
            Self::Pin => DesktopAction::Pin { app_id },
            Self::Unpin => DesktopAction::Unpin { app_id },
        }
    }
}

/// Context menu entries available for an app icon in the current state.
pub fn context_menu_actions(state: &DesktopState, app_id: &ApplicationId) -> Vec<ContextMenuAction> {
    let running = state.is_running(app_id);
    let mut actions = Vec::with_capacity(3);
    if running {
        actions.push(ContextMenuAction::Close);
        if !state.is_minimized(app_id) {
            actions.push(ContextMenuAction::Minimize);
        }
    } else {
        actions.push(ContextMenuAction::Open);
    }
    if state.is_pinned(app_id) {
        actions.push(ContextMenuAction::Unpin);
    } else {
        actions.push(ContextMenuAction::Pin);
    }
    actions
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        apps::AppDescriptor,
        model::WindowRect,
        window_manager::{focus_window, minimize_window, open_window},
    };

    fn registry() -> AppRegistry {
        let rect = WindowRect::default();
        AppRegistry::from_descriptors(vec![
            AppDescriptor::new("terminal", "Terminal", rect).pinned(),
            AppDescriptor::new("editor", "Editor", rect),
            AppDescriptor::new("calculator", "Calculator", rect),
            AppDescriptor::new("contact", "Contact", rect).pinned(),
        ])
        .expect("registry")
    }

    fn id(raw: &str) -> ApplicationId {
        ApplicationId::trusted(raw)
    }

    fn ids(entries: &[TaskbarEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.app_id.as_str()).collect()
    }

    #[test]
    fn entries_follow_registry_order_not_alphabetical() {
        let registry = registry();
        let mut state = registry.initial_state(&Default::default());
        open_window(&mut state, &registry, &id("editor")).unwrap();

        let entries = render_taskbar(&state, &registry);
        assert_eq!(ids(&entries), vec!["terminal", "editor", "contact"]);
        assert!(entries[1].is_running && !entries[1].is_pinned && entries[1].is_focused);
        assert!(entries[0].is_pinned && !entries[0].is_running);
    }

    #[test]
    fn pinned_app_ids_outside_registry_are_filtered() {
        let registry = registry();
        let mut state = registry.initial_state(&Default::default());
        state.pinned.insert(id("paint"));

        assert_eq!(ids(&render_taskbar(&state, &registry)), vec!["terminal", "contact"]);
        assert_eq!(
            pin_app(&mut state, &registry, &id("ghost")),
            Err(RuntimeError::UnknownApp("ghost".to_string()))
        );
    }

    #[test]
    fn pinning_never_touches_running_or_window_state() {
        let registry = registry();
        let mut state = registry.initial_state(&Default::default());
        open_window(&mut state, &registry, &id("editor")).unwrap();
        let windows = state.windows.clone();
        let running = state.running.clone();

        assert_eq!(pin_app(&mut state, &registry, &id("editor")), Ok(true));
        assert_eq!(pin_app(&mut state, &registry, &id("editor")), Ok(false));
        assert_eq!(unpin_app(&mut state, &registry, &id("terminal")), Ok(true));

        assert_eq!(state.windows, windows);
        assert_eq!(state.running, running);
        assert_eq!(ids(&render_taskbar(&state, &registry)), vec!["editor", "contact"]);
    }

    #[test]
    fn click_dispatch_covers_all_icon_states() {
        let registry = registry();
        let mut state = registry.initial_state(&Default::default());
        let terminal = id("terminal");

        assert_eq!(
            taskbar_click_action(&state, &terminal),
            DesktopAction::Open {
                app_id: terminal.clone(),
                options: OpenOptions::default()
            }
        );

        open_window(&mut state, &registry, &terminal).unwrap();
        assert_eq!(
            taskbar_click_action(&state, &terminal),
            DesktopAction::Minimize {
                app_id: terminal.clone()
            }
        );

        open_window(&mut state, &registry, &id("editor")).unwrap();
        assert_eq!(
            taskbar_click_action(&state, &terminal),
            DesktopAction::Focus {
                app_id: terminal.clone()
            }
        );

        focus_window(&mut state, &registry, &terminal).unwrap();
        minimize_window(&mut state, &registry, &terminal).unwrap();
        assert_eq!(
            taskbar_click_action(&state, &terminal),
            DesktopAction::Open {
                app_id: terminal.clone(),
                options: OpenOptions::restore()
            }
        );
    }

    #[test]
    fn context_menu_matches_running_and_pin_state() {
        let registry = registry();
        let mut state = registry.initial_state(&Default::default());

        assert_eq!(
            context_menu_actions(&state, &id("terminal")),
            vec![ContextMenuAction::Open, ContextMenuAction::Unpin]
        );

        open_window(&mut state, &registry, &id("editor")).unwrap();
        assert_eq!(
            context_menu_actions(&state, &id("editor")),
            vec![
                ContextMenuAction::Close,
                ContextMenuAction::Minimize,
                ContextMenuAction::Pin
            ]
        );

        minimize_window(&mut state, &registry, &id("editor")).unwrap();
        assert_eq!(
            context_menu_actions(&state, &id("editor")),
            vec![ContextMenuAction::Close, ContextMenuAction::Pin]
        );
        assert_eq!(
            ContextMenuAction::Pin.into_action(id("editor")),
            DesktopAction::Pin {
                app_id: id("editor")
            }
        );
    }
}
