//! Window-manager transition helpers used by the desktop reducer.
//!
//! Each helper mutates one [`DesktopState`] and reports whether anything changed. Unknown app
//! ids are rejected with [`RuntimeError::UnknownApp`] before any mutation happens.

use desktop_app_contract::ApplicationId;

use crate::{
    apps::AppRegistry,
    error::RuntimeError,
    model::{DesktopState, WindowDescriptor, WindowRect},
};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 220;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 140;

/// What an open transition changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOutcome {
    /// The app was not in the running set before this call.
    pub started: bool,
    /// The window was minimized before this call.
    pub restored: bool,
}

/// Opens (or restores) the window for `app_id` and focuses it.
pub fn open_window(
    state: &mut DesktopState,
    registry: &AppRegistry,
    app_id: &ApplicationId,
) -> Result<OpenOutcome, RuntimeError> {
    let descriptor = registry.require(app_id)?;
    if state.descriptor(app_id).is_none() {
        state.windows.push(WindowDescriptor::new(
            app_id.clone(),
            descriptor
                .default_bounds
                .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT),
        ));
    }

    let mut restored = false;
    if let Some(window) = state.descriptor_mut(app_id) {
        restored = window.is_open && window.is_minimized;
        window.is_open = true;
        window.is_minimized = false;
    }
    let started = state.running.insert(app_id.clone());
    focus_window_internal(state, app_id);

    Ok(OpenOutcome { started, restored })
}

/// Closes the window. Returns `false` when the app was not running.
pub fn close_window(
    state: &mut DesktopState,
    registry: &AppRegistry,
    app_id: &ApplicationId,
) -> Result<bool, RuntimeError> {
    registry.require(app_id)?;
    if let Some(window) = state.descriptor_mut(app_id) {
        window.is_open = false;
        window.is_minimized = false;
        window.is_maximized = false;
    }
    if state.is_focused(app_id) {
        state.focused = None;
    }
    Ok(state.running.remove(app_id))
}

/// Minimizes an open window, dropping focus if it held it.
pub fn minimize_window(
    state: &mut DesktopState,
    registry: &AppRegistry,
    app_id: &ApplicationId,
) -> Result<bool, RuntimeError> {
    registry.require(app_id)?;
    let Some(window) = state.descriptor_mut(app_id) else {
        return Ok(false);
    };
    if !window.is_open || window.is_minimized {
        return Ok(false);
    }
    window.is_minimized = true;
    if state.is_focused(app_id) {
        state.focused = None;
    }
    Ok(true)
}

/// Toggles the maximized overlay. Minimized and focus state are left alone.
pub fn toggle_maximize_window(
    state: &mut DesktopState,
    registry: &AppRegistry,
    app_id: &ApplicationId,
) -> Result<bool, RuntimeError> {
    registry.require(app_id)?;
    let Some(window) = state.descriptor_mut(app_id) else {
        return Ok(false);
    };
    if !window.is_open {
        return Ok(false);
    }
    window.is_maximized = !window.is_maximized;
    Ok(true)
}

/// Focuses and raises `app_id`. Returns `true` when focus or stacking changed.
pub fn focus_window(
    state: &mut DesktopState,
    registry: &AppRegistry,
    app_id: &ApplicationId,
) -> Result<bool, RuntimeError> {
    registry.require(app_id)?;
    Ok(focus_window_internal(state, app_id))
}

/// Focus without the registry check, for callers that already validated `app_id`.
///
/// Focusing a minimized window restores it so the focused window is always visible.
pub(crate) fn focus_window_internal(state: &mut DesktopState, app_id: &ApplicationId) -> bool {
    let already_focused = state.is_focused(app_id)
        && state
            .descriptor(app_id)
            .map(WindowDescriptor::is_visible)
            .unwrap_or(false);
    if already_focused {
        return false;
    }

    let next_z = state.z_counter.saturating_add(1);
    let Some(window) = state.descriptor_mut(app_id) else {
        return false;
    };
    if !window.is_open {
        return false;
    }
    window.is_minimized = false;
    window.z_index = next_z;
    state.z_counter = next_z;
    state.focused = Some(app_id.clone());
    true
}

/// Sets bounds to `start` offset by the cumulative gesture delta.
pub fn move_window(
    state: &mut DesktopState,
    app_id: &ApplicationId,
    start: WindowRect,
    dx: i32,
    dy: i32,
) -> bool {
    let Some(window) = state.descriptor_mut(app_id) else {
        return false;
    };
    if !window.is_open || window.is_maximized {
        return false;
    }
    let next = start.offset(dx, dy);
    let changed = window.bounds != next;
    window.bounds = next;
    changed
}

/// Sets bounds to `start` grown by the cumulative gesture delta, clamped to the minimum size.
pub fn resize_window(
    state: &mut DesktopState,
    app_id: &ApplicationId,
    start: WindowRect,
    dw: i32,
    dh: i32,
) -> bool {
    let Some(window) = state.descriptor_mut(app_id) else {
        return false;
    };
    if !window.is_open || window.is_maximized {
        return false;
    }
    let next = start
        .grown(dw, dh)
        .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
    let changed = window.bounds != next;
    window.bounds = next;
    changed
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{apps::AppDescriptor, model::WindowState};

    fn registry() -> AppRegistry {
        let rect = WindowRect {
            x: 100,
            y: 100,
            w: 400,
            h: 300,
        };
        AppRegistry::from_descriptors(vec![
            AppDescriptor::new("terminal", "Terminal", rect),
            AppDescriptor::new("editor", "Editor", rect),
            AppDescriptor::new("calculator", "Calculator", rect),
        ])
        .expect("registry")
    }

    fn id(raw: &str) -> ApplicationId {
        ApplicationId::trusted(raw)
    }

    #[test]
    fn open_creates_descriptor_lazily_and_focuses() {
        let registry = registry();
        let mut state = DesktopState::new(30, []);

        let outcome = open_window(&mut state, &registry, &id("terminal")).unwrap();
        assert_eq!(
            outcome,
            OpenOutcome {
                started: true,
                restored: false
            }
        );
        let window = state.descriptor(&id("terminal")).unwrap();
        assert_eq!(window.bounds.x, 100);
        assert_eq!(window.z_index, 31);
        assert_eq!(state.window_state(&id("terminal")), WindowState::OpenFocused);
        assert!(state.is_running(&id("terminal")));
    }

    #[test]
    fn descriptor_is_reused_across_close_and_open() {
        let registry = registry();
        let mut state = DesktopState::default();

        open_window(&mut state, &registry, &id("editor")).unwrap();
        move_window(
            &mut state,
            &id("editor"),
            WindowRect {
                x: 100,
                y: 100,
                w: 400,
                h: 300,
            },
            15,
            25,
        );
        assert!(close_window(&mut state, &registry, &id("editor")).unwrap());
        open_window(&mut state, &registry, &id("editor")).unwrap();

        assert_eq!(state.windows.len(), 1);
        assert_eq!(state.descriptor(&id("editor")).unwrap().bounds.x, 115);
    }

    #[test]
    fn unknown_app_is_rejected_without_mutation() {
        let registry = registry();
        let mut state = DesktopState::default();
        let before = state.clone();

        assert_eq!(
            open_window(&mut state, &registry, &id("paint")),
            Err(RuntimeError::UnknownApp("paint".to_string()))
        );
        assert_eq!(
            minimize_window(&mut state, &registry, &id("paint")),
            Err(RuntimeError::UnknownApp("paint".to_string()))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn closing_never_opened_app_is_a_silent_noop() {
        let registry = registry();
        let mut state = DesktopState::default();
        let before = state.clone();

        assert_eq!(close_window(&mut state, &registry, &id("calculator")), Ok(false));
        assert_eq!(state, before);
    }

    #[test]
    fn minimize_and_maximize_ignore_closed_windows() {
        let registry = registry();
        let mut state = DesktopState::default();
        open_window(&mut state, &registry, &id("editor")).unwrap();
        close_window(&mut state, &registry, &id("editor")).unwrap();

        assert_eq!(minimize_window(&mut state, &registry, &id("editor")), Ok(false));
        assert_eq!(
            toggle_maximize_window(&mut state, &registry, &id("editor")),
            Ok(false)
        );
        assert_eq!(focus_window(&mut state, &registry, &id("editor")), Ok(false));
        assert_eq!(state.window_state(&id("editor")), WindowState::Closed);
    }

    #[test]
    fn maximize_is_an_independent_overlay() {
        let registry = registry();
        let mut state = DesktopState::default();
        open_window(&mut state, &registry, &id("terminal")).unwrap();

        toggle_maximize_window(&mut state, &registry, &id("terminal")).unwrap();
        minimize_window(&mut state, &registry, &id("terminal")).unwrap();
        let window = state.descriptor(&id("terminal")).unwrap();
        assert!(window.is_maximized);
        assert!(window.is_minimized);

        open_window(&mut state, &registry, &id("terminal")).unwrap();
        let window = state.descriptor(&id("terminal")).unwrap();
        assert!(window.is_maximized);
        assert!(!window.is_minimized);
    }

    #[test]
    fn focusing_minimized_window_restores_it() {
        let registry = registry();
        let mut state = DesktopState::default();
        open_window(&mut state, &registry, &id("terminal")).unwrap();
        minimize_window(&mut state, &registry, &id("terminal")).unwrap();
        assert_eq!(state.focused, None);

        assert_eq!(focus_window(&mut state, &registry, &id("terminal")), Ok(true));
        assert_eq!(state.window_state(&id("terminal")), WindowState::OpenFocused);
    }

    #[test]
    fn repeated_drag_updates_do_not_accumulate() {
        let registry = registry();
        let mut state = DesktopState::default();
        open_window(&mut state, &registry, &id("terminal")).unwrap();
        let start = state.descriptor(&id("terminal")).unwrap().bounds;

        for _ in 0..5 {
            move_window(&mut state, &id("terminal"), start, 10, -4);
        }
        let bounds = state.descriptor(&id("terminal")).unwrap().bounds;
        assert_eq!(bounds, start.offset(10, -4));
    }

    #[test]
    fn resize_clamps_to_minimum_and_maximized_windows_do_not_move() {
        let registry = registry();
        let mut state = DesktopState::default();
        open_window(&mut state, &registry, &id("editor")).unwrap();
        let start = state.descriptor(&id("editor")).unwrap().bounds;

        resize_window(&mut state, &id("editor"), start, -1000, -1000);
        let bounds = state.descriptor(&id("editor")).unwrap().bounds;
        assert_eq!((bounds.w, bounds.h), (MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));

        toggle_maximize_window(&mut state, &registry, &id("editor")).unwrap();
        assert!(!move_window(&mut state, &id("editor"), bounds, 50, 50));
        assert_eq!(state.descriptor(&id("editor")).unwrap().bounds, bounds);
    }
}
