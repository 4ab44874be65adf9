use std::collections::BTreeSet;

use desktop_app_contract::ApplicationId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_WIDTH: i32 = 420;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    pub fn grown(self, dw: i32, dh: i32) -> Self {
        Self {
            w: self.w.saturating_add(dw),
            h: self.h.saturating_add(dh),
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    /// Center point as floating point coordinates.
    pub fn center(self) -> (f64, f64) {
        (
            f64::from(self.x) + f64::from(self.w) / 2.0,
            f64::from(self.y) + f64::from(self.h) / 2.0,
        )
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 48,
            y: 48,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

/// Discrete per-window state. `is_maximized` is an overlay on top of the open states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowState {
    Closed,
    OpenFocused,
    OpenUnfocused,
    Minimized,
}

/// Per-application window record. Created on first open and reused for the lifetime of the
/// desktop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDescriptor {
    pub app_id: ApplicationId,
    pub bounds: WindowRect,
    pub z_index: u32,
    pub is_open: bool,
    pub is_minimized: bool,
    pub is_maximized: bool,
}

impl WindowDescriptor {
    pub fn new(app_id: ApplicationId, bounds: WindowRect) -> Self {
        Self {
            app_id,
            bounds,
            z_index: 0,
            is_open: false,
            is_minimized: false,
            is_maximized: false,
        }
    }

    /// Whether the window is on screen (open and not minimized).
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_minimized
    }
}

/// Owned aggregate for all window and taskbar state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    /// Descriptors in creation order.
    pub windows: Vec<WindowDescriptor>,
    pub running: BTreeSet<ApplicationId>,
    pub pinned: BTreeSet<ApplicationId>,
    pub focused: Option<ApplicationId>,
    pub z_counter: u32,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(0, std::iter::empty())
    }
}

impl DesktopState {
    pub fn new(z_index_base: u32, pinned: impl IntoIterator<Item = ApplicationId>) -> Self {
        Self {
            windows: Vec::new(),
            running: BTreeSet::new(),
            pinned: pinned.into_iter().collect(),
            focused: None,
            z_counter: z_index_base,
        }
    }

    pub fn descriptor(&self, app_id: &ApplicationId) -> Option<&WindowDescriptor> {
        self.windows.iter().find(|w| &w.app_id == app_id)
    }

    pub fn descriptor_mut(&mut self, app_id: &ApplicationId) -> Option<&mut WindowDescriptor> {
        self.windows.iter_mut().find(|w| &w.app_id == app_id)
    }

    pub fn focused_app_id(&self) -> Option<&ApplicationId> {
        self.focused.as_ref()
    }

    pub fn is_focused(&self, app_id: &ApplicationId) -> bool {
        self.focused.as_ref() == Some(app_id)
    }

    pub fn is_running(&self, app_id: &ApplicationId) -> bool {
        self.running.contains(app_id)
    }

    pub fn is_pinned(&self, app_id: &ApplicationId) -> bool {
        self.pinned.contains(app_id)
    }

    pub fn is_minimized(&self, app_id: &ApplicationId) -> bool {
        self.descriptor(app_id)
            .map(|w| w.is_open && w.is_minimized)
            .unwrap_or(false)
    }

    pub fn window_state(&self, app_id: &ApplicationId) -> WindowState {
        match self.descriptor(app_id) {
            Some(window) if window.is_open && window.is_minimized => WindowState::Minimized,
            Some(window) if window.is_open && self.is_focused(app_id) => WindowState::OpenFocused,
            Some(window) if window.is_open => WindowState::OpenUnfocused,
            _ => WindowState::Closed,
        }
    }

    /// Open windows ordered bottom-to-top by stacking order.
    pub fn stacked_open_windows(&self) -> Vec<&WindowDescriptor> {
        let mut open: Vec<_> = self.windows.iter().filter(|w| w.is_open).collect();
        open.sort_by_key(|w| w.z_index);
        open
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn id(raw: &str) -> ApplicationId {
        ApplicationId::trusted(raw)
    }

    #[test]
    fn window_state_is_closed_without_descriptor() {
        let state = DesktopState::new(30, [id("terminal")]);
        assert_eq!(state.window_state(&id("terminal")), WindowState::Closed);
        assert!(state.is_pinned(&id("terminal")));
        assert!(!state.is_running(&id("terminal")));
        assert_eq!(state.z_counter, 30);
    }

    #[test]
    fn window_state_reflects_flags_and_focus() {
        let mut state = DesktopState::default();
        let mut window = WindowDescriptor::new(id("editor"), WindowRect::default());
        window.is_open = true;
        state.windows.push(window);

        assert_eq!(state.window_state(&id("editor")), WindowState::OpenUnfocused);
        state.focused = Some(id("editor"));
        assert_eq!(state.window_state(&id("editor")), WindowState::OpenFocused);
        state.focused = None;
        state.windows[0].is_minimized = true;
        assert_eq!(state.window_state(&id("editor")), WindowState::Minimized);
    }

    #[test]
    fn rect_helpers_keep_untouched_fields() {
        let rect = WindowRect {
            x: 10,
            y: 20,
            w: 300,
            h: 200,
        };
        assert_eq!(
            rect.offset(5, -5),
            WindowRect {
                x: 15,
                y: 15,
                w: 300,
                h: 200
            }
        );
        assert_eq!(rect.grown(-400, 10).clamped_min(220, 140).w, 220);
        assert_eq!(rect.center(), (160.0, 120.0));
    }

    #[test]
    fn rect_helpers_saturate_on_extreme_deltas() {
        let rect = WindowRect::default();
        let moved = rect.offset(i32::MAX, i32::MIN);
        assert_eq!((moved.x, moved.y), (i32::MAX, i32::MIN + 48));
        let grown = rect.grown(i32::MAX, i32::MIN).clamped_min(220, 140);
        assert_eq!((grown.w, grown.h), (i32::MAX, 140));
    }
}
