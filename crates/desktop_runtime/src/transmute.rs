//! Geometry for the minimize/restore morph between a window and its taskbar icon.
//!
//! The window state is already final when a plan is built; rendering the plan is optional
//! and skipping it (reduced motion, missing icon) changes nothing but visuals.

use desktop_app_contract::ApplicationId;

use crate::{error::RuntimeError, model::WindowRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmuteDirection {
    ToTaskbar,
    FromTaskbar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransmutePlan {
    pub direction: TransmuteDirection,
    pub window: WindowRect,
    pub icon: WindowRect,
    pub duration_ms: u32,
}

impl TransmutePlan {
    /// Builds a plan, failing with `MissingRenderTarget` when the taskbar icon is absent.
    pub fn new(
        app_id: &ApplicationId,
        direction: TransmuteDirection,
        window: WindowRect,
        icon: Option<WindowRect>,
        duration_ms: u32,
    ) -> Result<Self, RuntimeError> {
        let icon = icon.ok_or_else(|| {
            RuntimeError::MissingRenderTarget(format!("taskbar icon for {app_id}"))
        })?;
        Ok(Self {
            direction,
            window,
            icon,
            duration_ms,
        })
    }

    /// Scale and translation that map the window onto the icon.
    pub fn collapsed_transform(&self) -> (f64, f64, f64, f64) {
        let scale_x = ratio(self.icon.w, self.window.w);
        let scale_y = ratio(self.icon.h, self.window.h);
        let (icon_cx, icon_cy) = self.icon.center();
        let (win_cx, win_cy) = self.window.center();
        (scale_x, scale_y, icon_cx - win_cx, icon_cy - win_cy)
    }

    /// CSS transform for the collapsed (icon-sized) end of the morph.
    pub fn collapsed_css(&self) -> String {
        let (scale_x, scale_y, translate_x, translate_y) = self.collapsed_transform();
        format!("translate({translate_x}px, {translate_y}px) scale({scale_x}, {scale_y})")
    }

    /// `(start, end)` CSS transforms in playback order.
    pub fn keyframes(&self) -> (String, String) {
        let collapsed = self.collapsed_css();
        let expanded = "translate(0px, 0px) scale(1, 1)".to_string();
        match self.direction {
            TransmuteDirection::ToTaskbar => (expanded, collapsed),
            TransmuteDirection::FromTaskbar => (collapsed, expanded),
        }
    }
}

fn ratio(num: i32, den: i32) -> f64 {
    if den == 0 {
        return 1.0;
    }
    f64::from(num) / f64::from(den)
}
