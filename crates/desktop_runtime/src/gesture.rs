//! Drag/resize gesture sessions and the scoped listener capture that backs them.

use desktop_app_contract::ApplicationId;

use crate::model::{PointerPosition, WindowRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize,
}

/// Snapshot taken when a gesture starts. Every update is computed from this snapshot plus
/// the cumulative pointer delta, so repeated updates never accumulate drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureSession {
    pub id: u64,
    pub app_id: ApplicationId,
    pub kind: GestureKind,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

impl GestureSession {
    pub fn delta(&self, pointer: PointerPosition) -> (i32, i32) {
        (
            pointer.x.saturating_sub(self.pointer_start.x),
            pointer.y.saturating_sub(self.pointer_start.y),
        )
    }
}

/// Pointer interaction state. At most one gesture is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub active: Option<GestureSession>,
    next_gesture_id: u64,
}

impl InteractionState {
    /// Starts a gesture and returns the session it replaced, if any.
    pub fn begin(
        &mut self,
        app_id: ApplicationId,
        kind: GestureKind,
        pointer_start: PointerPosition,
        rect_start: WindowRect,
    ) -> Option<GestureSession> {
        self.next_gesture_id = self.next_gesture_id.wrapping_add(1);
        self.active.replace(GestureSession {
            id: self.next_gesture_id,
            app_id,
            kind,
            pointer_start,
            rect_start,
        })
    }

    pub fn end(&mut self) -> Option<GestureSession> {
        self.active.take()
    }

    /// Ends the active gesture when it targets `app_id`.
    pub fn end_for(&mut self, app_id: &ApplicationId) -> Option<GestureSession> {
        if self.active.as_ref().map(|s| &s.app_id) == Some(app_id) {
            return self.active.take();
        }
        None
    }

    pub fn active_id(&self) -> Option<u64> {
        self.active.as_ref().map(|s| s.id)
    }
}

/// Owns the release action for transient listeners registered at gesture start.
///
/// The release runs exactly once: on [`CaptureGuard::release`] or on drop, whichever comes
/// first. Replacing a stored guard drops the old one and therefore releases it.
pub struct CaptureGuard {
    gesture_id: u64,
    release: Option<Box<dyn FnOnce()>>,
}

impl CaptureGuard {
    pub fn new(gesture_id: u64, release: impl FnOnce() + 'static) -> Self {
        Self {
            gesture_id,
            release: Some(Box::new(release)),
        }
    }

    pub fn gesture_id(&self) -> u64 {
        self.gesture_id
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Runs the release action. Returns `false` when it already ran.
    pub fn release(&mut self) -> bool {
        match self.release.take() {
            Some(release) => {
                release();
                true
            }
            None => false,
        }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("gesture_id", &self.gesture_id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;

    fn counting_guard(id: u64, counter: &Rc<Cell<u32>>) -> CaptureGuard {
        let counter = counter.clone();
        CaptureGuard::new(id, move || counter.set(counter.get() + 1))
    }

    #[test]
    fn guard_releases_once_on_explicit_end_then_drop() {
        let released = Rc::new(Cell::new(0));
        let mut guard = counting_guard(1, &released);

        assert!(guard.release());
        assert!(!guard.release());
        drop(guard);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn guard_releases_on_drop_without_explicit_end() {
        let released = Rc::new(Cell::new(0));
        {
            let guard = counting_guard(7, &released);
            assert!(guard.is_active());
            assert_eq!(guard.gesture_id(), 7);
        }
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn replacing_stored_guard_releases_previous_capture() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut slot = Some(counting_guard(1, &first));
        assert_eq!(first.get(), 0);

        slot.replace(counting_guard(2, &second));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);

        slot.take();
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn beginning_a_gesture_replaces_the_active_one() {
        let mut interaction = InteractionState::default();
        let app = ApplicationId::trusted("terminal");
        let origin = PointerPosition { x: 0, y: 0 };

        assert_eq!(
            interaction.begin(app.clone(), GestureKind::Move, origin, WindowRect::default()),
            None
        );
        let first_id = interaction.active_id();
        let replaced = interaction
            .begin(app.clone(), GestureKind::Resize, origin, WindowRect::default())
            .expect("previous gesture");
        assert_eq!(Some(replaced.id), first_id);
        assert_ne!(interaction.active_id(), first_id);

        assert_eq!(interaction.end_for(&ApplicationId::trusted("editor")), None);
        assert!(interaction.end_for(&app).is_some());
        assert_eq!(interaction.active, None);
    }

    #[test]
    fn delta_saturates_at_extreme_pointer_positions() {
        let session = GestureSession {
            id: 1,
            app_id: ApplicationId::trusted("terminal"),
            kind: GestureKind::Move,
            pointer_start: PointerPosition { x: i32::MIN, y: 10 },
            rect_start: WindowRect::default(),
        };
        assert_eq!(
            session.delta(PointerPosition { x: i32::MAX, y: 4 }),
            (i32::MAX, -6)
        );
    }
}
