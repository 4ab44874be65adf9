//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::{ApplicationId, OpenOptions};

use crate::{
    apps::AppRegistry,
    error::RuntimeError,
    gesture::{GestureKind, GestureSession, InteractionState},
    model::{DesktopState, PointerPosition},
    taskbar::{pin_app, taskbar_click_action, unpin_app},
    transmute::TransmuteDirection,
    window_manager::{
        close_window, focus_window, focus_window_internal, minimize_window, move_window,
        open_window, resize_window, toggle_maximize_window,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open (or restore) an app window and focus it.
    Open {
        /// App to open.
        app_id: ApplicationId,
        /// Options forwarded to the app's `on_open` hook.
        options: OpenOptions,
    },
    /// Close an app window.
    Close {
        /// App to close.
        app_id: ApplicationId,
    },
    /// Minimize an app window into the taskbar.
    Minimize {
        /// App to minimize.
        app_id: ApplicationId,
    },
    /// Minimize whichever window currently holds focus.
    MinimizeFocused,
    /// Toggle the maximized overlay of an app window.
    ToggleMaximize {
        /// App to toggle.
        app_id: ApplicationId,
    },
    /// Focus (and raise) an app window.
    Focus {
        /// App to focus.
        app_id: ApplicationId,
    },
    /// Apply the taskbar icon click rule for an app.
    TaskbarClick {
        /// App whose icon was clicked.
        app_id: ApplicationId,
    },
    /// Pin an app to the taskbar.
    Pin {
        /// App to pin.
        app_id: ApplicationId,
    },
    /// Unpin an app from the taskbar.
    Unpin {
        /// App to unpin.
        app_id: ApplicationId,
    },
    /// Move a window by a delta from its current bounds in one step.
    Move {
        /// App window to move.
        app_id: ApplicationId,
        /// Horizontal delta.
        dx: i32,
        /// Vertical delta.
        dy: i32,
    },
    /// Resize a window by a delta from its current bounds in one step.
    Resize {
        /// App window to resize.
        app_id: ApplicationId,
        /// Width delta.
        dw: i32,
        /// Height delta.
        dh: i32,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// App window being dragged.
        app_id: ApplicationId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Begin resizing a window from its resize handle.
    BeginResize {
        /// App window being resized.
        app_id: ApplicationId,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update the active drag or resize gesture.
    UpdateGesture {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active drag or resize gesture.
    EndGesture,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`], run after the state change is committed.
pub enum RuntimeEffect {
    /// Taskbar membership or indicators changed.
    RenderTaskbar,
    /// Invoke the app's `on_open` hook.
    InvokeOpenHook {
        /// App that was opened.
        app_id: ApplicationId,
        /// Options from the open request.
        options: OpenOptions,
    },
    /// Invoke the app's `on_close` hook.
    InvokeCloseHook {
        /// App that was closed.
        app_id: ApplicationId,
    },
    /// Play the window/taskbar morph. Purely visual.
    Transmute {
        /// App window to animate.
        app_id: ApplicationId,
        /// Morph direction.
        direction: TransmuteDirection,
    },
    /// Move keyboard focus into the newly focused window.
    FocusWindowInput(ApplicationId),
    /// Release the transient listeners captured for a gesture.
    ReleaseGesture {
        /// Gesture whose capture should be released.
        gesture_id: u64,
    },
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`RuntimeError::UnknownApp`] when an action references an app outside `registry`.
/// The state is left untouched in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    registry: &AppRegistry,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, RuntimeError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::Open { app_id, options } => {
            let outcome = open_window(state, registry, &app_id)?;
            effects.push(RuntimeEffect::RenderTaskbar);
            if options.transmute && outcome.restored {
                effects.push(RuntimeEffect::Transmute {
                    app_id: app_id.clone(),
                    direction: TransmuteDirection::FromTaskbar,
                });
            }
            effects.push(RuntimeEffect::FocusWindowInput(app_id.clone()));
            effects.push(RuntimeEffect::InvokeOpenHook { app_id, options });
        }
        DesktopAction::Close { app_id } => {
            let was_running = close_window(state, registry, &app_id)?;
            release_gesture_for(interaction, &app_id, &mut effects);
            if was_running {
                effects.push(RuntimeEffect::RenderTaskbar);
                effects.push(RuntimeEffect::InvokeCloseHook { app_id });
            }
        }
        DesktopAction::Minimize { app_id } => {
            if minimize_window(state, registry, &app_id)? {
                release_gesture_for(interaction, &app_id, &mut effects);
                effects.push(RuntimeEffect::RenderTaskbar);
                effects.push(RuntimeEffect::Transmute {
                    app_id,
                    direction: TransmuteDirection::ToTaskbar,
                });
            }
        }
        DesktopAction::MinimizeFocused => {
            if let Some(app_id) = state.focused.clone() {
                return reduce_desktop(
                    state,
                    interaction,
                    registry,
                    DesktopAction::Minimize { app_id },
                );
            }
        }
        DesktopAction::ToggleMaximize { app_id } => {
            toggle_maximize_window(state, registry, &app_id)?;
        }
        DesktopAction::Focus { app_id } => {
            if focus_window(state, registry, &app_id)? {
                effects.push(RuntimeEffect::RenderTaskbar);
                effects.push(RuntimeEffect::FocusWindowInput(app_id));
            }
        }
        DesktopAction::TaskbarClick { app_id } => {
            registry.require(&app_id)?;
            let resolved = taskbar_click_action(state, &app_id);
            return reduce_desktop(state, interaction, registry, resolved);
        }
        DesktopAction::Pin { app_id } => {
            if pin_app(state, registry, &app_id)? {
                effects.push(RuntimeEffect::RenderTaskbar);
            }
        }
        DesktopAction::Unpin { app_id } => {
            if unpin_app(state, registry, &app_id)? {
                effects.push(RuntimeEffect::RenderTaskbar);
            }
        }
        DesktopAction::Move { app_id, dx, dy } => {
            registry.require(&app_id)?;
            if let Some(start) = state.descriptor(&app_id).map(|w| w.bounds) {
                move_window(state, &app_id, start, dx, dy);
            }
        }
        DesktopAction::Resize { app_id, dw, dh } => {
            registry.require(&app_id)?;
            if let Some(start) = state.descriptor(&app_id).map(|w| w.bounds) {
                resize_window(state, &app_id, start, dw, dh);
            }
        }
        DesktopAction::BeginMove { app_id, pointer } => {
            begin_gesture(
                state,
                interaction,
                registry,
                app_id,
                GestureKind::Move,
                pointer,
                &mut effects,
            )?;
        }
        DesktopAction::BeginResize { app_id, pointer } => {
            begin_gesture(
                state,
                interaction,
                registry,
                app_id,
                GestureKind::Resize,
                pointer,
                &mut effects,
            )?;
        }
        DesktopAction::UpdateGesture { pointer } => {
            if let Some(session) = interaction.active.as_ref() {
                let (dx, dy) = session.delta(pointer);
                match session.kind {
                    GestureKind::Move => {
                        move_window(state, &session.app_id, session.rect_start, dx, dy);
                    }
                    GestureKind::Resize => {
                        resize_window(state, &session.app_id, session.rect_start, dx, dy);
                    }
                }
            }
        }
        DesktopAction::EndGesture => {
            if let Some(session) = interaction.end() {
                effects.push(RuntimeEffect::ReleaseGesture {
                    gesture_id: session.id,
                });
            }
        }
    }

    Ok(effects)
}

fn begin_gesture(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    registry: &AppRegistry,
    app_id: ApplicationId,
    kind: GestureKind,
    pointer: PointerPosition,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), RuntimeError> {
    registry.require(&app_id)?;
    let Some(window) = state.descriptor(&app_id) else {
        return Ok(());
    };
    if !window.is_open || window.is_maximized {
        return Ok(());
    }
    let rect_start = window.bounds;

    if focus_window_internal(state, &app_id) {
        effects.push(RuntimeEffect::RenderTaskbar);
    }
    if let Some(GestureSession { id, .. }) = interaction.begin(app_id, kind, pointer, rect_start)
    {
        effects.push(RuntimeEffect::ReleaseGesture { gesture_id: id });
    }
    Ok(())
}

fn release_gesture_for(
    interaction: &mut InteractionState,
    app_id: &ApplicationId,
    effects: &mut Vec<RuntimeEffect>,
) {
    if let Some(session) = interaction.end_for(app_id) {
        effects.push(RuntimeEffect::ReleaseGesture {
            gesture_id: session.id,
        });
    }
}
