//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived [`DesktopRuntime`] container, the reactive mirrors of its
//! state, and the presentational effect queue. UI composition stays in [`crate::components`].

use leptos::*;

use crate::{
    effect_executor,
    gesture::{CaptureGuard, InteractionState},
    model::DesktopState,
    reducer::{DesktopAction, RuntimeEffect},
    runtime::DesktopRuntime,
    shortcuts::KeyChord,
    taskbar::TaskbarEntry,
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Owned runtime: registry, reducer state, and app hooks.
    pub runtime: StoredValue<DesktopRuntime>,
    /// Reactive desktop state mirror.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer gesture mirror.
    pub interaction: RwSignal<InteractionState>,
    /// Taskbar entries, recomputed on `RenderTaskbar` effects.
    pub taskbar: RwSignal<Vec<TaskbarEntry>>,
    /// Presentational effects waiting for the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Listener capture of the active drag or resize gesture.
    pub capture: StoredValue<Option<CaptureGuard>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Runs the keyboard binding for `pressed`. Returns `true` when one matched.
    pub fn dispatch_shortcut(&self, pressed: &KeyChord) -> bool {
        let outcome = self
            .runtime
            .try_update_value(|runtime| runtime.handle_shortcut(pressed))
            .flatten();
        match outcome {
            Some(effects) => {
                self.sync(effects);
                true
            }
            None => false,
        }
    }

    /// Re-derives the taskbar entries from the runtime state.
    pub fn render_taskbar(&self) {
        if let Some(entries) = self.runtime.try_with_value(DesktopRuntime::taskbar) {
            self.taskbar.set(entries);
        }
    }

    fn sync(&self, new_effects: Vec<RuntimeEffect>) {
        sync_mirrors(
            self.runtime,
            self.state,
            self.interaction,
            self.effects,
            new_effects,
        );
    }
}

/// Copies runtime state into the reactive mirrors and queues `new_effects`.
fn sync_mirrors(
    runtime: StoredValue<DesktopRuntime>,
    state: RwSignal<DesktopState>,
    interaction: RwSignal<InteractionState>,
    effects: RwSignal<Vec<RuntimeEffect>>,
    new_effects: Vec<RuntimeEffect>,
) {
    let Some((desktop, ui)) = runtime
        .try_with_value(|runtime| (runtime.state().clone(), runtime.interaction().clone()))
    else {
        return;
    };

    if state.with_untracked(|current| current != &desktop) {
        state.set(desktop);
    }
    if interaction.with_untracked(|current| current != &ui) {
        interaction.set(ui);
    }
    if !new_effects.is_empty() {
        effects.update(|queue| queue.extend(new_effects));
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Runtime assembled by the entry layer.
    runtime: DesktopRuntime,
    children: Children,
) -> impl IntoView {
    let state = create_rw_signal(runtime.state().clone());
    let interaction = create_rw_signal(runtime.interaction().clone());
    let taskbar = create_rw_signal(runtime.taskbar());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let capture = store_value(None::<CaptureGuard>);
    let runtime = store_value(runtime);

    let dispatch = Callback::new(move |action: DesktopAction| {
        let Some(new_effects) = runtime.try_update_value(|runtime| runtime.dispatch(action)) else {
            return;
        };
        sync_mirrors(runtime, state, interaction, effects, new_effects);
    });

    let context = DesktopRuntimeContext {
        runtime,
        state,
        interaction,
        taskbar,
        effects,
        capture,
        dispatch,
    };

    provide_context(context);
    effect_executor::install(context);
    on_cleanup(move || {
        capture.update_value(|guard| {
            guard.take();
        });
    });

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
