//! Explicit runtime effect-queue executor for reducer-emitted presentational effects.

use std::time::Duration;

use leptos::*;

use crate::{
    components::dom,
    reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext,
};

/// Installs the effect executor that drains queued runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the current queue before processing so nested dispatches enqueue a fresh batch instead
    // of being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_effect(runtime, effect);
        }
    });
}

fn run_effect(runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::RenderTaskbar => runtime.render_taskbar(),
        RuntimeEffect::FocusWindowInput(app_id) => {
            let window_id = dom::window_dom_id(&app_id);
            if !dom::focus_element_by_id(&window_id) {
                dom::warn_missing_target(&window_id);
            }
        }
        RuntimeEffect::ReleaseGesture { gesture_id } => {
            runtime.capture.update_value(|slot| {
                if slot.as_ref().map(|guard| guard.gesture_id()) == Some(gesture_id) {
                    slot.take();
                }
            });
        }
        RuntimeEffect::Transmute { app_id, direction } => {
            if dom::prefers_reduced_motion() {
                return;
            }
            let window_id = dom::window_dom_id(&app_id);
            let rendered = dom::element_rect(&window_id);
            let icon = dom::element_rect(&dom::taskbar_icon_dom_id(&app_id));
            let plan = runtime
                .runtime
                .with_value(|desktop| desktop.transmute_plan(&app_id, direction, rendered, icon));
            match plan {
                Ok(plan) => {
                    if !dom::play_transmute(&window_id, &plan) {
                        dom::warn_missing_target(&window_id);
                        return;
                    }
                    set_timeout(
                        move || dom::finish_transmute(&window_id),
                        Duration::from_millis(u64::from(plan.duration_ms)),
                    );
                }
                Err(err) => logging::warn!("transmute skipped: {err}"),
            }
        }
        // Hook effects are consumed by `DesktopRuntime::dispatch`.
        RuntimeEffect::InvokeOpenHook { .. } | RuntimeEffect::InvokeCloseHook { .. } => {}
    }
}
