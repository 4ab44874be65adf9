//! Desktop shell UI composition and interaction surfaces.

pub(crate) mod dom;
mod menus;
mod taskbar;
mod window;

use desktop_app_contract::{ApplicationId, OpenOptions};
use leptos::*;

use self::{menus::TaskbarContextMenu, taskbar::Taskbar, window::DesktopWindow};

use crate::{
    apps::AppRegistry,
    gesture::CaptureGuard,
    model::PointerPosition,
    reducer::DesktopAction,
    shortcuts::KeyChord,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

const SHELL_ROOT_ID: &str = "desktop-shell-root";

#[derive(Debug, Clone, PartialEq, Eq)]
struct ContextMenuState {
    app_id: ApplicationId,
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DesktopIcon {
    app_id: ApplicationId,
    label: String,
    icon: String,
}

#[component]
/// Renders the full desktop shell UI and processes queued [`crate::RuntimeEffect`] values.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let context_menu = create_rw_signal(None::<ContextMenuState>);

    create_effect(move |was_open: Option<bool>| {
        let is_open = context_menu.get().is_some();
        if is_open && !was_open.unwrap_or(false) {
            // The menu may mount after this effect runs, so a miss here is not a fault.
            let _ = dom::focus_first_menu_item(menus::MENU_ID);
        }
        is_open
    });

    let keydown_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() {
            return;
        }

        if ev.key() == "Escape" && context_menu.get_untracked().is_some() {
            ev.prevent_default();
            context_menu.set(None);
            return;
        }

        if runtime.dispatch_shortcut(&key_chord_from_event(&ev)) {
            ev.prevent_default();
            ev.stop_propagation();
        }
    });
    on_cleanup(move || keydown_listener.remove());

    let icons = runtime
        .runtime
        .with_value(|desktop| desktop_icons(desktop.registry()));

    view! {
        <div
            id=SHELL_ROOT_ID
            class="desktop-shell"
            tabindex="-1"
            on:click=move |_| {
                if context_menu.get_untracked().is_some() {
                    context_menu.set(None);
                }
            }
        >
            <div class="desktop-icon-grid">
                <For each=move || icons.clone() key=|icon| icon.app_id.to_string() let:icon>
                    {{
                        let app_id = icon.app_id.clone();
                        let menu_app_id = icon.app_id.clone();
                        view! {
                            <button
                                class="desktop-icon"
                                data-app=icon.app_id.to_string()
                                on:click=move |ev| {
                                    stop_mouse_event(&ev);
                                    context_menu.set(None);
                                    runtime.dispatch_action(DesktopAction::Open {
                                        app_id: app_id.clone(),
                                        options: OpenOptions::default(),
                                    });
                                }
                                on:contextmenu=move |ev| {
                                    stop_mouse_event(&ev);
                                    context_menu.set(Some(ContextMenuState {
                                        app_id: menu_app_id.clone(),
                                        x: ev.client_x(),
                                        y: ev.client_y(),
                                    }));
                                }
                            >
                                <span class=format!("app-icon icon-{}", icon.icon) aria-hidden="true"></span>
                                <span>{icon.label}</span>
                            </button>
                        }
                    }}
                </For>
            </div>

            <div class="desktop-window-layer">
                <For
                    each=move || state.get().windows
                    key=|win| win.app_id.to_string()
                    let:win
                >
                    <DesktopWindow app_id=win.app_id />
                </For>
            </div>

            <TaskbarContextMenu context_menu />
            <Taskbar context_menu />
        </div>
    }
}

/// One icon per registered app, in catalog order.
fn desktop_icons(registry: &AppRegistry) -> Vec<DesktopIcon> {
    registry
        .iter()
        .map(|app| DesktopIcon {
            app_id: app.app_id.clone(),
            label: app.display_name.clone(),
            icon: app.icon.clone(),
        })
        .collect()
}

fn key_chord_from_event(ev: &web_sys::KeyboardEvent) -> KeyChord {
    KeyChord {
        key: ev.key().to_lowercase(),
        ctrl: ev.ctrl_key(),
        alt: ev.alt_key(),
        shift: ev.shift_key(),
        meta: ev.meta_key(),
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Ignores secondary buttons and non-primary touch points.
fn is_primary_pointer(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

/// Dispatches a gesture start and captures window-level pointer listeners for it.
///
/// The listeners live in a [`CaptureGuard`] stored on the runtime context; they are released
/// when the gesture ends, when a new gesture replaces it, or when the desktop unmounts.
fn begin_pointer_gesture(runtime: DesktopRuntimeContext, action: DesktopAction) {
    runtime.dispatch_action(action);
    let Some(gesture_id) = runtime.interaction.with_untracked(|ui| ui.active_id()) else {
        return;
    };
    let already_captured = runtime
        .capture
        .with_value(|slot| slot.as_ref().map(CaptureGuard::gesture_id) == Some(gesture_id));
    if already_captured {
        return;
    }

    let move_listener = window_event_listener(ev::pointermove, move |ev| {
        runtime.dispatch_action(DesktopAction::UpdateGesture {
            pointer: pointer_from_pointer_event(&ev),
        });
    });
    let up_listener = window_event_listener(ev::pointerup, move |_| {
        runtime.dispatch_action(DesktopAction::EndGesture);
    });
    let cancel_listener = window_event_listener(ev::pointercancel, move |_| {
        runtime.dispatch_action(DesktopAction::EndGesture);
    });

    let guard = CaptureGuard::new(gesture_id, move || {
        move_listener.remove();
        up_listener.remove();
        cancel_listener.remove();
    });
    // Replacing the slot drops, and so releases, any capture left from an earlier gesture.
    runtime.capture.set_value(Some(guard));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{apps::load_builtin_catalog, model::DesktopState, taskbar::context_menu_actions};

    #[test]
    fn every_registered_app_gets_a_desktop_icon() {
        let (registry, _) = load_builtin_catalog().expect("catalog");
        let icons = desktop_icons(&registry);
        assert_eq!(icons.len(), registry.len());
        assert_eq!(
            icons.first().map(|icon| icon.app_id.as_str()),
            registry.iter().next().map(|app| app.app_id.as_str())
        );
    }

    #[test]
    fn desktop_icon_menu_offers_open_and_pin_for_idle_apps() {
        let (registry, _) = load_builtin_catalog().expect("catalog");
        let state = DesktopState::default();
        for icon in desktop_icons(&registry) {
            let labels: Vec<_> = context_menu_actions(&state, &icon.app_id)
                .into_iter()
                .map(|action| action.label())
                .collect();
            assert_eq!(labels, vec!["Open", "Pin to taskbar"]);
        }
    }
}
