use super::*;

#[component]
pub(super) fn DesktopWindow(app_id: ApplicationId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let dom_id = dom::window_dom_id(&app_id);
    let label = runtime.runtime.with_value(|desktop| {
        desktop
            .registry()
            .get(&app_id)
            .map(|app| app.display_name.clone())
            .unwrap_or_else(|| app_id.to_string())
    });

    let window = {
        let app_id = app_id.clone();
        Signal::derive(move || runtime.state.with(|state| state.descriptor(&app_id).cloned()))
    };
    let is_focused = {
        let app_id = app_id.clone();
        Signal::derive(move || runtime.state.with(|state| state.is_focused(&app_id)))
    };

    let focus = {
        let app_id = app_id.clone();
        move |_| {
            if !is_focused.get_untracked() {
                runtime.dispatch_action(DesktopAction::Focus {
                    app_id: app_id.clone(),
                });
            }
        }
    };
    let minimize = {
        let app_id = app_id.clone();
        move || runtime.dispatch_action(DesktopAction::Minimize { app_id: app_id.clone() })
    };
    let toggle_maximize = {
        let app_id = app_id.clone();
        move || {
            runtime.dispatch_action(DesktopAction::ToggleMaximize {
                app_id: app_id.clone(),
            })
        }
    };
    let close = {
        let app_id = app_id.clone();
        move || runtime.dispatch_action(DesktopAction::Close { app_id: app_id.clone() })
    };
    let begin_move = {
        let app_id = app_id.clone();
        move |ev: web_sys::PointerEvent| {
            if !is_primary_pointer(&ev) {
                return;
            }
            dom::try_set_pointer_capture(&ev);
            ev.prevent_default();
            ev.stop_propagation();
            begin_pointer_gesture(
                runtime,
                DesktopAction::BeginMove {
                    app_id: app_id.clone(),
                    pointer: pointer_from_pointer_event(&ev),
                },
            );
        }
    };
    let begin_resize = {
        let app_id = app_id.clone();
        move |ev: web_sys::PointerEvent| {
            if !is_primary_pointer(&ev) {
                return;
            }
            dom::try_set_pointer_capture(&ev);
            ev.prevent_default();
            ev.stop_propagation();
            begin_pointer_gesture(
                runtime,
                DesktopAction::BeginResize {
                    app_id: app_id.clone(),
                    pointer: pointer_from_pointer_event(&ev),
                },
            );
        }
    };

    let class_name = move || {
        let Some(win) = window.get() else {
            return "desktop-window".to_string();
        };
        let mut class_name = String::from("desktop-window");
        if is_focused.get() {
            class_name.push_str(" focused");
        }
        if win.is_minimized {
            class_name.push_str(" minimized");
        }
        if win.is_maximized {
            class_name.push_str(" maximized");
        }
        class_name
    };
    let style = move || {
        window
            .get()
            .map(|win| {
                format!(
                    "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                    win.bounds.x, win.bounds.y, win.bounds.w, win.bounds.h, win.z_index
                )
            })
            .unwrap_or_default()
    };
    let is_maximized = move || window.get().map(|win| win.is_maximized).unwrap_or(false);

    view! {
        <Show when=move || window.get().map(|win| win.is_open).unwrap_or(false) fallback=|| ()>
            <section
                id=dom_id.clone()
                class=class_name
                style=style
                tabindex="-1"
                role="dialog"
                aria-label=label.clone()
                on:pointerdown=focus.clone()
            >
                <header
                    class="titlebar"
                    on:pointerdown=begin_move.clone()
                    on:dblclick={
                        let toggle_maximize = toggle_maximize.clone();
                        move |ev: web_sys::MouseEvent| {
                            stop_mouse_event(&ev);
                            toggle_maximize();
                        }
                    }
                >
                    <span class="titlebar-title">{label.clone()}</span>
                    <div class="titlebar-controls">
                        <button
                            aria-label="Minimize window"
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click={
                                let minimize = minimize.clone();
                                move |ev| {
                                    stop_mouse_event(&ev);
                                    minimize();
                                }
                            }
                        >
                            "_"
                        </button>
                        <button
                            aria-label=move || {
                                if is_maximized() { "Restore window" } else { "Maximize window" }
                            }
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click={
                                let toggle_maximize = toggle_maximize.clone();
                                move |ev| {
                                    stop_mouse_event(&ev);
                                    toggle_maximize();
                                }
                            }
                        >
                            "□"
                        </button>
                        <button
                            aria-label="Close window"
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click={
                                let close = close.clone();
                                move |ev| {
                                    stop_mouse_event(&ev);
                                    close();
                                }
                            }
                        >
                            "×"
                        </button>
                    </div>
                </header>
                <div class="window-body">
                    <WindowBody app_id=app_id.clone() />
                </div>
                {
                    let begin_resize = begin_resize.clone();
                    view! {
                        <Show when=move || !is_maximized() fallback=|| ()>
                            <div
                                class="window-resize-handle edge-se"
                                aria-hidden="true"
                                on:pointerdown=begin_resize.clone()
                            />
                        </Show>
                    }
                }
            </section>
        </Show>
    }
}

/// Status line for apps whose hooks keep runtime-side state.
#[component]
fn WindowBody(app_id: ApplicationId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let status = move || {
        // Re-read whenever the desktop state changes; hooks only run on transitions.
        runtime.state.with(|_| ());
        runtime.runtime.with_value(|desktop| {
            let builtin = desktop.builtin_state();
            match app_id.as_str() {
                "editor" => builtin
                    .editor_file
                    .borrow()
                    .clone()
                    .map(|path| format!("Editing {path}")),
                "system-monitor" if builtin.monitor_sampling.get() => Some(format!(
                    "Sampling (started {} times)",
                    builtin.monitor_starts.get()
                )),
                _ => None,
            }
        })
    };

    view! {
        <div class="window-body-content">
            {move || status().map(|text| view! { <p class="window-status">{text}</p> })}
        </div>
    }
}
