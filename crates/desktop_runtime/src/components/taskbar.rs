use super::*;
use crate::taskbar::TaskbarEntry;

const TASKBAR_MENU_HEIGHT_PX: i32 = 160;

#[component]
pub(super) fn Taskbar(context_menu: RwSignal<Option<ContextMenuState>>) -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <footer class="taskbar" role="toolbar" aria-label="Taskbar">
            <For
                each=move || runtime.taskbar.get()
                key=|entry| {
                    (
                        entry.app_id.to_string(),
                        entry.is_running,
                        entry.is_pinned,
                        entry.is_focused,
                        entry.is_minimized,
                    )
                }
                let:entry
            >
                <TaskbarIcon entry context_menu />
            </For>
        </footer>
    }
}

#[component]
fn TaskbarIcon(
    entry: TaskbarEntry,
    context_menu: RwSignal<Option<ContextMenuState>>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let click_app_id = entry.app_id.clone();
    let menu_app_id = entry.app_id.clone();

    view! {
        <button
            id=dom::taskbar_icon_dom_id(&entry.app_id)
            class=taskbar_icon_class(&entry)
            aria-label=taskbar_aria_label(&entry)
            aria-pressed=entry.is_focused.to_string()
            on:click=move |ev| {
                stop_mouse_event(&ev);
                context_menu.set(None);
                runtime.dispatch_action(DesktopAction::TaskbarClick {
                    app_id: click_app_id.clone(),
                });
            }
            on:contextmenu=move |ev| {
                stop_mouse_event(&ev);
                context_menu.set(Some(ContextMenuState {
                    app_id: menu_app_id.clone(),
                    x: ev.client_x(),
                    y: (ev.client_y() - TASKBAR_MENU_HEIGHT_PX).max(0),
                }));
            }
        >
            <span class=format!("app-icon icon-{}", entry.icon) aria-hidden="true"></span>
            <span class="taskbar-indicator" aria-hidden="true"></span>
        </button>
    }
}

fn taskbar_icon_class(entry: &TaskbarEntry) -> String {
    let mut class_name = String::from("taskbar-icon");
    for (flag, name) in [
        (entry.is_running, " running"),
        (entry.is_pinned, " pinned"),
        (entry.is_focused, " focused"),
        (entry.is_minimized, " minimized"),
    ] {
        if flag {
            class_name.push_str(name);
        }
    }
    class_name
}

fn taskbar_aria_label(entry: &TaskbarEntry) -> String {
    let status = if !entry.is_running {
        "not running"
    } else if entry.is_minimized {
        "minimized"
    } else if entry.is_focused {
        "active"
    } else {
        "running"
    };
    format!("{} ({status})", entry.label)
}
