use super::*;
use crate::taskbar::context_menu_actions;

pub(super) const MENU_ID: &str = "taskbar-context-menu";

#[component]
pub(super) fn TaskbarContextMenu(context_menu: RwSignal<Option<ContextMenuState>>) -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <Show when=move || context_menu.get().is_some() fallback=|| ()>
            {move || {
                let Some(menu) = context_menu.get() else {
                    return ().into_view();
                };
                let actions = runtime
                    .state
                    .with(|state| context_menu_actions(state, &menu.app_id));
                let menu_style = format!("left:{}px;top:{}px;", menu.x, menu.y);

                view! {
                    <div
                        id=MENU_ID
                        class="taskbar-menu"
                        role="menu"
                        aria-label=format!("{} menu", menu.app_id)
                        style=menu_style
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Escape" {
                                ev.prevent_default();
                                ev.stop_propagation();
                                context_menu.set(None);
                                if !dom::focus_element_by_id(SHELL_ROOT_ID) {
                                    dom::warn_missing_target(SHELL_ROOT_ID);
                                }
                            }
                        }
                        on:mousedown=move |ev| ev.stop_propagation()
                        on:click=move |ev| ev.stop_propagation()
                    >
                        {actions
                            .into_iter()
                            .map(|action| {
                                let app_id = menu.app_id.clone();
                                view! {
                                    <button
                                        role="menuitem"
                                        class="taskbar-menu-item"
                                        on:click:undelegated=move |ev| {
                                            stop_mouse_event(&ev);
                                            context_menu.set(None);
                                            runtime.dispatch_action(action.into_action(app_id.clone()));
                                        }
                                    >
                                        {action.label()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                    .into_view()
            }}
        </Show>
    }
}
