use desktop_app_contract::OpenOptions;
use desktop_runtime::{DesktopProvider, DesktopRuntime, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Desktop" />
        <Meta name="description" content="A browser-hosted desktop shell with windows and a taskbar." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                </Routes>
            </main>
        </Router>
    }
}

const FILE_APP: &str = "editor";

/// Resolves the `?open=<app-id>` and `?file=<path>` query pair into an open request.
///
/// A file without an app opens in the editor.
fn deep_link(open: Option<String>, file: Option<String>) -> Option<(String, OpenOptions)> {
    let options = file.map(OpenOptions::for_file).unwrap_or_default();
    let app = match open {
        Some(app) => app,
        None if !options.launch_params.is_null() => FILE_APP.to_string(),
        None => return None,
    };
    Some((app, options))
}

/// Boots the desktop runtime, opening the app named by the query string when present.
#[component]
pub fn DesktopEntry() -> impl IntoView {
    let query = use_query_map();
    let requested = query.with_untracked(|map| {
        deep_link(map.get("open").cloned(), map.get("file").cloned())
    });

    let mut runtime = match DesktopRuntime::builtin() {
        Ok(runtime) => runtime,
        Err(err) => {
            logging::error!("desktop catalog failed to load: {err}");
            return view! { <p class="boot-error">"The desktop failed to start."</p> }.into_view();
        }
    };
    if let Some((app, options)) = requested {
        runtime.open_by_name(&app, options);
    }

    view! {
        <DesktopProvider runtime>
            <DesktopShell />
        </DesktopProvider>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn deep_link_routes_files_to_the_editor() {
        assert_eq!(deep_link(None, None), None);
        assert_eq!(
            deep_link(Some("terminal".into()), None),
            Some(("terminal".to_string(), OpenOptions::default()))
        );

        let (app, options) = deep_link(None, Some("/documents/notes.txt".into())).expect("file link");
        assert_eq!(app, "editor");
        assert_eq!(options.param_str("file_path"), Some("/documents/notes.txt"));

        let (app, _) = deep_link(Some("calculator".into()), Some("/a.txt".into())).expect("link");
        assert_eq!(app, "calculator");
    }

    #[test]
    fn file_deep_link_reaches_the_editor_hook() {
        let mut runtime = DesktopRuntime::builtin().expect("builtin runtime");
        let (app, options) = deep_link(None, Some("/documents/about_me.txt".into())).expect("link");
        runtime.open_by_name(&app, options);
        assert_eq!(
            runtime.builtin_state().editor_file.borrow().as_deref(),
            Some("/documents/about_me.txt")
        );
    }
}
