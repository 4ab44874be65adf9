pub mod apps;
pub mod components;
pub mod dispatcher;
mod effect_executor;
pub mod error;
pub mod gesture;
pub mod model;
pub mod reducer;
pub mod runtime;
mod runtime_context;
pub mod shortcuts;
pub mod taskbar;
pub mod transmute;
pub mod window_manager;

pub use apps::{load_builtin_catalog, AppDescriptor, AppRegistry, CatalogError, DesktopConfig};
pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use dispatcher::AppDispatcher;
pub use error::RuntimeError;
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use runtime::DesktopRuntime;
pub use taskbar::{render_taskbar, TaskbarEntry};
