//! Closed app registry resolved once at startup from the build-time catalog.

mod hooks;

use desktop_app_contract::ApplicationId;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    error::RuntimeError,
    model::{DesktopState, WindowRect},
    shortcuts::KeyChord,
};

pub use hooks::{builtin_dispatcher, BuiltinAppState};

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

const CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppDescriptor {
    pub app_id: ApplicationId,
    pub display_name: String,
    pub icon: String,
    pub pinned: bool,
    pub default_bounds: WindowRect,
}

impl AppDescriptor {
    pub fn new(app_id: &str, display_name: &str, default_bounds: WindowRect) -> Self {
        Self {
            app_id: ApplicationId::trusted(app_id),
            display_name: display_name.to_string(),
            icon: app_id.to_string(),
            pinned: false,
            default_bounds,
        }
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }
}

/// Desktop-wide settings from the `[desktop]` table of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DesktopConfig {
    pub z_index_base: u32,
    pub transmute_duration_ms: u32,
    pub default_app: ApplicationId,
    pub default_app_shortcut: KeyChord,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            z_index_base: 30,
            transmute_duration_ms: 500,
            default_app: ApplicationId::trusted("terminal"),
            default_app_shortcut: KeyChord::new("t").ctrl().alt(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AppCatalog {
    schema_version: u32,
    desktop: DesktopConfig,
    apps: Vec<AppDescriptor>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("app catalog is not valid json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("app catalog schema mismatch: expected {expected} found {found}")]
    SchemaMismatch { expected: u32, found: u32 },
    #[error("app `{0}` is declared more than once")]
    DuplicateApp(String),
    #[error("default app `{0}` is not in the registry")]
    MissingDefaultApp(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRegistry {
    apps: Vec<AppDescriptor>,
}

impl AppRegistry {
    /// Builds a registry, preserving the given order for taskbar rendering.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateApp`] when two descriptors share an id.
    pub fn from_descriptors(apps: Vec<AppDescriptor>) -> Result<Self, CatalogError> {
        for (idx, app) in apps.iter().enumerate() {
            if apps[..idx].iter().any(|prev| prev.app_id == app.app_id) {
                return Err(CatalogError::DuplicateApp(app.app_id.to_string()));
            }
        }
        Ok(Self { apps })
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.iter()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn get(&self, app_id: &ApplicationId) -> Option<&AppDescriptor> {
        self.apps.iter().find(|app| &app.app_id == app_id)
    }

    pub fn contains(&self, app_id: &ApplicationId) -> bool {
        self.get(app_id).is_some()
    }

    /// Returns the descriptor or the `UnknownApp` error.
    pub fn require(&self, app_id: &ApplicationId) -> Result<&AppDescriptor, RuntimeError> {
        self.get(app_id).ok_or_else(|| RuntimeError::unknown(app_id))
    }

    /// Resolves a raw, unvalidated app name (terminal `run`, shortcuts, URLs).
    pub fn resolve(&self, raw: &str) -> Result<ApplicationId, RuntimeError> {
        self.apps
            .iter()
            .find(|app| app.app_id.as_str() == raw)
            .map(|app| app.app_id.clone())
            .ok_or_else(|| RuntimeError::UnknownApp(raw.to_string()))
    }

    pub fn default_pinned(&self) -> impl Iterator<Item = ApplicationId> + '_ {
        self.apps
            .iter()
            .filter(|app| app.pinned)
            .map(|app| app.app_id.clone())
    }

    /// Fresh desktop state with catalog pins applied.
    pub fn initial_state(&self, config: &DesktopConfig) -> DesktopState {
        DesktopState::new(config.z_index_base, self.default_pinned())
    }
}

/// Parses the build-time catalog shipped with the crate.
///
/// # Errors
///
/// Returns a [`CatalogError`] when the generated JSON is malformed or inconsistent.
pub fn load_builtin_catalog() -> Result<(AppRegistry, DesktopConfig), CatalogError> {
    parse_catalog(APP_CATALOG_JSON)
}

fn parse_catalog(raw: &str) -> Result<(AppRegistry, DesktopConfig), CatalogError> {
    let catalog: AppCatalog = serde_json::from_str(raw)?;
    if catalog.schema_version != CATALOG_SCHEMA_VERSION {
        return Err(CatalogError::SchemaMismatch {
            expected: CATALOG_SCHEMA_VERSION,
            found: catalog.schema_version,
        });
    }
    let registry = AppRegistry::from_descriptors(catalog.apps)?;
    if !registry.contains(&catalog.desktop.default_app) {
        return Err(CatalogError::MissingDefaultApp(
            catalog.desktop.default_app.to_string(),
        ));
    }
    Ok((registry, catalog.desktop))
}
