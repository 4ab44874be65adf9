use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Bounds {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DesktopSection {
    z_index_base: u32,
    transmute_duration_ms: u32,
    default_app: String,
    default_app_shortcut: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppEntry {
    app_id: String,
    display_name: String,
    icon: String,
    pinned: bool,
    default_bounds: Bounds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppCatalog {
    schema_version: u32,
    desktop: DesktopSection,
    apps: Vec<AppEntry>,
}

fn validate(catalog: &AppCatalog, path: &str) {
    if catalog.schema_version != 1 {
        panic!(
            "catalog schema mismatch in {path}: expected 1 found {}",
            catalog.schema_version
        );
    }
    if catalog.apps.is_empty() {
        panic!("catalog {path} declares no apps");
    }

    let mut seen = BTreeSet::new();
    for app in &catalog.apps {
        if !seen.insert(app.app_id.as_str()) {
            panic!("duplicate app id `{}` in {path}", app.app_id);
        }
        if app.default_bounds.w <= 0 || app.default_bounds.h <= 0 {
            panic!("app `{}` in {path} has non-positive default bounds", app.app_id);
        }
    }

    if !seen.contains(catalog.desktop.default_app.as_str()) {
        panic!(
            "default app `{}` in {path} is not declared in [[apps]]",
            catalog.desktop.default_app
        );
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("apps.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: AppCatalog = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&catalog, &path.display().to_string());

    let json = serde_json::to_string_pretty(&catalog).expect("serialize app catalog");
    let generated = format!(
        "/// Build-time generated app catalog JSON.\n\
pub const APP_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
