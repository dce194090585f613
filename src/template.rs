use crate::{metadata::ExtensionMetadata, vfs::VirtualFS};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error("Error occurred attempting to render template: {name}")]
    #[diagnostic(code(mkext::template::render))]
    Render {
        name: &'static str,
        #[source]
        source: tera::Error,
    },

    #[error("Error occurred attempting to serialize the manifest")]
    #[diagnostic(code(mkext::template::manifest))]
    Manifest(#[source] serde_json::Error),
}

pub const OPTIONS_DIR: &str = "options";
pub const CONTENT_DIR: &str = "content";
pub const BACKGROUND_DIR: &str = "background";
pub const ICON_DIR: &str = "icon";

pub const MANIFEST_FILE: &str = "manifest.json";
pub const CONTENT_SCRIPT: &str = "content/content.js";
pub const BACKGROUND_SCRIPT: &str = "background/background.js";
pub const POPUP_HTML: &str = "options/popup.html";
pub const POPUP_JS: &str = "options/popup.js";
pub const POPUP_CSS: &str = "options/popup.css";

const CONTENT_JS_SOURCE: &str = include_str!("../templates/content.js");
const BACKGROUND_JS_SOURCE: &str = include_str!("../templates/background.js");
const POPUP_HTML_TEMPLATE: &str = include_str!("../templates/popup.html.tera");
const POPUP_JS_SOURCE: &str = include_str!("../templates/popup.js");
const POPUP_CSS_SOURCE: &str = include_str!("../templates/popup.css");

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    manifest_version: u8,
    name: &'a str,
    version: &'a str,
    description: &'a str,
    // left empty; `icon/` is created without any images in it
    icons: IndexMap<String, String>,
    action: Action<'a>,
    permissions: Vec<&'a str>,
    content_scripts: Vec<ContentScript<'a>>,
    background: Background<'a>,
    options_page: &'a str,
}
#[derive(Debug, Serialize)]
struct Action<'a> {
    default_popup: &'a str,
}
#[derive(Debug, Serialize)]
struct ContentScript<'a> {
    matches: Vec<&'a str>,
    js: Vec<&'a str>,
}
#[derive(Debug, Serialize)]
struct Background<'a> {
    service_worker: &'a str,
}

/// Renders `manifest.json` as pretty printed JSON with two space indentation.
pub fn render_manifest(metadata: &ExtensionMetadata) -> Result<String, TemplateError> {
    let manifest = Manifest {
        manifest_version: 3,
        name: &metadata.name,
        version: &metadata.version,
        description: &metadata.description,
        icons: IndexMap::new(),
        action: Action {
            default_popup: POPUP_HTML,
        },
        permissions: vec!["activeTab", "storage"],
        content_scripts: vec![ContentScript {
            matches: vec!["<all_urls>"],
            js: vec![CONTENT_SCRIPT],
        }],
        background: Background {
            service_worker: BACKGROUND_SCRIPT,
        },
        options_page: POPUP_HTML,
    };

    serde_json::to_string_pretty(&manifest).map_err(TemplateError::Manifest)
}

/// Renders `options/popup.html`. Metadata is substituted verbatim.
pub fn render_popup(metadata: &ExtensionMetadata) -> Result<String, TemplateError> {
    let mut context = Context::new();
    context.insert("name", &metadata.name);
    context.insert("version", &metadata.version);
    context.insert("description", &metadata.description);

    Tera::one_off(POPUP_HTML_TEMPLATE, &context, false).map_err(|error| {
        TemplateError::Render {
            name: POPUP_HTML,
            source: error,
        }
    })
}

/// Builds the full scaffold for `target` in memory. Does not touch the file system.
///
/// Directories come first (root, `options`, `content`, `background`, `icon`) followed by the
/// files, in the order they are written.
pub fn build_vfs(
    target: &Path,
    metadata: &ExtensionMetadata,
) -> Result<VirtualFS, TemplateError> {
    let mut vfs = VirtualFS::new(target);

    for dir in [OPTIONS_DIR, CONTENT_DIR, BACKGROUND_DIR, ICON_DIR] {
        vfs.push_dir(dir);
    }

    vfs.push_file(MANIFEST_FILE, render_manifest(metadata)?).notes = vec![
        format!("name: {}", metadata.name),
        format!("version: {}", metadata.version),
        format!("description: {}", metadata.description),
    ];
    vfs.push_file(CONTENT_SCRIPT, CONTENT_JS_SOURCE.to_string());
    vfs.push_file(BACKGROUND_SCRIPT, BACKGROUND_JS_SOURCE.to_string());
    vfs.push_file(POPUP_HTML, render_popup(metadata)?);
    vfs.push_file(POPUP_JS, POPUP_JS_SOURCE.to_string());
    vfs.push_file(POPUP_CSS, POPUP_CSS_SOURCE.to_string());

    log::debug!(
        "planned {} entries under {}",
        vfs.entries.len(),
        target.display()
    );

    Ok(vfs)
}
