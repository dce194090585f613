use crate::{
    metadata::{ExtensionMetadata, MetadataOverrides},
    preview::render_tree,
    prompt::{self, Ask},
    scaffold::{self, apply_vfs},
    template::{self, build_vfs},
    vfs::VirtualFS,
};
use colored::Colorize;
use std::path::{Path, PathBuf};

const RULE_WIDTH: usize = 50;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum MkextError {
    #[error("Missing target directory")]
    #[diagnostic(
        code(mkext::usage),
        help("Pass the directory to create, e.g. `mkext my-extension`")
    )]
    MissingDirectory,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] prompt::PromptError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] template::TemplateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scaffold(#[from] scaffold::ScaffoldError),
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct Scaffolded {
    pub metadata: ExtensionMetadata,
    pub vfs: VirtualFS,
}

/// Scaffolds a browser extension project at `directory` from already collected metadata.
///
/// This is the non-interactive core: it plans the layout in memory, then creates it on disk.
///
/// # Errors
///
/// Returns a [`MkextError`] if:
///
/// - A template cannot be rendered.
/// - `directory` already exists.
/// - A directory or file cannot be created or written to.
pub fn generate(
    directory: &Path,
    metadata: ExtensionMetadata,
) -> Result<Scaffolded, MkextError> {
    let vfs = build_vfs(directory, &metadata)?;

    apply_vfs(&vfs)?;

    Ok(Scaffolded { metadata, vfs })
}

/// Prompts for the extension metadata, scaffolds the project at `directory` and prints a
/// summary of the result.
///
/// # Errors
///
/// Returns a [`MkextError`] if:
///
/// - `directory` is empty.
/// - User prompts fail or the user cancels the input.
/// - `directory` already exists.
/// - A directory or file cannot be created or written to.
pub fn create_extension(
    directory: &str,
    overrides: &MetadataOverrides,
    asker: &mut dyn Ask,
) -> Result<Scaffolded, MkextError> {
    if directory.trim().is_empty() {
        return Err(MkextError::MissingDirectory);
    }

    let target = PathBuf::from(directory);

    println!("Creating extension scaffold: {}", directory);
    print_rule();

    let metadata = prompt::collect_metadata(&target, overrides, asker)?;

    log::debug!("collected metadata: {:?}", metadata);

    print_rule();

    let outcome = generate(&target, metadata);

    print_rule();

    match &outcome {
        Ok(done) => print_summary(done),
        Err(_) => println!(
            "{} {}",
            "✗".red(),
            "Extension scaffold creation failed".red()
        ),
    }

    outcome
}

fn print_rule() {
    println!("{}", "-".repeat(RULE_WIDTH));
}

fn print_summary(done: &Scaffolded) {
    let location = done
        .vfs
        .root
        .canonicalize()
        .unwrap_or_else(|_| done.vfs.root.clone());

    println!(
        "{} {}",
        "✓".green(),
        "Extension scaffold created!".green().bold()
    );
    println!("Location: {}", location.display());
    println!("\n📁 Directory structure:");
    print!("{}", render_tree(&done.vfs));
}
