use serde::Serialize;
use std::path::Path;

pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_DESCRIPTION: &str = "A sample browser extension";

/// Metadata describing the extension being scaffolded.
///
/// Built once from the prompt answers (or command line overrides) and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
}
impl ExtensionMetadata {
    /// Applies the documented defaults to raw answers.
    ///
    /// Blank answers (after trimming) fall back to:
    /// - `name`: the base name of `target`
    /// - `version`: [`DEFAULT_VERSION`]
    /// - `description`: [`DEFAULT_DESCRIPTION`]
    pub fn from_answers(target: &Path, name: &str, version: &str, description: &str) -> Self {
        Self {
            name: non_blank(name).unwrap_or_else(|| default_name(target)),
            version: non_blank(version).unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            description: non_blank(description)
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        }
    }
}

/// Answers supplied up front on the command line. A `Some` value skips its prompt.
#[derive(Debug, Clone, Default)]
pub struct MetadataOverrides {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    /// Accept the default for every field without a value instead of prompting.
    pub accept_defaults: bool,
}

/// Base name of the target directory, falling back to the path as typed when it has none
/// (e.g. `..` or `/`).
pub fn default_name(target: &Path) -> String {
    target
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| target.display().to_string())
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_answers_fall_back_to_defaults() {
        let metadata = ExtensionMetadata::from_answers(Path::new("my-ext"), "", "  ", "");

        assert_eq!(metadata.name, "my-ext");
        assert_eq!(metadata.version, "1.0.0");
        assert_eq!(metadata.description, "A sample browser extension");
    }

    #[test]
    fn answers_are_trimmed_and_kept() {
        let metadata =
            ExtensionMetadata::from_answers(Path::new("x"), " MyExt ", "2.3.1\n", "Test desc");

        assert_eq!(
            metadata,
            ExtensionMetadata {
                name: "MyExt".into(),
                version: "2.3.1".into(),
                description: "Test desc".into(),
            }
        );
    }

    #[test]
    fn default_name_uses_last_path_component() {
        assert_eq!(default_name(Path::new("./build/foo-ext")), "foo-ext");
        assert_eq!(default_name(Path::new("foo-ext/")), "foo-ext");
        assert_eq!(default_name(Path::new("..")), "..");
    }
}
