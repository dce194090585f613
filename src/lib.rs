pub mod api;
pub mod errors;
pub mod metadata;
pub mod preview;
pub mod prompt;
pub mod scaffold;
pub mod template;
pub mod vfs;

pub use api::{create_extension, generate, MkextError, Scaffolded};
pub use metadata::{ExtensionMetadata, MetadataOverrides};
