pub mod catalog;
pub mod error;
pub mod generated;
pub mod request;
pub mod workspace;

pub use catalog::{AspectRatio, ImageStyle};
pub use error::HappuError;
pub use generated::{GeneratedImage, PREVIEW_EXPORT_FILENAME};
pub use request::GenerationRequest;
pub use workspace::Workspace;
