pub mod document;
pub mod export;
pub mod project;
pub mod viewer_html;

pub use document::*;
pub use export::*;
pub use project::*;
