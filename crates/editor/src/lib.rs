pub mod commands;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod import;
pub mod list_sync;
pub mod model;
pub mod notice;
pub mod object;
pub mod reconstruct;
pub mod viewer;

pub use commands::{Artifact, CommandOutput, EditorCommand};
pub use config::EditorConfig;
pub use controller::{InteractionController, Key, SelectionChange};
pub use editor::Editor;
pub use error::ModelError;
pub use list_sync::{ListRequest, ListRow, ListView};
pub use model::{PlacementModel, SceneMode};
pub use notice::Notice;
pub use reconstruct::{ReconstructError, reconstruct};
pub use viewer::SnapshotViewer;
