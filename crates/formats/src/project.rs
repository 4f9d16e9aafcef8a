use std::fmt;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::document::{Document, DocumentError};

pub const PROJECT_EXTENSION: &str = "json";
pub const PROJECT_MEDIA_TYPE: &str = "application/json";

#[derive(Debug)]
pub enum ProjectError {
    EmptyName,
    /// Names that would leave the target directory.
    InvalidName(String),
    Io(std::io::Error),
    Document(DocumentError),
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectError::EmptyName => write!(f, "Project name is empty"),
            ProjectError::InvalidName(name) => write!(f, "Invalid project name: {name}"),
            ProjectError::Io(err) => write!(f, "I/O error: {err}"),
            ProjectError::Document(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ProjectError {}

impl From<DocumentError> for ProjectError {
    fn from(err: DocumentError) -> Self {
        ProjectError::Document(err)
    }
}

/// `<name>.json`, refusing names that are blank or contain a path separator.
pub fn project_file_name(name: &str) -> Result<String, ProjectError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProjectError::EmptyName);
    }
    if name.contains(['/', '\\']) {
        return Err(ProjectError::InvalidName(name.to_string()));
    }
    Ok(format!("{name}.{PROJECT_EXTENSION}"))
}

pub fn load_project(path: impl AsRef<Path>) -> Result<Document, ProjectError> {
    let path = path.as_ref();
    let payload = fs::read_to_string(path).map_err(ProjectError::Io)?;
    let doc = Document::from_json_str(&payload)?;
    info!(path = %path.display(), objects = doc.objects.len(), "loaded project");
    Ok(doc)
}
