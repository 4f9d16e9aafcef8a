use std::fmt;

use foundation::ids::ObjectId;

/// User-facing outcome of a command. Problems abort the command without
/// changing any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NothingSelected,
    InvalidDimensions,
    InvalidColor(String),
    EmptyProjectName,
    InvalidProjectName(String),
    ImportInProgress,
    NoImportPending,
    LoadFailed(String),
    SaveFailed(String),
    UnknownObject(ObjectId),
    ProjectSaved { file_name: String },
    ProjectLoaded { objects: usize },
    MapExported { file_name: String },
}

impl Notice {
    pub fn is_problem(&self) -> bool {
        !matches!(
            self,
            Notice::ProjectSaved { .. } | Notice::ProjectLoaded { .. } | Notice::MapExported { .. }
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NothingSelected => write!(f, "Select an object first."),
            Notice::InvalidDimensions => write!(f, "Sizes must be positive numbers."),
            Notice::InvalidColor(input) => write!(f, "Not a colour: {input}"),
            Notice::EmptyProjectName => write!(f, "Enter a project name."),
            Notice::InvalidProjectName(name) => {
                write!(f, "Project names cannot contain path separators: {name}")
            }
            Notice::ImportInProgress => write!(f, "A project is already being loaded."),
            Notice::NoImportPending => write!(f, "No project load is in progress."),
            Notice::LoadFailed(reason) => write!(f, "Could not load project: {reason}"),
            Notice::SaveFailed(reason) => write!(f, "Could not save project: {reason}"),
            Notice::UnknownObject(id) => write!(f, "No object with id {id}."),
            Notice::ProjectSaved { file_name } => write!(f, "Saved {file_name}."),
            Notice::ProjectLoaded { objects } => write!(f, "Loaded {objects} objects."),
            Notice::MapExported { file_name } => write!(f, "Exported {file_name}."),
        }
    }
}
