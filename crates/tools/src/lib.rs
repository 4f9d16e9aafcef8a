use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use editor::list_sync::{ListRow, ListView};
use editor::{Artifact, CommandOutput, EditorCommand, Editor, EditorConfig, Notice};
use formats::document::{Document, DocumentError};
use formats::export::extract_embedded_document;
use formats::project::{ProjectError, load_project};
use foundation::ids::ObjectId;
use tracing::{info, warn};

/// Tolerance used when checking that objects rest on the floor.
pub const FLOOR_CONTACT_TOLERANCE: f64 = 1e-6;

#[derive(Debug)]
pub enum ToolError {
    Io { path: PathBuf, source: std::io::Error },
    Project(ProjectError),
    Document(DocumentError),
    NoEmbeddedMap(PathBuf),
    Rejected(Notice),
    NoArtifact(EditorCommand),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            ToolError::Project(e) => write!(f, "{e}"),
            ToolError::Document(e) => write!(f, "{e}"),
            ToolError::NoEmbeddedMap(path) => {
                write!(f, "{}: no embedded map data", path.display())
            }
            ToolError::Rejected(notice) => write!(f, "{notice}"),
            ToolError::NoArtifact(command) => write!(f, "{command:?} produced no file"),
        }
    }
}

impl std::error::Error for ToolError {}

impl From<ProjectError> for ToolError {
    fn from(e: ProjectError) -> Self {
        ToolError::Project(e)
    }
}

impl From<DocumentError> for ToolError {
    fn from(e: DocumentError) -> Self {
        ToolError::Document(e)
    }
}

impl From<Notice> for ToolError {
    fn from(n: Notice) -> Self {
        ToolError::Rejected(n)
    }
}

/// Headless sessions have no list to show.
#[derive(Debug, Default)]
pub struct NoList;

impl ListView for NoList {
    fn render(&mut self, _rows: &[ListRow]) {}
    fn highlight(&mut self, _id: &ObjectId) {}
    fn clear_highlight(&mut self, _id: &ObjectId) {}
    fn scroll_into_view(&mut self, _id: &ObjectId) {}
}

fn write_artifact(dir: &Path, artifact: &Artifact) -> Result<PathBuf, ToolError> {
    fs::create_dir_all(dir).map_err(|source| ToolError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(&artifact.file_name);
    fs::write(&path, &artifact.contents).map_err(|source| ToolError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), media_type = artifact.media_type, "wrote artifact");
    Ok(path)
}

/// Runs a save or export command and writes the file it produces into `dir`.
fn write_command_output<V: ListView>(
    session: &mut Editor<V>,
    command: EditorCommand,
    dir: &Path,
) -> Result<PathBuf, ToolError> {
    match session.execute(command.clone())? {
        CommandOutput::Artifact { artifact, notice } => {
            let path = write_artifact(dir, &artifact)?;
            info!(%notice);
            Ok(path)
        }
        _ => Err(ToolError::NoArtifact(command)),
    }
}

/// Writes an empty project with a `width` x `depth` floor.
pub fn new_project(
    config: EditorConfig,
    dir: &Path,
    name: &str,
    width: f64,
    depth: f64,
) -> Result<PathBuf, ToolError> {
    let mut session = Editor::new(config, NoList);
    session.execute(EditorCommand::CreateFloor { width, depth })?;
    write_command_output(
        &mut session,
        EditorCommand::Save {
            name: name.to_string(),
        },
        dir,
    )
}

/// Reads a project file, or the map embedded in an exported page.
pub fn read_document(path: &Path) -> Result<Document, ToolError> {
    let is_html = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html"));
    if !is_html {
        return Ok(load_project(path)?);
    }
    let html = fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match extract_embedded_document(&html) {
        Some(doc) => Ok(doc?),
        None => Err(ToolError::NoEmbeddedMap(path.to_path_buf())),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub floor: Option<(f64, f64)>,
    pub objects: usize,
    pub shelves: usize,
    /// Ids of objects whose vertical position is not half their height.
    pub floating: Vec<String>,
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.floor {
            Some((w, d)) => writeln!(f, "floor: {w} x {d}")?,
            None => writeln!(f, "floor: none")?,
        }
        writeln!(f, "objects: {} ({} shelves)", self.objects, self.shelves)?;
        if self.floating.is_empty() {
            write!(f, "floor contact: ok")
        } else {
            write!(f, "floor contact: off for {}", self.floating.join(", "))
        }
    }
}

pub fn inspect(doc: &Document) -> Inspection {
    let floating: Vec<String> = doc
        .floor_contact_violations(FLOOR_CONTACT_TOLERANCE)
        .into_iter()
        .map(|o| o.id.clone())
        .collect();
    if !floating.is_empty() {
        warn!(count = floating.len(), "objects not resting on the floor");
    }
    Inspection {
        floor: doc.store_map.map(|m| (m.width, m.depth)),
        objects: doc.objects.len(),
        shelves: doc.shelves().count(),
        floating,
    }
}

/// Loads a project through an editing session and writes the standalone
/// viewer page next to `out_dir`.
pub fn export_project(config: EditorConfig, project: &Path, out_dir: &Path) -> Result<PathBuf, ToolError> {
    let payload = fs::read_to_string(project).map_err(|source| ToolError::Io {
        path: project.to_path_buf(),
        source,
    })?;
    let mut session = Editor::new(config, NoList);
    session.load(&payload)?;
    write_command_output(&mut session, EditorCommand::Export, out_dir)
}

#[cfg(test)]
mod tests {
    use super::{ToolError, export_project, inspect, new_project, read_document};
    use editor::{EditorConfig, Notice};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("floorplan-tools-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn new_then_export_then_inspect() {
        let dir = temp_dir("cycle");
        let project = new_project(EditorConfig::default(), &dir, "corner store", 12.0, 8.0)
            .expect("new project");
        assert_eq!(project.file_name().and_then(|n| n.to_str()), Some("corner store.json"));

        let html = export_project(EditorConfig::default(), &project, &dir).expect("export");
        assert_eq!(html.file_name().and_then(|n| n.to_str()), Some("exported_map.html"));

        let from_json = read_document(&project).expect("json");
        let from_html = read_document(&html).expect("html");
        assert_eq!(from_json, from_html);

        let report = inspect(&from_html);
        assert_eq!(report.floor, Some((12.0, 8.0)));
        assert_eq!(report.objects, 0);
        assert!(report.floating.is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn inspect_flags_floating_objects() {
        let doc = formats::document::Document::from_json_str(
            r##"{"objects":[
                {"type":"Shelf","id":"obj_0","width":1,"height":2,"depth":1,
                 "color":"ff0000","position":{"x":0,"y":1,"z":0}},
                {"type":"Tile","id":"obj_1","width":1,"height":0.2,"depth":1,
                 "color":"00ff00","position":{"x":0,"y":3,"z":0}}]}"##,
        )
        .expect("parse");
        let report = inspect(&doc);
        assert_eq!(report.shelves, 1);
        assert_eq!(report.floating, vec!["obj_1".to_string()]);
        assert!(report.to_string().contains("obj_1"));
    }

    #[test]
    fn bad_inputs_are_reported() {
        let dir = temp_dir("bad");
        let err = new_project(EditorConfig::default(), &dir, "x", 0.0, 5.0).expect_err("zero width");
        assert!(matches!(err, ToolError::Rejected(Notice::InvalidDimensions)));
        let err = new_project(EditorConfig::default(), &dir, "../escape", 5.0, 5.0)
            .expect_err("path in name");
        assert!(matches!(err, ToolError::Rejected(Notice::InvalidProjectName(_))));
        assert!(!dir.join("..").join("escape.json").exists());

        fs::create_dir_all(&dir).expect("mkdir");
        let page = dir.join("plain.html");
        fs::write(&page, "<html></html>").expect("write");
        assert!(matches!(read_document(&page), Err(ToolError::NoEmbeddedMap(_))));
        let _ = fs::remove_dir_all(&dir);
    }
}
