use formats::document::ObjectKind;
use foundation::color::Rgb;
use foundation::ids::ObjectId;

use crate::notice::Notice;
use crate::object::Dimensions;

/// Commands from the editor toolbar. Parameters arrive unvalidated.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    CreateFloor { width: f64, depth: f64 },
    AddShelf { width: f64, height: f64, depth: f64, color: String },
    AddTile { width: f64, depth: f64, color: String },
    DeleteSelected,
    SetGridSnap(bool),
    Save { name: String },
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Done,
    Created(ObjectId),
    /// A file to hand to the user, with the confirmation to show.
    Artifact { artifact: Artifact, notice: Notice },
}

/// Validated form of an add command.
#[derive(Debug, Clone, PartialEq)]
pub struct NewObject {
    pub kind: ObjectKind,
    pub dimensions: Dimensions,
    pub color: Rgb,
}

pub fn positive_finite(values: &[f64]) -> Result<(), Notice> {
    if values.iter().all(|v| v.is_finite() && *v > 0.0) {
        Ok(())
    } else {
        Err(Notice::InvalidDimensions)
    }
}

pub fn parse_color(input: &str) -> Result<Rgb, Notice> {
    Rgb::from_hex(input).map_err(|_| Notice::InvalidColor(input.to_string()))
}

impl EditorCommand {
    /// Checks an add command and resolves its kind, size and colour.
    pub fn new_object(&self) -> Option<Result<NewObject, Notice>> {
        let (kind, dimensions, color) = match self {
            EditorCommand::AddShelf {
                width,
                height,
                depth,
                color,
            } => (ObjectKind::Shelf, Dimensions::new(*width, *height, *depth), color),
            EditorCommand::AddTile {
                width,
                depth,
                color,
            } => (
                ObjectKind::Tile,
                Dimensions::new(*width, 1.0, *depth).for_kind(ObjectKind::Tile),
                color,
            ),
            _ => return None,
        };
        if !dimensions.is_valid() {
            return Some(Err(Notice::InvalidDimensions));
        }
        Some(parse_color(color).map(|color| NewObject {
            kind,
            dimensions,
            color,
        }))
    }
}
