use std::fmt;

use foundation::color::{ColorParseError, Rgb};
use foundation::math::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Portable form of a floor plan: the optional floor and the ordered objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "storeMap", default, skip_serializing_if = "Option::is_none")]
    pub store_map: Option<StoreMap>,
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreMap {
    pub width: f64,
    pub depth: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Shelf,
    Tile,
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Shelf => "Shelf",
            ObjectKind::Tile => "Tile",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Vec3> for Xyz {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Xyz> for Vec3 {
    fn from(v: Xyz) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    /// Hex digits without the leading `#`.
    pub color: String,
    pub position: Xyz,
    #[serde(default)]
    pub rotation: Xyz,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ObjectRecord {
    /// Stored colour, re-prefixed with `#` before parsing.
    pub fn rgb(&self) -> Result<Rgb, ColorParseError> {
        Rgb::from_hex(&format!("#{}", self.color))
    }

    /// Caption text; records without one fall back to the kind name.
    pub fn label_or_default(&self) -> &str {
        self.label.as_deref().unwrap_or(self.kind.name())
    }

    /// Distance of the vertical position from half the height.
    pub fn floor_contact_error(&self) -> f64 {
        (self.position.y - self.height / 2.0).abs()
    }
}

#[derive(Debug)]
pub enum DocumentError {
    Parse(serde_json::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Parse(err) => write!(f, "Document parse error: {err}"),
            DocumentError::Serialize(err) => write!(f, "Document serialize error: {err}"),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Parse(err) | DocumentError::Serialize(err) => Some(err),
        }
    }
}

impl Document {
    pub fn from_json_str(payload: &str) -> Result<Self, DocumentError> {
        let doc: Document = serde_json::from_str(payload).map_err(DocumentError::Parse)?;
        debug!(
            objects = doc.objects.len(),
            floor = doc.store_map.is_some(),
            "parsed document"
        );
        Ok(doc)
    }

    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        serde_json::to_string(self).map_err(DocumentError::Serialize)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Serialize)
    }

    pub fn shelves(&self) -> impl Iterator<Item = &ObjectRecord> + '_ {
        self.objects.iter().filter(|o| o.kind == ObjectKind::Shelf)
    }

    /// Records whose vertical position is not half their height.
    pub fn floor_contact_violations(&self, tolerance: f64) -> Vec<&ObjectRecord> {
        self.objects
            .iter()
            .filter(|o| o.floor_contact_error() > tolerance)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, DocumentError, ObjectKind, ObjectRecord, StoreMap, Xyz};
    use foundation::color::Rgb;
    use pretty_assertions::assert_eq;

    fn shelf() -> ObjectRecord {
        ObjectRecord {
            kind: ObjectKind::Shelf,
            id: "obj_0".to_string(),
            width: 2.0,
            height: 5.0,
            depth: 1.0,
            color: "ff0000".to_string(),
            position: Xyz {
                x: 0.0,
                y: 1.5,
                z: 0.0,
            },
            rotation: Xyz {
                x: 0.0,
                y: std::f64::consts::FRAC_PI_2,
                z: 0.0,
            },
            label: Some("Shelf".to_string()),
        }
    }

    #[test]
    fn wire_names_match_project_files() {
        let doc = Document {
            store_map: Some(StoreMap {
                width: 20.0,
                depth: 20.0,
            }),
            objects: vec![shelf()],
        };
        let value: serde_json::Value =
            serde_json::from_str(&doc.to_json_string().expect("serialize")).expect("json");
        assert_eq!(value["storeMap"]["width"], 20.0);
        assert_eq!(value["objects"][0]["type"], "Shelf");
        assert_eq!(value["objects"][0]["color"], "ff0000");
        assert_eq!(value["objects"][0]["label"], "Shelf");
    }

    #[test]
    fn missing_floor_is_omitted() {
        let doc = Document::default();
        assert_eq!(doc.to_json_string().expect("serialize"), r#"{"objects":[]}"#);
        assert_eq!(Document::from_json_str(r#"{"objects":[]}"#).expect("parse"), doc);
    }

    #[test]
    fn rotation_and_label_default_when_absent() {
        let payload = r#"{"objects":[{"type":"Tile","id":"obj_3","width":1,"height":0.2,
            "depth":1,"color":"00ff00","position":{"x":1,"y":0.1,"z":2}}]}"#;
        let doc = Document::from_json_str(payload).expect("parse");
        let tile = &doc.objects[0];
        assert_eq!(tile.rotation, Xyz::default());
        assert_eq!(tile.label, None);
        assert_eq!(tile.label_or_default(), "Tile");
        assert_eq!(tile.rgb().expect("colour"), Rgb::new(0, 255, 0));
    }

    #[test]
    fn floats_survive_text_round_trip() {
        let mut record = shelf();
        record.position.x = 0.1 + 0.2;
        record.rotation.y = 3.0 * std::f64::consts::FRAC_PI_2;
        let doc = Document {
            store_map: None,
            objects: vec![record],
        };
        let text = doc.to_json_string().expect("serialize");
        assert_eq!(Document::from_json_str(&text).expect("parse"), doc);
    }

    #[test]
    fn rejects_unknown_kind() {
        let payload = r#"{"objects":[{"type":"Door","id":"x","width":1,"height":1,
            "depth":1,"color":"000000","position":{"x":0,"y":0,"z":0}}]}"#;
        assert!(matches!(
            Document::from_json_str(payload),
            Err(DocumentError::Parse(_))
        ));
    }

    #[test]
    fn reports_floating_objects() {
        let mut floating = shelf();
        floating.id = "obj_1".to_string();
        floating.position.y = 4.0;
        let doc = Document {
            store_map: None,
            objects: vec![shelf(), floating],
        };
        // Resizing does not re-seat an object, so the first record is off too.
        let ids: Vec<&str> = doc
            .floor_contact_violations(1e-9)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["obj_0", "obj_1"]);
    }
}
