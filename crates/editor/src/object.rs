use formats::document::{ObjectKind, ObjectRecord};
use foundation::color::Rgb;
use foundation::ids::ObjectId;
use foundation::math::Vec3;
use scene::NodeId;
use scene::components::Transform;
use scene::geometry::TILE_HEIGHT;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Tiles always take the fixed tile height.
    pub fn for_kind(self, kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Shelf => self,
            ObjectKind::Tile => Self {
                height: TILE_HEIGHT,
                ..self
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        [self.width, self.height, self.depth]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// One shelf or tile on the floor plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub dimensions: Dimensions,
    pub color: Rgb,
    pub position: Vec3,
    pub rotation: Vec3,
    pub label: String,
    /// Body node in the model's scene.
    pub node: NodeId,
}

impl PlacedObject {
    pub fn transform(&self) -> Transform {
        Transform::translate(self.position).with_rotation(self.rotation)
    }

    pub fn to_record(&self) -> ObjectRecord {
        ObjectRecord {
            kind: self.kind,
            id: self.id.to_string(),
            width: self.dimensions.width,
            height: self.dimensions.height,
            depth: self.dimensions.depth,
            color: self.color.to_hex_string(),
            position: self.position.into(),
            rotation: self.rotation.into(),
            label: Some(self.label.clone()),
        }
    }
}
