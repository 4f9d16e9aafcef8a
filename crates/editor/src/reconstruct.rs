use std::fmt;

use formats::document::Document;
use foundation::color::ColorParseError;
use foundation::ids::ObjectId;
use tracing::{debug, warn};

use crate::error::ModelError;
use crate::model::{ModelEvent, PlacementModel, SceneMode};
use crate::object::Dimensions;

#[derive(Debug, Clone, PartialEq)]
pub enum ReconstructError {
    BadColor {
        id: String,
        source: ColorParseError,
    },
    Model(ModelError),
}

impl fmt::Display for ReconstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconstructError::BadColor { id, source } => {
                write!(f, "Object {id} has a bad colour: {source}")
            }
            ReconstructError::Model(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ReconstructError {}

impl From<ModelError> for ReconstructError {
    fn from(err: ModelError) -> Self {
        ReconstructError::Model(err)
    }
}

/// Builds a complete model from `doc`.
///
/// Dimensions, position and rotation are applied as recorded, without
/// re-seating objects on the floor. The result carries a single
/// [`ModelEvent::Replaced`] event; on error nothing outside the staged model
/// has been touched.
pub fn reconstruct(doc: &Document, mode: SceneMode) -> Result<PlacementModel, ReconstructError> {
    let mut model = PlacementModel::new(mode);
    if let Some(floor) = doc.store_map {
        model.create_floor(floor.width, floor.depth);
    }

    for record in &doc.objects {
        let color = record.rgb().map_err(|source| {
            warn!(id = %record.id, color = %record.color, "bad colour in document");
            ReconstructError::BadColor {
                id: record.id.clone(),
                source,
            }
        })?;
        model.restore_object(
            ObjectId::new(record.id.as_str()),
            record.kind,
            Dimensions::new(record.width, record.height, record.depth),
            color,
            record.position.into(),
            record.rotation.into(),
            record.label_or_default(),
        )?;
    }

    model.drain_events();
    model.emit(ModelEvent::Replaced);
    debug!(objects = model.len(), ?mode, "reconstructed model");
    Ok(model)
}
