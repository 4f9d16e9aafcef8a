use formats::document::{Document, ObjectKind};
use foundation::color::Rgb;
use foundation::ids::ObjectId;
use foundation::time::Time;
use runtime::frame::Frame;
use runtime::timer::FlashTimers;
use scene::camera::{OrbitControls, PerspectiveCamera};
use scene::renderer::{Lighting, Renderer, View};
use tracing::debug;

use crate::config::EditorConfig;
use crate::error::ModelError;
use crate::model::{PlacementModel, SceneMode};
use crate::reconstruct::{ReconstructError, reconstruct};

pub const FLASH_COLOR: Rgb = Rgb::from_u32(0xf47a7a);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfEntry {
    pub id: ObjectId,
    pub label: String,
}

/// Read-only rendition of an exported map: shelves listed in a sidebar,
/// clicking one recentres the camera on it and pulses its colour and row.
#[derive(Debug)]
pub struct SnapshotViewer {
    model: PlacementModel,
    camera: PerspectiveCamera,
    orbit: OrbitControls,
    lighting: Lighting,
    entries: Vec<ShelfEntry>,
    sidebar_visible: bool,
    object_flashes: FlashTimers<ObjectId>,
    entry_flashes: FlashTimers<ObjectId>,
    flash_secs: f64,
    focus_height: f64,
}

impl SnapshotViewer {
    pub fn from_document(doc: &Document, config: &EditorConfig) -> Result<Self, ReconstructError> {
        let model = reconstruct(doc, SceneMode::ReadOnly)?;
        let entries = model
            .objects()
            .iter()
            .filter(|o| o.kind == ObjectKind::Shelf)
            .map(|o| ShelfEntry {
                id: o.id.clone(),
                label: o.label.clone(),
            })
            .collect();
        Ok(Self {
            model,
            camera: PerspectiveCamera::default(),
            orbit: OrbitControls::new(config.min_camera_distance, config.max_camera_distance),
            lighting: Lighting::viewer(),
            entries,
            sidebar_visible: true,
            object_flashes: FlashTimers::new(),
            entry_flashes: FlashTimers::new(),
            flash_secs: config.flash_secs,
            focus_height: config.focus_height,
        })
    }

    pub fn entries(&self) -> &[ShelfEntry] {
        &self.entries
    }

    pub fn model(&self) -> &PlacementModel {
        &self.model
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_visible = !self.sidebar_visible;
        self.sidebar_visible
    }

    pub fn is_entry_highlighted(&self, id: &ObjectId) -> bool {
        self.entry_flashes.is_active(id)
    }

    pub fn displayed_color(&self, id: &ObjectId) -> Option<Rgb> {
        self.model.display_color(id)
    }

    /// Handles a click on a shelf entry. Clicking again while a pulse is
    /// running restarts it instead of stacking a second one.
    pub fn activate(&mut self, id: &ObjectId, now: Time) -> Result<(), ModelError> {
        let position = self
            .model
            .object(id)
            .map(|o| o.position)
            .ok_or_else(|| ModelError::UnknownObject(id.clone()))?;

        self.orbit.focus(&mut self.camera, position, self.focus_height);
        self.model.set_display_color(id, FLASH_COLOR)?;
        let restarted = self.object_flashes.start(id.clone(), now, self.flash_secs);
        self.entry_flashes.start(id.clone(), now, self.flash_secs);
        debug!(%id, restarted, "shelf activated");
        Ok(())
    }

    /// Ends due pulses and advances the camera.
    pub fn tick(&mut self, now: Time) {
        for id in self.object_flashes.expire(now) {
            if let Some(color) = self.model.object(&id).map(|o| o.color) {
                // The object was checked on activation and the model is frozen.
                let _ = self.model.set_display_color(&id, color);
            }
        }
        self.entry_flashes.expire(now);
        self.orbit.update(&mut self.camera);
    }

    pub fn render_frame(&mut self, frame: Frame, renderer: &mut impl Renderer) {
        let uploads = self.model.take_pending_uploads();
        renderer.draw(
            frame,
            &View {
                scene: self.model.scene(),
                camera: &self.camera,
                lighting: &self.lighting,
                uploads: &uploads,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{FLASH_COLOR, SnapshotViewer};
    use crate::config::EditorConfig;
    use crate::model::PlacementModel;
    use crate::object::Dimensions;
    use formats::document::ObjectKind;
    use foundation::color::Rgb;
    use foundation::ids::ObjectId;
    use foundation::math::Vec3;
    use foundation::time::Time;

    const BLUE: Rgb = Rgb::from_u32(0x2255aa);

    fn viewer() -> (SnapshotViewer, ObjectId) {
        let mut model = PlacementModel::default();
        model.create_floor(20.0, 20.0);
        let shelf = model.add_object(ObjectKind::Shelf, Dimensions::new(2.0, 3.0, 1.0), BLUE);
        model.move_to(&shelf, Vec3::new(4.0, 1.5, -3.0)).expect("move");
        model.add_object(ObjectKind::Tile, Dimensions::new(1.0, 0.2, 1.0), Rgb::WHITE);
        let v = SnapshotViewer::from_document(&model.to_document(), &EditorConfig::default())
            .expect("viewer");
        (v, shelf)
    }

    #[test]
    fn lists_shelves_only() {
        let (v, shelf) = viewer();
        assert_eq!(v.entries().len(), 1);
        assert_eq!(v.entries()[0].id, shelf);
        assert_eq!(v.entries()[0].label, "Shelf");
        assert_eq!(v.model().len(), 2);
    }

    #[test]
    fn activation_focuses_and_pulses() {
        let (mut v, shelf) = viewer();
        v.activate(&shelf, Time(0.0)).expect("activate");
        assert_eq!(v.camera().target, Vec3::new(4.0, 1.5, -3.0));
        assert_eq!(v.camera().position, Vec3::new(4.0, 51.5, -3.0));
        assert_eq!(v.displayed_color(&shelf), Some(FLASH_COLOR));
        assert!(v.is_entry_highlighted(&shelf));

        v.tick(Time(1.0));
        assert_eq!(v.displayed_color(&shelf), Some(BLUE));
        assert!(!v.is_entry_highlighted(&shelf));
    }

    #[test]
    fn reactivation_restarts_pulse() {
        let (mut v, shelf) = viewer();
        v.activate(&shelf, Time(0.0)).expect("activate");
        v.tick(Time(0.6));
        v.activate(&shelf, Time(0.6)).expect("activate again");
        v.tick(Time(1.2));
        assert_eq!(v.displayed_color(&shelf), Some(FLASH_COLOR));
        assert!(v.is_entry_highlighted(&shelf));
        v.tick(Time(2.0));
        // The original colour comes back, not the pulse colour.
        assert_eq!(v.displayed_color(&shelf), Some(BLUE));
    }

    #[test]
    fn sidebar_toggles() {
        let (mut v, _) = viewer();
        assert!(v.sidebar_visible());
        assert!(!v.toggle_sidebar());
        assert!(v.toggle_sidebar());
    }

    #[test]
    fn unknown_entry_is_an_error() {
        let (mut v, _) = viewer();
        assert!(v.activate(&ObjectId::new("nope"), Time(0.0)).is_err());
    }
}
