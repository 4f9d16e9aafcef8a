use foundation::ids::ObjectId;
use foundation::math::precision::snap_to_multiple;
use foundation::math::{Vec2, Vec3};
use scene::camera::{OrbitControls, OrbitScheme, PerspectiveCamera};
use scene::picking::{PickOptions, intersect_horizontal_plane, pick};
use scene::selection::Selection;
use tracing::debug;

use crate::config::EditorConfig;
use crate::model::PlacementModel;

const STILL_EPSILON: f64 = 1e-9;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    /// Pan modifier.
    Space,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerState {
    Idle,
    Dragging {
        id: ObjectId,
        /// Horizontal offset from the object origin to the grab point.
        offset: Vec3,
        /// Height of the drag plane.
        plane_y: f64,
        down_at: Vec2,
        moved: bool,
    },
    Orbiting {
        down_at: Vec2,
        last: Vec2,
        moved: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(ObjectId),
    Cleared,
}

/// Turns pointer and keyboard input into selection, dragging and camera
/// movement. Pointer positions are normalized device coordinates.
#[derive(Debug, Clone)]
pub struct InteractionController {
    pub camera: PerspectiveCamera,
    pub orbit: OrbitControls,
    pub grid_snap: bool,
    grid_unit: f64,
    state: PointerState,
    selection: Selection,
    pan_held: bool,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl InteractionController {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            camera: PerspectiveCamera::default(),
            orbit: OrbitControls::new(config.min_camera_distance, config.max_camera_distance),
            grid_snap: config.grid_snap,
            grid_unit: config.grid_unit,
            state: PointerState::Idle,
            selection: Selection::new(),
            pan_held: false,
        }
    }

    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn selection(&self) -> Option<&ObjectId> {
        self.selection.current()
    }

    pub fn grid_unit(&self) -> f64 {
        self.grid_unit
    }

    pub fn pan_held(&self) -> bool {
        self.pan_held
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.camera.set_viewport(width, height);
    }

    pub fn select(&mut self, id: ObjectId) -> bool {
        self.selection.select(id)
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selection.clear()
    }

    /// Drops every reference to a removed object.
    pub fn forget(&mut self, id: &ObjectId) {
        self.selection.forget(id);
        if matches!(&self.state, PointerState::Dragging { id: dragged, .. } if dragged == id) {
            self.end_drag();
        }
    }

    pub fn pointer_down(&mut self, model: &PlacementModel, ndc: Vec2) {
        if !matches!(self.state, PointerState::Idle) {
            return;
        }
        let hit = self
            .camera
            .ray_from_ndc(ndc)
            .and_then(|ray| pick(model.scene(), &model.pick_targets(), ray, PickOptions::default()));

        let grabbed = hit.and_then(|hit| {
            let id = model.owner_of(hit.target)?.clone();
            let position = model.object(&id)?.position;
            Some((id, hit.point, position))
        });

        self.state = match grabbed {
            Some((id, point, position)) => {
                self.orbit.enabled = false;
                debug!(%id, "drag start");
                PointerState::Dragging {
                    id,
                    offset: Vec3::new(point.x - position.x, 0.0, point.z - position.z),
                    plane_y: point.y,
                    down_at: ndc,
                    moved: false,
                }
            }
            None => PointerState::Orbiting {
                down_at: ndc,
                last: ndc,
                moved: false,
            },
        };
    }

    pub fn pointer_move(&mut self, model: &mut PlacementModel, ndc: Vec2) {
        match &mut self.state {
            PointerState::Idle => {}
            PointerState::Orbiting {
                down_at,
                last,
                moved,
            } => {
                let delta = ndc - *last;
                *last = ndc;
                if (ndc - *down_at).length_squared() > STILL_EPSILON {
                    *moved = true;
                }
                self.orbit.drag(&self.camera, delta);
            }
            PointerState::Dragging {
                id,
                offset,
                plane_y,
                down_at,
                moved,
            } => {
                if (ndc - *down_at).length_squared() > STILL_EPSILON {
                    *moved = true;
                }
                let Some(point) = self
                    .camera
                    .ray_from_ndc(ndc)
                    .and_then(|ray| intersect_horizontal_plane(ray, *plane_y))
                else {
                    return;
                };
                let Some(height) = model.object(id).map(|o| o.dimensions.height) else {
                    self.end_drag();
                    return;
                };

                let mut x = point.x - offset.x;
                let mut z = point.z - offset.z;
                if self.grid_snap {
                    x = snap_to_multiple(x, self.grid_unit);
                    z = snap_to_multiple(z, self.grid_unit);
                }
                let target = Vec3::new(x, height / 2.0, z);
                let id = id.clone();
                if model.move_to(&id, target).is_err() {
                    self.end_drag();
                }
            }
        }
    }

    /// Ends a drag or orbit. A press and release without movement counts as a
    /// click and updates the selection.
    pub fn pointer_up(&mut self, model: &PlacementModel, ndc: Vec2) -> Option<SelectionChange> {
        let still = match &self.state {
            PointerState::Idle => return None,
            PointerState::Dragging { moved, .. } | PointerState::Orbiting { moved, .. } => !moved,
        };
        self.end_drag();
        if still { self.click(model, ndc) } else { None }
    }

    /// Selects the nearest pickable object under the pointer, or clears the
    /// selection on a miss. Hits always report a selection so the list can
    /// re-highlight the row.
    pub fn click(&mut self, model: &PlacementModel, ndc: Vec2) -> Option<SelectionChange> {
        let hit = self
            .camera
            .ray_from_ndc(ndc)
            .and_then(|ray| pick(model.scene(), &model.pick_targets(), ray, PickOptions::default()));

        match hit.and_then(|h| model.owner_of(h.target).cloned()) {
            Some(id) => {
                self.selection.select(id.clone());
                Some(SelectionChange::Selected(id))
            }
            None => self.selection.clear().then_some(SelectionChange::Cleared),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if key == Key::Space {
            self.pan_held = true;
            self.orbit.scheme = OrbitScheme::PanOnPrimary;
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if key == Key::Space {
            self.pan_held = false;
            self.orbit.scheme = OrbitScheme::RotateOnPrimary;
        }
    }

    /// Per-frame camera update.
    pub fn update(&mut self) -> bool {
        self.orbit.update(&mut self.camera)
    }

    fn end_drag(&mut self) {
        self.state = PointerState::Idle;
        self.orbit.enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionController, Key, PointerState, SelectionChange};
    use crate::config::EditorConfig;
    use crate::model::PlacementModel;
    use crate::object::Dimensions;
    use formats::document::ObjectKind;
    use foundation::color::Rgb;
    use foundation::ids::ObjectId;
    use foundation::math::{Vec2, Vec3};
    use scene::camera::OrbitScheme;

    /// Camera straight above the origin looking down, so NDC maps linearly
    /// onto the floor.
    fn top_down() -> InteractionController {
        let mut c = InteractionController::new(&EditorConfig::default());
        c.camera.position = Vec3::new(0.0, 40.0, 0.0);
        c.camera.up = Vec3::new(0.0, 0.0, -1.0);
        c.camera.target = Vec3::ZERO;
        c
    }

    fn scene_with_shelf() -> (PlacementModel, ObjectId) {
        let mut model = PlacementModel::default();
        model.create_floor(20.0, 20.0);
        let id = model.add_object(ObjectKind::Shelf, Dimensions::new(2.0, 3.0, 1.0), Rgb::WHITE);
        (model, id)
    }

    fn ndc_for(c: &InteractionController, world: Vec3) -> Vec2 {
        // Inverse of the top-down projection used by these tests.
        let tan_half = (c.camera.fov_deg.to_radians() / 2.0).tan();
        let depth = c.camera.position.y - world.y;
        Vec2::new(
            world.x / (depth * tan_half * c.camera.aspect),
            -world.z / (depth * tan_half),
        )
    }

    #[test]
    fn click_selects_and_miss_clears() {
        let (model, id) = scene_with_shelf();
        let mut c = top_down();
        let on_shelf = ndc_for(&c, Vec3::new(0.2, 3.0, 0.1));
        assert_eq!(c.click(&model, on_shelf), Some(SelectionChange::Selected(id.clone())));
        assert_eq!(c.selection(), Some(&id));

        let off = ndc_for(&c, Vec3::new(8.0, 0.0, 8.0));
        assert_eq!(c.click(&model, off), Some(SelectionChange::Cleared));
        assert_eq!(c.selection(), None);
        assert_eq!(c.click(&model, off), None);
    }

    #[test]
    fn drag_snaps_to_grid_and_keeps_floor_contact() {
        let (mut model, id) = scene_with_shelf();
        let mut c = top_down();
        let grab = ndc_for(&c, Vec3::new(0.0, 3.0, 0.0));
        c.pointer_down(&model, grab);
        assert!(matches!(c.state(), PointerState::Dragging { .. }));
        assert!(!c.orbit.enabled);

        for (x, z) in [(1.3, 0.4), (2.6, -1.7), (4.49, 3.51)] {
            let ndc = ndc_for(&c, Vec3::new(x, 3.0, z));
            c.pointer_move(&mut model, ndc);
            let p = model.object(&id).expect("shelf").position;
            assert_eq!(p.y, 1.5);
            assert_eq!(p.x, p.x.round());
            assert_eq!(p.z, p.z.round());
        }
        let p = model.object(&id).expect("shelf").position;
        assert_eq!((p.x, p.z), (4.0, 4.0));

        assert_eq!(c.pointer_up(&model, ndc_for(&c, Vec3::new(4.0, 3.0, 4.0))), None);
        assert!(c.orbit.enabled);
        assert_eq!(c.state(), &PointerState::Idle);
    }

    #[test]
    fn free_drag_follows_pointer_minus_grab_offset() {
        let (mut model, id) = scene_with_shelf();
        let mut c = top_down();
        c.grid_snap = false;
        c.pointer_down(&model, ndc_for(&c, Vec3::new(0.5, 3.0, 0.25)));
        c.pointer_move(&mut model, ndc_for(&c, Vec3::new(3.0, 3.0, -2.0)));
        let p = model.object(&id).expect("shelf").position;
        assert!((p.x - 2.5).abs() < 1e-9);
        assert!((p.z + 2.25).abs() < 1e-9);
        assert_eq!(p.y, 1.5);
    }

    #[test]
    fn press_release_in_place_is_a_click() {
        let (model, id) = scene_with_shelf();
        let mut c = top_down();
        let at = ndc_for(&c, Vec3::new(0.0, 3.0, 0.0));
        c.pointer_down(&model, at);
        assert_eq!(c.pointer_up(&model, at), Some(SelectionChange::Selected(id)));
    }

    #[test]
    fn empty_space_orbits_and_space_switches_to_pan() {
        let (mut model, _) = scene_with_shelf();
        let mut c = top_down();
        let start = ndc_for(&c, Vec3::new(9.0, 0.0, 9.0));
        c.pointer_down(&model, start);
        assert!(matches!(c.state(), PointerState::Orbiting { .. }));
        c.pointer_move(&mut model, Vec2::new(start.x + 0.1, start.y));
        assert_eq!(c.pointer_up(&model, start), None);

        c.key_down(Key::Space);
        assert_eq!(c.orbit.scheme, OrbitScheme::PanOnPrimary);
        c.key_up(Key::Other);
        assert!(c.pan_held());
        c.key_up(Key::Space);
        assert_eq!(c.orbit.scheme, OrbitScheme::RotateOnPrimary);
    }

    #[test]
    fn forgetting_dragged_object_ends_drag() {
        let (mut model, id) = scene_with_shelf();
        let mut c = top_down();
        c.pointer_down(&model, ndc_for(&c, Vec3::ZERO));
        c.select(id.clone());
        model.remove_object(&id).expect("remove");
        c.forget(&id);
        assert_eq!(c.state(), &PointerState::Idle);
        assert_eq!(c.selection(), None);
        assert!(c.orbit.enabled);
    }
}
