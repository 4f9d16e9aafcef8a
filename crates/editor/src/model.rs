use std::collections::HashSet;

use formats::document::{Document, ObjectKind, StoreMap};
use foundation::color::Rgb;
use foundation::ids::ObjectId;
use foundation::math::Vec3;
use runtime::event_bus::EventBus;
use scene::geometry::{BodyStyle, create_box, create_floor, reshape_box};
use scene::label::{attach_label, fit_label};
use scene::resources::{ResourceCounts, TextureId};
use scene::{NodeId, Scene};
use tracing::debug;

use crate::error::ModelError;
use crate::object::{Dimensions, PlacedObject};

/// How the scene is built and whether it can be edited.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SceneMode {
    /// Lit bodies, outlines on everything, objects pickable.
    Editable,
    /// Unlit bodies, no outline on tiles, nothing pickable.
    ReadOnly,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloorPlan {
    pub width: f64,
    pub depth: f64,
    pub node: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    FloorCreated { width: f64, depth: f64 },
    ObjectAdded(ObjectId),
    ObjectRemoved(ObjectId),
    PropertiesUpdated(ObjectId),
    Reordered,
    Rotated(ObjectId),
    Renamed(ObjectId),
    Moved(ObjectId),
    /// The whole model was swapped for a loaded one.
    Replaced,
}

impl ModelEvent {
    /// Whether the object list shows something this event changed.
    pub fn affects_list(&self) -> bool {
        !matches!(self, ModelEvent::Moved(_) | ModelEvent::FloorCreated { .. })
    }
}

/// Placed objects, the optional floor and the scene they render into.
#[derive(Debug)]
pub struct PlacementModel {
    mode: SceneMode,
    scene: Scene,
    objects: Vec<PlacedObject>,
    floor: Option<FloorPlan>,
    next_sequence: u64,
    events: EventBus<ModelEvent>,
}

impl Default for PlacementModel {
    fn default() -> Self {
        Self::new(SceneMode::Editable)
    }
}

impl PlacementModel {
    pub fn new(mode: SceneMode) -> Self {
        Self {
            mode,
            scene: Scene::new(),
            objects: Vec::new(),
            floor: None,
            next_sequence: 0,
            events: EventBus::new(),
        }
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Label textures redrawn since the last call, now marked as uploaded.
    pub fn take_pending_uploads(&mut self) -> Vec<TextureId> {
        self.scene.resources_mut().take_pending_uploads()
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn floor(&self) -> Option<&FloorPlan> {
        self.floor.as_ref()
    }

    pub fn object(&self, id: &ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.object(id).is_some()
    }

    /// Counter value the next created object will use.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Raises the id counter to at least `floor`. It never goes down.
    pub fn reserve_sequence(&mut self, floor: u64) {
        self.next_sequence = self.next_sequence.max(floor);
    }

    /// Body nodes eligible for picking, in list order.
    pub fn pick_targets(&self) -> Vec<NodeId> {
        match self.mode {
            SceneMode::Editable => self.objects.iter().map(|o| o.node).collect(),
            SceneMode::ReadOnly => Vec::new(),
        }
    }

    pub fn resource_counts(&self) -> ResourceCounts {
        self.scene.resource_counts()
    }

    pub fn events(&self) -> &[ModelEvent] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<ModelEvent> {
        self.events.drain()
    }

    fn index_of(&self, id: &ObjectId) -> Result<usize, ModelError> {
        self.objects
            .iter()
            .position(|o| &o.id == id)
            .ok_or_else(|| ModelError::UnknownObject(id.clone()))
    }

    fn body_style(&self) -> BodyStyle {
        match self.mode {
            SceneMode::Editable => BodyStyle::Lit,
            SceneMode::ReadOnly => BodyStyle::Plain,
        }
    }

    fn wants_outline(&self, kind: ObjectKind) -> bool {
        self.mode == SceneMode::Editable || kind != ObjectKind::Tile
    }

    /// Replaces any existing floor.
    pub fn create_floor(&mut self, width: f64, depth: f64) -> NodeId {
        if let Some(old) = self.floor.take() {
            self.scene.despawn(old.node);
        }
        let node = create_floor(&mut self.scene, width, depth);
        self.floor = Some(FloorPlan { width, depth, node });
        self.events.emit(ModelEvent::FloorCreated { width, depth });
        debug!(width, depth, "floor created");
        node
    }

    /// Creates a new object at the origin, resting on the floor.
    pub fn add_object(&mut self, kind: ObjectKind, dimensions: Dimensions, color: Rgb) -> ObjectId {
        let id = ObjectId::sequential(self.next_sequence);
        self.next_sequence += 1;

        let dimensions = dimensions.for_kind(kind);
        let position = Vec3::new(0.0, dimensions.height / 2.0, 0.0);
        self.spawn_object(id.clone(), kind, dimensions, color, position, Vec3::ZERO, kind.name());
        self.events.emit(ModelEvent::ObjectAdded(id.clone()));
        debug!(%id, %kind, "object added");
        id
    }

    /// Rebuilds an object exactly as recorded. Position and rotation are taken
    /// verbatim.
    #[allow(clippy::too_many_arguments)]
    pub fn restore_object(
        &mut self,
        id: ObjectId,
        kind: ObjectKind,
        dimensions: Dimensions,
        color: Rgb,
        position: Vec3,
        rotation: Vec3,
        label: &str,
    ) -> Result<(), ModelError> {
        if self.contains(&id) {
            return Err(ModelError::DuplicateObject(id));
        }
        if let Some(seq) = id.sequence_number() {
            self.reserve_sequence(seq.saturating_add(1));
        }
        self.spawn_object(id.clone(), kind, dimensions, color, position, rotation, label);
        self.events.emit(ModelEvent::ObjectAdded(id));
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn spawn_object(
        &mut self,
        id: ObjectId,
        kind: ObjectKind,
        dimensions: Dimensions,
        color: Rgb,
        position: Vec3,
        rotation: Vec3,
        label: &str,
    ) {
        let style = self.body_style();
        let outline = self.wants_outline(kind);
        let node = create_box(
            &mut self.scene,
            dimensions.width,
            dimensions.height,
            dimensions.depth,
            color,
            style,
            outline,
        );
        attach_label(&mut self.scene, node, dimensions.width, dimensions.height, label);

        let object = PlacedObject {
            id: id.clone(),
            kind,
            dimensions,
            color,
            position,
            rotation,
            label: label.to_string(),
            node,
        };
        self.scene.set_transform(node, object.transform());
        if let Some(n) = self.scene.node_mut(node) {
            n.owner = Some(id);
            n.raycast = self.mode == SceneMode::Editable;
        }
        self.objects.push(object);
    }

    /// Removes the object from the scene and the ordered collection,
    /// releasing its resources.
    pub fn remove_object(&mut self, id: &ObjectId) -> Result<PlacedObject, ModelError> {
        let index = self.index_of(id)?;
        let object = self.objects.remove(index);
        self.scene.despawn(object.node);
        self.events.emit(ModelEvent::ObjectRemoved(object.id.clone()));
        debug!(%id, "object removed");
        Ok(object)
    }

    /// Resizes and recolours an object in place. The vertical position is left
    /// as it was.
    pub fn update_properties(
        &mut self,
        id: &ObjectId,
        dimensions: Dimensions,
        color: Rgb,
    ) -> Result<(), ModelError> {
        let index = self.index_of(id)?;
        let object = &mut self.objects[index];
        let dimensions = dimensions.for_kind(object.kind);
        if !dimensions.is_valid() {
            return Err(ModelError::InvalidDimensions);
        }
        object.dimensions = dimensions;
        object.color = color;
        let node = object.node;

        reshape_box(
            &mut self.scene,
            node,
            dimensions.width,
            dimensions.height,
            dimensions.depth,
            color,
        );
        fit_label(&mut self.scene, node, dimensions.width, dimensions.height);
        self.events.emit(ModelEvent::PropertiesUpdated(id.clone()));
        Ok(())
    }

    /// Applies `order` as the new list order. It must name every current
    /// object exactly once.
    pub fn reorder(&mut self, order: &[ObjectId]) -> Result<(), ModelError> {
        let not_permutation = || ModelError::NotAPermutation {
            expected: self.objects.len(),
            found: order.len(),
        };
        if order.len() != self.objects.len() {
            return Err(not_permutation());
        }
        let mut seen = HashSet::with_capacity(order.len());
        let mut indices = Vec::with_capacity(order.len());
        for id in order {
            if !seen.insert(id) {
                return Err(not_permutation());
            }
            indices.push(self.index_of(id).map_err(|_| not_permutation())?);
        }

        let mut slots: Vec<Option<PlacedObject>> = self.objects.drain(..).map(Some).collect();
        self.objects = indices.into_iter().filter_map(|i| slots[i].take()).collect();
        self.events.emit(ModelEvent::Reordered);
        Ok(())
    }

    /// Moves `dragged` to sit immediately before `target` in the list.
    pub fn move_before(&mut self, dragged: &ObjectId, target: &ObjectId) -> Result<(), ModelError> {
        let from = self.index_of(dragged)?;
        self.index_of(target)?;
        if dragged == target {
            return Ok(());
        }
        let object = self.objects.remove(from);
        let to = self.index_of(target)?;
        self.objects.insert(to, object);
        self.events.emit(ModelEvent::Reordered);
        Ok(())
    }

    /// Adds `delta` radians to the rotation about the vertical axis and
    /// returns the new angle. No wrapping.
    pub fn rotate(&mut self, id: &ObjectId, delta: f64) -> Result<f64, ModelError> {
        let index = self.index_of(id)?;
        let object = &mut self.objects[index];
        object.rotation.y += delta;
        let (node, transform, angle) = (object.node, object.transform(), object.rotation.y);
        self.scene.set_transform(node, transform);
        self.events.emit(ModelEvent::Rotated(id.clone()));
        Ok(angle)
    }

    pub fn rename(&mut self, id: &ObjectId, text: &str) -> Result<(), ModelError> {
        let index = self.index_of(id)?;
        let object = &mut self.objects[index];
        object.label = text.to_string();
        let (node, width, height) = (object.node, object.dimensions.width, object.dimensions.height);
        attach_label(&mut self.scene, node, width, height, text);
        self.events.emit(ModelEvent::Renamed(id.clone()));
        Ok(())
    }

    pub fn move_to(&mut self, id: &ObjectId, position: Vec3) -> Result<(), ModelError> {
        let index = self.index_of(id)?;
        let object = &mut self.objects[index];
        object.position = position;
        let (node, transform) = (object.node, object.transform());
        self.scene.set_transform(node, transform);
        self.events.emit(ModelEvent::Moved(id.clone()));
        Ok(())
    }

    /// Recolours the rendered body without touching the stored colour.
    pub fn set_display_color(&mut self, id: &ObjectId, color: Rgb) -> Result<(), ModelError> {
        let index = self.index_of(id)?;
        let node = self.objects[index].node;
        self.scene.set_material_color(node, color);
        Ok(())
    }

    pub fn display_color(&self, id: &ObjectId) -> Option<Rgb> {
        let object = self.object(id)?;
        self.scene.material_of(object.node).map(|m| m.color)
    }

    /// Object owning `node`, looking through outline and caption children.
    pub fn owner_of(&self, node: NodeId) -> Option<&ObjectId> {
        let root = self.scene.root_of(node)?;
        self.objects.iter().find(|o| o.node == root).map(|o| &o.id)
    }

    pub(crate) fn emit(&mut self, event: ModelEvent) {
        self.events.emit(event);
    }

    pub fn to_document(&self) -> Document {
        Document {
            store_map: self.floor.map(|f| StoreMap {
                width: f.width,
                depth: f.depth,
            }),
            objects: self.objects.iter().map(PlacedObject::to_record).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ModelEvent, PlacementModel, SceneMode};
    use crate::error::ModelError;
    use crate::object::Dimensions;
    use formats::document::ObjectKind;
    use foundation::color::Rgb;
    use foundation::ids::ObjectId;
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;
    use scene::label::label_text;
    use std::f64::consts::{FRAC_PI_2, TAU};

    const RED: Rgb = Rgb::from_u32(0xff0000);

    fn shelf(model: &mut PlacementModel) -> ObjectId {
        model.add_object(ObjectKind::Shelf, Dimensions::new(2.0, 3.0, 1.0), RED)
    }

    #[test]
    fn new_objects_rest_on_floor_with_kind_label() {
        let mut model = PlacementModel::default();
        let a = shelf(&mut model);
        let t = model.add_object(ObjectKind::Tile, Dimensions::new(1.0, 9.0, 1.0), Rgb::WHITE);

        assert_eq!(a, ObjectId::sequential(0));
        assert_eq!(t, ObjectId::sequential(1));
        let a = model.object(&a).expect("shelf");
        assert_eq!(a.position, Vec3::new(0.0, 1.5, 0.0));
        assert_eq!(a.label, "Shelf");
        assert_eq!(label_text(model.scene(), a.node), Some("Shelf"));

        let t = model.object(&t).expect("tile");
        assert_eq!(t.dimensions.height, 0.2);
        assert_eq!(t.position.y, 0.1);
        assert_eq!(model.pick_targets().len(), 2);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut model = PlacementModel::default();
        let a = shelf(&mut model);
        model.remove_object(&a).expect("remove");
        let b = shelf(&mut model);
        assert_ne!(a, b);
    }

    #[test]
    fn second_floor_replaces_first() {
        let mut model = PlacementModel::default();
        let first = model.create_floor(10.0, 10.0);
        let counts = model.resource_counts();
        model.create_floor(20.0, 30.0);
        assert!(!model.scene().contains(first));
        assert_eq!(model.resource_counts(), counts);
        let floor = model.floor().expect("floor");
        assert_eq!((floor.width, floor.depth), (20.0, 30.0));
    }

    #[test]
    fn resize_keeps_vertical_position() {
        let mut model = PlacementModel::default();
        let id = shelf(&mut model);
        model
            .update_properties(&id, Dimensions::new(2.0, 5.0, 1.0), RED)
            .expect("update");
        let o = model.object(&id).expect("shelf");
        assert_eq!(o.dimensions.height, 5.0);
        assert_eq!(o.position.y, 1.5);
    }

    #[test]
    fn tile_resize_keeps_fixed_height() {
        let mut model = PlacementModel::default();
        let id = model.add_object(ObjectKind::Tile, Dimensions::new(1.0, 0.2, 1.0), Rgb::WHITE);
        model
            .update_properties(&id, Dimensions::new(3.0, 4.0, 3.0), Rgb::BLACK)
            .expect("update");
        let o = model.object(&id).expect("tile");
        assert_eq!(o.dimensions, Dimensions::new(3.0, 0.2, 3.0));
        assert_eq!(o.color, Rgb::BLACK);
    }

    #[test]
    fn repeated_edits_do_not_leak_resources() {
        let mut model = PlacementModel::default();
        let id = shelf(&mut model);
        let baseline = model.resource_counts();
        for i in 0..50 {
            model
                .update_properties(&id, Dimensions::new(1.0 + i as f64, 3.0, 1.0), RED)
                .expect("update");
            model.rename(&id, &format!("Aisle {i}")).expect("rename");
        }
        assert_eq!(model.resource_counts(), baseline);

        for _ in 0..20 {
            let extra = shelf(&mut model);
            model.remove_object(&extra).expect("remove");
        }
        assert_eq!(model.resource_counts(), baseline);
        model.remove_object(&id).expect("remove");
        assert_eq!(model.resource_counts().geometries, 0);
        assert_eq!(model.resource_counts().textures, 0);
    }

    #[test]
    fn reorder_applies_full_permutation_only() {
        let mut model = PlacementModel::default();
        let a = shelf(&mut model);
        let b = shelf(&mut model);
        let c = shelf(&mut model);
        let before: Vec<_> = model.objects().to_vec();

        model.reorder(&[c.clone(), a.clone(), b.clone()]).expect("reorder");
        let ids: Vec<&ObjectId> = model.objects().iter().map(|o| &o.id).collect();
        assert_eq!(ids, vec![&c, &a, &b]);
        for o in model.objects() {
            let old = before.iter().find(|p| p.id == o.id).expect("same object");
            assert_eq!(o, old);
        }

        let err = model.reorder(&[a.clone(), a.clone(), b.clone()]).expect_err("duplicate");
        assert_eq!(err, ModelError::NotAPermutation { expected: 3, found: 3 });
        assert!(model.reorder(&[a.clone(), b.clone()]).is_err());
        assert!(model.reorder(&[a.clone(), b.clone(), ObjectId::new("ghost")]).is_err());
        let ids: Vec<&ObjectId> = model.objects().iter().map(|o| &o.id).collect();
        assert_eq!(ids, vec![&c, &a, &b]);
    }

    #[test]
    fn move_before_places_dragged_row() {
        let mut model = PlacementModel::default();
        let a = shelf(&mut model);
        let b = shelf(&mut model);
        let c = shelf(&mut model);
        model.move_before(&c, &a).expect("move");
        let ids: Vec<&ObjectId> = model.objects().iter().map(|o| &o.id).collect();
        assert_eq!(ids, vec![&c, &a, &b]);
        model.move_before(&c, &b).expect("move");
        let ids: Vec<&ObjectId> = model.objects().iter().map(|o| &o.id).collect();
        assert_eq!(ids, vec![&a, &c, &b]);
    }

    #[test]
    fn four_quarter_turns_come_back_around() {
        let mut model = PlacementModel::default();
        let id = shelf(&mut model);
        for _ in 0..4 {
            model.rotate(&id, FRAC_PI_2).expect("rotate");
        }
        let y = model.object(&id).expect("shelf").rotation.y;
        assert!((y - TAU).abs() < 1e-12);
        assert!(y.rem_euclid(TAU) < 1e-12 || (TAU - y.rem_euclid(TAU)) < 1e-12);
    }

    #[test]
    fn remove_unknown_is_an_error() {
        let mut model = PlacementModel::default();
        shelf(&mut model);
        let ghost = ObjectId::new("ghost");
        assert_eq!(
            model.remove_object(&ghost).expect_err("unknown"),
            ModelError::UnknownObject(ghost)
        );
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn read_only_objects_are_not_pickable() {
        let mut model = PlacementModel::new(SceneMode::ReadOnly);
        let tile = model.add_object(ObjectKind::Tile, Dimensions::new(1.0, 0.2, 1.0), Rgb::WHITE);
        assert!(model.pick_targets().is_empty());
        let node = model.object(&tile).expect("tile").node;
        assert!(!model.scene().node(node).expect("node").raycast);
        // Only the caption hangs off a read-only tile.
        assert_eq!(model.scene().children(node).len(), 1);
    }

    #[test]
    fn mutations_emit_events() {
        let mut model = PlacementModel::default();
        let id = shelf(&mut model);
        model.move_to(&id, Vec3::new(1.0, 1.5, 2.0)).expect("move");
        model.rename(&id, "Bread").expect("rename");
        let events = model.drain_events();
        assert_eq!(
            events,
            vec![
                ModelEvent::ObjectAdded(id.clone()),
                ModelEvent::Moved(id.clone()),
                ModelEvent::Renamed(id.clone()),
            ]
        );
        assert!(!events[1].affects_list());
        assert!(model.events().is_empty());
    }

    #[test]
    fn owner_lookup_sees_through_children() {
        let mut model = PlacementModel::default();
        let id = shelf(&mut model);
        let node = model.object(&id).expect("shelf").node;
        let child = model.scene().children(node)[0];
        assert_eq!(model.owner_of(child), Some(&id));
    }
}
