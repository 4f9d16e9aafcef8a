use std::f64::consts::FRAC_PI_2;

use foundation::color::Rgb;
use foundation::math::Vec3;

use crate::components::{Material, Shape, Transform};
use crate::entity::NodeId;
use crate::world::{Node, NodeRole, Scene};

/// Height of every floor tile.
pub const TILE_HEIGHT: f64 = 0.2;
pub const FLOOR_COLOR: Rgb = Rgb::from_u32(0xdddddd);
pub const OUTLINE_COLOR: Rgb = Rgb::BLACK;

/// Shading used for object bodies.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BodyStyle {
    /// Lit material, used while editing.
    Lit,
    /// Unlit material, used by the read-only viewer.
    Plain,
}

impl BodyStyle {
    fn material(self, color: Rgb) -> Material {
        match self {
            BodyStyle::Lit => Material::standard(color),
            BodyStyle::Plain => Material::basic(color),
        }
    }
}

/// Spawns a box body at the origin. With `outline`, a black edge child is
/// attached and excluded from hit-testing.
pub fn create_box(
    scene: &mut Scene,
    width: f64,
    height: f64,
    depth: f64,
    color: Rgb,
    style: BodyStyle,
    outline: bool,
) -> NodeId {
    let mut body = Node::new(NodeRole::Body, Transform::identity());
    body.geometry = Some(scene.resources_mut().add_geometry(Shape::Box {
        width,
        height,
        depth,
    }));
    body.material = Some(scene.resources_mut().add_material(style.material(color)));
    body.cast_shadow = true;
    body.receive_shadow = true;
    let id = scene.spawn(body);

    if outline {
        attach_outline(scene, id, width, height, depth);
    }
    id
}

pub fn create_shelf(scene: &mut Scene, width: f64, height: f64, depth: f64, color: Rgb) -> NodeId {
    create_box(scene, width, height, depth, color, BodyStyle::Lit, true)
}

pub fn create_tile(scene: &mut Scene, width: f64, depth: f64, color: Rgb) -> NodeId {
    create_box(scene, width, TILE_HEIGHT, depth, color, BodyStyle::Lit, true)
}

/// Spawns the flat floor plane centred on the origin.
pub fn create_floor(scene: &mut Scene, width: f64, depth: f64) -> NodeId {
    let mut floor = Node::new(
        NodeRole::Floor,
        Transform::identity().with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
    );
    floor.geometry = Some(scene.resources_mut().add_geometry(Shape::Plane {
        width,
        height: depth,
    }));
    floor.material = Some(
        scene
            .resources_mut()
            .add_material(Material::standard(FLOOR_COLOR).double_sided()),
    );
    floor.receive_shadow = true;
    floor.raycast = false;
    scene.spawn(floor)
}

/// Replaces the body geometry and outline of `node` in place. Superseded
/// resources are released; labels and other children are left alone.
pub fn reshape_box(
    scene: &mut Scene,
    node: NodeId,
    width: f64,
    height: f64,
    depth: f64,
    color: Rgb,
) -> bool {
    if !scene.set_geometry(
        node,
        Shape::Box {
            width,
            height,
            depth,
        },
    ) {
        return false;
    }
    scene.set_material_color(node, color);

    let outlines: Vec<NodeId> = scene
        .children(node)
        .iter()
        .copied()
        .filter(|c| scene.node(*c).is_some_and(|n| n.role == NodeRole::Outline))
        .collect();
    let had_outline = !outlines.is_empty();
    for o in outlines {
        scene.despawn(o);
    }
    if had_outline {
        attach_outline(scene, node, width, height, depth);
    }
    true
}

fn attach_outline(scene: &mut Scene, parent: NodeId, width: f64, height: f64, depth: f64) {
    let mut edges = Node::new(NodeRole::Outline, Transform::identity());
    edges.geometry = Some(scene.resources_mut().add_geometry(Shape::Edges {
        width,
        height,
        depth,
    }));
    edges.material = Some(scene.resources_mut().add_material(Material::line(OUTLINE_COLOR)));
    edges.raycast = false;
    // Parent was checked by the caller; a failed insert only loses the outline.
    let _ = scene.add_child(parent, edges);
}
