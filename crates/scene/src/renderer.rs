use foundation::color::Rgb;
use foundation::math::Vec3;
use runtime::frame::Frame;

use crate::camera::PerspectiveCamera;
use crate::components::{Material, Shape, WorldTransform};
use crate::entity::NodeId;
use crate::resources::TextureId;
use crate::world::{NodeRole, Scene};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub color: Rgb,
    pub intensity: f64,
    pub position: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Lighting {
    pub ambient: Rgb,
    pub directional: DirectionalLight,
}

impl Lighting {
    pub fn editor() -> Self {
        Self {
            ambient: Rgb::from_u32(0x404040),
            directional: DirectionalLight {
                color: Rgb::WHITE,
                intensity: 0.8,
                position: Vec3::new(10.0, 20.0, 10.0),
            },
        }
    }

    pub fn viewer() -> Self {
        Self {
            ambient: Rgb::from_u32(0x505050),
            directional: DirectionalLight {
                color: Rgb::from_u32(0xf2f2f2),
                intensity: 0.8,
                position: Vec3::new(10.0, 30.0, 10.0),
            },
        }
    }
}

/// One visible renderable, resolved to world space.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub node: NodeId,
    pub role: NodeRole,
    pub world: WorldTransform,
    pub shape: Shape,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// Visible renderables in scene order, parents before children.
pub fn draw_items(scene: &Scene) -> Vec<DrawItem> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = scene.roots().iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let Some(node) = scene.node(id) else { continue };
        if !node.visible {
            continue;
        }
        stack.extend(node.children().iter().rev().copied());

        let (Some(shape), Some(material), Some(world)) = (
            scene.shape_of(id),
            scene.material_of(id),
            scene.world_transform(id),
        ) else {
            continue;
        };
        out.push(DrawItem {
            node: id,
            role: node.role,
            world,
            shape: *shape,
            material: *material,
            cast_shadow: node.cast_shadow,
            receive_shadow: node.receive_shadow,
        });
    }
    out
}

/// What a backend needs to draw one frame.
pub struct View<'a> {
    pub scene: &'a Scene,
    pub camera: &'a PerspectiveCamera,
    pub lighting: &'a Lighting,
    /// Label canvases redrawn since the previous frame.
    pub uploads: &'a [TextureId],
}

/// Drawing backend. Implementations read the scene and must not mutate it.
pub trait Renderer {
    fn resize(&mut self, width: u32, height: u32);

    fn draw(&mut self, frame: Frame, view: &View<'_>);
}
