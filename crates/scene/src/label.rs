use std::f64::consts::FRAC_PI_2;

use foundation::math::Vec3;

use crate::components::{Material, Shape, Transform};
use crate::entity::NodeId;
use crate::resources::CanvasTexture;
use crate::world::{Node, NodeRole, Scene};

/// Depth of the caption plane along the object's depth axis.
pub const LABEL_PLANE_HEIGHT: f64 = 0.5;
/// Gap between the top face and the caption, avoiding z-fighting.
pub const LABEL_LIFT: f64 = 0.01;

fn label_transform(object_height: f64) -> Transform {
    Transform::translate(Vec3::new(0.0, object_height / 2.0 + LABEL_LIFT, 0.0))
        .with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0))
}

pub fn find_label(scene: &Scene, object: NodeId) -> Option<NodeId> {
    scene
        .children(object)
        .iter()
        .copied()
        .find(|c| scene.node(*c).is_some_and(|n| n.role == NodeRole::Label))
}

/// Draws `text` on the object's caption, creating the caption on first use.
///
/// An existing caption keeps its texture; it is redrawn and flagged for
/// upload.
pub fn attach_label(
    scene: &mut Scene,
    object: NodeId,
    object_width: f64,
    object_height: f64,
    text: &str,
) -> Option<NodeId> {
    if let Some(existing) = find_label(scene, object) {
        set_label_text(scene, existing, text);
        return Some(existing);
    }
    if !scene.contains(object) {
        return None;
    }

    let texture = scene.resources_mut().add_texture(CanvasTexture::label(text));
    let mut plane = Node::new(NodeRole::Label, label_transform(object_height));
    plane.geometry = Some(scene.resources_mut().add_geometry(Shape::Plane {
        width: object_width,
        height: LABEL_PLANE_HEIGHT,
    }));
    plane.material = Some(scene.resources_mut().add_material(Material::textured(texture)));
    plane.raycast = false;
    scene.add_child(object, plane)
}

/// Redraws the caption texture of `label`.
pub fn set_label_text(scene: &mut Scene, label: NodeId, text: &str) -> bool {
    let Some(map) = scene.material_of(label).and_then(|m| m.map) else {
        return false;
    };
    match scene.resources_mut().texture_mut(map) {
        Some(texture) => {
            texture.redraw(text);
            true
        }
        None => false,
    }
}

/// Resizes the caption plane to a new object width and re-seats it on the
/// new top face.
pub fn fit_label(scene: &mut Scene, object: NodeId, object_width: f64, object_height: f64) -> bool {
    let Some(label) = find_label(scene, object) else {
        return false;
    };
    scene.set_geometry(
        label,
        Shape::Plane {
            width: object_width,
            height: LABEL_PLANE_HEIGHT,
        },
    );
    scene.set_transform(label, label_transform(object_height))
}

pub fn label_text(scene: &Scene, object: NodeId) -> Option<&str> {
    let label = find_label(scene, object)?;
    let map = scene.material_of(label)?.map?;
    scene.resources().texture(map).map(|t| t.text.as_str())
}

#[cfg(test)]
mod tests {
    use super::{LABEL_PLANE_HEIGHT, attach_label, find_label, fit_label, label_text};
    use crate::components::Shape;
    use crate::geometry::create_shelf;
    use crate::resources::{LABEL_CANVAS_HEIGHT, LABEL_CANVAS_WIDTH, LABEL_FONT};
    use crate::world::Scene;
    use foundation::color::Rgb;
    use foundation::math::approx_eq;

    #[test]
    fn caption_lies_flat_above_top_face() {
        let mut scene = Scene::new();
        let shelf = create_shelf(&mut scene, 2.0, 3.0, 1.0, Rgb::WHITE);
        let label = attach_label(&mut scene, shelf, 2.0, 3.0, "Shelf").expect("label");

        let node = scene.node(label).expect("node");
        assert!(!node.raycast);
        assert!(approx_eq(node.transform.position.y, 1.51, 1e-12));
        assert!(node.transform.rotation.x < 0.0);
        assert_eq!(
            scene.shape_of(label),
            Some(&Shape::Plane {
                width: 2.0,
                height: LABEL_PLANE_HEIGHT
            })
        );

        let material = scene.material_of(label).expect("material");
        assert!(material.transparent);
        let texture = scene
            .resources()
            .texture(material.map.expect("map"))
            .expect("texture");
        assert_eq!((texture.width, texture.height), (LABEL_CANVAS_WIDTH, LABEL_CANVAS_HEIGHT));
        assert_eq!(texture.font, LABEL_FONT);
        assert_eq!(texture.fill, Rgb::BLACK);
    }

    #[test]
    fn reattaching_redraws_instead_of_stacking() {
        let mut scene = Scene::new();
        let shelf = create_shelf(&mut scene, 2.0, 3.0, 1.0, Rgb::WHITE);
        let first = attach_label(&mut scene, shelf, 2.0, 3.0, "Shelf").expect("label");
        let counts = scene.resource_counts();
        let second = attach_label(&mut scene, shelf, 2.0, 3.0, "Dairy").expect("label");

        assert_eq!(first, second);
        assert_eq!(scene.resource_counts(), counts);
        assert_eq!(label_text(&scene, shelf), Some("Dairy"));
    }

    #[test]
    fn fit_moves_caption_to_new_height() {
        let mut scene = Scene::new();
        let shelf = create_shelf(&mut scene, 2.0, 3.0, 1.0, Rgb::WHITE);
        attach_label(&mut scene, shelf, 2.0, 3.0, "Shelf");
        assert!(fit_label(&mut scene, shelf, 4.0, 5.0));

        let label = find_label(&scene, shelf).expect("label");
        let node = scene.node(label).expect("node");
        assert!(approx_eq(node.transform.position.y, 2.51, 1e-12));
        assert_eq!(
            scene.shape_of(label),
            Some(&Shape::Plane {
                width: 4.0,
                height: LABEL_PLANE_HEIGHT
            })
        );
    }
}
