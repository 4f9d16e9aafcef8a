use foundation::bounds::Aabb3;
use foundation::math::Vec3;

/// Geometry payload of a renderable.
///
/// Boxes and edge sets are centred on the node origin. Planes lie in the local
/// XY plane, so a plane meant to be flat must be rotated by -90° about X.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    Box { width: f64, height: f64, depth: f64 },
    Edges { width: f64, height: f64, depth: f64 },
    Plane { width: f64, height: f64 },
}

impl Shape {
    pub fn local_bounds(&self) -> Aabb3 {
        match *self {
            Shape::Box {
                width,
                height,
                depth,
            }
            | Shape::Edges {
                width,
                height,
                depth,
            } => Aabb3::centered(Vec3::new(width / 2.0, height / 2.0, depth / 2.0)),
            Shape::Plane { width, height } => {
                Aabb3::centered(Vec3::new(width / 2.0, height / 2.0, 0.0))
            }
        }
    }
}
