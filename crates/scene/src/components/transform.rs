use foundation::math::{Mat3, Vec3};

/// Position and Euler rotation (radians, XYZ order) relative to the parent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn basis(&self) -> Mat3 {
        Mat3::from_euler_xyz(self.rotation)
    }
}

/// Resolved placement of a node in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WorldTransform {
    pub position: Vec3,
    pub basis: Mat3,
}

impl WorldTransform {
    pub const IDENTITY: WorldTransform = WorldTransform {
        position: Vec3::ZERO,
        basis: Mat3::IDENTITY,
    };

    pub fn then(self, local: &Transform) -> WorldTransform {
        WorldTransform {
            position: self.position + self.basis.mul_vec(local.position),
            basis: self.basis.mul(local.basis()),
        }
    }

    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.basis.transpose().mul_vec(point - self.position)
    }

    pub fn dir_to_local(&self, dir: Vec3) -> Vec3 {
        self.basis.transpose().mul_vec(dir)
    }
}
