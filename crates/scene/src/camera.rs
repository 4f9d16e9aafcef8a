use std::f64::consts::PI;

use foundation::math::{Vec2, Vec3};

use crate::picking::Ray;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(30.0, 30.0, 30.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_deg: 60.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn with_aspect(aspect: f64) -> Self {
        Self {
            aspect,
            ..Self::default()
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Forward, right and up unit vectors, or `None` for a degenerate pose.
    pub fn basis(&self) -> Option<(Vec3, Vec3, Vec3)> {
        let forward = (self.target - self.position).normalize()?;
        let right = forward.cross(self.up).normalize()?;
        let up = right.cross(forward);
        Some((forward, right, up))
    }

    /// World ray through a point in normalized device coordinates
    /// (x right, y up, both in `[-1, 1]`).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let (forward, right, up) = self.basis()?;
        let tan_half = (self.fov_deg.to_radians() / 2.0).tan();
        let dir = forward + right.scale(ndc.x * tan_half * self.aspect) + up.scale(ndc.y * tan_half);
        Some(Ray::new(self.position, dir.normalize()?))
    }
}

/// Primary-button behaviour of the orbit controls.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrbitScheme {
    RotateOnPrimary,
    PanOnPrimary,
}

/// Orbit/pan camera controls with exponential damping.
///
/// Input accumulates deltas; `update` applies a damped share of them once per
/// frame and keeps the camera within `[min_distance, max_distance]` of the
/// target.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub enabled: bool,
    pub scheme: OrbitScheme,
    pub target: Vec3,
    pub min_distance: f64,
    pub max_distance: f64,
    pub enable_damping: bool,
    pub damping_factor: f64,
    delta_theta: f64,
    delta_phi: f64,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            scheme: OrbitScheme::RotateOnPrimary,
            target: Vec3::ZERO,
            min_distance: 10.0,
            max_distance: 100.0,
            enable_damping: true,
            damping_factor: 0.25,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

const MIN_POLAR: f64 = 1e-6;
const EPS: f64 = 1e-9;

impl OrbitControls {
    pub fn new(min_distance: f64, max_distance: f64) -> Self {
        Self {
            min_distance,
            max_distance,
            ..Self::default()
        }
    }

    /// Applies a primary-button drag, given in NDC units.
    pub fn drag(&mut self, camera: &PerspectiveCamera, delta: Vec2) {
        if !self.enabled {
            return;
        }
        match self.scheme {
            OrbitScheme::RotateOnPrimary => self.rotate(camera, delta),
            OrbitScheme::PanOnPrimary => self.pan(camera, delta),
        }
    }

    pub fn rotate(&mut self, camera: &PerspectiveCamera, delta: Vec2) {
        // A full viewport height of travel is one turn.
        self.delta_theta -= PI * delta.x * camera.aspect;
        self.delta_phi += PI * delta.y;
    }

    pub fn pan(&mut self, camera: &PerspectiveCamera, delta: Vec2) {
        let Some((_, right, up)) = camera.basis() else {
            return;
        };
        let distance = (camera.position - self.target).length()
            * (camera.fov_deg.to_radians() / 2.0).tan();
        let shift = right.scale(delta.x * camera.aspect) + up.scale(delta.y);
        self.pan_offset = self.pan_offset - shift.scale(distance);
    }

    /// Recentres on `point` and places the camera `height` above it.
    pub fn focus(&mut self, camera: &mut PerspectiveCamera, point: Vec3, height: f64) {
        self.target = point;
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.pan_offset = Vec3::ZERO;
        camera.target = point;
        camera.position = Vec3::new(point.x, point.y + height, point.z);
    }

    /// Moves the camera by the pending deltas. Returns `true` if it moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let share = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        let offset = camera.position - self.target;
        let mut radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            MIN_POLAR
        };

        theta += self.delta_theta * share;
        phi = (phi + self.delta_phi * share).clamp(MIN_POLAR, PI - MIN_POLAR);
        radius = radius.clamp(self.min_distance, self.max_distance);
        self.target = self.target + self.pan_offset.scale(share);

        let sin_phi = phi.sin();
        let next = self.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );

        let moved = (next - camera.position).length() > EPS || (self.target - camera.target).length() > EPS;
        camera.position = next;
        camera.target = self.target;

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset = self.pan_offset.scale(keep);
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        moved
    }
}
