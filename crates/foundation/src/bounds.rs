use crate::math::Vec3;

/// Axis-aligned box in some local frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb3 {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb3 { min, max }
    }

    /// Box centred on the origin with the given half extents.
    pub fn centered(half: Vec3) -> Self {
        Aabb3 {
            min: -half,
            max: half,
        }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Slab test. Returns the entry distance along `dir` clamped to `t_min`,
    /// or `None` when the ray misses within `[t_min, t_max]`.
    pub fn ray_entry(&self, origin: Vec3, dir: Vec3, mut t_min: f64, mut t_max: f64) -> Option<f64> {
        let o = origin.to_array();
        let d = dir.to_array();
        let lo = self.min.to_array();
        let hi = self.max.to_array();

        for axis in 0..3 {
            if d[axis].abs() < 1e-12 {
                if o[axis] < lo[axis] || o[axis] > hi[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d[axis];
            let mut t1 = (lo[axis] - o[axis]) * inv;
            let mut t2 = (hi[axis] - o[axis]) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_max < t_min {
                return None;
            }
        }

        Some(t_min)
    }
}
