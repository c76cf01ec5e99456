//! Small 3D vector and heading helpers.
//!
//! Conventions: Y is up and the horizontal plane is XZ. Headings are yaw angles in radians about
//! +Y; yaw `0` faces +Z and positive yaw turns toward +X (to the agent's right).

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Vec3) -> f32 {
        (other - self).length()
    }

    /// Projection onto the XZ plane.
    pub fn horizontal(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    pub fn horizontal_distance(self, other: Vec3) -> f32 {
        (other - self).horizontal().length()
    }

    pub fn normalize_or_zero(self) -> Vec3 {
        let len = self.length();
        if len <= f32::EPSILON {
            Vec3::ZERO
        } else {
            self / len
        }
    }

    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        self + (other - self) * t
    }

    pub fn with_y(self, y: f32) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// Unit vector on the XZ plane for a yaw angle.
pub fn forward(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Yaw that faces `direction` on the XZ plane, or `None` for a vertical/zero vector.
pub fn yaw_of(direction: Vec3) -> Option<f32> {
    let flat = direction.horizontal();
    if flat.length() <= 1e-5 {
        return None;
    }
    Some(flat.x.atan2(flat.z))
}

/// Wrap an angle in radians into `[-PI, PI)`.
pub fn wrap_angle(angle: f32) -> f32 {
    use core::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped >= PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Interpolate between two headings along the shorter arc.
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        return to;
    }
    from + wrap_angle(to - from) * t
}

/// Signed horizontal bearing in degrees from a heading to a direction.
///
/// Positive values are clockwise seen from above (to the right). The result lies in
/// `[-180, 180]`; `None` when `direction` has no horizontal component.
pub fn bearing_degrees(yaw: f32, direction: Vec3) -> Option<f32> {
    let target_yaw = yaw_of(direction)?;
    let degrees = wrap_angle(target_yaw - yaw).to_degrees();
    // Rounding noise from the radian round-trip would otherwise move exact sector boundaries.
    let snapped = (degrees * 1.0e4).round() / 1.0e4;
    Some(snapped.clamp(-180.0, 180.0))
}
