use serde::{Deserialize, Serialize};

/// Input-plane vector. `x` is left/right, `y` is forward/back on the stick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalized_or_zero(self) -> Self {
        let len_sq = self.x * self.x + self.y * self.y;
        if len_sq <= 0.0 {
            return Self::default();
        }
        let inv_len = len_sq.sqrt().recip();
        Self {
            x: self.x * inv_len,
            y: self.y * inv_len,
        }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// World-space vector. The simulation moves on the XZ ground plane; `y` is up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalized_or_zero(self) -> Self {
        let len_sq = self.x * self.x + self.y * self.y + self.z * self.z;
        if len_sq <= 0.0 {
            return Self::ZERO;
        }
        let inv_len = len_sq.sqrt().recip();
        Self {
            x: self.x * inv_len,
            y: self.y * inv_len,
            z: self.z * inv_len,
        }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    pub fn plus(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    pub fn minus(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Lifts a normalized input-plane vector onto the ground plane.
    pub fn from_input_plane(input: Vec2) -> Self {
        Self {
            x: input.x,
            y: 0.0,
            z: input.y,
        }
    }
}

/// Rotates `current` toward `target` on the XZ plane by at most
/// `max_step_radians`, returning a unit vector. A zero `target` leaves the
/// facing unchanged; a zero `current` snaps straight to `target`.
pub fn rotate_toward(current: Vec3, target: Vec3, max_step_radians: f32) -> Vec3 {
    let target = target.normalized_or_zero();
    if target.is_zero() {
        return current.normalized_or_zero();
    }
    let current = current.normalized_or_zero();
    if current.is_zero() {
        return target;
    }

    let current_angle = current.z.atan2(current.x);
    let target_angle = target.z.atan2(target.x);
    let mut delta = target_angle - current_angle;
    while delta > std::f32::consts::PI {
        delta -= std::f32::consts::TAU;
    }
    while delta < -std::f32::consts::PI {
        delta += std::f32::consts::TAU;
    }

    let step = delta.clamp(-max_step_radians, max_step_radians);
    let next_angle = current_angle + step;
    Vec3 {
        x: next_angle.cos(),
        y: 0.0,
        z: next_angle.sin(),
    }
}
