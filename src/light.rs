use glam::Vec3;
use id_arena::Id;

pub type LightId = Id<Light>;

/// Constant, linear and quadratic terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }
}

impl Attenuation {
    pub fn factor(&self, distance: f32) -> f32 {
        let denominator =
            self.constant + self.linear * distance + self.quadratic * distance * distance;
        if denominator > 0.0 {
            1.0 / denominator
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point {
        attenuation: Attenuation,
    },
    Spot {
        attenuation: Attenuation,
        /// Half-angle of the cone, in radians.
        outer_angle: f32,
        falloff_exponent: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Light {
    pub name: String,
    pub color: Vec3,
    pub kind: LightKind,
}
