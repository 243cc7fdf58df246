use glam::Vec3;
use log::debug;

use crate::light::{Attenuation, Light, LightId, LightKind};
use crate::transcoder::builders::Builder;
use crate::transcoder::context::WriterContext;
use crate::transcoder::fw;

#[derive(Debug, Clone)]
pub struct LightBuilder {
    name: String,
    color: Vec3,
    kind: fw::LightKind,
}

impl LightBuilder {
    pub fn new(kind: fw::LightKind) -> Self {
        Self {
            name: "Light".to_owned(),
            color: Vec3::ONE,
            kind,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn build_light(&self) -> Light {
        let kind = match self.kind {
            fw::LightKind::Ambient => LightKind::Ambient,
            fw::LightKind::Directional => LightKind::Directional,
            fw::LightKind::Point {
                constant_attenuation,
                linear_attenuation,
                quadratic_attenuation,
            } => LightKind::Point {
                attenuation: Attenuation {
                    constant: constant_attenuation,
                    linear: linear_attenuation,
                    quadratic: quadratic_attenuation,
                },
            },
            fw::LightKind::Spot {
                constant_attenuation,
                linear_attenuation,
                quadratic_attenuation,
                falloff_angle,
                falloff_exponent,
            } => LightKind::Spot {
                attenuation: Attenuation {
                    constant: constant_attenuation,
                    linear: linear_attenuation,
                    quadratic: quadratic_attenuation,
                },
                outer_angle: (falloff_angle * 0.5).to_radians(),
                falloff_exponent,
            },
        };

        Light {
            name: self.name.clone(),
            color: self.color,
            kind,
        }
    }
}

impl Builder for LightBuilder {
    type Output = LightId;

    fn build(&self, ctx: &mut WriterContext) -> anyhow::Result<LightId> {
        let light = self.build_light();
        debug!("Built light {} ({:?})", light.name, light.kind);
        Ok(ctx.scene.add_light(light))
    }
}
