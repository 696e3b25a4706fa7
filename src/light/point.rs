use crate::core::{color::Color, loader::InputParams, rng::Rng};

use super::LightT;

pub struct PointLight {
    position: glam::Vec3A,
    intensity: Color,
}

impl PointLight {
    pub fn new(position: glam::Vec3A, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let position = params.get_float3("position")?;
        let intensity = params.get_float3("intensity")?;

        Ok(Self::new(position.into(), intensity.into()))
    }
}

impl LightT for PointLight {
    fn sample_position(&self, _rng: &mut Rng) -> glam::Vec3A {
        self.position
    }

    fn position(&self) -> glam::Vec3A {
        self.position
    }

    fn intensity(&self) -> Color {
        self.intensity
    }

    fn normal(&self) -> glam::Vec3A {
        glam::Vec3A::ZERO
    }

    fn area(&self) -> f32 {
        0.0
    }
}
