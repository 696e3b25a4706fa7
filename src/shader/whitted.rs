use crate::{
    core::{color::Color, loader::InputParams, ray::Ray, rng::Rng},
    light::{Light, LightT},
    material::MaterialT,
    shape::Shape,
};

use super::{util, ShaderT};

/// Direct light from one fixed point per light, constant ambient, recursive mirror and refraction.
pub struct WhittedIntegrator {
    background: Color,
    max_depth: u32,
}

impl WhittedIntegrator {
    const AMBIENT: f32 = 0.1;

    pub fn new(background: Color, max_depth: u32) -> Self {
        Self {
            background,
            max_depth,
        }
    }

    pub fn load(params: &mut InputParams, background: Color) -> anyhow::Result<Self> {
        let max_depth = params.get_count_or("max_depth", 3)?;
        Ok(Self::new(background, max_depth))
    }
}

impl ShaderT for WhittedIntegrator {
    fn compute_color(&self, ray: &Ray, shapes: &[Shape], lights: &[Light], _: &mut Rng) -> Color {
        util::shade_specular_chain(ray, shapes, self.background, self.max_depth, |ray, inter| {
            if !inter.material.has_diffuse_or_glossy() {
                return Color::BLACK;
            }
            let wo = -ray.direction;
            // every light acts as a point at its fixed position, area lights included
            let direct: Color = lights
                .iter()
                .map(|light| {
                    util::point_lighting(
                        inter,
                        wo,
                        ray.depth,
                        shapes,
                        light.position(),
                        light.intensity(),
                    )
                })
                .sum();
            util::ambient(inter.material, Self::AMBIENT) + direct
        })
    }
}
