use crate::{
    core::{color::Color, loader::InputParams, ray::Ray, rng::Rng},
    light::Light,
    material::MaterialT,
    shape::Shape,
};

use super::{util, ShaderT};

/// Monte Carlo area-light sampling at every hit of the mirror/refraction chain.
pub struct AreaDirect {
    background: Color,
    max_depth: u32,
    num_samples: u32,
    ambient: f32,
}

impl AreaDirect {
    pub fn new(background: Color, max_depth: u32, num_samples: u32, ambient: f32) -> Self {
        Self {
            background,
            max_depth,
            num_samples,
            ambient,
        }
    }

    /// No ambient term and no secondary rays: only emission and direct light at the first hit.
    pub fn direct_only(background: Color, num_samples: u32) -> Self {
        Self::new(background, 0, num_samples, 0.0)
    }

    pub fn load(params: &mut InputParams, background: Color) -> anyhow::Result<Self> {
        let max_depth = params.get_count_or("max_depth", 3)?;
        let num_samples = params.get_count_or("num_samples", 256)?;
        let ambient = params.get_float_or("ambient", 0.1)?;
        Ok(Self::new(background, max_depth, num_samples, ambient))
    }
}

impl ShaderT for AreaDirect {
    fn compute_color(&self, ray: &Ray, shapes: &[Shape], lights: &[Light], rng: &mut Rng) -> Color {
        util::shade_specular_chain(ray, shapes, self.background, self.max_depth, |ray, inter| {
            if !inter.material.has_diffuse_or_glossy() {
                return Color::BLACK;
            }
            let wo = -ray.direction;
            util::ambient(inter.material, self.ambient)
                + util::direct_lighting(inter, wo, ray.depth, shapes, lights, self.num_samples, rng)
        })
    }
}
