use crate::{
    core::{
        color::Color, loader::InputParams, ray::Ray, rng::Rng,
        visibility::closest_intersection,
    },
    light::Light,
    material::MaterialT,
    sampler::HemisphereSampler,
    shape::Shape,
};

use super::{util, ShaderT};

/// Direct light found by shooting hemisphere directions and keeping those that land on an
/// emitter. The light list is not used.
pub struct HemisphericalDirect {
    background: Color,
    max_depth: u32,
    num_samples: u32,
    sampler: HemisphereSampler,
}

impl HemisphericalDirect {
    const AMBIENT: f32 = 0.1;

    pub fn new(
        background: Color,
        max_depth: u32,
        num_samples: u32,
        sampler: HemisphereSampler,
    ) -> Self {
        Self {
            background,
            max_depth,
            num_samples,
            sampler,
        }
    }

    pub fn load(params: &mut InputParams, background: Color) -> anyhow::Result<Self> {
        let max_depth = params.get_count_or("max_depth", 3)?;
        let num_samples = params.get_count_or("num_samples", 256)?;
        let sampler = HemisphereSampler::from_name(&params.get_str_or("hemisphere", "uniform")?)?;
        Ok(Self::new(background, max_depth, num_samples, sampler))
    }
}

impl ShaderT for HemisphericalDirect {
    fn compute_color(&self, ray: &Ray, shapes: &[Shape], _: &[Light], rng: &mut Rng) -> Color {
        util::shade_specular_chain(ray, shapes, self.background, self.max_depth, |ray, inter| {
            if !inter.material.has_diffuse_or_glossy() || self.num_samples == 0 {
                return Color::BLACK;
            }
            let n = inter.normal;
            let wo = -ray.direction;

            let mut direct = Color::BLACK;
            for _ in 0..self.num_samples {
                let (wi, pdf) = self.sampler.sample(n, rng);
                let cos = wi.dot(n);
                if pdf <= 0.0 || cos <= 0.0 {
                    continue;
                }
                let probe = ray.resampled(inter.position, wi);
                if let Some(hit) = closest_intersection(&probe, shapes) {
                    if hit.material.is_emissive() {
                        let fr = inter.material.reflectance(n, wo, wi);
                        direct += hit.material.emissive_radiance() * fr * (cos / pdf);
                    }
                }
            }

            direct / self.num_samples as f32 + util::ambient(inter.material, Self::AMBIENT)
        })
    }
}
