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

/// Unidirectional path tracing without light sampling. Light is collected only when a path
/// happens to hit an emitter or escapes to the background.
pub struct PurePathTracer {
    background: Color,
    max_depth: u32,
    sampler: HemisphereSampler,
    russian_roulette: bool,
}

impl PurePathTracer {
    pub fn new(
        background: Color,
        max_depth: u32,
        sampler: HemisphereSampler,
        russian_roulette: bool,
    ) -> Self {
        Self {
            background,
            max_depth,
            sampler,
            russian_roulette,
        }
    }

    pub fn load(params: &mut InputParams, background: Color) -> anyhow::Result<Self> {
        let max_depth = params.get_count_or("max_depth", 4)?;
        let sampler = HemisphereSampler::from_name(&params.get_str_or("hemisphere", "uniform")?)?;
        let russian_roulette = params.get_bool_or("russian_roulette", false)?;
        Ok(Self::new(background, max_depth, sampler, russian_roulette))
    }
}

impl ShaderT for PurePathTracer {
    fn compute_color(&self, ray: &Ray, shapes: &[Shape], _: &[Light], rng: &mut Rng) -> Color {
        let mut final_color = Color::BLACK;
        let mut throughput = Color::WHITE;
        let mut ray = *ray;

        loop {
            let inter = match closest_intersection(&ray, shapes) {
                Some(inter) => inter,
                None => {
                    final_color += throughput * self.background;
                    break;
                }
            };
            final_color += throughput * inter.material.emissive_radiance();

            if inter.material.has_diffuse_or_glossy() {
                if ray.depth >= self.max_depth {
                    break;
                }
                let n = inter.normal;
                let wo = -ray.direction;
                let (wi, pdf) = self.sampler.sample(n, rng);
                let cos = wi.dot(n);
                if pdf <= 0.0 || cos <= 0.0 {
                    break;
                }
                throughput *= inter.material.reflectance(n, wo, wi) * (cos / pdf);
                ray = ray.bounce(inter.position, wi);
            } else if let Some(next) = util::specular_ray(&ray, &inter, self.max_depth) {
                ray = next;
            } else {
                break;
            }

            if !throughput.is_finite() || throughput.is_black() {
                break;
            }
            if self.russian_roulette {
                let rr_prop = throughput.luminance().clamp(0.001, 0.95);
                if rng.uniform_1d() > rr_prop {
                    break;
                }
                throughput /= rr_prop;
            }
        }

        final_color
    }
}
