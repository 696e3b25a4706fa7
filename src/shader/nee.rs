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

/// Next-event estimation: explicit light sampling at every diffuse/glossy vertex plus one
/// hemisphere bounce for indirect light.
///
/// The light found by a diffuse bounce is only what that hit reflects; its emission is not
/// added again, since direct light sampling already accounted for it. Mirror and refraction
/// bounces continue as a fresh camera-like ray, picking up emission and the background.
pub struct Nee {
    background: Color,
    max_depth: u32,
    light_samples: u32,
    sampler: HemisphereSampler,
    russian_roulette: bool,
}

impl Nee {
    pub fn new(
        background: Color,
        max_depth: u32,
        light_samples: u32,
        sampler: HemisphereSampler,
        russian_roulette: bool,
    ) -> Self {
        Self {
            background,
            max_depth,
            light_samples,
            sampler,
            russian_roulette,
        }
    }

    pub fn load(params: &mut InputParams, background: Color) -> anyhow::Result<Self> {
        let max_depth = params.get_count_or("max_depth", 4)?;
        let light_samples = params.get_count_or("light_samples", 1)?;
        let sampler = HemisphereSampler::from_name(&params.get_str_or("hemisphere", "uniform")?)?;
        let russian_roulette = params.get_bool_or("russian_roulette", false)?;
        Ok(Self::new(
            background,
            max_depth,
            light_samples,
            sampler,
            russian_roulette,
        ))
    }
}

impl ShaderT for Nee {
    fn compute_color(&self, ray: &Ray, shapes: &[Shape], lights: &[Light], rng: &mut Rng) -> Color {
        let mut final_color = Color::BLACK;
        let mut throughput = Color::WHITE;
        let mut ray = *ray;
        // false right after a diffuse bounce
        let mut full_radiance = true;

        loop {
            let inter = match closest_intersection(&ray, shapes) {
                Some(inter) => inter,
                None => {
                    if full_radiance {
                        final_color += throughput * self.background;
                    }
                    break;
                }
            };
            if full_radiance {
                final_color += throughput * inter.material.emissive_radiance();
            }

            if inter.material.has_diffuse_or_glossy() {
                let n = inter.normal;
                let wo = -ray.direction;
                let direct = util::direct_lighting(
                    &inter,
                    wo,
                    ray.depth,
                    shapes,
                    lights,
                    self.light_samples,
                    rng,
                );
                final_color += throughput * direct;

                if ray.depth >= self.max_depth {
                    break;
                }
                let (wi, pdf) = self.sampler.sample(n, rng);
                let cos = wi.dot(n);
                if pdf <= 0.0 || cos <= 0.0 {
                    break;
                }
                throughput *= inter.material.reflectance(n, wo, wi) * (cos / pdf);
                ray = ray.bounce(inter.position, wi);
                full_radiance = false;
            } else if let Some(next) = util::specular_ray(&ray, &inter, self.max_depth) {
                ray = next;
                full_radiance = true;
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
