use crate::{
    core::{color::Color, loader::InputParams, ray::Ray, rng::Rng},
    light::Light,
    sampler::sample_shutter_time,
    shape::Shape,
};

use super::{Shader, ShaderT};

/// Camera moving at `camera_velocity` during a unit shutter interval. Camera rays are shifted
/// to `time_samples` uniform instants and the results averaged.
pub struct MotionBlur {
    camera_velocity: glam::Vec3A,
    time_samples: u32,
    inner: Box<Shader>,
}

impl MotionBlur {
    pub fn new(camera_velocity: glam::Vec3A, time_samples: u32, inner: Shader) -> Self {
        Self {
            camera_velocity,
            time_samples,
            inner: Box::new(inner),
        }
    }

    pub fn load(params: &mut InputParams, inner: Shader) -> anyhow::Result<Self> {
        let camera_velocity = params.get_float3_or("camera_velocity", [0.0, 0.0, 0.0])?;
        let time_samples = params.get_count_or("time_samples", 10)?;
        Ok(Self::new(camera_velocity.into(), time_samples, inner))
    }

    pub fn inner(&self) -> &Shader {
        &self.inner
    }
}

impl ShaderT for MotionBlur {
    fn compute_color(&self, ray: &Ray, shapes: &[Shape], lights: &[Light], rng: &mut Rng) -> Color {
        if ray.depth != 0 || self.time_samples == 0 {
            return self.inner.compute_color(ray, shapes, lights, rng);
        }

        let mut color = Color::BLACK;
        for _ in 0..self.time_samples {
            let time = sample_shutter_time(rng);
            let shifted = Ray {
                origin: ray.origin + self.camera_velocity * time,
                ..*ray
            };
            color += self.inner.compute_color(&shifted, shapes, lights, rng);
        }
        color / self.time_samples as f32
    }
}
