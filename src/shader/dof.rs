use crate::{
    core::{color::Color, loader::InputParams, ray::Ray, rng::Rng},
    light::Light,
    sampler::sample_lens_offset,
    shape::Shape,
};

use super::{Shader, ShaderT};

/// Thin-lens depth of field around another estimator. Camera rays are replaced by
/// `lens_samples` rays from random points on a lens of radius `sensor_width`, all passing
/// through the point `focal_length` along the original ray. Lens rays carry depth 1 so the
/// wrapper is never applied twice.
pub struct DepthOfField {
    focal_length: f32,
    sensor_width: f32,
    lens_samples: u32,
    inner: Box<Shader>,
}

impl DepthOfField {
    pub fn new(focal_length: f32, sensor_width: f32, lens_samples: u32, inner: Shader) -> Self {
        Self {
            focal_length,
            sensor_width,
            lens_samples,
            inner: Box::new(inner),
        }
    }

    pub fn load(
        params: &mut InputParams,
        inner: Shader,
        default_lens_samples: u32,
    ) -> anyhow::Result<Self> {
        let focal_length = params.get_float_or("focal_length", 10.0)?;
        let sensor_width = params.get_float_or("sensor_width", 0.5)?;
        let lens_samples = params.get_count_or("lens_samples", default_lens_samples)?;
        if focal_length <= 0.0 {
            anyhow::bail!(format!("{} - 'focal_length' should be positive", params.name()));
        }
        if sensor_width < 0.0 {
            anyhow::bail!(format!("{} - 'sensor_width' should be non-negative", params.name()));
        }
        Ok(Self::new(focal_length, sensor_width, lens_samples, inner))
    }

    pub fn inner(&self) -> &Shader {
        &self.inner
    }
}

impl ShaderT for DepthOfField {
    fn compute_color(&self, ray: &Ray, shapes: &[Shape], lights: &[Light], rng: &mut Rng) -> Color {
        if ray.depth != 0 || self.lens_samples == 0 {
            return self.inner.compute_color(ray, shapes, lights, rng);
        }

        let focal_point = ray.point_at(self.focal_length);
        let mut color = Color::BLACK;
        for _ in 0..self.lens_samples {
            let origin = ray.origin + sample_lens_offset(ray.direction, self.sensor_width, rng);
            let lens_ray = Ray::new(origin, focal_point - origin, 1);
            color += self.inner.compute_color(&lens_ray, shapes, lights, rng);
        }
        color / self.lens_samples as f32
    }
}
