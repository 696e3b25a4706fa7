use crate::{
    core::{
        color::Color, loader::InputParams, ray::Ray, rng::Rng,
        visibility::closest_intersection,
    },
    light::Light,
    shape::Shape,
};

use super::ShaderT;

/// Green ramp over hit distance, fading to black at `max_dist`.
pub struct DepthShader {
    background: Color,
    max_dist: f32,
}

impl DepthShader {
    pub fn new(background: Color, max_dist: f32) -> Self {
        Self {
            background,
            max_dist,
        }
    }

    pub fn load(params: &mut InputParams, background: Color) -> anyhow::Result<Self> {
        let max_dist = params.get_float_or("max_dist", 10.0)?;
        if max_dist <= 0.0 {
            anyhow::bail!(format!("{} - 'max_dist' should be positive", params.name()));
        }
        Ok(Self::new(background, max_dist))
    }
}

impl ShaderT for DepthShader {
    fn compute_color(&self, ray: &Ray, shapes: &[Shape], _: &[Light], _: &mut Rng) -> Color {
        match closest_intersection(ray, shapes) {
            Some(inter) => {
                let dist = (inter.position - ray.origin).length();
                Color::new(0.0, 1.0 - dist / self.max_dist, 0.0)
            }
            None => self.background,
        }
    }
}
