use crate::{
    camera::Camera,
    core::{color::Color, ray::Ray, rng::Rng},
    light::Light,
    shader::{Shader, ShaderT},
    shape::Shape,
};

/// Read-only scene shared by every render thread.
pub struct Scene {
    camera: Camera,
    shapes: Vec<Shape>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new(camera: Camera, shapes: Vec<Shape>, lights: Vec<Light>) -> Self {
        Self {
            camera,
            shapes,
            lights,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn shade(&self, shader: &Shader, ray: &Ray, rng: &mut Rng) -> Color {
        shader.compute_color(ray, &self.shapes, &self.lights, rng)
    }
}
