use std::{collections::HashMap, sync::Arc};

use crate::{
    camera::Camera, core::scene::Scene, light::Light, material::Material, shape::Shape,
};

/// Everything collected while loading, before it is frozen into a read-only `Scene`.
#[derive(Default)]
pub struct SceneResources {
    camera: Option<Camera>,
    materials: HashMap<String, Arc<Material>>,
    shapes: Vec<Shape>,
    lights: Vec<Light>,
}

impl SceneResources {
    pub fn to_scene(self) -> anyhow::Result<Scene> {
        let camera = match self.camera {
            Some(camera) => camera,
            None => anyhow::bail!("A camera is needed"),
        };

        log::info!(
            "{} materials, {} shapes, {} lights",
            self.materials.len(),
            self.shapes.len(),
            self.lights.len()
        );
        if self.lights.is_empty() {
            log::warn!("scene has no light, only emission reached by chance contributes");
        }

        Ok(Scene::new(camera, self.shapes, self.lights))
    }

    pub fn set_camera(&mut self, camera: Camera) -> anyhow::Result<()> {
        if self.camera.is_some() {
            anyhow::bail!("Camera has been set before");
        }
        self.camera = Some(camera);
        Ok(())
    }

    pub fn add_material(&mut self, name: String, material: Material) -> anyhow::Result<()> {
        if self.materials.contains_key(&name) {
            anyhow::bail!(format!("Duplicated material name '{}'", name));
        } else {
            self.materials.insert(name, Arc::new(material));
            Ok(())
        }
    }

    pub fn clone_material(&self, name: String) -> anyhow::Result<Arc<Material>> {
        if let Some(material) = self.materials.get(&name) {
            Ok(material.clone())
        } else {
            anyhow::bail!(format!("There is no material named '{}'", name))
        }
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }
}
