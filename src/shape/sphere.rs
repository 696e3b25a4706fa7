use std::sync::Arc;

use crate::{
    core::{
        intersection::Intersection, loader::InputParams, ray::Ray,
        scene_resources::SceneResources,
    },
    material::Material,
};

use super::ShapeT;

pub struct Sphere {
    center: glam::Vec3A,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: glam::Vec3A, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32)> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;
        let delta = b * b - a * c;
        if delta >= 0.0 {
            let delta = delta.sqrt();
            let min = (-b - delta) / a;
            let max = (-b + delta) / a;
            Some((min, max))
        } else {
            None
        }
    }

    pub fn load(rsc: &SceneResources, params: &mut InputParams) -> anyhow::Result<Self> {
        let center = params.get_float3_or("center", [0.0, 0.0, 0.0])?;
        let radius = params.get_float("radius")?;
        if radius <= 0.0 {
            anyhow::bail!(format!("{} - 'radius' should be positive", params.name()));
        }
        let material = rsc.clone_material(params.get_str("material")?)?;

        Ok(Sphere::new(center.into(), radius, material))
    }
}

impl ShapeT for Sphere {
    fn intersect(&self, ray: &Ray, t_max: f32) -> Option<Intersection<'_>> {
        let (min, max) = self.intersect_ray(ray)?;
        let t = if min > ray.t_min { min } else { max };
        if ray.t_min < t && t < t_max {
            let position = ray.point_at(t);
            Some(Intersection {
                t,
                position,
                normal: (position - self.center) / self.radius,
                material: self.material.as_ref(),
            })
        } else {
            None
        }
    }

    fn material(&self) -> &Material {
        self.material.as_ref()
    }
}
