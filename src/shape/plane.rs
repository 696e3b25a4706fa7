use std::sync::Arc;

use crate::{
    core::{
        intersection::Intersection, loader::InputParams, ray::Ray,
        scene_resources::SceneResources,
    },
    material::Material,
};

use super::ShapeT;

pub struct InfinitePlane {
    point: glam::Vec3A,
    normal: glam::Vec3A,
    material: Arc<Material>,
}

impl InfinitePlane {
    pub fn new(point: glam::Vec3A, normal: glam::Vec3A, material: Arc<Material>) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }

    pub fn load(rsc: &SceneResources, params: &mut InputParams) -> anyhow::Result<Self> {
        let point = params.get_float3("point")?;
        let normal: glam::Vec3A = params.get_float3("normal")?.into();
        if normal.length_squared() == 0.0 {
            anyhow::bail!(format!("{} - 'normal' is zero", params.name()));
        }
        let material = rsc.clone_material(params.get_str("material")?)?;

        Ok(Self::new(point.into(), normal, material))
    }
}

/// Ray parameter of the hit with the plane through `point` with `normal`.
pub(super) fn plane_hit(ray: &Ray, point: glam::Vec3A, normal: glam::Vec3A) -> Option<f32> {
    let denom = ray.direction.dot(normal);
    if denom.abs() < 1e-8 {
        return None;
    }
    let t = (point - ray.origin).dot(normal) / denom;
    if t.is_finite() {
        Some(t)
    } else {
        None
    }
}

impl ShapeT for InfinitePlane {
    fn intersect(&self, ray: &Ray, t_max: f32) -> Option<Intersection<'_>> {
        let t = plane_hit(ray, self.point, self.normal)?;
        if ray.t_min < t && t < t_max {
            Some(Intersection {
                t,
                position: ray.point_at(t),
                normal: self.normal,
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
