use std::sync::Arc;

use crate::{
    core::{
        intersection::Intersection, loader::InputParams, ray::Ray,
        scene_resources::SceneResources,
    },
    material::Material,
};

use super::{plane::plane_hit, ShapeT};

/// Parallelogram `corner + u * edge1 + v * edge2`, `u, v` in `[0, 1]`.
pub struct Square {
    corner: glam::Vec3A,
    edge1: glam::Vec3A,
    edge2: glam::Vec3A,
    normal: glam::Vec3A,
    edge_cross: glam::Vec3A,
    edge_cross_inv_len2: f32,
    material: Arc<Material>,
}

impl Square {
    /// Without an explicit `normal` the face points along `edge1 x edge2`.
    pub fn new(
        corner: glam::Vec3A,
        edge1: glam::Vec3A,
        edge2: glam::Vec3A,
        normal: Option<glam::Vec3A>,
        material: Arc<Material>,
    ) -> Self {
        let edge_cross = edge1.cross(edge2);
        let normal = normal.unwrap_or(edge_cross).normalize();
        Self {
            corner,
            edge1,
            edge2,
            normal,
            edge_cross,
            edge_cross_inv_len2: 1.0 / edge_cross.length_squared(),
            material,
        }
    }

    pub fn load(rsc: &SceneResources, params: &mut InputParams) -> anyhow::Result<Self> {
        let corner = params.get_float3("corner")?;
        let edge1: glam::Vec3A = params.get_float3("edge1")?.into();
        let edge2: glam::Vec3A = params.get_float3("edge2")?.into();
        if edge1.cross(edge2).length_squared() == 0.0 {
            anyhow::bail!(format!("{} - edges span no area", params.name()));
        }
        let normal = if params.contains_key("normal") {
            Some(params.get_float3("normal")?.into())
        } else {
            None
        };
        let material = rsc.clone_material(params.get_str("material")?)?;

        Ok(Self::new(corner.into(), edge1, edge2, normal, material))
    }

    pub fn corner(&self) -> glam::Vec3A {
        self.corner
    }

    pub fn edge1(&self) -> glam::Vec3A {
        self.edge1
    }

    pub fn edge2(&self) -> glam::Vec3A {
        self.edge2
    }

    pub fn normal(&self) -> glam::Vec3A {
        self.normal
    }
}

impl ShapeT for Square {
    fn intersect(&self, ray: &Ray, t_max: f32) -> Option<Intersection<'_>> {
        let t = plane_hit(ray, self.corner, self.edge_cross)?;
        if !(ray.t_min < t && t < t_max) {
            return None;
        }
        let position = ray.point_at(t);
        let offset = position - self.corner;
        let u = offset.cross(self.edge2).dot(self.edge_cross) * self.edge_cross_inv_len2;
        let v = self.edge1.cross(offset).dot(self.edge_cross) * self.edge_cross_inv_len2;
        if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) {
            Some(Intersection {
                t,
                position,
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
