mod plane;
mod sphere;
mod square;

pub use plane::*;
pub use sphere::*;
pub use square::*;

use crate::{
    core::{
        intersection::Intersection, loader::InputParams, ray::Ray,
        scene_resources::SceneResources,
    },
    light::AreaLight,
    material::{Material, MaterialT},
};

#[enum_dispatch::enum_dispatch(Shape)]
pub trait ShapeT: Send + Sync {
    /// Closest hit with `ray.t_min < t < t_max`.
    fn intersect(&self, ray: &Ray, t_max: f32) -> Option<Intersection<'_>>;

    fn intersect_test(&self, ray: &Ray) -> bool {
        self.intersect(ray, ray.t_max).is_some()
    }

    fn material(&self) -> &Material;
}

#[enum_dispatch::enum_dispatch]
pub enum Shape {
    Sphere,
    InfinitePlane,
    Square,
}

pub fn create_shape_from_params(
    rsc: &mut SceneResources,
    params: &mut InputParams,
) -> anyhow::Result<()> {
    params.set_name("shape".into());
    let ty = params.get_str("type")?;
    params.set_name(format!("shape-{}", ty).into());

    let res: Shape = match ty.as_str() {
        "sphere" => Sphere::load(rsc, params)?.into(),
        "plane" => InfinitePlane::load(rsc, params)?.into(),
        "square" => Square::load(rsc, params)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    // emissive squares double as area lights
    if let Shape::Square(square) = &res {
        if square.material().is_emissive() {
            rsc.add_light(AreaLight::from_square(square).into());
        }
    }
    rsc.add_shape(res);

    params.check_unused_keys();

    Ok(())
}
