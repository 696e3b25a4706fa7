mod area;
mod point;

pub use area::*;
pub use point::*;

use crate::core::{color::Color, loader::InputParams, rng::Rng, scene_resources::SceneResources};

#[enum_dispatch::enum_dispatch(Light)]
pub trait LightT: Send + Sync {
    /// A point on the emitter. Deterministic for point lights.
    fn sample_position(&self, rng: &mut Rng) -> glam::Vec3A;

    /// Fixed stand-in point: the position of a point light, the center of an area light.
    fn position(&self) -> glam::Vec3A;

    /// Radiant intensity for point lights, emitted radiance for area lights.
    fn intensity(&self) -> Color;

    fn normal(&self) -> glam::Vec3A;

    /// 0 marks a point light; estimators must not turn it into a pdf.
    fn area(&self) -> f32;

    fn is_delta(&self) -> bool {
        self.area() <= 0.0
    }
}

#[enum_dispatch::enum_dispatch]
pub enum Light {
    PointLight,
    AreaLight,
}

pub fn create_light_from_params(
    rsc: &mut SceneResources,
    params: &mut InputParams,
) -> anyhow::Result<()> {
    params.set_name("light".into());
    let ty = params.get_str("type")?;
    params.set_name(format!("light-{}", ty).into());

    let res = match ty.as_str() {
        "point" => PointLight::load(params)?.into(),
        "area" => AreaLight::load(params)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    rsc.add_light(res);

    params.check_unused_keys();

    Ok(())
}
