mod emissive;
mod mirror;
mod phong;
mod transmissive;

pub use emissive::*;
pub use mirror::*;
pub use phong::*;
pub use transmissive::*;

use crate::core::{color::Color, loader::InputParams, scene_resources::SceneResources};

/// Capability view of a surface. Only the accessors matching a material's capabilities carry
/// meaning; the rest return black.
#[enum_dispatch::enum_dispatch(Material)]
pub trait MaterialT: Send + Sync {
    /// BRDF value for light arriving along `wi` and leaving along `wo`.
    fn reflectance(&self, _n: glam::Vec3A, _wo: glam::Vec3A, _wi: glam::Vec3A) -> Color {
        Color::BLACK
    }

    fn diffuse_reflectance(&self) -> Color {
        Color::BLACK
    }

    fn emissive_radiance(&self) -> Color {
        Color::BLACK
    }

    /// Returns -1 for anything but a transmissive material.
    fn index_of_refraction(&self) -> f32 {
        log::warn!("index of refraction requested from a non-transmissive material");
        -1.0
    }

    fn has_diffuse_or_glossy(&self) -> bool {
        false
    }

    fn has_specular(&self) -> bool {
        false
    }

    fn has_transmission(&self) -> bool {
        false
    }

    fn is_emissive(&self) -> bool {
        false
    }
}

#[enum_dispatch::enum_dispatch]
pub enum Material {
    Phong,
    Mirror,
    Transmissive,
    Emissive,
}

pub fn create_material_from_params(
    rsc: &mut SceneResources,
    params: &mut InputParams,
) -> anyhow::Result<()> {
    params.set_name("material".into());
    let ty = params.get_str("type")?;
    let name = params.get_str("name")?;
    params.set_name(format!("material-{}-{}", ty, name).into());

    let res = match ty.as_str() {
        "phong" => Phong::load(params)?.into(),
        "mirror" => Mirror::new().into(),
        "transmissive" => Transmissive::load(params)?.into(),
        "emissive" => Emissive::load(params)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    rsc.add_material(name, res)?;

    params.check_unused_keys();

    Ok(())
}
