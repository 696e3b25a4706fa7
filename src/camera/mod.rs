mod perspective;

pub use perspective::*;

use crate::core::{loader::InputParams, ray::Ray, scene_resources::SceneResources};

#[enum_dispatch::enum_dispatch(Camera)]
pub trait CameraT: Send + Sync {
    /// `point` is on the image plane, `y` in `[-0.5, 0.5]` and `x` scaled by the aspect ratio.
    /// Returned rays have depth 0.
    fn generate_ray(&self, point: (f32, f32)) -> Ray;
}

#[enum_dispatch::enum_dispatch]
pub enum Camera {
    PerspectiveCamera,
}

pub fn create_camera_from_params(
    rsc: &mut SceneResources,
    params: &mut InputParams,
) -> anyhow::Result<()> {
    params.set_name("camera".into());
    let ty = params.get_str_or("type", "perspective")?;
    params.set_name(format!("camera-{}", ty).into());

    let res = match ty.as_str() {
        "perspective" => PerspectiveCamera::load(params)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    rsc.set_camera(res)?;

    params.check_unused_keys();

    Ok(())
}
