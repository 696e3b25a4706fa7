mod area_direct;
mod depth;
mod dof;
mod hemispherical;
mod motion_blur;
mod nee;
mod path;
mod whitted;
pub mod util;


pub use area_direct::*;
pub use depth::*;
pub use dof::*;
pub use hemispherical::*;
pub use motion_blur::*;
pub use nee::*;
pub use path::*;
pub use whitted::*;

use crate::{
    core::{color::Color, loader::InputParams, ray::Ray, rng::Rng},
    light::Light,
    shape::Shape,
};

/// A radiance estimator. Scene data is only read; all randomness comes from `rng`.
#[enum_dispatch::enum_dispatch(Shader)]
pub trait ShaderT: Send + Sync {
    fn compute_color(&self, ray: &Ray, shapes: &[Shape], lights: &[Light], rng: &mut Rng) -> Color;
}

#[enum_dispatch::enum_dispatch]
pub enum Shader {
    DepthShader,
    WhittedIntegrator,
    HemisphericalDirect,
    AreaDirect,
    Nee,
    PurePathTracer,
    DepthOfField,
    MotionBlur,
}

impl Shader {
    pub fn name(&self) -> &'static str {
        match self {
            Shader::DepthShader(_) => "depth",
            Shader::WhittedIntegrator(_) => "whitted",
            Shader::HemisphericalDirect(_) => "hemispherical_direct",
            Shader::AreaDirect(_) => "area_direct",
            Shader::Nee(_) => "nee",
            Shader::PurePathTracer(_) => "pure_path_tracer",
            Shader::DepthOfField(dof) => match dof.inner() {
                Shader::Nee(_) => "nee_dof",
                _ => "area_direct_dof",
            },
            Shader::MotionBlur(mb) => match mb.inner() {
                Shader::Nee(_) => "nee_mb",
                _ => "area_direct_mb",
            },
        }
    }
}

pub fn create_shader_from_params(params: &mut InputParams) -> anyhow::Result<Shader> {
    params.set_name("shader".into());
    let ty = params.get_str("type")?;
    params.set_name(format!("shader-{}", ty).into());

    let background: Color = params.get_float3_or("background", [0.0, 0.0, 0.0])?.into();

    let res = match ty.as_str() {
        "depth" => DepthShader::load(params, background)?.into(),
        "whitted" => WhittedIntegrator::load(params, background)?.into(),
        "hemispherical_direct" => HemisphericalDirect::load(params, background)?.into(),
        "area_direct" => AreaDirect::load(params, background)?.into(),
        "area_direct_dof" => {
            let inner = AreaDirect::load(params, background)?;
            DepthOfField::load(params, inner.into(), 3)?.into()
        }
        "area_direct_mb" => {
            let num_samples = params.get_count_or("num_samples", 256)?;
            let inner = AreaDirect::direct_only(background, num_samples);
            MotionBlur::load(params, inner.into())?.into()
        }
        "nee" => Nee::load(params, background)?.into(),
        "nee_dof" => {
            let inner = Nee::load(params, background)?;
            DepthOfField::load(params, inner.into(), 30)?.into()
        }
        "nee_mb" => {
            let inner = Nee::load(params, background)?;
            MotionBlur::load(params, inner.into())?.into()
        }
        "pure_path_tracer" => PurePathTracer::load(params, background)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    params.check_unused_keys();

    Ok(res)
}
