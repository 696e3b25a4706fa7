use crate::core::{color::Color, loader::InputParams};

use super::MaterialT;

pub struct Emissive {
    radiance: Color,
}

impl Emissive {
    pub fn new(radiance: Color) -> Self {
        Self { radiance }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let radiance = params.get_float3("radiance")?;
        Ok(Self::new(radiance.into()))
    }
}

impl MaterialT for Emissive {
    fn emissive_radiance(&self) -> Color {
        self.radiance
    }

    fn is_emissive(&self) -> bool {
        true
    }
}
