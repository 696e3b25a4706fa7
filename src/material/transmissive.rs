use crate::core::loader::InputParams;

use super::MaterialT;

/// Ideal refractor. `ior` is the ratio used when a ray enters through the front face; it is
/// inverted for rays leaving the medium.
pub struct Transmissive {
    ior: f32,
}

impl Transmissive {
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let ior = params.get_float("ior")?;
        if ior <= 0.0 {
            anyhow::bail!(format!("{} - 'ior' should be positive", params.name()));
        }
        Ok(Self::new(ior))
    }
}

impl MaterialT for Transmissive {
    fn index_of_refraction(&self) -> f32 {
        self.ior
    }

    fn has_transmission(&self) -> bool {
        true
    }
}
