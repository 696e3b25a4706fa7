use super::MaterialT;

/// Ideal specular reflector.
#[derive(Default)]
pub struct Mirror;

impl Mirror {
    pub fn new() -> Self {
        Self
    }
}

impl MaterialT for Mirror {
    fn has_specular(&self) -> bool {
        true
    }
}
