use crate::core::{color::Color, loader::InputParams};

use super::MaterialT;

/// Diffuse + glossy lobe. `diffuse + specular <= 1` holds per channel.
pub struct Phong {
    diffuse: Color,
    specular: Color,
    shininess: f32,
}

impl Phong {
    pub fn new(diffuse: Color, specular: Color, shininess: f32) -> Self {
        let (dr, sr) = conserve_energy(diffuse.r, specular.r);
        let (dg, sg) = conserve_energy(diffuse.g, specular.g);
        let (db, sb) = conserve_energy(diffuse.b, specular.b);
        let rescaled = Self {
            diffuse: Color::new(dr, dg, db),
            specular: Color::new(sr, sg, sb),
            shininess,
        };
        if rescaled.diffuse != diffuse || rescaled.specular != specular {
            log::warn!(
                "phong: diffuse {:?} + specular {:?} exceeds 1, rescaled",
                diffuse,
                specular
            );
        }
        rescaled
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let diffuse = params.get_float3("diffuse")?;
        let specular = params.get_float3_or("specular", [0.0, 0.0, 0.0])?;
        let shininess = params.get_float_or("shininess", 1.0)?;

        Ok(Self::new(diffuse.into(), specular.into(), shininess))
    }

    pub fn specular_coefficient(&self) -> Color {
        self.specular
    }
}

fn conserve_energy(kd: f32, ks: f32) -> (f32, f32) {
    let sum = kd + ks;
    if sum > 1.0 {
        (kd / sum, ks / sum)
    } else {
        (kd, ks)
    }
}

impl MaterialT for Phong {
    fn reflectance(&self, n: glam::Vec3A, wo: glam::Vec3A, wi: glam::Vec3A) -> Color {
        let wr = 2.0 * n.dot(wi) * n - wi;
        let cos_alpha = wo.dot(wr).max(0.0);
        let glossy = (self.shininess + 2.0) * 0.5 * std::f32::consts::FRAC_1_PI
            * cos_alpha.powf(self.shininess);
        self.diffuse * std::f32::consts::FRAC_1_PI + self.specular * glossy
    }

    fn diffuse_reflectance(&self) -> Color {
        self.diffuse
    }

    fn has_diffuse_or_glossy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::Rng;

    #[test]
    fn construction_conserves_energy() {
        let mut rng = Rng::with_seed(11);
        for _ in 0..500 {
            let kd = Color::new(rng.uniform_1d(), rng.uniform_1d(), rng.uniform_1d()) * 2.0;
            let ks = Color::new(rng.uniform_1d(), rng.uniform_1d(), rng.uniform_1d()) * 2.0;
            let phong = Phong::new(kd, ks, 10.0);
            let d = phong.diffuse_reflectance();
            let s = phong.specular_coefficient();
            assert!(d.r + s.r <= 1.0 + 1e-6);
            assert!(d.g + s.g <= 1.0 + 1e-6);
            assert!(d.b + s.b <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn rescaling_keeps_channel_ratio() {
        let phong = Phong::new(Color::new(0.9, 0.2, 0.3), Color::new(0.6, 0.1, 0.0), 5.0);
        let d = phong.diffuse_reflectance();
        let s = phong.specular_coefficient();
        assert!((d.r - 0.6).abs() < 1e-6 && (s.r - 0.4).abs() < 1e-6);
        assert_eq!(d.g, 0.2);
        assert_eq!(s.b, 0.0);
    }

    #[test]
    fn lambertian_when_no_specular() {
        let phong = Phong::new(Color::gray(0.5), Color::BLACK, 100.0);
        let n = glam::Vec3A::Z;
        let wo = glam::Vec3A::new(0.3, 0.0, 1.0).normalize();
        let wi = glam::Vec3A::new(-0.7, 0.2, 0.4).normalize();
        let f = phong.reflectance(n, wo, wi);
        assert!(f.abs_diff_eq(Color::gray(0.5 / std::f32::consts::PI), 1e-6));
    }

    #[test]
    fn glossy_peak_along_mirror_direction() {
        let phong = Phong::new(Color::BLACK, Color::gray(1.0), 20.0);
        let n = glam::Vec3A::Z;
        let wi = glam::Vec3A::new(0.5, 0.0, 1.0).normalize();
        let mirror = glam::Vec3A::new(-0.5, 0.0, 1.0).normalize();
        let peak = phong.reflectance(n, mirror, wi);
        let expected = 22.0 / (2.0 * std::f32::consts::PI);
        assert!((peak.r - expected).abs() < 1e-3);

        let away = phong.reflectance(n, -mirror, wi);
        assert_eq!(away, Color::BLACK);
    }

    #[test]
    fn non_transmissive_ior_is_sentinel() {
        let phong = Phong::new(Color::gray(0.5), Color::BLACK, 1.0);
        assert_eq!(phong.index_of_refraction(), -1.0);
        assert!(!phong.has_transmission());
    }
}
