use crate::core::{coord::Coordinate, rng::Rng};

/// Direction sampling around a surface normal for indirect bounces.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HemisphereSampler {
    /// pdf = 1 / 2pi
    Uniform,
    /// pdf = cos / pi
    CosineWeighted,
}

impl Default for HemisphereSampler {
    fn default() -> Self {
        HemisphereSampler::Uniform
    }
}

impl HemisphereSampler {
    pub fn from_name(name: &str) -> anyhow::Result<Self> {
        match name {
            "uniform" => Ok(HemisphereSampler::Uniform),
            "cosine" => Ok(HemisphereSampler::CosineWeighted),
            _ => anyhow::bail!(format!("unknown hemisphere sampler '{}'", name)),
        }
    }

    /// World-space direction on the side of `normal` and its solid-angle pdf.
    pub fn sample(&self, normal: glam::Vec3A, rng: &mut Rng) -> (glam::Vec3A, f32) {
        let coord = Coordinate::from_z(normal);
        let local = match self {
            HemisphereSampler::Uniform => rng.uniform_on_hemisphere(),
            HemisphereSampler::CosineWeighted => rng.cosine_weighted_on_hemisphere(),
        };
        (coord.to_world(local), self.pdf(local.z))
    }

    pub fn pdf(&self, cos_theta: f32) -> f32 {
        match self {
            HemisphereSampler::Uniform => 0.5 * std::f32::consts::FRAC_1_PI,
            HemisphereSampler::CosineWeighted => cos_theta.max(0.0) * std::f32::consts::FRAC_1_PI,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_on_normal_side() {
        let normal = glam::Vec3A::new(0.3, -1.0, 0.2).normalize();
        let mut rng = Rng::with_seed(11);
        for sampler in [HemisphereSampler::Uniform, HemisphereSampler::CosineWeighted] {
            for _ in 0..1000 {
                let (dir, pdf) = sampler.sample(normal, &mut rng);
                assert!(dir.dot(normal) >= -1e-5);
                assert!((dir.length() - 1.0).abs() < 1e-4);
                assert!(pdf >= 0.0);
            }
        }
    }

    #[test]
    fn uniform_estimator_integrates_cosine_to_pi() {
        let mut rng = Rng::with_seed(3);
        let n = 20_000;
        let sum: f32 = (0..n)
            .map(|_| {
                let (dir, pdf) = HemisphereSampler::Uniform.sample(glam::Vec3A::Z, &mut rng);
                dir.z / pdf
            })
            .sum();
        let estimate = sum / n as f32;
        assert!((estimate - std::f32::consts::PI).abs() < 0.05, "{}", estimate);
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            HemisphereSampler::from_name("cosine").unwrap(),
            HemisphereSampler::CosineWeighted
        );
        assert!(HemisphereSampler::from_name("stratified").is_err());
    }
}
