use rand::SeedableRng;

/// Caller-owned random stream. Every stochastic decision in the estimators draws from the
/// `Rng` passed down the call chain, so independent pixels can be rendered on any thread.
pub struct Rng {
    rng: rand::rngs::SmallRng,
}

impl Rng {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: rand::rngs::SmallRng::seed_from_u64(seed),
        }
    }

    /// Independent stream for pixel `(x, y)` derived from a base seed. The result does not
    /// depend on which thread renders the pixel or in which order.
    pub fn for_pixel(seed: u64, x: u32, y: u32) -> Self {
        let key = ((y as u64) << 32) | x as u64;
        Self::with_seed(splitmix64(seed ^ splitmix64(key)))
    }

    pub fn uniform_1d(&mut self) -> f32 {
        rand::Rng::gen(&mut self.rng)
    }

    pub fn uniform_2d(&mut self) -> (f32, f32) {
        (self.uniform_1d(), self.uniform_1d())
    }

    /// Rejection sampling inside the unit disk.
    pub fn uniform_in_disk(&mut self) -> (f32, f32) {
        loop {
            let (rand_x, rand_y) = self.uniform_2d();
            let x = rand_x * 2.0 - 1.0;
            let y = rand_y * 2.0 - 1.0;
            if x * x + y * y <= 1.0 {
                return (x, y);
            }
        }
    }

    /// Local frame, +z up.
    pub fn uniform_on_hemisphere(&mut self) -> glam::Vec3A {
        let (rand_x, rand_y) = self.uniform_2d();
        let phi = rand_x * 2.0 * std::f32::consts::PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let cos_theta = rand_y;
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        glam::Vec3A::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
    }

    /// Local frame, +z up.
    pub fn cosine_weighted_on_hemisphere(&mut self) -> glam::Vec3A {
        let (rand_x, rand_y) = self.uniform_2d();
        let phi = rand_x * 2.0 * std::f32::consts::PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let sin_theta_sqr = rand_y;
        let sin_theta = sin_theta_sqr.sqrt();
        let cos_theta = (1.0 - sin_theta_sqr).sqrt();
        glam::Vec3A::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}
