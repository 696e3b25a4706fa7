mod util;

use crate::{
    camera::CameraT,
    core::{color::Color, film::Film, rng::Rng, scene::Scene},
    shader::Shader,
};

pub struct OutputConfig {
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    pub spp: u32,
    pub seed: u64,
    /// 0 picks the number of logical cores
    pub threads: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            spp: 1,
            seed: 0,
            threads: 0,
        }
    }
}

/// Drives a shader over every pixel. Each pixel owns an `Rng` derived from the seed and its
/// coordinates, so the image does not depend on the thread count.
pub struct Renderer {
    shader: Shader,
    config: RenderConfig,
}

impl Renderer {
    pub fn new(shader: Shader, config: RenderConfig) -> Self {
        Self { shader, config }
    }

    pub fn render(&self, scene: &Scene, output: &OutputConfig) -> anyhow::Result<Film> {
        let (width, height) = (output.width, output.height);
        if width == 0 || height == 0 {
            anyhow::bail!("Image size {}x{} is empty", width, height);
        }
        let mut film = Film::new(width, height);

        let num_threads = if self.config.threads == 0 {
            num_cpus::get() as u32
        } else {
            self.config.threads
        };
        let ranges = util::create_image_ranges(num_threads, height);
        let progress_bar = util::render_progress_bar(width, height);

        let results = crossbeam::scope(|scope| {
            let handles = ranges
                .iter()
                .map(|range| {
                    let util::ImageRange { from, to } = *range;
                    let progress_bar = progress_bar.clone();
                    log::debug!("rows {}..{} on a worker", from, to);
                    scope.spawn(move |_| {
                        let mut rows = Vec::with_capacity((to - from) as usize);
                        for j in from..to {
                            let row = (0..width)
                                .map(|i| {
                                    let color = self.render_pixel(scene, output, i, j);
                                    progress_bar.inc(1);
                                    color
                                })
                                .collect::<Vec<_>>();
                            rows.push((j, row));
                        }
                        rows
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        })
        .map_err(|_| anyhow::anyhow!("A render thread panicked"))?;

        for rows in results {
            let rows = rows.map_err(|_| anyhow::anyhow!("A render thread panicked"))?;
            for (j, row) in rows {
                film.set_row(j, &row);
            }
        }
        progress_bar.finish();

        Ok(film)
    }

    /// Average of `spp` estimates for pixel `(i, j)`, row 0 at the top. A single sample goes
    /// through the pixel center, more samples are jittered over the pixel.
    pub fn render_pixel(&self, scene: &Scene, output: &OutputConfig, i: u32, j: u32) -> Color {
        let aspect = output.width as f32 / output.height as f32;
        let width_inv = 1.0 / output.width as f32;
        let height_inv = 1.0 / output.height as f32;
        let spp = self.config.spp.max(1);
        let mut rng = Rng::for_pixel(self.config.seed, i, j);

        let mut color = Color::BLACK;
        for _ in 0..spp {
            let (offset_x, offset_y) = if spp == 1 {
                (0.5, 0.5)
            } else {
                rng.uniform_2d()
            };
            let x = ((i as f32 + offset_x) * width_inv - 0.5) * aspect;
            let y = ((output.height - j - 1) as f32 + offset_y) * height_inv - 0.5;
            let ray = scene.camera().generate_ray((x, y));
            color += scene.shade(&self.shader, &ray, &mut rng);
        }
        color / spp as f32
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        camera::PerspectiveCamera,
        light::AreaLight,
        material::{Emissive, Material, Phong},
        sampler::HemisphereSampler,
        shader::Nee,
        shape::{InfinitePlane, Square},
    };

    fn small_scene() -> Scene {
        let floor: Arc<Material> =
            Arc::new(Phong::new(Color::gray(0.6), Color::gray(0.2), 8.0).into());
        let lamp: Arc<Material> = Arc::new(Emissive::new(Color::gray(4.0)).into());
        let square = Square::new(
            glam::Vec3A::new(-0.5, -0.5, 2.0),
            glam::Vec3A::new(1.0, 0.0, 0.0),
            glam::Vec3A::new(0.0, 1.0, 0.0),
            Some(-glam::Vec3A::Z),
            lamp,
        );
        let light = AreaLight::from_square(&square);
        let camera = PerspectiveCamera::new(
            glam::Vec3A::new(0.0, -3.0, 1.0),
            glam::Vec3A::new(0.0, 1.0, -0.3),
            glam::Vec3A::Z,
            1.0,
        );
        Scene::new(
            camera.into(),
            vec![
                InfinitePlane::new(glam::Vec3A::ZERO, glam::Vec3A::Z, floor).into(),
                square.into(),
            ],
            vec![light.into()],
        )
    }

    fn nee() -> Shader {
        Nee::new(Color::BLACK, 3, 1, HemisphereSampler::Uniform, false).into()
    }

    #[test]
    fn image_does_not_depend_on_thread_count() {
        let scene = small_scene();
        let output = OutputConfig {
            filename: "unused.png".to_owned(),
            width: 8,
            height: 6,
        };
        let config = RenderConfig {
            spp: 2,
            seed: 42,
            threads: 1,
        };
        let single = Renderer::new(nee(), config).render(&scene, &output).unwrap();
        let multi = Renderer::new(nee(), RenderConfig { threads: 4, ..config })
            .render(&scene, &output)
            .unwrap();
        for j in 0..6 {
            for i in 0..8 {
                assert_eq!(single.pixel(i, j), multi.pixel(i, j));
            }
        }
    }

    #[test]
    fn seed_changes_noise() {
        let scene = small_scene();
        let output = OutputConfig {
            filename: "unused.png".to_owned(),
            width: 4,
            height: 4,
        };
        let a = Renderer::new(nee(), RenderConfig { spp: 1, seed: 1, threads: 1 });
        let b = Renderer::new(nee(), RenderConfig { spp: 1, seed: 2, threads: 1 });
        let differs = (0..4).any(|j| {
            (0..4).any(|i| a.render_pixel(&scene, &output, i, j) != b.render_pixel(&scene, &output, i, j))
        });
        assert!(differs);
    }

    #[test]
    fn empty_image_is_rejected() {
        let scene = small_scene();
        let output = OutputConfig {
            filename: "unused.png".to_owned(),
            width: 0,
            height: 4,
        };
        assert!(Renderer::new(nee(), RenderConfig::default())
            .render(&scene, &output)
            .is_err());
    }
}
