use std::path::PathBuf;

use anyhow::*;
use structopt::StructOpt;

use light_transport::{loader, renderer::Renderer};

#[derive(StructOpt)]
#[structopt(name = "light-transport", about = "Render a JSON scene with a radiance estimator")]
struct Opt {
    /// Path to the scene json
    #[structopt(parse(from_os_str))]
    scene: PathBuf,

    /// Overrides `output.filename` of the scene
    #[structopt(short = "o", long = "output")]
    output: Option<String>,

    /// Overrides `renderer.seed` of the scene
    #[structopt(long = "seed")]
    seed: Option<u64>,

    /// Number of worker threads, defaults to the number of logical cores
    #[structopt(short = "j", long = "threads")]
    threads: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();

    log::info!("Loading scene '{}'...", opt.scene.display());
    let mut desc = loader::load_from_file(&opt.scene)?;

    if let Some(filename) = opt.output {
        desc.output.filename = filename;
    }
    if let Some(seed) = opt.seed {
        desc.render_config.seed = seed;
    }
    if let Some(threads) = opt.threads {
        desc.render_config.threads = threads;
    }

    log::info!(
        "Rendering {}x{} with '{}', {} spp...",
        desc.output.width,
        desc.output.height,
        desc.shader.name(),
        desc.render_config.spp
    );

    let renderer = Renderer::new(desc.shader, desc.render_config);
    let begin_time = std::time::SystemTime::now();
    let film = renderer.render(&desc.scene, &desc.output)?;
    let duration = std::time::SystemTime::now().duration_since(begin_time)?;
    log::info!("Finished, time used: {:?}", duration);

    film.save(&desc.output.filename)?;
    log::info!("Image is written to '{}'", desc.output.filename);

    Ok(())
}
