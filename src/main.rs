use std::path::Path;
use std::time::Instant;

use clap::Parser;
use log::{error, info};

use diorama::config::Config;
use diorama::error::Result;
use diorama::output::save_image;
use diorama::scene::Scene;
use diorama::tracer::Tracer;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn run(args: &Args) -> Result<()> {
    let config_path = Path::new(&args.config);
    let mut config = Config::load(config_path)?;
    config.apply_overrides(args.width, args.height, args.max_depth, args.output.clone());
    config.validate()?;

    info!(
        "Image resolution: {}x{}, max depth: {}, output: {}",
        config.render.width, config.render.height, config.render.max_depth, config.render.output
    );

    let setup_start = Instant::now();
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let textures = config.texture_store(base_dir)?;
    let scene = Scene::diorama(config.light());
    let skybox = config.skybox();
    let tracer = Tracer::new(&scene, &skybox, &textures, config.settings())?;
    info!(
        "Scene ready: {} objects, {} textures in {:.2?}",
        scene.objects.len(),
        textures.len(),
        setup_start.elapsed()
    );

    let image = config.camera().render(&tracer, config.viewport())?;

    let save_start = Instant::now();
    save_image(&image, &config.output_path())?;
    info!("Output written in {:.2?}", save_start.elapsed());
    Ok(())
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!("Diorama - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
