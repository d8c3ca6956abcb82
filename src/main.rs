use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use whitted::config::{ RenderConfig, ShadowPolicy };
use whitted::camera::Camera;
use whitted::consts::OUT_FILE;
use whitted::scene::demo_world;

/// Renders the built-in demo scene with a recursive ray tracer.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Opt {
    /// Where to write the image. `.ppm` writes PPM, anything else PNG.
    #[clap(short, long, default_value = OUT_FILE)]
    output: PathBuf,

    /// JSON file with render settings; missing keys use the defaults.
    #[clap(short, long)]
    config: Option<PathBuf>,

    #[clap(long)]
    width: Option<usize>,

    #[clap(long)]
    height: Option<usize>,

    /// Maximum number of surfaces each camera ray may hit.
    #[clap(long)]
    depth_max: Option<usize>,

    /// Shadow each light separately instead of dropping the whole hit.
    #[clap(long)]
    per_light_shadows: bool,

    /// Only log warnings and errors.
    #[clap(short, long)]
    quiet: bool,
}

fn load_config(opt: &Opt) -> anyhow::Result<RenderConfig> {
    let mut config = match opt.config {
        Some(ref path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("couldn't load {}", path.display()))?,
        None => RenderConfig::default(),
    };

    if let Some(width) = opt.width {
        config.width = width;
    }
    if let Some(height) = opt.height {
        config.height = height;
    }
    if let Some(depth_max) = opt.depth_max {
        config.depth_max = depth_max;
    }
    if opt.per_light_shadows {
        config.shadow_policy = ShadowPolicy::PerLight;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();

    let default_level = if opt.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level)
    ).init();

    let config = load_config(&opt)?;
    let world = demo_world().context("couldn't build the demo scene")?;

    let camera = Camera::new(&config);
    let canvas = camera.render(&world, &config);

    canvas.save(&opt.output)
        .with_context(|| format!("couldn't write {}", opt.output.display()))?;

    Ok(())
}
