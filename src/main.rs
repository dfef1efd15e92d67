use clap::Parser;
use std::path::PathBuf;

use image_enhancer::{Enhancer, Mode};

#[derive(Parser)]
#[command(name = "image-enhancer")]
#[command(about = "Denoise, balance, sharpen and upscale a photo")]
struct Cli {
    /// Image to enhance headlessly; without it the window opens
    #[arg(value_name = "IMAGE")]
    image_path: Option<PathBuf>,

    /// Editing style (natural or stylized)
    #[arg(short, long, default_value_t = Mode::Natural)]
    mode: Mode,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save every pipeline stage to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match args.image_path {
        Some(path) => run_headless(path, args.mode, args.debug_out),
        None => run_gui(),
    }
}

fn run_headless(path: PathBuf, mode: Mode, debug_out: Option<PathBuf>) -> anyhow::Result<()> {
    let mut enhancer = Enhancer::new();
    if let Some(debug_dir) = debug_out {
        enhancer = enhancer.with_debug(debug_dir)?;
    }

    let artifacts = enhancer.enhance(&path, mode)?;

    let (src_w, src_h) = artifacts.source_size;
    let (out_w, out_h) = artifacts.enhanced_size;
    println!("Enhanced {} ({}x{} -> {}x{})", path.display(), src_w, src_h, out_w, out_h);
    println!("  {}", artifacts.enhanced_path.display());
    println!("  {}", artifacts.comparison_path.display());

    Ok(())
}

#[cfg(feature = "gui")]
fn run_gui() -> anyhow::Result<()> {
    image_enhancer::gui::run()?;
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn run_gui() -> anyhow::Result<()> {
    anyhow::bail!("No IMAGE given and this build has no window (enable the `gui` feature)")
}
