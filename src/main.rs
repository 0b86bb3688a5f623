use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use ogpaint::{presets, BatchConfig, ImageRequest, PresetStyle, Renderer};

/// Generate Open Graph preview images.
#[derive(Parser, Debug)]
#[command(name = "ogpaint", version)]
struct Cli {
    /// Built-in image set to generate
    #[arg(long, value_enum, default_value_t = PresetStyle::Gradient)]
    style: PresetStyle,

    /// Render the [[image]] entries of a TOML batch file instead of the built-in set
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write every image into this directory, keeping file names
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Font for images that do not name one
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut requests: Vec<ImageRequest> = match &cli.config {
        Some(path) => match BatchConfig::load(path) {
            Ok(batch) => {
                info!(
                    "Loaded {} image(s) from {}",
                    batch.requests.len(),
                    batch.source().display()
                );
                batch.requests
            }
            Err(e) => {
                error!("{}", e);
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => presets::requests(cli.style),
    };
    presets::customize(&mut requests, cli.out_dir.as_deref(), cli.font.as_deref());

    println!("Creating OG images...");
    for request in &requests {
        let renderer = Renderer::for_request(request);
        match renderer.render(request) {
            Ok(path) => {
                info!("Wrote {}x{} image", request.canvas.width, request.canvas.height);
                println!("Created {}", path.display());
            }
            Err(e) => {
                error!("{}", e);
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    println!("All OG images created successfully!");

    ExitCode::SUCCESS
}
