//! kaplan CLI - parametric turbine viewer
//!
//! Builds a turbine scene from an optional TOML file and shows it in the
//! terminal, renders it to an image, exports it as STL or prints a summary.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use kaplan::config::RenderConfig;
use kaplan::export::stl::export_stl;
use kaplan::{Rasterizer, Scene, SceneConfig, TessellationParams};

mod view;

#[derive(Parser)]
#[command(name = "kaplan")]
#[command(about = "Parametric Kaplan turbine model viewer", long_about = None)]
struct Cli {
    /// Scene file (TOML); the reference turbine when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the turbine in the terminal until `q` or Esc is pressed
    View,
    /// Render the turbine to an image file
    Render {
        /// Output image (format determined by extension, e.g. .png)
        #[arg(short, long)]
        output: PathBuf,
        /// Image width in pixels
        #[arg(long, conflicts_with = "dpi")]
        width: Option<u32>,
        /// Image height in pixels
        #[arg(long, conflicts_with = "dpi")]
        height: Option<u32>,
        /// Resolution of a 6.4 x 4.8 inch figure
        #[arg(long)]
        dpi: Option<f64>,
    },
    /// Export the tessellated turbine as binary STL
    Export {
        /// Output .stl file
        #[arg(short, long)]
        output: PathBuf,
        /// Keep every sample instead of thinning to 50 x 50 cells per surface
        #[arg(long)]
        full: bool,
    },
    /// Print per-surface sampling statistics
    Info,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let scene = config.to_scene().context("invalid scene")?;
    log::debug!(
        "scene: shaft {}x{}, {} blades",
        scene.shaft().radius(),
        scene.shaft().height(),
        scene.blades().len()
    );

    match cli.command {
        Some(Commands::Render {
            output,
            width,
            height,
            dpi,
        }) => {
            let render = match dpi {
                Some(dpi) => RenderConfig::with_dpi(dpi),
                None => RenderConfig {
                    width: width.unwrap_or(config.render.width),
                    height: height.unwrap_or(config.render.height),
                },
            };
            render_file(&scene, render, &output)?;
        }
        Some(Commands::Export { output, full }) => {
            let params = if full {
                TessellationParams::full()
            } else {
                TessellationParams::default()
            };
            let triangles = export_stl(&scene, &params, &output)
                .with_context(|| format!("failed to export {}", output.display()))?;
            println!("Exported {} triangles to {}", triangles, output.display());
        }
        Some(Commands::Info) => {
            show_info(&scene);
        }
        Some(Commands::View) | None => {
            view::run(&scene)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load scene file {}", path.display())),
        None => Ok(SceneConfig::default()),
    }
}

fn render_file(scene: &Scene, render: RenderConfig, output: &Path) -> Result<()> {
    if render.width == 0 || render.height == 0 {
        anyhow::bail!("resolution must be positive, got {}x{}", render.width, render.height);
    }
    let mut target = Rasterizer::new(render.width, render.height)?;
    let frame = scene.render(&mut target)?;
    frame
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "Rendered {}x{} image to {}",
        render.width,
        render.height,
        output.display()
    );
    Ok(())
}

fn show_info(scene: &Scene) {
    let shaft = scene.shaft();
    println!("kaplan turbine");
    println!("  Shaft: radius {}, height {}", shaft.radius(), shaft.height());
    println!("  Blades: {}", scene.blades().len());
    let view = scene.view();
    println!(
        "  View: elevation {}°, azimuth {}°, {:?} aspect",
        view.elevation, view.azimuth, view.aspect
    );

    println!("\nSurfaces:");
    for item in scene.sample() {
        let (rows, cols) = item.surface.shape();
        let defined = item.surface.defined_count();
        let share = 100.0 * defined as f64 / (rows * cols).max(1) as f64;
        print!(
            "  {:<10} layer {} grid {}x{} defined {} ({:.1}%)",
            item.name, item.style.layer, rows, cols, defined, share
        );
        match item.surface.bounds() {
            Some((lo, hi)) => println!(
                " bounds [{:.3}, {:.3}, {:.3}] - [{:.3}, {:.3}, {:.3}]",
                lo.x, lo.y, lo.z, hi.x, hi.y, hi.z
            ),
            None => println!(" (undefined)"),
        }
    }

    let mesh = scene.to_mesh(&TessellationParams::default());
    println!("\nMesh stats:");
    println!("  Total triangles: {}", mesh.num_triangles());
    println!("  Total vertices: {}", mesh.num_vertices());
}
