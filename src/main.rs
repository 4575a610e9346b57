use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zx_screen::{decode_scr, DitherAlgorithm, ZxPalette};
use zxscr::models::{BrightMode, ConvertConfig};
use zxscr::rendering::{encode_preview, read_png};
use zxscr::services::{write_tiles, ZxFilter};

#[derive(Parser)]
#[command(name = "zxscr")]
#[command(about = "Convert images to ZX Spectrum .scr screens")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PNG image to one or more .scr files
    Convert {
        /// Input PNG file (width and height multiples of 8)
        #[arg(short, long)]
        input: PathBuf,

        /// Output .scr file; large images produce <name>_<tx>_<ty>.scr
        #[arg(short, long)]
        output: PathBuf,

        /// Dither algorithm key (see `zxscr algorithms`)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Dither strength from 0.0 to 1.0
        #[arg(short, long)]
        strength: Option<f32>,

        /// BRIGHT attribute: on, off or auto
        #[arg(short, long)]
        bright: Option<BrightMode>,

        /// PNG mask of flashing pixels (nonzero alpha), same size as input
        #[arg(long)]
        flash: Option<PathBuf>,

        /// Put the darker color of each block in INK
        #[arg(long)]
        prefer_dark_ink: bool,

        /// Skip the saturation boost before dithering
        #[arg(long)]
        no_saturate: bool,

        /// Channel intensity of non-bright colors
        #[arg(long)]
        dim: Option<u8>,

        /// Also write a PNG preview of the converted image
        #[arg(long)]
        preview: Option<PathBuf>,

        /// YAML config file (defaults to $ZXSCR_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overwrite existing .scr files instead of adding a numeric suffix
        #[arg(long, short)]
        force: bool,
    },
    /// Render a .scr file to PNG
    Decode {
        /// Input .scr file (6912 bytes)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Channel intensity of non-bright colors
        #[arg(long)]
        dim: Option<u8>,

        /// Show the second half of the flash cycle
        #[arg(long)]
        flash_phase: bool,
    },
    /// List dither algorithm keys
    Algorithms,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zxscr=info,zx_screen=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            algorithm,
            strength,
            bright,
            flash,
            prefer_dark_ink,
            no_saturate,
            dim,
            preview,
            config,
            force,
        }) => {
            let mut config = ConvertConfig::load(config_path(config).as_deref())?;
            if let Some(algorithm) = algorithm {
                config.algorithm = algorithm;
            }
            if let Some(strength) = strength {
                config.strength = strength;
            }
            if let Some(bright) = bright {
                config.bright = bright;
            }
            if let Some(dim) = dim {
                config.dim_level = dim;
            }
            config.prefer_dark_ink |= prefer_dark_ink;
            config.saturate &= !no_saturate;

            run_convert_command(
                &config,
                &input,
                &output,
                flash.as_deref(),
                preview.as_deref(),
                force,
            )
        }
        Some(Commands::Decode {
            input,
            output,
            dim,
            flash_phase,
        }) => run_decode_command(&input, &output, dim, flash_phase),
        Some(Commands::Algorithms) => {
            for key in DitherAlgorithm::KEYS {
                println!("{key}");
            }
            Ok(())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Explicit `--config`, else `$ZXSCR_CONFIG`
fn config_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| std::env::var_os("ZXSCR_CONFIG").map(PathBuf::from))
}

fn run_convert_command(
    config: &ConvertConfig,
    input: &Path,
    output: &Path,
    flash: Option<&Path>,
    preview: Option<&Path>,
    force: bool,
) -> anyhow::Result<()> {
    let filter = ZxFilter::from_config(config)?;
    let image = read_png(input)?;
    let mask = flash.map(read_png).transpose()?;

    let conversion = filter.convert(&image, mask.as_ref())?;
    let written = write_tiles(output, &conversion.tiles, force)?;
    for path in &written {
        println!("Wrote {}", path.display());
    }

    if let Some(preview) = preview {
        let png_bytes = encode_preview(&conversion.frame, filter.palette(), false)?;
        std::fs::write(preview, &png_bytes)?;
        println!("Preview {} ({} bytes)", preview.display(), png_bytes.len());
    }

    Ok(())
}

fn run_decode_command(
    input: &Path,
    output: &Path,
    dim: Option<u8>,
    flash_phase: bool,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(input)?;
    let frame = decode_scr(&bytes)?;
    let palette = dim.map(ZxPalette::new).unwrap_or_default();

    let png_bytes = encode_preview(&frame, &palette, flash_phase)?;
    std::fs::write(output, &png_bytes)?;
    println!("Rendered {} ({} bytes)", output.display(), png_bytes.len());
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("ZXSCR_CONFIG").ok();

    println!("zxscr v{VERSION} - ZX Spectrum screen converter\n");

    println!("Environment Variables:");
    println!(
        "  ZXSCR_CONFIG = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config = match ConvertConfig::load(config_file.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            println!("  ({e}, showing defaults)");
            ConvertConfig::default()
        }
    };

    println!("\nConversion Settings:");
    println!("  algorithm       = {}", config.algorithm);
    println!("  strength        = {}", config.strength);
    println!("  bright          = {}", config.bright);
    println!("  dim_level       = {}", config.dim_level);
    println!("  prefer_dark_ink = {}", config.prefer_dark_ink);
    println!("  saturate        = {}", config.saturate);
    println!(
        "  max size        = {}x{}",
        config.max_width, config.max_height
    );

    println!("\nCommands:");
    println!("  zxscr convert -i <png> -o <scr>   Convert an image");
    println!("  zxscr decode -i <scr> -o <png>    Render a screen");
    println!("  zxscr algorithms                  List dither algorithms");
}
