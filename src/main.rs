//! tilemosaic CLI - chop images into blocks or rebuild them as photomosaics

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tilemosaic::workflow;
use tilemosaic::{ImageCrateBackend, MosaicError, WorkflowConfig};

#[derive(Parser)]
#[command(name = "tilemosaic", version, about = "Build photomosaics from a sheet of tile images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cut an image into numbered block images (1.png, 2.png, ...)
    Chop {
        /// Input image file
        input: PathBuf,
        /// Directory for the numbered pieces
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        #[command(flatten)]
        block: BlockArgs,
        /// Keep border pieces that run past the image edge (padded transparent)
        #[arg(long, conflicts_with = "skip_incomplete")]
        keep_incomplete: bool,
        /// Drop border pieces that run past the image edge (default)
        #[arg(long)]
        skip_incomplete: bool,
    },
    /// Rebuild an image from tiles picked by nearest average color
    Mosaic {
        /// Target image file
        target: PathBuf,
        /// Tile image files
        tiles: Vec<PathBuf>,
        /// Directory of tile images, used in file name order
        #[arg(short, long)]
        tiles_dir: Option<PathBuf>,
        /// Output PNG path
        #[arg(short, long, default_value = "mosaic.png")]
        output: PathBuf,
        #[command(flatten)]
        block: BlockArgs,
    },
}

#[derive(Args)]
struct BlockArgs {
    /// Block width in pixels
    #[arg(short = 'x', long, value_parser = clap::value_parser!(u32).range(1..=256))]
    x_size: Option<u32>,
    /// Block height in pixels
    #[arg(short = 'y', long, value_parser = clap::value_parser!(u32).range(1..=256))]
    y_size: Option<u32>,
    /// JSON file with x_size, y_size and skip_incomplete
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BlockArgs {
    fn resolve(&self) -> Result<WorkflowConfig, MosaicError> {
        let mut config = match &self.config {
            Some(path) => WorkflowConfig::load(path)?,
            None => WorkflowConfig::default(),
        };
        if let Some(x) = self.x_size {
            config.x_size = x;
        }
        if let Some(y) = self.y_size {
            config.y_size = y;
        }
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<(), MosaicError> {
    let backend = ImageCrateBackend::default();

    match cli.command {
        Command::Chop { input, out_dir, block, keep_incomplete, skip_incomplete } => {
            let mut config = block.resolve()?;
            if keep_incomplete {
                config.skip_incomplete = false;
            } else if skip_incomplete {
                config.skip_incomplete = true;
            }
            let written = workflow::chop_to_dir(&backend, &input, &out_dir, &config)?;
            println!("{} pieces written to {}", written.len(), out_dir.display());
        }
        Command::Mosaic { target, tiles, tiles_dir, output, block } => {
            let block = block.resolve()?.block_size()?;
            let mut sheet = workflow::load_tiles(&backend, &tiles)?;
            if let Some(dir) = tiles_dir {
                sheet.extend(workflow::load_tile_dir(&backend, &dir)?);
            }
            if sheet.is_empty() {
                return Err(MosaicError::InvalidInput("no tile images given".into()));
            }
            workflow::mosaic_to_file(&backend, &target, &sheet, &output, block)?;
            println!("mosaic written to {}", output.display());
        }
    }
    Ok(())
}

fn main() -> Result<(), MosaicError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    run(Cli::parse())
}
