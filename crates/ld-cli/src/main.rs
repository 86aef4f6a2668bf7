//! `layerdeck`: build a layered document from an image and print it.
//!
//! ```text
//! layerdeck decompose <file> [--layers N] [--outline]
//! layerdeck upload <file> [--outline]
//! layerdeck sample [--outline]
//! ```
//!
//! The document snapshot is written to stdout as JSON; `--outline` also
//! prints the display list to stderr. Backend settings come from the
//! `LAYERDECK_*` environment variables, log verbosity from `RUST_LOG`.

mod outline;

use clap::{Parser, Subcommand};
use ld_core::EditorConfig;
use ld_decompose::{
    DecomposeConfig, HttpDecomposer, HttpImageProbe, SourceImage, add_uploaded_image,
    decompose_image, load_sample,
};
use ld_editor::Editor;
use ld_render::SceneRenderer;
use outline::OutlineRenderer;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "layerdeck", about = "Split an image into editable layers")]
struct Cli {
    /// Also print the display list to stderr.
    #[arg(long, global = true)]
    outline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Send an image to the decomposition backend.
    Decompose {
        path: PathBuf,
        /// Layer count; defaults to LAYERDECK_NUM_LAYERS or 5.
        #[arg(long, value_parser = clap::value_parser!(u32).range(3..=8))]
        layers: Option<u32>,
    },
    /// Add an image file as a single layer.
    Upload { path: PathBuf },
    /// Load the bundled sample image.
    Sample,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let config = DecomposeConfig::from_env()?;
    let mut editor = Editor::new(EditorConfig::default());

    match cli.command {
        Command::Decompose { path, layers } => {
            let image = SourceImage::from_path(&path).await?;
            let decomposer = HttpDecomposer::new(&config)?;
            let probe = HttpImageProbe::new(&config)?;
            let num_layers = layers.unwrap_or(config.num_layers);
            log::info!("decomposing {} into {num_layers} layers", image.file_name());

            let timeout = config.timeouts.request_secs;
            let batch = decompose_image(&decomposer, &probe, &image, num_layers, timeout).await?;
            let ids = batch.insert_into(&mut editor);
            log::info!("inserted {} layers", ids.len());
        }
        Command::Upload { path } => {
            let image = SourceImage::from_path(&path).await?;
            add_uploaded_image(&mut editor, &image)?;
        }
        Command::Sample => {
            let probe = HttpImageProbe::new(&config)?;
            load_sample(&mut editor, &probe, &config).await?;
        }
    }

    if cli.outline {
        let mut renderer = OutlineRenderer::new(std::io::stderr().lock());
        renderer.render(&editor.display_list(None))?;
    }

    println!("{}", serde_json::to_string_pretty(&editor.document.snapshot())?);
    Ok(())
}
