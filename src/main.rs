use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use valentine::{chroma, ui, util, App, Config};

#[derive(Parser, Debug)]
#[command(name = "valentine", version, about = "A Valentine card for your terminal")]
struct Cli {
    /// Data directory for config and logs (default: ~/.valentine)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Green-screen video for the celebration (requires `ffmpeg` on PATH)
    #[arg(long)]
    video: Option<PathBuf>,

    /// Picture shown above the proposal
    #[arg(long)]
    image: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Key the green out of a still image and write a transparent PNG.
    Key {
        /// Input image
        input: PathBuf,
        /// Output PNG path
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir);

    // Initialize logging to file (~/.valentine/logs/valentine.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // The TUI owns stdout
        .init();

    if let Some(Command::Key { input, output }) = cli.cmd {
        let keyed = chroma::key_image_file(&input, &output)
            .with_context(|| format!("failed to key {}", input.display()))?;
        println!("keyed {keyed} pixels -> {}", output.display());
        return Ok(());
    }

    let mut config = Config::load();
    if let Some(video) = cli.video {
        config.video_path = Some(video);
    }
    if let Some(image) = cli.image {
        config.image_path = Some(image);
    }

    ui::install_panic_hook();
    let mut app = App::new(config);
    app.run().await
}
