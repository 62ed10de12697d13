use clap::{Parser, Subcommand};
use photo_gallery::{config, output, pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup; called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "photo-gallery")]
#[command(about = "Static photo gallery generator")]
#[command(long_about = "\
Static photo gallery generator

Every subdirectory of the gallery root is a collection; every .jpg/.jpeg in it
is a photo. The build writes thumbnails, copies of the originals, an index.html
rendered from the theme, and the theme's static files.

Input and output:

  gallery/                         output/
  ├── alps/                        ├── index.html
  │   └── 001.jpg                  ├── static/
  └── beach/                       └── gallery/
      └── sunset.jpg                   ├── alps/001.jpg
                                       └── alps/thumbnails/001.jpg

Descriptions (first non-empty wins):
  EXIF user comment → EXIF image description → default_description

Set RUST_LOG (e.g. RUST_LOG=photo_gallery=debug) for more detailed logs.
Run 'photo-gallery gen-config' to generate a documented gallery.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file; stock defaults are used when it does not exist
    #[arg(long, default_value = "gallery.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the gallery (default)
    Build,
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let config = config::load_config(&cli.config)?;
            init_thread_pool(&config.processing);

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    output::print_build_event(&event);
                }
            });
            let result = pipeline::build(&config, Some(tx));
            printer
                .join()
                .map_err(|_| "progress output thread panicked")?;
            output::print_build_summary(&result?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so progress lines on stdout stay clean.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("photo_gallery=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
