//! CLI entry point for atelier-cms

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "atelier-cms")]
#[command(version)]
#[command(about = "Content store and lead handling for a furniture workshop site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a site directory and seed the content store
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Start the HTTP server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long, env = "ATELIER_PORT")]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,

        /// Keep content in memory only, starting from the seed
        #[arg(long)]
        ephemeral: bool,
    },

    /// Print or save the content document as JSON
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the content document with a JSON file
    Import {
        /// Exported document to load
        file: PathBuf,
    },

    /// Discard stored content and start over from the seed
    Reset,

    /// List store content
    List {
        /// Type of content to list (projects, media, pages, leads, reviews)
        #[arg(default_value = "projects")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "atelier_cms=debug,info"
    } else {
        "atelier_cms=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            let atelier = atelier_cms::Atelier::new(&target_dir)?;
            atelier.init()?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Serve {
            port,
            ip,
            ephemeral,
        } => {
            let atelier = atelier_cms::Atelier::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| atelier.config.server.ip.clone());
            let port = port.unwrap_or(atelier.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            atelier.serve(&ip, port, ephemeral).await?;
        }

        Commands::Export { output } => {
            let atelier = atelier_cms::Atelier::new(&base_dir)?;
            atelier_cms::commands::export::run(&atelier, output.as_deref())?;
        }

        Commands::Import { file } => {
            let atelier = atelier_cms::Atelier::new(&base_dir)?;
            atelier_cms::commands::import::run(&atelier, &file)?;
            println!("Imported {:?}", file);
        }

        Commands::Reset => {
            let atelier = atelier_cms::Atelier::new(&base_dir)?;
            atelier_cms::commands::reset::run(&atelier)?;
            println!("Content reset to seed.");
        }

        Commands::List { r#type } => {
            let atelier = atelier_cms::Atelier::new(&base_dir)?;
            atelier_cms::commands::list::run(&atelier, &r#type)?;
        }

        Commands::Version => {
            println!("atelier-cms version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
