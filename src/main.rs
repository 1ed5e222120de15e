//! CLI entry point for blogstore

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blogstore")]
#[command(version)]
#[command(about = "Front-matter post store and build-time validator", long_about = None)]
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
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post or draft
    New {
        /// Layout to use (post, draft)
        #[arg(short, long, default_value = "post")]
        layout: String,

        /// Title of the new post
        title: String,

        /// File name for the new post (without extension)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// List store contents
    #[command(alias = "l")]
    List {
        /// Type of content to list (post, category, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Validate post metadata
    #[command(alias = "c")]
    Check,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogstore=debug,info"
    } else {
        "blogstore=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

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
            tracing::info!("Initializing blog in {:?}", target_dir);
            blogstore::commands::init::init_site(&target_dir)?;
            println!("Initialized empty blog in {:?}", target_dir);
        }

        Commands::New {
            layout,
            title,
            path,
        } => {
            let blog = blogstore::Blog::new(&base_dir)?;
            tracing::info!("Creating new {} with title: {}", layout, title);
            blogstore::commands::new::create_post(&blog, &title, &layout, path.as_deref())?;
        }

        Commands::List { r#type } => {
            let blog = blogstore::Blog::new(&base_dir)?;
            blogstore::commands::list::run(&blog, &r#type)?;
        }

        Commands::Check => {
            let blog = blogstore::Blog::new(&base_dir)?;
            tracing::info!("Checking posts in {:?}", blog.source_dir);
            let failed = blogstore::commands::check::run(&blog)?;
            if failed {
                std::process::exit(1);
            }
        }

        Commands::Version => {
            println!("blogstore version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
