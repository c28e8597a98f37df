//! CLI entry point for mdblog-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mdblog_rs::commands;
use mdblog_rs::commands::new::NewPostOptions;

#[derive(Parser)]
#[command(name = "mdblog-rs")]
#[command(version)]
#[command(about = "Markdown blog content store and preview server", long_about = None)]
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
    /// List site content
    List {
        /// Type of content to list (post, slug, category, featured)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Print a rendered post
    Show {
        /// Slug of the post (file name without .md)
        slug: String,

        /// Print the whole post as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Slug to use instead of one derived from the title
        #[arg(short, long)]
        slug: Option<String>,

        /// Category of the post
        #[arg(long)]
        category: Option<String>,

        /// Author of the post
        #[arg(short, long)]
        author: Option<String>,

        /// Excerpt shown on the blog index
        #[arg(short, long)]
        excerpt: Option<String>,
    },

    /// Validate every post's front-matter
    Check,

    /// Start a local preview server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdblog_rs=debug,info"
    } else {
        "mdblog_rs=info"
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
        Commands::List { r#type } => {
            let site = mdblog_rs::Site::new(&base_dir)?;
            commands::list::run(&site, &r#type)?;
        }

        Commands::Show { slug, json } => {
            let site = mdblog_rs::Site::new(&base_dir)?;
            commands::show::run(&site, &slug, json)?;
        }

        Commands::New {
            title,
            slug,
            category,
            author,
            excerpt,
        } => {
            let site = mdblog_rs::Site::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let options = NewPostOptions {
                slug,
                category,
                author,
                excerpt,
            };
            let path = commands::new::create_post(&site, &title, &options)?;
            println!("Created: {:?}", path);
        }

        Commands::Check => {
            let site = mdblog_rs::Site::new(&base_dir)?;
            commands::check::run(&site)?;
        }

        Commands::Serve { port, ip, open } => {
            let site = mdblog_rs::Site::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            mdblog_rs::server::start(&site, &ip, port, open).await?;
        }

        Commands::Version => {
            println!("mdblog-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
