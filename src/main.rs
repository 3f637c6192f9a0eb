//! Media Catalog CLI
//!
//! Index media files into a SQLite catalog, or serve the catalog over HTTP.

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use media_catalog::{scan, CatalogStore, ScanConfig};

/// Media catalog indexer and server
#[derive(Parser)]
#[command(name = "media-catalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory tree and add new media files to the catalog
    Scan {
        /// Root directory to scan
        #[arg(short, long)]
        root: PathBuf,

        /// Catalog database file
        #[arg(short, long, default_value = "media.db")]
        db: PathBuf,

        /// Follow symbolic links during traversal
        #[arg(long)]
        follow_links: bool,

        /// Maximum traversal depth (unbounded if omitted)
        #[arg(long)]
        max_depth: Option<usize>,

        /// Print the scan report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the catalog over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:9999")]
        addr: SocketAddr,

        /// Catalog database file
        #[arg(short, long, default_value = "media.db")]
        db: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Scan {
            root,
            db,
            follow_links,
            max_depth,
            json,
        } => {
            info!("scanning {} into {}", root.display(), db.display());

            let mut store = CatalogStore::open(&db)?;
            let config = ScanConfig::new(root)
                .follow_links(follow_links)
                .max_depth(max_depth);
            let report = scan(&mut store, &config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Scan completed:");
                println!("  Added: {}", report.added);
                println!("  Already cataloged: {}", report.already_cataloged);
                println!("  Unclassified: {}", report.unclassified);
                println!("  Skipped: {}", report.skipped);
                println!("  Duration: {}ms", report.duration_ms);
            }
            Ok(())
        }
        Commands::Serve { addr, db } => {
            let store = CatalogStore::open(&db)?;
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            rt.block_on(media_catalog::server::serve(addr, store))?;
            Ok(())
        }
    }
}
