use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod build;
mod config;

#[derive(Parser)]
#[command(name = "coursegen")]
#[command(about = "A tool that builds a course website's static assets from its Sphinx documentation tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site for this course
    Build {
        /// Rebuild everything, discarding any incremental build state
        #[arg(short, long)]
        all: bool,

        /// Output static files here instead of the default location
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Override the default master url
        #[arg(short = 'u', long)]
        master_url: Option<String>,

        /// Override the default master app
        #[arg(short = 'p', long)]
        master_app: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            all,
            output_dir,
            master_url,
            master_app,
        } => {
            let mut config = config::BuildConfig::resolve(Path::new("."));

            if all {
                config.request_full_rebuild();
            }
            if let Some(dir) = output_dir {
                config.out_dir = dir;
            }
            if let Some(url) = master_url {
                config.master_url = url;
            }
            if let Some(app) = master_app {
                config.master_app = app;
            }

            build::run(
                &config,
                &build::revision::GitRevisionLookup,
                &build::sphinx::SphinxBuilder,
            )?;
        }
    }

    Ok(())
}
