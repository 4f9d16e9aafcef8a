use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use editor::EditorConfig;
use tools::{ToolError, export_project, inspect, new_project, read_document};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Store floor-plan projects: create, check and export")]
struct Args {
    /// JSON file with editor settings; FLOORPLAN_* variables override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an empty project with a floor
    New {
        /// Project name; the file is saved as <name>.json
        #[arg(long)]
        name: String,

        #[arg(long, default_value_t = 20.0)]
        width: f64,

        #[arg(long, default_value_t = 20.0)]
        depth: f64,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Summarise a project file or an exported page
    Inspect {
        path: PathBuf,

        /// Print the document as indented JSON
        #[arg(long)]
        json: bool,

        /// Exit non-zero when an object is not resting on the floor
        #[arg(long)]
        strict: bool,
    },

    /// Render a project as a standalone read-only page
    Export {
        project: PathBuf,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<EditorConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(EditorConfig::load(path)?.with_overrides(|key| std::env::var(key).ok())),
        None => Ok(EditorConfig::from_env()),
    }
}

fn run(args: Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_ref())?;

    match args.command {
        Command::New {
            name,
            width,
            depth,
            out,
        } => {
            let path = new_project(config, &out, &name, width, depth)?;
            println!("{}", path.display());
        }
        Command::Inspect { path, json, strict } => {
            let doc = read_document(&path)?;
            if json {
                println!("{}", doc.to_json_pretty().map_err(ToolError::from)?);
            }
            let report = inspect(&doc);
            println!("{report}");
            if strict && !report.floating.is_empty() {
                return Ok(ExitCode::from(2));
            }
        }
        Command::Export { project, out } => {
            let path = export_project(config, &project, &out)?;
            println!("{}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
