//! # Schablone CLI
//!
//! Command-line interface for the CV template engine.
//!
//! ## Usage
//!
//! ```bash
//! # List built-in presets
//! schablone presets
//!
//! # Render a preset to PDF with content from a JSON input file
//! schablone render --preset "Schwarz Beige Modern" --inputs content.json out.pdf
//!
//! # Render an exported template file
//! schablone render --template my_template.json out.pdf
//!
//! # Compile a theme asset against a palette
//! schablone compile https://assets.example/theme.svg --primary '#1a2b3c' out.json
//!
//! # Export a preset as a JSON template file
//! schablone export "Executive Cover"
//!
//! # Start the HTTP server
//! schablone serve --listen 0.0.0.0:8080 --store-dir ./templates
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use schablone::{
    SchabloneError, catalog, color, compiler,
    generate::{self, InputRecord},
    server::{self, ServerConfig},
    template::transfer,
};

/// Schablone - CV template engine
#[derive(Parser, Debug)]
#[command(name = "schablone")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List built-in preset templates
    Presets,

    /// Render a template to a PDF file
    Render {
        /// Output PDF path
        output: PathBuf,

        /// Built-in preset name
        #[arg(long, conflicts_with = "template")]
        preset: Option<String>,

        /// Exported template JSON file
        #[arg(long)]
        template: Option<PathBuf>,

        /// JSON input file: one name→value object, or an array of them
        /// for a multi-copy render
        #[arg(long)]
        inputs: Option<PathBuf>,
    },

    /// Compile a theme asset into a template JSON file
    Compile {
        /// URL of the vector theme asset
        asset_url: String,

        /// Output template JSON path
        output: PathBuf,

        /// Primary color override (hex)
        #[arg(long)]
        primary: Option<String>,

        /// Accent color override (hex)
        #[arg(long)]
        accent: Option<String>,

        /// Circle color override (hex)
        #[arg(long)]
        circle: Option<String>,
    },

    /// Export a preset as a JSON template file
    Export {
        /// Preset name
        name: String,

        /// Output directory (defaults to the current directory)
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Directory for the template store (omit for in-memory)
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schablone=info,tower_http=info".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), SchabloneError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Presets => {
            println!("Available presets:");
            for name in catalog::preset_names() {
                println!("  {}", name);
            }
        }

        Commands::Render {
            output,
            preset,
            template,
            inputs,
        } => {
            let template = match (preset, template) {
                (Some(name), None) => catalog::by_name(&name).ok_or_else(|| {
                    SchabloneError::Parse(format!(
                        "Unknown preset '{}'. Run `schablone presets` to see available names.",
                        name
                    ))
                })?,
                (None, Some(path)) => transfer::import_json(&std::fs::read_to_string(path)?)?,
                _ => {
                    return Err(SchabloneError::Parse(
                        "Pass exactly one of --preset or --template".to_string(),
                    ));
                }
            };

            let records = match inputs {
                Some(path) => parse_inputs(&std::fs::read_to_string(path)?)?,
                None => Vec::new(),
            };

            let pdf = generate::render(&template, &records)?;
            std::fs::write(&output, &pdf)?;
            println!("Wrote {} ({} bytes)", output.display(), pdf.len());
        }

        Commands::Compile {
            asset_url,
            output,
            primary,
            accent,
            circle,
        } => {
            let mut palette = color::Palette::default();
            palette.merge(primary.as_deref(), accent.as_deref(), circle.as_deref());

            let client = reqwest::Client::new();
            let template = compiler::compile_theme(&client, &asset_url, &palette).await?;
            std::fs::write(&output, transfer::export_json(&template)?)?;
            println!("Compiled {} -> {}", asset_url, output.display());
        }

        Commands::Export { name, out_dir } => {
            let template = catalog::by_name(&name).ok_or_else(|| {
                SchabloneError::Parse(format!(
                    "Unknown preset '{}'. Run `schablone presets` to see available names.",
                    name
                ))
            })?;
            let path = out_dir.join(transfer::export_file_name(&name));
            std::fs::write(&path, transfer::export_json(&template)?)?;
            println!("Exported to {}", path.display());
        }

        Commands::Serve { listen, store_dir } => {
            server::serve(ServerConfig {
                listen_addr: listen,
                store_dir,
            })
            .await?;
        }
    }

    Ok(())
}

/// Parse an input file: a single record object or an array of records.
fn parse_inputs(json: &str) -> Result<Vec<InputRecord>, SchabloneError> {
    if let Ok(records) = serde_json::from_str::<Vec<InputRecord>>(json) {
        return Ok(records);
    }
    serde_json::from_str::<InputRecord>(json)
        .map(|record| vec![record])
        .map_err(|e| SchabloneError::Parse(format!("invalid input file: {e}")))
}
