mod render;
mod search;

use clap::{Parser, Subcommand};
use pharmatrack_gemini::GeminiClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pharmatrack-cli")]
#[command(about = "Drug manufacturing facility report")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up the FDA-registered manufacturing sites for a drug.
    Search {
        /// Drug name, e.g. "Ozempic".
        drug: String,
        /// Only show sites in this country (as it appears in the location).
        #[arg(long)]
        country: Option<String>,
        /// Only show sites in this US state; requires a US --country.
        #[arg(long, requires = "country")]
        state: Option<String>,
        /// Print the full view as JSON instead of a text report.
        #[arg(long)]
        json: bool,
    },
    /// List suggested drug names.
    Suggestions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    // Logs go to stderr so `--json` output stays parseable.
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search {
            drug,
            country,
            state,
            json,
        }) => {
            let config = pharmatrack_core::load_app_config()?;
            let client = GeminiClient::from_config(&config)?;
            let view =
                search::search_view(&client, &drug, country.as_deref(), state.as_deref()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render::TextReport(&view));
            }
        }
        Some(Commands::Suggestions) => {
            for name in pharmatrack_core::SUGGESTED_DRUGS {
                println!("{name}");
            }
        }
        None => println!("pharmatrack-cli ready; try `pharmatrack-cli search Aspirin`"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
