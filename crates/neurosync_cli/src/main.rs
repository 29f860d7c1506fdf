use clap::{Args, Parser, Subcommand};
use neurosync_core::{CheckInMetrics, NeuroSyncConfig};
use neurosync_insight::prompts::insight_request;
use neurosync_insight::{InsightBoard, InsightRequestor};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod form;
mod render;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, env = "NEUROSYNC_CONFIG", default_value = "neurosync.toml")]
    config: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a check-in and show the resulting insight
    CheckIn {
        #[command(flatten)]
        form: FormArgs,

        /// Print the insight as JSON (`null` when unavailable)
        #[arg(long)]
        json: bool,
    },
    /// Print the request that would be sent, without sending it
    Prompt {
        #[command(flatten)]
        form: FormArgs,
    },
}

#[derive(Args, Debug)]
struct FormArgs {
    /// Field edit, e.g. `--set mood=8 --set sleepHours=6.5`
    #[arg(short, long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,

    /// Free-text journal entry
    #[arg(short, long)]
    journal: Option<String>,
}

impl FormArgs {
    fn into_metrics(self) -> CheckInMetrics {
        let mut metrics = CheckInMetrics::default();
        for rejected in form::apply_edits(&mut metrics, self.set.as_slice()) {
            warn!("Ignoring edit: {}", rejected);
        }
        if let Some(entry) = self.journal {
            metrics.set_journal_entry(entry);
        }
        metrics
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = NeuroSyncConfig::load_or_default(&cli.config);

    match cli.command {
        Command::CheckIn { form, json } => {
            let metrics = form.into_metrics();
            let board = InsightBoard::new();

            let state = match InsightRequestor::from_env(&config.llm) {
                Ok(requestor) => {
                    info!("Submitting check-in...");
                    board.submit(&requestor, &metrics).await
                }
                Err(e) => {
                    error!("Cannot request insights: {}", e);
                    let ticket = board.begin();
                    board.settle(ticket, Err(e.into()));
                    board.current()
                }
            };

            if json {
                println!("{}", render::render_json(&state)?);
            } else {
                print!("{}", render::render(&state));
            }
        }
        Command::Prompt { form } => {
            let metrics = form.into_metrics();
            if let Err(e) = metrics.validate() {
                warn!("This check-in would be rejected: {}", e);
            }
            let request = insight_request(&metrics, config.llm.temperature)?;
            println!("{}\n", request.prompt);
            println!("{}", serde_json::to_string_pretty(&request.response_schema)?);
        }
    }

    Ok(())
}
