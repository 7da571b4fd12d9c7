//! prompt-perfect - enhance prompts through a rephrase service from the terminal

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prompt_perfect::clipboard::SystemClipboard;
use prompt_perfect::notify::StderrNotifier;
use prompt_perfect::storage::get_storage_file_path;
use prompt_perfect::{
    App, Config, ConfigOptions, CopyOutcome, EnhancementClient, FileStorage, RephraseOutcome,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "prompt-perfect")]
#[command(about = "Enhance prompts through a rephrase service")]
struct Args {
    /// API base URL (falls back to PROMPT_PERFECT_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Directory holding the .prompt-perfect state (defaults to the current directory)
    #[arg(long)]
    store_dir: Option<PathBuf>,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set the prompt; pass "-" to read it from stdin
    Prompt { text: String },
    /// Optionally set the prompt, then enhance it
    Enhance { text: Option<String> },
    /// Enhance the stored prompt again
    Regenerate,
    /// Print the stored prompt and output
    Show,
    /// Copy the stored output to the clipboard
    Copy,
    /// Clear the stored prompt and output
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the enhanced text
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = Config::new(
        args.api_url,
        ConfigOptions {
            request_timeout_secs: args.timeout,
            store_dir: args.store_dir,
        },
    )?;

    let storage = FileStorage::open(get_storage_file_path(&config.store_dir));
    debug!("Using storage file {:?}", storage.path());

    let client = EnhancementClient::new(config)?;
    let mut app = App::new(storage, client, SystemClipboard, StderrNotifier);

    match args.command {
        Command::Prompt { text } => {
            app.set_prompt(read_text_arg(text)?);
        }
        Command::Enhance { text } => {
            if let Some(text) = text {
                app.set_prompt(read_text_arg(text)?);
            }
            run_rephrase(&mut app).await;
        }
        Command::Regenerate => {
            run_rephrase(&mut app).await;
        }
        Command::Show => {
            let state = app.state();
            debug!(
                "output_loaded={} output_revision={}",
                state.output_loaded(),
                state.output_revision()
            );
            println!("Prompt:\n{}\n", state.prompt());
            if state.output().is_empty() {
                println!("Your enhanced prompt will appear here...");
            } else {
                println!("Enhanced output:\n{}", state.output());
            }
        }
        Command::Copy => match app.copy_output() {
            CopyOutcome::Copied => eprintln!("Copied to clipboard"),
            CopyOutcome::Empty => eprintln!("Nothing to copy"),
            CopyOutcome::Failed => {}
        },
        Command::Clear => app.clear(),
    }

    Ok(())
}

async fn run_rephrase<S, C, N>(app: &mut App<S, C, N>)
where
    S: prompt_perfect::StorageProvider,
    C: prompt_perfect::clipboard::ClipboardProvider,
    N: prompt_perfect::notify::Notifier,
{
    if !app.state().prompt().trim().is_empty() {
        eprintln!("Enhancing your prompt...");
    }
    match app.rephrase().await {
        RephraseOutcome::Updated => println!("{}", app.state().output()),
        RephraseOutcome::Skipped => eprintln!("Prompt is empty, nothing to enhance"),
        RephraseOutcome::NoResult => {}
        RephraseOutcome::Failed => std::process::exit(1),
    }
}

/// Resolve "-" to stdin contents
fn read_text_arg(text: String) -> Result<String> {
    if text != "-" {
        return Ok(text);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read prompt from stdin")?;
    Ok(buf)
}
