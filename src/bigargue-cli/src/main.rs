//! The Big Argue CLI - Intellectual Combat Simulator
//!
//! Pick a tone, pick your disciplines, name a topic, and watch experts
//! argue about it.

use clap::{ArgAction, Parser};
use colored::Colorize;

use bigargue_core::{
    ArgueError, ArgueOrchestrator, Config, OpenAiGenerator, SelectionState, Tone, default_config,
    render_wheel_svg,
};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bigargue",
    version,
    about = "The Big Argue - simulated multi-discipline debates",
    long_about = "A CLI for The Big Argue: picks a debate tone and a set of academic \
                  disciplines, then asks a generative-language backend for a simulated debate."
)]
struct Cli {
    /// The topic to argue about
    #[arg(value_name = "TOPIC")]
    topic: Option<String>,

    /// Debate tone (specify once per tone): skeptical, curious, thoughtful, confident
    #[arg(short, long, action = ArgAction::Append, value_name = "TONE")]
    tone: Vec<String>,

    /// Discipline id (specify once per discipline); see --list-disciplines
    #[arg(short, long, action = ArgAction::Append, value_name = "ID")]
    discipline: Vec<String>,

    /// Model name sent to the generation service
    #[arg(short, long, value_name = "MODEL")]
    model: Option<String>,

    /// Path to a TOML config file (catalog, prompts, generation settings)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the discipline wheel (with the current selection) as an SVG file
    #[arg(long, value_name = "PATH")]
    wheel_svg: Option<PathBuf>,

    /// List the discipline catalog and exit
    #[arg(long)]
    list_disciplines: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => default_config(),
    };
    let catalog = config.catalog();

    if cli.list_disciplines {
        println!("{}", "Disciplines:".bold());
        for d in catalog.disciplines() {
            println!("  {:<14} {}", d.id.bright_cyan(), d.label);
        }
        println!();
        println!("{}", "Tones:".bold());
        for tone in Tone::ALL {
            let asset = catalog.tone_asset(tone);
            println!(
                "  {:<14} {}",
                tone.to_string().bright_cyan(),
                asset.map(|a| a.description.as_str()).unwrap_or("").dimmed()
            );
        }
        return Ok(());
    }

    // Build the selection state from the command line, through the same
    // toggle operations a UI would use.
    let mut selection = SelectionState::new();
    if let Some(topic) = &cli.topic {
        selection.set_topic(topic.clone());
    }
    for raw in &cli.tone {
        let tone: Tone = raw.parse().map_err(|e: ArgueError| e.to_string())?;
        selection.toggle_tone(tone);
    }
    for id in &cli.discipline {
        if catalog.discipline(id).is_none() {
            eprintln!(
                "{} Unknown discipline '{}'. Run with --list-disciplines to see the catalog.",
                "Error:".red().bold(),
                id
            );
            std::process::exit(1);
        }
        selection.toggle_discipline(id);
    }

    if let Some(path) = &cli.wheel_svg {
        let svg = render_wheel_svg(catalog.disciplines(), selection.discipline_ids());
        std::fs::write(path, svg)?;
        println!("Wheel written to {}", path.display().to_string().bright_cyan());
        if cli.topic.is_none() {
            return Ok(());
        }
    }

    // The validation gate: first failure wins, one message at a time.
    if let Err(e) = selection.validate() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    let disciplines = catalog.resolve(selection.discipline_ids());

    // API settings: environment wins over config file.
    let api_base = env::var("OPENAI_API_BASE")
        .or_else(|_| env::var("OPENAI_BASE_URL"))
        .unwrap_or_else(|_| config.generation.api_base.clone());
    let api_key = env::var("OPENAI_API_KEY").unwrap_or_else(|_| {
        eprintln!(
            "{}",
            "Warning: OPENAI_API_KEY not set. API calls may fail.".yellow()
        );
        String::new()
    });
    let model = cli.model.clone().unwrap_or_else(|| config.generation.model.clone());

    // Print header
    println!();
    println!("{}", "═".repeat(70).bright_blue());
    println!("{}", "  The Big Argue".bright_blue().bold());
    println!("{}", "═".repeat(70).bright_blue());
    println!();
    println!("{} {}", "Topic:".bold(), selection.topic().bright_white());
    println!(
        "{} {}",
        "Tone:".bold(),
        selection
            .tones()
            .iter()
            .map(Tone::name)
            .collect::<Vec<_>>()
            .join(" and ")
            .yellow()
    );
    println!("{}", "Experts:".bold());
    for d in &disciplines {
        println!("  - {}", d.label.bright_cyan());
    }
    println!();
    println!("{}", "  Gathering the experts...".dimmed().italic());

    let generator = OpenAiGenerator::new(model, api_base, api_key);
    let mut orchestrator = ArgueOrchestrator::new(Box::new(generator), config.prompts.clone());

    let results = match orchestrator
        .run(selection.topic(), selection.tones(), &disciplines)
        .await
    {
        Ok(results) => results,
        Err(e) => {
            tracing::error!(error = %e, "debate request failed");
            eprintln!(
                "{} {}",
                "Error:".red().bold(),
                "Something went wrong during the debate. Please try again."
            );
            std::process::exit(1);
        }
    };

    println!();
    println!("{}", "─".repeat(70).dimmed());
    println!(
        "{}",
        "  The Consensus (or lack thereof)".bright_magenta().bold()
    );
    println!("{}", "─".repeat(70).dimmed());
    println!();

    if results.is_empty() {
        println!("{}", "  The experts had nothing to say.".dimmed().italic());
    }
    for arg in results {
        println!("{}", arg.speaker.to_uppercase().bright_cyan().bold());
        for line in textwrap(&arg.text, 66).lines() {
            println!("  {}", line.italic());
        }
        println!();
    }

    Ok(())
}

/// Simple text wrapping function.
fn textwrap(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut current_line_len = 0;

    for word in text.split_whitespace() {
        if current_line_len + word.len() + 1 > width && current_line_len > 0 {
            result.push('\n');
            current_line_len = 0;
        }
        if current_line_len > 0 {
            result.push(' ');
            current_line_len += 1;
        }
        result.push_str(word);
        current_line_len += word.len();
    }

    result
}
