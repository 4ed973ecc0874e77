//! Binary entry point for psychic.
//!
//! This binary provides the CLI interface for the psychic styling assistant.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow unnecessary_wraps for consistent command function signatures
#![allow(clippy::unnecessary_wraps)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use psychic::config::PsychicConfig;
use psychic::llm::{GeminiClient, ImageryClient, LlmHttpConfig, StylingProvider};
use psychic::models::{Category, LookRequest, Preferences};
use psychic::services::{ClosetService, StylistService};
use psychic::storage::StateStore;
use psychic::{rendering, scoring};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Psychic - a psychology-first personal styling assistant.
#[derive(Parser)]
#[command(name = "psychic")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Generate today's outfit recommendation.
    Daily {
        /// Current mood: Anxious, Tired, Calm, Confident, Gloomy, or Excited.
        #[arg(short, long)]
        mood: Option<String>,

        /// Goal mood: calm, confident, creative, social, or safe.
        #[arg(short, long, default_value = "calm")]
        goal: String,

        /// Occasion: University, Office, Date, Casual, or Home.
        #[arg(short, long, default_value = "University")]
        occasion: String,

        /// Weather: Sunny, Rainy, Cold, or Mild.
        #[arg(short, long, default_value = "Sunny")]
        weather: String,

        /// Temperature in degrees Celsius.
        #[arg(short, long, default_value = "4", allow_negative_numbers = true)]
        temp: i16,
    },

    /// Manage the closet inventory.
    Closet {
        /// Closet subcommand.
        #[command(subcommand)]
        action: ClosetAction,
    },

    /// Manage the profile and preferences.
    Profile {
        /// Profile subcommand.
        #[command(subcommand)]
        action: ProfileAction,
    },
}

/// Closet subcommands.
#[derive(Subcommand)]
enum ClosetAction {
    /// Add an item from a photo; category, color, and description are
    /// filled in by image classification.
    Add {
        /// Path to the item photo (JPEG).
        image: PathBuf,
    },

    /// List the inventory grouped by category.
    List,

    /// Remove an item by identifier.
    Remove {
        /// Item identifier (shown by `closet list`).
        id: u64,
    },

    /// Change the category of an item.
    Recategorize {
        /// Item identifier.
        id: u64,

        /// New category: Outerwear, Tops, Bottoms, or Accessories.
        category: String,
    },
}

/// Profile subcommands.
#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile, trait summary, and preferences.
    Show,

    /// Update preferences field-by-field.
    Set {
        /// Display name.
        #[arg(long)]
        name: Option<String>,

        /// Gender style: Womenswear, Menswear, or Unisex.
        #[arg(long)]
        gender: Option<String>,

        /// Skin tone: Fair, Medium, Tan, or Deep.
        #[arg(long)]
        skin: Option<String>,

        /// Hair color: Black, Brown, Blonde, or Red.
        #[arg(long)]
        hair: Option<String>,

        /// Hair style: Long Straight, Wavy, Short, or Buzz Cut.
        #[arg(long)]
        hair_style: Option<String>,
    },

    /// Take (or retake) the personality questionnaire.
    Quiz {
        /// Ten comma-separated answers, each 0-10, in question order.
        /// Omit to print the questions.
        #[arg(short, long)]
        answers: Option<String>,
    },

    /// Show the outfit history, newest first.
    History,
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Pick up GEMINI_API_KEY and friends from a local .env if present.
    let _ = dotenvy::dotenv();

    init_tracing(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Initializes the tracing subscriber.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("psychic=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<PsychicConfig, Box<dyn std::error::Error>> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return PsychicConfig::load_from_file(std::path::Path::new(config_path))
            .map_err(std::convert::Into::into);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("PSYCHIC_CONFIG_PATH") {
        if !config_path.trim().is_empty() {
            return PsychicConfig::load_from_file(std::path::Path::new(&config_path))
                .map_err(std::convert::Into::into);
        }
    }

    // Otherwise, load from default location
    Ok(PsychicConfig::load_default())
}

/// Runs the selected command.
fn run_command(cli: Cli, config: PsychicConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(StateStore::with_create(&config.data_dir)?);

    show_quickstart_once(&store);

    match cli.command {
        Commands::Daily {
            mood,
            goal,
            occasion,
            weather,
            temp,
        } => cmd_daily(&config, &store, mood, goal, occasion, weather, temp),

        Commands::Closet { action } => match action {
            ClosetAction::Add { image } => cmd_closet_add(&config, &store, &image),
            ClosetAction::List => cmd_closet_list(&store),
            ClosetAction::Remove { id } => cmd_closet_remove(&config, &store, id),
            ClosetAction::Recategorize { id, category } => {
                cmd_closet_recategorize(&config, &store, id, &category)
            },
        },

        Commands::Profile { action } => match action {
            ProfileAction::Show => cmd_profile_show(&store),
            ProfileAction::Set {
                name,
                gender,
                skin,
                hair,
                hair_style,
            } => cmd_profile_set(&store, name, gender, skin, hair, hair_style),
            ProfileAction::Quiz { answers } => cmd_profile_quiz(&store, answers.as_deref()),
            ProfileAction::History => cmd_profile_history(&store),
        },
    }
}

/// Prints the quick-start note on the very first run.
fn show_quickstart_once(store: &StateStore) {
    if store.quickstart_seen() {
        return;
    }
    println!("Welcome to Psychic.");
    println!("  1. psychic profile quiz --answers 5,5,5,5,5,5,5,5,5,5");
    println!("  2. psychic closet add photo.jpg");
    println!("  3. psychic daily --mood Calm --goal confident");
    println!();
    if let Err(e) = store.mark_quickstart_seen() {
        tracing::warn!(error = %e, "failed to persist quick-start flag");
    }
}

/// Builds the styling collaborator from configuration.
fn build_styling_provider(config: &PsychicConfig) -> Arc<dyn StylingProvider> {
    let mut client = GeminiClient::new().with_http_config(build_http_config(config));
    if let Some(model) = &config.llm.model {
        client = client.with_model(model);
    }
    if let Some(api_key) = &config.llm.api_key {
        client = client.with_api_key(api_key);
    }
    if let Some(base_url) = &config.llm.base_url {
        client = client.with_endpoint(base_url);
    }
    Arc::new(client)
}

/// Builds HTTP timeouts from configuration with env overrides.
fn build_http_config(config: &PsychicConfig) -> LlmHttpConfig {
    let mut http = LlmHttpConfig::default();
    if let Some(timeout_ms) = config.llm.timeout_ms {
        http.timeout_ms = timeout_ms;
    }
    if let Some(connect_timeout_ms) = config.llm.connect_timeout_ms {
        http.connect_timeout_ms = connect_timeout_ms;
    }
    http.with_env_overrides()
}

/// Builds the look-image client from configuration.
fn build_imagery_client(config: &PsychicConfig) -> ImageryClient {
    let mut client = ImageryClient::new();
    if let Some(base_url) = &config.imagery.base_url {
        client = client.with_base_url(base_url);
    }
    client
}

/// Daily recommendation command.
fn cmd_daily(
    config: &PsychicConfig,
    store: &Arc<StateStore>,
    mood: Option<String>,
    goal: String,
    occasion: String,
    weather: String,
    temp: i16,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = store.load();
    state.current_mood = mood;

    let service = StylistService::new(
        Arc::clone(store),
        build_styling_provider(config),
        build_imagery_client(config),
    );

    let request = LookRequest {
        goal,
        occasion,
        weather,
        temp_c: temp,
    };

    let look = service.request(&mut state, &request)?;
    println!("{}", rendering::render_look(&look, &state.preferences.name));
    Ok(())
}

/// Closet add command.
fn cmd_closet_add(
    config: &PsychicConfig,
    store: &Arc<StateStore>,
    image: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let image_bytes = std::fs::read(image)?;

    let mut state = store.load();
    let service = ClosetService::new(Arc::clone(store), build_styling_provider(config));

    let item = service.add_item(&mut state, &image_bytes)?;
    println!("Added to closet:");
    println!("  ID: {}", item.id);
    println!("  {} ({})", item.desc, item.category);
    println!("  Color: {}", item.color);
    Ok(())
}

/// Closet list command.
fn cmd_closet_list(store: &Arc<StateStore>) -> Result<(), Box<dyn std::error::Error>> {
    let state = store.load();
    print!("{}", rendering::render_closet(&state));
    Ok(())
}

/// Closet remove command.
fn cmd_closet_remove(
    config: &PsychicConfig,
    store: &Arc<StateStore>,
    id: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = store.load();
    let service = ClosetService::new(Arc::clone(store), build_styling_provider(config));

    if service.remove_item(&mut state, id)? {
        println!("Removed item {id}.");
    } else {
        println!("No item with id {id}.");
    }
    Ok(())
}

/// Closet recategorize command.
fn cmd_closet_recategorize(
    config: &PsychicConfig,
    store: &Arc<StateStore>,
    id: u64,
    category: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let category = Category::parse(category).ok_or_else(|| {
        psychic::Error::InvalidInput(format!(
            "unknown category '{category}' (expected one of: Outerwear, Tops, Bottoms, Accessories)"
        ))
    })?;

    let mut state = store.load();
    let service = ClosetService::new(Arc::clone(store), build_styling_provider(config));

    if service.recategorize(&mut state, id, category)? {
        println!("Item {id} is now {category}.");
    } else {
        println!("No item with id {id}.");
    }
    Ok(())
}

/// Profile show command.
fn cmd_profile_show(store: &Arc<StateStore>) -> Result<(), Box<dyn std::error::Error>> {
    let state = store.load();
    print!("{}", rendering::render_profile(&state));
    Ok(())
}

/// Profile set command.
fn cmd_profile_set(
    store: &Arc<StateStore>,
    name: Option<String>,
    gender: Option<String>,
    skin: Option<String>,
    hair: Option<String>,
    hair_style: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = store.load();
    let mut preferences: Preferences = state.preferences;

    if let Some(name) = name {
        preferences.name = name;
    }
    if let Some(gender) = gender {
        preferences.gender = gender;
    }
    if let Some(skin) = skin {
        preferences.skin = skin;
    }
    if let Some(hair) = hair {
        preferences.hair = hair;
    }
    if let Some(hair_style) = hair_style {
        preferences.hair_style = hair_style;
    }

    store.save_preferences(&preferences)?;
    println!("Preferences saved.");
    Ok(())
}

/// Profile quiz command.
fn cmd_profile_quiz(
    store: &Arc<StateStore>,
    answers: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(answers) = answers else {
        println!("Rate each statement from 0 (not at all) to 10 (completely):");
        for (index, question) in scoring::QUESTIONS.iter().enumerate() {
            println!("  {:>2}. {}", index + 1, question.text);
        }
        println!();
        println!("Then run: psychic profile quiz --answers 5,5,5,5,5,5,5,5,5,5");
        return Ok(());
    };

    let parsed: Vec<u8> = answers
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| {
            psychic::Error::InvalidInput("answers must be ten integers 0-10".to_string())
        })?;

    let responses: [u8; 10] = parsed.try_into().map_err(|_| {
        psychic::Error::InvalidInput("exactly ten answers are required".to_string())
    })?;

    if responses.iter().any(|&answer| answer > 10) {
        return Err(psychic::Error::InvalidInput(
            "each answer must be between 0 and 10".to_string(),
        )
        .into());
    }

    let traits = scoring::score(&responses);
    store.save_traits(&traits)?;

    println!("Personality profile saved:");
    for (label, value) in traits.labeled() {
        println!("  {label:<18} {value:>2}/20");
    }
    Ok(())
}

/// Profile history command.
fn cmd_profile_history(store: &Arc<StateStore>) -> Result<(), Box<dyn std::error::Error>> {
    let state = store.load();
    if state.history.is_empty() {
        println!("No history yet.");
        return Ok(());
    }
    for entry in &state.history {
        println!("{}  {}", entry.date, entry.title);
        println!("          {}", entry.img);
    }
    Ok(())
}
