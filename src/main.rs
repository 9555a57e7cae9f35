//! Keepsake CLI
//!
//! Command-line front end for Keepsake:
//! - Write, list and delete memories
//! - Switch the theme
//! - Search recipes and open recipe details
//! - Generate a config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use keepsake::config::{generate_default_config, Config, Discovered};
use keepsake::journal::{Journal, JournalError, JournalScreen, NewMemory};
use keepsake::recipes::{
    DetailOverlay, MealDbClient, RecipeBoard, RecipeDetailView, RecipeSearch, RecipeView,
};
use keepsake::storage::FileStore;
use keepsake::terminal;
use keepsake::theme::{Theme, ThemeSwitcher};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "keepsake")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal memories journal with a recipe finder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage memories
    Journal {
        #[command(subcommand)]
        action: JournalCommand,
    },

    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },

    /// Find recipes
    Recipes {
        #[command(subcommand)]
        action: RecipeCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum JournalCommand {
    /// List memories, newest first
    List {
        /// Print the rendered view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save a new memory
    Add {
        #[arg(short, long)]
        title: String,
        /// Calendar date, e.g. 2024-03-05, 03/05/2024 or "March 5, 2024"
        #[arg(short, long)]
        date: String,
        #[arg(short, long)]
        content: String,
    },

    /// Delete a memory by id
    Delete { id: i64 },

    /// Discard all stored memories (recovers from a corrupt store)
    Reset,
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Print the current theme
    Show,
    /// Set the theme (light, dark)
    Set { theme: Theme },
    /// Switch between light and dark
    Toggle,
}

#[derive(Subcommand)]
pub enum RecipeCommand {
    /// Search by ingredient
    Search { ingredient: String },
    /// Show the popular dishes
    Popular,
    /// Show one recipe in full
    Show { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Discovered {
        mut config,
        source,
        skipped,
    } = match &cli.config {
        Some(path) => Discovered {
            config: Config::load_with_env(path)?,
            source: Some(path.clone()),
            skipped: Vec::new(),
        },
        None => Config::load_default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }

    init_logging(&config);
    tracing::debug!("Keepsake v{}", env!("CARGO_PKG_VERSION"));

    for e in &skipped {
        tracing::warn!("Ignoring config file: {}", e);
    }
    match &source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::debug!("Using default config with environment overrides"),
    }

    match cli.command {
        Commands::Journal { action } => run_journal(&config, action),
        Commands::Theme { action } => run_theme(&config, action),
        Commands::Recipes { action } => run_recipes(&config, action).await,
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            Ok(())
        }
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("keepsake={}", config.logging.level).into()
    });

    let json = config.logging.format == "json";

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn open_store(config: &Config) -> anyhow::Result<FileStore> {
    let dir = config.storage.data_path();
    FileStore::open(&dir).with_context(|| format!("Cannot open data directory {:?}", dir))
}

fn load_journal(store: &FileStore) -> anyhow::Result<Journal<&FileStore>> {
    match Journal::load(store) {
        Ok(journal) => Ok(journal),
        Err(e @ JournalError::Corrupt { .. }) => Err(anyhow::Error::new(e).context(
            "Stored memories could not be read. Run `keepsake journal reset` to start over",
        )),
        Err(e) => Err(e.into()),
    }
}

fn run_journal(config: &Config, action: JournalCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;

    if let JournalCommand::Reset = action {
        Journal::reset(&store)?;
        println!("All memories removed.");
        return Ok(());
    }

    let mut screen = JournalScreen::new(load_journal(&store)?);

    match action {
        JournalCommand::List { json } => {
            let view = screen.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", terminal::render_journal(&view));
            }
        }

        JournalCommand::Add {
            title,
            date,
            content,
        } => {
            screen.form_mut().show();
            screen.form_mut().transition_finished();
            screen
                .form_mut()
                .set_draft(NewMemory::new(title, date, content));

            let (entry, celebration) = screen.submit(&mut rand::rng())?;
            screen.form_mut().transition_finished();

            println!("{}", terminal::render_celebration(&celebration, 60));
            println!("Saved memory {} ({})", entry.title, entry.id);
            println!();
            print!("{}", terminal::render_journal(&screen.view()));
        }

        JournalCommand::Delete { id } => {
            if !screen.request_delete(id) {
                println!("No memory with id {}", id);
                return Ok(());
            }
            screen.exit_finished(id)?;
            println!("Deleted memory {}", id);
            println!();
            print!("{}", terminal::render_journal(&screen.view()));
        }

        JournalCommand::Reset => {}
    }

    Ok(())
}

fn run_theme(config: &Config, action: ThemeCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut switcher = ThemeSwitcher::load(&store)?;

    match action {
        ThemeCommand::Show => {}
        ThemeCommand::Set { theme } => switcher.set(theme)?,
        ThemeCommand::Toggle => {
            switcher.toggle()?;
        }
    }

    let (attr, value) = switcher.root_attribute();
    println!(
        "{}",
        terminal::render_theme(switcher.current(), switcher.toggles())
    );
    tracing::debug!("{}={}", attr, value);
    Ok(())
}

async fn run_recipes(config: &Config, action: RecipeCommand) -> anyhow::Result<()> {
    let client = MealDbClient::new(config.recipes.client_config())?;
    let search = RecipeSearch::with_reference_lists(
        client,
        config.recipes.known_ids.clone(),
        config.recipes.keywords.clone(),
    );

    let mut board = RecipeBoard::new();

    let outcome = match action {
        RecipeCommand::Search { ingredient } => {
            board.begin_loading();
            eprint!("{}", terminal::render_recipes(board.view()));
            search.search(&ingredient).await
        }
        RecipeCommand::Popular => {
            board.begin_loading();
            eprint!("{}", terminal::render_recipes(board.view()));
            search.popular().await
        }
        RecipeCommand::Show { id } => {
            return match search.detail(&id).await {
                Ok(meal) => {
                    let mut overlay = DetailOverlay::new();
                    overlay.open(RecipeDetailView::from_meal(&meal));
                    if let Some(detail) = overlay.current() {
                        print!("{}", terminal::render_recipe_detail(detail));
                    }
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(id = %id, "Detail fetch failed: {}", e);
                    eprintln!("Could not load recipe details. Please try again later.");
                    std::process::exit(1);
                }
            };
        }
    };

    board.apply(&outcome);
    print!("{}", terminal::render_recipes(board.view()));

    if matches!(board.view(), RecipeView::Error { .. }) {
        std::process::exit(1);
    }
    Ok(())
}
