use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::InquireError;
use std::sync::Arc;

use getweath_core::{
    Config, FileStore, KeyValueStore, LocationHistory, MemoryStore, Notifier, NullNotifier,
    WeatherSession, WttrProvider,
    store::KEY_LAST_VISITED,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "getweath", version, about = "Weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a location (defaults to the last one searched).
    Show {
        /// City name or formatted place name.
        location: Option<String>,
    },

    /// List or clear recently searched locations.
    History {
        /// Forget all recent searches.
        #[arg(long)]
        clear: bool,
    },

    /// Print place-name suggestions for a partial search.
    Suggest {
        /// Partial location text, at least three characters.
        text: String,
    },

    /// Store the Geoapify API key used for search suggestions.
    Configure,

    /// Interactive search loop (the default when no command is given).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Show { location } => show(location).await,
            Command::History { clear } => history(clear),
            Command::Suggest { text } => suggest(&text).await,
            Command::Configure => configure(),
            Command::Interactive => interactive().await,
        }
    }
}

/// Failure toasts go to stderr so they never interleave with the report.
#[derive(Debug, Default)]
struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str) {
        eprintln!("⚠  {message}");
    }
}

fn open_store() -> Arc<dyn KeyValueStore> {
    match FileStore::open_default() {
        Ok(store) => Arc::new(store),
        Err(err) => {
            tracing::warn!(%err, "no data directory; state will not persist");
            Arc::new(MemoryStore::default())
        }
    }
}

fn load_config() -> Config {
    Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "could not load config; continuing without it");
        Config::default()
    })
}

fn build_session(notifier: Arc<dyn Notifier>) -> WeatherSession {
    let config = load_config();
    let provider = Arc::new(WttrProvider::new(config.geoapify_api_key));
    WeatherSession::new(provider, open_store(), notifier)
}

async fn show(location: Option<String>) -> anyhow::Result<()> {
    let mut session = build_session(Arc::new(ToastNotifier));

    let ticket = match location.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        Some(location) => session.set_active_location(location),
        None => session.restore_active_location(),
    };

    let Some(ticket) = ticket else {
        anyhow::bail!(
            "No location given and none remembered.\n\
             Hint: run `getweath show <location>` first."
        );
    };

    let outcome = session.fetch(&ticket).await;
    session.apply(ticket, outcome);

    println!("{}", render::clock_header());
    println!();
    println!("{}", render::report(session.state()));

    if session.state().last_error.is_some() {
        anyhow::bail!("weather fetch did not succeed");
    }

    Ok(())
}

fn history(clear: bool) -> anyhow::Result<()> {
    let store = open_store();
    let history = LocationHistory::restore(store.get(KEY_LAST_VISITED).as_deref());

    if clear {
        store.set(KEY_LAST_VISITED, &history.clear().serialize());
        println!("Search history cleared.");
        return Ok(());
    }

    if history.is_empty() {
        println!("No recent searches");
        return Ok(());
    }

    for (i, entry) in history.entries().iter().enumerate() {
        println!("{}. {entry}", i + 1);
    }

    Ok(())
}

async fn suggest(text: &str) -> anyhow::Result<()> {
    let text = text.trim();
    if text.chars().count() <= 2 {
        println!("Type at least three characters to get suggestions.");
        return Ok(());
    }

    let config = load_config();
    if !config.has_geoapify_key() {
        anyhow::bail!(
            "No Geoapify API key configured.\n\
             Hint: run `getweath configure` and enter your API key."
        );
    }

    // No fetch happens here, so there is nothing to toast about.
    let session = build_session(Arc::new(NullNotifier));
    let suggestions = session.suggestions_for(text).await;

    if suggestions.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }

    for suggestion in suggestions {
        println!("{suggestion}");
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = load_config();

    let key = inquire::Text::new("Geoapify API key:")
        .with_help_message("Used for search suggestions; leave empty to remove")
        .prompt()
        .context("Failed to read API key")?;

    config.set_geoapify_api_key(key.trim().to_string());
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Cities offered up-front, mirroring the app's "Explore Places" panel.
const DEFAULT_CITIES: [(&str, &str); 9] = [
    ("🌞", "Lucknow"),
    ("🌤️", "Delhi"),
    ("🌦️", "Bangalore"),
    ("🌧️", "Mumbai"),
    ("🌦️", "London"),
    ("🗽", "New York"),
    ("🗼", "Paris"),
    ("🗾", "Tokyo"),
    ("🌇", "Dubai"),
];

const SEARCH_CHOICE: &str = "Search location…";
const CLEAR_CHOICE: &str = "Clear history";
const QUIT_CHOICE: &str = "Quit";

async fn interactive() -> anyhow::Result<()> {
    let mut session = build_session(Arc::new(ToastNotifier));

    // Pick up where the last run left off.
    if let Some(ticket) = session.restore_active_location() {
        let outcome = session.fetch(&ticket).await;
        session.apply(ticket, outcome);
    }

    loop {
        println!();
        println!("{}", render::clock_header());
        println!();
        println!("{}", render::report(session.state()));

        let mut options: Vec<String> = vec![SEARCH_CHOICE.to_string()];
        options.extend(DEFAULT_CITIES.iter().map(|(icon, name)| format!("{icon} {name}")));
        options.extend(session.history().entries().iter().map(|e| format!("↻ {e}")));
        if !session.history().is_empty() {
            options.push(CLEAR_CHOICE.to_string());
        }
        options.push(QUIT_CHOICE.to_string());

        let choice = match inquire::Select::new("Explore places", options).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Selection prompt failed"),
        };

        match choice.as_str() {
            QUIT_CHOICE => break,
            CLEAR_CHOICE => session.clear_history(),
            SEARCH_CHOICE => {
                if let Some(location) = prompt_search(&session).await? {
                    session.submit(&location).await;
                }
            }
            other => {
                // Strip the icon prefix added when building the menu.
                let location = other.split_once(' ').map_or(other, |(_, name)| name);
                session.submit(location).await;
            }
        }
    }

    Ok(())
}

/// Free-form search with provider-backed suggestions when the input is long
/// enough. Returns `None` when the user backs out.
async fn prompt_search(session: &WeatherSession) -> anyhow::Result<Option<String>> {
    let input = match inquire::Text::new("Search location:").prompt() {
        Ok(input) => input,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Ok(None);
        }
        Err(err) => return Err(err).context("Search prompt failed"),
    };

    let input = input.trim().to_string();
    if input.is_empty() {
        return Ok(None);
    }

    let suggestions = session.suggestions_for(&input).await;
    if suggestions.is_empty() {
        return Ok(Some(input));
    }

    let as_typed = format!("Use \"{input}\" as typed");
    let mut options = vec![as_typed.clone()];
    options.extend(suggestions);

    match inquire::Select::new("Did you mean", options).prompt() {
        Ok(choice) if choice == as_typed => Ok(Some(input)),
        Ok(choice) => Ok(Some(choice)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Suggestion prompt failed"),
    }
}
