use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use futures::StreamExt;

use moviedeck::config::Config;
use moviedeck::domain::{Catalog, CatalogUseCases};
use moviedeck::logging::init_tracing;
use moviedeck::screen::detail::{DetailHandler, DetailState, DetailViewModel};
use moviedeck::screen::home::{HomeAction, HomeHandler, HomeState, HomeViewModel, MovieList};

const BUILTIN_CATALOG: &str = include_str!("../fixtures/catalog.json");
const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Parser)]
#[command(name = "moviedeck", version, about = "Drive movie screens headlessly")]
struct Cli {
    /// Config file (default: ~/.config/moviedeck/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON catalog to serve instead of the configured or built-in one.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Simulated use-case latency in milliseconds.
    #[arg(long, global = true)]
    latency_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the home screen and page through both lists.
    Home {
        /// Number of pages to load per list.
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Search the loaded movies once paging is done.
        #[arg(long)]
        search: Option<String>,
    },
    /// Open the detail screen for one movie.
    Detail {
        movie_id: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(path) = cli.catalog.clone() {
        config.catalog.path = Some(path);
    }
    if let Some(latency_ms) = cli.latency_ms {
        config.catalog.latency_ms = latency_ms;
    }
    config.validate()?;
    init_tracing(&config.logging);

    let catalog = match &config.catalog.path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::from_json(BUILTIN_CATALOG)?,
    };
    let use_cases = CatalogUseCases::new(catalog, Duration::from_millis(config.catalog.latency_ms));

    match cli.command {
        Command::Home { pages, search } => run_home(&config, &use_cases, pages, search).await,
        Command::Detail { movie_id } => run_detail(&use_cases, movie_id).await,
    }
}

async fn run_home(
    config: &Config,
    use_cases: &CatalogUseCases,
    pages: u32,
    search: Option<String>,
) -> Result<()> {
    let handler = HomeHandler::new(Arc::new(use_cases.upcoming()), Arc::new(use_cases.popular()))
        .with_prefetch(config.home.prefetch);
    let vm = HomeViewModel::home(handler);
    print_events(vm.observe_events());

    let mut states = vm.observe_state();
    for page in 1..=pages.max(1) {
        // Failures seen before this round; prefetch failures count for page 1.
        let before = if page == 1 { (0, 0) } else { failure_counts(&vm.state()) };
        if page > 1 || !config.home.prefetch {
            vm.dispatch(HomeAction::FetchUpComingMovieList);
            vm.dispatch(HomeAction::FetchPopularMovieList);
        }
        wait_for(&mut states, |state| home_page_settled(state, page, before)).await?;
        print_home(&vm.state());
    }

    if let Some(keyword) = search.filter(|k| !k.trim().is_empty()) {
        vm.search_keyword(keyword.clone());
        wait_for(&mut states, |state| state.keyword.is_some()).await?;
        let state = vm.state();
        println!("search \"{}\":", keyword);
        for movie in state.search_results() {
            println!("  {}", title_of(movie.title.as_deref(), movie.id));
        }
    }

    vm.cancel();
    Ok(())
}

async fn run_detail(use_cases: &CatalogUseCases, movie_id: i32) -> Result<()> {
    let vm = DetailViewModel::detail(DetailHandler::new(Arc::new(use_cases.movie_detail())));
    print_events(vm.observe_events());

    let mut states = vm.observe_state();
    vm.fetch_movie_detail(movie_id);
    let state = wait_for(&mut states, |state: &DetailState| {
        state.target_movie.id == Some(movie_id) || state.load_state.is_failed()
    })
    .await?;

    if !state.load_state.is_failed() {
        let movie = &state.target_movie;
        println!("{}", title_of(movie.title.as_deref(), movie.id));
        if let Some(tagline) = &movie.tagline {
            println!("  \"{}\"", tagline);
        }
        if let Some(runtime) = movie.runtime {
            println!("  runtime: {} min", runtime);
        }
        let genres: Vec<&str> = movie
            .genres
            .iter()
            .flatten()
            .filter_map(|g| g.name.as_deref())
            .collect();
        if !genres.is_empty() {
            println!("  genres: {}", genres.join(", "));
        }
        println!("  recommended:");
        for rec in state.recommendations.items() {
            println!("    {}", title_of(rec.title.as_deref(), rec.id));
        }
    }

    vm.cancel();
    Ok(())
}

fn failure_counts(state: &HomeState) -> (u32, u32) {
    (state.upcoming.failures(), state.popular.failures())
}

/// Both lists either reached past `page` or failed since `before`.
fn home_page_settled(state: &HomeState, page: u32, before: (u32, u32)) -> bool {
    let (upcoming_failures, popular_failures) = failure_counts(state);
    (state.upcoming.page() > page || upcoming_failures > before.0)
        && (state.popular.page() > page || popular_failures > before.1)
}

async fn wait_for<S, P>(
    states: &mut futures::stream::BoxStream<'static, S>,
    mut done: P,
) -> Result<S>
where
    P: FnMut(&S) -> bool,
{
    let settle = async {
        while let Some(state) = states.next().await {
            if done(&state) {
                return Some(state);
            }
        }
        None
    };
    tokio::time::timeout(SETTLE_TIMEOUT, settle)
        .await
        .context("timed out waiting for screen state")?
        .context("view model closed before settling")
}

fn print_events<E>(mut events: moviedeck::events::EventStream<E>)
where
    E: std::fmt::Debug + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(event) = events.next().await {
            eprintln!("! {:?}", event);
        }
    });
}

fn print_home(state: &HomeState) {
    for list in [MovieList::UpComing, MovieList::Popular] {
        let movies = state.list(list);
        println!("{} (next page {}):", list, movies.page());
        for movie in movies.items() {
            println!("  {}", title_of(movie.title.as_deref(), movie.id));
        }
    }
}

fn title_of(title: Option<&str>, id: Option<i32>) -> String {
    match (title, id) {
        (Some(title), Some(id)) => format!("{} [{}]", title, id),
        (Some(title), None) => title.to_string(),
        (None, Some(id)) => format!("#{}", id),
        (None, None) => "(untitled)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::from_json(BUILTIN_CATALOG).unwrap();
        assert!(!catalog.upcoming.is_empty());
        assert!(!catalog.popular.is_empty());
    }

    #[test]
    fn cli_parses_home_with_pages() {
        let cli = Cli::parse_from(["moviedeck", "home", "--pages", "3"]);
        assert!(matches!(cli.command, Command::Home { pages: 3, search: None }));
    }

    #[test]
    fn cli_parses_detail_with_global_flags() {
        let cli = Cli::parse_from(["moviedeck", "--latency-ms", "50", "detail", "42"]);
        assert_eq!(cli.latency_ms, Some(50));
        assert!(matches!(cli.command, Command::Detail { movie_id: 42 }));
    }

    #[test]
    fn title_falls_back_to_id() {
        assert_eq!(title_of(None, Some(7)), "#7");
        assert_eq!(title_of(Some("Heat"), Some(949)), "Heat [949]");
    }
}
