use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use release_board::backend::BackendClient;
use release_board::config::{AppConfig, loader};
use release_board::engine::{BackendEngine, Engine, EngineHandle, Event, Request};
use release_board::persist::{self, FileStore, MemoryStore, StateStore};
use release_board::reference::Typeahead;
use release_board::render::render_table;
use release_board::types::{Dimension, PrCategory, RefKind};
use release_board::views::{Dashboard, DashboardConfig, TabPanel};

#[derive(Parser)]
#[command(name = "release-board", version, about = "Browse PRs, releases and release tags")]
struct Cli {
    /// Path to config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging to debug.log.
    #[arg(long, global = true)]
    debug: bool,

    /// Do not read or write persisted view state.
    #[arg(long, global = true)]
    no_state: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Releases published by one user.
    Releases {
        /// Username whose releases are listed.
        #[arg(short, long)]
        user: Option<String>,
        #[command(flatten)]
        filters: Filters,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// All pull requests, filtered by the server.
    Prs {
        #[arg(short, long)]
        user: Option<String>,
        #[command(flatten)]
        filters: PrFilters,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Repositories carrying a release tag.
    Tags {
        /// Release tag to look up; an empty value resets the dashboard.
        tag: Option<String>,
        #[arg(long)]
        repo: Option<String>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// One per-user PR category, loaded page by page.
    Category {
        /// created, assigned, review-requested or reviewed.
        category: PrCategory,
        #[arg(short, long, default_value = "")]
        user: String,
        /// How many pages to load.
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Print suggestions from a reference list.
    Suggest {
        /// users, repos or tags.
        kind: RefKind,
        /// Text to match (case-insensitive substring).
        #[arg(default_value = "")]
        query: String,
        /// Maximum number of suggestions.
        #[arg(long, default_value_t = release_board::reference::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Forget the persisted state of one dashboard (or all of them).
    Reset {
        /// releases, prs or tags; omit for all.
        dashboard: Option<String>,
    },
}

#[derive(Args)]
struct Filters {
    #[arg(long)]
    repo: Option<String>,
    #[arg(long)]
    author: Option<String>,
    /// Inclusive lower bound on `created_at` (YYYY-MM-DD or RFC 3339).
    #[arg(long)]
    from: Option<String>,
    /// Inclusive upper bound on `created_at`.
    #[arg(long)]
    to: Option<String>,
}

impl Filters {
    fn criteria(&self) -> Vec<(Dimension, &str)> {
        [
            (Dimension::Repo, &self.repo),
            (Dimension::Author, &self.author),
            (Dimension::DateFrom, &self.from),
            (Dimension::DateTo, &self.to),
        ]
        .into_iter()
        .filter_map(|(d, v)| v.as_deref().map(|v| (d, v)))
        .collect()
    }
}

/// The filters `/prs/all` evaluates server-side.
#[derive(Args)]
struct PrFilters {
    #[arg(long)]
    repo: Option<String>,
    /// Inclusive lower bound on `created_at` (YYYY-MM-DD).
    #[arg(long)]
    from: Option<String>,
    /// Inclusive upper bound on `created_at`.
    #[arg(long)]
    to: Option<String>,
}

impl PrFilters {
    fn criteria(&self) -> Vec<(Dimension, &str)> {
        [
            (Dimension::Repo, &self.repo),
            (Dimension::DateFrom, &self.from),
            (Dimension::DateTo, &self.to),
        ]
        .into_iter()
        .filter_map(|(d, v)| v.as_deref().map(|v| (d, v)))
        .collect()
    }
}

#[derive(Args)]
struct ViewArgs {
    /// Sort by FIELD; repeat to toggle the direction.
    #[arg(long = "sort", value_name = "FIELD")]
    sort: Vec<String>,
    #[arg(long)]
    page: Option<u32>,
    /// Table width in columns.
    #[arg(long, default_value_t = 120)]
    width: u16,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing.
    if cli.debug {
        let file = std::fs::File::create("debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    // Load config.
    let config = loader::load_config(cli.config.as_deref())?;
    let store = open_store(&config, cli.no_state);

    let timeout = Duration::from_secs(config.backend.timeout_secs.max(1));

    // Start the backend engine in a dedicated OS thread (owns its own Tokio
    // runtime). Dropping the handle at the end of `main` closes the sender
    // channel, signalling the engine to shut down.
    let start_engine = || -> Result<EngineHandle> {
        let client = BackendClient::new(&config.backend.base_url, timeout)?;
        tracing::info!("release-board starting against {}", client.base_url());
        Ok(BackendEngine::new(client).start())
    };

    let persist_raw = config.state.persist_raw;
    let date_format = config.defaults.date_format.as_str();

    match cli.command {
        Commands::Releases { user, filters, view } => {
            let cfg = DashboardConfig::releases(&config.defaults, persist_raw);
            let mut board = Dashboard::open(cfg, start_engine()?, store);
            if let Some(user) = user {
                board.type_search(&user);
                board.submit();
                wait(&mut board, timeout)?;
            }
            for (d, v) in filters.criteria() {
                board.set_criterion(d, v);
            }
            finish(&mut board, &view, timeout)?;
            print_board(&board, date_format, view.width);
        }
        Commands::Prs { user, filters, view } => {
            let cfg = DashboardConfig::prs(&config.defaults);
            let mut board = Dashboard::open(cfg, start_engine()?, store);
            for (d, v) in filters.criteria() {
                board.set_criterion(d, v);
            }
            if let Some(user) = user {
                board.set_criterion(Dimension::Username, &user);
            }
            if board.view().is_dirty() || !board.view().is_loaded() {
                board.refetch();
                wait(&mut board, timeout)?;
            }
            finish(&mut board, &view, timeout)?;
            print_board(&board, date_format, view.width);
        }
        Commands::Tags { tag, repo, view } => {
            let cfg = DashboardConfig::release_tags(&config.defaults, persist_raw);
            let mut board = Dashboard::open(cfg, start_engine()?, store);
            if let Some(tag) = tag {
                board.type_search(&tag);
                board.submit();
                wait(&mut board, timeout)?;
            }
            if let Some(repo) = repo {
                board.set_criterion(Dimension::Repo, &repo);
            }
            finish(&mut board, &view, timeout)?;
            print_board(&board, date_format, view.width);
        }
        Commands::Category {
            category,
            user,
            pages,
        } => {
            run_category(&start_engine()?, category, &user, pages, &config, timeout)?;
        }
        Commands::Suggest { kind, query, limit } => {
            let engine = start_engine()?;
            let (reply_tx, reply_rx) = std::sync::mpsc::channel();
            engine.send(Request::FetchReference { kind, reply_tx });
            let event = reply_rx
                .recv_timeout(timeout)
                .context("waiting for reference list")?;
            if let Event::ReferenceFetched { values, .. } = event {
                let ta = Typeahead::new(kind).with_input(query).with_limit(limit);
                for value in ta.suggestions(&values) {
                    println!("{value}");
                }
            }
        }
        Commands::Reset { dashboard } => reset(store, dashboard.as_deref())?,
    }

    Ok(())
}

fn open_store(config: &AppConfig, no_state: bool) -> Box<dyn StateStore> {
    if no_state {
        return Box::new(MemoryStore::new());
    }
    match loader::state_path(config) {
        Some(path) => {
            let store = FileStore::open(path);
            tracing::debug!("state: using {}", store.path().display());
            Box::new(store)
        }
        None => Box::new(MemoryStore::new()),
    }
}

fn reset(mut store: Box<dyn StateStore>, dashboard: Option<&str>) -> Result<()> {
    let ids = match dashboard {
        Some(id @ ("releases" | "prs" | "tags")) => vec![id],
        Some(other) => bail!("unknown dashboard {other:?} (expected releases, prs, or tags)"),
        None => vec!["releases", "prs", "tags"],
    };
    for id in ids {
        persist::clear(&mut store, id);
        println!("reset {id}");
    }
    Ok(())
}

fn wait<S: StateStore>(board: &mut Dashboard<S>, timeout: Duration) -> Result<()> {
    if !board.wait_idle(timeout) {
        bail!("backend did not answer within {}s", timeout.as_secs());
    }
    Ok(())
}

/// Apply sort and page flags, fetching when nothing is shown yet.
fn finish<S: StateStore>(board: &mut Dashboard<S>, args: &ViewArgs, timeout: Duration) -> Result<()> {
    board.ensure_loaded();
    wait(board, timeout)?;
    for field in &args.sort {
        if !board.set_sort(field) {
            eprintln!("warning: cannot sort by {field:?}");
        }
    }
    if let Some(page) = args.page {
        board.goto_page(page);
        wait(board, timeout)?;
    }
    Ok(())
}

fn print_board<S: StateStore>(board: &Dashboard<S>, date_format: &str, width: u16) {
    if let Some(err) = board.last_error() {
        eprintln!("error: {err}");
    }
    print!(
        "{}",
        render_table(&board.config().columns, board.displayed(), date_format, width)
    );
    let window = board.window();
    let mut links: Vec<String> = window
        .pages
        .clone()
        .map(|p| {
            if p == board.view().page() {
                format!("[{p}]")
            } else {
                p.to_string()
            }
        })
        .collect();
    if window.leading_gap {
        links.insert(0, "…".to_owned());
    }
    if window.trailing_gap {
        links.push("…".to_owned());
    }
    println!("{}  {}", board.summary(), links.join(" "));
}

fn run_category(
    engine: &EngineHandle,
    category: PrCategory,
    user: &str,
    pages: u32,
    config: &AppConfig,
    timeout: Duration,
) -> Result<()> {
    let mut panel = TabPanel::new(category, config.defaults.category_per_page);
    panel.set_username(user);
    let (reply_tx, reply_rx) = std::sync::mpsc::channel();

    for _ in 0..pages.max(1) {
        let Some((generation, query)) = panel.load_more() else {
            break;
        };
        let page = query.page().unwrap_or(1);
        engine.send(Request::FetchRecords {
            dashboard: panel.id().to_owned(),
            attempt: generation,
            query,
            reply_tx: reply_tx.clone(),
        });
        let event = reply_rx
            .recv_timeout(timeout)
            .with_context(|| format!("waiting for page {page} of {category}"))?;
        panel.handle_event(event, page);
        if let Some(err) = panel.error() {
            bail!("loading {} failed: {err}", category.label());
        }
    }

    let columns = DashboardConfig::prs(&config.defaults).columns;
    print!(
        "{}",
        render_table(&columns, panel.items(), &config.defaults.date_format, 120)
    );
    println!("{}: {}", category.label(), panel.summary());
    Ok(())
}
