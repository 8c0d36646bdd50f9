use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use github_aid::{
    api::query::create_recursive_query,
    config::{self, Settings},
    format::human_readable_bytesize,
    path::{is_repository_content_page, parse_repo_entry_path},
    preview::Previewer,
    ApiMethod,
};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

/// Show folder sizes and disk usage of GitHub repositories
#[derive(Parser)]
#[command(name = "github-aid", version)]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API to query, overriding the settings file
    #[arg(long, global = true)]
    method: Option<ApiMethod>,

    /// Directory levels folded into each entry's size
    #[arg(long, global = true)]
    depth: Option<u32>,

    /// GitHub access token
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the size of every entry in the folder shown at each URL
    Sizes {
        #[arg(required = true)]
        urls: Vec<Url>,
    },

    /// Print the disk usage of the repository at each URL
    Diskspace {
        #[arg(required = true)]
        urls: Vec<Url>,
    },

    /// Print the GraphQL query used for a recursion depth
    Query { depth: u32 },
}

fn load_settings(cli: &Cli) -> github_aid::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(method) = cli.method {
        settings.api_method = method;
    }
    if let Some(depth) = cli.depth {
        settings.recursion_limit = depth;
    }
    if let Some(token) = &cli.token {
        settings.github_token = Some(token.clone());
    }
    Ok(settings.with_env())
}

/// Only repository content pages have folders to measure.
fn check_page(url: &Url) -> bool {
    match parse_repo_entry_path(url) {
        Some(entry) if is_repository_content_page(&entry) => true,
        _ => {
            println!("✗ {} is not a repository content page", url);
            false
        }
    }
}

async fn run_sizes(previewer: &Previewer, urls: &[Url]) -> bool {
    let mut all_ok = true;
    for url in urls {
        if !check_page(url) {
            all_ok = false;
            continue;
        }
        match previewer.preview_sizes(url).await {
            Ok(preview) => {
                let folder = if preview.folder.is_empty() { "/" } else { &preview.folder };
                println!("✓ {} ({:?} API)", folder, preview.method);
                for entry in &preview.entries {
                    println!("  {:>12}  {}", human_readable_bytesize(entry.size), entry.name);
                }
            }
            Err(e) => {
                println!("✗ Error fetching sizes for {}: {}", url, e);
                all_ok = false;
            }
        }
    }
    all_ok
}

async fn run_diskspace(previewer: &Previewer, urls: &[Url]) -> bool {
    let mut all_ok = true;
    for url in urls {
        match previewer.preview_diskspace(url).await {
            Ok(bytes) => println!("✓ {}: {}", url, human_readable_bytesize(bytes)),
            Err(e) => {
                println!("✗ Error fetching diskspace for {}: {}", url, e);
                all_ok = false;
            }
        }
    }
    all_ok
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_env("GITHUB_AID_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    if let Commands::Query { depth } = &cli.command {
        println!("{}", create_recursive_query(config::clamp_recursion_depth(*depth)));
        return ExitCode::SUCCESS;
    }

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(token) = &settings.github_token {
        if !config::token_has_expected_length(token) {
            println!(
                "Warning: GitHub access tokens are {} characters long, the provided one has {}",
                config::TOKEN_LENGTH,
                token.len()
            );
        }
    } else if settings.api_method == ApiMethod::GraphQL {
        println!("Warning: the GraphQL API needs an access token. Set GITHUB_TOKEN or pass --token.");
    }

    let previewer = Previewer::new(settings);
    let ok = match &cli.command {
        Commands::Sizes { urls } => run_sizes(&previewer, urls).await,
        Commands::Diskspace { urls } => run_diskspace(&previewer, urls).await,
        Commands::Query { .. } => true,
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
