use clap::Parser;

use feedmerge::cli::{Cli, Commands};
use feedmerge::config::Config;
use feedmerge::domain::{CacheState, FeedItem, NewBlog};
use feedmerge::errors::{FeedError, FeedResult};
use feedmerge::services::{FeedService, FeedSnapshot};
use feedmerge::sources::GitHubRefresher;
use feedmerge::storage::sqlite::{
    SqliteBlogRepository, SqlitePublicRepoRepository, SqliteStorage,
};

type Service = FeedService<
    SqlitePublicRepoRepository,
    SqliteBlogRepository,
    GitHubRefresher<SqlitePublicRepoRepository>,
>;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> FeedResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize storage
    let storage = SqliteStorage::new(&config.db_path)?;
    let refresher = GitHubRefresher::new(
        &config,
        SqlitePublicRepoRepository::new(storage.clone()),
    )?;
    let service = FeedService::new(
        SqlitePublicRepoRepository::new(storage.clone()),
        SqliteBlogRepository::new(storage),
        refresher,
    );

    let cache = service.load_cache_state(config.cache_interval_secs)?;

    match cli.command {
        Commands::Top { k, json } => cmd_top(&service, &cache, k.unwrap_or(config.top_k), json),
        Commands::Repos { json } => cmd_repos(&service, &cache, json),
        Commands::Blogs { json } => cmd_blogs(&service, json),
        Commands::AddBlog {
            title,
            description,
            url,
            image_url,
        } => cmd_add_blog(
            &service,
            NewBlog::new(title, description, url).with_image_url(image_url),
        ),
        Commands::Refresh => cmd_refresh(&service, &cache),
    }
}

fn cmd_top(service: &Service, cache: &CacheState, k: usize, json: bool) -> FeedResult<()> {
    let snapshot = service.get_top_k(cache, k)?;
    warn_on_refresh_error(&snapshot);

    if json {
        return print_json(&snapshot.items);
    }

    if snapshot.items.is_empty() {
        println!("Nothing to show yet.");
        return Ok(());
    }

    println!("Latest {} items:\n", snapshot.items.len());
    for item in &snapshot.items {
        print_item(item);
    }

    Ok(())
}

fn cmd_repos(service: &Service, cache: &CacheState, json: bool) -> FeedResult<()> {
    let snapshot = service.get_public_repos_with_cache_info(cache)?;
    warn_on_refresh_error(&snapshot);

    if json {
        return print_json(&serde_json::json!({
            "last_refreshed": snapshot.last_refreshed,
            "repos": snapshot.items,
        }));
    }

    println!("Last refreshed: {}\n", snapshot.last_refreshed);
    if snapshot.items.is_empty() {
        println!("No repositories cached.");
        return Ok(());
    }

    for item in &snapshot.items {
        print_item(item);
    }

    Ok(())
}

fn cmd_blogs(service: &Service, json: bool) -> FeedResult<()> {
    let blogs = service.list_blogs()?;

    if json {
        return print_json(&blogs);
    }

    if blogs.is_empty() {
        println!("No blog posts.");
        return Ok(());
    }

    for item in &blogs {
        print_item(item);
    }

    Ok(())
}

fn cmd_add_blog(service: &Service, blog: NewBlog) -> FeedResult<()> {
    match service.add_blog(&blog) {
        Ok(id) => {
            println!("Blog post added (id {}): {}", id, blog.title);
            Ok(())
        }
        Err(FeedError::ConstraintViolation(_)) => {
            println!("Blog post already exists: {}", blog.url);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn cmd_refresh(service: &Service, cache: &CacheState) -> FeedResult<()> {
    println!("Refreshing repositories...");

    let snapshot = service.force_refresh(cache)?;
    match snapshot.refresh_error {
        Some(e) => Err(e),
        None => {
            println!("Cached {} repositories.", snapshot.items.len());
            Ok(())
        }
    }
}

fn warn_on_refresh_error(snapshot: &FeedSnapshot) {
    if let Some(e) = &snapshot.refresh_error {
        eprintln!(
            "Warning: {} (showing data cached at {})",
            e, snapshot.last_refreshed
        );
    }
}

fn print_item(item: &FeedItem) {
    let timestamp = item.get_str("timestamp").unwrap_or("undated");
    println!("  [{}] {} ({})", item.source, item.label(), timestamp);
    if let Some(url) = item.get_str("url") {
        println!("    {}", url);
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> FeedResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
