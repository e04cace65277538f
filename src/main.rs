use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vcs_graph::{GitWalker, GraphRenderer, HeadsFilter, TimeRangeFilter};

#[derive(Parser)]
#[command(name = "revgraph")]
#[command(about = "A commit graph viewer built on a layered graph view", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show recent commits
    Log {
        /// Path to the repository
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Number of commits to show
        #[arg(short, long, default_value = "10")]
        count: usize,
    },
    /// Render the commit graph
    Graph {
        /// Path to the repository
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Maximum number of commits to load
        #[arg(short, long)]
        limit: Option<usize>,
        /// Show only history reachable from a branch
        #[arg(long)]
        branch: Option<String>,
        /// Show only commits by authors matching a pattern
        #[arg(long)]
        author: Option<String>,
        /// Show only commits whose summary matches a pattern
        #[arg(long)]
        grep: Option<String>,
        /// Show only commits on or after a date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
        /// Show only commits on or before a date (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,
    },
    /// Show graph statistics
    Stats {
        /// Path to the repository
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Log { path, count } => {
            let walker = GitWalker::new(path.to_str())?;
            let loaded = walker.load(Some(count))?;
            let view = loaded.view();

            for v in 0..view.visible_count() {
                let id = view.commit_id_of(v);
                let detail = &loaded.details[view.permanent_index_of(v) as usize];

                println!("commit {}", &id[..id.len().min(8)]);
                println!("Author: {}", detail.author);
                println!(
                    "Date:   {}",
                    chrono::DateTime::from_timestamp(view.timestamp_of(v) / 1000, 0)
                        .map(|dt| dt.to_string())
                        .unwrap_or_default()
                );
                println!("\n    {}\n", detail.summary);
            }
        }
        Commands::Graph {
            path,
            limit,
            branch,
            author,
            grep,
            since,
            until,
        } => {
            let walker = GitWalker::new(path.to_str())?;
            let loaded = walker.load(limit)?;
            let mut nodes = loaded.nodes();

            if let Some(name) = branch {
                let heads = walker.branch_heads()?;
                let (_, oid) = heads
                    .iter()
                    .find(|(branch_name, _)| branch_name == &name)
                    .with_context(|| format!("Branch '{}' not found", name))?;
                let head = loaded.resolve(oid)?;
                HeadsFilter::new(vec![head])?.apply(&mut nodes);
            }

            if since.is_some() || until.is_some() {
                let since_ms = since.as_deref().map(day_start_millis).transpose()?;
                let until_ms = until.as_deref().map(day_end_millis).transpose()?;
                TimeRangeFilter::new(since_ms, until_ms).apply(&mut nodes, &loaded.commits);
            }

            if let Some(pattern) = author {
                nodes.retain(|node| loaded.details[node as usize].author.contains(&pattern));
            }
            if let Some(pattern) = grep {
                nodes.retain(|node| loaded.details[node as usize].summary.contains(&pattern));
            }

            let view = loaded.view_of(nodes);
            print!("{}", GraphRenderer::new().render(&view, &loaded.details));
        }
        Commands::Stats { path } => {
            let walker = GitWalker::new(path.to_str())?;
            let loaded = walker.load(None)?;
            let stats = loaded.graph.stats();

            println!("Repository statistics:");
            println!("  Total commits: {}", stats.total_commits);
            println!("  Total edges:   {}", stats.total_edges);
            println!("  Merge commits: {}", stats.merge_commits);
            println!("  Root commits:  {}", stats.root_commits);
            println!("  Branch heads:  {}", stats.head_commits);
        }
    }

    Ok(())
}

fn day_start_millis(date: &str) -> Result<i64> {
    Ok(parse_day(date)?
        .and_hms_opt(0, 0, 0)
        .context("Invalid time of day")?
        .and_utc()
        .timestamp_millis())
}

fn day_end_millis(date: &str) -> Result<i64> {
    Ok(parse_day(date)?
        .and_hms_opt(23, 59, 59)
        .context("Invalid time of day")?
        .and_utc()
        .timestamp_millis())
}

fn parse_day(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {}", date))
}
