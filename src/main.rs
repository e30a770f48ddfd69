use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use homedir::my_home;
use noteseek::{
    analytics, config::Config, export::export_search_results, parse_tags, search::SearchFilter,
    store::BackendLocal, SearchContext, Snapshot,
};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Command, HistoryAction};

fn base_path() -> anyhow::Result<String> {
    if let Ok(path) = std::env::var("NOTESEEK_BASE_PATH") {
        return Ok(path);
    }

    let home = my_home()
        .ok()
        .flatten()
        .context("couldnt find home dir")?;
    Ok(format!("{}/.local/share/noteseek", home.to_string_lossy()))
}

fn load_snapshot(args: &cli::SnapshotArgs) -> anyhow::Result<Snapshot> {
    Snapshot::load(&args.notes).with_context(|| format!("reading {}", args.notes.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let base_path = base_path()?;
    let config = Config::load_with(&base_path).context("loading config")?;
    tracing::debug!(%base_path, match_mode = ?config.match_mode, "config loaded");
    let store = Arc::new(BackendLocal::new(&base_path)?);
    let ctx = SearchContext::new(config, store);

    match args.command {
        Command::Search {
            snapshot,
            query,
            folders,
            subfolders,
            tags,
            from,
            to,
            favorite,
            archived,
            sort,
            order,
            limit,
            format,
            count,
            no_history,
        } => {
            let snapshot = load_snapshot(&snapshot)?;

            let filter = SearchFilter {
                query: query.unwrap_or_default(),
                folder_ids: folders,
                include_subfolders: subfolders,
                tags: tags.map(parse_tags).unwrap_or_default(),
                date_from: from,
                date_to: to,
                is_favorite: favorite,
                is_archived: archived,
                sort_by: sort.unwrap_or(ctx.config().default_sort),
                sort_order: order,
                limit,
            };

            let results = if no_history {
                ctx.search(&snapshot.notes, &filter, &snapshot.folders)
            } else {
                ctx.search_and_record(&snapshot.notes, &filter, &snapshot.folders)?
            };

            if count {
                println!("{} notes found", results.len());
                return Ok(());
            }

            println!("{}", export_search_results(&results, format)?);
            Ok(())
        }

        Command::Suggest { snapshot, query } => {
            let snapshot = load_snapshot(&snapshot)?;
            let suggestions = ctx.suggestions(
                &query.unwrap_or_default(),
                &snapshot.notes,
                &snapshot.folders,
            )?;
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
            Ok(())
        }

        Command::Tags { snapshot, limit } => {
            let snapshot = load_snapshot(&snapshot)?;
            let top = ctx.top_tags(&snapshot.notes, limit);
            println!("{}", serde_json::to_string_pretty(&top)?);
            Ok(())
        }

        Command::Stats { snapshot } => {
            let snapshot = load_snapshot(&snapshot)?;
            let overview = analytics::overview(&snapshot.notes, &snapshot.folders);
            println!("{}", serde_json::to_string_pretty(&overview)?);
            Ok(())
        }

        Command::History { action } => {
            match action {
                HistoryAction::List {} => {
                    for query in ctx.history().get_search_history()? {
                        println!("{query}");
                    }
                }
                HistoryAction::Clear {} => {
                    ctx.history().clear_search_history()?;
                    println!("search history cleared");
                }
            }
            Ok(())
        }
    }
}
