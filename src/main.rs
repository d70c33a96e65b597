use chrono::Local;
use clap::Parser;
use memos::application::{init, manage_config::ConfigService, MemoListService, MemoStore};
use memos::cli::{format_memo_list, format_status, memo_views, Cli, Commands};
use memos::domain::MemoId;
use memos::error::Result;
use memos::infrastructure::{logging, Config, FileSystemRepository, MemosRepository};
use tracing::error;

fn main() {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path } => {
            logging::init(false);
            init::init(&path)
        }
        Commands::Create { date, text, json } => {
            let outcome = create_memo(&text.join(" "), &date);
            report(outcome, json, |id| println!("Created memo {}", id))
        }
        Commands::List { json } => list_memos(json),
        Commands::Remove { ids, index, json } => {
            let outcome = remove_memos(&ids, &index);
            report(outcome, json, |removed| {
                println!(
                    "Removed {} memo{}",
                    removed,
                    if removed == 1 { "" } else { "s" }
                )
            })
        }
        Commands::Config { key, value, list } => {
            let (repo, _) = open_session()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("collection = {}", config.collection);
                println!("debug = {}", config.debug);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: memos config [--list | <key> [<value>]]");
                println!("Valid keys: collection, debug, created");
                Ok(())
            }
        }
    }
}

/// Locate the memos root, load its config and start logging
fn open_session() -> Result<(FileSystemRepository, Config)> {
    let repo = FileSystemRepository::discover()?;
    let config = repo.load_config()?;
    logging::init(config.debug);
    Ok((repo, config))
}

/// In JSON mode failures become a `success: false` status; otherwise they propagate.
fn report<T>(outcome: Result<T>, json: bool, on_success: impl FnOnce(T)) -> Result<()> {
    match (outcome, json) {
        (Ok(value), false) => {
            on_success(value);
            Ok(())
        }
        (Err(e), false) => Err(e),
        (Ok(_), true) => {
            println!("{}", format_status(true));
            Ok(())
        }
        (Err(e), true) => {
            error!("{}", e);
            println!("{}", format_status(false));
            Ok(())
        }
    }
}

fn create_memo(text: &str, date: &str) -> Result<MemoId> {
    let (repo, config) = open_session()?;
    let mut memos = MemoStore::new(repo.open_store(&config)?);

    let id = memos.create(text, date)?;
    memos.into_inner().close()?;
    Ok(id)
}

fn remove_memos(ids: &[String], positions: &[usize]) -> Result<usize> {
    let (repo, config) = open_session()?;
    let mut memos = MemoStore::new(repo.open_store(&config)?);

    let mut targets: Vec<MemoId> = ids.iter().map(|id| MemoId::from(id.as_str())).collect();
    if !positions.is_empty() {
        targets.extend(MemoListService::new(&memos).resolve_positions(positions)?);
    }

    let removed = memos.delete_many(&targets)?;
    memos.into_inner().close()?;
    Ok(removed)
}

fn list_memos(json: bool) -> Result<()> {
    let (repo, config) = open_session()?;
    let memos = MemoStore::new(repo.open_store(&config)?);

    let sorted = MemoListService::new(&memos).list_sorted()?;
    let views = memo_views(&sorted, &Local::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        let output = format_memo_list(&views);
        if output.ends_with('\n') {
            print!("{}", output);
        } else {
            println!("{}", output);
        }
    }

    memos.into_inner().close()?;
    Ok(())
}

