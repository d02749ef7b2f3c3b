use admin_core::{config::Config, EntityKind, Query, QueryEngine, Record};
use admin_store::{
    read_payload, watch_all, FileSource, LocalStore, RecordSource, StoreSource,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "legacy-admin",
    about = "Search, filter and sort the admin record collections"
)]
struct Cli {
    /// Write debug logs to /tmp/legacy-admin-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Store directory; overrides `[store] dir` from the config file.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Open the interactive console (the default).
    Tui,
    /// Evaluate one query and print the matching records as JSON.
    Query {
        #[arg(long, short)]
        entity: EntityKind,
        /// Case-insensitive substring over the entity's searchable fields.
        #[arg(long, short, default_value = "")]
        search: String,
        /// `field=value`; repeatable. `field=any` clears a filter.
        #[arg(long, short)]
        filter: Vec<String>,
        /// Sort strategy key or label, e.g. `most-deals`.
        #[arg(long)]
        sort: Option<String>,
        /// Read records from a payload file instead of the store.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Copy a payload file into the store, replacing the collection.
    Import {
        #[arg(long, short)]
        entity: EntityKind,
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/legacy-admin-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("legacy-admin debug log started — tail -f /tmp/legacy-admin-debug.log");
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::defaults()
    });
    let store_dir = cli.store.clone().unwrap_or_else(|| config.store.resolved_dir());
    let store = LocalStore::open(&store_dir)
        .with_context(|| format!("opening store at {}", store_dir.display()))?;

    match cli.command.unwrap_or(Cmd::Tui) {
        Cmd::Tui => run_tui(store, config),
        Cmd::Query {
            entity,
            search,
            filter,
            sort,
            file,
        } => {
            let source: Box<dyn RecordSource> = match file {
                Some(path) => Box::new(FileSource::new(path, entity)),
                None => Box::new(StoreSource::new(store, entity)),
            };
            let records = source.load()?;
            let view = run_query(entity, &records, &search, &filter, sort.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(())
        }
        Cmd::Import { entity, file } => {
            let count = run_import(&store, entity, &file)?;
            eprintln!("imported {count} {entity}");
            Ok(())
        }
    }
}

/// Build a [`Query`] from command-line pieces, validating filter fields and
/// sort names against the entity, and evaluate it.
fn run_query(
    entity: EntityKind,
    records: &[Record],
    search: &str,
    filters: &[String],
    sort: Option<&str>,
) -> anyhow::Result<Vec<Record>> {
    let engine = QueryEngine::for_kind(entity);
    let descriptor = engine.descriptor();

    let mut query = Query::new().search(search);
    for expr in filters {
        let (field, value) = descriptor.parse_filter(expr)?;
        query.filters.insert(field, value);
    }
    if let Some(name) = sort {
        query.sort = descriptor.parse_sort(name)?;
    }

    Ok(engine.evaluate(records, &query))
}

/// Replace `entity`'s collection in the store with the payload in `file`.
fn run_import(store: &LocalStore, entity: EntityKind, file: &Path) -> anyhow::Result<usize> {
    let records = read_payload(file, entity)
        .with_context(|| format!("reading payload {}", file.display()))?;
    store.save_records(entity, &records)?;
    tracing::info!(%entity, count = records.len(), "imported");
    Ok(records.len())
}

fn run_tui(store: LocalStore, config: Config) -> anyhow::Result<()> {
    let collections = EntityKind::ALL
        .iter()
        .map(|&kind| Ok((kind, store.load_records(kind)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let (updates, _handles) = watch_all(&store, &EntityKind::ALL, config.store.poll_interval())?;
    let (tx, feed) = mpsc::unbounded_channel();
    runtime.spawn(async move {
        let mut updates = updates;
        while let Some(update) = updates.recv().await {
            if tx.send((update.kind, update.records)).is_err() {
                break;
            }
        }
    });

    admin_tui::run(collections, config, Some(feed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn brokers() -> Vec<Record> {
        [
            json!({"id": 1, "name": "Rohit Mehta", "status": "Active", "successfulDeals": 5}),
            json!({"id": 2, "name": "Kavita Desai", "status": "Active", "successfulDeals": 10}),
            json!({"id": 3, "name": "Neha Kapoor", "status": "Inactive", "successfulDeals": 1}),
        ]
        .into_iter()
        .map(|v| Record::try_from(v).unwrap())
        .collect()
    }

    fn names(view: &[Record]) -> Vec<&str> {
        view.iter()
            .map(|r| r.get("name").and_then(Value::as_str).unwrap_or("?"))
            .collect()
    }

    #[test]
    fn query_applies_filter_and_sort() {
        let view = run_query(
            EntityKind::Brokers,
            &brokers(),
            "",
            &["status=Active".to_string()],
            Some("most-deals"),
        )
        .unwrap();
        assert_eq!(names(&view), ["Kavita Desai", "Rohit Mehta"]);

        let printed: Value = serde_json::from_str(&serde_json::to_string_pretty(&view).unwrap()).unwrap();
        assert_eq!(printed[0]["name"], "Kavita Desai");
    }

    #[test]
    fn query_search_and_any_filter() {
        let view = run_query(
            EntityKind::Brokers,
            &brokers(),
            "  NEHA ",
            &["status=any".to_string()],
            None,
        )
        .unwrap();
        assert_eq!(names(&view), ["Neha Kapoor"]);
    }

    #[test]
    fn query_rejects_unknown_field_and_sort() {
        let unknown_field = run_query(EntityKind::Brokers, &brokers(), "", &["rating=5".to_string()], None);
        assert!(unknown_field.is_err());

        let unknown_sort = run_query(EntityKind::Brokers, &brokers(), "", &[], Some("cheapest"));
        assert!(unknown_sort.is_err());
    }

    #[test]
    fn import_round_trips_through_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store")).unwrap();
        let payload = dir.path().join("brokers.json");
        let data: Vec<Value> = brokers().into_iter().map(Record::into_value).collect();
        std::fs::write(&payload, json!({"success": true, "data": data}).to_string()).unwrap();

        let count = run_import(&store, EntityKind::Brokers, &payload).unwrap();
        assert_eq!(count, 3);
        assert_eq!(store.load_records(EntityKind::Brokers).unwrap(), brokers());
        assert!(store.load_records(EntityKind::Users).unwrap().is_empty());
    }

    #[test]
    fn import_of_missing_file_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        store.save_records(EntityKind::Brokers, &brokers()).unwrap();

        assert!(run_import(&store, EntityKind::Brokers, &dir.path().join("nope.json")).is_err());
        assert_eq!(store.load_records(EntityKind::Brokers).unwrap().len(), 3);
    }
}
