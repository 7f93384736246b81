use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use i18n_workflow_core::{merge, replicate, Document, DocumentNode};
use i18n_workflow_store::{CatalogStore, FileCatalogStore, StoreConfig};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.catalog)?;
    let store = FileCatalogStore::new(&config.catalog_path);
    match cli.command {
        Command::Show(args) => cmd_show(&store, args),
        Command::Normalize => cmd_normalize(&store),
        Command::Replicate(args) => cmd_replicate(&store, &config, args),
        Command::Merge(args) => cmd_merge(&store, &args.incoming),
    }
}

fn load_config(path: Option<&Path>, catalog: Option<std::path::PathBuf>) -> anyhow::Result<StoreConfig> {
    let mut config = match path {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(catalog) = catalog {
        config.catalog_path = catalog;
    }
    debug!(catalog = %config.catalog_path.display(), locale = %config.default_locale, "configuration loaded");
    Ok(config)
}

/// Per-locale leaf counts.
#[derive(Debug, PartialEq, Eq)]
struct LocaleSummary {
    locale: String,
    total: usize,
    untranslated: Vec<String>,
}

fn summarize(doc: &Document) -> Vec<LocaleSummary> {
    doc.iter()
        .map(|(locale, node)| {
            let leaves = match node {
                DocumentNode::Branch(branch) => branch.leaf_paths(),
                DocumentNode::Leaf(value) => vec![(Vec::new(), value.clone())],
            };
            LocaleSummary {
                locale: locale.clone(),
                total: leaves.len(),
                untranslated: leaves
                    .into_iter()
                    .filter(|(_, value)| value.is_empty())
                    .map(|(path, _)| path.join("."))
                    .collect(),
            }
        })
        .collect()
}

fn cmd_show(store: &FileCatalogStore, args: ShowArgs) -> anyhow::Result<()> {
    let doc = store.load_strict()?;
    if doc.is_empty() {
        println!("No missing translations in {}.", store.describe().bold());
        return Ok(());
    }
    println!("Catalog {}", store.describe().bold());
    for summary in summarize(&doc) {
        let pending = summary.untranslated.len();
        let status = if pending == 0 {
            "complete".green()
        } else {
            format!("{pending} untranslated").yellow()
        };
        println!("  {}  {} keys, {}", summary.locale.cyan().bold(), summary.total, status);
        if args.keys {
            for key in &summary.untranslated {
                println!("    {}", key.dimmed());
            }
        }
    }
    Ok(())
}

fn cmd_normalize(store: &FileCatalogStore) -> anyhow::Result<()> {
    let doc = store.load_strict()?;
    store.save(&doc)?;
    println!("{} Normalized {}", "✓".green().bold(), store.describe().bold());
    Ok(())
}

fn cmd_replicate(store: &FileCatalogStore, config: &StoreConfig, args: ReplicateArgs) -> anyhow::Result<()> {
    let base = args.base.unwrap_or_else(|| config.default_locale.clone());
    let targets = if args.targets.is_empty() {
        config.duplicate_to_locales.clone()
    } else {
        args.targets
    };
    if targets.is_empty() {
        anyhow::bail!("no target locales given; pass --to or set duplicate_to_locales");
    }

    let doc = store.load_strict()?;
    if doc.get(&base).and_then(DocumentNode::as_branch).is_none() {
        anyhow::bail!("locale {base} not found in {}", store.describe());
    }
    store.save(&replicate(&doc, &base, &targets))?;
    println!(
        "{} Replicated {} keys into {}",
        "✓".green().bold(),
        base.cyan(),
        targets.join(", ").yellow()
    );
    Ok(())
}

fn cmd_merge(store: &FileCatalogStore, incoming: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(incoming)
        .with_context(|| format!("reading {}", incoming.display()))?;
    let added = Document::from_yaml_str(&text)
        .with_context(|| format!("parsing {}", incoming.display()))?;

    let existing = store.load_strict()?;
    let merged = merge(&added, &existing);
    let new_keys = merged.leaf_count().saturating_sub(existing.leaf_count());
    store.save(&merged)?;
    println!(
        "{} Merged {} ({} new keys)",
        "✓".green().bold(),
        incoming.display().to_string().bold(),
        new_keys
    );
    Ok(())
}
