use crate::output::{print_json, print_table};
use crate::render;
use anyhow::Context;
use clap::Subcommand;
use showdesign_core::{
    config::Config,
    dashboard,
    draft::DraftId,
    repository::DraftRepository,
    store::FileStore,
};
use std::path::Path;

#[derive(Subcommand)]
pub enum DraftSubcommand {
    /// List every saved design, as the dashboard shows them
    List,
    /// Show every field of one saved design
    Show { id: DraftId },
}

pub fn run(root: &Path, subcmd: DraftSubcommand, json: bool) -> anyhow::Result<()> {
    let cfg = Config::load_or_default(root).context("failed to load config")?;
    let repo = DraftRepository::new(FileStore::for_root(root), cfg.storage_key);
    match subcmd {
        DraftSubcommand::List => list(&repo, json),
        DraftSubcommand::Show { id } => show(&repo, id, json),
    }
}

fn list(repo: &DraftRepository<FileStore>, json: bool) -> anyhow::Result<()> {
    let drafts = repo.load_all().context("failed to load drafts")?;
    let cards = dashboard::cards(&drafts);

    if json {
        print_json(&cards)?;
        return Ok(());
    }

    if cards.is_empty() {
        println!("No designs yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = cards.iter().map(render::card_row).collect();
    print_table(&["ID", "YEAR", "STATUS", "TITLE", "DUE", "SYNOPSIS"], rows);
    Ok(())
}

fn show(repo: &DraftRepository<FileStore>, id: DraftId, json: bool) -> anyhow::Result<()> {
    let draft = repo
        .find(id)
        .context("failed to load drafts")?
        .with_context(|| format!("draft '{id}' not found"))?;

    if json {
        print_json(&draft)?;
        return Ok(());
    }

    print!("{}", render::draft_detail(&draft));
    Ok(())
}
