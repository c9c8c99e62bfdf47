use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use showdesign_core::config::{Config, WarnLevel};
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    let cfg = Config::load_or_default(root).context("failed to load config")?;
    match subcmd {
        ConfigSubcommand::Show => show(&cfg, json),
        ConfigSubcommand::Validate => validate(&cfg, json),
    }
}

fn show(cfg: &Config, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(cfg);
    }
    println!("storage_key:        {}", cfg.storage_key);
    println!("lock_signed_drafts: {}", cfg.lock_signed_drafts);
    println!("title_candidates:");
    for title in &cfg.title_candidates {
        println!("  - {title}");
    }
    Ok(())
}

fn validate(cfg: &Config, json: bool) -> anyhow::Result<()> {
    let warnings = cfg.validate();
    let errors = warnings
        .iter()
        .filter(|w| w.level == WarnLevel::Error)
        .count();

    if json {
        print_json(&serde_json::json!({
            "ok": errors == 0,
            "warnings": warnings,
        }))?;
    } else if warnings.is_empty() {
        println!("Config OK");
    } else {
        for w in &warnings {
            let tag = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("{tag}: {}", w.message);
        }
    }

    if errors > 0 {
        anyhow::bail!("config has {errors} error(s)");
    }
    Ok(())
}
