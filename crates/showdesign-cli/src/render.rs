//! Plain-text rendering of the three session views.

use crate::output::{format_table, truncate};
use showdesign_core::dashboard::DraftCard;
use showdesign_core::draft::Draft;
use showdesign_core::field::Field;
use showdesign_core::types::Step;
use showdesign_core::wizard::{self, Wizard};
use std::fmt::Write;

const BAR_WIDTH: usize = 28;

pub fn auth_view() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Show Design Portal");
    let _ = writeln!(out, "Design. Arrange. Perform.");
    let _ = writeln!(out);
    let _ = writeln!(out, "Sign in with: login <email>   (new here? register <email>)");
    out
}

pub fn dashboard_view(greeting: &str, cards: &[DraftCard]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{greeting}");
    let _ = writeln!(out, "Manage your show designs");
    let _ = writeln!(out);
    if cards.is_empty() {
        let _ = writeln!(out, "No designs yet.");
    } else {
        let rows: Vec<Vec<String>> = cards.iter().map(card_row).collect();
        out.push_str(&format_table(
            &["ID", "YEAR", "STATUS", "TITLE", "DUE", "SYNOPSIS"],
            &rows,
        ));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Commands: new, edit <id>, logout, quit");
    out
}

pub fn card_row(card: &DraftCard) -> Vec<String> {
    vec![
        card.id.to_string(),
        card.year.map(|y| y.to_string()).unwrap_or_default(),
        card.badge.to_string(),
        card.title.clone(),
        card.due.clone(),
        truncate(&card.synopsis, 40),
    ]
}

pub fn wizard_view(w: &Wizard) -> String {
    let mut out = String::new();
    let (step, total) = w.progress();
    let filled = BAR_WIDTH * usize::from(step) / usize::from(total);
    let _ = writeln!(out, "{}", w.header_title());
    let _ = writeln!(
        out,
        "Step {step} of {total} [{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        w.percent_complete()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "== {} ==", w.step().title());

    let draft = w.draft();
    match w.step() {
        Step::Ensemble | Step::Parameters | Step::Soundtrack => {
            if w.step() == Step::Soundtrack {
                let _ = writeln!(out, "! {}", wizard::SONGS_WARNING);
            }
            fields(&mut out, draft, w.step());
        }
        Step::Concept => {
            fields(&mut out, draft, w.step());
            let _ = writeln!(out, "(suggest title | suggest narrative)");
        }
        Step::BigMoment => {
            let _ = writeln!(out, "! {}", wizard::BIG_MOMENT_NOTICE);
            fields(&mut out, draft, w.step());
        }
        Step::Scenes => {
            let _ = writeln!(out, "{}", wizard::SCENES_HINT);
            if draft.scenes.is_empty() {
                let _ = writeln!(out, "  {}", wizard::NO_SCENES);
            }
            for (i, scene) in draft.scenes.iter().enumerate() {
                let desc = if scene.desc.is_empty() {
                    "(What happens in this scene?)"
                } else {
                    scene.desc.as_str()
                };
                let _ = writeln!(out, "  Scene {} [{}]: {}", i + 1, scene.id, desc);
            }
            let _ = writeln!(out, "(scene add | scene edit <id> <text> | scene rm <id>)");
        }
        Step::Agreement => {
            let _ = writeln!(out, "The Rewrite Policy");
            let _ = writeln!(out, "{}", wizard::REWRITE_POLICY_INTRO);
            for item in wizard::REWRITE_POLICY {
                let _ = writeln!(out, "  - {item}");
            }
            let _ = writeln!(out);
            let mark = if draft.signed { "x" } else { " " };
            let _ = writeln!(out, "[{mark}] {}", wizard::AGREEMENT);
            let _ = writeln!(out, "(sign | unsign | submit)");
        }
    }

    let _ = writeln!(out);
    let nav = if w.step().is_last() {
        "prev | submit | cancel"
    } else if w.step() == Step::first() {
        "next | cancel"
    } else {
        "prev | next | cancel"
    };
    let _ = writeln!(out, "Commands: {nav}");
    out
}

fn fields(out: &mut String, draft: &Draft, step: Step) {
    for field in Field::on_step(step) {
        let value = draft.get(field);
        let shown = if value.is_empty() {
            field.hint().map(|h| format!("({h})")).unwrap_or_default()
        } else {
            value
        };
        let _ = writeln!(out, "  {} [{}]: {}", field.label(), field, shown);
    }
}

/// Every field of a draft, for `draft show`.
pub fn draft_detail(draft: &Draft) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Draft:    {}", draft.id);
    let _ = writeln!(out, "Status:   {}", draft.status);
    let _ = writeln!(out, "Signed:   {}", if draft.signed { "yes" } else { "no" });
    for step in Step::all() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {}", step.number(), step.title());
        for field in Field::on_step(*step) {
            let _ = writeln!(out, "  {}: {}", field.label(), draft.get(field));
        }
        if *step == Step::Scenes {
            if draft.scenes.is_empty() {
                let _ = writeln!(out, "  {}", wizard::NO_SCENES);
            }
            for (i, scene) in draft.scenes.iter().enumerate() {
                let _ = writeln!(out, "  Scene {}: {}", i + 1, scene.desc);
            }
        }
    }
    out
}
