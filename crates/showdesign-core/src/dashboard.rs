use crate::draft::{Draft, DraftId};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    Draft,
    Signed,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Draft => f.write_str("Draft"),
            Badge::Signed => f.write_str("Signed"),
        }
    }
}

/// What the dashboard shows for one draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftCard {
    pub id: DraftId,
    pub year: Option<i32>,
    pub badge: Badge,
    pub title: String,
    pub synopsis: String,
    pub due: String,
}

impl DraftCard {
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            id: draft.id,
            year: draft.year,
            badge: if draft.signed { Badge::Signed } else { Badge::Draft },
            title: or_placeholder(&draft.title, "Untitled Show"),
            synopsis: or_placeholder(&draft.synopsis, "No synopsis yet..."),
            due: draft
                .date_needed
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "Not set".to_string()),
        }
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// One card per draft, in collection order.
pub fn cards(drafts: &[Draft]) -> Vec<DraftCard> {
    drafts.iter().map(DraftCard::from_draft).collect()
}

pub fn greeting(display_name: &str) -> String {
    format!("Welcome, {display_name}")
}
