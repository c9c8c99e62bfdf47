use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DraftStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    #[default]
    Draft,
    Locked,
}

impl DraftStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DraftStatus::Draft => "draft",
            DraftStatus::Locked => "locked",
        }
    }
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// The seven wizard pages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Ensemble,
    Parameters,
    Concept,
    BigMoment,
    Scenes,
    Soundtrack,
    Agreement,
}

impl Step {
    pub const COUNT: u8 = 7;

    pub fn all() -> &'static [Step] {
        &[
            Step::Ensemble,
            Step::Parameters,
            Step::Concept,
            Step::BigMoment,
            Step::Scenes,
            Step::Soundtrack,
            Step::Agreement,
        ]
    }

    pub fn first() -> Step {
        Step::Ensemble
    }

    pub fn last() -> Step {
        Step::Agreement
    }

    /// 1-based position shown to the user.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(n: u8) -> Option<Step> {
        n.checked_sub(1)
            .and_then(|i| Step::all().get(i as usize))
            .copied()
    }

    /// Following step, saturating at the last one.
    pub fn next(self) -> Step {
        Step::from_number(self.number() + 1).unwrap_or(self)
    }

    /// Preceding step, saturating at the first one.
    pub fn previous(self) -> Step {
        Step::from_number(self.number() - 1).unwrap_or(self)
    }

    pub fn is_last(self) -> bool {
        self == Step::last()
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Ensemble => "The Ensemble",
            Step::Parameters => "Parameters",
            Step::Concept => "The Concept",
            Step::BigMoment => "THE Big Moment",
            Step::Scenes => "Scene Breakdown",
            Step::Soundtrack => "Soundtrack Selection",
            Step::Agreement => "Agreement & Submission",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
