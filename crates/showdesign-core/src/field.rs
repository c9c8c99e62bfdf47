use crate::error::ShowDesignError;
use crate::types::Step;
use std::fmt;

/// Scalar draft fields addressable by name from the wizard.
///
/// Names match the persisted JSON keys. `signed` and `scenes` are not here:
/// they have dedicated operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BandSize,
    Year,
    Instrumentation,
    StrongestSections,
    WeakestSections,
    DateNeeded,
    Includes,
    Avoids,
    Title,
    Synopsis,
    Narrative,
    Mood,
    Soloists,
    BigMoment,
    Songs,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[
            Field::BandSize,
            Field::Year,
            Field::Instrumentation,
            Field::StrongestSections,
            Field::WeakestSections,
            Field::DateNeeded,
            Field::Includes,
            Field::Avoids,
            Field::Title,
            Field::Synopsis,
            Field::Narrative,
            Field::Mood,
            Field::Soloists,
            Field::BigMoment,
            Field::Songs,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::BandSize => "bandSize",
            Field::Year => "year",
            Field::Instrumentation => "instrumentation",
            Field::StrongestSections => "strongestSections",
            Field::WeakestSections => "weakestSections",
            Field::DateNeeded => "dateNeeded",
            Field::Includes => "includes",
            Field::Avoids => "avoids",
            Field::Title => "title",
            Field::Synopsis => "synopsis",
            Field::Narrative => "narrative",
            Field::Mood => "mood",
            Field::Soloists => "soloists",
            Field::BigMoment => "bigMoment",
            Field::Songs => "songs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::BandSize => "Total Band Size",
            Field::Year => "Season Year",
            Field::Instrumentation => "Projected Instrumentation",
            Field::StrongestSections => "Strongest Sections",
            Field::WeakestSections => "Weakest Sections",
            Field::DateNeeded => "Date Music Needed By",
            Field::Includes => "Things to Include",
            Field::Avoids => "Things to Avoid",
            Field::Title => "Show Name",
            Field::Synopsis => "Synopsis",
            Field::Narrative => "Narrative (Story Flow)",
            Field::Mood => "Overall Mood (Emotion)",
            Field::Soloists => "Featured Soloists",
            Field::BigMoment => "The Big Moment",
            Field::Songs => "Songs",
        }
    }

    pub fn hint(self) -> Option<&'static str> {
        match self {
            Field::Instrumentation => Some("e.g. 12 Flutes, 24 Clarinets, 4 Tubas..."),
            Field::DateNeeded => Some("YYYY-MM-DD"),
            Field::Includes => Some("Specific quotes, visual ideas, props..."),
            Field::Avoids => Some("Certain keys, difficult techniques, clichés..."),
            Field::Synopsis => Some("Brief summary of the show's theme..."),
            Field::BigMoment => Some("Describe the climax/anchor of the show here..."),
            Field::Songs => Some(
                "List all desired songs, specific arrangements, or public domain works...",
            ),
            _ => None,
        }
    }

    /// The wizard page on which this field is presented.
    pub fn step(self) -> Step {
        match self {
            Field::BandSize
            | Field::Year
            | Field::Instrumentation
            | Field::StrongestSections
            | Field::WeakestSections => Step::Ensemble,
            Field::DateNeeded | Field::Includes | Field::Avoids => Step::Parameters,
            Field::Title | Field::Synopsis | Field::Narrative | Field::Mood | Field::Soloists => {
                Step::Concept
            }
            Field::BigMoment => Step::BigMoment,
            Field::Songs => Step::Soundtrack,
        }
    }

    pub fn on_step(step: Step) -> impl Iterator<Item = Field> {
        Field::all().iter().copied().filter(move |f| f.step() == step)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = ShowDesignError;

    /// Accepts the persisted camelCase name or a snake_case / kebab-case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        Field::all()
            .iter()
            .copied()
            .find(|f| f.as_str().to_lowercase() == wanted)
            .ok_or_else(|| ShowDesignError::UnknownField(s.to_string()))
    }
}
