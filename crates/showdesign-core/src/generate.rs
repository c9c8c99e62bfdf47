//! Suggestion strategies for the concept step.
//!
//! Neither strategy looks at content beyond simple interpolation; the
//! [`Generator`] trait is the seam where a real backend would plug in.

use crate::config::DEFAULT_TITLES;
use crate::draft::Draft;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub trait Generator {
    /// A replacement for the draft's title.
    fn title(&mut self, draft: &Draft) -> String;
    /// A replacement for the draft's narrative.
    fn narrative(&mut self, draft: &Draft) -> String;
}

/// Uniform pick from `candidates`; `None` when there are none.
pub fn pick_random<'a, R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &'a [String],
) -> Option<&'a str> {
    candidates.choose(rng).map(String::as_str)
}

/// Three-act outline interpolating the synopsis and section assessments.
pub fn narrative_template(synopsis: &str, weakest: &str, strongest: &str) -> String {
    let or = |value: &str, fallback: &'static str| {
        if value.is_empty() {
            fallback.to_string()
        } else {
            value.to_string()
        }
    };
    format!(
        "Act 1 establishes the world of {}. \nAct 2 introduces conflict through the {}. \nAct 3 resolves in a glorious explosion of sound featuring the {}.",
        or(synopsis, "the unknown"),
        or(weakest, "ensemble"),
        or(strongest, "full band"),
    )
}

// ---------------------------------------------------------------------------
// RandomGenerator
// ---------------------------------------------------------------------------

/// Random title from a fixed list plus the narrative template.
#[derive(Debug)]
pub struct RandomGenerator {
    rng: StdRng,
    titles: Vec<String>,
}

impl RandomGenerator {
    /// An empty `titles` list falls back to the built-in candidates.
    pub fn new(titles: Vec<String>) -> Self {
        Self::with_rng(titles, StdRng::from_entropy())
    }

    pub fn seeded(titles: Vec<String>, seed: u64) -> Self {
        Self::with_rng(titles, StdRng::seed_from_u64(seed))
    }

    fn with_rng(titles: Vec<String>, rng: StdRng) -> Self {
        let titles: Vec<String> = titles.into_iter().filter(|t| !t.trim().is_empty()).collect();
        let titles = if titles.is_empty() {
            DEFAULT_TITLES.iter().map(|s| s.to_string()).collect()
        } else {
            titles
        };
        Self { rng, titles }
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Generator for RandomGenerator {
    fn title(&mut self, _draft: &Draft) -> String {
        // `titles` is never empty after construction.
        pick_random(&mut self.rng, &self.titles)
            .unwrap_or(DEFAULT_TITLES[0])
            .to_string()
    }

    fn narrative(&mut self, draft: &Draft) -> String {
        narrative_template(
            &draft.synopsis,
            &draft.weakest_sections,
            &draft.strongest_sections,
        )
    }
}
