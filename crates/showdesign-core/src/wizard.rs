use crate::draft::{Draft, SceneId};
use crate::error::{Result, ShowDesignError};
use crate::field::Field;
use crate::generate::Generator;
use crate::types::{DraftStatus, Step};
use tracing::debug;

// ---------------------------------------------------------------------------
// Fixed copy
// ---------------------------------------------------------------------------

pub const BIG_MOMENT_NOTICE: &str = "This HAS to be well thought out. The ENTIRE show revolves around this point. We build to, and around this point. What is the \"WOW\" factor?";

pub const SONGS_WARNING: &str = "Warning: Anything not listed here will not be used. Any request to add songs after the draft is presented will be charged a rewrite fee.";

pub const SCENES_HINT: &str = "Describe the action page-by-page or movement-by-movement.";

pub const NO_SCENES: &str = "No scenes added yet.";

pub const REWRITE_POLICY_INTRO: &str = "I will work diligently to design the show to your wants and needs based on the information provided in this form. However, to maintain workflow and fairness:";

pub const REWRITE_POLICY: [&str; 4] = [
    "Once you have agreed to the arrangements and signed below, the design is locked.",
    "All subsequent rewrites will be charged at $100 per movement, per rewrite.",
    "I will NOT accept pressure for immediate turnarounds on rewrites. They are handled in the order received.",
    "Songs not listed in the previous step constitute a new design request.",
];

pub const AGREEMENT: &str = "I HAVE READ AND AGREE. I understand that my form submission acts as the foundational document for this project. I accept the fee structure for changes requested after the initial agreement is signed.";

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

/// Linear seven-step editor over one in-memory draft.
///
/// Nothing here touches storage; an accepted [`Wizard::submit`] hands a copy
/// of the draft back to the caller.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: Step,
    draft: Draft,
    lock_on_submit: bool,
}

impl Wizard {
    pub fn new(draft: Draft) -> Self {
        Self {
            step: Step::first(),
            draft,
            lock_on_submit: true,
        }
    }

    pub fn fresh() -> Self {
        Self::new(Draft::fresh())
    }

    /// Whether an accepted submission marks the draft locked.
    pub fn with_lock_on_submit(mut self, lock: bool) -> Self {
        self.lock_on_submit = lock;
        self
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// `(current, total)`, 1-based.
    pub fn progress(&self) -> (u8, u8) {
        (self.step.number(), Step::COUNT)
    }

    pub fn percent_complete(&self) -> u8 {
        (u16::from(self.step.number()) * 100 / u16::from(Step::COUNT)) as u8
    }

    pub fn header_title(&self) -> &str {
        if self.draft.title.is_empty() {
            "New Show Design"
        } else {
            &self.draft.title
        }
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn next(&mut self) -> Step {
        self.step = self.step.next();
        debug!(step = self.step.number(), "wizard next");
        self.step
    }

    pub fn previous(&mut self) -> Step {
        self.step = self.step.previous();
        debug!(step = self.step.number(), "wizard previous");
        self.step
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    pub fn set_field(&mut self, field: Field, value: &str) -> Result<()> {
        self.draft.set(field, value)
    }

    pub fn clear_field(&mut self, field: Field) {
        self.draft.clear(field);
    }

    pub fn add_scene(&mut self) -> SceneId {
        self.draft.add_scene()
    }

    pub fn update_scene(&mut self, id: SceneId, desc: impl Into<String>) -> Result<()> {
        self.draft.update_scene(id, desc)
    }

    pub fn remove_scene(&mut self, id: SceneId) -> Result<()> {
        self.draft.remove_scene(id)
    }

    pub fn set_signed(&mut self, signed: bool) {
        self.draft.signed = signed;
    }

    pub fn generate_title(&mut self, generator: &mut dyn Generator) -> &str {
        self.draft.title = generator.title(&self.draft);
        &self.draft.title
    }

    pub fn generate_narrative(&mut self, generator: &mut dyn Generator) -> &str {
        self.draft.narrative = generator.narrative(&self.draft);
        &self.draft.narrative
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// The draft to persist, if submission is allowed.
    ///
    /// Only offered on the agreement step and only once the agreement is
    /// signed. A rejected attempt leaves the wizard untouched.
    pub fn submit(&self) -> Result<Draft> {
        if !self.step.is_last() {
            return Err(ShowDesignError::InvalidTransition {
                view: format!("wizard step {}", self.step.number()),
                action: "submit".to_string(),
            });
        }
        if !self.draft.signed {
            return Err(ShowDesignError::NotSigned);
        }
        let mut draft = self.draft.clone();
        if self.lock_on_submit {
            draft.status = DraftStatus::Locked;
        }
        Ok(draft)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::RandomGenerator;

    fn wizard() -> Wizard {
        Wizard::new(Draft::new(1, 2025))
    }

    fn at_last_step(mut w: Wizard) -> Wizard {
        for _ in 0..Step::COUNT {
            w.next();
        }
        w
    }

    #[test]
    fn starts_on_step_one() {
        let w = wizard();
        assert_eq!(w.step(), Step::Ensemble);
        assert_eq!(w.progress(), (1, 7));
        assert_eq!(w.header_title(), "New Show Design");
    }

    #[test]
    fn previous_on_first_step_stays() {
        let mut w = wizard();
        assert_eq!(w.previous(), Step::Ensemble);
    }

    #[test]
    fn step_stays_in_range_for_any_sequence() {
        let mut w = wizard();
        // Deterministic pseudo-random walk of next/previous calls.
        let mut x: u32 = 12345;
        for _ in 0..500 {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12345);
            if (x >> 16) % 3 == 0 {
                w.previous();
            } else {
                w.next();
            }
            let (n, total) = w.progress();
            assert!((1..=total).contains(&n));
        }
    }

    #[test]
    fn next_clamps_at_last_step() {
        let mut w = at_last_step(wizard());
        assert_eq!(w.next(), Step::Agreement);
        assert_eq!(w.percent_complete(), 100);
    }

    #[test]
    fn unsigned_submit_is_rejected_without_change() {
        let mut w = at_last_step(wizard());
        w.set_field(Field::Title, "Echoes").unwrap();
        let before = w.draft().clone();

        assert!(matches!(w.submit(), Err(ShowDesignError::NotSigned)));
        assert_eq!(w.draft(), &before);
        assert_eq!(w.step(), Step::Agreement);
    }

    #[test]
    fn submit_before_last_step_is_rejected() {
        let mut w = wizard();
        w.set_signed(true);
        assert!(matches!(
            w.submit(),
            Err(ShowDesignError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn signed_submit_returns_locked_copy() {
        let mut w = at_last_step(wizard());
        w.set_field(Field::Title, "Echoes").unwrap();
        w.set_signed(true);
        let submitted = w.submit().unwrap();
        assert_eq!(submitted.title, "Echoes");
        assert!(submitted.signed);
        assert_eq!(submitted.status, DraftStatus::Locked);
        // The in-memory draft is not modified by submission.
        assert_eq!(w.draft().status, DraftStatus::Draft);
    }

    #[test]
    fn lenient_mode_keeps_draft_status() {
        let mut w = at_last_step(wizard().with_lock_on_submit(false));
        w.set_signed(true);
        assert_eq!(w.submit().unwrap().status, DraftStatus::Draft);
    }

    #[test]
    fn generators_overwrite_fields() {
        let mut generator = RandomGenerator::seeded(vec!["Tidal".to_string()], 3);
        let mut w = wizard();
        w.set_field(Field::Title, "Working title").unwrap();
        assert_eq!(w.generate_title(&mut generator), "Tidal");

        w.set_field(Field::Synopsis, "a storm at sea").unwrap();
        w.set_field(Field::WeakestSections, "percussion").unwrap();
        let narrative = w.generate_narrative(&mut generator).to_string();
        assert!(narrative.contains("a storm at sea"));
        assert!(narrative.contains("percussion"));
        assert!(narrative.contains("full band"));
        assert_eq!(w.draft().narrative, narrative);
    }

    #[test]
    fn scene_editing_goes_through_draft() {
        let mut w = wizard();
        let a = w.add_scene();
        let b = w.add_scene();
        assert_ne!(a, b);
        w.update_scene(a, "Opener").unwrap();
        w.remove_scene(b).unwrap();
        assert_eq!(w.draft().scenes.len(), 1);
        assert_eq!(w.draft().scenes[0].desc, "Opener");
    }
}
