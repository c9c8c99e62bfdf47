use crate::dashboard::{self, DraftCard};
use crate::draft::{Draft, DraftId};
use crate::error::{Result, ShowDesignError};
use crate::generate::Generator;
use crate::repository::{DraftRepository, Upsert};
use crate::store::KvStore;
use crate::user::User;
use crate::wizard::Wizard;
use std::fmt;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Auth,
    Dashboard,
    Wizard,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViewKind::Auth => "auth",
            ViewKind::Dashboard => "dashboard",
            ViewKind::Wizard => "wizard",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
enum View {
    Auth,
    Dashboard,
    Wizard(Box<Wizard>),
}

impl View {
    fn kind(&self) -> ViewKind {
        match self {
            View::Auth => ViewKind::Auth,
            View::Dashboard => ViewKind::Dashboard,
            View::Wizard(_) => ViewKind::Wizard,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Routes between the auth, dashboard and wizard views.
///
/// The session owns the only handle to the repository; the collection is
/// loaded once on [`Session::open`] and refreshed from each save.
pub struct Session<S> {
    repo: DraftRepository<S>,
    generator: Box<dyn Generator>,
    view: View,
    user: Option<User>,
    drafts: Vec<Draft>,
    editing: Option<DraftId>,
}

impl<S: KvStore> Session<S> {
    pub fn open(repo: DraftRepository<S>, generator: Box<dyn Generator>) -> Result<Self> {
        let drafts = repo.load_all()?;
        Ok(Self {
            repo,
            generator,
            view: View::Auth,
            user: None,
            drafts,
            editing: None,
        })
    }

    pub fn view(&self) -> ViewKind {
        self.view.kind()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn drafts(&self) -> &[Draft] {
        &self.drafts
    }

    pub fn editing(&self) -> Option<DraftId> {
        self.editing
    }

    pub fn repository(&self) -> &DraftRepository<S> {
        &self.repo
    }

    pub fn cards(&self) -> Vec<DraftCard> {
        dashboard::cards(&self.drafts)
    }

    pub fn greeting(&self) -> Option<String> {
        self.user.as_ref().map(|u| dashboard::greeting(&u.name))
    }

    pub fn wizard(&self) -> Option<&Wizard> {
        match &self.view {
            View::Wizard(w) => Some(&**w),
            _ => None,
        }
    }

    pub fn wizard_mut(&mut self) -> Result<&mut Wizard> {
        match &mut self.view {
            View::Wizard(w) => Ok(&mut **w),
            other => Err(ShowDesignError::InvalidTransition {
                view: other.kind().to_string(),
                action: "edit the draft".to_string(),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    pub fn login(&mut self, identifier: &str) -> Result<&User> {
        self.require(ViewKind::Auth, "log in")?;
        let user = User::from_identifier(identifier)?;
        info!(user = %user.email, "signed in");
        self.view = View::Dashboard;
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) -> Result<()> {
        self.require(ViewKind::Dashboard, "log out")?;
        if let Some(user) = self.user.take() {
            info!(user = %user.email, "signed out");
        }
        self.view = View::Auth;
        Ok(())
    }

    pub fn start_new(&mut self) -> Result<()> {
        self.require(ViewKind::Dashboard, "start a new design")?;
        self.editing = None;
        let wizard = Wizard::fresh().with_lock_on_submit(self.repo.enforces_lock());
        debug!(id = wizard.draft().id, "opened wizard on new draft");
        self.view = View::Wizard(Box::new(wizard));
        Ok(())
    }

    pub fn edit(&mut self, id: DraftId) -> Result<()> {
        self.require(ViewKind::Dashboard, "edit a design")?;
        let draft = self
            .drafts
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or(ShowDesignError::DraftNotFound(id))?;
        self.editing = Some(id);
        let wizard = Wizard::new(draft).with_lock_on_submit(self.repo.enforces_lock());
        debug!(id, "opened wizard on saved draft");
        self.view = View::Wizard(Box::new(wizard));
        Ok(())
    }

    /// Submit the wizard's draft, persist the collection and return to the
    /// dashboard. On any rejection the session stays in the wizard unchanged.
    pub fn save_and_return(&mut self) -> Result<Upsert> {
        let draft = match &self.view {
            View::Wizard(w) => w.submit()?,
            other => {
                return Err(ShowDesignError::InvalidTransition {
                    view: other.kind().to_string(),
                    action: "submit".to_string(),
                })
            }
        };
        let (outcome, drafts) = self.repo.upsert(&draft)?;
        info!(id = draft.id, ?outcome, "submitted design");
        self.drafts = drafts;
        self.editing = None;
        self.view = View::Dashboard;
        Ok(outcome)
    }

    /// Leave the wizard, discarding every unsaved edit.
    pub fn cancel_and_return(&mut self) -> Result<()> {
        self.require(ViewKind::Wizard, "cancel")?;
        debug!(editing = ?self.editing, "discarded wizard edits");
        self.editing = None;
        self.view = View::Dashboard;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Suggestions
    // -----------------------------------------------------------------------

    pub fn suggest_title(&mut self) -> Result<String> {
        match &mut self.view {
            View::Wizard(w) => Ok(w.generate_title(self.generator.as_mut()).to_string()),
            other => Err(ShowDesignError::InvalidTransition {
                view: other.kind().to_string(),
                action: "suggest a title".to_string(),
            }),
        }
    }

    pub fn suggest_narrative(&mut self) -> Result<String> {
        match &mut self.view {
            View::Wizard(w) => Ok(w.generate_narrative(self.generator.as_mut()).to_string()),
            other => Err(ShowDesignError::InvalidTransition {
                view: other.kind().to_string(),
                action: "generate a narrative".to_string(),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn require(&self, expected: ViewKind, action: &str) -> Result<()> {
        let current = self.view.kind();
        if current != expected {
            return Err(ShowDesignError::InvalidTransition {
                view: current.to_string(),
                action: action.to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Badge;
    use crate::field::Field;
    use crate::generate::RandomGenerator;
    use crate::repository::DEFAULT_STORAGE_KEY;
    use crate::store::MemoryStore;
    use crate::types::{DraftStatus, Step};

    fn session_with(drafts: &[Draft]) -> Session<MemoryStore> {
        let blob = serde_json::to_string(drafts).unwrap();
        let repo = DraftRepository::new(
            MemoryStore::with_entry(DEFAULT_STORAGE_KEY, blob),
            DEFAULT_STORAGE_KEY,
        );
        Session::open(repo, Box::new(RandomGenerator::seeded(Vec::new(), 11))).unwrap()
    }

    fn logged_in(drafts: &[Draft]) -> Session<MemoryStore> {
        let mut s = session_with(drafts);
        s.login("director@school.edu").unwrap();
        s
    }

    fn go_to_last_step(s: &mut Session<MemoryStore>) {
        let w = s.wizard_mut().unwrap();
        while w.step() != Step::last() {
            w.next();
        }
    }

    fn persisted(s: &Session<MemoryStore>) -> Vec<Draft> {
        s.repository().load_all().unwrap()
    }

    #[test]
    fn login_and_logout_cycle() {
        let mut s = session_with(&[]);
        assert_eq!(s.view(), ViewKind::Auth);
        let user = s.login("director@school.edu").unwrap();
        assert_eq!(user.name, "director");
        assert_eq!(s.view(), ViewKind::Dashboard);
        assert_eq!(s.greeting().as_deref(), Some("Welcome, director"));

        s.logout().unwrap();
        assert_eq!(s.view(), ViewKind::Auth);
        assert!(s.user().is_none());
    }

    #[test]
    fn bad_identifier_stays_on_auth() {
        let mut s = session_with(&[]);
        assert!(s.login("nobody").is_err());
        assert_eq!(s.view(), ViewKind::Auth);
    }

    #[test]
    fn transitions_outside_their_view_are_rejected() {
        let mut s = session_with(&[]);
        assert!(matches!(
            s.start_new(),
            Err(ShowDesignError::InvalidTransition { .. })
        ));
        assert!(s.cancel_and_return().is_err());
        assert!(s.save_and_return().is_err());
        assert_eq!(s.view(), ViewKind::Auth);
    }

    #[test]
    fn new_signed_design_shows_on_dashboard() {
        let mut s = logged_in(&[]);
        s.start_new().unwrap();
        assert!(s.editing().is_none());
        s.wizard_mut()
            .unwrap()
            .set_field(Field::Title, "Echoes")
            .unwrap();
        go_to_last_step(&mut s);
        s.wizard_mut().unwrap().set_signed(true);

        assert_eq!(s.save_and_return().unwrap(), Upsert::Appended);
        assert_eq!(s.view(), ViewKind::Dashboard);

        let cards = s.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Echoes");
        assert_eq!(cards[0].badge, Badge::Signed);
        assert_eq!(persisted(&s).len(), 1);
    }

    #[test]
    fn unsigned_submit_changes_nothing() {
        let mut s = logged_in(&[]);
        s.start_new().unwrap();
        go_to_last_step(&mut s);

        let err = s.save_and_return().unwrap_err();
        assert!(matches!(err, ShowDesignError::NotSigned));
        assert_eq!(
            err.to_string(),
            "You must agree to the rewrite policy to submit."
        );
        assert_eq!(s.view(), ViewKind::Wizard);
        assert_eq!(s.wizard().unwrap().step(), Step::Agreement);
        assert!(persisted(&s).is_empty());
        assert!(s.drafts().is_empty());
    }

    #[test]
    fn editing_existing_draft_replaces_it() {
        let mut old = Draft::new(42, 2025);
        old.title = "Old".to_string();
        let mut s = logged_in(&[old]);

        s.edit(42).unwrap();
        assert_eq!(s.editing(), Some(42));
        s.wizard_mut()
            .unwrap()
            .set_field(Field::Title, "New")
            .unwrap();
        go_to_last_step(&mut s);
        s.wizard_mut().unwrap().set_signed(true);
        assert_eq!(s.save_and_return().unwrap(), Upsert::Replaced);

        let drafts = persisted(&s);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id, 42);
        assert_eq!(drafts[0].title, "New");
        assert!(s.editing().is_none());
    }

    #[test]
    fn saved_record_equals_submitted_draft() {
        let mut s = logged_in(&[Draft::new(1, 2024)]);
        s.start_new().unwrap();
        {
            let w = s.wizard_mut().unwrap();
            w.set_field(Field::Songs, "Bolero").unwrap();
            let id = w.add_scene();
            w.update_scene(id, "Fog rolls in").unwrap();
            w.set_signed(true);
        }
        go_to_last_step(&mut s);
        let expected = s.wizard().unwrap().submit().unwrap();
        s.save_and_return().unwrap();

        let drafts = persisted(&s);
        assert_eq!(drafts.len(), 2);
        let matching: Vec<_> = drafts.iter().filter(|d| d.id == expected.id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0], &expected);
    }

    #[test]
    fn cancel_discards_edits() {
        let mut original = Draft::new(7, 2025);
        original.title = "Keep me".to_string();
        let mut s = logged_in(&[original.clone()]);

        s.edit(7).unwrap();
        s.wizard_mut()
            .unwrap()
            .set_field(Field::Title, "Scratch")
            .unwrap();
        s.cancel_and_return().unwrap();

        assert_eq!(s.view(), ViewKind::Dashboard);
        assert!(s.editing().is_none());
        assert_eq!(s.drafts(), &[original.clone()]);
        assert_eq!(persisted(&s), vec![original]);
    }

    #[test]
    fn edit_unknown_draft_is_not_found() {
        let mut s = logged_in(&[]);
        assert!(matches!(s.edit(99), Err(ShowDesignError::DraftNotFound(99))));
        assert_eq!(s.view(), ViewKind::Dashboard);
    }

    #[test]
    fn locked_draft_resubmission_stays_in_wizard() {
        let mut s = logged_in(&[]);
        s.start_new().unwrap();
        go_to_last_step(&mut s);
        s.wizard_mut().unwrap().set_signed(true);
        s.save_and_return().unwrap();
        let id = s.drafts()[0].id;
        assert_eq!(s.drafts()[0].status, DraftStatus::Locked);

        s.edit(id).unwrap();
        s.wizard_mut()
            .unwrap()
            .set_field(Field::Title, "Late change")
            .unwrap();
        go_to_last_step(&mut s);
        assert!(matches!(
            s.save_and_return(),
            Err(ShowDesignError::DraftLocked(_))
        ));
        assert_eq!(s.view(), ViewKind::Wizard);
        assert!(persisted(&s)[0].title.is_empty());
    }

    #[test]
    fn suggestions_require_wizard() {
        let mut s = logged_in(&[]);
        assert!(s.suggest_title().is_err());
        s.start_new().unwrap();
        let title = s.suggest_title().unwrap();
        assert_eq!(s.wizard().unwrap().draft().title, title);
        let narrative = s.suggest_narrative().unwrap();
        assert!(narrative.starts_with("Act 1 establishes the world of the unknown."));
    }
}
