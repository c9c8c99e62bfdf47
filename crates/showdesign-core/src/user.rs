use crate::error::{Result, ShowDesignError};
use serde::Serialize;

/// The identity captured at sign-in. Nothing is verified or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

impl User {
    /// Accepts any `local@domain` shaped identifier; the display name is the
    /// local part.
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        let email = identifier.trim();
        let invalid = || ShowDesignError::InvalidIdentifier(identifier.to_string());
        let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || email.chars().any(char::is_whitespace)
        {
            return Err(invalid());
        }
        Ok(Self {
            email: email.to_string(),
            name: local.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_local_part() {
        let user = User::from_identifier("  director@school.edu ").unwrap();
        assert_eq!(user.email, "director@school.edu");
        assert_eq!(user.name, "director");
    }

    #[test]
    fn rejects_non_email_identifiers() {
        for bad in ["", "director", "@school.edu", "director@", "a@b@c", "dir ector@x.y"] {
            assert!(
                matches!(
                    User::from_identifier(bad),
                    Err(ShowDesignError::InvalidIdentifier(_))
                ),
                "expected invalid: {bad:?}"
            );
        }
    }
}
