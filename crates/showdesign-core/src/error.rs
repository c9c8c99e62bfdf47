use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShowDesignError {
    #[error("not initialized: run 'showdesign init'")]
    NotInitialized,

    #[error("You must agree to the rewrite policy to submit.")]
    NotSigned,

    #[error("draft {0} is signed and locked; changes require a rewrite request")]
    DraftLocked(i64),

    #[error("draft not found: {0}")]
    DraftNotFound(i64),

    #[error("scene not found: {0}")]
    SceneNotFound(i64),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("invalid identifier '{0}': expected an email address")]
    InvalidIdentifier(String),

    #[error("invalid storage key '{0}': must be 1-64 letters, digits, '-' or '_'")]
    InvalidStorageKey(String),

    #[error("drafts collection '{key}' has {unreadable} unreadable record(s); fix or move it before saving")]
    UnreadableCollection { key: String, unreadable: usize },

    #[error("cannot {action} from the {view} view")]
    InvalidTransition { view: String, action: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShowDesignError>;
