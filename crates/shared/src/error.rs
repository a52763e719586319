use thiserror::Error;

/// The two failure kinds the site scripts recognise.
///
/// `NotFound` is user-facing and recoverable (a typed page number that does
/// not exist). `PreconditionViolation` means the host page or the generated
/// data does not match what the scripts expect; at startup it disables the
/// affected module, during interaction it is logged and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteError {
    #[error("not found: {key}")]
    NotFound { key: String },
    #[error("precondition violated: {what}")]
    PreconditionViolation { what: String },
}

impl SiteError {
    pub fn not_found(key: impl Into<String>) -> Self {
        SiteError::NotFound { key: key.into() }
    }

    pub fn precondition(what: impl Into<String>) -> Self {
        SiteError::PreconditionViolation { what: what.into() }
    }

    /// Precondition violation for a fixed-id element absent from the page.
    pub fn missing_element(id: &str) -> Self {
        Self::precondition(format!("missing element #{}", id))
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
