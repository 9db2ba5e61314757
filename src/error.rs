use thiserror::Error;

/// Failure of a call to the hosted backend. Callers surface it as a
/// notification; local state is never touched when one of these comes back.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend rejected request (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("failed to decode backend response: {0}")]
    Decode(String),
    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum InviteError {
    #[error("posting '{0}' not found")]
    UnknownPosting(String),
    #[error("candidate '{0}' not found")]
    UnknownCandidate(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Per-field validation messages, in the order the fields appear on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validation failed: {}", format_list(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for `field`, for inline display.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn format_list(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
