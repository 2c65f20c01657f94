use thiserror::Error;

/// Longest display name we keep.
pub const MAX_TAKER_NAME_CHARS: usize = 64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TakerNameError {
    #[error("display name is longer than {MAX_TAKER_NAME_CHARS} characters")]
    TooLong,
}

/// The taker's display name, trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TakerName(String);

impl TakerName {
    /// Normalize raw input. Blank input yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `TakerNameError::TooLong` past `MAX_TAKER_NAME_CHARS`.
    pub fn parse(raw: &str) -> Result<Option<Self>, TakerNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.chars().count() > MAX_TAKER_NAME_CHARS {
            return Err(TakerNameError::TooLong);
        }
        Ok(Some(Self(trimmed.to_owned())))
    }

    /// Rehydrate a stored name, dropping it when it no longer validates.
    #[must_use]
    pub fn from_persisted(raw: Option<String>) -> Option<Self> {
        raw.and_then(|value| Self::parse(&value).ok().flatten())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TakerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
