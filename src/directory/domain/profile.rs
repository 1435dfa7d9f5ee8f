//! Validated employee profile values.

use super::DirectoryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length in characters of stored names and email addresses.
pub const MAX_TEXT_LENGTH: usize = 255;

pub(crate) fn ensure_fits(value: &str, field: &'static str) -> Result<(), DirectoryDomainError> {
    if value.chars().count() > MAX_TEXT_LENGTH {
        return Err(DirectoryDomainError::TooLong {
            field,
            max: MAX_TEXT_LENGTH,
        });
    }
    Ok(())
}

/// Non-empty display name of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Creates a validated person name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyPersonName`] if the value is empty
    /// after trimming, or [`DirectoryDomainError::TooLong`] if it exceeds
    /// [`MAX_TEXT_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DirectoryDomainError::EmptyPersonName);
        }
        ensure_fits(trimmed, "employee name")?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-cased email address with a non-empty local part and domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::InvalidEmail`] unless the value has
    /// exactly one `@` separating two non-empty parts and no whitespace, and
    /// [`DirectoryDomainError::TooLong`] past [`MAX_TEXT_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && parts.next().is_none()
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(DirectoryDomainError::InvalidEmail(raw));
        }
        ensure_fits(&normalized, "email address")?;
        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable profile fields of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    name: PersonName,
    email: EmailAddress,
    position: Option<String>,
}

impl Profile {
    /// Creates a profile from validated parts.
    ///
    /// A blank position is stored as `None`.
    #[must_use]
    pub fn new(name: PersonName, email: EmailAddress, position: Option<String>) -> Self {
        Self {
            name,
            email,
            position: position
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &PersonName {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the job position, if any.
    #[must_use]
    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }
}
