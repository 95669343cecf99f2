//! Chip domain model.
//!
//! # Responsibility
//! - Define the selectable record shown by the filterable list.
//! - Validate identity and title before a chip enters any collection.
//!
//! # Invariants
//! - `id` is stable and never nil; equality and hashing use `id` only.
//! - `title` is never blank; it is the primary match key for filtering.
//! - Fields are read-only once constructed. Core code never mutates a chip.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Stable identifier for one chip.
pub type ChipId = Uuid;

/// Opaque avatar reference resolved by the presentation layer.
///
/// A chip without an avatar is rendered with a letter-tile fallback; that
/// resolution never happens in core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ChipAvatar {
    /// Image location (file path, content URI or URL).
    Uri(String),
    /// Name of a bundled image resource.
    Resource(String),
}

/// Validation errors for chip construction and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipValidationError {
    NilId,
    EmptyTitle,
}

impl Display for ChipValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "chip id must not be nil"),
            Self::EmptyTitle => write!(f, "chip title must not be blank"),
        }
    }
}

impl Error for ChipValidationError {}

/// Selectable record ("chip") with a title, optional subtitle and avatar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ChipWire")]
pub struct Chip {
    id: ChipId,
    title: String,
    subtitle: Option<String>,
    avatar: Option<ChipAvatar>,
    /// Caller-owned data carried along untouched.
    payload: Option<serde_json::Value>,
}

impl Chip {
    /// Creates a chip with a freshly generated id.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, ChipValidationError> {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates a chip with a caller-provided id.
    ///
    /// Used when identity already exists outside core (contacts, tags, ...).
    ///
    /// # Errors
    /// - `NilId` when `id` is nil.
    /// - `EmptyTitle` when `title` is blank.
    pub fn with_id(id: ChipId, title: impl Into<String>) -> Result<Self, ChipValidationError> {
        let chip = Self {
            id,
            title: title.into(),
            subtitle: None,
            avatar: None,
            payload: None,
        };
        chip.validate()?;
        Ok(chip)
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_avatar(mut self, avatar: ChipAvatar) -> Self {
        self.avatar = Some(avatar);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Checks identity and title invariants.
    ///
    /// Blank titles are refused deliberately, which is stricter than a plain
    /// non-null check: the title is both the row label and the primary match
    /// key.
    pub fn validate(&self) -> Result<(), ChipValidationError> {
        if self.id.is_nil() {
            return Err(ChipValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(ChipValidationError::EmptyTitle);
        }
        Ok(())
    }

    pub fn id(&self) -> ChipId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn avatar(&self) -> Option<&ChipAvatar> {
        self.avatar.as_ref()
    }

    pub fn payload(&self) -> Option<&serde_json::Value> {
        self.payload.as_ref()
    }
}

impl PartialEq for Chip {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Chip {}

impl Hash for Chip {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Unvalidated decode shape; converted through [`Chip::validate`].
#[derive(Deserialize)]
struct ChipWire {
    #[serde(default = "Uuid::new_v4")]
    id: ChipId,
    title: String,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    avatar: Option<ChipAvatar>,
    #[serde(default)]
    payload: Option<serde_json::Value>,
}

impl TryFrom<ChipWire> for Chip {
    type Error = ChipValidationError;

    fn try_from(wire: ChipWire) -> Result<Self, Self::Error> {
        let chip = Self {
            id: wire.id,
            title: wire.title,
            subtitle: wire.subtitle,
            avatar: wire.avatar,
            payload: wire.payload,
        };
        chip.validate()?;
        Ok(chip)
    }
}

#[cfg(test)]
mod tests {
    use super::{Chip, ChipValidationError};
    use uuid::Uuid;

    #[test]
    fn equality_follows_identity_not_fields() {
        let id = Uuid::new_v4();
        let a = Chip::with_id(id, "Alice").expect("valid chip");
        let b = Chip::with_id(id, "Alice Smith")
            .expect("valid chip")
            .with_subtitle("renamed");
        assert_eq!(a, b);

        let same_title = Chip::new("Alice").expect("valid chip");
        assert_ne!(a, same_title);
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(
            Chip::new(" \t ").expect_err("blank title must fail"),
            ChipValidationError::EmptyTitle
        );
    }

    #[test]
    fn blank_subtitle_is_allowed() {
        let chip = Chip::new("Carol").expect("valid chip").with_subtitle("");
        assert_eq!(chip.subtitle(), Some(""));
    }
}
