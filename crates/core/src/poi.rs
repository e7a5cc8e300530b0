use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult, FieldViolation};
use crate::id::PoiId;

/// Maximum length of a point of interest name, in characters.
pub const NAME_MAX_LEN: usize = 50;

/// Maximum length of a point of interest description, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 200;

/// A point of interest, owned by exactly one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Unique across the entire registry; immutable once assigned.
    pub id: PoiId,
    pub name: String,
    pub description: Option<String>,
}

impl PointOfInterest {
    /// Materialize a stored entity from a validated draft and an assigned id.
    pub fn materialize(id: PoiId, draft: PoiDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
        }
    }

    /// Overwrite the editable fields in place. The id never changes.
    pub fn apply_draft(&mut self, draft: PoiDraft) {
        self.name = draft.name;
        self.description = draft.description;
    }
}

/// Editable projection of a point of interest: the fields exposed to
/// creation, full update, and patch. The identifier is never part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiDraft {
    pub name: String,
    pub description: Option<String>,
}

impl PoiDraft {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    /// Project a stored entity down to its editable fields.
    pub fn from_poi(poi: &PointOfInterest) -> Self {
        Self {
            name: poi.name.clone(),
            description: poi.description.clone(),
        }
    }

    /// Validate against entity invariants.
    ///
    /// Creation and post-patch validation share these rules. Collects every
    /// violation rather than stopping at the first.
    pub fn validate(&self) -> DomainResult<()> {
        let mut violations = Vec::new();

        if self.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "name must not be empty"));
        } else if self.name.chars().count() > NAME_MAX_LEN {
            violations.push(FieldViolation::new(
                "name",
                format!("name must be at most {NAME_MAX_LEN} characters"),
            ));
        }

        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_LEN {
                violations.push(FieldViolation::new(
                    "description",
                    format!("description must be at most {DESCRIPTION_MAX_LEN} characters"),
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(violations))
        }
    }
}
