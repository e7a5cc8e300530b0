//! Partial-update protocol for points of interest.
//!
//! A patch is an ordered batch of field-level edits applied to a working
//! copy of the editable projection. The stored entity only changes after the
//! whole batch applies and the result passes [`PoiDraft::validate`]; a
//! failure at any step leaves it untouched.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::poi::PoiDraft;

/// Paths addressable by a patch. The identifier is never patchable.
const NAME_PATH: &str = "/name";
const DESCRIPTION_PATH: &str = "/description";

/// Supported edit operation kinds.
///
/// Anything else on the wire deserializes to `Unsupported`, so `move`/`copy`
/// and friends surface as a malformed-patch outcome instead of a body-level
/// rejection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Replace,
    Remove,
    Unsupported,
}

impl<'de> Deserialize<'de> for PatchOp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let kind = String::deserialize(deserializer)?;
        Ok(match kind.as_str() {
            "add" => Self::Add,
            "replace" => Self::Replace,
            "remove" => Self::Remove,
            _ => Self::Unsupported,
        })
    }
}

/// One field-level edit: `{op, path, value}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl PatchOperation {
    pub fn replace(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Replace,
            path: path.into(),
            value: Some(serde_json::Value::String(value.into())),
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Remove,
            path: path.into(),
            value: None,
        }
    }
}

/// Apply `ops` in sequence to `draft`.
///
/// The caller owns atomicity: apply to a scratch copy, validate, and only
/// then commit the result to the store.
pub fn apply(ops: &[PatchOperation], draft: &mut PoiDraft) -> DomainResult<()> {
    for op in ops {
        apply_one(op, draft)?;
    }
    Ok(())
}

fn apply_one(op: &PatchOperation, draft: &mut PoiDraft) -> DomainResult<()> {
    match (op.op, op.path.as_str()) {
        (PatchOp::Add | PatchOp::Replace, NAME_PATH) => {
            draft.name = string_value(op)?;
        }
        (PatchOp::Add | PatchOp::Replace, DESCRIPTION_PATH) => {
            draft.description = Some(string_value(op)?);
        }
        (PatchOp::Remove, NAME_PATH) => {
            // Well-formed edit; the emptied name is caught by validation.
            draft.name = String::new();
        }
        (PatchOp::Remove, DESCRIPTION_PATH) => {
            if draft.description.take().is_none() {
                return Err(DomainError::malformed_patch(format!(
                    "path '{DESCRIPTION_PATH}' does not exist"
                )));
            }
        }
        (PatchOp::Unsupported, _) => {
            return Err(DomainError::malformed_patch(
                "unsupported patch operation kind",
            ));
        }
        (_, other) => {
            return Err(DomainError::malformed_patch(format!(
                "unknown path '{other}'"
            )));
        }
    }
    Ok(())
}

fn string_value(op: &PatchOperation) -> DomainResult<String> {
    match &op.value {
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(DomainError::malformed_patch(format!(
            "value for '{}' must be a string",
            op.path
        ))),
        None => Err(DomainError::malformed_patch(format!(
            "missing value for '{}'",
            op.path
        ))),
    }
}
