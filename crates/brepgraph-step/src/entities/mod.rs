//! STEP entity definitions and argument extraction.

pub mod geometry;
pub mod topology;

pub use geometry::{classify_curve, classify_surface, CurveInfo};
pub use topology::*;

use crate::error::StepError;
use crate::parser::{StepEntity, StepValue};

/// Helper trait for extracting argument values from STEP entities.
pub trait EntityArgs {
    /// Required enumeration argument at `idx`.
    fn enumeration(&self, idx: usize) -> Result<&str, StepError>;

    /// Required logical argument (`.T.` / `.F.`) at `idx`.
    fn boolean(&self, idx: usize) -> Result<bool, StepError>;

    /// Required entity reference at `idx`.
    fn entity_ref(&self, idx: usize) -> Result<u64, StepError>;

    /// Required list argument at `idx`.
    fn list(&self, idx: usize) -> Result<&[StepValue], StepError>;

    /// List of entity references at `idx`.
    fn entity_ref_list(&self, idx: usize) -> Result<Vec<u64>, StepError>;
}

impl EntityArgs for StepEntity {
    fn enumeration(&self, idx: usize) -> Result<&str, StepError> {
        self.args
            .get(idx)
            .and_then(|v| v.as_enum())
            .ok_or_else(|| self.arg_error("enum", idx))
    }

    fn boolean(&self, idx: usize) -> Result<bool, StepError> {
        match self.enumeration(idx)? {
            "T" => Ok(true),
            "F" => Ok(false),
            _ => Err(self.arg_error("logical", idx)),
        }
    }

    fn entity_ref(&self, idx: usize) -> Result<u64, StepError> {
        self.args
            .get(idx)
            .and_then(|v| v.as_entity_ref())
            .ok_or_else(|| self.arg_error("entity ref", idx))
    }

    fn list(&self, idx: usize) -> Result<&[StepValue], StepError> {
        self.args
            .get(idx)
            .and_then(|v| v.as_list())
            .ok_or_else(|| self.arg_error("list", idx))
    }

    fn entity_ref_list(&self, idx: usize) -> Result<Vec<u64>, StepError> {
        self.list(idx)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_entity_ref().ok_or_else(|| {
                    StepError::parser(Some(self.id), format!("expected entity ref at list[{i}] in arg {idx}"))
                })
            })
            .collect()
    }
}

impl StepEntity {
    fn arg_error(&self, what: &str, idx: usize) -> StepError {
        StepError::parser(Some(self.id), format!("expected {what} at arg {idx} in {}", self.type_name))
    }
}
