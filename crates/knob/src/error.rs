use crate::canvas::PrimitiveId;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KnobError {
    #[error("Parameter {name} ({value}) needs to be {requirement}.")]
    InvalidArgument {
        name: &'static str,
        value: String,
        requirement: String,
    },
    #[error("Canvas has no primitive with id {0}")]
    UnknownPrimitive(PrimitiveId),
}

impl KnobError {
    pub fn invalid(name: &'static str, value: impl Debug, requirement: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            value: format!("{value:?}"),
            requirement: requirement.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
