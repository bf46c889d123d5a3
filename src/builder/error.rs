//! Build errors for state trees.

use crate::core::StateId;
use thiserror::Error;

/// Errors that can occur when building a state tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No states defined. Call .add_root(name) before .build()")]
    EmptyTree,

    #[error("State {0} was not created by this builder")]
    UnknownState(StateId),

    #[error("State name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("Default child '{child}' is not a direct child of '{state}'")]
    NotAChild { state: String, child: String },

    #[error("State '{0}' already has a default child")]
    DuplicateDefaultChild(String),
}
