//! Error types for simulation operations.

use sl_components::ComponentError;
use sl_core::SlError;
use sl_graph::GraphError;
use thiserror::Error;

/// Errors encountered while building or running a loop simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("A loop needs exactly one pump, found {pumps}")]
    Topology { pumps: usize },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Broken loop invariant: {what}")]
    Invariant { what: &'static str },

    #[error("Invalid configuration: {0}")]
    Config(#[from] SlError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Topology error: {0}")]
    Graph(#[from] GraphError),
}

pub type SimResult<T> = Result<T, SimError>;
