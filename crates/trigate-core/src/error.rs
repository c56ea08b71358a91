//! Error types for circuit construction, validation and evaluation.

use thiserror::Error;

use crate::gate::GateKind;

/// Errors raised by circuit and gate mutation.
///
/// A failed mutation leaves the circuit exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Gate position outside `1..=gate_count`.
    #[error("invalid gate position {0}")]
    InvalidGatePosition(usize),

    /// Gate type tag is not one of the seven known tags.
    #[error("unknown gate kind {0:?}")]
    UnknownGateKind(String),

    /// Arity not accepted by the gate kind.
    #[error("invalid arity {arity} for {kind} gate")]
    InvalidArity { kind: GateKind, arity: usize },

    /// Gate input slot outside `0..arity`.
    #[error("input index {index} out of range for arity {arity}")]
    InvalidSourceIndex { index: usize, arity: usize },

    /// An origin id of zero was supplied.
    #[error("origin id must not be zero")]
    ZeroOrigin,

    /// Output index outside `1..=output_count`.
    #[error("invalid output index {0}")]
    InvalidOutputIndex(usize),

    /// The gate slot is empty.
    #[error("gate {0} is not defined")]
    UndefinedGate(usize),
}

/// First violation found by circuit validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidityError {
    /// Circuit declares no inputs.
    #[error("circuit has no inputs")]
    NoInputs,

    /// Circuit declares no outputs.
    #[error("circuit has no outputs")]
    NoOutputs,

    /// Circuit declares no gates.
    #[error("circuit has no gates")]
    NoGates,

    /// A gate slot was never populated.
    #[error("gate {0} is not defined")]
    UndefinedGate(usize),

    /// A gate source is unset or does not reference a valid origin.
    #[error("gate {position} input {index} has invalid origin {id}")]
    InvalidGateSource { position: usize, index: usize, id: i32 },

    /// An output is unset or does not reference a valid origin.
    #[error("output {output} has invalid origin {id}")]
    InvalidOutputOrigin { output: usize, id: i32 },
}

/// Errors that can occur during simulation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Input vector length differs from the declared input count.
    #[error("expected {expected} input signals, got {actual}")]
    InputLength { expected: usize, actual: usize },

    /// The circuit failed validation.
    #[error("invalid circuit: {0}")]
    InvalidCircuit(#[from] ValidityError),
}

/// Text could not be parsed as a [`Signal`](crate::Signal).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid signal {0:?}")]
pub struct ParseSignalError(pub String);
