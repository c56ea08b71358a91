//! Append-only circuit construction.
//!
//! [`CircuitBuilder`] is the programmatic counterpart of filling a
//! resized [`Circuit`] slot by slot: gates take consecutive positions in
//! the order they are added, and [`CircuitBuilder::finish`] refuses to
//! hand out a circuit that would not pass validation.

use crate::circuit::Circuit;
use crate::error::{BuildError, ValidityError};
use crate::gate::{Gate, GateKind};
use crate::origin::Origin;

/// Incremental builder for [`Circuit`].
///
/// Gates may reference positions that have not been added yet; such
/// forward references are only checked by `finish`.
#[derive(Debug, Clone, Default)]
pub struct CircuitBuilder {
    input_count: usize,
    gates: Vec<Gate>,
    outputs: Vec<Origin>,
}

impl CircuitBuilder {
    /// Start a circuit with `input_count` inputs.
    pub fn new(input_count: usize) -> Self {
        Self {
            input_count,
            ..Self::default()
        }
    }

    /// Position the next added gate will take.
    pub fn next_position(&self) -> usize {
        self.gates.len() + 1
    }

    /// Append a gate wired from `sources` and return its position.
    pub fn gate(&mut self, kind: GateKind, sources: &[i32]) -> Result<usize, BuildError> {
        self.gates.push(Gate::with_sources(kind, sources)?);
        Ok(self.gates.len())
    }

    /// Append a gate named by its two-letter tag.
    pub fn tagged(&mut self, tag: &str, sources: &[i32]) -> Result<usize, BuildError> {
        self.gate(tag.parse()?, sources)
    }

    /// Declare the next circuit output.
    pub fn output(&mut self, id: i32) -> Result<usize, BuildError> {
        self.outputs
            .push(Origin::from_id(id).ok_or(BuildError::ZeroOrigin)?);
        Ok(self.outputs.len())
    }

    /// Finalize and return the circuit.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidityError`] of the assembled circuit.
    pub fn finish(self) -> Result<Circuit, ValidityError> {
        let circuit = Circuit {
            input_count: self.input_count,
            last_outputs: vec![Default::default(); self.outputs.len()],
            outputs: self.outputs.into_iter().map(Some).collect(),
            gates: self.gates.into_iter().map(Some).collect(),
        };
        circuit.validate()?;
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;

    #[test]
    fn test_simple_build() {
        let mut b = CircuitBuilder::new(2);
        let or = b.gate(GateKind::Or, &[-1, -2]).unwrap();
        let not = b.tagged("nt", &[-2]).unwrap();
        let and = b.gate(GateKind::And, &[or as i32, not as i32]).unwrap();
        b.output(and as i32).unwrap();

        let c = b.finish().unwrap();
        assert_eq!((c.input_count(), c.output_count(), c.gate_count()), (2, 1, 3));
        assert_eq!(c.gate_source(3, 1), 2);
        assert_eq!(c.output_id(1), 3);
        assert_eq!(c.last_outputs(), &[Signal::Undefined]);
    }

    #[test]
    fn test_forward_reference_allowed() {
        let mut b = CircuitBuilder::new(1);
        assert_eq!(b.next_position(), 1);
        b.gate(GateKind::Not, &[2]).unwrap();
        b.gate(GateKind::Not, &[-1]).unwrap();
        b.output(1).unwrap();
        assert!(b.finish().is_ok());
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let mut b = CircuitBuilder::new(1);
        b.gate(GateKind::Nand, &[-1, 5]).unwrap();
        b.output(1).unwrap();
        assert_eq!(
            b.finish(),
            Err(ValidityError::InvalidGateSource {
                position: 1,
                index: 1,
                id: 5
            })
        );
    }

    #[test]
    fn test_no_outputs_error() {
        let mut b = CircuitBuilder::new(1);
        b.gate(GateKind::Not, &[-1]).unwrap();
        assert_eq!(b.finish(), Err(ValidityError::NoOutputs));
    }

    #[test]
    fn test_bad_gate_rejected_eagerly() {
        let mut b = CircuitBuilder::new(2);
        assert_eq!(
            b.gate(GateKind::Xor, &[-1]),
            Err(BuildError::InvalidArity {
                kind: GateKind::Xor,
                arity: 1
            })
        );
        assert_eq!(b.gate(GateKind::Or, &[-1, 0]), Err(BuildError::ZeroOrigin));
        assert!(b.tagged("QQ", &[-1, -2]).is_err());
        assert_eq!(b.output(0), Err(BuildError::ZeroOrigin));
        assert_eq!(b.next_position(), 1);
    }
}
