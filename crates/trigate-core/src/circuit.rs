//! Circuit representation: gate arena, inputs and outputs.
//!
//! A circuit owns a dense arena of gate slots addressed by 1-based
//! position. Slots may be empty while the circuit is being built; a
//! circuit must pass [`Circuit::validate`] before it is simulated or
//! written out.
//!
//! Mutators return `Result` and leave the circuit unchanged on failure.
//! Read accessors are total and return a sentinel (`0`, `""`,
//! `Signal::Undefined` or `None`) for out-of-range arguments.

use crate::error::{BuildError, ValidityError};
use crate::gate::{Gate, GateKind};
use crate::origin::Origin;
use crate::signal::Signal;

/// A combinational ternary-logic circuit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Circuit {
    pub(crate) input_count: usize,
    pub(crate) outputs: Vec<Option<Origin>>,
    pub(crate) gates: Vec<Option<Gate>>,
    /// Output vector from the most recent successful simulation.
    pub(crate) last_outputs: Vec<Signal>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit with unset outputs and empty gate slots.
    pub fn with_size(input_count: usize, output_count: usize, gate_count: usize) -> Self {
        let mut circuit = Self::new();
        circuit.resize(input_count, output_count, gate_count);
        circuit
    }

    /// Discard all content and allocate fresh, unset slots.
    pub fn resize(&mut self, input_count: usize, output_count: usize, gate_count: usize) {
        self.input_count = input_count;
        self.outputs = vec![None; output_count];
        self.gates = vec![None; gate_count];
        self.last_outputs = vec![Signal::Undefined; output_count];
    }

    /// Return to the empty state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// `true` when nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.input_count == 0 && self.outputs.is_empty() && self.gates.is_empty()
    }

    pub fn input_count(&self) -> usize {
        self.input_count
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    // === Id predicates ===

    /// `id` names a circuit input (`-input_count..=-1`).
    pub fn is_input_id(&self, id: i32) -> bool {
        matches!(Origin::from_id(id), Some(Origin::Input(k)) if k <= self.input_count)
    }

    /// `id` names a gate slot (`1..=gate_count`), occupied or not.
    pub fn is_gate_id(&self, id: i32) -> bool {
        matches!(Origin::from_id(id), Some(Origin::Gate(k)) if k <= self.gate_count())
    }

    /// `index` names a declared output (`1..=output_count`).
    pub fn is_output_index(&self, index: usize) -> bool {
        (1..=self.output_count()).contains(&index)
    }

    /// The gate slot at `position` is occupied.
    pub fn is_gate_defined(&self, position: usize) -> bool {
        self.gate(position).is_some()
    }

    /// `origin` is a circuit input or an occupied gate slot.
    pub fn is_valid_origin(&self, origin: Origin) -> bool {
        match origin {
            Origin::Input(k) => (1..=self.input_count).contains(&k),
            Origin::Gate(k) => self.is_gate_defined(k),
        }
    }

    /// Signed-id form of [`is_valid_origin`](Self::is_valid_origin).
    pub fn is_valid_origin_id(&self, id: i32) -> bool {
        Origin::from_id(id).is_some_and(|o| self.is_valid_origin(o))
    }

    // === Validation ===

    /// Check the circuit is complete and every reference resolves.
    ///
    /// Returns the first violation found, scanning gates in order and
    /// then outputs.
    pub fn validate(&self) -> Result<(), ValidityError> {
        if self.input_count == 0 {
            return Err(ValidityError::NoInputs);
        }
        if self.outputs.is_empty() {
            return Err(ValidityError::NoOutputs);
        }
        if self.gates.is_empty() {
            return Err(ValidityError::NoGates);
        }

        for (i, slot) in self.gates.iter().enumerate() {
            let position = i + 1;
            let gate = slot.as_ref().ok_or(ValidityError::UndefinedGate(position))?;
            for (index, origin) in gate.origins().iter().enumerate() {
                if !origin.is_some_and(|o| self.is_valid_origin(o)) {
                    return Err(ValidityError::InvalidGateSource {
                        position,
                        index,
                        id: Origin::id_of(*origin),
                    });
                }
            }
        }

        for (i, origin) in self.outputs.iter().enumerate() {
            if !origin.is_some_and(|o| self.is_valid_origin(o)) {
                return Err(ValidityError::InvalidOutputOrigin {
                    output: i + 1,
                    id: Origin::id_of(*origin),
                });
            }
        }

        Ok(())
    }

    /// Boolean form of [`validate`](Self::validate).
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    // === Queries ===

    /// Borrow the gate at `position`.
    pub fn gate(&self, position: usize) -> Option<&Gate> {
        position
            .checked_sub(1)
            .and_then(|i| self.gates.get(i))
            .and_then(Option::as_ref)
    }

    pub(crate) fn gate_mut(&mut self, position: usize) -> Option<&mut Gate> {
        position
            .checked_sub(1)
            .and_then(|i| self.gates.get_mut(i))
            .and_then(Option::as_mut)
    }

    /// Iterate over gate slots with their positions.
    pub fn gates(&self) -> impl Iterator<Item = (usize, Option<&Gate>)> + '_ {
        self.gates
            .iter()
            .enumerate()
            .map(|(i, slot)| (i + 1, slot.as_ref()))
    }

    pub fn gate_kind(&self, position: usize) -> Option<GateKind> {
        self.gate(position).map(Gate::kind)
    }

    /// Two-letter tag of the gate at `position`, or `""`.
    pub fn gate_name(&self, position: usize) -> &'static str {
        self.gate(position).map_or("", Gate::name)
    }

    /// Arity of the gate at `position`, or `0`.
    pub fn gate_arity(&self, position: usize) -> usize {
        self.gate(position).map_or(0, Gate::arity)
    }

    /// Origin id of input `index` of the gate at `position`, or `0`.
    pub fn gate_source(&self, position: usize, index: usize) -> i32 {
        self.gate(position).map_or(0, |g| g.source(index))
    }

    /// Cached output of the gate at `position`, or `Undefined`.
    pub fn gate_output(&self, position: usize) -> Signal {
        self.gate(position).map_or(Signal::Undefined, Gate::output)
    }

    /// Typed origin of output `index` (1-based).
    pub fn output_origin(&self, index: usize) -> Option<Origin> {
        index
            .checked_sub(1)
            .and_then(|i| self.outputs.get(i))
            .copied()
            .flatten()
    }

    /// Origin id of output `index` (1-based), or `0`.
    pub fn output_id(&self, index: usize) -> i32 {
        Origin::id_of(self.output_origin(index))
    }

    /// Value of output `index` (1-based) from the last simulation.
    pub fn output_signal(&self, index: usize) -> Signal {
        index
            .checked_sub(1)
            .and_then(|i| self.last_outputs.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Output vector from the last simulation.
    pub fn last_outputs(&self) -> &[Signal] {
        &self.last_outputs
    }

    // === Mutation ===

    /// Replace the gate at `position` with a fresh gate named by `tag`.
    pub fn set_gate(&mut self, position: usize, tag: &str, arity: usize) -> Result<(), BuildError> {
        let kind = tag.parse::<GateKind>()?;
        self.set_gate_kind(position, kind, arity)
    }

    /// Replace the gate at `position` with a fresh gate of `kind`.
    ///
    /// Any previous occupant and its sources are discarded.
    pub fn set_gate_kind(
        &mut self,
        position: usize,
        kind: GateKind,
        arity: usize,
    ) -> Result<(), BuildError> {
        let slot = position
            .checked_sub(1)
            .and_then(|i| self.gates.get_mut(i))
            .ok_or(BuildError::InvalidGatePosition(position))?;
        *slot = Some(Gate::new(kind, arity)?);
        Ok(())
    }

    /// Place an already-built gate at `position`.
    pub fn insert_gate(&mut self, position: usize, gate: Gate) -> Result<(), BuildError> {
        let slot = position
            .checked_sub(1)
            .and_then(|i| self.gates.get_mut(i))
            .ok_or(BuildError::InvalidGatePosition(position))?;
        *slot = Some(gate);
        Ok(())
    }

    /// Change the arity of the gate at `position`, clearing its sources.
    pub fn set_gate_arity(&mut self, position: usize, arity: usize) -> Result<(), BuildError> {
        self.defined_gate_mut(position)?.set_arity(arity)
    }

    /// Wire input `index` (0-based) of the gate at `position`.
    pub fn set_gate_source(
        &mut self,
        position: usize,
        index: usize,
        id: i32,
    ) -> Result<(), BuildError> {
        self.defined_gate_mut(position)?.set_source(index, id)
    }

    /// Wire output `index` (1-based) to the origin encoded by `id`.
    pub fn set_output(&mut self, index: usize, id: i32) -> Result<(), BuildError> {
        let origin = Origin::from_id(id).ok_or(BuildError::ZeroOrigin)?;
        let slot = index
            .checked_sub(1)
            .and_then(|i| self.outputs.get_mut(i))
            .ok_or(BuildError::InvalidOutputIndex(index))?;
        *slot = Some(origin);
        Ok(())
    }

    fn defined_gate_mut(&mut self, position: usize) -> Result<&mut Gate, BuildError> {
        if position == 0 || position > self.gate_count() {
            return Err(BuildError::InvalidGatePosition(position));
        }
        self.gate_mut(position)
            .ok_or(BuildError::UndefinedGate(position))
    }
}
