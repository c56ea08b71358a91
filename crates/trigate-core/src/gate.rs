//! Logic gates and their ternary evaluation rules.

use std::fmt;
use std::str::FromStr;

use crate::error::BuildError;
use crate::origin::Origin;
use crate::signal::Signal;

/// The seven supported gate kinds.
///
/// Every kind extends its two-valued truth table conservatively: a
/// determining input settles the output even while other inputs are
/// still `Undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// Inverter, exactly one input.
    Not,
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
}

impl GateKind {
    /// All kinds, in tag-table order.
    pub const ALL: [GateKind; 7] = [
        GateKind::Not,
        GateKind::And,
        GateKind::Nand,
        GateKind::Or,
        GateKind::Nor,
        GateKind::Xor,
        GateKind::Xnor,
    ];

    /// Two-letter tag used by the text format.
    pub fn tag(self) -> &'static str {
        match self {
            GateKind::Not => "NT",
            GateKind::And => "AN",
            GateKind::Nand => "NA",
            GateKind::Or => "OR",
            GateKind::Nor => "NO",
            GateKind::Xor => "XO",
            GateKind::Xnor => "NX",
        }
    }

    /// Look up a kind by its tag, ignoring case.
    pub fn from_tag(tag: &str) -> Option<GateKind> {
        GateKind::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(tag))
    }

    /// Whether a gate of this kind may have `arity` inputs.
    #[inline]
    pub fn accepts_arity(self, arity: usize) -> bool {
        match self {
            GateKind::Not => arity == 1,
            _ => arity >= 2,
        }
    }

    /// Evaluate this kind over `inputs`.
    ///
    /// A `Not` with anything other than one input yields `Undefined`.
    pub fn apply(self, inputs: &[Signal]) -> Signal {
        match self {
            GateKind::Not => match inputs {
                [s] => !*s,
                _ => Signal::Undefined,
            },
            GateKind::And => conjunction(inputs),
            GateKind::Nand => !conjunction(inputs),
            GateKind::Or => disjunction(inputs),
            GateKind::Nor => !disjunction(inputs),
            GateKind::Xor => parity(inputs),
            GateKind::Xnor => !parity(inputs),
        }
    }
}

fn conjunction(inputs: &[Signal]) -> Signal {
    if inputs.contains(&Signal::False) {
        Signal::False
    } else if inputs.contains(&Signal::Undefined) {
        Signal::Undefined
    } else {
        Signal::True
    }
}

fn disjunction(inputs: &[Signal]) -> Signal {
    if inputs.contains(&Signal::True) {
        Signal::True
    } else if inputs.contains(&Signal::Undefined) {
        Signal::Undefined
    } else {
        Signal::False
    }
}

fn parity(inputs: &[Signal]) -> Signal {
    if inputs.contains(&Signal::Undefined) {
        return Signal::Undefined;
    }
    let ones = inputs.iter().filter(|&&s| s == Signal::True).count();
    Signal::from(ones % 2 == 1)
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateKind::Not => "NOT",
            GateKind::And => "AND",
            GateKind::Nand => "NAND",
            GateKind::Or => "OR",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
        };
        f.write_str(name)
    }
}

impl FromStr for GateKind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateKind::from_tag(s).ok_or_else(|| BuildError::UnknownGateKind(s.to_string()))
    }
}

/// A single gate: kind, input origins and cached output.
///
/// Gates have no identity of their own; the owning circuit addresses
/// them by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    kind: GateKind,
    sources: Vec<Option<Origin>>,
    output: Signal,
}

impl Gate {
    /// Create a gate with `arity` unset inputs.
    pub fn new(kind: GateKind, arity: usize) -> Result<Self, BuildError> {
        if !kind.accepts_arity(arity) {
            return Err(BuildError::InvalidArity { kind, arity });
        }
        Ok(Self {
            kind,
            sources: vec![None; arity],
            output: Signal::Undefined,
        })
    }

    /// Create a gate and wire every input from signed origin ids.
    pub fn with_sources(kind: GateKind, ids: &[i32]) -> Result<Self, BuildError> {
        let mut gate = Gate::new(kind, ids.len())?;
        for (index, &id) in ids.iter().enumerate() {
            gate.set_source(index, id)?;
        }
        Ok(gate)
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Two-letter type tag.
    pub fn name(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn arity(&self) -> usize {
        self.sources.len()
    }

    /// Change the number of inputs.
    ///
    /// A different valid arity clears every source; the same arity is a
    /// no-op. An invalid arity leaves the gate untouched.
    pub fn set_arity(&mut self, arity: usize) -> Result<(), BuildError> {
        if !self.kind.accepts_arity(arity) {
            return Err(BuildError::InvalidArity {
                kind: self.kind,
                arity,
            });
        }
        if arity != self.arity() {
            self.sources = vec![None; arity];
        }
        Ok(())
    }

    /// Signed origin id of input `index`, or `0` if unset or out of range.
    pub fn source(&self, index: usize) -> i32 {
        Origin::id_of(self.origin(index))
    }

    /// Typed origin of input `index`.
    pub fn origin(&self, index: usize) -> Option<Origin> {
        self.sources.get(index).copied().flatten()
    }

    /// All input origins, in slot order.
    pub fn origins(&self) -> &[Option<Origin>] {
        &self.sources
    }

    /// Wire input `index` to the origin encoded by `id`.
    ///
    /// Range checks against the circuit happen at validation time, so
    /// any non-zero id is accepted here.
    pub fn set_source(&mut self, index: usize, id: i32) -> Result<(), BuildError> {
        let arity = self.arity();
        let slot = self
            .sources
            .get_mut(index)
            .ok_or(BuildError::InvalidSourceIndex { index, arity })?;
        *slot = Some(Origin::from_id(id).ok_or(BuildError::ZeroOrigin)?);
        Ok(())
    }

    /// Cached output from the last evaluation.
    pub fn output(&self) -> Signal {
        self.output
    }

    pub fn set_output(&mut self, signal: Signal) {
        self.output = signal;
    }

    /// Evaluate the gate and cache the result.
    ///
    /// `inputs` must have exactly [`arity`](Self::arity) elements. On a
    /// length mismatch the cache is set to `Undefined` and nothing else
    /// happens.
    pub fn evaluate(&mut self, inputs: &[Signal]) -> Signal {
        self.output = if inputs.len() == self.arity() {
            self.kind.apply(inputs)
        } else {
            Signal::Undefined
        };
        self.output
    }
}

impl fmt::Display for Gate {
    /// Text-format body: `KIND arity: src ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:", self.name(), self.arity())?;
        for origin in &self.sources {
            write!(f, " {}", Origin::id_of(*origin))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use Signal::{False as F, True as T, Undefined as U};

    #[test]
    fn test_tags_round_trip_case_insensitively() {
        for kind in GateKind::ALL {
            assert_eq!(GateKind::from_tag(kind.tag()), Some(kind));
            assert_eq!(
                GateKind::from_tag(&kind.tag().to_ascii_lowercase()),
                Some(kind)
            );
        }
        assert_eq!(GateKind::from_tag("nx"), Some(GateKind::Xnor));
        assert_eq!(GateKind::from_tag("ZZ"), None);
        assert_eq!(GateKind::from_tag("AND"), None);
        assert_eq!(
            "qq".parse::<GateKind>(),
            Err(BuildError::UnknownGateKind("qq".into()))
        );
    }

    #[test]
    fn test_arity_bounds() {
        assert!(Gate::new(GateKind::Not, 1).is_ok());
        assert_eq!(
            Gate::new(GateKind::Not, 2),
            Err(BuildError::InvalidArity {
                kind: GateKind::Not,
                arity: 2
            })
        );
        assert!(Gate::new(GateKind::Not, 0).is_err());
        for kind in GateKind::ALL.into_iter().skip(1) {
            assert!(Gate::new(kind, 0).is_err());
            assert!(Gate::new(kind, 1).is_err());
            assert!(Gate::new(kind, 2).is_ok());
            assert!(Gate::new(kind, 5).is_ok());
        }
    }

    #[test]
    fn test_set_arity_resets_sources() {
        let mut gate = Gate::with_sources(GateKind::And, &[-1, 2]).unwrap();
        gate.set_arity(2).unwrap();
        assert_eq!(gate.source(0), -1);

        gate.set_arity(3).unwrap();
        assert_eq!(gate.arity(), 3);
        assert!(gate.origins().iter().all(Option::is_none));

        gate.set_source(0, 4).unwrap();
        assert!(gate.set_arity(1).is_err());
        assert_eq!(gate.source(0), 4);
    }

    #[test]
    fn test_set_source_contract() {
        let mut gate = Gate::new(GateKind::Or, 2).unwrap();
        assert_eq!(gate.set_source(0, 0), Err(BuildError::ZeroOrigin));
        assert_eq!(
            gate.set_source(2, 1),
            Err(BuildError::InvalidSourceIndex { index: 2, arity: 2 })
        );
        gate.set_source(1, -7).unwrap();
        assert_eq!(gate.origin(1), Some(Origin::Input(7)));
        assert_eq!(gate.source(0), 0);
        assert_eq!(gate.source(9), 0);
    }

    #[test]
    fn test_not_table() {
        assert_eq!(GateKind::Not.apply(&[U]), U);
        assert_eq!(GateKind::Not.apply(&[F]), T);
        assert_eq!(GateKind::Not.apply(&[T]), F);
    }

    #[test]
    fn test_and_nand_tables() {
        let cases = [
            ([F, F], F),
            ([F, T], F),
            ([T, T], T),
            ([F, U], F),
            ([U, F], F),
            ([T, U], U),
            ([U, U], U),
        ];
        for (inputs, expected) in cases {
            assert_eq!(GateKind::And.apply(&inputs), expected, "AND {:?}", inputs);
            assert_eq!(GateKind::Nand.apply(&inputs), !expected, "NAND {:?}", inputs);
        }
    }

    #[test]
    fn test_or_nor_tables() {
        let cases = [
            ([F, F], F),
            ([F, T], T),
            ([T, T], T),
            ([T, U], T),
            ([U, T], T),
            ([F, U], U),
            ([U, U], U),
        ];
        for (inputs, expected) in cases {
            assert_eq!(GateKind::Or.apply(&inputs), expected, "OR {:?}", inputs);
            assert_eq!(GateKind::Nor.apply(&inputs), !expected, "NOR {:?}", inputs);
        }
    }

    #[test]
    fn test_xor_xnor_tables() {
        let cases: [(&[Signal], Signal); 7] = [
            (&[F, F], F),
            (&[F, T], T),
            (&[T, T], F),
            (&[T, T, T], T),
            (&[T, F, T, T], T),
            (&[T, U], U),
            (&[F, F, U], U),
        ];
        for (inputs, expected) in cases {
            assert_eq!(GateKind::Xor.apply(inputs), expected, "XOR {:?}", inputs);
            assert_eq!(GateKind::Xnor.apply(inputs), !expected, "XNOR {:?}", inputs);
        }
    }

    #[test]
    fn test_wide_gates_short_circuit() {
        assert_eq!(GateKind::And.apply(&[U, U, U, F]), F);
        assert_eq!(GateKind::Nor.apply(&[U, T, U]), F);
        assert_eq!(GateKind::Nand.apply(&[T, T, U]), U);
    }

    #[test]
    fn test_evaluate_rejects_wrong_length() {
        let mut gate = Gate::new(GateKind::Or, 2).unwrap();
        assert_eq!(gate.evaluate(&[T, F]), T);
        assert_eq!(gate.output(), T);

        assert_eq!(gate.evaluate(&[T]), U);
        assert_eq!(gate.output(), U);
        assert_eq!(gate.evaluate(&[T, T, T]), U);
    }

    #[test]
    fn test_display() {
        let gate = Gate::with_sources(GateKind::Xnor, &[-1, 3, 2]).unwrap();
        assert_eq!(gate.to_string(), "NX 3: -1 3 2");
        let unset = Gate::new(GateKind::Not, 1).unwrap();
        assert_eq!(unset.to_string(), "NT 1: 0");
        assert_eq!(GateKind::Nand.to_string(), "NAND");
    }
}
