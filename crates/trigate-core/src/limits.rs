//! Resource limits for untrusted circuit descriptions.

/// Upper bounds checked before a circuit read from text is allocated.
///
/// A header line can declare arbitrarily large counts; these limits let a
/// reader refuse it up front instead of allocating the slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of circuit inputs.
    pub max_inputs: usize,
    /// Maximum number of circuit outputs.
    pub max_outputs: usize,
    /// Maximum number of gates.
    pub max_gates: usize,
    /// Maximum inputs on a single gate.
    pub max_arity: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_inputs: 1024,
            max_outputs: 1024,
            max_gates: 65536,
            max_arity: 64,
        }
    }
}

impl Limits {
    /// Create limits with custom values.
    pub fn new(max_inputs: usize, max_outputs: usize, max_gates: usize, max_arity: usize) -> Self {
        Self {
            max_inputs,
            max_outputs,
            max_gates,
            max_arity,
        }
    }

    /// Effectively unbounded, for trusted input and tests.
    pub fn permissive() -> Self {
        Self {
            max_inputs: usize::MAX,
            max_outputs: usize::MAX,
            max_gates: usize::MAX,
            max_arity: usize::MAX,
        }
    }

    /// Tight limits for small hand-written circuits.
    pub fn strict() -> Self {
        Self {
            max_inputs: 32,
            max_outputs: 32,
            max_gates: 256,
            max_arity: 8,
        }
    }

    /// Whether a circuit of the given shape fits.
    pub fn admits(&self, inputs: usize, outputs: usize, gates: usize) -> bool {
        inputs <= self.max_inputs && outputs <= self.max_outputs && gates <= self.max_gates
    }
}
