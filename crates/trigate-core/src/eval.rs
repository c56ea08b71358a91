//! Fixed-point evaluator for circuits.
//!
//! Gates may reference gates at later positions, so a single ordered
//! sweep is not enough. The evaluator repeats relaxation passes over the
//! unresolved gates until every gate has a concrete output or a pass
//! resolves nothing. A pass that resolves nothing means the remaining
//! gates sit on, or behind, a dependency cycle; they keep `Undefined`.

use tracing::{debug, trace};

use crate::circuit::Circuit;
use crate::error::EvalError;
use crate::gate::Gate;
use crate::origin::Origin;
use crate::signal::Signal;

/// How a simulation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Every gate reached a concrete value.
    Completed,
    /// A pass made no progress; `unresolved` gates are still `Undefined`.
    Stalled { unresolved: usize },
}

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// One signal per declared output.
    pub outputs: Vec<Signal>,
    /// Relaxation passes performed.
    pub passes: usize,
    pub settle: Settle,
}

impl Evaluation {
    /// `true` when no gate was left `Undefined`.
    pub fn is_complete(&self) -> bool {
        self.settle == Settle::Completed
    }
}

/// Simulate `circuit` on `inputs` and report how the run settled.
///
/// # Errors
///
/// Returns an error if:
/// - `inputs` does not hold exactly one signal per circuit input
/// - The circuit fails validation
///
/// A stall is not an error: affected outputs are `Undefined`.
pub fn evaluate(circuit: &mut Circuit, inputs: &[Signal]) -> Result<Evaluation, EvalError> {
    if inputs.len() != circuit.input_count {
        return Err(EvalError::InputLength {
            expected: circuit.input_count,
            actual: inputs.len(),
        });
    }
    circuit.validate()?;

    // Validation guarantees every slot is occupied and every origin set.
    let wiring: Vec<Vec<Origin>> = circuit
        .gates
        .iter()
        .flatten()
        .map(|gate| gate.origins().iter().flatten().copied().collect())
        .collect();

    for gate in circuit.gates.iter_mut().flatten() {
        gate.set_output(Signal::Undefined);
    }

    let mut operands = Vec::new();
    let mut passes = 0;
    let settle = loop {
        passes += 1;
        let mut progress = false;
        let mut unresolved = 0;

        for (i, origins) in wiring.iter().enumerate() {
            if circuit.gates[i]
                .as_ref()
                .map_or(true, |gate| gate.output().is_defined())
            {
                continue;
            }

            operands.clear();
            operands.extend(
                origins
                    .iter()
                    .map(|&origin| resolve(origin, &circuit.gates, inputs)),
            );

            if let Some(gate) = circuit.gates[i].as_mut() {
                if gate.evaluate(&operands).is_defined() {
                    progress = true;
                } else {
                    unresolved += 1;
                }
            }
        }

        trace!(pass = passes, unresolved, "relaxation pass");

        if unresolved == 0 {
            break Settle::Completed;
        }
        if !progress {
            break Settle::Stalled { unresolved };
        }
    };

    let outputs: Vec<Signal> = circuit
        .outputs
        .iter()
        .flatten()
        .map(|&origin| resolve(origin, &circuit.gates, inputs))
        .collect();
    circuit.last_outputs.clone_from(&outputs);

    debug!(passes, ?settle, "simulation settled");

    Ok(Evaluation {
        outputs,
        passes,
        settle,
    })
}

/// Current value of `origin`: an input signal or a gate's cached output.
fn resolve(origin: Origin, gates: &[Option<Gate>], inputs: &[Signal]) -> Signal {
    match origin {
        Origin::Input(k) => inputs.get(k - 1).copied().unwrap_or_default(),
        Origin::Gate(k) => gates
            .get(k - 1)
            .and_then(Option::as_ref)
            .map_or(Signal::Undefined, Gate::output),
    }
}

impl Circuit {
    /// Simulate the circuit and return one signal per output.
    ///
    /// Each call starts from cleared gate caches, so repeated calls with
    /// the same inputs give the same outputs. See [`evaluate`] for the
    /// variant that also reports passes and stalls.
    pub fn simulate(&mut self, inputs: &[Signal]) -> Result<Vec<Signal>, EvalError> {
        evaluate(self, inputs).map(|evaluation| evaluation.outputs)
    }
}
