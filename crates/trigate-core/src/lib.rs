//! trigate: combinational logic circuits over three-valued signals.
//!
//! # Overview
//!
//! A [`Circuit`] is a set of numbered gates, a number of circuit inputs
//! and a list of outputs. Every gate input and every circuit output names
//! its [`Origin`]: either a circuit input or another gate's output.
//! Signals are [`Signal`]s, so a value may be `Undefined` as well as
//! true or false.
//!
//! - **Seven gate kinds**: NOT, AND, NAND, OR, NOR, XOR, XNOR
//! - **Conservative ternary rules**: a controlling input decides the
//!   output even when the other inputs are unknown
//! - **Fixed-point evaluation**: gates may reference any position; cycles
//!   are detected by lack of progress and left `Undefined`
//!
//! # Example
//!
//! ```
//! use trigate_core::{CircuitBuilder, GateKind, Signal};
//!
//! // out = OR(in1, in2) AND NOT(in2)
//! let mut builder = CircuitBuilder::new(2);
//! let or = builder.gate(GateKind::Or, &[-1, -2]).unwrap();
//! let not = builder.gate(GateKind::Not, &[-2]).unwrap();
//! let and = builder.gate(GateKind::And, &[or as i32, not as i32]).unwrap();
//! builder.output(and as i32).unwrap();
//!
//! let mut circuit = builder.finish().unwrap();
//!
//! let outputs = circuit.simulate(&[Signal::True, Signal::False]).unwrap();
//! assert_eq!(outputs, vec![Signal::True]);
//!
//! // An unknown input propagates only where it matters.
//! let outputs = circuit.simulate(&[Signal::Undefined, Signal::False]).unwrap();
//! assert_eq!(outputs, vec![Signal::Undefined]);
//! ```
//!
//! # Building slot by slot
//!
//! Circuits can also be sized first and filled in any order, which is how
//! the text reader and interactive front ends use them:
//!
//! ```
//! use trigate_core::{Circuit, Signal};
//!
//! let mut circuit = Circuit::with_size(1, 1, 1);
//! assert!(!circuit.is_valid());
//!
//! circuit.set_gate(1, "nt", 1).unwrap();
//! circuit.set_gate_source(1, 0, -1).unwrap();
//! circuit.set_output(1, 1).unwrap();
//!
//! assert!(circuit.is_valid());
//! assert_eq!(circuit.simulate(&[Signal::True]).unwrap(), vec![Signal::False]);
//! ```

pub mod builder;
pub mod circuit;
pub mod error;
pub mod eval;
pub mod gate;
pub mod limits;
pub mod origin;
pub mod signal;

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use error::{BuildError, EvalError, ParseSignalError, ValidityError};
pub use eval::{evaluate, Evaluation, Settle};
pub use gate::{Gate, GateKind};
pub use limits::Limits;
pub use origin::Origin;
pub use signal::Signal;
