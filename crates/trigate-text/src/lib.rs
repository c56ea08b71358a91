//! Text format for trigate circuits.
//!
//! This crate reads and writes the line-oriented circuit description
//! used to persist [`Circuit`](trigate_core::Circuit)s:
//!
//! ```
//! use trigate_core::Signal;
//!
//! let text = "\
//! CIRCUITO 2 1 3
//! PORTAS
//! 0) OR 2: -1 -2
//! 1) NT 1: -2
//! 2) AN 2: 1 2
//! SAIDAS
//! 0) 3
//! ";
//!
//! let mut circuit = trigate_text::from_str(text).unwrap();
//! assert_eq!(
//!     circuit.simulate(&[Signal::True, Signal::False]).unwrap(),
//!     vec![Signal::True]
//! );
//! assert_eq!(trigate_text::to_string(&circuit).unwrap(), text);
//! ```

pub mod error;
pub mod reader;
pub mod writer;

pub use trigate_core;

pub use error::{FormatError, Section};
pub use reader::{from_str, load, read, read_into, Reader};
pub use writer::{save, to_string, write, Text};
