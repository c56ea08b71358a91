//! Serializer for the circuit text format.
//!
//! Only valid circuits are written. Validation runs before anything is
//! emitted, so a refused circuit never creates or truncates a file.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;
use trigate_core::Circuit;

use crate::error::FormatError;
use crate::reader::{GATES, HEADER, OUTPUTS};

/// Display adapter producing the text form of a circuit.
///
/// Does not validate; unset sources and outputs print as `0`. Use
/// [`write`] or [`to_string`] for checked output.
pub struct Text<'a>(pub &'a Circuit);

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        writeln!(
            f,
            "{} {} {} {}",
            HEADER,
            c.input_count(),
            c.output_count(),
            c.gate_count()
        )?;
        writeln!(f, "{}", GATES)?;
        for (position, gate) in c.gates() {
            if let Some(gate) = gate {
                writeln!(f, "{}) {}", position - 1, gate)?;
            }
        }
        writeln!(f, "{}", OUTPUTS)?;
        for index in 1..=c.output_count() {
            writeln!(f, "{}) {}", index - 1, c.output_id(index))?;
        }
        Ok(())
    }
}

/// Write `circuit` to `out`.
pub fn write<W: Write>(circuit: &Circuit, mut out: W) -> Result<(), FormatError> {
    circuit.validate()?;
    write!(out, "{}", Text(circuit))?;
    out.flush()?;
    Ok(())
}

/// Render `circuit` as a string.
pub fn to_string(circuit: &Circuit) -> Result<String, FormatError> {
    circuit.validate()?;
    Ok(Text(circuit).to_string())
}

/// Write `circuit` to the file at `path`, creating or truncating it.
pub fn save(circuit: &Circuit, path: impl AsRef<Path>) -> Result<(), FormatError> {
    let path = path.as_ref();
    circuit.validate()?;
    let file = File::create(path)?;
    write(circuit, BufWriter::new(file))?;
    debug!(
        path = %path.display(),
        gates = circuit.gate_count(),
        "saved circuit"
    );
    Ok(())
}
