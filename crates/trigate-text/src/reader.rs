//! Parser for the circuit text format.
//!
//! ```text
//! CIRCUITO <inputs> <outputs> <gates>
//! PORTAS
//! 0) OR 2: -1 -2
//! 1) NT 1: -2
//! 2) AN 2: 1 2
//! SAIDAS
//! 0) 3
//! ```
//!
//! Tokens are separated by any whitespace; line breaks carry no meaning.
//! Anything after the last output is ignored.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::SplitWhitespace;

use tracing::debug;
use trigate_core::{Circuit, Gate, GateKind, Limits};

use crate::error::{FormatError, Section};

pub(crate) const HEADER: &str = "CIRCUITO";
pub(crate) const GATES: &str = "PORTAS";
pub(crate) const OUTPUTS: &str = "SAIDAS";

/// Whitespace token cursor that knows which section it is in.
struct Tokens<'a> {
    words: SplitWhitespace<'a>,
    pending: Option<&'a str>,
    section: Section,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            words: text.split_whitespace(),
            pending: None,
            section: Section::Header,
        }
    }

    fn next(&mut self) -> Result<&'a str, FormatError> {
        self.pending
            .take()
            .or_else(|| self.words.next())
            .ok_or(FormatError::UnexpectedEof(self.section))
    }

    /// Consume a section keyword and enter `section`.
    fn keyword(&mut self, expected: &'static str, section: Section) -> Result<(), FormatError> {
        self.section = section;
        let found = self.next()?;
        if found != expected {
            return Err(FormatError::ExpectedKeyword {
                expected,
                found: found.to_string(),
            });
        }
        Ok(())
    }

    fn int(&mut self) -> Result<i32, FormatError> {
        let token = self.next()?;
        token
            .parse()
            .map_err(|_| FormatError::InvalidNumber(token.to_string()))
    }

    /// A strictly positive header count.
    fn count(&mut self, what: &'static str) -> Result<usize, FormatError> {
        let token = self.next()?;
        let value: i64 = token
            .parse()
            .map_err(|_| FormatError::InvalidNumber(token.to_string()))?;
        usize::try_from(value)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(FormatError::InvalidCount { what, value })
    }

    /// The `<expected>)` prefix of a gate or output line.
    fn index(&mut self, expected: usize) -> Result<(), FormatError> {
        let found = self.next()?;
        let matches = found
            .strip_suffix(')')
            .is_some_and(|digits| digits == expected.to_string());
        if !matches {
            return Err(FormatError::BadIndex {
                expected,
                found: found.to_string(),
            });
        }
        Ok(())
    }

    /// Gate arity followed by `:`, written `2:`, `2 :` or `2:-1`.
    fn arity(&mut self) -> Result<usize, FormatError> {
        let token = self.next()?;
        let digits = match token.split_once(':') {
            Some((digits, rest)) => {
                if !rest.is_empty() {
                    self.pending = Some(rest);
                }
                digits
            }
            None => {
                let colon = self.next()?;
                match colon.strip_prefix(':') {
                    Some("") => {}
                    Some(rest) => self.pending = Some(rest),
                    None => return Err(FormatError::MissingColon(colon.to_string())),
                }
                token
            }
        };
        digits
            .parse()
            .map_err(|_| FormatError::InvalidNumber(digits.to_string()))
    }
}

/// Circuit text parser.
#[derive(Debug, Clone, Default)]
pub struct Reader {
    limits: Limits,
}

impl Reader {
    /// Create a reader with default limits.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create a reader with custom limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Parse a complete circuit from `text`.
    pub fn read_str(&self, text: &str) -> Result<Circuit, FormatError> {
        let mut tokens = Tokens::new(text);

        tokens.keyword(HEADER, Section::Header)?;
        let inputs = tokens.count("input")?;
        let outputs = tokens.count("output")?;
        let gates = tokens.count("gate")?;
        check_limit("inputs", inputs, self.limits.max_inputs)?;
        check_limit("outputs", outputs, self.limits.max_outputs)?;
        check_limit("gates", gates, self.limits.max_gates)?;

        let mut circuit = Circuit::with_size(inputs, outputs, gates);

        tokens.keyword(GATES, Section::Gates)?;
        for i in 0..gates {
            let position = i + 1;
            tokens.index(i)?;
            let tag = tokens.next()?;
            let kind = GateKind::from_tag(tag)
                .ok_or_else(|| FormatError::UnknownGateKind(tag.to_string()))?;
            let arity = tokens.arity()?;
            check_limit("arity", arity, self.limits.max_arity)?;

            let mut gate = Gate::new(kind, arity)
                .map_err(|source| FormatError::InvalidGate { position, source })?;
            for slot in 0..arity {
                let id = tokens.int()?;
                gate.set_source(slot, id)
                    .map_err(|source| FormatError::InvalidGate { position, source })?;
            }
            circuit.insert_gate(position, gate)?;
        }

        tokens.keyword(OUTPUTS, Section::Outputs)?;
        for i in 0..outputs {
            tokens.index(i)?;
            let id = tokens.int()?;
            if !(circuit.is_input_id(id) || circuit.is_gate_id(id)) {
                return Err(FormatError::InvalidOutputOrigin { output: i + 1, id });
            }
            circuit.set_output(i + 1, id)?;
        }

        debug!(inputs, outputs, gates, "parsed circuit");
        Ok(circuit)
    }

    /// Read all of `reader` and parse it.
    pub fn read<R: Read>(&self, mut reader: R) -> Result<Circuit, FormatError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.read_str(&text)
    }

    /// Parse into an existing circuit.
    ///
    /// On success `circuit` is replaced; on failure it is left empty.
    pub fn read_into<R: Read>(&self, circuit: &mut Circuit, reader: R) -> Result<(), FormatError> {
        match self.read(reader) {
            Ok(parsed) => {
                *circuit = parsed;
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "rejected circuit text");
                circuit.clear();
                Err(e)
            }
        }
    }

    /// Read and parse the file at `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Circuit, FormatError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let circuit = self.read_str(&text)?;
        debug!(path = %path.display(), "loaded circuit");
        Ok(circuit)
    }
}

fn check_limit(what: &'static str, value: usize, limit: usize) -> Result<(), FormatError> {
    if value > limit {
        return Err(FormatError::LimitExceeded { what, value, limit });
    }
    Ok(())
}

/// Parse `text` with default limits.
pub fn from_str(text: &str) -> Result<Circuit, FormatError> {
    Reader::new().read_str(text)
}

/// Read a circuit from `reader` with default limits.
pub fn read<R: Read>(reader: R) -> Result<Circuit, FormatError> {
    Reader::new().read(reader)
}

/// Read into `circuit`, leaving it empty on failure.
pub fn read_into<R: Read>(circuit: &mut Circuit, reader: R) -> Result<(), FormatError> {
    Reader::new().read_into(circuit, reader)
}

/// Load a circuit file with default limits.
pub fn load(path: impl AsRef<Path>) -> Result<Circuit, FormatError> {
    Reader::new().load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trigate_core::{BuildError, Signal};

    const SAMPLE: &str = "CIRCUITO 2 1 3\nPORTAS\n0) OR 2: -1 -2\n1) NT 1: -2\n2) AN 2: 1 2\nSAIDAS\n0) 3\n";

    fn err(text: &str) -> FormatError {
        from_str(text).unwrap_err()
    }

    #[test]
    fn test_sample() {
        let mut c = from_str(SAMPLE).unwrap();
        assert_eq!((c.input_count(), c.output_count(), c.gate_count()), (2, 1, 3));
        assert_eq!(c.gate_kind(2), Some(GateKind::Not));
        assert_eq!(c.gate_source(3, 0), 1);
        assert_eq!(c.output_id(1), 3);
        assert_eq!(
            c.simulate(&[Signal::True, Signal::False]).unwrap(),
            vec![Signal::True]
        );
    }

    #[test]
    fn test_lenient_layout() {
        let text = "CIRCUITO 2 1 2 PORTAS 0) or 2 : -1 -2 1) nt 1:1 SAIDAS 0) -2 trailing";
        let c = from_str(text).unwrap();
        assert_eq!(c.gate_kind(1), Some(GateKind::Or));
        assert_eq!(c.gate_source(1, 1), -2);
        assert_eq!(c.gate_source(2, 0), 1);
        assert_eq!(c.output_id(1), -2);
    }

    #[test]
    fn test_bad_keywords() {
        assert!(matches!(
            err("CIRCUIT 2 1 3"),
            FormatError::ExpectedKeyword { expected: "CIRCUITO", .. }
        ));
        assert!(matches!(
            err("CIRCUITO 1 1 1 GATES"),
            FormatError::ExpectedKeyword { expected: "PORTAS", .. }
        ));
        assert!(matches!(
            err("CIRCUITO 1 1 1 PORTAS 0) NT 1: -1 OUTPUTS"),
            FormatError::ExpectedKeyword { expected: "SAIDAS", .. }
        ));
    }

    #[test]
    fn test_bad_counts() {
        assert!(matches!(
            err("CIRCUITO 0 1 1"),
            FormatError::InvalidCount { what: "input", value: 0 }
        ));
        assert!(matches!(
            err("CIRCUITO 1 -1 1"),
            FormatError::InvalidCount { what: "output", value: -1 }
        ));
        assert!(matches!(err("CIRCUITO 1 1 x"), FormatError::InvalidNumber(_)));
    }

    #[test]
    fn test_bad_index_prefix() {
        assert!(matches!(
            err("CIRCUITO 1 1 1 PORTAS 1) NT 1: -1"),
            FormatError::BadIndex { expected: 0, .. }
        ));
        assert!(matches!(
            err("CIRCUITO 1 1 1 PORTAS 0 NT 1: -1"),
            FormatError::BadIndex { expected: 0, .. }
        ));
        assert!(matches!(
            err("CIRCUITO 1 1 1 PORTAS 0) NT 1: -1 SAIDAS 00) 1"),
            FormatError::BadIndex { expected: 0, .. }
        ));
    }

    #[test]
    fn test_unknown_kind() {
        assert!(matches!(
            err("CIRCUITO 1 1 1 PORTAS 0) ZZ 2: -1 -1"),
            FormatError::UnknownGateKind(tag) if tag == "ZZ"
        ));
    }

    #[test]
    fn test_bad_arity() {
        assert!(matches!(
            err("CIRCUITO 1 1 1 PORTAS 0) NT 2: -1 -1"),
            FormatError::InvalidGate {
                position: 1,
                source: BuildError::InvalidArity { .. }
            }
        ));
        assert!(matches!(
            err("CIRCUITO 1 1 1 PORTAS 0) AN 1: -1"),
            FormatError::InvalidGate { .. }
        ));
        assert!(matches!(
            err("CIRCUITO 1 1 1 PORTAS 0) AN 2 -1 -1"),
            FormatError::MissingColon(_)
        ));
    }

    #[test]
    fn test_zero_source() {
        assert!(matches!(
            err("CIRCUITO 1 1 1 PORTAS 0) OR 2: -1 0"),
            FormatError::InvalidGate {
                position: 1,
                source: BuildError::ZeroOrigin
            }
        ));
    }

    #[test]
    fn test_output_origin_checked() {
        assert!(matches!(
            err("CIRCUITO 1 1 1 PORTAS 0) NT 1: -1 SAIDAS 0) 2"),
            FormatError::InvalidOutputOrigin { output: 1, id: 2 }
        ));
        assert!(matches!(
            err("CIRCUITO 1 1 1 PORTAS 0) NT 1: -1 SAIDAS 0) 0"),
            FormatError::InvalidOutputOrigin { output: 1, id: 0 }
        ));
    }

    #[test]
    fn test_premature_end() {
        assert!(matches!(err(""), FormatError::UnexpectedEof(Section::Header)));
        assert!(matches!(
            err("CIRCUITO 2 1 3\nPORTAS\n0) OR 2: -1"),
            FormatError::UnexpectedEof(Section::Gates)
        ));
        assert!(matches!(
            err("CIRCUITO 1 2 1 PORTAS 0) NT 1: -1 SAIDAS 0) 1"),
            FormatError::UnexpectedEof(Section::Outputs)
        ));
    }

    #[test]
    fn test_limits() {
        let reader = Reader::with_limits(Limits::new(1, 1, 1, 2));
        assert!(matches!(
            reader.read_str("CIRCUITO 2 1 1"),
            Err(FormatError::LimitExceeded { what: "inputs", value: 2, limit: 1 })
        ));
        assert!(matches!(
            reader.read_str("CIRCUITO 1 1 1 PORTAS 0) OR 3: -1 -1 -1"),
            Err(FormatError::LimitExceeded { what: "arity", .. })
        ));
        assert!(reader
            .read_str("CIRCUITO 1 1 1 PORTAS 0) OR 2: -1 -1 SAIDAS 0) 1")
            .is_ok());
    }

    #[test]
    fn test_read_into_clears_on_failure() {
        let mut c = from_str(SAMPLE).unwrap();
        let result = read_into(&mut c, "CIRCUITO 2 1 3 PORTAS 0) QQ".as_bytes());
        assert!(result.is_err());
        assert!(c.is_empty());

        read_into(&mut c, SAMPLE.as_bytes()).unwrap();
        assert!(c.is_valid());
    }
}
