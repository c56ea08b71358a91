//! Three-valued signal type.
//!
//! A [`Signal`] is either a concrete boolean or `Undefined`, which stands
//! for a value that is unknown or has not been computed yet.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::str::FromStr;

use crate::error::ParseSignalError;

/// Ternary logic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    /// Unknown or not yet computed.
    #[default]
    Undefined,
    /// Logical false.
    False,
    /// Logical true.
    True,
}

impl Signal {
    /// All three values, in declaration order.
    pub const ALL: [Signal; 3] = [Signal::Undefined, Signal::False, Signal::True];

    /// Returns `true` for `False` and `True`.
    #[inline]
    pub fn is_defined(self) -> bool {
        self != Signal::Undefined
    }

    /// Concrete boolean value, if any.
    #[inline]
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Signal::Undefined => None,
            Signal::False => Some(false),
            Signal::True => Some(true),
        }
    }

    /// Single-character form used for display: `?`, `F` or `T`.
    pub fn as_char(self) -> char {
        match self {
            Signal::Undefined => '?',
            Signal::False => 'F',
            Signal::True => 'T',
        }
    }
}

impl From<bool> for Signal {
    #[inline]
    fn from(b: bool) -> Self {
        if b {
            Signal::True
        } else {
            Signal::False
        }
    }
}

impl From<Option<bool>> for Signal {
    fn from(b: Option<bool>) -> Self {
        b.map_or(Signal::Undefined, Signal::from)
    }
}

impl Not for Signal {
    type Output = Signal;

    #[inline]
    fn not(self) -> Signal {
        match self {
            Signal::Undefined => Signal::Undefined,
            Signal::False => Signal::True,
            Signal::True => Signal::False,
        }
    }
}

impl BitAnd for Signal {
    type Output = Signal;

    fn bitand(self, rhs: Signal) -> Signal {
        match (self, rhs) {
            (Signal::False, _) | (_, Signal::False) => Signal::False,
            (Signal::True, Signal::True) => Signal::True,
            _ => Signal::Undefined,
        }
    }
}

impl BitOr for Signal {
    type Output = Signal;

    fn bitor(self, rhs: Signal) -> Signal {
        match (self, rhs) {
            (Signal::True, _) | (_, Signal::True) => Signal::True,
            (Signal::False, Signal::False) => Signal::False,
            _ => Signal::Undefined,
        }
    }
}

impl BitXor for Signal {
    type Output = Signal;

    fn bitxor(self, rhs: Signal) -> Signal {
        match (self.to_bool(), rhs.to_bool()) {
            (Some(a), Some(b)) => Signal::from(a ^ b),
            _ => Signal::Undefined,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Signal {
    type Err = ParseSignalError;

    /// Accepts `?`/`X`/`U`, `F`/`0` and `T`/`1`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "?" | "X" | "U" => Ok(Signal::Undefined),
            "F" | "0" => Ok(Signal::False),
            "T" | "1" => Ok(Signal::True),
            _ => Err(ParseSignalError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use Signal::{False as F, True as T, Undefined as U};

    #[test]
    fn test_not() {
        assert_eq!(!U, U);
        assert_eq!(!F, T);
        assert_eq!(!T, F);
    }

    #[test]
    fn test_and_short_circuits_on_false() {
        assert_eq!(F & U, F);
        assert_eq!(U & F, F);
        assert_eq!(T & U, U);
        assert_eq!(T & T, T);
        assert_eq!(U & U, U);
    }

    #[test]
    fn test_or_short_circuits_on_true() {
        assert_eq!(T | U, T);
        assert_eq!(U | T, T);
        assert_eq!(F | U, U);
        assert_eq!(F | F, F);
    }

    #[test]
    fn test_xor_needs_both_defined() {
        assert_eq!(T ^ U, U);
        assert_eq!(U ^ F, U);
        assert_eq!(T ^ F, T);
        assert_eq!(T ^ T, F);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Signal::from(true), T);
        assert_eq!(Signal::from(None), U);
        assert_eq!(T.to_bool(), Some(true));
        assert_eq!(U.to_bool(), None);
        assert!(!U.is_defined());
        assert_eq!(Signal::default(), U);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("t".parse::<Signal>(), Ok(T));
        assert_eq!("0".parse::<Signal>(), Ok(F));
        assert_eq!("?".parse::<Signal>(), Ok(U));
        assert!("maybe".parse::<Signal>().is_err());
        assert_eq!(format!("{}{}{}", U, F, T), "?FT");
    }
}
