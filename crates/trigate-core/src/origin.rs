//! Signal origins.
//!
//! Outside the crate an origin is a signed integer: `k > 0` is the output
//! of gate `k`, `-k` is circuit input `k`, and `0` means unset. Inside the
//! crate it is a typed [`Origin`] and "unset" is `None`.

use std::fmt;

/// Where a gate input or circuit output takes its value from.
///
/// Both indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Circuit input `k`.
    Input(usize),
    /// Output of gate `k`.
    Gate(usize),
}

impl Origin {
    /// Decode a signed origin id. Returns `None` for `0`.
    pub fn from_id(id: i32) -> Option<Origin> {
        match id {
            0 => None,
            k if k > 0 => Some(Origin::Gate(k as usize)),
            k => Some(Origin::Input(k.unsigned_abs() as usize)),
        }
    }

    /// Encode as a signed origin id.
    pub fn to_id(self) -> i32 {
        match self {
            Origin::Input(k) => (k as i32).wrapping_neg(),
            Origin::Gate(k) => k as i32,
        }
    }

    /// Encode an optional origin, mapping `None` to `0`.
    #[inline]
    pub fn id_of(origin: Option<Origin>) -> i32 {
        origin.map_or(0, Origin::to_id)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_id())
    }
}
