use serde::{Deserialize, Serialize};

/// Outcome of a predicate that may be undecidable at the available information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Truth {
    /// Proven true.
    True,
    /// Proven false.
    False,
    /// Not decided.
    Unknown,
}

impl Truth {
    /// Decided truth value of a boolean.
    pub fn from_bool(value: bool) -> Self {
        if value {
            Truth::True
        } else {
            Truth::False
        }
    }

    /// True only for [`Truth::True`].
    pub fn is_true(self) -> bool {
        self == Truth::True
    }

    /// True only for [`Truth::False`].
    pub fn is_false(self) -> bool {
        self == Truth::False
    }

    /// Three-valued negation.
    pub fn not(self) -> Self {
        match self {
            Truth::True => Truth::False,
            Truth::False => Truth::True,
            Truth::Unknown => Truth::Unknown,
        }
    }

    /// Three-valued conjunction.
    pub fn and(self, other: Truth) -> Self {
        match (self, other) {
            (Truth::False, _) | (_, Truth::False) => Truth::False,
            (Truth::True, Truth::True) => Truth::True,
            _ => Truth::Unknown,
        }
    }
}
