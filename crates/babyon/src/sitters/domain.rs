use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a sitter account; also the key of the sitter's profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SitterId(pub u64);

impl fmt::Display for SitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account-level sitter record owned by the account service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sitter {
    pub id: SitterId,
    pub email: String,
    pub display_name: String,
}
