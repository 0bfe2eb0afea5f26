//! Block references for engine calls.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The block whose state an engine call runs against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRef {
    /// The latest committed state.
    #[default]
    Latest,
    /// A specific historical block.
    Number(u64),
}

impl BlockRef {
    /// Returns the block number for historical references.
    pub const fn number(&self) -> Option<u64> {
        match self {
            Self::Latest => None,
            Self::Number(n) => Some(*n),
        }
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Number(n) => write!(f, "0x{n:x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_tags() {
        assert_eq!(BlockRef::Latest.to_string(), "latest");
        assert_eq!(BlockRef::Number(255).to_string(), "0xff");
        assert_eq!(BlockRef::Number(0).to_string(), "0x0");
    }

    #[test]
    fn default_is_latest() {
        assert_eq!(BlockRef::default(), BlockRef::Latest);
        assert_eq!(BlockRef::Latest.number(), None);
        assert_eq!(BlockRef::Number(9).number(), Some(9));
    }
}
