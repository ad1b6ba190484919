//! Enclosure (bracket/quote) mapping with O(1) lookup
//!
//! Handles paired delimiters with support for symmetric quotes.

use crate::error::{CoreError, Result};
use std::collections::HashMap;

/// Maximum number of enclosure pairs a profile may declare
pub const MAX_ENCLOSURE_PAIRS: usize = 255;

/// One configured pair of enclosure characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnclosurePair {
    /// Opening character
    pub open: char,
    /// Closing character
    pub close: char,
    /// true if the same char both opens and closes (straight quote)
    pub symmetric: bool,
}

impl EnclosurePair {
    /// Asymmetric pair such as `(` / `)`
    pub const fn new(open: char, close: char) -> Self {
        Self {
            open,
            close,
            symmetric: false,
        }
    }

    /// Symmetric pair such as `"` / `"`
    pub const fn symmetric(quote: char) -> Self {
        Self {
            open: quote,
            close: quote,
            symmetric: true,
        }
    }
}

/// Information about an enclosure character
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EnclosureInfo {
    /// Index of the pair, used for the depth counters
    pub type_id: u8,
    /// +1 for opening, -1 for closing, 0 for symmetric "unknown" mark
    pub delta: i8,
    /// true if identical char can mean both open/close (straight quote)
    pub symmetric: bool,
}

/// Enclosure character mapping table
#[derive(Debug, Clone, Default)]
pub struct EnclosureTable {
    map: HashMap<char, EnclosureInfo>,
    pairs: Vec<EnclosurePair>,
}

impl EnclosureTable {
    /// Create from pairs configuration
    pub fn new(pairs: Vec<EnclosurePair>) -> Result<Self> {
        if pairs.len() > MAX_ENCLOSURE_PAIRS {
            return Err(CoreError::TooManyEnclosurePairs {
                count: pairs.len(),
                max: MAX_ENCLOSURE_PAIRS,
            });
        }

        let mut map = HashMap::new();
        for (type_id, pair) in pairs.iter().enumerate() {
            let type_id = type_id as u8;
            if pair.symmetric {
                let info = EnclosureInfo {
                    type_id,
                    delta: 0,
                    symmetric: true,
                };
                map.insert(pair.open, info);
                map.insert(pair.close, info);
            } else {
                map.insert(
                    pair.open,
                    EnclosureInfo {
                        type_id,
                        delta: 1,
                        symmetric: false,
                    },
                );
                map.insert(
                    pair.close,
                    EnclosureInfo {
                        type_id,
                        delta: -1,
                        symmetric: false,
                    },
                );
            }
        }

        Ok(Self { map, pairs })
    }

    /// Look up enclosure info for character
    #[inline]
    pub fn get(&self, ch: char) -> Option<EnclosureInfo> {
        self.map.get(&ch).copied()
    }

    /// Number of configured pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pairs are configured
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Configured pairs in declaration order
    pub fn pairs(&self) -> &[EnclosurePair] {
        &self.pairs
    }

    /// Whether `ch` participates in any pair
    pub fn contains(&self, ch: char) -> bool {
        self.map.contains_key(&ch)
    }
}
