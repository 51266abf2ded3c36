use super::transaction::Utility;

/// Mining parameters. Limits are off by default; a limit that cuts a
/// promising branch marks the result as truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningConfig {
    pub min_util: Utility,
    /// Largest itemset size to explore.
    pub max_itemset_len: Option<usize>,
    /// Cap on projected databases built across the whole search.
    pub max_expansions: Option<usize>,
    /// Spread top-level items over the rayon pool.
    pub parallel: bool,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_util: 0.0,
            max_itemset_len: None,
            max_expansions: None,
            parallel: true,
        }
    }
}

impl MiningConfig {
    pub fn new(min_util: Utility) -> Self {
        Self {
            min_util,
            ..Self::default()
        }
    }

    pub fn with_max_itemset_len(mut self, len: usize) -> Self {
        self.max_itemset_len = Some(len);
        self
    }

    pub fn with_max_expansions(mut self, expansions: usize) -> Self {
        self.max_expansions = Some(expansions);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
