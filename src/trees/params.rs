use crate::error::{Result, TreeError};
use serde::{Deserialize, Serialize};

/// Stopping rules for growing a tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: Option<u16>,
    pub min_size: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParams {
    pub fn new() -> Self {
        Self {
            max_depth: None,
            min_size: 1,
        }
    }

    /// Branches holding at most `min_size` rows become leaves.
    pub fn set_min_size(&mut self, min_size: usize) {
        self.min_size = min_size;
    }

    pub fn set_max_depth(&mut self, max_depth: Option<u16>) -> Result<()> {
        if max_depth.is_some_and(|depth| depth < 1) {
            return Err(TreeError::InvalidParameter(
                "The maximum depth must be greater than 0.".into(),
            ));
        }
        self.max_depth = max_depth;
        Ok(())
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    pub fn max_depth(&self) -> Option<u16> {
        self.max_depth
    }

    /// Whether a node at `depth` has used up the depth budget.
    pub(crate) fn depth_reached(&self, depth: usize) -> bool {
        self.max_depth
            .is_some_and(|max_depth| depth >= usize::from(max_depth))
    }
}
