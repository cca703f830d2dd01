//! Tuning options for the batched Cholesky drivers

use crate::error::{Error, Result};

/// Default order at or below which a block is factorized unblocked.
pub const DEFAULT_PANEL_THRESHOLD: usize = 16;

/// Default column block width of the blocked driver.
pub const DEFAULT_BLOCK_SIZE: usize = 128;

/// Default maximum batch order handled by the recursive driver under
/// [`CholeskyAlgorithm::Auto`].
pub const DEFAULT_CROSSOVER: usize = 256;

/// Driver used to factorize a batch.
///
/// Every choice produces bit-identical factors and identical info codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CholeskyAlgorithm {
    /// Recursive while the batch's maximum order is at most
    /// [`PotrfOptions::crossover`], blocked otherwise
    #[default]
    Auto,
    /// Recursive halving down to the panel threshold
    Recursive,
    /// Right-looking column blocks, diagonal blocks factorized recursively
    Blocked,
}

/// Options for [`potrf_vbatched`](super::BatchedCholeskyAlgorithms::potrf_vbatched).
///
/// # Example
///
/// ```
/// use numr_batched::algorithm::cholesky::{CholeskyAlgorithm, PotrfOptions};
///
/// let options = PotrfOptions::default()
///     .with_panel_threshold(8)
///     .with_algorithm(CholeskyAlgorithm::Recursive);
/// assert_eq!(options.panel_threshold, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotrfOptions {
    /// Blocks of order `<= panel_threshold` use the unblocked factorizer.
    /// Also the granularity of recursive splits. Must be at least 1.
    pub panel_threshold: usize,
    /// Column block width of the blocked driver. Must be at least 1.
    pub block_size: usize,
    /// Largest maximum order routed to the recursive driver by `Auto`.
    pub crossover: usize,
    /// Driver selection
    pub algorithm: CholeskyAlgorithm,
}

impl Default for PotrfOptions {
    fn default() -> Self {
        Self {
            panel_threshold: DEFAULT_PANEL_THRESHOLD,
            block_size: DEFAULT_BLOCK_SIZE,
            crossover: DEFAULT_CROSSOVER,
            algorithm: CholeskyAlgorithm::Auto,
        }
    }
}

impl PotrfOptions {
    /// Set the panel threshold
    pub fn with_panel_threshold(mut self, panel_threshold: usize) -> Self {
        self.panel_threshold = panel_threshold;
        self
    }

    /// Set the blocked driver's column block width
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the `Auto` crossover order
    pub fn with_crossover(mut self, crossover: usize) -> Self {
        self.crossover = crossover;
        self
    }

    /// Set the driver
    pub fn with_algorithm(mut self, algorithm: CholeskyAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Check that the options describe a runnable configuration.
    pub fn validate(&self) -> Result<()> {
        if self.panel_threshold == 0 {
            return Err(Error::invalid_argument(
                "panel_threshold",
                "must be at least 1",
            ));
        }
        if self.block_size == 0 {
            return Err(Error::invalid_argument("block_size", "must be at least 1"));
        }
        Ok(())
    }

    /// Concrete driver for a batch whose largest member has order `max_n`.
    ///
    /// Never returns [`CholeskyAlgorithm::Auto`].
    pub fn resolve(&self, max_n: usize) -> CholeskyAlgorithm {
        match self.algorithm {
            CholeskyAlgorithm::Auto if max_n <= self.crossover => CholeskyAlgorithm::Recursive,
            CholeskyAlgorithm::Auto => CholeskyAlgorithm::Blocked,
            other => other,
        }
    }
}
