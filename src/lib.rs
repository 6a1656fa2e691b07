//! Scores forum posts by how much the code in them overlaps with a reference
//! source file.
//!
//! The reference file is turned into a token -> count [`ReferenceIndex`]. Every
//! post record is parsed, the tokens of its `<code>` blocks are emitted under
//! the post title, the emissions are grouped by title and each group is scored
//! as the sum of the reference counts of its tokens.

macro_rules! log_time_cost {
    ($str: expr, $time: expr) => {
        log::info!("{} costs: {}ms", $str, $time.elapsed().as_millis());
    };
}

pub mod analyzer;
pub mod config;
pub mod index;
pub mod job;
pub mod record;

pub use config::JobConfig;
pub use index::ReferenceIndex;
pub use job::{evaluate, evaluate_with, ScoredPost};

/// Reads the reference file once and indexes its tokens.
pub fn build_reference_index<P: AsRef<std::path::Path>>(path: P) -> index::Result<ReferenceIndex> {
    ReferenceIndex::from_path(path)
}
