mod error;
pub mod input;
pub mod mapper;
pub mod output;
pub mod reducer;
pub mod runner;
pub mod shuffle;

pub use error::Error;
pub use error::Result;
pub use mapper::{Mapper, TokenEmission};
pub use reducer::{Aggregator, ScoredPost};
pub use runner::{evaluate, evaluate_with, run_job, JobReport};
pub use shuffle::group_by_title;
