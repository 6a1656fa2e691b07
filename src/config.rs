use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Knobs of the local job runner. Every key is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Map worker threads.
    pub workers: usize,
    /// Reduce partitions, one output file each.
    pub reduce_tasks: usize,
    /// Records per channel message to the map workers.
    pub batch_size: usize,
}

impl Default for JobConfig {
    fn default() -> Self {
        JobConfig {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            reduce_tasks: 1,
            batch_size: 256,
        }
    }
}

impl JobConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: JobConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::Invalid("workers must be at least 1".to_string()));
        }
        if self.reduce_tasks == 0 {
            return Err(Error::Invalid("reduce_tasks must be at least 1".to_string()));
        }
        if self.batch_size == 0 {
            return Err(Error::Invalid("batch_size must be at least 1".to_string()));
        }

        Ok(())
    }
}
