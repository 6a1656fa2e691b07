use crate::job::reducer::ScoredPost;
use std::fs::{create_dir, create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const SUCCESS_MARKER: &str = "_SUCCESS";

#[derive(Debug)]
pub struct OutputDir {
    dir: PathBuf,
}

impl OutputDir {
    /// Creates the output directory. Fails with `AlreadyExists` if it is there already.
    pub fn create(dir: &Path) -> std::io::Result<Self> {
        if let Some(parent) = dir.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        create_dir(dir)?;

        Ok(OutputDir {
            dir: dir.to_path_buf(),
        })
    }

    pub fn partition_path(&self, partition: usize) -> PathBuf {
        self.dir.join(format!("part-r-{:05}", partition))
    }

    /// Writes one `title<TAB>score` line per post.
    pub fn write_partition(&self, partition: usize, posts: &[ScoredPost]) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(self.partition_path(partition))?);
        for post in posts {
            writeln!(writer, "{}", post)?;
        }
        writer.flush()
    }

    pub fn commit(self) -> std::io::Result<()> {
        File::create(self.dir.join(SUCCESS_MARKER))?;
        Ok(())
    }
}
