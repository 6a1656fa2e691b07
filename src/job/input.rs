use std::fs::{read_dir, File};
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

/// Files making up the job input. A directory contributes its regular files,
/// skipping names that start with `_` or `.`; sub-directories are not walked.
pub fn input_files(path: &Path) -> std::io::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() || is_hidden(&entry.file_name().to_string_lossy()) {
            log::warn!("skip input entry {}", entry.path().display());
            continue;
        }
        files.push(entry.path());
    }
    files.sort();

    Ok(files)
}

#[inline]
fn is_hidden(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

/// Reads one record into `buf`. A record ends at `\n`, `\r\n` or a lone `\r`;
/// the terminator is consumed but not stored. Returns `false` at end of input.
fn read_record<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<bool> {
    let mut read_any = false;
    let mut after_cr = false;

    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(read_any);
        }

        if after_cr {
            if available[0] == b'\n' {
                reader.consume(1);
            }
            return Ok(true);
        }

        match available.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) => {
                let terminator = available[i];
                buf.extend_from_slice(&available[..i]);
                reader.consume(i + 1);
                if terminator == b'\n' {
                    return Ok(true);
                }
                read_any = true;
                after_cr = true;
            }
            None => {
                let len = available.len();
                buf.extend_from_slice(available);
                reader.consume(len);
                read_any = true;
            }
        }
    }
}

/// Reads `reader` record by record into batches of at most `batch_size` records and
/// hands each batch to `sink`. Lines that are not valid UTF-8 are decoded lossily.
/// Stops early when `sink` returns `false`. Returns the number of records read.
pub fn read_batches<R, S>(reader: R, batch_size: usize, mut sink: S) -> std::io::Result<u64>
where
    R: BufRead,
    S: FnMut(Vec<String>) -> bool,
{
    let mut reader = reader;
    let mut buf = Vec::new();
    let mut batch = Vec::with_capacity(batch_size);
    let mut records = 0u64;

    loop {
        buf.clear();
        if !read_record(&mut reader, &mut buf)? {
            break;
        }

        batch.push(String::from_utf8_lossy(&buf).into_owned());
        records += 1;

        if batch.len() >= batch_size {
            let full = std::mem::replace(&mut batch, Vec::with_capacity(batch_size));
            if !sink(full) {
                return Ok(records);
            }
        }
    }

    if !batch.is_empty() {
        sink(batch);
    }

    Ok(records)
}

pub fn read_file_batches<S>(path: &Path, batch_size: usize, sink: S) -> std::io::Result<u64>
where
    S: FnMut(Vec<String>) -> bool,
{
    let file = File::open(path)?;
    read_batches(BufReader::new(file), batch_size, sink)
}
