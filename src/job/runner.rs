use crate::config::JobConfig;
use crate::index::ReferenceIndex;
use crate::job::input::{input_files, read_file_batches};
use crate::job::mapper::{MapOutcome, Mapper};
use crate::job::output::OutputDir;
use crate::job::reducer::{Aggregator, ScoredPost};
use crate::job::shuffle::{shuffle, Groups, MapOutput, Partitioner};
use crate::job::{Error, Result};
use crossbeam::channel::{self, Sender};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub records: u64,
    /// Records without a body or a title.
    pub skipped: u64,
    pub emissions: u64,
    pub scored_posts: u64,
}

/// Scores every post under `input` against the reference file and writes
/// `title<TAB>score` lines under `output`.
///
/// Returns `Err` only when the reference file cannot be indexed or the
/// configuration is invalid. Anything going wrong once the job has started is
/// logged and reported as `Ok(false)`.
pub fn evaluate<P, Q, R>(reference: P, input: Q, output: R) -> Result<bool>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    evaluate_with(reference, input, output, &JobConfig::default())
}

pub fn evaluate_with<P, Q, R>(reference: P, input: Q, output: R, config: &JobConfig) -> Result<bool>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    config.validate()?;

    let time = Instant::now();
    let index = ReferenceIndex::from_path(reference)?;
    log_time_cost!("build reference index", time);
    log::info!(
        "reference index: {} distinct tokens, {} in total",
        index.len(),
        index.total_tokens()
    );

    match run_job(&index, input.as_ref(), output.as_ref(), config) {
        Ok(report) => {
            log::info!(
                "job done: {} records ({} skipped), {} emissions, {} posts scored",
                report.records,
                report.skipped,
                report.emissions,
                report.scored_posts
            );
            Ok(true)
        }
        Err(e) => {
            log::error!("job failed: {}", e);
            Ok(false)
        }
    }
}

/// Runs map, shuffle and reduce against an already built index.
pub fn run_job(
    index: &ReferenceIndex,
    input: &Path,
    output: &Path,
    config: &JobConfig,
) -> Result<JobReport> {
    if output.exists() {
        return Err(Error::OutputExists(output.to_path_buf()));
    }

    let files = input_files(input)?;
    log::info!("{} input file(s) under {}", files.len(), input.display());

    let partitioner = Partitioner::new(config.reduce_tasks);

    let time = Instant::now();
    let mapper = Mapper::default();
    let (workers, records) = map_phase(&files, partitioner, config, |line, output| {
        mapper.map(line, |title, token| output.emit(title, token))
    })?;
    log_time_cost!("map", time);

    let mut report = JobReport {
        records,
        ..JobReport::default()
    };
    let mut outputs = Vec::with_capacity(workers.len());
    for worker in workers {
        report.skipped += worker.skipped;
        report.emissions += worker.output.emissions();
        outputs.push(worker.output);
    }

    let time = Instant::now();
    let partitions = shuffle(outputs, partitioner);
    log_time_cost!("shuffle", time);

    let time = Instant::now();
    let out = OutputDir::create(output)?;
    report.scored_posts = reduce_phase(index, partitions, &out)?;
    out.commit()?;
    log_time_cost!("reduce", time);

    Ok(report)
}

struct WorkerOutput {
    output: MapOutput,
    skipped: u64,
}

fn map_phase<F>(
    files: &[PathBuf],
    partitioner: Partitioner,
    config: &JobConfig,
    map_line: F,
) -> Result<(Vec<WorkerOutput>, u64)>
where
    F: Fn(&str, &mut MapOutput) -> MapOutcome + Sync,
{
    let (tx, rx) = channel::bounded::<Vec<String>>(config.workers * 2);

    let result = crossbeam::scope(|s| -> Result<(Vec<WorkerOutput>, u64)> {
        let handles: Vec<_> = (0..config.workers)
            .map(|_| {
                let rx = rx.clone();
                let map_line = &map_line;
                s.spawn(move |_| {
                    let mut worker = WorkerOutput {
                        output: MapOutput::new(partitioner),
                        skipped: 0,
                    };

                    for batch in rx {
                        for line in batch {
                            match map_line(&line, &mut worker.output) {
                                MapOutcome::Mapped(_) => (),
                                MapOutcome::NoBody | MapOutcome::NoTitle => worker.skipped += 1,
                            }
                        }
                    }

                    worker
                })
            })
            .collect();
        drop(rx);

        let fed = feed(files, config.batch_size, &tx);
        drop(tx);

        let mut outputs = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.join() {
                Ok(worker) => outputs.push(worker),
                Err(_) => return Err(Error::WorkerPanicked("map")),
            }
        }

        Ok((outputs, fed?))
    });

    result.map_err(|_| Error::WorkerPanicked("map"))?
}

fn feed(files: &[PathBuf], batch_size: usize, tx: &Sender<Vec<String>>) -> Result<u64> {
    let mut records = 0u64;

    for file in files {
        let mut open = true;
        let read = read_file_batches(file, batch_size, |batch| {
            open = tx.send(batch).is_ok();
            open
        })?;
        log::debug!("read {} records from {}", read, file.display());
        records += read;

        // every receiver is gone, so every map worker has died
        if !open {
            return Err(Error::WorkerPanicked("map"));
        }
    }

    Ok(records)
}

fn reduce_phase(index: &ReferenceIndex, partitions: Vec<Groups>, out: &OutputDir) -> Result<u64> {
    let result = crossbeam::scope(|s| -> Result<u64> {
        let handles: Vec<_> = partitions
            .into_iter()
            .enumerate()
            .map(|(n, groups)| {
                s.spawn(move |_| -> std::io::Result<u64> {
                    let aggregator = Aggregator::new(index);
                    let posts: Vec<ScoredPost> = groups
                        .iter()
                        .map(|(title, tokens)| {
                            aggregator.aggregate(title, tokens.iter().map(String::as_str))
                        })
                        .collect();

                    out.write_partition(n, &posts)?;
                    log::debug!("partition {}: {} posts", n, posts.len());

                    Ok(posts.len() as u64)
                })
            })
            .collect();

        let mut scored = 0u64;
        for handle in handles {
            match handle.join() {
                Ok(written) => scored += written?,
                Err(_) => return Err(Error::WorkerPanicked("reduce")),
            }
        }

        Ok(scored)
    });

    result.map_err(|_| Error::WorkerPanicked("reduce"))?
}
