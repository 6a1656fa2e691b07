use clap::{App, Arg, ArgMatches};
use code_compare::{evaluate_with, JobConfig};
use std::process;

fn main() {
    let matches = App::new("code-compare")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scores forum posts by how much their code overlaps with a reference source file")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("JSON job config (workers, reduce_tasks, batch_size)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("workers")
                .short("w")
                .long("workers")
                .value_name("N")
                .help("Map worker threads")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("reducers")
                .short("r")
                .long("reducers")
                .value_name("N")
                .help("Reduce tasks, one output file each")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log per-file and per-partition detail"),
        )
        .arg(
            Arg::with_name("REFERENCE")
                .help("Reference source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Post dump file, or a directory of them")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Output directory, must not exist yet")
                .required(true)
                .index(3),
        )
        .get_matches();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if matches.is_present("verbose") {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.target(env_logger::Target::Stderr).init();

    let config = match job_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            process::exit(2);
        }
    };
    log::debug!("{:?}", config);

    let reference = matches.value_of("REFERENCE").unwrap_or_default();
    let input = matches.value_of("INPUT").unwrap_or_default();
    let output = matches.value_of("OUTPUT").unwrap_or_default();

    match evaluate_with(reference, input, output, &config) {
        Ok(true) => (),
        Ok(false) => process::exit(1),
        Err(e) => {
            log::error!("{}", e);
            process::exit(2);
        }
    }
}

fn job_config(matches: &ArgMatches) -> Result<JobConfig, String> {
    let mut config = match matches.value_of("config") {
        Some(path) => JobConfig::from_path(path).map_err(|e| e.to_string())?,
        None => JobConfig::default(),
    };

    if let Some(workers) = matches.value_of("workers") {
        config.workers = parse_count("workers", workers)?;
    }
    if let Some(reducers) = matches.value_of("reducers") {
        config.reduce_tasks = parse_count("reducers", reducers)?;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn parse_count(name: &str, value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|e| format!("invalid --{} {:?}: {}", name, value, e))
}
