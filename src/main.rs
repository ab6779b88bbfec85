use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metriqs_cloudwatch::credentials::NoMetadataService;
use metriqs_cloudwatch::publish::{JsonPublisher, LogPublisher, Publisher};
use metriqs_cloudwatch::recv::{flush_channel, json};
use metriqs_cloudwatch::{Backend, Config, Error};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Output {
    /// One JSON document per data point on stdout.
    Json,
    /// Data points as log events on stderr.
    Log,
}

/// Reads StatsD flushes as JSON lines on stdin and exports every metric as a
/// dimensioned data point.
#[derive(Debug, Parser)]
#[command(name = "metriqs-cloudwatch", version)]
struct Args {
    /// TOML config file.
    #[arg(short, long, env = "METRIQS_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides the configured namespace.
    #[arg(long)]
    namespace: Option<String>,

    #[arg(long, value_enum, default_value_t = Output::Json)]
    output: Output,

    /// Log as JSON instead of plain text.
    #[arg(long)]
    log_json: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries data points, so logs go to stderr.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(args: Args) -> Result<usize, Error> {
    let mut config = match args.config {
        Some(ref path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(namespace) = args.namespace {
        config.namespace = namespace;
    }

    let output = args.output;

    // Local outputs need neither region nor credentials; resolving them still
    // validates the config before any flush is accepted.
    let backend = Backend::start(
        &config,
        &NoMetadataService,
        |config, credentials| -> Box<dyn Publisher> {
            info!(
                region = config.region.as_deref().unwrap_or("default"),
                credentials = ?credentials,
                "building publisher"
            );
            match output {
                Output::Json => Box::new(JsonPublisher::new(
                    config.namespace.clone(),
                    io::stdout(),
                )),
                Output::Log => Box::new(LogPublisher::new(config.namespace.clone())),
            }
        },
    )?;

    let (sender, receiver) = flush_channel();

    thread::spawn(move || {
        let sent = json::read_events(io::stdin().lock(), &sender);
        info!(events = sent, "reached end of input");
    });

    Ok(backend.listen(receiver))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_json);

    match run(args) {
        Ok(cycles) => {
            info!(cycles, "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "failed to start");
            ExitCode::FAILURE
        }
    }
}
