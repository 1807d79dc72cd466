use clap::{ArgAction, Parser};
use log::LevelFilter;
use logit_eval::{evaluate, utils, EvalConfig, EvalError, Model};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "logit-eval",
    version,
    about = "Report the accuracy of a logistic regression model on a labelled CSV test set"
)]
struct Cli {
    /// Test set: a header line, then label,feature,... rows of integers
    test_file: PathBuf,
    /// Model: one line of space-separated coefficients per class, intercept first
    model_file: PathBuf,
    /// TOML file of evaluation settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Show a progress bar while scoring
    #[arg(long)]
    progress: bool,
    /// Round the printed accuracy to this many significant digits
    /// (6 matches a C++ ostream's default)
    #[arg(short, long, value_name = "DIGITS")]
    precision: Option<usize>,
    /// Log more; -v for debug, -vv for trace. RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Default `f64` formatting, optionally rounded to `digits` significant
/// digits first, so `0.6666666666666666` becomes `0.666667` at 6.
fn format_accuracy(accuracy: f64, digits: Option<usize>) -> String {
    match digits {
        Some(digits) => {
            let rounded = format!("{:.*e}", digits.max(1) - 1, accuracy);
            rounded.parse::<f64>().unwrap_or(accuracy).to_string()
        }
        None => accuracy.to_string(),
    }
}

fn run(args: &Cli) -> Result<f64, EvalError> {
    let mut config = match &args.config {
        Some(path) => EvalConfig::load(path)?,
        None => EvalConfig::default(),
    };
    config.progress |= args.progress;

    let mut model = Model::load(&args.model_file, config.model_delimiter)?;
    if let Some(labels) = &config.labels {
        model = model.with_labels(labels)?;
    }

    let test = utils::reader(&args.test_file)?;
    evaluate(test, &model, &config)?.accuracy()
}

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version aren't failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(args.verbose);

    match run(&args) {
        Ok(accuracy) => {
            println!("Accuracy: {}", format_accuracy(accuracy, args.precision));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
