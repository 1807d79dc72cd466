use clap::Parser;
use logit_eval::{Label, Model, Result};

#[derive(Parser)]
struct Cli {
    /// The coefficient file, one class per line
    model: String,
    /// Explicit class labels, in file order
    #[arg(short, long, value_delimiter = ',')]
    labels: Option<Vec<Label>>,
    /// Coefficient separator
    #[arg(short, long, default_value_t = ' ')]
    delimiter: char,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let mut model = Model::load(&args.model, args.delimiter)?;
    if let Some(labels) = &args.labels {
        model = model.with_labels(labels)?;
    }

    for class in model.classes() {
        let nonzero = class.weights().iter().filter(|w| **w != 0.0).count();
        println!(
            "label {}: intercept {} nonzero {}",
            class.label,
            class.intercept().unwrap_or(f64::NAN),
            nonzero
        );
    }

    println!("classes: {}", model.num_classes());
    println!("features: {}", model.num_features());

    Ok(())
}
