use kdam::{tqdm, BarExt};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::io::BufRead;

use crate::config::EvalConfig;
use crate::error::{EvalError, Result};
use crate::model::{Label, Model};

/// One labelled example from the test file.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRow {
    pub label: Label,
    pub features: Vec<i64>,
}

impl TestRow {
    /// Parse `label,f1,...,fN`. `line_no` is only used for error reporting.
    pub fn parse(line: &str, delimiter: char, line_no: usize) -> Result<TestRow> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let line = line.strip_suffix(delimiter).unwrap_or(line);
        let mut fields = line.split(delimiter);
        // split always yields at least one field
        let label = parse_field(fields.next().unwrap_or(""), "label", line_no)?;
        let features = fields
            .map(|f| parse_field(f, "feature", line_no))
            .collect::<Result<Vec<i64>>>()?;
        Ok(TestRow { label, features })
    }
}

fn parse_field(field: &str, kind: &'static str, line: usize) -> Result<i64> {
    field.trim().parse().map_err(|_| EvalError::Parse {
        kind,
        line,
        token: field.to_string(),
    })
}

/// Outcome of scoring a whole test set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
}

impl Evaluation {
    /// Fraction of rows predicted correctly. Undefined for an empty test set.
    pub fn accuracy(&self) -> Result<f64> {
        if self.total == 0 {
            return Err(EvalError::EmptyTestSet);
        }
        Ok(self.correct as f64 / self.total as f64)
    }
}

/// Score every row of a test file against every class and count how often
/// the arg-max class carries the row's label.
pub fn evaluate<R: BufRead>(reader: R, model: &Model, config: &EvalConfig) -> Result<Evaluation> {
    if model.is_empty() {
        return Err(EvalError::EmptyModel);
    }
    let expected = model.num_features();
    let mut result = Evaluation::default();
    let mut unknown: HashSet<Label> = HashSet::new();
    let mut bar = config.progress.then(|| tqdm!(desc = "Scoring"));

    let skip = usize::from(config.skip_header);
    for (i, line) in reader.lines().enumerate().skip(skip) {
        let line = line?;
        let line_no = i + 1;
        let row = TestRow::parse(&line, config.test_delimiter, line_no)?;
        if row.features.len() != expected {
            return Err(EvalError::RowWidth {
                line: line_no,
                expected,
                actual: row.features.len(),
            });
        }

        if !model.contains_label(row.label) && unknown.insert(row.label) {
            warn!(
                "line {}: label {} is not a model class, counting as a miss",
                line_no, row.label
            );
        }

        let prediction = model.predict(&row.features)?;
        debug!(
            "line {}: true {} predicted {} ({:.5})",
            line_no, row.label, prediction.label, prediction.score
        );
        if prediction.label == row.label {
            result.correct += 1;
        }
        result.total += 1;

        if let Some(bar) = bar.as_mut() {
            bar.update(1)?;
        }
    }
    if let Some(bar) = bar.as_mut() {
        bar.refresh()?;
        eprintln!();
    }

    info!("{} of {} rows correct", result.correct, result.total);
    Ok(result)
}
