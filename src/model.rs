use log::info;
use ordered_float::OrderedFloat;
use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use crate::error::{EvalError, Result};
use crate::score::score;
use crate::utils;

/// Integer class identifier, shared by model rows and test rows.
pub type Label = i64;

/// Coefficients for one class. `coefficients[0]` is the intercept.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassWeights {
    pub label: Label,
    pub coefficients: Vec<f64>,
}

impl ClassWeights {
    /// `None` only for a hand-built class with no coefficients.
    pub fn intercept(&self) -> Option<f64> {
        self.coefficients.first().copied()
    }

    pub fn weights(&self) -> &[f64] {
        self.coefficients.get(1..).unwrap_or(&[])
    }
}

/// The winning class for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub label: Label,
    pub score: f64,
}

/// A multinomial logistic regression model: one coefficient vector per
/// class, all the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    classes: Vec<ClassWeights>,
}

impl Model {
    /// Build a model from coefficient rows, labelling them 0..N-1 in order.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Model> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            for (class, row) in rows.iter().enumerate() {
                if row.len() != expected || row.is_empty() {
                    return Err(EvalError::RaggedModel {
                        class,
                        expected: expected.max(1),
                        actual: row.len(),
                    });
                }
            }
        }

        let classes = rows
            .into_iter()
            .enumerate()
            .map(|(i, coefficients)| ClassWeights {
                label: i as Label,
                coefficients,
            })
            .collect();
        Ok(Model { classes })
    }

    /// Load a coefficient file, plain or gzipped.
    pub fn load<P: AsRef<Path>>(filename: P, delimiter: char) -> Result<Model> {
        let model = Model::from_reader(utils::reader(&filename)?, delimiter)?;
        info!(
            "loaded {} classes with {} features from {}",
            model.num_classes(),
            model.num_features(),
            filename.as_ref().display()
        );
        Ok(model)
    }

    /// Parse one class per line, tokens split on every `delimiter`.
    pub fn from_reader<R: BufRead>(reader: R, delimiter: char) -> Result<Model> {
        let mut rows = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            // writers that emit a separator after every value leave one behind
            let line = line.strip_suffix(delimiter).unwrap_or(line);
            let row = if line.is_empty() {
                Vec::new()
            } else {
                line.split(delimiter)
                    .map(|tok| {
                        tok.trim().parse::<f64>().map_err(|_| EvalError::Parse {
                            kind: "coefficient",
                            line: i + 1,
                            token: tok.to_string(),
                        })
                    })
                    .collect::<Result<Vec<f64>>>()?
            };
            rows.push(row);
        }
        Model::new(rows)
    }

    /// Replace the positional labels with explicit ones, one per class.
    pub fn with_labels(mut self, labels: &[Label]) -> Result<Model> {
        if labels.len() != self.classes.len() {
            return Err(EvalError::Config(format!(
                "{} labels given for {} classes",
                labels.len(),
                self.classes.len()
            )));
        }
        let mut seen = HashSet::new();
        for label in labels {
            if !seen.insert(label) {
                return Err(EvalError::Config(format!("label {} repeats", label)));
            }
        }
        for (class, label) in self.classes.iter_mut().zip(labels) {
            class.label = *label;
        }
        Ok(self)
    }

    pub fn classes(&self) -> &[ClassWeights] {
        &self.classes
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Features expected per row; 0 for an empty model.
    pub fn num_features(&self) -> usize {
        self.classes
            .first()
            .map_or(0, |c| c.coefficients.len() - 1)
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.classes.iter().map(|c| c.label)
    }

    pub fn contains_label(&self, label: Label) -> bool {
        self.classes.iter().any(|c| c.label == label)
    }

    /// One sigmoid score per class, in model order.
    pub fn scores(&self, features: &[i64]) -> Result<Vec<f64>> {
        self.classes
            .iter()
            .map(|c| score(&c.coefficients, features))
            .collect()
    }

    /// Arg-max over the class scores. The first of several equal maxima wins.
    pub fn predict(&self, features: &[i64]) -> Result<Prediction> {
        let scores = self.scores(features)?;
        let mut best: Option<(usize, OrderedFloat<f64>)> = None;
        for (i, s) in scores.iter().enumerate() {
            let s = OrderedFloat(*s);
            match best {
                Some((_, top)) if s <= top => {}
                _ => best = Some((i, s)),
            }
        }
        let (index, top) = best.ok_or(EvalError::EmptyModel)?;
        Ok(Prediction {
            index,
            label: self.classes[index].label,
            score: top.into_inner(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn two_class() -> Model {
        Model::from_reader(Cursor::new("0 1\n0 -1\n"), ' ').unwrap()
    }

    #[test]
    fn test_load_rows_in_order() {
        let model = two_class();
        assert_eq!(model.num_classes(), 2);
        assert_eq!(model.num_features(), 1);
        assert_eq!(model.labels().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(model.classes()[1].coefficients, vec![0.0, -1.0]);
        assert_eq!(model.classes()[1].intercept(), Some(0.0));
        assert_eq!(model.classes()[1].weights(), &[-1.0]);
    }

    #[test]
    fn test_crlf_and_exponents() {
        let model = Model::from_reader(Cursor::new("1e-3 -2.5\r\n0.25 4\r\n"), ' ').unwrap();
        assert_eq!(model.classes()[0].coefficients, vec![0.001, -2.5]);
        assert_eq!(model.classes()[1].coefficients, vec![0.25, 4.0]);
    }

    #[test]
    fn test_bad_token() {
        match Model::from_reader(Cursor::new("0 1\n0 abc\n"), ' ') {
            Err(EvalError::Parse { kind, line, token }) => {
                assert_eq!(kind, "coefficient");
                assert_eq!(line, 2);
                assert_eq!(token, "abc");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_delimiter() {
        let model = Model::from_reader(Cursor::new("0 1 \n0 -1 \r\n"), ' ').unwrap();
        assert_eq!(model.num_features(), 1);
        assert_eq!(model.classes()[0].coefficients, vec![0.0, 1.0]);
        assert_eq!(model.classes()[1].coefficients, vec![0.0, -1.0]);

        // only one trailing separator is forgiven
        assert!(matches!(
            Model::from_reader(Cursor::new("0 1  \n"), ' '),
            Err(EvalError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_hand_built_class_without_coefficients() {
        let class = ClassWeights {
            label: 0,
            coefficients: Vec::new(),
        };
        assert_eq!(class.intercept(), None);
        assert!(class.weights().is_empty());
    }

    #[test]
    fn test_double_space_is_an_empty_token() {
        assert!(matches!(
            Model::from_reader(Cursor::new("0  1\n"), ' '),
            Err(EvalError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_ragged_rows() {
        match Model::from_reader(Cursor::new("0 1 2\n0 1\n"), ' ') {
            Err(EvalError::RaggedModel {
                class,
                expected,
                actual,
            }) => {
                assert_eq!((class, expected, actual), (1, 3, 2));
            }
            other => panic!("expected ragged model, got {:?}", other),
        }
        // a blank line is a class with no coefficients
        assert!(matches!(
            Model::from_reader(Cursor::new("0 1\n\n"), ' '),
            Err(EvalError::RaggedModel { class: 1, .. })
        ));
    }

    #[test]
    fn test_empty_file_is_empty_model() {
        let model = Model::from_reader(Cursor::new(""), ' ').unwrap();
        assert!(model.is_empty());
        assert_eq!(model.num_features(), 0);
        assert!(matches!(model.predict(&[]), Err(EvalError::EmptyModel)));
    }

    #[test]
    fn test_other_delimiter() {
        let model = Model::from_reader(Cursor::new("0\t1\t2\n"), '\t').unwrap();
        assert_eq!(model.num_features(), 2);
    }

    #[test]
    fn test_predict() {
        let model = two_class();
        let p = model.predict(&[5]).unwrap();
        assert_eq!(p.index, 0);
        assert_eq!(p.label, 0);
        assert!((p.score - 0.993307).abs() < 1e-6);

        let p = model.predict(&[-5]).unwrap();
        assert_eq!(p.label, 1);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let model = Model::from_reader(Cursor::new("1 0\n0 0\n1 0\n"), ' ').unwrap();
        let p = model.predict(&[7]).unwrap();
        assert_eq!(p.index, 0);

        let model = Model::from_reader(Cursor::new("0 0\n0 0\n"), ' ').unwrap();
        assert_eq!(model.predict(&[3]).unwrap().index, 0);
    }

    #[test]
    fn test_with_labels() {
        let model = two_class().with_labels(&[7, 3]).unwrap();
        assert_eq!(model.labels().collect::<Vec<_>>(), vec![7, 3]);
        assert!(model.contains_label(3));
        assert!(!model.contains_label(0));
        assert_eq!(model.predict(&[-5]).unwrap().label, 3);

        assert!(matches!(
            two_class().with_labels(&[1]),
            Err(EvalError::Config(_))
        ));
        assert!(matches!(
            two_class().with_labels(&[4, 4]),
            Err(EvalError::Config(_))
        ));
    }

    #[test]
    fn test_row_width_checked_by_scorer() {
        assert!(matches!(
            two_class().predict(&[1, 2]),
            Err(EvalError::DimensionMismatch { .. })
        ));
    }
}
