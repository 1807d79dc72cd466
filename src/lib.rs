//! Accuracy evaluation for pre-trained multinomial logistic regression
//! models.
//!
//! A model is a text file with one line of coefficients per class, the
//! intercept first. A test set is a CSV file whose first column is the
//! true label and whose remaining columns are integer features. Each row
//! is scored against every class with a sigmoid of the linear score, and
//! the highest-scoring class is the prediction.

pub mod config;
pub mod error;
pub mod eval;
pub mod model;
pub mod score;
pub mod utils;

pub use config::EvalConfig;
pub use error::{EvalError, Result};
pub use eval::{evaluate, Evaluation, TestRow};
pub use model::{ClassWeights, Label, Model, Prediction};
pub use score::{linear, score, sigmoid};
