//! Categorical naive Bayes over delimited text tables.
//!
//! The pipeline reads a training file, drops contradictory rows, estimates
//! class priors and per-class value frequencies, then labels a test file by
//! the highest log-posterior. Unseen values are smoothed with an m-estimate.

pub mod bayes;
pub mod clean;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod logging;
pub mod session;
pub mod table;

pub use bayes::{Classification, Model, Prediction};
pub use config::{Delimiter, TrainConfig};
pub use error::{Error, Result};
pub use evaluate::Accuracy;
pub use session::Session;
