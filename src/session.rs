use std::path::Path;

use crate::{
    bayes::{Classification, Model},
    clean::clean,
    config::{Delimiter, TrainConfig},
    error::{Error, Result},
    evaluate::{accuracy, write_report, Accuracy},
    table::{Registry, Table},
};

/// Runs train, classify and evaluate in order, keeping the results of each.
///
/// A failed call leaves the session exactly as it was.
#[derive(Debug, Default)]
pub struct Session {
    model: Option<Model>,
    classification: Option<Classification>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    /// Reads, cleans and fits the training file. Any earlier classification
    /// is discarded.
    pub fn train<P: AsRef<Path>>(&mut self, path: P, config: TrainConfig) -> Result<&Model> {
        let mut table = Table::read(path, config.delimiter)?;
        config.validate(table.attributes().len())?;

        let registry = Registry::from_table(&table);
        let removed = clean(&mut table, config.target_index, config.keep_duplicates);
        tracing::info!(removed, remaining = table.len(), "cleaned training rows");

        let model = Model::train(&table, registry, config.target_index)?;
        self.classification = None;
        Ok(self.model.insert(model))
    }

    /// Predicts one label per row of the test file, in file order.
    pub fn classify<P: AsRef<Path>>(
        &mut self,
        path: P,
        delimiter: Delimiter,
    ) -> Result<&Classification> {
        let model = self.model.as_ref().ok_or(Error::NotTrained)?;
        let table = Table::read(path, delimiter)?;
        let classification = model.classify(table)?;
        Ok(self.classification.insert(classification))
    }

    /// Writes the per-row report to `output` and returns the accuracy.
    pub fn evaluate<P: AsRef<Path>>(&self, output: P) -> Result<Accuracy> {
        let (model, classification) = match (&self.model, &self.classification) {
            (Some(model), Some(classification)) => (model, classification),
            _ => return Err(Error::NotClassified),
        };

        write_report(output, model, classification)?;
        let accuracy = accuracy(classification, model.target());
        tracing::info!(%accuracy, "evaluated predictions");
        Ok(accuracy)
    }
}
