use std::{fmt, path::Path};

use crate::{
    bayes::{Classification, Model},
    error::Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    /// Fraction of rows predicted correctly; 0 for an empty test set.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} = {}", self.correct, self.total, self.ratio())
    }
}

/// Compares each prediction with the row's own value for `target`.
pub fn accuracy(classification: &Classification, target: usize) -> Accuracy {
    let rows = classification.table.rows();
    let correct = rows
        .iter()
        .zip(classification.predictions.iter())
        .filter(|(row, prediction)| row.get(target) == prediction.label)
        .count();

    Accuracy {
        correct,
        total: rows.len(),
    }
}

/// Writes every test row followed by its predicted label and one
/// `score:<class>` column per class, holding the log-posterior.
pub fn write_report<P: AsRef<Path>>(
    path: P,
    model: &Model,
    classification: &Classification,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<String> = model.attributes().to_vec();
    header.push("predicted".to_string());
    header.extend(model.classes().iter().map(|c| format!("score:{}", c.label())));
    writer.write_record(&header)?;

    for (row, prediction) in classification
        .table
        .rows()
        .iter()
        .zip(classification.predictions.iter())
    {
        let mut record: Vec<String> = row.values().to_vec();
        record.push(prediction.label.clone());
        record.extend(prediction.scores.iter().map(|(_, score)| score.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
