use crate::{
    error::{Error, Result},
    table::{Registry, Row, Table},
};

/// Pseudo-count of the m-estimate used for unseen attribute values.
pub const M: f64 = 1.0;

/// What the training table says about one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStats {
    label: String,
    count: usize,
    prior: f64,
    // Indexed by attribute, then by position in the training domain.
    // The target attribute's slot is empty.
    conditionals: Vec<Vec<f64>>,
}

impl ClassStats {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn prior(&self) -> f64 {
        self.prior
    }
}

/// A trained categorical naive Bayes model.
///
/// Classes are kept in the order their label was first seen in the training
/// file. Labels whose rows were all removed by cleaning have no entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    attributes: Vec<String>,
    target: usize,
    registry: Registry,
    classes: Vec<ClassStats>,
}

impl Model {
    /// Estimates priors and conditional probabilities from a cleaned table.
    ///
    /// `registry` must contain every value of `table`; it may hold more (values
    /// from rows that cleaning dropped), which then get a probability of 0.
    pub fn train(table: &Table, registry: Registry, target: usize) -> Result<Self> {
        if target >= registry.len() {
            return Err(Error::TargetIndexOutOfRange {
                index: target,
                attributes: registry.len(),
            });
        }
        if registry.len() != table.attributes().len() {
            return Err(Error::HeaderMismatch {
                expected: table.attributes().len(),
                found: registry.len(),
            });
        }
        if table.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }
        let total = table.len() as f64;

        let mut classes = Vec::new();
        for label in registry.domain(target).iter() {
            let rows: Vec<&Row> = table
                .rows()
                .iter()
                .filter(|row| row.get(target) == label)
                .collect();
            if rows.is_empty() {
                tracing::debug!(label, "class has no rows after cleaning");
                continue;
            }

            let count = rows.len();
            let conditionals: Vec<Vec<f64>> = (0..registry.len())
                .map(|attribute| {
                    if attribute == target {
                        return Vec::new();
                    }
                    let domain = registry.domain(attribute);
                    let mut counts = vec![0usize; domain.len()];
                    for row in &rows {
                        if let Some(pos) = domain.position(row.get(attribute)) {
                            counts[pos] += 1;
                        }
                    }
                    counts
                        .into_iter()
                        .map(|c| c as f64 / count as f64)
                        .collect::<Vec<f64>>()
                })
                .collect();

            classes.push(ClassStats {
                label: label.to_string(),
                count,
                prior: count as f64 / total,
                conditionals,
            });
        }

        tracing::info!(
            rows = table.len(),
            classes = classes.len(),
            "trained model"
        );

        Ok(Model {
            attributes: table.attributes().to_vec(),
            target,
            registry,
            classes,
        })
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Domains as they were at the end of training.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn classes(&self) -> &[ClassStats] {
        &self.classes
    }

    fn class(&self, label: &str) -> Option<&ClassStats> {
        self.classes.iter().find(|c| c.label == label)
    }

    /// P(label), or `None` for a label with no training rows.
    pub fn prior(&self, label: &str) -> Option<f64> {
        self.class(label).map(|c| c.prior)
    }

    /// Stored P(attribute = value | label). `None` when the value was never in
    /// the training domain or the label has no rows.
    pub fn conditional(&self, label: &str, attribute: usize, value: &str) -> Option<f64> {
        let class = self.class(label)?;
        let pos = self.registry.domain(attribute).position(value)?;
        class.conditionals.get(attribute)?.get(pos).copied()
    }

    /// Log-posterior of `row` for `class`, up to a shared constant.
    ///
    /// `domains` supplies the domain sizes used by the m-estimate.
    fn score(&self, class: &ClassStats, row: &Row, domains: &Registry) -> f64 {
        let mut score = class.prior.ln();
        for attribute in 0..self.attributes.len() {
            if attribute == self.target {
                continue;
            }
            let value = row.get(attribute);
            let stored = self
                .registry
                .domain(attribute)
                .position(value)
                .and_then(|pos| class.conditionals[attribute].get(pos).copied())
                .unwrap_or(0.0);

            let prob = if stored > 0.0 {
                stored
            } else {
                m_estimate(class.count, domains.domain(attribute).len())
            };
            score += prob.ln();
        }
        score
    }

    /// Scores `row` against every class and picks the highest. Ties go to the
    /// class seen first during training. `row` must be as wide as the header.
    pub(crate) fn predict(&self, row: &Row, domains: &Registry) -> Prediction {
        let scores: Vec<(String, f64)> = self
            .classes
            .iter()
            .map(|class| (class.label.clone(), self.score(class, row, domains)))
            .collect();

        let mut best = 0;
        for (idx, (_, score)) in scores.iter().enumerate() {
            if *score > scores[best].1 {
                best = idx;
            }
        }
        tracing::trace!(?scores, "scored row");

        Prediction {
            label: scores[best].0.clone(),
            scores,
        }
    }

    /// Classifies every row of a test table read with the training header.
    ///
    /// Test values extend a copy of the training domains before scoring, so an
    /// unseen value counts toward the domain size used for smoothing.
    pub fn classify(&self, table: Table) -> Result<Classification> {
        if table.attributes().len() != self.attributes.len() {
            return Err(Error::HeaderMismatch {
                expected: self.attributes.len(),
                found: table.attributes().len(),
            });
        }

        let mut domains = self.registry.clone();
        domains.observe(&table);

        let predictions = table
            .rows()
            .iter()
            .map(|row| self.predict(row, &domains))
            .collect();

        Ok(Classification { table, predictions })
    }
}

/// The m-estimate `(nc + m * p) / (n + m)` with no matching observations.
pub fn m_estimate(class_count: usize, domain_size: usize) -> f64 {
    let p = 1.0 / domain_size.max(1) as f64;
    (M * p) / (class_count as f64 + M)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Log-posterior per class, in training order.
    pub scores: Vec<(String, f64)>,
}

/// A test table together with one prediction per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub table: Table,
    pub predictions: Vec<Prediction>,
}
