use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{
    config::Delimiter,
    error::{Error, Result},
};

/// One data row, holding a value for every attribute in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    values: Vec<String>,
}

impl Row {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Row {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn get(&self, attribute: usize) -> &str {
        &self.values[attribute]
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// True when both rows agree on every attribute except `target`.
    pub fn same_attributes(&self, other: &Row, target: usize) -> bool {
        self.values
            .iter()
            .zip(other.values.iter())
            .enumerate()
            .all(|(i, (a, b))| i == target || a == b)
    }

    fn from_record(record: &StringRecord) -> Self {
        Row::new(record.iter())
    }
}

/// Header plus rows, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    attributes: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(attributes: Vec<String>, rows: Vec<Row>) -> Self {
        Table { attributes, rows }
    }

    /// Reads a delimited file whose first non-empty line is the header.
    pub fn read<P: AsRef<Path>>(path: P, delimiter: Delimiter) -> Result<Self> {
        let path = path.as_ref();
        let text = normalized_text(path)?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(delimiter.as_byte())
            .quoting(false)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut records = reader.records();
        let header = match records.next() {
            Some(header) => header?,
            None => return Err(Error::MissingHeader(path.to_path_buf())),
        };
        let attributes = header.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in records {
            rows.push(Row::from_record(&record?));
        }

        tracing::info!(path = %path.display(), %delimiter, rows = rows.len(), "read table");
        Ok(Table { attributes, rows })
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keeps only the rows for which `keep` returns true, given their index.
    pub(crate) fn retain_indexed<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize) -> bool,
    {
        let mut idx = 0;
        self.rows.retain(|_| {
            let kept = keep(idx);
            idx += 1;
            kept
        });
    }
}

/// Lower-cases every line, collapses whitespace runs and drops empty lines.
fn normalized_text(path: &Path) -> Result<String> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;

    let mut text = String::new();
    for line in BufReader::new(file).lines() {
        let line = normalize_line(&line.map_err(io_err)?);
        if line.is_empty() {
            continue;
        }
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}

fn normalize_line(line: &str) -> String {
    line.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// The distinct values of one attribute, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domain {
    values: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Domain {
    /// Records `value`, returning true if it was not yet known.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.positions.contains_key(value) {
            return false;
        }
        self.positions.insert(value.to_string(), self.values.len());
        self.values.push(value.to_string());
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.positions.contains_key(value)
    }

    pub fn position(&self, value: &str) -> Option<usize> {
        self.positions.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

/// Per-attribute domains. Values are only ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    domains: Vec<Domain>,
}

impl Registry {
    pub fn with_attributes(count: usize) -> Self {
        Registry {
            domains: vec![Domain::default(); count],
        }
    }

    pub fn from_table(table: &Table) -> Self {
        let mut registry = Registry::with_attributes(table.attributes().len());
        registry.observe(table);
        registry
    }

    /// Adds every value of every row in `table`.
    pub fn observe(&mut self, table: &Table) {
        for row in table.rows() {
            self.observe_row(row);
        }
    }

    pub fn observe_row(&mut self, row: &Row) {
        for (domain, value) in self.domains.iter_mut().zip(row.values()) {
            domain.insert(value);
        }
    }

    pub fn domain(&self, attribute: usize) -> &Domain {
        &self.domains[attribute]
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }
}
