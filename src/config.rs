use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

/// Field separator of the input files. One delimiter is used per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Space,
    Comma,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Space => b' ',
            Delimiter::Comma => b',',
        }
    }
}

impl FromStr for Delimiter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            " " | "space" => Ok(Delimiter::Space),
            "," | "comma" => Ok(Delimiter::Comma),
            _ => Err(Error::InvalidDelimiter(s.to_string())),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Space => f.write_str("space"),
            Delimiter::Comma => f.write_str("comma"),
        }
    }
}

/// Everything `train` needs besides the input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainConfig {
    pub delimiter: Delimiter,
    pub target_index: usize,
    /// When false, rows that repeat an earlier row exactly are dropped.
    pub keep_duplicates: bool,
}

impl TrainConfig {
    pub fn new(delimiter: Delimiter, target_index: usize) -> Self {
        TrainConfig {
            delimiter,
            target_index,
            keep_duplicates: true,
        }
    }

    pub fn keep_duplicates(mut self, keep: bool) -> Self {
        self.keep_duplicates = keep;
        self
    }

    /// Checks the target index against the header width.
    pub fn validate(&self, attributes: usize) -> Result<()> {
        if self.target_index >= attributes {
            return Err(Error::TargetIndexOutOfRange {
                index: self.target_index,
                attributes,
            });
        }
        Ok(())
    }
}
