//! Class label resources: one label per line, terminated by the first blank line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::LabelError;

pub fn parse_labels<R: BufRead>(reader: R) -> Result<Vec<String>, LabelError> {
    let mut labels = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let label = line.trim_end();
        if label.is_empty() {
            break;
        }
        labels.push(label.to_string());
    }

    if labels.is_empty() {
        return Err(LabelError::Empty);
    }
    Ok(labels)
}

pub fn load_labels(path: impl AsRef<Path>) -> Result<Vec<String>, LabelError> {
    let file = File::open(path)?;
    parse_labels(BufReader::new(file))
}
