//! Training corpus input
//!
//! Reads historical (text, label) rows from CSV. Header naming is flexible:
//! the text column is `text`, or a `title`/`description` pair concatenated;
//! the label column is `label` or `priority`, matched case-insensitively.
//! Rows with empty text or unrecognized labels are skipped, not fatal.

use std::io::Read;
use tracing::{debug, info};
use triage_core::{Error, PriorityClass, Result, TrainingExample};

/// Resolved column layout of a corpus file
struct ColumnLayout {
    text: Option<usize>,
    title: Option<usize>,
    description: Option<usize>,
    label: usize,
}

impl ColumnLayout {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let text = find("text");
        let title = find("title");
        let description = find("description");
        let label = find("label")
            .or_else(|| find("priority"))
            .ok_or_else(|| Error::corpus("no label or priority column in corpus header"))?;

        if text.is_none() && title.is_none() && description.is_none() {
            return Err(Error::corpus(
                "no text column (expected text, or title/description) in corpus header",
            ));
        }

        Ok(Self {
            text,
            title,
            description,
            label,
        })
    }

    fn extract_text(&self, record: &csv::StringRecord) -> String {
        if let Some(idx) = self.text {
            return record.get(idx).unwrap_or_default().trim().to_string();
        }
        let title = self
            .title
            .and_then(|idx| record.get(idx))
            .unwrap_or_default()
            .trim();
        let description = self
            .description
            .and_then(|idx| record.get(idx))
            .unwrap_or_default()
            .trim();
        [title, description]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Read training examples from a CSV reader.
///
/// Returns the usable rows in file order; fails only on malformed CSV or a
/// header missing both text and label columns. An entirely skipped corpus is
/// reported later by the trainer as `EmptyCorpus`.
pub fn read_corpus<R: Read>(reader: R) -> Result<Vec<TrainingExample>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::corpus(format!("cannot read corpus header: {e}")))?
        .clone();
    let layout = ColumnLayout::resolve(&headers)?;

    let mut examples = Vec::new();
    let mut skipped = 0usize;

    for (row, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| Error::corpus(format!("row {}: {e}", row + 2)))?;

        let text = layout.extract_text(&record);
        if text.is_empty() {
            debug!(row = row + 2, "skipping row with empty text");
            skipped += 1;
            continue;
        }

        let raw_label = record.get(layout.label).unwrap_or_default();
        let Some(label) = PriorityClass::parse(raw_label) else {
            debug!(row = row + 2, label = raw_label, "skipping row with unrecognized label");
            skipped += 1;
            continue;
        };

        examples.push(TrainingExample::new(text, label));
    }

    info!(
        usable = examples.len(),
        skipped, "read training corpus"
    );

    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_label_columns() {
        let csv = "text,label\n\
                   hydrant paint faded,LOW\n\
                   sewage overflow at plant,CRITICAL\n";
        let examples = read_corpus(csv.as_bytes()).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].text, "hydrant paint faded");
        assert_eq!(examples[0].label, PriorityClass::Low);
        assert_eq!(examples[1].label, PriorityClass::Critical);
    }

    #[test]
    fn test_title_description_pair_and_priority_column() {
        let csv = "title,description,priority\n\
                   Main break,Water surfacing at 4th and Oak,high\n\
                   Hydrant check,,low\n";
        let examples = read_corpus(csv.as_bytes()).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].text, "Main break Water surfacing at 4th and Oak");
        assert_eq!(examples[0].label, PriorityClass::High);
        assert_eq!(examples[1].text, "Hydrant check");
    }

    #[test]
    fn test_header_matching_is_case_insensitive() {
        let csv = "Text,Priority\nleak at meter,MEDIUM\n";
        let examples = read_corpus(csv.as_bytes()).unwrap();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].label, PriorityClass::Medium);
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let csv = "text,label\n\
                   ,LOW\n\
                   valid row,URGENT\n\
                   another valid row,HIGH\n";
        let examples = read_corpus(csv.as_bytes()).unwrap();
        // Empty text and unknown label both skipped
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].text, "another valid row");
    }

    #[test]
    fn test_missing_label_column_is_error() {
        let csv = "text,severity\nleak,HIGH\n";
        let result = read_corpus(csv.as_bytes());
        assert!(matches!(result, Err(Error::Corpus(_))));
    }

    #[test]
    fn test_missing_text_column_is_error() {
        let csv = "body,label\nleak,HIGH\n";
        let result = read_corpus(csv.as_bytes());
        assert!(matches!(result, Err(Error::Corpus(_))));
    }

    #[test]
    fn test_rows_preserve_file_order() {
        let csv = "text,label\nfirst,LOW\nsecond,LOW\nthird,LOW\n";
        let examples = read_corpus(csv.as_bytes()).unwrap();
        let texts: Vec<_> = examples.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }
}
