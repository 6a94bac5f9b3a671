use super::model::ScriptRow;
use std::collections::HashMap;

pub const SHOT_COLUMN: &str = "Shot Number";
pub const CHARACTER_COLUMN: &str = "Character";
pub const VOICE_ID_COLUMN: &str = "voice_id";
pub const TEXT_COLUMN: &str = "text";
pub const EMOTION_COLUMN: &str = "emotion";

/// A header-keyed record as produced by a tabular parser
pub type RawRecord = HashMap<String, String>;

/// Outcome of ingesting a table
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub rows: Vec<ScriptRow>,
    pub skipped: usize,
}

impl IngestReport {
    pub fn accepted(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Turn raw records into script rows.
///
/// Every field is trimmed. Records missing a character, voice id or text are
/// dropped and only counted in `skipped`; nothing else about them is kept.
pub fn ingest(records: &[RawRecord]) -> IngestReport {
    let mut report = IngestReport::default();

    for record in records {
        match parse_record(record) {
            Some(row) => report.rows.push(row),
            None => report.skipped += 1,
        }
    }

    tracing::debug!(
        input_rows = records.len(),
        accepted = report.rows.len(),
        skipped = report.skipped,
        "Script records ingested"
    );

    report
}

fn parse_record(record: &RawRecord) -> Option<ScriptRow> {
    let character = field(record, CHARACTER_COLUMN)?;
    let voice_id = field(record, VOICE_ID_COLUMN)?;
    let text = field(record, TEXT_COLUMN)?;

    Some(ScriptRow {
        shot: field(record, SHOT_COLUMN).unwrap_or_default(),
        character,
        voice_id,
        text,
        emotion: field(record, EMOTION_COLUMN),
    })
}

/// Look up a column by its trimmed header name and return the trimmed value,
/// or `None` when the column is absent or blank.
fn field(record: &RawRecord, column: &str) -> Option<String> {
    let value = record
        .get(column)
        .or_else(|| {
            record
                .iter()
                .find(|(header, _)| header.trim() == column)
                .map(|(_, value)| value)
        })?
        .trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
