//! Plain-text listings for the terminal.

use plasmid_core::{PlasmidRecord, Sample, Volume};
use plasmid_client::SearchSummary;
use std::fmt::Write;

fn volume_text(volume: &Volume) -> String {
    match volume {
        Volume::Empty => "-".to_string(),
        other => format!("{other} mL"),
    }
}

fn sample_line(position: usize, sample: &Sample) -> String {
    let mut line = format!("Sample {position}: {}", volume_text(&sample.volume));
    if sample.is_checked_out {
        let _ = write!(
            line,
            ", checked out by {} at {}",
            sample.checked_out_by, sample.checked_out_at
        );
    }
    line
}

/// One record with its samples, indented under its bag.
pub(crate) fn record(record: &PlasmidRecord) -> String {
    let mut text = format!("  {}  total {} mL", record.full_id(), record.total_volume());
    if !record.notes().is_empty() {
        let _ = write!(text, "  ({})", record.notes());
    }
    for (index, sample) in record.samples().iter().enumerate() {
        let _ = write!(text, "\n    {}", sample_line(index + 1, sample));
    }
    text
}

pub(crate) fn bag<'a>(name: &str, records: impl IntoIterator<Item = &'a PlasmidRecord>) -> String {
    let mut text = format!("{name}:");
    for entry in records {
        let _ = write!(text, "\n{}", record(entry));
    }
    text
}

/// Every validation message of a record, or `ok`.
pub(crate) fn validation(record: &PlasmidRecord) -> String {
    let errors = record.validation_errors();
    if errors.is_empty() {
        return format!("{}: ok", record.full_id());
    }
    let mut text = format!("{}: invalid", record.full_id());
    for error in errors {
        let _ = write!(text, "\n  {error}");
    }
    text
}

pub(crate) fn summary(summary: &SearchSummary) -> String {
    let mut sections: Vec<String> = summary
        .bags
        .iter()
        .map(|(name, records)| bag(name, records))
        .collect();
    if let Some(found) = &summary.found {
        sections.push(format!("found {found}"));
    }
    if !summary.not_found.is_empty() {
        sections.push(format!("not found: {}", summary.not_found.join(", ")));
    }
    sections.join("\n")
}

#[cfg(test)]
mod tests;
