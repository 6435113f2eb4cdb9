//! CSV and JSON renderings of a [`NetworkReport`].

use crate::report::NetworkReport;
use crate::ReportError;
use social_graph::MemberId;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Percentage with two decimals, e.g. `25.00%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

/// Bracketed, comma-separated id list, e.g. `[1, 5, 2]`.
pub fn format_ids(ids: &[MemberId]) -> String {
    let parts: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

fn format_trace(rows: &[Vec<MemberId>]) -> String {
    let parts: Vec<String> = rows.iter().map(|row| format_ids(row)).collect();
    format!("[{}]", parts.join(", "))
}

fn csv_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().flexible(true).from_writer(out)
}

/// Separator between sections: an empty line, written past the csv writer since a zero-field
/// record would come out as `""`.
fn blank_row<W: Write>(writer: csv::Writer<W>) -> Result<csv::Writer<W>, ReportError> {
    let mut out = writer.into_inner().map_err(|e| e.into_error())?;
    out.write_all(b"\n")?;
    Ok(csv_writer(out))
}

/// Write the sectioned CSV summary. Rows have varying widths.
pub fn write_csv<W: Write>(out: W, report: &NetworkReport) -> Result<(), ReportError> {
    let mut writer = csv_writer(out);

    writer.write_record(["Overall Statistics"])?;
    for (label, value) in report.overall.rows() {
        writer.write_record([label, value.as_str()])?;
    }
    writer = blank_row(writer)?;

    writer.write_record(["Engagement Rates"])?;
    for (id, rate) in &report.summary.engagement_rates {
        writer.write_record([format!("Member {id}"), format_percentage(*rate)])?;
    }
    writer = blank_row(writer)?;

    writer.write_record(["Influences"])?;
    for pair in &report.summary.pairs {
        writer.write_record([
            format!(
                "Influence of Member {} on Member {}",
                pair.source, pair.target
            ),
            format_percentage(pair.influence),
        ])?;
    }
    writer = blank_row(writer)?;

    writer.write_record(["Shortest Paths"])?;
    for pair in &report.summary.pairs {
        writer.write_record([
            format!(
                "Shortest path from Member {} to Member {}",
                pair.source, pair.target
            ),
            format_ids(&pair.shortest.path),
        ])?;
        writer.write_record(["BFS Matrix".to_string(), format_trace(&pair.shortest.trace)])?;
    }
    writer = blank_row(writer)?;

    writer.write_record(["Highest Engagement Paths"])?;
    for pair in &report.summary.pairs {
        writer.write_record([
            format!(
                "Highest engagement path from Member {} to Member {}",
                pair.source, pair.target
            ),
            format_ids(&pair.engagement.path),
            format_percentage(pair.engagement.weight as f64),
        ])?;
        writer.write_record(["DFS Matrix".to_string(), format_ids(&pair.engagement.trace)])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, report: &NetworkReport) -> Result<(), ReportError> {
    write_csv(BufWriter::new(File::create(path)?), report)?;
    tracing::info!(path = %path.display(), "csv summary written");
    Ok(())
}

pub fn write_json<W: Write>(out: W, report: &NetworkReport) -> Result<(), ReportError> {
    let mut out = out;
    serde_json::to_writer_pretty(&mut out, report)?;
    out.flush()?;
    Ok(())
}

pub fn write_json_file(path: &Path, report: &NetworkReport) -> Result<(), ReportError> {
    write_json(BufWriter::new(File::create(path)?), report)?;
    tracing::info!(path = %path.display(), "json report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::OverallStatistics;
    use crate::summary::{EngagementPathEntry, PairReport, PairwiseSummary, ShortestPathEntry};
    use std::collections::BTreeMap;

    fn report() -> NetworkReport {
        NetworkReport {
            generated_at: "2024-01-01T00:00:00+00:00".to_string(),
            member_ids: vec![1, 2],
            overall: OverallStatistics {
                total_comments: 1,
                total_likes: 2,
                total_following: 1,
                total_members: 2,
                mean_engagement_rate: 150.0,
                std_dev_engagement_rate: 150.0,
                regression_coefficient: Some(300.0),
                r_squared: Some(1.0),
            },
            summary: PairwiseSummary {
                engagement_rates: BTreeMap::from([(1, 300.0), (2, 0.0)]),
                pairs: vec![
                    PairReport {
                        source: 1,
                        target: 2,
                        influence: 100.0,
                        shortest: ShortestPathEntry {
                            path: vec![1, 2],
                            elapsed_secs: 0.0,
                            trace: vec![vec![1], vec![2]],
                        },
                        engagement: EngagementPathEntry {
                            path: vec![1, 2],
                            weight: 3,
                            elapsed_secs: 0.0,
                            trace: vec![1, 2],
                            limit_reached: false,
                        },
                    },
                    PairReport {
                        source: 2,
                        target: 1,
                        influence: 0.0,
                        shortest: ShortestPathEntry::default(),
                        engagement: EngagementPathEntry::default(),
                    },
                ],
            },
            relationship_matrix: vec![vec![0, 1], vec![0, 0]],
            engagement_matrix: vec![vec![0, 3], vec![0, 0]],
        }
    }

    fn records(bytes: &[u8]) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect::<Vec<_>>())
            .filter(|r| r.iter().any(|f| !f.is_empty()))
            .collect()
    }

    #[test]
    fn percentages_use_two_decimals() {
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(9.94), "9.94%");
        assert_eq!(format_percentage(25.0), "25.00%");
        assert_eq!(format_percentage(666.666), "666.67%");
    }

    #[test]
    fn sections_are_separated_by_empty_lines() {
        let mut out = Vec::new();
        write_csv(&mut out, &report()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.iter().filter(|l| l.is_empty()).count(), 4);
        assert!(!lines.contains(&"\"\""));
        let before_rates = lines.iter().position(|l| *l == "Engagement Rates").unwrap();
        assert_eq!(lines[before_rates - 1], "");
        assert!(text.ends_with("DFS Matrix,[]\n"));
    }

    #[test]
    fn ids_render_as_lists() {
        assert_eq!(format_ids(&[]), "[]");
        assert_eq!(format_ids(&[1, 5, 2]), "[1, 5, 2]");
        assert_eq!(format_trace(&[vec![1], vec![3, 2]]), "[[1], [3, 2]]");
    }

    #[test]
    fn csv_sections_in_order() {
        let mut out = Vec::new();
        write_csv(&mut out, &report()).unwrap();
        let rows = records(&out);

        let headers: Vec<&str> = rows
            .iter()
            .filter(|r| r.len() == 1)
            .map(|r| r[0].as_str())
            .collect();
        assert_eq!(
            headers,
            vec![
                "Overall Statistics",
                "Engagement Rates",
                "Influences",
                "Shortest Paths",
                "Highest Engagement Paths"
            ]
        );
        assert!(rows.contains(&vec!["Member 1".to_string(), "300.00%".to_string()]));
        assert!(rows.contains(&vec![
            "Influence of Member 2 on Member 1".to_string(),
            "0.00%".to_string()
        ]));
        assert!(rows.contains(&vec!["BFS Matrix".to_string(), "[[1], [2]]".to_string()]));
        assert!(rows.contains(&vec![
            "Highest engagement path from Member 1 to Member 2".to_string(),
            "[1, 2]".to_string(),
            "3.00%".to_string()
        ]));
        assert!(rows.contains(&vec![
            "Shortest path from Member 2 to Member 1".to_string(),
            "[]".to_string()
        ]));
    }

    #[test]
    fn json_is_the_full_report() {
        let mut out = Vec::new();
        write_json(&mut out, &report()).unwrap();
        let parsed: NetworkReport = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, report());
    }
}
