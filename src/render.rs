//! Plain-text table output for the command-line front-end.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::types::Record;
use crate::util::format_date;

// ---------------------------------------------------------------------------
// Column definition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Defines a column in the table.
#[derive(Debug, Clone)]
pub struct Column {
    /// Record field rendered in this column (e.g., "title", "repo_name").
    pub field: String,
    /// Display header text.
    pub header: String,
    /// Default width as a fraction of total width (0.0..1.0).
    pub default_width_pct: f32,
    pub align: Align,
    /// Render the field through the configured date format.
    pub is_date: bool,
}

impl Column {
    pub fn text(field: &str, header: &str, pct: f32) -> Self {
        Self {
            field: field.to_owned(),
            header: header.to_owned(),
            default_width_pct: pct,
            align: Align::Left,
            is_date: false,
        }
    }

    pub fn date(field: &str, header: &str, pct: f32) -> Self {
        Self {
            align: Align::Right,
            is_date: true,
            ..Self::text(field, header, pct)
        }
    }

    fn cell(&self, record: &Record, date_format: &str) -> String {
        if self.is_date
            && let Some(dt) = record.instant(&self.field)
        {
            return format_date(&dt, date_format);
        }
        record
            .text(&self.field)
            .map(|t| t.replace(['\n', '\r', '\t'], " "))
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `records` as a fixed-width table `total_width` columns wide.
pub fn render_table(
    columns: &[Column],
    records: &[Record],
    date_format: &str,
    total_width: u16,
) -> String {
    let gaps = u16::try_from(columns.len().saturating_sub(1)).unwrap_or(u16::MAX);
    let widths = compute_column_widths(columns, total_width.saturating_sub(gaps));

    let mut out = String::new();
    let header: Vec<String> = columns.iter().map(|c| c.header.clone()).collect();
    push_row(&mut out, columns, &widths, &header);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(usize::from(w))).collect();
    push_row(&mut out, columns, &widths, &rule);
    for record in records {
        let cells: Vec<String> = columns.iter().map(|c| c.cell(record, date_format)).collect();
        push_row(&mut out, columns, &widths, &cells);
    }
    out
}

fn push_row(out: &mut String, columns: &[Column], widths: &[u16], cells: &[String]) {
    let line: Vec<String> = columns
        .iter()
        .zip(widths)
        .zip(cells)
        .map(|((col, &w), text)| pad(&truncate(text, usize::from(w)), usize::from(w), col.align))
        .collect();
    out.push_str(line.join(" ").trim_end());
    out.push('\n');
}

/// Cut `text` to at most `width` display columns, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_owned();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    match align {
        Align::Left => format!("{text}{fill}"),
        Align::Right => format!("{fill}{text}"),
    }
}

// ---------------------------------------------------------------------------
// Column width computation
// ---------------------------------------------------------------------------

fn compute_column_widths(columns: &[Column], total: u16) -> Vec<u16> {
    let pct_sum: f32 = columns.iter().map(|c| c.default_width_pct).sum();
    columns
        .iter()
        .map(|col| {
            let ratio = if pct_sum > 0.0 {
                col.default_width_pct / pct_sum
            } else {
                #[allow(clippy::cast_precision_loss)]
                {
                    1.0 / columns.len() as f32
                }
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let w = (f32::from(total) * ratio).round() as u16;
            w.max(1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_columns() -> Vec<Column> {
        vec![
            Column::text("name", "Release", 0.50),
            Column::text("repo_name", "Repository", 0.30),
            Column::date("created_at", "Created", 0.20),
        ]
    }

    #[test]
    fn column_widths_follow_percentages() {
        let widths = compute_column_widths(&make_columns(), 100);
        assert_eq!(widths, vec![50, 30, 20]);
    }

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate("igloo-api", 20), "igloo-api");
        assert_eq!(truncate("igloo-api", 6), "igloo…");
        assert_eq!(truncate("日本語のリリース", 5), "日本…");
        assert_eq!(truncate("anything", 0), "");
    }

    #[test]
    fn table_renders_header_rule_and_rows() {
        let records = vec![
            Record::new()
                .with("name", "v1.0.0")
                .with("repo_name", "igloo-api")
                .with("created_at", "2024-03-01T10:00:00Z"),
            Record::new().with("name", "v0.9.0"),
        ];
        let out = render_table(&make_columns(), &records, "%Y-%m-%d", 62);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Release"));
        assert!(lines[1].starts_with("-----"));
        assert!(lines[2].contains("igloo-api"));
        assert!(lines[2].ends_with("2024-03-01"));
        assert_eq!(lines[3].trim_end(), "v0.9.0");
    }
}
