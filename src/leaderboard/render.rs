//! Plain-text and HTML renderers for a leaderboard view

use crate::leaderboard::view::{Cell, LeaderboardView, RowKind};
use std::fmt::Write;

/// Output format for a rendered leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Html,
    Text,
}

impl OutputFormat {
    /// File name written into the output directory
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Html => "index.html",
            OutputFormat::Text => "index.txt",
        }
    }
}

pub fn render(view: &LeaderboardView, format: OutputFormat, precision: usize) -> String {
    match format {
        OutputFormat::Html => render_html(view, precision),
        OutputFormat::Text => render_text(view, precision),
    }
}

/// Column-aligned text table; the name column is left-aligned, numbers right-aligned
pub fn render_text(view: &LeaderboardView, precision: usize) -> String {
    let rows: Vec<Vec<String>> = view
        .all_rows()
        .map(|row| row.cells.iter().map(|c| c.display(precision)).collect())
        .collect();

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&view.title);
    out.push('\n');

    for (index, row) in rows.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let pad = widths[i].saturating_sub(text.chars().count());
                if i == 0 {
                    format!("{}{}", text, " ".repeat(pad))
                } else {
                    format!("{}{}", " ".repeat(pad), text)
                }
            })
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');

        if index == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("-+-"));
            out.push('\n');
        }
    }

    out
}

/// Standalone HTML document containing the leaderboard table
pub fn render_html(view: &LeaderboardView, precision: usize) -> String {
    let mut out = String::new();
    let title = escape_html(&view.title);

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", title);
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{}</h1>", title);
    out.push_str("<table>\n<thead>\n");
    write_html_row(&mut out, &view.header.cells, RowKind::Header, precision);
    out.push_str("</thead>\n<tbody>\n");
    for row in &view.rows {
        write_html_row(&mut out, &row.cells, row.kind, precision);
    }
    out.push_str("</tbody>\n</table>\n</body>\n</html>\n");

    out
}

fn write_html_row(out: &mut String, cells: &[Cell], kind: RowKind, precision: usize) {
    let tag = match kind {
        RowKind::Header => "th",
        RowKind::Player => "td",
    };

    out.push_str("<tr>");
    for cell in cells {
        let _ = write!(out, "<{}", tag);
        if cell.colspan > 1 {
            let _ = write!(out, " colspan=\"{}\"", cell.colspan);
        }
        if cell.rowspan > 1 {
            let _ = write!(out, " rowspan=\"{}\"", cell.rowspan);
        }
        let _ = write!(out, ">{}</{}>", escape_html(&cell.display(precision)), tag);
    }
    out.push_str("</tr>\n");
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::view::Row;

    fn view() -> LeaderboardView {
        LeaderboardView {
            title: "Ratings <club>".to_string(),
            header: Row {
                kind: RowKind::Header,
                cells: vec![Cell::text("Player"), Cell::text("Rating")],
            },
            rows: vec![
                Row {
                    kind: RowKind::Player,
                    cells: vec![Cell::text("Tal Mikhail"), Cell::rating(1607.2)],
                },
                Row {
                    kind: RowKind::Player,
                    cells: vec![Cell::text("O'Kelly Alberic"), Cell::text("1500?")],
                },
            ],
        }
    }

    #[test]
    fn test_text_alignment() {
        let text = render_text(&view(), 1);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Ratings <club>");
        assert_eq!(lines[1], "Player          | Rating");
        assert_eq!(lines[2], "----------------+-------");
        assert_eq!(lines[3], "Tal Mikhail     | 1607.2");
        assert_eq!(lines[4], "O'Kelly Alberic |  1500?");
    }

    #[test]
    fn test_html_escapes_and_tags() {
        let html = render_html(&view(), 1);

        assert!(html.contains("<title>Ratings &lt;club&gt;</title>"));
        assert!(html.contains("<tr><th>Player</th><th>Rating</th></tr>"));
        assert!(html.contains("<tr><td>Tal Mikhail</td><td>1607.2</td></tr>"));
        assert!(html.contains("O&#39;Kelly Alberic"));
    }

    #[test]
    fn test_html_spans() {
        let mut view = view();
        view.header.cells[1].colspan = 3;
        let html = render_html(&view, 1);
        assert!(html.contains("<th colspan=\"3\">Rating</th>"));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(OutputFormat::Html.file_name(), "index.html");
        assert_eq!(OutputFormat::Text.file_name(), "index.txt");
    }
}
