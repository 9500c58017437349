//! Renders a stored "title line + CSV rows" record as an HTML document.

use std::fmt::Write as _;

use html_escape::encode_text;

use crate::errors::StrengthError;

pub const NO_DATA: &str = "No data available";

/// Title and parsed CSV rows of a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthTable {
    pub title: String,
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

/// Split `content` into non-blank lines; the first is the title, the rest are CSV.
pub fn parse_table(content: &str) -> Result<StrengthTable, StrengthError> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let title = lines
        .next()
        .map(|l| l.trim().to_string())
        .ok_or_else(|| StrengthError::internal("strength data is missing a title line"))?;

    let body = lines.collect::<Vec<_>>().join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut parsed = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| StrengthError::internal(format!("malformed CSV row: {e}")))?;
        parsed.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let mut parsed = parsed.into_iter();
    let header = parsed.next();
    Ok(StrengthTable { title, header, rows: parsed.collect() })
}

pub fn render_table(content: &str) -> Result<String, StrengthError> {
    Ok(parse_table(content)?.to_html())
}

impl StrengthTable {
    pub fn to_html(&self) -> String {
        let title = encode_text(&self.title);
        let mut table = String::new();

        if let Some(header) = &self.header {
            table.push_str("      <thead>\n        <tr>");
            for cell in header {
                let _ = write!(table, "<th>{}</th>", encode_text(cell));
            }
            table.push_str("</tr>\n      </thead>\n");
        }

        table.push_str("      <tbody>\n");
        if self.rows.is_empty() {
            let span = self.header.as_ref().map_or(1, |h| h.len().max(1));
            let _ = writeln!(table, "        <tr><td colspan=\"{span}\">{NO_DATA}</td></tr>");
        }
        for row in &self.rows {
            table.push_str("        <tr>");
            for cell in row {
                let _ = write!(table, "<td>{}</td>", encode_text(cell));
            }
            table.push_str("</tr>\n");
        }
        table.push_str("      </tbody>\n");

        format!(
            "\
<!DOCTYPE html>
<html>
  <head>
    <meta charset=\"utf-8\">
    <title>{title}</title>
    <style>
      body {{ font-family: sans-serif; margin: 2rem; }}
      table {{ border-collapse: collapse; }}
      th, td {{ border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }}
      th {{ background: #f4f4f4; }}
    </style>
  </head>
  <body>
    <h1>{title}</h1>
    <table>
{table}    </table>
  </body>
</html>
"
        )
    }
}
