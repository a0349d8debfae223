//! Export layer: writes a [`SearchResult`] to any [`Write`] sink.
//!
//! Two formats are supported: `tsv` (header plus one delimited line per row,
//! searched column run through the highlighter) and `jsonl` (one object per
//! row with the match ranges of the searched column).

use crate::highlight::{Highlighter, Markup};
use crate::search::SearchResult;
use serde::Serialize;
use std::io::{self, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Tsv,
    Jsonl,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tsv" => Ok(ExportFormat::Tsv),
            "jsonl" | "json" => Ok(ExportFormat::Jsonl),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

#[derive(Serialize)]
struct JsonRow {
    line: usize,
    fields: serde_json::Map<String, serde_json::Value>,
    matches: Vec<[usize; 2]>,
}

/// Write `result` in `format`.
///
/// `markup` only applies to TSV; JSONL always carries plain values and
/// reports match positions as byte ranges instead.
pub fn write_results<W: Write>(
    out: &mut W,
    result: &SearchResult,
    highlighter: &Highlighter,
    format: ExportFormat,
    markup: &Markup<'_>,
) -> io::Result<()> {
    match format {
        ExportFormat::Tsv => write_tsv(out, result, highlighter, markup),
        ExportFormat::Jsonl => write_jsonl(out, result, highlighter),
    }
}

fn write_tsv<W: Write>(
    out: &mut W,
    result: &SearchResult,
    highlighter: &Highlighter,
    markup: &Markup<'_>,
) -> io::Result<()> {
    writeln!(out, "{}", result.header().columns().join("\t"))?;
    let target = result.target_index();
    for row in result.rows() {
        let cells: Vec<String> = row
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                if i == target {
                    highlighter.highlight(field).render(markup)
                } else {
                    field.clone()
                }
            })
            .collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }
    Ok(())
}

fn write_jsonl<W: Write>(
    out: &mut W,
    result: &SearchResult,
    highlighter: &Highlighter,
) -> io::Result<()> {
    let columns = result.header().columns();
    for row in result.rows() {
        // Extra trailing fields beyond the header are kept under their index.
        let fields = row
            .fields
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let key = columns.get(i).cloned().unwrap_or_else(|| i.to_string());
                (key, serde_json::Value::String(value.clone()))
            })
            .collect();
        let matches = result
            .highlight_row(row, highlighter)
            .spans()
            .iter()
            .map(|r| [r.start, r.end])
            .collect();
        let json = JsonRow {
            line: row.line,
            fields,
            matches,
        };
        serde_json::to_writer(&mut *out, &json)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
