use crate::{errors::NoteseekError, search::SearchResult};
use chrono::{DateTime, SecondsFormat, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

const CSV_HEADER: &str = "Title,Content,Score,Matched Fields,Created,Updated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl FromStr for ExportFormat {
    type Err = NoteseekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => Err(NoteseekError::UnknownFormat(other.to_string())),
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

pub fn export_search_results(
    results: &[SearchResult<'_>],
    format: ExportFormat,
) -> Result<String, NoteseekError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(results)?),
        ExportFormat::Csv => to_csv(results),
        ExportFormat::Markdown => Ok(to_markdown(results)),
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn matched_fields(result: &SearchResult<'_>) -> String {
    result
        .matched_fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn to_csv(results: &[SearchResult<'_>]) -> Result<String, NoteseekError> {
    // header stays bare, every data field is quoted
    let mut out = Vec::from(format!("{CSV_HEADER}\n"));

    let mut csv_wrt = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(&mut out);

    for result in results {
        csv_wrt.write_record([
            &result.note.title,
            &result.note.content,
            &result.score.to_string(),
            &matched_fields(result),
            &timestamp(result.note.created_at),
            &timestamp(result.note.updated()),
        ])?;
    }
    csv_wrt.flush()?;
    drop(csv_wrt);

    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn to_markdown(results: &[SearchResult<'_>]) -> String {
    let mut out = String::new();

    for result in results {
        let title = if result.note.title.trim().is_empty() {
            "Untitled"
        } else {
            result.note.title.as_str()
        };

        out.push_str(&format!("# {title}\n\n"));
        if !result.note.content.is_empty() {
            out.push_str(&format!("{}\n\n", result.note.content));
        }
        out.push_str(&format!(
            "*Score: {} | Matched: {} | Created: {} | Updated: {}*\n\n---\n\n",
            result.score,
            matched_fields(result),
            timestamp(result.note.created_at),
            timestamp(result.note.updated()),
        ));
    }

    out
}
