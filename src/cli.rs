use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use noteseek::{
    export::ExportFormat,
    search::{SortKey, SortOrder},
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SnapshotArgs {
    /// JSON file with `notes` and `folders` arrays
    #[clap(short, long)]
    pub notes: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum HistoryAction {
    /// Print recent searches, most recent first
    List {},
    /// Forget all recent searches
    Clear {},
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search notes
    Search {
        #[clap(flatten)]
        snapshot: SnapshotArgs,

        /// Free text query
        #[clap(allow_hyphen_values = true)]
        query: Option<String>,

        /// Only notes in these folders (repeatable)
        #[clap(short, long = "folder")]
        folders: Vec<i64>,

        /// Include notes from subfolders of --folder
        #[clap(long, default_value = "false")]
        subfolders: bool,

        /// Notes carrying any of these tags (comma separated)
        #[clap(short = 'g', long)]
        tags: Option<String>,

        /// Created at or after (YYYY-MM-DD or RFC 3339)
        #[clap(long, value_parser = parse_date_from)]
        from: Option<DateTime<Utc>>,

        /// Created at or before (YYYY-MM-DD or RFC 3339)
        #[clap(long, value_parser = parse_date_to)]
        to: Option<DateTime<Utc>>,

        /// true or false
        #[clap(long)]
        favorite: Option<bool>,

        /// true or false
        #[clap(long)]
        archived: Option<bool>,

        /// relevance, date, title or updated
        #[clap(short, long)]
        sort: Option<SortKey>,

        /// asc or desc
        #[clap(short, long, default_value = "desc")]
        order: SortOrder,

        #[clap(short, long)]
        limit: Option<usize>,

        /// json, csv or markdown
        #[clap(long, default_value = "json", value_parser = parse_format)]
        format: ExportFormat,

        /// Print the count
        #[clap(short = 'c', long, default_value = "false")]
        count: bool,

        /// Don't record the query in the search history
        #[clap(long, default_value = "false")]
        no_history: bool,
    },
    /// Suggest completions for a partial query
    Suggest {
        #[clap(flatten)]
        snapshot: SnapshotArgs,

        #[clap(allow_hyphen_values = true)]
        query: Option<String>,
    },
    /// Most used tags
    Tags {
        #[clap(flatten)]
        snapshot: SnapshotArgs,

        #[clap(short, long, default_value = "10")]
        limit: usize,
    },
    /// Note, word and tag totals
    Stats {
        #[clap(flatten)]
        snapshot: SnapshotArgs,
    },
    /// Manage search history
    History {
        #[clap(subcommand)]
        action: HistoryAction,
    },
}

fn parse_date(value: &str, day_time: NaiveTime) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(day_time).and_utc())
        .map_err(|_| format!("expected YYYY-MM-DD or RFC 3339, got {value:?}"))
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    value.parse::<ExportFormat>().map_err(|e| e.to_string())
}

/// A bare date starts at midnight.
fn parse_date_from(value: &str) -> Result<DateTime<Utc>, String> {
    parse_date(value, NaiveTime::default())
}

/// A bare date covers the whole day.
fn parse_date_to(value: &str) -> Result<DateTime<Utc>, String> {
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::default());
    parse_date(value, end_of_day)
}
