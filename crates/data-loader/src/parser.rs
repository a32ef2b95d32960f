//! Parser for the merged review CSV.
//!
//! Expected headers (order free, extra columns ignored):
//! `title, platform, genre, release_year, score` and optionally
//! `release_month`.
//!
//! Cleaning rules applied while parsing:
//! - rows with an empty required field are dropped
//! - rows whose `release_year` is the 1970 sentinel are dropped
//! - the `genre` field is split on `", "` into tags

use crate::error::{DataLoadError, Result};
use crate::types::{GameRecord, SENTINEL_YEAR, split_genres};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Headers the loader cannot work without.
pub const REQUIRED_COLUMNS: [&str; 5] = ["title", "platform", "genre", "release_year", "score"];

/// One CSV row before cleaning. Every field is optional so that incomplete
/// rows can be counted and dropped instead of aborting the whole load.
#[derive(Debug, Deserialize)]
struct RawReviewRow {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    release_year: Option<String>,
    #[serde(default)]
    release_month: Option<String>,
    #[serde(default)]
    score: Option<String>,
}

/// Result of parsing: the kept records plus what was dropped and why.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub records: Vec<GameRecord>,
    pub dropped_incomplete: usize,
    pub dropped_sentinel_year: usize,
}

/// Parse the review CSV at `path`.
pub fn parse_reviews(path: &Path) -> Result<ParseOutcome> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    parse_reviews_from_reader(file)
}

/// Parse review CSV data from any reader.
pub fn parse_reviews_from_reader<R: Read>(reader: R) -> Result<ParseOutcome> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn(column.to_string()));
        }
    }

    let mut outcome = ParseOutcome::default();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let raw: RawReviewRow = record.deserialize(Some(&headers))?;

        match clean_row(raw, line)? {
            RowVerdict::Keep(game) => outcome.records.push(game),
            RowVerdict::Incomplete => outcome.dropped_incomplete += 1,
            RowVerdict::SentinelYear => outcome.dropped_sentinel_year += 1,
        }
    }

    debug!(
        kept = outcome.records.len(),
        dropped_incomplete = outcome.dropped_incomplete,
        dropped_sentinel_year = outcome.dropped_sentinel_year,
        "Parsed review rows"
    );
    Ok(outcome)
}

enum RowVerdict {
    Keep(GameRecord),
    Incomplete,
    SentinelYear,
}

fn clean_row(raw: RawReviewRow, line: u64) -> Result<RowVerdict> {
    let (Some(title), Some(platform), Some(genre), Some(year), Some(score)) = (
        non_empty(raw.title),
        non_empty(raw.platform),
        non_empty(raw.genre),
        non_empty(raw.release_year),
        non_empty(raw.score),
    ) else {
        return Ok(RowVerdict::Incomplete);
    };

    let release_year = parse_year(&year, line)?;
    if release_year == SENTINEL_YEAR {
        return Ok(RowVerdict::SentinelYear);
    }

    let genres = split_genres(&genre);
    if genres.is_empty() {
        return Ok(RowVerdict::Incomplete);
    }

    let release_month = match non_empty(raw.release_month) {
        Some(month) => Some(parse_month(&month, line)?),
        None => None,
    };

    Ok(RowVerdict::Keep(GameRecord {
        title,
        platform,
        genres,
        release_year,
        release_month,
        score: parse_score(&score, line)?,
    }))
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

/// Parse an integral number that may have been written as a float
/// (`"2010"` or `"2010.0"`).
fn parse_integral(value: &str) -> Option<i64> {
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    let f = value.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 {
        Some(f as i64)
    } else {
        None
    }
}

fn parse_year(value: &str, line: u64) -> Result<i32> {
    parse_integral(value)
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| DataLoadError::ParseError {
            line,
            reason: format!("Invalid release_year: {}", value),
        })
}

fn parse_month(value: &str, line: u64) -> Result<u8> {
    parse_integral(value)
        .filter(|n| (1..=12).contains(n))
        .map(|n| n as u8)
        .ok_or_else(|| DataLoadError::ParseError {
            line,
            reason: format!("Invalid release_month: {}", value),
        })
}

fn parse_score(value: &str, line: u64) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite())
        .ok_or_else(|| DataLoadError::ParseError {
            line,
            reason: format!("Invalid score: {}", value),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
title,score,platform,genre,release_year,release_month
Halo 3,9.5,Xbox 360,\"Shooter, Action\",2007,9
Old Game,7.0,PC,Adventure,1970,1
Half Entry,,PC,Action,2005,3
Portal 2,9.5,PC,\"Puzzle, Platformer\",2011.0,4
No Month,6.5,Wii,Sports,2008,
";

    #[test]
    fn test_parse_and_clean() {
        let outcome = parse_reviews_from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.dropped_sentinel_year, 1);
        assert_eq!(outcome.dropped_incomplete, 1);

        let halo = &outcome.records[0];
        assert_eq!(halo.title, "Halo 3");
        assert_eq!(halo.platform, "Xbox 360");
        assert_eq!(halo.genres, vec!["Shooter", "Action"]);
        assert_eq!(halo.release_year, 2007);
        assert_eq!(halo.release_month, Some(9));
        assert_eq!(halo.score, 9.5);

        // Float-formatted years are accepted
        assert_eq!(outcome.records[1].release_year, 2011);
        // Month is optional
        assert_eq!(outcome.records[2].release_month, None);
    }

    #[test]
    fn test_missing_required_column() {
        let data = "title,platform,genre,score\nA,PC,Action,8.0\n";
        let err = parse_reviews_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(ref c) if c == "release_year"));
    }

    #[test]
    fn test_invalid_score_is_a_parse_error() {
        let data = "title,platform,genre,release_year,score\nA,PC,Action,2001,great\n";
        let err = parse_reviews_from_reader(data.as_bytes()).unwrap_err();
        match err {
            DataLoadError::ParseError { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("score"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = parse_reviews(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_integral() {
        assert_eq!(parse_integral("2010"), Some(2010));
        assert_eq!(parse_integral("2010.0"), Some(2010));
        assert_eq!(parse_integral("2010.5"), None);
        assert_eq!(parse_integral("soon"), None);
    }
}
