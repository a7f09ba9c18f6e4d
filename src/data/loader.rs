use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, SanitizeError};

use super::model::{Series, SeriesRole};

/// Column holding the sample time.
const TIME_FIELD: usize = 0;
/// Column holding the intensity.
const VALUE_FIELD: usize = 2;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one raw recording.
///
/// Every line must hold at least three whitespace-separated
/// numbers: `time <ignored> intensity [...]`. Columns past the third are
/// ignored, as is the second. An empty file yields an empty series; the
/// caller decides whether that is acceptable.
pub fn load_series(path: &Path, role: SeriesRole) -> Result<Series> {
    let file = File::open(path)?;
    let (times, values) = parse_columns(BufReader::new(file), path)?;
    log::debug!("loaded {} {role} samples from {}", times.len(), path.display());
    Ok(Series::new(role, times, values))
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// Parse `reader` into aligned time / intensity columns. `path` is only used
/// for error messages.
pub fn parse_columns<R: BufRead>(reader: R, path: &Path) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut times = Vec::new();
    let mut values = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(parse_error(path, line_no, "line is not valid UTF-8".into()));
            }
            Err(e) => return Err(e.into()),
        };
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() <= VALUE_FIELD {
            return Err(parse_error(
                path,
                line_no,
                format!("expected at least 3 fields, found {}", fields.len()),
            ));
        }

        times.push(parse_field(fields[TIME_FIELD], path, line_no, "time")?);
        values.push(parse_field(fields[VALUE_FIELD], path, line_no, "intensity")?);
    }

    Ok((times, values))
}

fn parse_field(tok: &str, path: &Path, line: usize, col: &str) -> Result<f64> {
    tok.parse::<f64>()
        .map_err(|_| parse_error(path, line, format!("{col} field '{tok}' is not a number")))
}

fn parse_error(path: &Path, line: usize, reason: String) -> SanitizeError {
    SanitizeError::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<(Vec<f64>, Vec<f64>)> {
        parse_columns(text.as_bytes(), Path::new("test.txt"))
    }

    #[test]
    fn test_reads_time_and_third_column() {
        let (t, v) = parse("0.0 7 1.5 9\n1.2 7 2.5 9\n2.4 7 3.5\n").unwrap();
        assert_eq!(t, vec![0.0, 1.2, 2.4]);
        assert_eq!(v, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_mixed_whitespace() {
        let (t, v) = parse("0.0\t0   10\n  3e-1 0 -2.5e2  \n").unwrap();
        assert_eq!(t, vec![0.0, 0.3]);
        assert_eq!(v, vec![10.0, -250.0]);
    }

    #[test]
    fn test_blank_line_is_parse_error() {
        let err = parse("0.0 0 1.0\n\n1.0 0 2.0\n").unwrap_err();
        match err {
            SanitizeError::Parse { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("found 0"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let bytes: &[u8] = b"0.0 0 1.0\n1.0 0 \xff\xfe 0\n";
        let err = parse_columns(bytes, Path::new("test.txt")).unwrap_err();
        match err {
            SanitizeError::Parse { path, line, reason } => {
                assert_eq!(path, Path::new("test.txt"));
                assert_eq!(line, 2);
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_gives_empty_columns() {
        let (t, v) = parse("").unwrap();
        assert!(t.is_empty());
        assert!(v.is_empty());
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse("0.0 0 1.0\n1.0 0\n").unwrap_err();
        match err {
            SanitizeError::Parse { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("at least 3 fields"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_field() {
        let err = parse("0.0 0 abc\n").unwrap_err();
        match err {
            SanitizeError::Parse { line, reason, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains("'abc'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_series(Path::new("/nonexistent/C_000009.txt"), SeriesRole::Contrast)
            .unwrap_err();
        assert!(matches!(err, SanitizeError::Io(_)));
    }
}
