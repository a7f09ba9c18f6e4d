use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Leading record of every sanitized file.
pub const HEADER: &str = "0.0 0 0.0 0";

/// Write a sanitized series to `path`, replacing any existing file.
///
/// Layout: the [`HEADER`] line, then `time 0 value 0` per sample. Numbers use
/// the shortest representation that parses back to the same `f64`.
pub fn write_sanitized(path: &Path, times: &[f64], values: &[f64]) -> Result<()> {
    if times.len() != values.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{} time stamps but {} values",
                times.len(),
                values.len()
            ),
        )
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut out = BufWriter::new(File::create(path)?);
    write_records(&mut out, times, values)?;
    out.flush()?;
    log::debug!("wrote {} records to {}", times.len(), path.display());
    Ok(())
}

/// Write the header and records to any sink.
pub fn write_records<W: Write>(out: &mut W, times: &[f64], values: &[f64]) -> io::Result<()> {
    writeln!(out, "{HEADER}")?;
    for (t, v) in times.iter().zip(values) {
        writeln!(out, "{} 0 {} 0", fmt_f64(*t), fmt_f64(*v))?;
    }
    Ok(())
}

/// `Display` for f64 drops the fraction of integral values ("3"); keep a
/// trailing ".0" so the time column reads as a float like the header does.
fn fmt_f64(x: f64) -> String {
    let s = x.to_string();
    if x.is_finite() && !s.contains(['.', 'e', 'E']) {
        format!("{s}.0")
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_columns;

    fn render(times: &[f64], values: &[f64]) -> String {
        let mut buf = Vec::new();
        write_records(&mut buf, times, values).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_layout() {
        let text = render(&[0.0, 1.2, 2.4], &[5.0, -0.25, 1e-7]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["0.0 0 0.0 0", "0.0 0 5.0 0", "1.2 0 -0.25 0", "2.4 0 0.0000001 0"]
        );
    }

    #[test]
    fn test_header_only_for_empty_series() {
        assert_eq!(render(&[], &[]), "0.0 0 0.0 0\n");
    }

    #[test]
    fn test_parses_back_exactly() {
        let times: Vec<f64> = (0..50).map(|i| i as f64 * 1.1 + 0.013 * (i % 7) as f64).collect();
        let values: Vec<f64> = times.iter().map(|t| (t * 0.37).sin() * 123.456_789).collect();
        let text = render(&times, &values);

        let (t, v) = parse_columns(text.as_bytes(), Path::new("mem")).unwrap();
        // header line comes back as the (0, 0) sample
        assert_eq!(t[0], 0.0);
        assert_eq!(v[0], 0.0);
        assert_eq!(&t[1..], times.as_slice());
        assert_eq!(&v[1..], values.as_slice());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        assert!(write_sanitized(&path, &[0.0, 1.0], &[1.0]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("input").join("sanitized_c.txt");
        write_sanitized(&path, &[0.5], &[2.0]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "0.0 0 0.0 0\n0.5 0 2.0 0\n");
    }
}
