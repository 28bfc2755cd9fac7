//! Dataset and trace file formats
//!
//! ```text
//! initial.tsv   <key>\t<value>
//! ops.txt       G <key>
//!               S <key> <value>
//! ```
//!
//! Blank lines are skipped everywhere. Anything else that does not match
//! the format is rejected with the offending 1-based line number, so a bad
//! file fails before any timing starts.

use shardbench_core::{Entry, Error, Op, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Parse a dataset from a reader
pub fn parse_dataset<R: BufRead>(reader: R) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = line.split_once('\t').ok_or_else(|| Error::Parse {
            line: idx + 1,
            reason: "expected <key>\\t<value>".to_string(),
        })?;
        if key.is_empty() {
            return Err(Error::Parse {
                line: idx + 1,
                reason: "empty key".to_string(),
            });
        }
        entries.push(Entry::new(key, value));
    }
    Ok(entries)
}

/// Parse a trace from a reader
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<Op>> {
    let mut ops = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        ops.push(parse_op(line).map_err(|reason| Error::Parse {
            line: idx + 1,
            reason,
        })?);
    }
    Ok(ops)
}

fn parse_op(line: &str) -> std::result::Result<Op, String> {
    let (tag, rest) = split_token(line.trim_start());
    match tag {
        "G" => {
            let (key, trailing) = split_token(rest);
            if key.is_empty() {
                return Err("G without a key".to_string());
            }
            if !trailing.is_empty() {
                return Err(format!("unexpected data after key: {:?}", trailing));
            }
            Ok(Op::Get(key.to_string()))
        }
        "S" => {
            let (key, value) = split_token(rest);
            if key.is_empty() || value.is_empty() {
                return Err("S needs a key and a value".to_string());
            }
            Ok(Op::Set(key.to_string(), value.to_string()))
        }
        other => Err(format!("unknown operation {:?}", other)),
    }
}

/// First whitespace-delimited token, and the rest with leading whitespace
/// removed
fn split_token(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (s, ""),
    }
}

/// Load a dataset file
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<Entry>> {
    let path = path.as_ref();
    let entries = parse_dataset(BufReader::new(File::open(path)?))?;
    tracing::info!(path = %path.display(), entries = entries.len(), "loaded dataset file");
    Ok(entries)
}

/// Load a trace file
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<Op>> {
    let path = path.as_ref();
    let ops = parse_trace(BufReader::new(File::open(path)?))?;
    tracing::info!(path = %path.display(), ops = ops.len(), "loaded trace file");
    Ok(ops)
}

/// Write a dataset in `key<TAB>value` form
pub fn write_dataset<W: Write>(writer: W, entries: &[Entry]) -> Result<()> {
    let mut w = BufWriter::new(writer);
    for e in entries {
        writeln!(w, "{}\t{}", e.key, e.value)?;
    }
    w.flush()?;
    Ok(())
}

/// Write a trace in `G key` / `S key value` form
pub fn write_trace<W: Write>(writer: W, ops: &[Op]) -> Result<()> {
    let mut w = BufWriter::new(writer);
    for op in ops {
        writeln!(w, "{}", op)?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dataset() {
        let input = "aaaa\thttps://a.example\n\nbbbb\tx y\tz\r\n";
        let entries = parse_dataset(input.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![
                Entry::new("aaaa", "https://a.example"),
                Entry::new("bbbb", "x y\tz"),
            ]
        );
    }

    #[test]
    fn test_parse_dataset_missing_tab() {
        let err = parse_dataset("ok\tv\nbroken line\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_dataset_empty_key() {
        let err = parse_dataset("\tvalue\n".as_bytes()).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_parse_trace() {
        let input = "G abc\nS def https://x.example/a b\n\n  G   ghi  \n";
        let ops = parse_trace(input.as_bytes()).unwrap();
        assert_eq!(
            ops,
            vec![
                Op::Get("abc".to_string()),
                Op::Set("def".to_string(), "https://x.example/a b".to_string()),
                Op::Get("ghi".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_trace_errors() {
        for (input, line) in [
            ("G\n", 1),
            ("G a\nS b\n", 2),
            ("G a\nG b c\n", 2),
            ("\nX a\n", 2),
        ] {
            match parse_trace(input.as_bytes()) {
                Err(Error::Parse { line: got, .. }) => assert_eq!(got, line, "{:?}", input),
                other => panic!("expected parse error for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_write_then_parse_trace() {
        let ops = vec![
            Op::Set("k1".to_string(), "v!@#".to_string()),
            Op::Get("k1".to_string()),
        ];
        let mut buf = Vec::new();
        write_trace(&mut buf, &ops).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "S k1 v!@#\nG k1\n");
        assert_eq!(parse_trace(buf.as_slice()).unwrap(), ops);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_trace("/nonexistent/ops.txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let initial = dir.path().join("initial.tsv");
        let trace = dir.path().join("ops.txt");
        std::fs::write(&initial, "k\tv\n").unwrap();
        std::fs::write(&trace, "G k\n").unwrap();

        assert_eq!(load_dataset(&initial).unwrap(), vec![Entry::new("k", "v")]);
        assert_eq!(load_trace(&trace).unwrap(), vec![Op::Get("k".to_string())]);
    }
}
