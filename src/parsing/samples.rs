use std::path::Path;

use crate::core::sample::SampleVector;
use crate::parsing::ParseError;
use crate::utils::validation::check_sample_limit;

/// Read a sample file: one concentration per line, numbered from 1 in file order
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_sample_file(path: &Path) -> Result<SampleVector, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_sample_text(&content)
}

/// Parse sample concentrations from text.
///
/// Blank lines are skipped and do not take a sample number.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line is not a finite number, or
/// `ParseError::TooManySamples` if the limit is exceeded.
pub fn parse_sample_text(text: &str) -> Result<SampleVector, ParseError> {
    let mut values = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let value: f64 = line
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Invalid concentration on line {line_num}: '{line}'"
                ))
            })?;

        if check_sample_limit(values.len()).is_some() {
            return Err(ParseError::TooManySamples(values.len()));
        }

        values.push(value);
    }

    tracing::debug!(samples = values.len(), "Parsed sample file");

    Ok(SampleVector::from_values(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_sample_text() {
        let samples = parse_sample_text("9.0\n25\n 3.5 \n").unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples.get(1), Some(9.0));
        assert_eq!(samples.get(2), Some(25.0));
        assert_eq!(samples.get(3), Some(3.5));
    }

    #[test]
    fn test_blank_lines_do_not_consume_numbers() {
        let samples = parse_sample_text("\n1.0\n\n2.0\n\n").unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.get(2), Some(2.0));
    }

    #[test]
    fn test_invalid_line_names_line_number() {
        let err = parse_sample_text("1.0\nabc\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(ref msg) if msg.contains("line 2")));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(parse_sample_text("inf\n").is_err());
        assert!(parse_sample_text("NaN\n").is_err());
    }

    #[test]
    fn test_parse_sample_file() {
        let mut file = NamedTempFile::new().unwrap();
        for value in [10.5, 20.25, 30.0] {
            writeln!(file, "{value}").unwrap();
        }
        file.flush().unwrap();

        let samples = parse_sample_file(file.path()).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples.get(2), Some(20.25));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_sample_file(Path::new("/nonexistent/samples.txt")).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
