// ============================================================
// Layer 3 — Data Preparation Errors
// ============================================================
// Every variant is fatal for the run. Messages name the
// offending path, line, field or value so the input data or
// the pipeline config can be fixed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepareError {
    #[error("source file '{path}' does not exist")]
    SourceNotFound { path: String },

    #[error("line {line}: expected {expected} fields to match the header, found {found}")]
    SchemaMismatch { line: u64, expected: usize, found: usize },

    #[error("unknown field '{field}' (available: {})", .available.join(", "))]
    UnknownField { field: String, available: Vec<String> },

    #[error("field '{field}': no encoding for raw value '{value}'")]
    UnmappedValue { field: String, value: String },

    #[error("invalid holdout fraction {fraction}: {reason}")]
    InvalidFraction { fraction: f64, reason: String },

    #[error("{}field '{field}': value '{value}' is not numeric", at_line(.line))]
    NonNumericValue { field: String, value: String, line: Option<u64> },

    #[error("encoding table for '{field}' maps two raw values to the same code and cannot be inverted")]
    NonInjectiveTable { field: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PrepareResult<T> = std::result::Result<T, PrepareError>;

/// "line N: " prefix for records that came from a file
fn at_line(line: &Option<u64>) -> String {
    line.map(|l| format!("line {l}: ")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_value_message_names_field_and_value() {
        let e = PrepareError::UnmappedValue { field: "sex".into(), value: "X".into() };
        let msg = e.to_string();
        assert!(msg.contains("sex"));
        assert!(msg.contains("'X'"));
    }

    #[test]
    fn test_non_numeric_names_line_and_value() {
        let e = PrepareError::NonNumericValue {
            field: "absences".into(),
            value: "many".into(),
            line:  Some(3),
        };
        assert_eq!(e.to_string(), "line 3: field 'absences': value 'many' is not numeric");

        let e = PrepareError::NonNumericValue { field: "G1".into(), value: "A".into(), line: None };
        assert_eq!(e.to_string(), "field 'G1': value 'A' is not numeric");
    }

    #[test]
    fn test_unknown_field_lists_available() {
        let e = PrepareError::UnknownField {
            field:     "G4".into(),
            available: vec!["G1".into(), "G2".into()],
        };
        assert_eq!(e.to_string(), "unknown field 'G4' (available: G1, G2)");
    }
}
