// ============================================================
// Layer 4 — Feature / Target Projection
// ============================================================
// Turns an encoded, complete Dataset into the numeric form the
// learning step consumes. Columns keep schema order; the
// target column is lifted out into its own vector.

use crate::domain::dataset::Dataset;
use crate::domain::error::{PrepareError, PrepareResult};
use crate::domain::features::{FeatureMatrix, TargetVector};
use crate::domain::value::{Record, Value};

/// Split every record into its non-target fields and target value.
pub fn project_features_target(
    dataset:      &Dataset,
    target_field: &str,
) -> PrepareResult<(FeatureMatrix, TargetVector)> {
    let target_col = dataset.field_index(target_field)?;

    let feature_cols: Vec<usize> = (0..dataset.fields().len())
        .filter(|&c| c != target_col)
        .collect();

    let features = numeric_matrix(dataset, &feature_cols)?;

    let target = dataset
        .records()
        .iter()
        .map(|r| numeric_cell(r, target_col, target_field))
        .collect::<PrepareResult<Vec<f32>>>()?;

    Ok((features, TargetVector::new(target_field, target)))
}

/// Every field becomes a feature column. Used for prediction
/// inputs that carry no target.
pub fn project_features(dataset: &Dataset) -> PrepareResult<FeatureMatrix> {
    let cols: Vec<usize> = (0..dataset.fields().len()).collect();
    numeric_matrix(dataset, &cols)
}

fn numeric_matrix(dataset: &Dataset, cols: &[usize]) -> PrepareResult<FeatureMatrix> {
    let names: Vec<String> = cols.iter().map(|&c| dataset.fields()[c].clone()).collect();

    let mut data = Vec::with_capacity(dataset.len() * cols.len());
    for record in dataset.records() {
        for (&c, name) in cols.iter().zip(&names) {
            data.push(numeric_cell(record, c, name)?);
        }
    }

    Ok(FeatureMatrix::new(names, data, dataset.len()))
}

/// Errors carry the cell text and the record's source line.
fn numeric_cell(record: &Record, col: usize, field: &str) -> PrepareResult<f32> {
    let value = record.get(col);
    value
        .and_then(Value::as_f64)
        .map(|x| x as f32)
        .ok_or_else(|| PrepareError::NonNumericValue {
            field: field.to_string(),
            value: value.map(Value::to_string).unwrap_or_default(),
            line:  record.line(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded() -> Dataset {
        Dataset::new(
            vec!["G1".into(), "G3".into(), "sex".into()],
            vec![
                Record::new(vec![Value::number(5.0), Value::number(6.0), Value::Bool(false)]),
                Record::new(vec![Value::number(15.0), Value::number(15.0), Value::Bool(true)]),
            ],
        )
    }

    #[test]
    fn test_target_removed_from_features() {
        let (x, y) = project_features_target(&encoded(), "G3").unwrap();
        assert_eq!(x.names(), &["G1", "sex"]);
        assert_eq!(x.row(0), &[5.0, 0.0]);
        assert_eq!(x.row(1), &[15.0, 1.0]);
        assert_eq!(y.name(), "G3");
        assert_eq!(y.values(), &[6.0, 15.0]);
    }

    #[test]
    fn test_unknown_target() {
        let err = project_features_target(&encoded(), "G4").unwrap_err();
        assert!(matches!(err, PrepareError::UnknownField { ref field, .. } if field == "G4"));
    }

    #[test]
    fn test_unencoded_text_is_rejected() {
        let ds = Dataset::new(
            vec!["school".into(), "G3".into()],
            vec![Record::new(vec![Value::Text("GP".into()), Value::number(10.0)])],
        );
        let err = project_features_target(&ds, "G3").unwrap_err();
        assert!(matches!(
            err,
            PrepareError::NonNumericValue { ref field, ref value, line: None }
                if field == "school" && value == "GP"
        ));
    }

    #[test]
    fn test_non_numeric_error_points_at_source_line() {
        use crate::data::loader::parse_delimited;

        let ds  = parse_delimited(b"absences,G3\n4,10\n6,12\nmany,9\n", b',').unwrap();
        let err = project_features_target(&ds, "G3").unwrap_err();
        match err {
            PrepareError::NonNumericValue { field, value, line } => {
                assert_eq!(field, "absences");
                assert_eq!(value, "many");
                assert_eq!(line, Some(4));
            }
            other => panic!("expected NonNumericValue, got {other:?}"),
        }
    }

    #[test]
    fn test_project_features_keeps_all_columns() {
        let x = project_features(&encoded()).unwrap();
        assert_eq!(x.cols(), 3);
        assert_eq!(x.rows(), 2);
    }
}
