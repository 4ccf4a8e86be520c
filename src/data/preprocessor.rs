// ============================================================
// Layer 4 — Column Selection and Missing-Data Filter
// ============================================================
// select_fields   keeps exactly the requested columns, in the
//                 requested order, row order untouched.
// drop_incomplete removes every row holding a Missing cell.
//                 No imputation.

use std::collections::HashSet;

use crate::domain::dataset::Dataset;
use crate::domain::error::PrepareResult;
use crate::domain::value::Record;

/// Project every record onto `field_names`.
///
/// Names are treated as an ordered set: a repeated name keeps
/// its first position. Fails with UnknownField on the first
/// name absent from the schema.
pub fn select_fields<S: AsRef<str>>(dataset: &Dataset, field_names: &[S]) -> PrepareResult<Dataset> {
    let mut seen    = HashSet::new();
    let mut names   = Vec::new();
    let mut indices = Vec::new();

    for name in field_names {
        let name = name.as_ref();
        if !seen.insert(name) {
            continue;
        }
        indices.push(dataset.field_index(name)?);
        names.push(name.to_string());
    }

    let records = dataset
        .records()
        .iter()
        .map(|r| r.with_values(indices.iter().filter_map(|&i| r.get(i).cloned()).collect()))
        .collect();

    tracing::debug!("Selected {} of {} fields", names.len(), dataset.fields().len());
    Ok(Dataset::new(names, records))
}

/// Keep only records with a value in every field.
pub fn drop_incomplete(dataset: &Dataset) -> Dataset {
    let records: Vec<Record> = dataset
        .records()
        .iter()
        .filter(|r| !r.has_missing())
        .cloned()
        .collect();

    let dropped = dataset.len() - records.len();
    if dropped > 0 {
        tracing::info!("Dropped {} incomplete rows ({} remain)", dropped, records.len());
    }

    Dataset::new(dataset.fields().to_vec(), records)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PrepareError;
    use crate::domain::value::Value;

    fn students() -> Dataset {
        let rows = [
            ("GP", "F", 18.0, 6.0),
            ("GP", "M", 17.0, 4.0),
            ("MS", "F", 15.0, 10.0),
        ];
        Dataset::new(
            vec!["school".into(), "sex".into(), "age".into(), "absences".into()],
            rows.iter()
                .map(|(school, sex, age, abs)| {
                    Record::new(vec![
                        Value::Text(school.to_string()),
                        Value::Text(sex.to_string()),
                        Value::number(*age),
                        Value::number(*abs),
                    ])
                })
                .collect(),
        )
    }

    /// Ten complete rows, with rows 3 and 7 missing `absences`.
    fn ten_rows_two_missing() -> Dataset {
        let records = (0..10)
            .map(|i| {
                let absences = if i == 3 || i == 7 {
                    Value::Missing
                } else {
                    Value::number(i as f64)
                };
                Record::new(vec![Value::number(15.0 + (i % 4) as f64), absences])
            })
            .collect();
        Dataset::new(vec!["age".into(), "absences".into()], records)
    }

    #[test]
    fn test_select_preserves_rows_and_order() {
        let ds  = students();
        let out = select_fields(&ds, &["age", "school"]).unwrap();

        assert_eq!(out.fields(), &["age", "school"]);
        assert_eq!(out.len(), ds.len());
        for (row, record) in out.records().iter().enumerate() {
            assert_eq!(record.len(), 2);
            assert_eq!(out.value(row, "age"), ds.value(row, "age"));
            assert_eq!(out.value(row, "school"), ds.value(row, "school"));
        }
    }

    #[test]
    fn test_select_collapses_duplicates() {
        let out = select_fields(&students(), &["sex", "age", "sex"]).unwrap();
        assert_eq!(out.fields(), &["sex", "age"]);
    }

    #[test]
    fn test_select_unknown_field() {
        let err = select_fields(&students(), &["age", "G3"]).unwrap_err();
        assert!(matches!(err, PrepareError::UnknownField { ref field, .. } if field == "G3"));
    }

    #[test]
    fn test_drop_incomplete_removes_two_of_ten() {
        let out = drop_incomplete(&ten_rows_two_missing());
        assert_eq!(out.len(), 8);
        assert!(out.records().iter().all(|r| !r.has_missing()));
    }

    #[test]
    fn test_drop_incomplete_is_idempotent() {
        let once  = drop_incomplete(&ten_rows_two_missing());
        let twice = drop_incomplete(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_drop_incomplete_keeps_order() {
        let out = drop_incomplete(&ten_rows_two_missing());
        let absences: Vec<f64> = out
            .column("absences")
            .unwrap()
            .into_iter()
            .filter_map(Value::as_f64)
            .collect();
        assert_eq!(absences, vec![0.0, 1.0, 2.0, 4.0, 5.0, 6.0, 8.0, 9.0]);
    }
}
