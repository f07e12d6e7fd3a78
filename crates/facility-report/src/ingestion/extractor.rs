//! Fixed-offset field extraction from the report template

use calamine::{Data, Range};

use crate::error::{Error, Result};
use crate::types::report::{ReportField, ReportFields, REPORT_FIELD_COUNT};

/// First template row holding data (0-based; sheet rows 4-13 in the template)
const FIRST_ROW: u32 = 3;
/// Indicator label column (column B)
const LABEL_COL: u32 = 1;
/// Reported value column (column H)
const VALUE_COL: u32 = 7;

/// Extract the ten label/value pairs from the fixed template block.
///
/// The template layout is a hard-coded contract: rows 3..=12, labels in
/// column 1, values in column 7. Fails if any value cell is missing,
/// non-numeric, or negative. Values are truncated to integers, not rounded.
pub fn extract_report(sheet: &Range<Data>) -> Result<ReportFields> {
    let mut values = Vec::with_capacity(REPORT_FIELD_COUNT);
    let mut labels = Vec::with_capacity(REPORT_FIELD_COUNT);

    for row in FIRST_ROW..FIRST_ROW + REPORT_FIELD_COUNT as u32 {
        labels.push(cell_label(sheet.get_value((row, LABEL_COL))));
        values.push(cell_number(sheet.get_value((row, VALUE_COL))));
    }

    if values.iter().any(|v| v.is_none()) {
        return Err(Error::validation("One or more required values are empty."));
    }
    if values.iter().flatten().any(|v| *v < 0.0) {
        return Err(Error::validation(
            "One or more required values are negative.",
        ));
    }

    let fields = labels
        .into_iter()
        .zip(values)
        .map(|(label, value)| ReportField {
            label,
            // negativity already checked; truncate toward zero
            value: value.unwrap_or_default().trunc() as i64,
        })
        .collect();

    ReportFields::new(fields)
}

/// Coerce a label cell to a string
fn cell_label(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Coerce a value cell to a number, `None` when missing or non-numeric
fn cell_number(cell: Option<&Data>) -> Option<f64> {
    match cell {
        Some(Data::Int(i)) => Some(*i as f64),
        Some(Data::Float(f)) => Some(*f),
        Some(Data::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(values: &[f64]) -> Range<Data> {
        let mut sheet = Range::new((0, 0), (15, 8));
        sheet.set_value((0, 0), Data::String("Monthly Facility Report".to_string()));
        for (i, value) in values.iter().enumerate() {
            let row = FIRST_ROW + i as u32;
            sheet.set_value((row, LABEL_COL), Data::String(format!("indicator_{}", i)));
            sheet.set_value((row, VALUE_COL), Data::Float(*value));
        }
        sheet
    }

    #[test]
    fn test_extracts_ten_fields_in_order() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let fields = extract_report(&template(&values)).unwrap();

        assert_eq!(fields.len(), REPORT_FIELD_COUNT);
        for (i, field) in fields.iter().enumerate() {
            assert_eq!(field.label, format!("indicator_{}", i));
            assert_eq!(field.value, values[i] as i64);
        }
    }

    #[test]
    fn test_truncates_instead_of_rounding() {
        let values = [10.9, 20.1, 30.5, 40.99, 50.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let fields = extract_report(&template(&values)).unwrap();
        assert_eq!(fields.get("indicator_0"), Some(10));
        assert_eq!(fields.get("indicator_3"), Some(40));
    }

    #[test]
    fn test_missing_value_is_a_validation_error() {
        let mut sheet = template(&[10.0, 20.0, 30.0, 40.0, 50.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        sheet.set_value((FIRST_ROW + 4, VALUE_COL), Data::Empty);

        let err = extract_report(&sheet).unwrap_err();
        assert_eq!(err.to_string(), "One or more required values are empty.");
    }

    #[test]
    fn test_negative_value_is_a_validation_error() {
        let values = [10.0, 20.0, -3.0, 40.0, 50.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let err = extract_report(&template(&values)).unwrap_err();
        assert_eq!(err.to_string(), "One or more required values are negative.");
    }

    #[test]
    fn test_non_numeric_value_is_treated_as_missing() {
        let mut sheet = template(&[10.0, 20.0, 30.0, 40.0, 50.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        sheet.set_value(
            (FIRST_ROW, VALUE_COL),
            Data::String("n/a".to_string()),
        );

        let err = extract_report(&sheet).unwrap_err();
        assert_eq!(err.to_string(), "One or more required values are empty.");
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let mut sheet = template(&[10.0, 20.0, 30.0, 40.0, 50.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        sheet.set_value((FIRST_ROW, VALUE_COL), Data::String(" 42 ".to_string()));

        let fields = extract_report(&sheet).unwrap();
        assert_eq!(fields.get("indicator_0"), Some(42));
    }

    #[test]
    fn test_integer_cells_are_accepted() {
        let mut sheet = template(&[10.0, 20.0, 30.0, 40.0, 50.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        sheet.set_value((FIRST_ROW + 1, VALUE_COL), Data::Int(77));

        let fields = extract_report(&sheet).unwrap();
        assert_eq!(fields.get("indicator_1"), Some(77));
    }
}
