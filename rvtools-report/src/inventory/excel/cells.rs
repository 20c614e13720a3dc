//! Best-effort coercion of spreadsheet cells
//!
//! A bad cell never fails a parse: numbers fall back to 0 and strings to "".

use calamine::Data;

/// Cell as trimmed text; empty for blanks and error cells
pub fn cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if !f.is_finite() {
                String::new()
            } else if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.trim().to_string(),
        Data::DurationIso(s) => s.trim().to_string(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

/// Cell as a float; 0.0 when blank or unparseable
pub fn cell_float(cell: &Data) -> f64 {
    let value = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Data::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if value.is_finite() { value } else { 0.0 }
}

/// Cell as a non-negative count, truncating fractions; 0 when unparseable
pub fn cell_count(cell: &Data) -> u32 {
    // Float to int casts saturate, negatives land on 0
    cell_float(cell).trunc() as u32
}

static EMPTY_CELL: Data = Data::Empty;

/// Look up a cell by optional column index; missing columns and short rows read as empty
pub fn get_cell(row: &[Data], col: Option<usize>) -> &Data {
    col.and_then(|idx| row.get(idx)).unwrap_or(&EMPTY_CELL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_string() {
        assert_eq!(cell_string(&Data::String("  vm01 ".into())), "vm01");
        assert_eq!(cell_string(&Data::Int(42)), "42");
        assert_eq!(cell_string(&Data::Float(42.0)), "42");
        assert_eq!(cell_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_string(&Data::Empty), "");
        assert_eq!(cell_string(&Data::Error(calamine::CellErrorType::NA)), "");
    }

    #[test]
    fn test_cell_float() {
        assert_eq!(cell_float(&Data::Float(20480.0)), 20480.0);
        assert_eq!(cell_float(&Data::Int(64)), 64.0);
        assert_eq!(cell_float(&Data::String(" 12.5 ".into())), 12.5);
        assert_eq!(cell_float(&Data::String("n/a".into())), 0.0);
        assert_eq!(cell_float(&Data::String("NaN".into())), 0.0);
        assert_eq!(cell_float(&Data::Empty), 0.0);
        assert_eq!(cell_float(&Data::Float(f64::NAN)), 0.0);
    }

    #[test]
    fn test_cell_count() {
        assert_eq!(cell_count(&Data::Float(4.9)), 4);
        assert_eq!(cell_count(&Data::String("8".into())), 8);
        assert_eq!(cell_count(&Data::String("eight".into())), 0);
        assert_eq!(cell_count(&Data::Empty), 0);
    }

    #[test]
    fn test_get_cell_out_of_range() {
        let row = vec![Data::Int(1)];
        assert_eq!(get_cell(&row, Some(0)), &Data::Int(1));
        assert_eq!(get_cell(&row, Some(5)), &Data::Empty);
        assert_eq!(get_cell(&row, None), &Data::Empty);
    }
}
