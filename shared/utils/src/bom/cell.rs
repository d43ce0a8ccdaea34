//! Raw cell values as they come out of format extractors.

use std::fmt;

/// A single untyped cell.
///
/// Spreadsheets and documents can hand back numbers, booleans, blanks and
/// occasionally structured values; every shape has an explicit variant so
/// cleaning is a total function.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Sequence(Vec<RawCell>),
    Mapping(Vec<(String, RawCell)>),
}

impl RawCell {
    /// Render the cell as a trimmed string.
    ///
    /// Sequences become `", "`-joined element strings and mappings become
    /// `", "`-joined `key:value` pairs. Null and NaN become `""`.
    pub fn clean(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Float(value) if value.is_nan() => String::new(),
            Self::Sequence(items) => items
                .iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            Self::Mapping(pairs) => pairs
                .iter()
                .map(|(key, value)| format!("{}:{}", key, value))
                .collect::<Vec<_>>()
                .join(", "),
            scalar => scalar.to_string().trim().to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null) || matches!(self, Self::Float(v) if v.is_nan())
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Int(value) => write!(f, "{}", value),
            Self::Float(value) => {
                if value.is_nan() {
                    Ok(())
                } else if value.fract() == 0.0 && value.abs() < 1e15 {
                    // Spreadsheet integers arrive as floats; "1234" not "1234.0".
                    write!(f, "{}", *value as i64)
                } else {
                    write!(f, "{}", value)
                }
            }
            Self::Bool(value) => write!(f, "{}", value),
            Self::Sequence(_) | Self::Mapping(_) => f.write_str(&self.clean()),
        }
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RawCell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for RawCell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<RawCell>> From<Option<T>> for RawCell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

impl From<&calamine::DataType> for RawCell {
    fn from(cell: &calamine::DataType) -> Self {
        use calamine::DataType;

        match cell {
            DataType::Empty | DataType::Error(_) => Self::Null,
            DataType::String(text) => Self::Text(text.clone()),
            DataType::Int(value) => Self::Int(*value),
            DataType::Float(value) => Self::Float(*value),
            DataType::Bool(value) => Self::Bool(*value),
            other => Self::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_comma_joined() {
        let cell = RawCell::Sequence(vec!["A".into(), "B".into()]);
        assert_eq!(cell.clean(), "A, B");
    }

    #[test]
    fn test_mapping_renders_key_value_pairs() {
        let cell = RawCell::Mapping(vec![
            ("pin".to_string(), RawCell::Int(1)),
            ("net".to_string(), "GND".into()),
        ]);
        assert_eq!(cell.clean(), "pin:1, net:GND");
    }

    #[test]
    fn test_null_and_nan_are_empty() {
        assert_eq!(RawCell::Null.clean(), "");
        assert_eq!(RawCell::Float(f64::NAN).clean(), "");
        assert!(RawCell::Float(f64::NAN).is_null());
        assert_eq!(RawCell::from(None::<&str>).clean(), "");
    }

    #[test]
    fn test_scalars_are_trimmed_strings() {
        assert_eq!(RawCell::from("  LM317T \t").clean(), "LM317T");
        assert_eq!(RawCell::Int(42).clean(), "42");
        assert_eq!(RawCell::Float(1234.0).clean(), "1234");
        assert_eq!(RawCell::Float(2.5).clean(), "2.5");
        assert_eq!(RawCell::Bool(true).clean(), "true");
    }

    #[test]
    fn test_nested_sequences_flatten() {
        let cell = RawCell::Sequence(vec![
            RawCell::Sequence(vec!["R1".into(), "R2".into()]),
            "R3".into(),
        ]);
        assert_eq!(cell.clean(), "R1, R2, R3");
    }

    #[test]
    fn test_calamine_cells() {
        use calamine::DataType;

        assert_eq!(RawCell::from(&DataType::Empty), RawCell::Null);
        assert_eq!(RawCell::from(&DataType::Float(3.0)).clean(), "3");
        assert_eq!(RawCell::from(&DataType::String(" X1 ".into())).clean(), "X1");
    }
}
