//! Spreadsheet provider boundary.

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use sheetmail_core::Grid;

/// Major dimension of a provider value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MajorDimension {
    /// `values` is a list of rows.
    #[default]
    Rows,
    /// `values` is a list of columns.
    Columns,
}

/// Cells returned for a sheet range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    /// Range the values cover, in A1 notation.
    #[serde(default)]
    pub range: String,
    /// Layout of `values`.
    #[serde(default)]
    pub major_dimension: MajorDimension,
    /// Cell values; the provider omits the key for an empty range.
    #[serde(default)]
    pub values: Grid,
}

impl ValueRange {
    /// Parses a provider JSON payload.
    pub fn from_json(input: &str) -> Result<Self, ProviderError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Returns the values as a row-major grid.
    ///
    /// Column-major ranges are transposed; short columns pad with `""`.
    pub fn into_rows(self) -> Grid {
        match self.major_dimension {
            MajorDimension::Rows => self.values,
            MajorDimension::Columns => {
                let height = self.values.iter().map(Vec::len).max().unwrap_or(0);
                (0..height)
                    .map(|row| {
                        self.values
                            .iter()
                            .map(|column| column.get(row).cloned().unwrap_or_default())
                            .collect()
                    })
                    .collect()
            }
        }
    }
}

/// Answer to a grid fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridResponse {
    /// The requested cells.
    Values(ValueRange),
    /// The user must authorize access first; redirect them to `auth_url`.
    AuthorizationRequired {
        /// Consent page URL.
        auth_url: String,
    },
}

/// Source of data grids, typically a spreadsheet API client.
pub trait GridProvider {
    /// Fetches `range` of sheet `sheet_id`. An empty range means the whole
    /// first sheet.
    fn fetch(&self, sheet_id: &str, range: &str) -> Result<GridResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_payload() {
        let range = ValueRange::from_json(
            r#"{"range":"Sheet1!A1:B2","majorDimension":"ROWS","values":[["id","name"],["1","Ada"]]}"#,
        )
        .unwrap();
        assert_eq!(range.range, "Sheet1!A1:B2");
        assert_eq!(range.into_rows()[1], vec!["1", "Ada"]);
    }

    #[test]
    fn missing_values_mean_empty_grid() {
        let range = ValueRange::from_json(r#"{"range":"Sheet1!A1:Z9"}"#).unwrap();
        assert!(range.into_rows().is_empty());
    }

    #[test]
    fn column_major_is_transposed() {
        let range = ValueRange {
            major_dimension: MajorDimension::Columns,
            values: vec![
                vec!["id".into(), "1".into(), "2".into()],
                vec!["name".into(), "Ada".into()],
            ],
            ..ValueRange::default()
        };
        assert_eq!(
            range.into_rows(),
            vec![
                vec!["id".to_string(), "name".to_string()],
                vec!["1".to_string(), "Ada".to_string()],
                vec!["2".to_string(), String::new()],
            ]
        );
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let err = ValueRange::from_json(r#"{"values": 3}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }
}
