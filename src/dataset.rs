//! In-memory dataset loaded from one upstream CSV file.
//!
//! A dataset is rectangular: every row carries one [`CellValue`] per column,
//! in header order. Rows are never mutated after loading; a reload builds a
//! new dataset.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

/// A single cell, either numeric or textual.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Types a raw CSV field: complete numeric literals become `Number`,
    /// everything else (including the empty string) stays `Text`.
    pub fn parse(field: &str) -> Self {
        if is_numeric_literal(field) {
            if let Ok(v) = field.trim().parse::<f64>() {
                if v.is_finite() {
                    return CellValue::Number(v);
                }
            }
        }
        CellValue::Text(field.to_string())
    }

    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Cell rendered as plain text (`5`, not `5.0`).
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Number(v) => Cow::Owned(v.to_string()),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Number(_) => false,
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Numeric coercion used for sorting and number formatting.
    ///
    /// Numbers pass through. Text is stripped of every character except ASCII
    /// digits, `.` and `-`, and the longest valid decimal prefix is parsed, so
    /// `"1,234 張"` becomes `1234.0` and `"5.2%"` becomes `5.2`.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            CellValue::Text(s) => {
                let stripped: String = s
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect();
                parse_float_prefix(&stripped)
            }
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Text(String::new())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Parses the longest prefix of `s` that forms `-?digits[.digits]`.
/// Returns `None` when the prefix holds no digit at all.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let mut digits = 0;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if digits == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `-?(digits[.digits] | .digits)([eE][+-]?digits)?`, surrounding whitespace allowed.
fn is_numeric_literal(field: &str) -> bool {
    let s = field.trim();
    let body = s.strip_prefix('-').unwrap_or(s);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };

    let mut digits = 0;
    let mut dots = 0;
    for c in mantissa.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    if digits == 0 || dots > 1 {
        return false;
    }
    // "0050" is a stock code, not fifty
    let mut lead = mantissa.chars();
    if lead.next() == Some('0') && lead.next().is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && exp.chars().all(|c| c.is_ascii_digit())
        }
    }
}

/// Errors produced while turning CSV text into a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// The CSV reader rejected the input.
    Csv { line: Option<u64>, message: String },
    /// A record has more fields than the header.
    Width {
        line: u64,
        expected: usize,
        found: usize,
    },
    /// Two header fields share a name.
    DuplicateColumn(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Csv {
                line: Some(line),
                message,
            } => write!(f, "malformed CSV at line {}: {}", line, message),
            DatasetError::Csv { line: None, message } => write!(f, "malformed CSV: {}", message),
            DatasetError::Width {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {} has {} fields, header declares {}",
                line, found, expected
            ),
            DatasetError::DuplicateColumn(name) => write!(f, "duplicate column '{}'", name),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        DatasetError::Csv {
            line: err.position().map(|p| p.line()),
            message: err.to_string(),
        }
    }
}

/// One dataset row; cells are aligned with [`Dataset::columns`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn get(&self, column: usize) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }
}

/// Rectangular table of cells with ordered, named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Builds a dataset from already-typed records.
    ///
    /// Short records are padded with empty text; long records are rejected.
    pub fn from_records(
        columns: Vec<String>,
        records: Vec<Vec<CellValue>>,
    ) -> Result<Self, DatasetError> {
        let mut seen = BTreeSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(DatasetError::DuplicateColumn(name.clone()));
            }
        }

        let width = columns.len();
        let mut rows = Vec::with_capacity(records.len());
        for (i, mut cells) in records.into_iter().enumerate() {
            if cells.len() > width {
                return Err(DatasetError::Width {
                    // +2: 1-based, header occupies line 1
                    line: i as u64 + 2,
                    expected: width,
                    found: cells.len(),
                });
            }
            cells.resize(width, CellValue::default());
            rows.push(Row { cells });
        }

        Ok(Self { columns, rows })
    }

    /// Parses UTF-8 CSV text with a header row.
    ///
    /// A leading byte-order mark is ignored, blank lines are skipped, and
    /// an input without a header yields an empty dataset.
    pub fn from_csv(text: &str) -> Result<Self, DatasetError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.len() == 1 && record.get(0).is_some_and(|f| f.trim().is_empty()) {
                continue;
            }
            if record.len() > columns.len() {
                return Err(DatasetError::Width {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    expected: columns.len(),
                    found: record.len(),
                });
            }
            records.push(record.iter().map(CellValue::parse).collect());
        }

        Self::from_records(columns, records)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Distinct non-empty values of a column, sorted.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        let set: BTreeSet<String> = self
            .rows
            .iter()
            .filter_map(|r| r.get(idx))
            .filter(|c| !c.is_empty())
            .map(|c| c.as_text().into_owned())
            .collect();
        set.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_types_numbers_and_text() {
        assert_eq!(CellValue::parse("2330"), CellValue::Number(2330.0));
        assert_eq!(CellValue::parse("-1.5"), CellValue::Number(-1.5));
        assert_eq!(CellValue::parse(".5"), CellValue::Number(0.5));
        assert_eq!(CellValue::parse("1e3"), CellValue::Number(1000.0));
        assert_eq!(CellValue::parse("5.2%"), CellValue::text("5.2%"));
        assert_eq!(CellValue::parse(""), CellValue::text(""));
        assert_eq!(CellValue::parse("inf"), CellValue::text("inf"));
        assert_eq!(CellValue::parse("+5"), CellValue::text("+5"));
        assert_eq!(CellValue::parse("1.2.3"), CellValue::text("1.2.3"));
    }

    #[test]
    fn parse_keeps_leading_zero_codes_as_text() {
        assert_eq!(CellValue::parse("0050"), CellValue::text("0050"));
        assert_eq!(CellValue::parse("0"), CellValue::Number(0.0));
        assert_eq!(CellValue::parse("0.75"), CellValue::Number(0.75));
        assert_eq!(CellValue::text("0050").coerce_number(), Some(50.0));
    }

    #[test]
    fn coerce_strips_units_and_separators() {
        assert_eq!(CellValue::text("1,234 張").coerce_number(), Some(1234.0));
        assert_eq!(CellValue::text("5.2%").coerce_number(), Some(5.2));
        assert_eq!(CellValue::text("-1.1%").coerce_number(), Some(-1.1));
        assert_eq!(CellValue::text("abc").coerce_number(), None);
        assert_eq!(CellValue::text("-").coerce_number(), None);
        assert_eq!(CellValue::text("").coerce_number(), None);
        assert_eq!(CellValue::Number(7.0).coerce_number(), Some(7.0));
    }

    #[test]
    fn coerce_takes_longest_prefix() {
        assert_eq!(CellValue::text("1.2.3").coerce_number(), Some(1.2));
        assert_eq!(CellValue::text("12/30").coerce_number(), Some(1230.0));
        assert_eq!(CellValue::text("5-3").coerce_number(), Some(5.0));
        assert_eq!(CellValue::text("--5").coerce_number(), None);
    }

    #[test]
    fn display_uses_shortest_form() {
        assert_eq!(CellValue::Number(5.0).to_string(), "5");
        assert_eq!(CellValue::Number(5.25).to_string(), "5.25");
        assert_eq!(CellValue::text("台積電").to_string(), "台積電");
    }

    #[test]
    fn from_csv_reads_header_and_rows() {
        let ds = Dataset::from_csv("股票代碼,公司名稱,漲幅\n2330,台積電,5.2%\n2317,鴻海,-1.1%\n")
            .unwrap();
        assert_eq!(ds.columns(), &["股票代碼", "公司名稱", "漲幅"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[0].get(0), Some(&CellValue::Number(2330.0)));
        assert_eq!(ds.rows()[1].get(2), Some(&CellValue::text("-1.1%")));
    }

    #[test]
    fn from_csv_strips_bom_and_blank_lines() {
        let ds = Dataset::from_csv("\u{feff}code,name\n\n1101,台泥\n\n").unwrap();
        assert_eq!(ds.columns()[0], "code");
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn from_csv_header_only_is_empty() {
        let ds = Dataset::from_csv("股票代碼,公司名稱\n").unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.columns().len(), 2);

        let ds = Dataset::from_csv("").unwrap();
        assert!(ds.is_empty());
        assert!(ds.columns().is_empty());
    }

    #[test]
    fn from_csv_pads_short_rows() {
        let ds = Dataset::from_csv("a,b,c\n1,2\n").unwrap();
        assert_eq!(ds.rows()[0].get(2), Some(&CellValue::text("")));
    }

    #[test]
    fn from_csv_rejects_wide_rows() {
        let err = Dataset::from_csv("a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Width {
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn from_csv_rejects_duplicate_columns() {
        let err = Dataset::from_csv("a,a\n1,2\n").unwrap_err();
        assert_eq!(err, DatasetError::DuplicateColumn("a".to_string()));
    }

    #[test]
    fn from_csv_handles_quoted_fields() {
        let ds = Dataset::from_csv("name,strategies\nX,\"外資買超, 強勢股\"\n").unwrap();
        assert_eq!(ds.rows()[0].get(1), Some(&CellValue::text("外資買超, 強勢股")));
    }

    #[test]
    fn distinct_values_sorted_without_empty() {
        let ds = Dataset::from_csv("g,v\n半導體,1\n航運,2\n,3\n半導體,4\n").unwrap();
        assert_eq!(ds.distinct_values("g"), vec!["半導體", "航運"]);
        assert!(ds.distinct_values("missing").is_empty());
    }
}
