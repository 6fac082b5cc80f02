//! Cell formatting helpers.
//!
//! All functions here are pure: they turn a [`CellValue`] plus a
//! [`SemanticKind`] into text and a trend/link annotation, without any
//! notion of terminal styles.

use chrono::{DateTime, Local};
use reqwest::Url;

use crate::dataset::CellValue;
use crate::schema::SemanticKind;

/// Per-stock chart page; the identifier goes into the `STOCK_ID` query parameter.
pub const STOCK_CHART_URL: &str = "https://goodinfo.tw/tw/ShowBuySaleChart.asp";

/// Market direction of a signed value.
///
/// Taiwan convention: `Up` is drawn red and `Down` green.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn of(v: f64) -> Self {
        if v > 0.0 {
            Trend::Up
        } else if v < 0.0 {
            Trend::Down
        } else {
            Trend::Neutral
        }
    }
}

/// Formats a number with `,` thousands separators.
///
/// Decimals are kept only when the value has them: `1234567` -> `"1,234,567"`,
/// `1234.5` -> `"1,234.5"`.
pub fn format_number(v: f64) -> String {
    let repr = v.abs().to_string();
    let (int_part, frac_part) = match repr.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (repr.as_str(), None),
    };

    let mut out = String::with_capacity(repr.len() + repr.len() / 3 + 1);
    if v < 0.0 {
        out.push('-');
    }
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Formats a percentage with two decimals and a `+` for positive values.
pub fn format_percent(v: f64) -> String {
    // -0.0 prints as "0.00%"
    let v = if v == 0.0 { 0.0 } else { v };
    if v > 0.0 {
        format!("+{:.2}%", v)
    } else {
        format!("{:.2}%", v)
    }
}

/// Chart URL for `id`, with the identifier form-encoded.
pub fn stock_link(id: &str) -> Option<String> {
    match Url::parse_with_params(STOCK_CHART_URL, &[("STOCK_ID", id)]) {
        Ok(url) => Some(url.into()),
        Err(e) => {
            tracing::warn!(id, error = %e, "cannot build chart link");
            None
        }
    }
}

/// Display text plus optional trend and link target of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedCell {
    pub text: String,
    pub trend: Option<Trend>,
    pub link: Option<String>,
}

impl FormattedCell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            trend: None,
            link: None,
        }
    }
}

/// Renders one cell according to its column kind.
pub fn format_cell(value: &CellValue, kind: SemanticKind) -> FormattedCell {
    match kind {
        SemanticKind::Plain => FormattedCell::plain(value.as_text()),
        SemanticKind::Numeric => match value.coerce_number() {
            Some(v) => FormattedCell::plain(format_number(v)),
            None => FormattedCell::plain("-"),
        },
        SemanticKind::Percent => match value.coerce_number() {
            Some(v) => FormattedCell {
                text: format_percent(v),
                trend: Some(Trend::of(v)),
                link: None,
            },
            None => FormattedCell {
                text: "-".to_string(),
                trend: Some(Trend::Neutral),
                link: None,
            },
        },
        SemanticKind::Link => {
            let text = value.as_text();
            let id = text.trim();
            if id.is_empty() {
                FormattedCell::plain("")
            } else {
                FormattedCell {
                    text: id.to_string(),
                    trend: None,
                    link: stock_link(id),
                }
            }
        }
    }
}

/// Local wall-clock time used for load and modification stamps.
pub fn format_timestamp(ts: DateTime<Local>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(-1234.5), "-1,234.5");
        assert_eq!(format_number(0.25), "0.25");
    }

    #[test]
    fn numeric_cell_from_text_and_failure() {
        let cell = format_cell(&CellValue::text("1,234 張"), SemanticKind::Numeric);
        assert_eq!(cell.text, "1,234");
        let cell = format_cell(&CellValue::text("N/A"), SemanticKind::Numeric);
        assert_eq!(cell.text, "-");
        let cell = format_cell(&CellValue::Number(1234567.0), SemanticKind::Numeric);
        assert_eq!(cell.text, "1,234,567");
    }

    #[test]
    fn percent_sign_and_trend() {
        let up = format_cell(&CellValue::text("5.2%"), SemanticKind::Percent);
        assert_eq!(up.text, "+5.20%");
        assert_eq!(up.trend, Some(Trend::Up));

        let down = format_cell(&CellValue::text("-1.1%"), SemanticKind::Percent);
        assert_eq!(down.text, "-1.10%");
        assert_eq!(down.trend, Some(Trend::Down));

        let flat = format_cell(&CellValue::Number(0.0), SemanticKind::Percent);
        assert_eq!(flat.text, "0.00%");
        assert_eq!(flat.trend, Some(Trend::Neutral));

        let neg_zero = format_cell(&CellValue::Number(-0.0), SemanticKind::Percent);
        assert_eq!(neg_zero.text, "0.00%");
    }

    #[test]
    fn percent_failure_is_neutral_dash() {
        let cell = format_cell(&CellValue::text("--"), SemanticKind::Percent);
        assert_eq!(cell.text, "-");
        assert_eq!(cell.trend, Some(Trend::Neutral));
    }

    #[test]
    fn link_cell() {
        let cell = format_cell(&CellValue::Number(2330.0), SemanticKind::Link);
        assert_eq!(cell.text, "2330");
        assert_eq!(
            cell.link.as_deref(),
            Some("https://goodinfo.tw/tw/ShowBuySaleChart.asp?STOCK_ID=2330")
        );

        let cell = format_cell(&CellValue::text(" 0050 "), SemanticKind::Link);
        assert_eq!(cell.text, "0050");

        let empty = format_cell(&CellValue::text("  "), SemanticKind::Link);
        assert_eq!(empty.text, "");
        assert_eq!(empty.link, None);
    }

    #[test]
    fn link_ids_are_encoded() {
        let cell = format_cell(&CellValue::text("2330&calc"), SemanticKind::Link);
        assert_eq!(cell.text, "2330&calc");
        assert_eq!(
            cell.link.as_deref(),
            Some("https://goodinfo.tw/tw/ShowBuySaleChart.asp?STOCK_ID=2330%26calc")
        );
        assert_eq!(
            stock_link("23 30#x").as_deref(),
            Some("https://goodinfo.tw/tw/ShowBuySaleChart.asp?STOCK_ID=23+30%23x")
        );
        let url = stock_link("1101&x=1 #y").unwrap();
        assert!(!url.contains('&'));
        assert!(!url.contains(' '));
        assert!(!url.contains('#'));
    }

    #[test]
    fn plain_cell_uses_shortest_number() {
        let cell = format_cell(&CellValue::Number(5.0), SemanticKind::Plain);
        assert_eq!(cell.text, "5");
        assert_eq!(cell.trend, None);
    }

    #[test]
    fn formatted_number_round_trips_through_coercion() {
        for v in [0.0, 7.0, 1234.5, 98765432.0, -4321.0] {
            let text = format_number(v);
            assert_eq!(CellValue::text(text).coerce_number(), Some(v));
        }
    }
}
