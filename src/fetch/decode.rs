use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::FetchError;

use super::FetchResult;

pub type RawFields = Map<String, Value>;

/// `price` and `assetProfile` objects pulled out of a quote summary response.
/// Either may be empty when upstream omits it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteSections {
    pub price: RawFields,
    pub asset_profile: RawFields,
}

/// Historical candle response as delivered by the chart endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartPayload {
    #[serde(default)]
    pub chart: Option<ChartBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResult {
    #[serde(default, deserialize_with = "lenient_integers")]
    pub timestamp: Vec<Option<i64>>,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteIndicator {
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub close: Vec<Option<f64>>,
}

impl ChartPayload {
    /// First result entry, if the result array is present and non-empty.
    pub fn first_result(&self) -> Option<&ChartResult> {
        self.chart
            .as_ref()
            .and_then(|body| body.result.as_ref())
            .and_then(|results| results.first())
    }
}

impl ChartResult {
    pub fn closes(&self) -> &[Option<f64>] {
        self.indicators
            .quote
            .first()
            .map(|quote| quote.close.as_slice())
            .unwrap_or(&[])
    }
}

pub fn decode_chart(body: &str) -> FetchResult<ChartPayload> {
    Ok(serde_json::from_str(body)?)
}

pub fn decode_quote_summary(body: &str) -> FetchResult<QuoteSections> {
    let root: Value = serde_json::from_str(body)?;
    extract_quote_summary(&root)
}

/// Split a quote summary into its sections. A missing `quoteSummary.result`
/// array is malformed; missing sections inside it are tolerated.
pub fn extract_quote_summary(root: &Value) -> FetchResult<QuoteSections> {
    let results = root
        .get("quoteSummary")
        .and_then(|summary| summary.get("result"))
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::malformed("missing quoteSummary.result array"))?;

    let Some(first) = results.first() else {
        return Ok(QuoteSections::default());
    };

    Ok(QuoteSections {
        price: object_section(first, "price"),
        asset_profile: object_section(first, "assetProfile"),
    })
}

fn object_section(entry: &Value, key: &str) -> RawFields {
    entry
        .get(key)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Read a number from either a bare JSON number or a `{ "raw": n }` wrapper.
pub fn value_to_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(num) => num.as_f64(),
        Value::Object(map) => map.get("raw").and_then(value_to_f64),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

pub fn value_to_text(value: &Value) -> Option<String> {
    let text = value.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn lenient_numbers<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<Value>> = Deserialize::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .iter()
        .map(value_to_f64)
        .collect())
}

fn lenient_integers<'de, D>(deserializer: D) -> Result<Vec<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<Value>> = Deserialize::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .iter()
        .map(|value| value.as_i64())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_quote_summary_sections() {
        let body = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {"shortName": "Apple Inc.", "regularMarketPrice": {"raw": 150.25, "fmt": "150.25"}},
                    "assetProfile": {"sector": "Technology"}
                }],
                "error": null
            }
        }"#;

        let sections = decode_quote_summary(body).unwrap();
        assert_eq!(sections.price["shortName"], "Apple Inc.");
        assert_eq!(sections.asset_profile["sector"], "Technology");
    }

    #[test]
    fn missing_sections_are_tolerated() {
        let root = json!({"quoteSummary": {"result": [{"price": {"shortName": "X"}}]}});
        let sections = extract_quote_summary(&root).unwrap();
        assert!(sections.asset_profile.is_empty());

        let empty = json!({"quoteSummary": {"result": []}});
        assert_eq!(extract_quote_summary(&empty).unwrap(), QuoteSections::default());
    }

    #[test]
    fn missing_result_structure_is_malformed() {
        let root = json!({"finance": {"error": {"code": "Not Found"}}});
        let err = extract_quote_summary(&root).unwrap_err();
        assert_eq!(err.kind(), "malformed-payload");

        let err = decode_quote_summary("not json").unwrap_err();
        assert_eq!(err.kind(), "malformed-payload");
    }

    #[test]
    fn chart_nulls_and_strings_decode_as_absent() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1, 2, 3],
                    "indicators": {"quote": [{"close": [10.5, null, "NaN"]}]}
                }],
                "error": null
            }
        }"#;

        let payload = decode_chart(body).unwrap();
        let result = payload.first_result().unwrap();
        assert_eq!(result.timestamp, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(result.closes(), &[Some(10.5), None, None]);
    }

    #[test]
    fn chart_without_result_has_no_first_entry() {
        let payload = decode_chart(r#"{"chart": {"result": null, "error": {"code": "Not Found"}}}"#)
            .unwrap();
        assert!(payload.first_result().is_none());
    }

    #[test]
    fn numbers_accept_raw_wrappers() {
        assert_eq!(value_to_f64(&json!(3.5)), Some(3.5));
        assert_eq!(value_to_f64(&json!({"raw": 2.0, "fmt": "2.00"})), Some(2.0));
        assert_eq!(value_to_f64(&json!({})), None);
        assert_eq!(value_to_f64(&json!("12")), None);
        assert_eq!(value_to_text(&json!("  ")), None);
        assert_eq!(value_to_text(&json!(" Tech ")), Some("Tech".to_string()));
    }
}
