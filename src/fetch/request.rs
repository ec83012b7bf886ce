use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{AppError, Context, Result};
use crate::timeframe::TimeWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Symbol,
    Interval,
    Period1,
    Period2,
}

impl Placeholder {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "symbol" => Some(Placeholder::Symbol),
            "interval" => Some(Placeholder::Interval),
            "period1" => Some(Placeholder::Period1),
            "period2" => Some(Placeholder::Period2),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// URL template parsed once, so rendering per request cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    segments: Vec<Segment>,
}

/// Values substituted into a [`UrlTemplate`].
#[derive(Debug, Clone, Copy)]
pub struct TemplateValues<'a> {
    pub symbol: &'a str,
    pub interval: &'a str,
    pub window: Option<TimeWindow>,
}

impl<'a> TemplateValues<'a> {
    pub fn for_symbol(symbol: &'a str) -> Self {
        Self {
            symbol,
            interval: "",
            window: None,
        }
    }
}

impl UrlTemplate {
    /// Parse `template`, accepting only the placeholders listed in `allowed`.
    pub fn parse(template: &str, allowed: &[Placeholder]) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '{' {
                literal.push(ch);
                continue;
            }

            let mut key = String::new();
            let mut closed = false;
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == '}' {
                    closed = true;
                    break;
                }
                key.push(next);
            }

            if !closed {
                return Err(AppError::message(format!(
                    "Unterminated placeholder in template: {{{key}"
                )));
            }
            if key.is_empty() {
                return Err(AppError::message(
                    "Encountered empty placeholder `{}` in template",
                ));
            }

            let placeholder = Placeholder::from_key(&key)
                .filter(|p| allowed.contains(p))
                .ok_or_else(|| {
                    AppError::message(format!(
                        "Placeholder `{{{key}}}` is not supported in this template"
                    ))
                })?;

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(placeholder));
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    pub fn render(&self, values: &TemplateValues<'_>) -> String {
        let mut url = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Placeholder(Placeholder::Symbol) => {
                    url.push_str(&encode_component(values.symbol))
                }
                Segment::Placeholder(Placeholder::Interval) => {
                    url.push_str(&encode_component(values.interval))
                }
                Segment::Placeholder(Placeholder::Period1) => {
                    if let Some(window) = values.window {
                        url.push_str(&window.period1.to_string());
                    }
                }
                Segment::Placeholder(Placeholder::Period2) => {
                    if let Some(window) = values.window {
                        url.push_str(&window.period2.to_string());
                    }
                }
            }
        }
        url
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

pub fn expand_env_vars(value: &str) -> Result<String> {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == '}' {
                    closed = true;
                    break;
                }
                name.push(next);
            }

            if name.is_empty() {
                return Err(AppError::message(
                    "Encountered empty environment placeholder in header",
                ));
            }

            if !closed {
                return Err(AppError::message(
                    "Unterminated environment placeholder in header",
                ));
            }

            let value = std::env::var(&name).with_context(|| {
                format!(
                    "Environment variable {} required by request header is not set",
                    name
                )
            })?;
            result.push_str(&value);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

pub fn build_headers(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .with_context(|| format!("Invalid header name: {}", key))?;
        let expanded = expand_env_vars(value)?;
        let header_value = HeaderValue::from_str(&expanded)
            .with_context(|| format!("Invalid header value for {}", key))?;
        map.insert(name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &[Placeholder] = &[
        Placeholder::Symbol,
        Placeholder::Interval,
        Placeholder::Period1,
        Placeholder::Period2,
    ];

    #[test]
    fn renders_chart_template() {
        let template = UrlTemplate::parse(
            "https://host/chart/{symbol}?interval={interval}&period1={period1}&period2={period2}",
            CHART,
        )
        .unwrap();

        let url = template.render(&TemplateValues {
            symbol: "AAPL",
            interval: "1d",
            window: Some(TimeWindow {
                period1: 100,
                period2: 200,
            }),
        });
        assert_eq!(
            url,
            "https://host/chart/AAPL?interval=1d&period1=100&period2=200"
        );
    }

    #[test]
    fn encodes_symbols_with_reserved_characters() {
        let template = UrlTemplate::parse("https://host/q/{symbol}", &[Placeholder::Symbol]).unwrap();
        let url = template.render(&TemplateValues::for_symbol("^GSPC"));
        assert_eq!(url, "https://host/q/%5EGSPC");

        let url = template.render(&TemplateValues::for_symbol("BRK-B"));
        assert_eq!(url, "https://host/q/BRK-B");
    }

    #[test]
    fn rejects_placeholders_outside_the_allowed_set() {
        let err = UrlTemplate::parse("https://host/{symbol}?i={interval}", &[Placeholder::Symbol])
            .unwrap_err();
        assert!(err.to_string().contains("{interval}"), "unexpected: {err}");

        let err = UrlTemplate::parse("https://host/{ticker}", CHART).unwrap_err();
        assert!(err.to_string().contains("{ticker}"), "unexpected: {err}");
    }

    #[test]
    fn rejects_broken_placeholders() {
        assert!(UrlTemplate::parse("https://host/{symbol", CHART).is_err());
        assert!(UrlTemplate::parse("https://host/{}", CHART).is_err());
    }

    #[test]
    fn expands_environment_placeholders() {
        std::env::set_var("STOCK_EXPLORER_TEST_TOKEN", "abc123");
        assert_eq!(
            expand_env_vars("Bearer ${STOCK_EXPLORER_TEST_TOKEN}").unwrap(),
            "Bearer abc123"
        );
        assert!(expand_env_vars("${STOCK_EXPLORER_TEST_UNSET_VAR}").is_err());
        assert!(expand_env_vars("${}").is_err());
        assert_eq!(expand_env_vars("$plain").unwrap(), "$plain");
    }

    #[test]
    fn builds_header_map() {
        let headers = HashMap::from([("Accept".to_string(), "application/json".to_string())]);
        let map = build_headers(&headers).unwrap();
        assert_eq!(map.get("accept").unwrap(), "application/json");

        let bad = HashMap::from([("bad header".to_string(), "x".to_string())]);
        assert!(build_headers(&bad).is_err());
    }
}
