use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::{header::HeaderMap, Client};

use crate::config::{ProviderConfig, RequestConfig};
use crate::error::{Context, FetchError, Result};
use crate::stock::Symbol;
use crate::timeframe::{TimeWindow, Timeframe};

use super::decode::{decode_chart, decode_quote_summary};
use super::request::{build_headers, Placeholder, TemplateValues, UrlTemplate};
use super::{ChartPayload, FetchResult, QuoteSections, StockSource};

const QUOTE_PLACEHOLDERS: &[Placeholder] = &[Placeholder::Symbol];
const CHART_PLACEHOLDERS: &[Placeholder] = &[
    Placeholder::Symbol,
    Placeholder::Interval,
    Placeholder::Period1,
    Placeholder::Period2,
];

struct Endpoint {
    url: UrlTemplate,
    headers: HeaderMap,
}

impl Endpoint {
    fn new(request: &RequestConfig, allowed: &[Placeholder]) -> Result<Self> {
        Ok(Self {
            url: UrlTemplate::parse(&request.url_template, allowed)?,
            headers: build_headers(&request.headers)?,
        })
    }
}

/// HTTP client for the quote summary and chart endpoints.
pub struct YahooClient {
    client: Client,
    quote: Endpoint,
    chart: Endpoint,
}

impl YahooClient {
    /// Header `${VAR}` placeholders are expanded here, once.
    pub fn new(provider: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(provider.timeout_secs))
            .build()
            .context("Failed to construct stock data HTTP client")?;

        Ok(Self {
            client,
            quote: Endpoint::new(&provider.quote, QUOTE_PLACEHOLDERS)
                .with_context(|| format!("invalid quote endpoint for {}", provider.name))?,
            chart: Endpoint::new(&provider.chart, CHART_PLACEHOLDERS)
                .with_context(|| format!("invalid chart endpoint for {}", provider.name))?,
        })
    }

    async fn quote(&self, symbol: &Symbol) -> FetchResult<QuoteSections> {
        let url = self
            .quote
            .url
            .render(&TemplateValues::for_symbol(symbol.as_str()));
        log::debug!("quote request for {symbol}: {url}");

        let response = self
            .client
            .get(&url)
            .headers(self.quote.headers.clone())
            .send()
            .await
            .map_err(FetchError::NetworkFailure)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::NotFoundOrRateLimited {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(FetchError::NetworkFailure)?;
        decode_quote_summary(&body)
    }

    async fn chart(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        window: TimeWindow,
    ) -> FetchResult<ChartPayload> {
        let url = self.chart.url.render(&TemplateValues {
            symbol: symbol.as_str(),
            interval: timeframe.interval,
            window: Some(window),
        });
        log::debug!("chart request for {symbol} ({timeframe}): {url}");

        let response = self
            .client
            .get(&url)
            .headers(self.chart.headers.clone())
            .send()
            .await
            .map_err(FetchError::NetworkFailure)?;

        // Error statuses still carry a JSON body with `chart.result: null`,
        // which the normalizer reports as missing chart data.
        let status = response.status();
        if !status.is_success() {
            log::debug!("chart request for {symbol} returned status {status}");
        }

        let body = response.text().await.map_err(FetchError::NetworkFailure)?;
        decode_chart(&body)
    }
}

impl StockSource for YahooClient {
    fn fetch_quote<'a>(&'a self, symbol: &'a Symbol) -> BoxFuture<'a, FetchResult<QuoteSections>> {
        self.quote(symbol).boxed()
    }

    fn fetch_chart<'a>(
        &'a self,
        symbol: &'a Symbol,
        timeframe: Timeframe,
        window: TimeWindow,
    ) -> BoxFuture<'a, FetchResult<ChartPayload>> {
        self.chart(symbol, timeframe, window).boxed()
    }
}
