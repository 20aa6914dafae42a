//! Market data client for the detail and historical endpoints

use crate::constants::{
    API_BASE_URL, DEFAULT_CASH_ID, DETAIL_ENDPOINT, HISTORICAL_ENDPOINT, REQUEST_TIMEOUT_SECS,
    USER_AGENT,
};
use crate::error::ClientError;
use crate::time_range::TimeRange;
use crate::types::{DailyQuote, DetailMap, HistoryTable};
use chrono::DateTime;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Immutable client configuration: API base URL and conversion currency id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL endpoints are appended to; keeps its trailing slash
    pub base_url: String,

    /// Currency the API denominates prices in (2781 is USD, 2790 is EUR)
    pub cash_id: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            cash_id: DEFAULT_CASH_ID,
        }
    }
}

impl ClientConfig {
    /// Default base URL with a custom conversion currency
    pub fn with_cash_id(cash_id: u64) -> Self {
        Self {
            cash_id,
            ..Self::default()
        }
    }
}

/// Historical response envelope: `{data: {symbol, quotes: [..]}}`
#[derive(Debug, Deserialize)]
struct HistoricalEnvelope {
    data: Option<HistoricalData>,
}

#[derive(Debug, Deserialize)]
struct HistoricalData {
    symbol: Option<String>,
    #[serde(default)]
    quotes: Vec<QuoteEntry>,
}

/// One `quotes` element; only the inner `quote` object feeds the table
#[derive(Debug, Deserialize)]
struct QuoteEntry {
    quote: QuoteFields,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteFields {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    market_cap: f64,
    timestamp: String,
}

/// Client for the CoinMarketCap v3 data API
///
/// Holds no mutable state after construction; a single instance can be
/// shared freely across tasks. Each call issues exactly one HTTP GET.
pub struct MarketDataClient {
    http: Client,
    config: ClientConfig,
}

impl MarketDataClient {
    /// Creates a client with the default base URL and USD conversion
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with an explicit configuration
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self { http, config })
    }

    /// Conversion currency id this client was configured with
    pub fn cash_id(&self) -> u64 {
        self.config.cash_id
    }

    /// Fetches the detail mapping for a currency id
    ///
    /// The JSON body is passed through unmodified. Transport failures and
    /// non-success statuses degrade to an empty mapping; a body that is not
    /// a JSON object surfaces as [`ClientError::InvalidResponse`].
    pub async fn get_detail(&self, currency_id: u64) -> Result<DetailMap, ClientError> {
        let url = self.detail_url(currency_id);
        tracing::debug!(%url, "Fetching currency detail");

        match self.get_json::<serde_json::Value>(&url).await {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(other) => Err(ClientError::InvalidResponse(format!(
                "Expected a JSON object, got: {}",
                other
            ))),
            Err(e) if e.is_degradable() => {
                tracing::warn!(error = %e, %url, "Detail request failed");
                Ok(DetailMap::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Fetches daily OHLCV history for a currency id over `range`
    ///
    /// Returns `None` when the request fails in transport, the API answers
    /// with a non-success status, or the response carries no quotes. A body
    /// that cannot be decoded against the documented schema surfaces as
    /// [`ClientError::InvalidResponse`]; malformed range input propagates as
    /// [`ClientError::TimeRange`].
    pub async fn get_historical_data(
        &self,
        currency_id: u64,
        range: TimeRange,
    ) -> Result<Option<HistoryTable>, ClientError> {
        let (time_start, time_end) = range.resolve()?;
        let url = self.historical_url(currency_id, time_start, time_end);
        tracing::debug!(%url, "Fetching historical data");

        let envelope = match self.get_json::<HistoricalEnvelope>(&url).await {
            Ok(envelope) => envelope,
            Err(e) if e.is_degradable() => {
                tracing::warn!(error = %e, %url, "Historical request failed");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        reshape(envelope)
    }

    fn detail_url(&self, currency_id: u64) -> String {
        format!(
            "{}{}?id={}",
            self.config.base_url, DETAIL_ENDPOINT, currency_id
        )
    }

    fn historical_url(&self, currency_id: u64, time_start: i64, time_end: i64) -> String {
        format!(
            "{}{}?id={}&convertId={}&timeStart={}&timeEnd={}",
            self.config.base_url,
            HISTORICAL_ENDPOINT,
            currency_id,
            self.config.cash_id,
            time_start,
            time_end
        )
    }

    /// Issues a GET and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ClientError::Network)?;

        if response.status().as_u16() == 429 {
            return Err(ClientError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(ClientError::Api(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let body = response.text().await.map_err(ClientError::Network)?;

        serde_json::from_str(&body).map_err(|e| {
            ClientError::InvalidResponse(format!(
                "Failed to decode response: {}. Body: {}",
                e, body
            ))
        })
    }
}

/// Reshapes the historical envelope into a date-indexed table
///
/// One row per `quotes` element, in input order. The quote timestamp is
/// truncated to its calendar date and the response-level symbol is attached
/// to every row. An envelope without data, symbol or quotes reshapes to
/// `None`.
fn reshape(envelope: HistoricalEnvelope) -> Result<Option<HistoryTable>, ClientError> {
    let data = match envelope.data {
        Some(data) => data,
        None => return Ok(None),
    };
    let symbol = match data.symbol {
        Some(symbol) => symbol,
        None => return Ok(None),
    };

    let mut rows = Vec::with_capacity(data.quotes.len());
    for entry in data.quotes {
        let quote = entry.quote;
        let date = DateTime::parse_from_rfc3339(&quote.timestamp)
            .map_err(|e| {
                ClientError::InvalidResponse(format!(
                    "Bad quote timestamp {:?}: {}",
                    quote.timestamp, e
                ))
            })?
            .date_naive();

        rows.push(DailyQuote {
            date,
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            volume: quote.volume,
            market_cap: quote.market_cap,
            symbol: symbol.clone(),
        });
    }

    Ok(HistoryTable::from_rows(rows))
}
