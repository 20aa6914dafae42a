//! Constants for the market data SDK
//!
//! All defaults for the client and the price stream are centralized here.
//! Callers override the client-facing values through `ClientConfig`.

/// CoinMarketCap v3 data API base URL (trailing slash included)
pub const API_BASE_URL: &str = "https://api.coinmarketcap.com/data-api/v3/cryptocurrency/";

/// Endpoint for currency detail queries
pub const DETAIL_ENDPOINT: &str = "detail";

/// Endpoint for historical OHLCV queries
pub const HISTORICAL_ENDPOINT: &str = "historical";

/// Conversion currency id used when none is configured (2781 is USD, 2790 is EUR)
pub const DEFAULT_CASH_ID: u64 = 2781;

/// Lookback window applied when no start time is given (2 days, in seconds)
pub const DEFAULT_LOOKBACK_SECS: i64 = 2 * 24 * 60 * 60;

/// HTTP request timeout when fetching data (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "market-history-sdk/0.1.0";

/// CoinMarketCap price stream websocket URL
pub const PRICE_STREAM_URL: &str = "wss://stream.coinmarketcap.com/price/latest";

/// Initial backoff delay for stream reconnects (in milliseconds)
pub const STREAM_INITIAL_BACKOFF_MS: u64 = 1000;

/// Maximum backoff delay for stream reconnects (in milliseconds)
pub const STREAM_MAX_BACKOFF_MS: u64 = 30000;
