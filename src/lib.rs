//! # Market History SDK
//!
//! Downloads cryptocurrency price and market-detail data from the
//! CoinMarketCap v3 data API, reshaping historical JSON responses into a
//! date-indexed table of daily OHLCV quotes.
//!
//! ## Usage
//!
//! ```no_run
//! use market_history_sdk::{MarketDataClient, TimeRange};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MarketDataClient::new()?;
//!
//! // Two days of Bitcoin history (id = 1), denominated in USD
//! if let Some(table) = client.get_historical_data(1, TimeRange::last_two_days()).await? {
//!     for quote in &table {
//!         println!("{} {}: close {:.2}", quote.symbol, quote.date, quote.close);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure behavior
//!
//! Failed requests degrade rather than fail: [`MarketDataClient::get_detail`]
//! returns an empty mapping and [`MarketDataClient::get_historical_data`]
//! returns `None` when the API cannot be reached or answers with a
//! non-success status. A response that decodes to something other than the
//! documented schema surfaces as [`ClientError::InvalidResponse`], and a
//! date string that cannot be parsed is a caller error
//! ([`TimeRangeError::InvalidDate`]).
//!
//! ## Price stream
//!
//! [`PriceStream`] is a demonstration listener for the price websocket,
//! independent of the HTTP client. It forwards raw frames and handles its
//! own reconnects.

pub mod client;
pub mod constants;
pub mod error;
pub mod stream;
pub mod symbols;
pub mod time_range;
pub mod types;

// Re-export commonly used types
pub use client::{ClientConfig, MarketDataClient};
pub use error::{ClientError, TimeRangeError};
pub use stream::PriceStream;
pub use symbols::{SymbolTable, SymbolTableError};
pub use time_range::TimeRange;
pub use types::{DailyQuote, DetailMap, HistoryTable};
