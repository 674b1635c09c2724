use chrono::{Datelike, NaiveDate, Utc};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider rejected the ticker or returned fewer than two monthly
    /// rows, so no percentage change can be computed.
    #[error("no monthly price history for {ticker} in the requested range")]
    DataUnavailable { ticker: String },

    #[error("invalid period `{input}`, expected mm/yyyy")]
    InvalidPeriod { input: String },

    #[error("price history request failed")]
    Provider(#[from] yahoo::YahooError),
}

/// Parses a `mm/yyyy` period string into the first day of that month.
pub fn parse_period(input: &str) -> Result<NaiveDate, FetchError> {
    let invalid = || FetchError::InvalidPeriod {
        input: input.to_string(),
    };

    let (month, year) = input.split_once('/').ok_or_else(invalid)?;
    let month: u32 = month.trim().parse().map_err(|_| invalid())?;
    let year: i32 = year.trim().parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

/// Resolves the period strings to concrete dates, defaulting the end of the
/// range to today when absent.
pub fn resolve_period_range(
    start: &str,
    end: Option<&str>,
) -> Result<(NaiveDate, NaiveDate), FetchError> {
    let start = parse_period(start)?;
    let end = match end {
        Some(raw) => parse_period(raw)?,
        None => Utc::now().date_naive(),
    };
    Ok((start, end))
}

/// Percentage change between consecutive closing prices. The first period has
/// no prior close, so the output is one element shorter than the input.
pub fn percentage_changes(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0] * 100.0)
        .collect()
}

pub struct ReturnFetcher {
    connector: yahoo::YahooConnector,
}

impl ReturnFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let connector = yahoo::YahooConnector::new()?;
        Ok(Self { connector })
    }

    /// Fetches monthly-interval history for the span and returns the
    /// chronological sequence of month-over-month percentage changes of the
    /// adjusted close.
    pub async fn monthly_returns(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<f64>, FetchError> {
        debug!(ticker, %start, %end, "requesting monthly price history");

        let response = self
            .connector
            .get_quote_history_interval(
                ticker,
                to_offset_datetime(start),
                to_offset_datetime(end),
                "1mo",
            )
            .await
            .map_err(|e| {
                warn!(ticker, error = %e, "price history request rejected");
                FetchError::DataUnavailable {
                    ticker: ticker.to_string(),
                }
            })?;

        let mut quotes = response.quotes()?;
        quotes.sort_by_key(|q| q.timestamp);

        let closes: Vec<f64> = quotes.iter().map(|q| q.adjclose).collect();
        let returns = percentage_changes(&closes);
        if returns.is_empty() {
            return Err(FetchError::DataUnavailable {
                ticker: ticker.to_string(),
            });
        }

        debug!(ticker, months = returns.len(), "computed monthly returns");
        Ok(returns)
    }
}

fn to_offset_datetime(date: NaiveDate) -> OffsetDateTime {
    let month = time::Month::try_from(date.month() as u8).expect("month in 1..=12");
    time::Date::from_calendar_date(date.year(), month, date.day() as u8)
        .expect("chrono dates are valid calendar dates")
        .midnight()
        .assume_utc()
}
