//! Process-lifetime memoization of fetches.
//!
//! Entries are keyed by (function, input key) and never evicted; a stale entry
//! lives until the process exits. Only successful results are stored.

use crate::domain::dashboard_config::LookbackPeriod;
use crate::domain::error::FetchError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::raw_table::TextEncoding;
use crate::ports::csv_source_port::CsvSourcePort;
use crate::ports::market_data_port::MarketDataPort;
use chrono::{Local, NaiveDateTime};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub function: &'static str,
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub inserted_at: NaiveDateTime,
}

pub struct MemoCache<T> {
    entries: RefCell<HashMap<CacheKey, CacheEntry<T>>>,
}

impl<T: Clone> MemoCache<T> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Return the cached value for `key`, or run `fetch` and store its result
    /// if it succeeds.
    pub fn get_or_try_insert<E>(
        &self,
        key: CacheKey,
        fetch: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        if let Some(entry) = self.entries.borrow().get(&key) {
            let age = Local::now().naive_local() - entry.inserted_at;
            debug!(
                function = key.function,
                key = %key.key,
                age_secs = age.num_seconds(),
                "cache hit"
            );
            return Ok(entry.value.clone());
        }
        debug!(function = key.function, key = %key.key, cached = self.len(), "cache miss");

        let value = fetch()?;
        self.entries.borrow_mut().insert(
            key,
            CacheEntry {
                value: value.clone(),
                inserted_at: Local::now().naive_local(),
            },
        );
        Ok(value)
    }
}

impl<T: Clone> Default for MemoCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CachedMarketData<P> {
    inner: P,
    cache: MemoCache<Vec<OhlcvBar>>,
}

impl<P: MarketDataPort> CachedMarketData<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: MemoCache::new(),
        }
    }
}

impl<P: MarketDataPort> MarketDataPort for CachedMarketData<P> {
    fn fetch_bars(
        &self,
        symbol: &str,
        period: LookbackPeriod,
    ) -> Result<Vec<OhlcvBar>, FetchError> {
        let key = CacheKey {
            function: "fetch_bars",
            key: format!("{symbol}|{period}"),
        };
        self.cache
            .get_or_try_insert(key, || self.inner.fetch_bars(symbol, period))
    }
}

pub struct CachedCsvSource<S> {
    inner: S,
    cache: MemoCache<String>,
}

impl<S: CsvSourcePort> CachedCsvSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: MemoCache::new(),
        }
    }
}

impl<S: CsvSourcePort> CsvSourcePort for CachedCsvSource<S> {
    fn fetch_text(&self, location: &str, encoding: TextEncoding) -> Result<String, FetchError> {
        let key = CacheKey {
            function: "fetch_text",
            key: format!("{location}|{encoding:?}"),
        };
        self.cache
            .get_or_try_insert(key, || self.inner.fetch_text(location, encoding))
    }
}
