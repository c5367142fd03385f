//! Market data access port trait.

use crate::domain::dashboard_config::LookbackPeriod;
use crate::domain::error::FetchError;
use crate::domain::ohlcv::OhlcvBar;

pub trait MarketDataPort {
    /// Daily bars for `symbol` over the trailing `period`, ascending by date
    /// with at most one bar per date.
    fn fetch_bars(&self, symbol: &str, period: LookbackPeriod) -> Result<Vec<OhlcvBar>, FetchError>;
}
