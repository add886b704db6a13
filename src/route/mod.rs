mod path;
pub mod search;
pub mod trade;

pub use path::Route;
pub use search::{BestTradeOptions, best_trade_exact_in, best_trade_exact_out};
pub use trade::{Trade, TradeType, sorted_insert, trade_comparator};
