pub mod fee;
pub mod price;
pub mod swap;
pub mod v3_pool;

pub use fee::FeeAmount;
pub use price::Price;
pub use swap::{SwapParams, SwapResult};
pub use v3_pool::{Pool, sort_tokens};
