//! Hash map behind the in-memory bitmap words and tick infos.
//!
//! `std-hash` wins over `ahash`, which wins over `rustc-hash`. With none of
//! them enabled the std map is used.

#[cfg(all(feature = "rustc-hash", not(any(feature = "ahash", feature = "std-hash"))))]
pub type FastMap<K, V> = rustc_hash::FxHashMap<K, V>;

#[cfg(all(feature = "ahash", not(feature = "std-hash")))]
pub type FastMap<K, V> = ahash::AHashMap<K, V>;

#[cfg(any(feature = "std-hash", not(any(feature = "rustc-hash", feature = "ahash"))))]
pub type FastMap<K, V> = std::collections::HashMap<K, V>;
