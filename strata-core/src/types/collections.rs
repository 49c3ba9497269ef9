//! Hash collections used across the engine.
//!
//! FxHash over SipHash: keys are short fingerprint strings and pair keys,
//! none of them attacker-controlled hash-flood vectors.

pub use rustc_hash::{FxHashMap, FxHashSet};
