//! A hash map keyed by 64-bit integers, built on its own bucket array.
//!
//! ```rust
//! use long_map::LongMap;
//!
//! let mut map = LongMap::new();
//! assert_eq!(map.put(21, "twenty one"), None);
//! assert_eq!(map.put(21, "21"), Some("twenty one"));
//! assert_eq!(map.get(21), Some(&"21"));
//! assert_eq!(map.remove(21), Some("21"));
//! assert!(map.is_empty());
//! ```

mod arena;
pub mod config;
pub mod hash;
pub mod long_map;

pub use config::{Error, LongMapConfig, DEFAULT_CAPACITY, MAX_CAPACITY};
pub use long_map::LongMap;
