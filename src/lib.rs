//! # primehash
//!
//! A string-to-string hash table built on open addressing with double hashing.
//!
//! Every table has a prime number of slots. A key's probe sequence is derived
//! from two polynomial string hashes with distinct prime bases: the first picks
//! the starting slot and the second the step, so the sequence covers the whole
//! table. Deletions leave tombstones, and the table is rebuilt at twice or half
//! its base size when the load leaves the configured band.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primehash::HashTable;
//!
//! // Create a new table with 53 slots
//! let mut table = HashTable::new();
//!
//! // Insert values
//! table.insert("name", "John");
//! table.insert("age", "30");
//!
//! // Retrieve values
//! assert_eq!(table.search("name"), Some("John"));
//!
//! // Update values
//! assert_eq!(table.insert("age", "31"), Some("30".to_string()));
//! assert_eq!(table.search("age"), Some("31"));
//!
//! // Remove values
//! table.delete("age");
//! assert_eq!(table.search("age"), None);
//! ```
//!
//! ## Resize Policy
//!
//! ```rust
//! use primehash::{HashTable, TableConfig};
//!
//! let config = TableConfig::new().with_min_base_size(5);
//! let mut table = HashTable::with_config(config).unwrap();
//! assert_eq!(table.capacity(), 5);
//!
//! for i in 0..10 {
//!     table.insert(format!("key-{i}"), i.to_string());
//! }
//!
//! // Capacity is always a prime at least as large as the base size
//! assert!(table.capacity() > 5);
//! assert_eq!(table.search("key-7"), Some("7"));
//! ```

/// Resize policy configuration
mod config;
/// Open addressing table with tombstone deletion and load-driven resizing
mod hash_table;
/// String hashes and the double-hashing probe sequence
pub mod hashing;
/// Primality test and next-prime search used for table sizing
pub mod prime;
/// Utility traits for the hash table
mod utils;

pub use config::{
    ConfigError, DEFAULT_GROW_LOAD_PERCENT, DEFAULT_MIN_BASE_SIZE, DEFAULT_SHRINK_LOAD_PERCENT,
    TableConfig,
};
pub use hash_table::{HashTable, Iter};
pub use utils::TableExtensions;
