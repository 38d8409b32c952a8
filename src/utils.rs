//! Utility traits for [`HashTable`]

use std::collections::HashMap;

use crate::HashTable;

/// Extension trait providing owned snapshots of a table's contents
pub trait TableExtensions {
    /// Returns the keys of the table as a Vec
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the table as a Vec
    fn values(&self) -> Vec<String>;

    /// Copies the contents into a `std` hash map
    fn to_hash_map(&self) -> HashMap<String, String>;
}

impl TableExtensions for HashTable {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    fn values(&self) -> Vec<String> {
        self.iter().map(|(_, v)| v.to_owned()).collect()
    }

    fn to_hash_map(&self) -> HashMap<String, String> {
        self.iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_and_values() {
        let mut table = HashTable::new();
        table.insert("a", "1");
        table.insert("b", "2");
        table.insert("c", "3");
        table.delete("b");

        let mut keys = table.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = table.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(values, vec!["1".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_to_hash_map() {
        let table: HashTable = [("name", "John"), ("city", "New York")].into_iter().collect();

        let map = table.to_hash_map();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name").map(String::as_str), Some("John"));
        assert_eq!(map.get("city").map(String::as_str), Some("New York"));
    }
}
