use std::{iter::FusedIterator, mem};

use log::{debug, trace, warn};

use crate::{
    config::{ConfigError, TableConfig},
    hashing::ProbeSequence,
    prime::next_prime,
};

/// A stored key-value pair
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: String,
}

/// State of a single slot of the table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Slot {
    /// Never held an entry; terminates every probe sequence
    #[default]
    Empty,
    /// Holds a live entry
    Occupied(Entry),
    /// Held an entry that was deleted; probing continues past it
    Tombstone,
}

/// Outcome of walking the probe sequence of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The key lives at this index
    Found(usize),
    /// The key is absent and could be placed at this index
    Vacant(usize),
    /// Every slot was visited without a match or a free slot
    Full,
}

/// A string-to-string hash table using open addressing with double hashing.
///
/// The slot count is always the smallest prime not below the base size, so the
/// probe sequence of any key covers the whole table. Deleted entries leave
/// tombstones that keep probe chains intact until the next resize drops them.
///
/// The table grows to twice its base size when an insert finds the load above
/// the configured grow threshold, and shrinks to half its base size when a
/// delete finds it below the shrink threshold, but never below the configured
/// minimum.
///
/// Note: This implementation is not thread-safe. Wrap it in a `Mutex` to share it.
#[derive(Debug, Clone)]
pub struct HashTable {
    /// The slots; length is the prime capacity
    slots: Box<[Slot]>,
    /// Requested capacity before rounding up to a prime
    base_size: usize,
    /// Number of occupied slots; tombstones are not counted
    count: usize,
    /// Resize policy
    config: TableConfig,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for HashTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// Allocates `size` empty slots
fn empty_slots(size: usize) -> Box<[Slot]> {
    std::iter::repeat_with(Slot::default).take(size).collect()
}

/// Places an entry known to be absent into the first empty slot of its probe
/// sequence, handing it back if there is none
fn place(slots: &mut [Slot], entry: Entry) -> Result<(), Entry> {
    for index in ProbeSequence::new(&entry.key, slots.len()) {
        if let Some(slot) = slots.get_mut(index) {
            if matches!(slot, Slot::Empty) {
                *slot = Slot::Occupied(entry);
                return Ok(());
            }
        }
    }
    Err(entry)
}

/// Places every entry into `slots`, which hold no entries yet
///
/// On failure `slots` is emptied again and all entries are returned.
fn fill(slots: &mut [Slot], entries: Vec<Entry>) -> Result<(), Vec<Entry>> {
    let mut rest = entries.into_iter();
    while let Some(entry) = rest.next() {
        if let Err(entry) = place(slots, entry) {
            let mut returned: Vec<Entry> = slots
                .iter_mut()
                .filter_map(|slot| match mem::take(slot) {
                    Slot::Occupied(placed) => Some(placed),
                    Slot::Empty | Slot::Tombstone => None,
                })
                .collect();
            returned.push(entry);
            returned.extend(rest);
            return Err(returned);
        }
    }
    Ok(())
}

impl HashTable {
    /// Creates an empty table with the default policy and base capacity 53
    #[must_use]
    pub fn new() -> Self {
        Self::build(TableConfig::new(), crate::config::DEFAULT_MIN_BASE_SIZE)
    }

    /// Creates an empty table with the given base capacity
    ///
    /// Requests below the default minimum are raised to it.
    #[must_use]
    pub fn with_base_size(base_size: usize) -> Self {
        let config = TableConfig::new();
        Self::build(config, base_size.max(config.min_base_size))
    }

    /// Creates an empty table using `config`, starting at its minimum base size
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is inconsistent.
    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, config.min_base_size))
    }

    /// Allocates the slots for `base_size`
    fn build(config: TableConfig, base_size: usize) -> Self {
        Self { slots: empty_slots(next_prime(base_size)), base_size, count: 0, config }
    }

    /// Walks the probe sequence of `key`, returning the outcome and the number of
    /// slots inspected
    fn scan(&self, key: &str) -> (Probe, usize) {
        let mut first_tombstone = None;
        let mut probes: usize = 0;

        for index in ProbeSequence::new(key, self.slots.len()) {
            let Some(slot) = self.slots.get(index) else { break };
            probes = probes.saturating_add(1);

            match slot {
                Slot::Empty => return (Probe::Vacant(first_tombstone.unwrap_or(index)), probes),
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Slot::Occupied(entry) if entry.key == key => return (Probe::Found(index), probes),
                Slot::Occupied(_) => {}
            }
        }

        (first_tombstone.map_or(Probe::Full, Probe::Vacant), probes)
    }

    /// Returns the index holding `key`, if any
    fn find_index(&self, key: &str) -> Option<usize> {
        match self.scan(key).0 {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Inserts a key-value pair, returning the previous value for the key
    ///
    /// Grows the table first if the load exceeds the grow threshold. The load is
    /// measured before the new entry is counted, so with the default policy the
    /// 39th insert into a fresh 53-slot table is the one that grows it.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        if self.load() > self.config.grow_load_percent {
            self.resize(self.base_size.saturating_mul(2));
        }

        loop {
            match self.scan(&key).0 {
                Probe::Found(index) => {
                    if let Some(Slot::Occupied(entry)) = self.slots.get_mut(index) {
                        return Some(mem::replace(&mut entry.value, value));
                    }
                    return None;
                }
                Probe::Vacant(index) => {
                    if let Some(slot) = self.slots.get_mut(index) {
                        *slot = Slot::Occupied(Entry { key, value });
                        self.count = self.count.saturating_add(1);
                    }
                    return None;
                }
                Probe::Full => {
                    trace!("no free slot for insert among {} slots, growing", self.slots.len());
                    self.resize(self.base_size.saturating_mul(2));
                }
            }
        }
    }

    /// Returns the value stored under `key`
    #[must_use]
    pub fn search(&self, key: &str) -> Option<&str> {
        let index = self.find_index(key)?;
        match self.slots.get(index) {
            Some(Slot::Occupied(entry)) => Some(entry.value.as_str()),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        let index = self.find_index(key)?;
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(entry)) => Some(&mut entry.value),
            _ => None,
        }
    }

    /// Returns true if the table holds `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find_index(key).is_some()
    }

    /// Removes `key`, returning its value if it was present
    ///
    /// Shrinks the table first if the load is below the shrink threshold.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        if self.load() < self.config.shrink_load_percent {
            self.resize(self.base_size / 2);
        }

        let index = self.find_index(key)?;
        let slot = self.slots.get_mut(index)?;
        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.count = self.count.saturating_sub(1);
                Some(entry.value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Rebuilds the table at `new_base`, moving every live entry and dropping tombstones
    ///
    /// Requests below the configured minimum are ignored, as are shrinks whose
    /// prime capacity could not hold the live entries under the grow threshold.
    fn resize(&mut self, new_base: usize) {
        if new_base < self.config.min_base_size {
            trace!("ignoring resize to base {new_base} below minimum {}", self.config.min_base_size);
            return;
        }

        let new_size = next_prime(new_base);
        let new_load = self.count.saturating_mul(100).checked_div(new_size).unwrap_or(usize::MAX);
        if new_size < self.slots.len() && new_load > self.config.grow_load_percent {
            trace!("ignoring shrink to {new_size} slots, {} entries would load it to {new_load}%", self.count);
            return;
        }

        let old_slots = mem::replace(&mut self.slots, Box::default());
        let old_size = old_slots.len();
        let mut entries: Vec<Entry> = old_slots
            .into_vec()
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Occupied(entry) => Some(entry),
                Slot::Empty | Slot::Tombstone => None,
            })
            .collect();

        let mut base = new_base;
        loop {
            let mut slots = empty_slots(next_prime(base));
            match fill(&mut slots, entries) {
                Ok(()) => {
                    self.slots = slots;
                    break;
                }
                Err(returned) => {
                    warn!("{} entries do not fit {} slots, doubling base {base}", returned.len(), slots.len());
                    entries = returned;
                    base = base.saturating_mul(2);
                }
            }
        }
        self.base_size = base;

        debug!("resized table from {old_size} to {} slots holding {} entries", self.slots.len(), self.count);
    }

    /// Returns the number of slots a search for `key` inspects
    #[must_use]
    pub fn probe_length(&self, key: &str) -> usize {
        self.scan(key).1
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots, always a prime
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the requested capacity the slot count was rounded up from
    #[must_use]
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// Returns the load as an integer percentage of occupied slots
    #[must_use]
    pub fn load(&self) -> usize {
        self.count.saturating_mul(100).checked_div(self.slots.len()).unwrap_or(0)
    }

    /// Returns the resize policy of this table
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Removes every entry and tombstone, keeping the capacity
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.count = 0;
    }

    /// Tears the table down, returning how many entries were released
    #[must_use = "the returned count is the only observable effect besides dropping"]
    pub fn destroy(self) -> usize {
        self.slots
            .into_vec()
            .into_iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count()
    }

    /// Returns an iterator over the key-value pairs in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { slots: self.slots.iter() }
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the key-value pairs of a [`HashTable`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Slots not yet visited
    slots: std::slice::Iter<'a, Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied(entry) => Some((entry.key.as_str(), entry.value.as_str())),
            Slot::Empty | Slot::Tombstone => None,
        })
    }
}

impl FusedIterator for Iter<'_> {}
