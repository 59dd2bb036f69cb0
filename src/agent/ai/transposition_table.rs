// Position cache for the search
//
// Direct-mapped: one slot per index, index = hash & (capacity - 1), and a
// store always overwrites. Keys come from the incremental Zobrist hash kept
// by `Position`, so nothing is hashed here.

/// Depth recorded for values that no longer depend on search depth
/// (every leaf below was a decided game). Satisfies any depth requirement.
pub const RESOLVED_DEPTH: u8 = u8::MAX;

/// Default number of slots
pub const DEFAULT_CAPACITY: usize = 1 << 20;

/// Node type for transposition table entries
///
/// Fail-soft search stores bounds as well as exact values:
/// - Exact: the true value of the position at that depth
/// - LowerBound: a beta cutoff happened, the value is at least `score`
/// - UpperBound: every move failed low, the value is at most `score`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    LowerBound,
    UpperBound,
}

/// Entry in the transposition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranspositionTableEntry {
    /// Full position hash, checked on probe
    pub hash: u64,
    /// Remaining depth the score was searched to
    pub depth: u8,
    /// Score from the point of view of the side to move
    pub score: i32,
    pub node_type: NodeType,
}

impl TranspositionTableEntry {
    /// True when the value holds regardless of search depth
    pub fn is_resolved(&self) -> bool {
        self.depth == RESOLVED_DEPTH
    }
}

/// Fixed-size position cache keyed by Zobrist hash
pub struct TranspositionTable {
    slots: Vec<Option<TranspositionTableEntry>>,
    /// capacity - 1; capacity is a power of two
    mask: usize,
    occupied: usize,
    /// Statistics: number of successful probes
    pub hits: u64,
    /// Statistics: number of failed probes
    pub misses: u64,
}

impl TranspositionTable {
    /// Create a table with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a table with at least `capacity` slots.
    ///
    /// The capacity is rounded up to the next power of two. A capacity of
    /// zero gives a disabled table.
    pub fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            return Self::disabled();
        }
        let capacity = capacity.next_power_of_two();
        Self {
            slots: vec![None; capacity],
            mask: capacity - 1,
            occupied: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// A table that never stores anything; every probe misses.
    pub fn disabled() -> Self {
        Self {
            slots: Vec::new(),
            mask: 0,
            occupied: 0,
            hits: 0,
            misses: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.slots.is_empty()
    }

    #[inline]
    fn slot_index(&self, hash: u64) -> usize {
        hash as usize & self.mask
    }

    /// Probe the table for a position.
    ///
    /// Hits only when the slot holds the same hash and was searched at
    /// least `depth` plies deep. Updates hit/miss statistics.
    pub fn probe(&mut self, hash: u64, depth: u8) -> Option<TranspositionTableEntry> {
        let found = if self.is_enabled() {
            self.slots[self.slot_index(hash)]
                .filter(|entry| entry.hash == hash && entry.depth >= depth)
        } else {
            None
        };

        match found {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        found
    }

    /// Store a value, replacing whatever occupied the slot.
    pub fn store(&mut self, hash: u64, score: i32, depth: u8, node_type: NodeType) {
        if !self.is_enabled() {
            return;
        }
        let idx = self.slot_index(hash);
        let slot = &mut self.slots[idx];
        if slot.is_none() {
            self.occupied += 1;
        }
        *slot = Some(TranspositionTableEntry {
            hash,
            depth,
            score,
            node_type,
        });
    }

    /// Invalidate every entry and reset statistics
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.occupied = 0;
        self.hits = 0;
        self.misses = 0;
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Get hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
