use crate::algorithm::matcher::{BorderMatch, matches};
use crate::spatial::bitmap::Bitmap;
use crate::spatial::tiles::TileId;
use std::collections::HashMap;

/// Unordered pair of tile ids used as the cache key
///
/// `(a, b)` and `(b, a)` produce the same key; the lower id always comes first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PairKey {
    low: TileId,
    high: TileId,
}

impl PairKey {
    /// Create a key from two ids in any order
    pub const fn new(a: TileId, b: TileId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Smaller id of the pair
    pub const fn low(&self) -> TileId {
        self.low
    }

    /// Larger id of the pair
    pub const fn high(&self) -> TileId {
        self.high
    }
}

/// Memoization cache for border matches between tile pairs
///
/// Stores the matches of the higher-id tile against the lower-id tile and
/// derives the other direction on lookup, so every unordered pair is compared
/// once per run. Both directions come back in the order [`matches`] produces.
/// Owned by a single assembly run.
#[derive(Default)]
pub struct MatchCache {
    /// Pair to matches computed from the lower id's point of view
    pair_cache: HashMap<PairKey, Vec<BorderMatch>>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl MatchCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pairs computed so far
    pub fn len(&self) -> usize {
        self.pair_cache.len()
    }

    /// Whether no pair has been computed
    pub fn is_empty(&self) -> bool {
        self.pair_cache.is_empty()
    }

    /// Matches placing tile `other` next to tile `reference`
    ///
    /// Runs the matcher only when the unordered pair has not been seen before.
    pub fn matches_for(
        &mut self,
        reference: (TileId, &Bitmap),
        other: (TileId, &Bitmap),
    ) -> Vec<BorderMatch> {
        use std::collections::hash_map::Entry;

        let key = PairKey::new(reference.0, other.0);
        let stored = match self.pair_cache.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                let computed = if reference.0 == key.low {
                    matches(reference.1, other.1)
                } else {
                    matches(other.1, reference.1)
                };
                entry.insert(computed)
            }
        };

        if reference.0 == key.low {
            stored.clone()
        } else {
            // Reversing keeps the members but not the order `matches` would give
            let mut reversed: Vec<BorderMatch> =
                stored.iter().map(|found| found.reversed()).collect();
            reversed.sort_unstable_by_key(|found| found.enumeration_key());
            reversed
        }
    }
}
