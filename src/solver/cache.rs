use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use crate::expression::OperatorSet;
use crate::solver::solution::SolutionSet;

/// Identifies one solved puzzle; operand order does not matter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operands: Vec<i64>,
    target_bits: u64,
    operators: OperatorSet,
    must_use_all: bool,
}

impl CacheKey {
    pub fn new(operands: &[i64], target: f64, operators: OperatorSet, must_use_all: bool) -> Self {
        let mut operands = operands.to_vec();
        operands.sort_unstable();
        Self {
            operands,
            // -0.0 and 0.0 are the same target
            target_bits: (target + 0.0).to_bits(),
            operators,
            must_use_all,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    solutions: SolutionSet,
    last_used: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    /// Last-use stamp of every entry, oldest first
    recency: BTreeMap<u64, CacheKey>,
    clock: u64,
}

impl CacheState {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// Bounded least-recently-used store of solution sets.
///
/// Entries are never overwritten: the first result stored for a key wins.
/// Lookups and inserts cost `O(log capacity)`.
#[derive(Debug)]
pub struct SolutionCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl SolutionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &CacheKey) -> Option<SolutionSet> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let stamp = state.tick();
        let entry = state.entries.get_mut(key)?;
        let previous = std::mem::replace(&mut entry.last_used, stamp);
        let hit = entry.solutions.clone();
        state.recency.remove(&previous);
        state.recency.insert(stamp, key.clone());
        Some(hit)
    }

    pub fn insert(&self, key: CacheKey, solutions: SolutionSet) {
        if self.capacity == 0 {
            return;
        }
        let mut guard = self.lock();
        let state = &mut *guard;
        if state.entries.contains_key(&key) {
            debug!("Cache entry already present, keeping the first result");
            return;
        }
        let stamp = state.tick();
        state.recency.insert(stamp, key.clone());
        state.entries.insert(
            key,
            CacheEntry {
                solutions,
                last_used: stamp,
            },
        );
        Self::evict_if_needed(state, self.capacity);
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.recency.clear();
    }

    fn evict_if_needed(state: &mut CacheState, capacity: usize) {
        while state.entries.len() > capacity {
            let Some((_, oldest)) = state.recency.pop_first() else {
                break;
            };
            state.entries.remove(&oldest);
            debug!("Evicted cached solutions for {:?}", oldest.operands);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
