use std::num::NonZeroUsize;

use lru::LruCache;

use crate::backend::RgbaFrame;

/// Identifies one rasterized page: the upload it came from, the 1-based page and the
/// zoom scale in thousandths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderedPageKey {
    pub load_id: u64,
    pub page: usize,
    pub scale_milli: u32,
}

impl RenderedPageKey {
    pub fn new(load_id: u64, page: usize, scale: f32) -> Self {
        let scale_milli = (scale.max(0.0) * 1000.0).round() as u32;
        Self {
            load_id,
            page,
            scale_milli,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Bounded by both entry count and total pixel bytes.
#[derive(Debug)]
pub struct RenderedPageCache {
    memory_budget_bytes: usize,
    memory_bytes: usize,
    entries: LruCache<RenderedPageKey, RgbaFrame>,
    counters: CacheCounters,
}

impl RenderedPageCache {
    pub fn new(max_entries: usize, memory_budget_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_budget_bytes: memory_budget_bytes.max(1),
            memory_bytes: 0,
            entries: LruCache::new(capacity),
            counters: CacheCounters::default(),
        }
    }

    pub fn get(&mut self, key: &RenderedPageKey) -> Option<RgbaFrame> {
        match self.entries.get(key) {
            Some(frame) => {
                self.counters.hits += 1;
                Some(frame.clone())
            }
            None => {
                self.counters.misses += 1;
                None
            }
        }
    }

    pub fn contains(&self, key: &RenderedPageKey) -> bool {
        self.entries.contains(key)
    }

    /// Frames larger than the whole budget are not kept.
    pub fn insert(&mut self, key: RenderedPageKey, frame: RgbaFrame) -> bool {
        let frame_bytes = frame.byte_len();
        if frame_bytes > self.memory_budget_bytes {
            return false;
        }

        if let Some(prev) = self.entries.pop(&key) {
            self.memory_bytes = self.memory_bytes.saturating_sub(prev.byte_len());
        }
        if let Some((_evicted_key, evicted)) = self.entries.push(key, frame) {
            self.memory_bytes = self.memory_bytes.saturating_sub(evicted.byte_len());
            self.counters.evictions += 1;
        }
        self.memory_bytes += frame_bytes;

        while self.memory_bytes > self.memory_budget_bytes && self.entries.len() > 1 {
            let Some((_key, evicted)) = self.entries.pop_lru() else {
                break;
            };
            self.memory_bytes = self.memory_bytes.saturating_sub(evicted.byte_len());
            self.counters.evictions += 1;
        }
        true
    }

    /// Drops every frame that belongs to an older upload.
    pub fn retain_load(&mut self, load_id: u64) {
        let doomed: Vec<_> = self
            .entries
            .iter()
            .filter_map(|(key, _)| (key.load_id != load_id).then_some(*key))
            .collect();
        for key in doomed {
            if let Some(frame) = self.entries.pop(&key) {
                self.memory_bytes = self.memory_bytes.saturating_sub(frame.byte_len());
                self.counters.evictions += 1;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn memory_bytes(&self) -> usize {
        self.memory_bytes
    }

    pub fn counters(&self) -> CacheCounters {
        self.counters
    }
}
