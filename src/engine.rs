use std::collections::{HashMap, VecDeque};

use tracing::trace;

use crate::css::{self, layers_to_css};
use crate::fingerprint::{ParamsFingerprint, fingerprint_params};
use crate::params::ShadowParams;
use crate::synth::{ShadowLayer, synthesize_layers};

/// Default bound for each memo table. Interactive drags sweep through many
/// nearby parameter sets and rarely revisit old ones, so plain FIFO
/// eviction is enough.
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// Fixed-capacity FIFO map. Eviction drops the oldest-inserted entry.
struct BoundedCache<V> {
    map: HashMap<ParamsFingerprint, V>,
    order: VecDeque<ParamsFingerprint>,
    capacity: usize,
}

impl<V> BoundedCache<V> {
    fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn get(&self, key: &ParamsFingerprint) -> Option<&V> {
        self.map.get(key)
    }

    fn insert(&mut self, key: ParamsFingerprint, value: V) {
        if self.map.insert(key, value).is_some() {
            return;
        }
        if self.map.len() > self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            self.map.remove(&oldest);
        }
        self.order.push_back(key);
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// Hit/miss counters for the engine's memo tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// A shadow engine instance owning its own bounded caches.
///
/// Construct one per UI session (or per worker in a concurrent host); there
/// is no hidden global state, so tests and workers stay isolated. Dropping
/// or clearing the caches never changes output, only latency.
pub struct ShadowEngine {
    stacks: BoundedCache<String>,
    layers: BoundedCache<Vec<ShadowLayer>>,
    stats: CacheStats,
}

impl ShadowEngine {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Engine with a custom per-table capacity (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stacks: BoundedCache::new(capacity),
            layers: BoundedCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Structured layer list for a parameter set, memoized.
    #[tracing::instrument(skip_all)]
    pub fn shadow_layers(&mut self, params: &ShadowParams) -> Vec<ShadowLayer> {
        let normalized = params.normalize();
        let key = fingerprint_params(&normalized, params.curves.as_ref());

        if let Some(hit) = self.layers.get(&key) {
            self.stats.hits += 1;
            return hit.clone();
        }

        self.stats.misses += 1;
        trace!(hi = key.hi, lo = key.lo, "layer cache miss");
        let layers = synthesize_layers(&normalized, params.curves.as_ref());
        self.layers.insert(key, layers.clone());
        layers
    }

    /// CSS `box-shadow` value for a parameter set, memoized.
    #[tracing::instrument(skip_all)]
    pub fn shadow_stack(&mut self, params: &ShadowParams) -> String {
        let normalized = params.normalize();
        let key = fingerprint_params(&normalized, params.curves.as_ref());

        if let Some(hit) = self.stacks.get(&key) {
            self.stats.hits += 1;
            return hit.clone();
        }

        self.stats.misses += 1;
        trace!(hi = key.hi, lo = key.lo, "stack cache miss");
        let stack = layers_to_css(&self.shadow_layers(params));
        self.stacks.insert(key, stack.clone());
        stack
    }

    /// All-transparent stack matching `layer_count`; see
    /// [`crate::css::zero_shadow_stack`]. Uncached: it is already trivial.
    pub fn zero_shadow_stack(&self, layer_count: Option<f64>) -> String {
        css::zero_shadow_stack(layer_count)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn cached_entries(&self) -> usize {
        self.stacks.len() + self.layers.len()
    }

    /// Drops all memoized results. Safe at any time.
    pub fn clear(&mut self) {
        self.stacks.clear();
        self.layers.clear();
        self.stats = CacheStats::default();
    }
}

impl Default for ShadowEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Uncached layer synthesis; property tests exercise this path directly.
pub fn build_shadow_layers(params: &ShadowParams) -> Vec<ShadowLayer> {
    synthesize_layers(&params.normalize(), params.curves.as_ref())
}

/// Uncached CSS `box-shadow` value.
pub fn build_shadow_stack(params: &ShadowParams) -> String {
    layers_to_css(&build_shadow_layers(params))
}

/// All-transparent stack in CSS form; see [`crate::css::zero_shadow_stack`].
pub fn build_zero_shadow_stack(layer_count: Option<f64>) -> String {
    css::zero_shadow_stack(layer_count)
}
