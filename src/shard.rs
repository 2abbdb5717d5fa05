// Domain selection (sharding)
//
// A source may list several equivalent domains. Each resolution picks one;
// the resulting URLs are valid from any shard, so there is no stickiness.
// Callers that need a stable shard per asset pin a single-domain source.

use rand::seq::SliceRandom;

/// Strategy for picking one of N equivalent domains
///
/// Implementations are shared across threads by the resolver and must not
/// rely on shared mutable state.
pub trait DomainSelector: Send + Sync {
    /// Pick one domain. `domains` is never empty.
    fn pick<'a>(&self, domains: &'a [String]) -> &'a str;
}

/// Uniform random choice per call, using the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl DomainSelector for RandomSelector {
    fn pick<'a>(&self, domains: &'a [String]) -> &'a str {
        domains
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Always the shard at `index` (wrapped to the list length)
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSelector {
    index: usize,
}

impl FixedSelector {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl DomainSelector for FixedSelector {
    fn pick<'a>(&self, domains: &'a [String]) -> &'a str {
        if domains.is_empty() {
            return "";
        }
        &domains[self.index % domains.len()]
    }
}

/// Select the domain for one resolution
///
/// A single domain is returned as-is without consulting the strategy.
pub fn select_domain<'a>(selector: &dyn DomainSelector, domains: &'a [String]) -> &'a str {
    match domains {
        [only] => only.as_str(),
        _ => selector.pick(domains),
    }
}
