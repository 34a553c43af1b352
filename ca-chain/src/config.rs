use std::time::Duration;

/// Maximum number of loop iterations per resolution call.
pub const DEFAULT_LOOP_LIMIT: usize = 15;

/// Bound for a single issuer certificate request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Policy carried by a resolver instance.
///
/// Immutable after construction; resolvers hold their own copy, so multiple
/// instances with different policies can coexist.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Safety valve against cyclic or unbounded issuer graphs.
    pub loop_limit: usize,

    /// Per-request timeout applied to every issuer fetch.
    pub fetch_timeout: Duration,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loop_limit(mut self, loop_limit: usize) -> Self {
        self.loop_limit = loop_limit;
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            loop_limit: DEFAULT_LOOP_LIMIT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}
