use crate::certificate::Certificate;
use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::resolver_url::UrlResolver;
use async_trait::async_trait;
use tracing::warn;

/// A chain resolution strategy.
///
/// Takes an ordered, leaf-first certificate sequence and returns an extended
/// (or unchanged) sequence, or an error. Implementations hold only immutable
/// configuration, so one instance may serve concurrent callers resolving
/// independent chains.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, chain: Vec<Certificate>) -> Result<Vec<Certificate>, ResolveError>;
}

/// Uniform resolution capability over one or more strategies.
///
/// Strategies run in a fixed order, each against a fresh copy of the input;
/// the first one to succeed wins. If every strategy fails, the last error is
/// returned. New strategies (e.g. a local trusted-issuer store) plug in
/// without caller changes.
pub struct ChainResolver {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ChainResolver {
    /// Default wiring: the URL-based strategy only.
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            resolvers: vec![Box::new(UrlResolver::new(config))],
        }
    }

    /// Build from an explicit strategy list.
    pub fn from_resolvers(resolvers: Vec<Box<dyn Resolver>>) -> Self {
        Self { resolvers }
    }

    /// Append a further strategy, tried after the existing ones.
    pub fn with_resolver(mut self, resolver: Box<dyn Resolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }
}

#[async_trait]
impl Resolver for ChainResolver {
    async fn resolve(&self, chain: Vec<Certificate>) -> Result<Vec<Certificate>, ResolveError> {
        let mut last_error = None;

        for resolver in &self.resolvers {
            match resolver.resolve(chain.clone()).await {
                Ok(resolved) => return Ok(resolved),
                Err(err) => {
                    warn!(
                        method = "strategy-failed",
                        error = %err,
                        "resolver strategy failed; trying the next one"
                    );
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) => Err(err),
            None => Ok(chain),
        }
    }
}
