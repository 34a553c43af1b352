use crate::certificate::{Certificate, CertificateDecoder, X509Decoder};
use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::resolver::Resolver;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Chain resolution strategy that walks Authority Information Access links:
/// fetch the issuer of the chain's last certificate, append it, repeat until
/// a root is reached, no issuer URL remains, or the loop limit fires.
///
/// Only the first AIA URL of a certificate is attempted; alternates are not
/// tried as fallbacks. A fetch or decode failure aborts the whole call.
pub struct UrlResolver {
    config: ResolverConfig,
    fetcher: Box<dyn Fetcher>,
    decoder: Box<dyn CertificateDecoder>,
}

impl UrlResolver {
    /// Wire the default HTTP fetcher and X.509 decoder.
    pub fn new(config: ResolverConfig) -> Self {
        let fetcher = HttpFetcher::new(config.fetch_timeout);
        Self {
            config,
            fetcher: Box::new(fetcher),
            decoder: Box::new(X509Decoder),
        }
    }

    /// Swap the fetcher, e.g. for a deterministic fake in tests.
    pub fn with_fetcher(mut self, fetcher: Box<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Swap the decoder, e.g. for a deterministic fake in tests.
    pub fn with_decoder(mut self, decoder: Box<dyn CertificateDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    async fn fetch_issuer(
        &self,
        subject: &str,
        serial: &str,
        url: &str,
    ) -> Result<Certificate, ResolveError> {
        debug!(
            subject,
            serial,
            url,
            method = "fetch-issuer",
            "fetching issuer certificate"
        );

        let data = self.fetcher.fetch(url).await.map_err(|source| {
            warn!(
                subject,
                serial,
                url,
                method = "fetch-issuer",
                error = %source,
                "remote certificate fetching error"
            );
            ResolveError::IssuerFetch {
                subject: subject.to_string(),
                url: url.to_string(),
                source,
            }
        })?;

        let issuer = self.decoder.decode(&data).map_err(|source| {
            warn!(
                subject,
                serial,
                url,
                method = "decode",
                error = %source,
                "certificate decoding error"
            );
            ResolveError::IssuerDecode {
                subject: subject.to_string(),
                url: url.to_string(),
                source,
            }
        })?;

        debug!(
            subject = %issuer.subject,
            serial = %issuer.serial,
            method = "append",
            "appending issuer certificate to the chain"
        );

        Ok(issuer)
    }
}

#[async_trait]
impl Resolver for UrlResolver {
    async fn resolve(&self, mut chain: Vec<Certificate>) -> Result<Vec<Certificate>, ResolveError> {
        if chain.is_empty() {
            return Ok(Vec::new());
        }

        let mut iteration = 0;
        loop {
            iteration += 1;
            if iteration >= self.config.loop_limit {
                if let Some(tail) = chain.last() {
                    warn!(
                        subject = %tail.subject,
                        serial = %tail.serial,
                        limit = self.config.loop_limit,
                        method = "loop-limit-exceeded",
                        "issuer fetch loop limit exceeded; exiting the loop"
                    );
                }
                break;
            }

            let (subject, serial, url) = match chain.last() {
                Some(certificate) => match certificate.issuer_urls.first() {
                    Some(url) => (
                        certificate.subject.clone(),
                        certificate.serial.clone(),
                        url.clone(),
                    ),
                    None => {
                        debug!(
                            subject = %certificate.subject,
                            serial = %certificate.serial,
                            method = "no-issuer-url",
                            "certificate does not provide an issuer URL; exiting the loop"
                        );
                        break;
                    }
                },
                None => break,
            };

            let issuer = self.fetch_issuer(&subject, &serial, &url).await?;
            let reached_root = issuer.is_root;
            if reached_root {
                debug!(
                    subject = %issuer.subject,
                    serial = %issuer.serial,
                    method = "root-reached",
                    "fetched issuer certificate is a root certificate; exiting the loop"
                );
            }
            chain.push(issuer);
            if reached_root {
                break;
            }
        }

        Ok(chain)
    }
}
