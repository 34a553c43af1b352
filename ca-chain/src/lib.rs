//! # ca-chain
//!
//! Certificate chain resolution engine for runner TLS endpoints.
//!
//! Remote Git, artifact and cache servers frequently present incomplete TLS
//! certificate chains (missing intermediates). This crate repairs such
//! chains by walking Authority Information Access links: given an ordered,
//! leaf-first certificate sequence from a handshake, it returns an extended
//! (or unchanged) sequence, or an error.
//!
//! ## Features:
//! - Strategy abstraction ([`Resolver`]) with an orchestrator
//!   ([`ChainResolver`]) that tries strategies in a fixed order
//! - AIA-walking URL strategy ([`UrlResolver`]) with a bounded loop that
//!   survives cyclic or adversarial issuer graphs
//! - DER and PEM issuer endpoint responses, sniffed by leading bytes
//! - Root detection by self-signature verification, not DN equality alone
//! - Injectable [`Fetcher`] and [`CertificateDecoder`] collaborators
//!
//! Chain *validation* (trust anchoring, revocation) is out of scope; this
//! crate only completes chains.

pub mod certificate;
pub mod config;
pub mod error;
pub mod fetch;
pub mod resolver;
pub mod resolver_url;

pub use certificate::{Certificate, CertificateDecoder, X509Decoder};
pub use config::ResolverConfig;
pub use error::{DecodeError, FetchError, ResolveError};
pub use fetch::{Fetcher, HttpFetcher};
pub use resolver::{ChainResolver, Resolver};
pub use resolver_url::UrlResolver;

/// Result type for chain resolution
pub type Result<T> = std::result::Result<T, ResolveError>;
