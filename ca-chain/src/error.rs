use thiserror::Error;

/// Network-level failure while retrieving an issuer certificate.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status: {status}")]
    Status { status: reqwest::StatusCode },

    #[error("response body exceeds limit of {limit} bytes")]
    BodyTooLarge { limit: usize },
}

/// Failure to parse fetched bytes as a certificate.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed PEM block ({size} bytes): {reason}")]
    Pem { size: usize, reason: String },

    #[error("PEM block is not a certificate: unexpected label '{label}'")]
    PemLabel { label: String },

    #[error("malformed DER certificate ({size} bytes): {reason}")]
    Der { size: usize, reason: String },
}

/// Failure of a whole resolution call.
///
/// Hitting the loop limit is not represented here: the resolver returns the
/// chain accumulated so far and emits a warning instead.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("error while fetching issuer certificate for '{subject}' from {url}: {source}")]
    IssuerFetch {
        subject: String,
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("error while decoding issuer certificate for '{subject}' from {url}: {source}")]
    IssuerDecode {
        subject: String,
        url: String,
        #[source]
        source: DecodeError,
    },
}
