//! End-to-end resolution: real decoder and real HTTP fetcher against a
//! local server, so no external network is touched.

use async_trait::async_trait;
use ca_chain::{
    CertificateDecoder, ChainResolver, FetchError, Fetcher, HttpFetcher, ResolveError, Resolver,
    ResolverConfig, UrlResolver, X509Decoder,
};
use std::collections::HashMap;
use std::time::Duration;

const ROOT_PEM: &str = include_str!("fixtures/isrg_root_x1.pem");
const LEAF_PEM: &str = include_str!("fixtures/gce_leaf.pem");

/// Serves canned bytes per URL; anything else is a 404-equivalent error.
struct MapFetcher {
    responses: HashMap<String, Vec<u8>>,
}

#[async_trait]
impl Fetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.responses
            .get(url)
            .cloned()
            .ok_or(FetchError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }
}

fn test_config() -> ResolverConfig {
    ResolverConfig::default().with_fetch_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn resolves_real_leaf_through_its_aia_url() {
    // The leaf fixture carries a genuine AIA caIssuers URL; serve a
    // self-signed root from it and let the real decoder do the rest.
    let leaf = X509Decoder.decode(LEAF_PEM.as_bytes()).unwrap();
    let issuer_url = leaf.issuer_urls[0].clone();

    let fetcher = MapFetcher {
        responses: HashMap::from([(issuer_url, ROOT_PEM.as_bytes().to_vec())]),
    };
    let resolver = ChainResolver::from_resolvers(vec![Box::new(
        UrlResolver::new(test_config()).with_fetcher(Box::new(fetcher)),
    )]);

    let resolved = resolver.resolve(vec![leaf]).await.unwrap();

    assert_eq!(resolved.len(), 2);
    assert!(resolved[0].subject.contains("1535398996907686929"));
    assert!(resolved[1].is_root);
    assert!(resolved[1].subject.contains("ISRG Root X1"));
}

#[tokio::test]
async fn resolves_over_http_with_der_body() {
    let mut server = mockito::Server::new_async().await;
    let (_, pem) = x509_parser::pem::parse_x509_pem(ROOT_PEM.as_bytes()).unwrap();
    let _mock = server
        .mock("GET", "/ca.crt")
        .with_status(200)
        .with_header("content-type", "application/pkix-cert")
        .with_body(pem.contents.clone())
        .create_async()
        .await;

    let mut leaf = X509Decoder.decode(LEAF_PEM.as_bytes()).unwrap();
    leaf.issuer_urls = vec![format!("{}/ca.crt", server.url())];

    let resolver = UrlResolver::new(test_config());
    let resolved = resolver.resolve(vec![leaf]).await.unwrap();

    assert_eq!(resolved.len(), 2);
    assert!(resolved[1].is_root);
    assert_eq!(resolved[1].der, pem.contents);
}

#[tokio::test]
async fn resolves_over_http_with_pem_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/ca.pem")
        .with_status(200)
        .with_body(ROOT_PEM)
        .create_async()
        .await;

    let mut leaf = X509Decoder.decode(LEAF_PEM.as_bytes()).unwrap();
    leaf.issuer_urls = vec![format!("{}/ca.pem", server.url())];

    let resolver = UrlResolver::new(test_config());
    let resolved = resolver.resolve(vec![leaf]).await.unwrap();

    assert_eq!(resolved.len(), 2);
    assert!(resolved[1].is_root);
}

#[tokio::test]
async fn http_failure_surfaces_as_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/ca.crt")
        .with_status(500)
        .create_async()
        .await;

    let mut leaf = X509Decoder.decode(LEAF_PEM.as_bytes()).unwrap();
    let url = format!("{}/ca.crt", server.url());
    leaf.issuer_urls = vec![url.clone()];

    let resolver = UrlResolver::new(test_config());
    let err = resolver.resolve(vec![leaf]).await.unwrap_err();

    match err {
        ResolveError::IssuerFetch {
            url: failed_url,
            source: FetchError::Status { status },
            ..
        } => {
            assert_eq!(failed_url, url);
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn garbage_body_surfaces_as_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/ca.crt")
        .with_status(200)
        .with_body("<html>maintenance page</html>")
        .create_async()
        .await;

    let mut leaf = X509Decoder.decode(LEAF_PEM.as_bytes()).unwrap();
    leaf.issuer_urls = vec![format!("{}/ca.crt", server.url())];

    let resolver = UrlResolver::new(test_config());
    let err = resolver.resolve(vec![leaf]).await.unwrap_err();

    assert!(matches!(err, ResolveError::IssuerDecode { .. }));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/ca.crt")
        .with_status(200)
        .with_body(ROOT_PEM)
        .create_async()
        .await;

    let mut leaf = X509Decoder.decode(LEAF_PEM.as_bytes()).unwrap();
    leaf.issuer_urls = vec![format!("{}/ca.crt", server.url())];

    let fetcher = HttpFetcher::new(Duration::from_secs(5)).with_max_body_bytes(64);
    let resolver = UrlResolver::new(test_config()).with_fetcher(Box::new(fetcher));
    let err = resolver.resolve(vec![leaf]).await.unwrap_err();

    match err {
        ResolveError::IssuerFetch {
            source: FetchError::BodyTooLarge { limit },
            ..
        } => assert_eq!(limit, 64),
        other => panic!("unexpected error: {other}"),
    }
}
