use std::convert::Infallible;
use std::io;

use bytes::Bytes;
use freshbox::{CacheConfiguration, Cacheability, DigestAlgorithm};
use freshbox_tower::FreshnessLayer;
use http::header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, EXPIRES, IF_NONE_MATCH, LAST_MODIFIED, VARY};
use http::{Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use pretty_assertions::assert_eq;
use tower::{Layer, ServiceExt, service_fn};

const HELLO_TAG: &str = "\"5D41402ABC4B2A76B9719D911017C592\"";

fn layer() -> FreshnessLayer {
    FreshnessLayer::builder()
        .configuration(
            CacheConfiguration::new()
                .with_cacheability(Cacheability::Public)
                .with_max_age(3600)
                .vary_on(http::header::ACCEPT_ENCODING),
        )
        .build()
}

async fn hello(_req: Request<()>) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(Response::builder()
        .header(CONTENT_TYPE, "text/plain")
        .body(Full::new(Bytes::from_static(b"hello")))
        .unwrap())
}

fn get() -> http::request::Builder {
    Request::builder().method(Method::GET).uri("/greeting")
}

#[tokio::test]
async fn full_response_carries_validators() {
    let service = layer().layer(service_fn(hello));

    let response = service.oneshot(get().body(()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[CACHE_CONTROL], "public, max-age=3600");
    assert_eq!(headers[VARY], "accept-encoding");
    assert_eq!(headers[ETAG], HELLO_TAG);
    assert_eq!(headers[CONTENT_TYPE], "text/plain");
    assert!(headers.contains_key(EXPIRES));
    assert!(headers.contains_key(LAST_MODIFIED));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body, Bytes::from_static(b"hello"));
}

#[tokio::test]
async fn matching_entity_tag_is_not_modified() {
    let service = layer().layer(service_fn(hello));

    let request = get().header(IF_NONE_MATCH, HELLO_TAG).body(()).unwrap();
    let response = service.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(response.headers()[ETAG], HELLO_TAG);
    assert!(response.headers().get(CONTENT_TYPE).is_none());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn unsafe_methods_always_get_the_full_response() {
    let service = layer().layer(service_fn(hello));

    let request = Request::builder()
        .method(Method::POST)
        .header(IF_NONE_MATCH, HELLO_TAG)
        .body(())
        .unwrap();
    let response = service.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[ETAG], HELLO_TAG);
}

#[tokio::test]
async fn digest_choice_reaches_the_entity_tag() {
    let service = FreshnessLayer::builder()
        .configuration(CacheConfiguration::new().with_max_age(10))
        .digest(DigestAlgorithm::Sha256)
        .build()
        .layer(service_fn(hello));

    let response = service.oneshot(get().body(()).unwrap()).await.unwrap();

    assert_eq!(
        response.headers()[ETAG],
        "\"2CF24DBA5FB0A30E26E83B2AC5B9E29E1B161E5C1FA7425E73043362938B9824\""
    );
}

#[tokio::test]
async fn unconfigured_layer_forwards_responses() {
    let service = FreshnessLayer::builder().build().layer(service_fn(hello));

    let request = get().header(IF_NONE_MATCH, HELLO_TAG).body(()).unwrap();
    let response = service.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(ETAG).is_none());
    assert!(response.headers().get(CACHE_CONTROL).is_none());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body, Bytes::from_static(b"hello"));
}

#[tokio::test]
async fn upstream_errors_are_propagated() {
    let service = layer().layer(service_fn(|_req: Request<()>| async {
        Err::<Response<Full<Bytes>>, _>(io::Error::other("upstream down"))
    }));

    let error = service.oneshot(get().body(()).unwrap()).await.unwrap_err();

    assert_eq!(error.to_string(), "upstream down");
}

#[tokio::test]
async fn cloned_services_share_the_endpoint() {
    let service = layer().layer(service_fn(hello));
    let clone = service.clone();

    assert!(std::ptr::eq(service.endpoint(), clone.endpoint()));

    let first = service.oneshot(get().body(()).unwrap()).await.unwrap();
    let second = clone.oneshot(get().body(()).unwrap()).await.unwrap();
    assert_eq!(first.headers()[ETAG], second.headers()[ETAG]);
}
