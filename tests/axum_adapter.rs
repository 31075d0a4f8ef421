//! Mounting a route tree on axum and driving it without sockets.

use std::io;

use axum::body::Body;
use axum::extract::{Path, Request};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use ordner::http::{AxumServer, Handler, Middleware, RouteError};
use ordner::{mount_to, Error, Exports, ModuleTable, Options};

mod common;

type Table = ModuleTable<Handler, Middleware>;

/// Middleware appending `name;` to the `x-trail` request header.
fn tag(name: &'static str) -> Middleware {
    Middleware::new(move |mut req: Request, next: Next| async move {
        let trail = req
            .headers()
            .get("x-trail")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let value = HeaderValue::from_str(&format!("{trail}{name};")).unwrap();
        req.headers_mut().insert("x-trail", value);
        next.run(req).await
    })
}

async fn trail(headers: HeaderMap) -> String {
    headers
        .get("x-trail")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

async fn send(router: &Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

async fn text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn mount_router(files: &[(&str, &str)], table: &Table, options: Options<Handler>) -> Router {
    let dir = common::route_tree(files);
    let mut server = AxumServer::new();
    mount_to(dir.path(), table, &mut server, options, io::sink())
        .await
        .unwrap();
    server.into_router()
}

fn shop_table() -> Table {
    ModuleTable::new()
        .module(
            "index.rs",
            Exports::new().handler("get", Handler::new(|| async { "home" })),
        )
        .module(
            "items/index.rs",
            Exports::new()
                .middleware("useBefore", vec![tag("items")])
                .middleware("useBeforePost", vec![tag("post")])
                .handler("get", Handler::new(trail))
                .handler("post", Handler::new(trail))
                .handler("del", Handler::new(|| async { StatusCode::NO_CONTENT })),
        )
        .module(
            "items/:id.rs",
            Exports::new().handler(
                "get",
                Handler::new(|Path(id): Path<String>| async move { format!("item {id}") }),
            ),
        )
}

const SHOP_FILES: &[(&str, &str)] = &[("index.rs", ""), ("items/index.rs", ""), ("items/:id.rs", "")];

#[tokio::test]
async fn test_routes_are_served() {
    let router = mount_router(SHOP_FILES, &shop_table(), Options::default().logging(false)).await;

    let response = send(&router, Method::GET, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(response).await, "home");

    let response = send(&router, Method::DELETE, "/items").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&router, Method::GET, "/items/42").await;
    assert_eq!(text(response).await, "item 42");

    let response = send(&router, Method::GET, "/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&router, Method::PUT, "/items").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_middleware_runs_in_registration_order() {
    let router = mount_router(SHOP_FILES, &shop_table(), Options::default().logging(false)).await;

    // Middleware is scoped by path, so the POST middleware also sees GET.
    let response = send(&router, Method::POST, "/items").await;
    assert_eq!(text(response).await, "items;post;");

    let response = send(&router, Method::GET, "/items").await;
    assert_eq!(text(response).await, "items;post;");
}

#[tokio::test]
async fn test_middleware_scope_stops_at_segment_boundary() {
    let table = ModuleTable::new()
        .module(
            "items.rs",
            Exports::new()
                .middleware("useBefore", vec![tag("items")])
                .handler("get", Handler::new(trail)),
        )
        .module("itemsets.rs", Exports::new().handler("get", Handler::new(trail)));
    let router = mount_router(
        &[("items.rs", ""), ("itemsets.rs", "")],
        &table,
        Options::default().logging(false),
    )
    .await;

    assert_eq!(text(send(&router, Method::GET, "/items").await).await, "items;");
    assert_eq!(text(send(&router, Method::GET, "/itemsets").await).await, "");
}

#[tokio::test]
async fn test_hook_wraps_axum_handlers() {
    let options = Options::default().logging(false).hook(|handler: Handler| {
        Handler::from_service(handler.into_service().map_response(|mut response: Response| {
            response
                .headers_mut()
                .insert("x-hooked", HeaderValue::from_static("1"));
            response
        }))
    });
    let router = mount_router(SHOP_FILES, &shop_table(), options).await;

    for (method, uri) in [(Method::GET, "/"), (Method::DELETE, "/items"), (Method::GET, "/items/7")] {
        let response = send(&router, method, uri).await;
        assert_eq!(response.headers().get("x-hooked").unwrap(), "1", "{uri}");
    }
}

#[tokio::test]
async fn test_first_handler_wins_on_duplicate_paths() {
    let table = ModuleTable::new()
        .module("a.rs", Exports::new().handler("get", Handler::new(|| async { "file" })))
        .module(
            "a/index.rs",
            Exports::new().handler("get", Handler::new(|| async { "index" })),
        );
    let router = mount_router(
        &[("a.rs", ""), ("a/index.rs", "")],
        &table,
        Options::default().logging(false),
    )
    .await;

    // `a/` is listed before `a.rs`, so its index registers first.
    assert_eq!(text(send(&router, Method::GET, "/a").await).await, "index");
}

#[tokio::test]
async fn test_literal_braces_in_file_names_are_routable() {
    let table = ModuleTable::new()
        .module("a{b}.rs", Exports::new().handler("get", Handler::new(|| async { "braces" })))
        .module("plain.rs", Exports::new().handler("get", Handler::new(|| async { "plain" })));
    let router = mount_router(
        &[("a{b}.rs", ""), ("plain.rs", "")],
        &table,
        Options::default().logging(false),
    )
    .await;

    assert_eq!(text(send(&router, Method::GET, "/plain").await).await, "plain");
}

#[tokio::test]
async fn test_catch_all_before_the_last_segment_is_an_error() {
    let table = ModuleTable::new().module(
        "files/*rest/x.rs",
        Exports::new().handler("get", Handler::new(|| async { "x" })),
    );
    let dir = common::route_tree(&[("files/*rest/x.rs", "")]);
    let mut server = AxumServer::new();

    let err = mount_to(dir.path(), &table, &mut server, Options::default().logging(false), io::sink())
        .await
        .unwrap_err();

    match err {
        Error::Register { method, path, source } => {
            assert_eq!(method, "get");
            assert_eq!(path, "/files/*rest/x");
            assert_eq!(
                source.downcast_ref::<RouteError>(),
                Some(&RouteError::CatchAllNotLast {
                    path: "/files/*rest/x".to_string(),
                    name: "rest".to_string(),
                })
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}
