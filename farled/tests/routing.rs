//! End-to-end composite routing behavior: two leaf routers merged into one
//! dispatch surface, exercised through the full match/fallback contract.

use farled::routing::{CompositeRouter, MatchitPattern, RouteTable};
use farled::testing::{RecordingRegistry, get, request};
use farled_core::{
    MeterIdPrefix, Method, Route, Routed, Router, RoutingContext, RoutingError,
};
use std::sync::Arc;

fn route(pattern: &str, methods: &[Method]) -> Route {
    Route::builder()
        .path(Arc::new(MatchitPattern::new(pattern).unwrap()))
        .methods(methods.iter().copied())
        .build()
        .unwrap()
}

/// The two-table setup: one router exposing `GET /users/{id}`, one
/// exposing `GET,POST /orders/{id}`.
fn users_and_orders() -> CompositeRouter<&'static str, String> {
    let users = RouteTable::builder()
        .add(route("/users/{id}", &[Method::GET]), "user-service")
        .build();
    let orders = RouteTable::builder()
        .add(
            route("/orders/{id}", &[Method::GET, Method::POST]),
            "order-service",
        )
        .build();

    CompositeRouter::new(
        vec![Box::new(users), Box::new(orders)],
        |routed: Routed<&'static str>| routed.map(|name| format!("handler:{name}")),
    )
}

#[test]
fn matched_request_carries_params_and_mapped_value() {
    let router = users_and_orders();

    let routed = router.find(&get("/users/42")).unwrap();
    assert!(routed.is_present());
    assert_eq!(routed.param("id"), Some("42"));
    assert_eq!(routed.value(), Some(&"handler:user-service".to_string()));

    let routed = router.find(&request(Method::POST, "/orders/7")).unwrap();
    assert_eq!(routed.value(), Some(&"handler:order-service".to_string()));
}

#[test]
fn unmatched_preflight_yields_forbidden() {
    let router = users_and_orders();

    // OPTIONS is not in either route's method set.
    let preflight = RoutingContext::builder(Method::OPTIONS, "/users/42")
        .cors_preflight()
        .build();
    let err = router.find(&preflight).unwrap_err();
    assert!(matches!(err, RoutingError::ForbiddenPreflight));
    assert_eq!(err.status_code(), Some(403));
}

#[test]
fn deferred_failure_replaces_not_found() {
    let router = users_and_orders();

    let miss = RoutingContext::builder(Method::GET, "/unknown")
        .deferred_cause("bad percent-encoding")
        .build();
    match router.find(&miss) {
        Err(err @ RoutingError::Deferred(_)) => {
            assert_eq!(err.status_code(), None);
            assert_eq!(
                err.deferred_cause().unwrap().to_string(),
                "bad percent-encoding"
            );
        }
        other => panic!("expected deferred failure, got {other:?}"),
    }

    // The same path without a deferred cause is a plain empty result.
    assert_eq!(
        router.find(&get("/unknown")).unwrap(),
        Routed::<String>::empty()
    );
}

#[test]
fn deferred_failure_never_masks_a_match() {
    let router = users_and_orders();

    let hit = RoutingContext::builder(Method::GET, "/users/42")
        .deferred_cause("bad percent-encoding")
        .build();
    let routed = router.find(&hit).unwrap();
    assert_eq!(routed.value(), Some(&"handler:user-service".to_string()));
}

#[test]
fn method_mismatch_falls_through_all_delegates() {
    let router = users_and_orders();
    assert!(
        !router
            .find(&request(Method::DELETE, "/orders/7"))
            .unwrap()
            .is_present()
    );
}

#[test]
fn composed_metrics_reflect_both_delegates() {
    let router = users_and_orders();
    let mut registry = RecordingRegistry::new();
    let prefix = MeterIdPrefix::new("farled.router");

    assert!(router.register_metrics(&mut registry, &prefix));
    assert_eq!(registry.len(), 2);

    let entries: Vec<(String, String)> = registry
        .entries()
        .iter()
        .map(|(id, pattern)| (id.to_string(), pattern.clone()))
        .collect();
    assert_eq!(
        entries,
        [
            ("farled.router{index=0}".to_string(), "/users/{id}".to_string()),
            ("farled.router{index=1}".to_string(), "/orders/{id}".to_string()),
        ]
    );
}

#[test]
fn dump_concatenates_in_delegate_order() {
    let router = users_and_orders();
    let mut out = Vec::new();
    router.dump(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "GET /users/{id}\nGET,POST /orders/{id}\n"
    );
}
