use super::*;
use crate::{
    cluster_info::{ClusterInfo, DEFAULT_CONTROLLER_NAME, DEFAULT_POD_READINESS_GATE},
    readiness::ReadinessGateDecider,
    store::fake::FakeStore,
};
use maplit::btreemap;

fn labels() -> BTreeMap<String, String> {
    btreemap! {
        "env".to_string() => "test".to_string(),
    }
}

/// Pod <- Service <- HTTPRoute -> Gateway -> GatewayClass.
fn routed_store(controller_name: &str) -> FakeStore {
    FakeStore::default()
        .with(service("test", "svc-1", Some(labels())))
        .with(http_route(
            "test",
            "web",
            vec![parent(None, "gw")],
            vec![backend(None, "svc-1", Some("Service"))],
        ))
        .with(gateway("test", "gw", "mesh"))
        .with(gateway_class("mesh", controller_name))
}

#[tokio::test]
async fn gates_pods_behind_owned_gateways() {
    trace_init();
    let decider = ReadinessGateDecider::new(
        routed_store(DEFAULT_CONTROLLER_NAME),
        ClusterInfo::default(),
    );
    assert!(decider.requires_gate(&pod("test", "pod-1", labels())).await);
}

#[tokio::test]
async fn foreign_controllers_do_not_gate() {
    let decider = ReadinessGateDecider::new(
        routed_store("example.com/other-controller"),
        ClusterInfo::default(),
    );
    assert!(!decider.requires_gate(&pod("test", "pod-1", labels())).await);
}

#[tokio::test]
async fn unselected_pods_are_not_gated() {
    let store = FakeStore::default()
        .with(service(
            "test",
            "svc-1",
            Some(btreemap! { "env".to_string() => "prod".to_string() }),
        ))
        .with(http_route(
            "test",
            "web",
            vec![parent(None, "gw")],
            vec![backend(None, "svc-1", Some("Service"))],
        ))
        .with(gateway("test", "gw", "mesh"))
        .with(gateway_class("mesh", DEFAULT_CONTROLLER_NAME));

    let decider = ReadinessGateDecider::new(store, ClusterInfo::default());
    assert!(!decider.requires_gate(&pod("test", "pod-1", labels())).await);
}

#[tokio::test]
async fn existing_gate_short_circuits() {
    let decider = ReadinessGateDecider::new(
        routed_store(DEFAULT_CONTROLLER_NAME),
        ClusterInfo::default(),
    );
    let gated = with_gate(pod("test", "pod-1", labels()), DEFAULT_POD_READINESS_GATE);
    assert!(!decider.requires_gate(&gated).await);
}

#[tokio::test]
async fn unrelated_gates_do_not_short_circuit() {
    let decider = ReadinessGateDecider::new(
        routed_store(DEFAULT_CONTROLLER_NAME),
        ClusterInfo::default(),
    );
    let gated = with_gate(pod("test", "pod-1", labels()), "example.com/other-gate");
    assert!(decider.requires_gate(&gated).await);
}

#[tokio::test]
async fn grpc_routes_gate_like_http_routes() {
    let store = FakeStore::default()
        .with(service("test", "svc-1", Some(labels())))
        .with(grpc_route(
            "test",
            "grpc",
            vec![parent(None, "gw")],
            vec![backend(None, "svc-1", None)],
        ))
        .with(gateway("test", "gw", "mesh"))
        .with(gateway_class("mesh", DEFAULT_CONTROLLER_NAME));

    let decider = ReadinessGateDecider::new(store, ClusterInfo::default());
    assert!(decider.requires_gate(&pod("test", "pod-1", labels())).await);
}

#[tokio::test]
async fn tls_routes_do_not_gate() {
    let store = FakeStore::default()
        .with(service("test", "svc-1", Some(labels())))
        .with(tls_route(
            "test",
            "tls",
            vec![parent(None, "gw")],
            vec![backend(None, "svc-1", Some("Service"))],
        ))
        .with(gateway("test", "gw", "mesh"))
        .with(gateway_class("mesh", DEFAULT_CONTROLLER_NAME));

    let decider = ReadinessGateDecider::new(store, ClusterInfo::default());
    assert!(!decider.requires_gate(&pod("test", "pod-1", labels())).await);
}

#[tokio::test]
async fn exported_services_gate_their_pods() {
    let store = FakeStore::default()
        .with(service("test", "svc-1", Some(labels())))
        .with(service_export("test", "svc-1"));

    let decider = ReadinessGateDecider::new(store, ClusterInfo::default());
    assert!(decider.requires_gate(&pod("test", "pod-1", labels())).await);
}

#[tokio::test]
async fn empty_selectors_select_nothing() {
    let store = FakeStore::default()
        .with(service("test", "svc-1", Some(BTreeMap::new())))
        .with(service_export("test", "svc-1"));

    let decider = ReadinessGateDecider::new(store, ClusterInfo::default());
    assert!(!decider.requires_gate(&pod("test", "pod-1", labels())).await);
}

#[tokio::test]
async fn dangling_parents_do_not_gate() {
    let store = FakeStore::default()
        .with(service("test", "svc-1", Some(labels())))
        .with(http_route(
            "test",
            "web",
            vec![parent(None, "missing-gw")],
            vec![backend(None, "svc-1", Some("Service"))],
        ));

    let decider = ReadinessGateDecider::new(store, ClusterInfo::default());
    assert!(!decider.requires_gate(&pod("test", "pod-1", labels())).await);
}
