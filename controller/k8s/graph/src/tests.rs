//! Shared fixtures and end-to-end handler scenarios.

use crate::{handlers::RequestSink, store::ResourceId};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use trellis_controller_k8s_api::{
    self as k8s,
    gateway::{
        self, BackendRef, CommonRouteSpec, GRPCRoute, GRPCRouteRule, GRPCRouteSpec, Gateway,
        GatewayClass, GatewayClassSpec, GatewaySpec, HTTPRoute, HTTPRouteRule, HTTPRouteSpec,
        Listener, ParentReference, RouteParentStatus, TLSRoute, TLSRouteRule, TLSRouteSpec,
    },
    multicluster::{ServiceExport, ServiceExportSpec, ServiceImport, ServiceImportSpec},
    policy::{
        AccessLogPolicy, AccessLogPolicySpec, AuthPolicy, AuthPolicySpec, NamespacedTargetRef,
        TargetGroupPolicy, TargetGroupPolicySpec,
    },
    ObjectMeta,
};

mod readiness;

pub(crate) fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

pub(crate) fn sink() -> (RequestSink, mpsc::UnboundedReceiver<ResourceId>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (RequestSink::new(tx), rx)
}

pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<ResourceId>) -> Vec<ResourceId> {
    let mut out = Vec::new();
    while let Ok(id) = rx.try_recv() {
        out.push(id);
    }
    out
}

pub(crate) fn id(namespace: &str, name: &str) -> ResourceId {
    ResourceId::new(namespace.to_string(), name.to_string())
}

pub(crate) fn meta(namespace: &str, name: &str) -> ObjectMeta {
    ObjectMeta {
        namespace: Some(namespace.to_string()),
        name: Some(name.to_string()),
        ..ObjectMeta::default()
    }
}

pub(crate) fn nonzero_time() -> k8s::Time {
    k8s::Time(chrono::DateTime::<chrono::Utc>::MAX_UTC)
}

pub(crate) fn condition(last_transition_time: k8s::Time) -> k8s::Condition {
    k8s::Condition {
        last_transition_time,
        message: String::new(),
        observed_generation: None,
        reason: "Reconciled".to_string(),
        status: "True".to_string(),
        type_: "Accepted".to_string(),
    }
}

pub(crate) fn parent_status(last_transition_time: k8s::Time) -> RouteParentStatus {
    RouteParentStatus {
        parent_ref: parent(None, "gw"),
        controller_name: crate::cluster_info::DEFAULT_CONTROLLER_NAME.to_string(),
        conditions: Some(vec![condition(last_transition_time)]),
    }
}

pub(crate) fn service(
    namespace: &str,
    name: &str,
    selector: Option<BTreeMap<String, String>>,
) -> k8s::Service {
    k8s::Service {
        metadata: meta(namespace, name),
        spec: Some(k8s::ServiceSpec {
            selector,
            ..k8s::ServiceSpec::default()
        }),
        ..k8s::Service::default()
    }
}

pub(crate) fn pod(namespace: &str, name: &str, labels: BTreeMap<String, String>) -> k8s::Pod {
    k8s::Pod {
        metadata: ObjectMeta {
            labels: Some(labels),
            ..meta(namespace, name)
        },
        spec: Some(k8s::PodSpec::default()),
        ..k8s::Pod::default()
    }
}

pub(crate) fn with_gate(mut pod: k8s::Pod, condition_type: &str) -> k8s::Pod {
    pod.spec
        .get_or_insert_with(Default::default)
        .readiness_gates = Some(vec![k8s::PodReadinessGate {
        condition_type: condition_type.to_string(),
    }]);
    pod
}

pub(crate) fn backend(namespace: Option<&str>, name: &str, kind: Option<&str>) -> BackendRef {
    BackendRef {
        kind: kind.map(Into::into),
        name: name.to_string(),
        namespace: namespace.map(Into::into),
        ..BackendRef::default()
    }
}

pub(crate) fn parent(namespace: Option<&str>, name: &str) -> ParentReference {
    ParentReference {
        namespace: namespace.map(Into::into),
        name: name.to_string(),
        ..ParentReference::default()
    }
}

pub(crate) fn http_route(
    namespace: &str,
    name: &str,
    parents: Vec<ParentReference>,
    backends: Vec<BackendRef>,
) -> HTTPRoute {
    HTTPRoute {
        metadata: meta(namespace, name),
        spec: HTTPRouteSpec {
            inner: CommonRouteSpec {
                parent_refs: Some(parents),
            },
            hostnames: None,
            rules: Some(vec![HTTPRouteRule {
                matches: None,
                backend_refs: Some(backends),
            }]),
        },
        status: None,
    }
}

pub(crate) fn grpc_route(
    namespace: &str,
    name: &str,
    parents: Vec<ParentReference>,
    backends: Vec<BackendRef>,
) -> GRPCRoute {
    GRPCRoute {
        metadata: meta(namespace, name),
        spec: GRPCRouteSpec {
            inner: CommonRouteSpec {
                parent_refs: Some(parents),
            },
            hostnames: None,
            rules: Some(vec![GRPCRouteRule {
                matches: None,
                backend_refs: Some(backends),
            }]),
        },
        status: None,
    }
}

pub(crate) fn tls_route(
    namespace: &str,
    name: &str,
    parents: Vec<ParentReference>,
    backends: Vec<BackendRef>,
) -> TLSRoute {
    TLSRoute {
        metadata: meta(namespace, name),
        spec: TLSRouteSpec {
            inner: CommonRouteSpec {
                parent_refs: Some(parents),
            },
            hostnames: None,
            rules: Some(vec![TLSRouteRule {
                backend_refs: Some(backends),
            }]),
        },
        status: None,
    }
}

pub(crate) fn listener(port: u16) -> Listener {
    Listener {
        name: format!("listener-{port}"),
        hostname: None,
        port,
        protocol: "HTTP".to_string(),
    }
}

pub(crate) fn gateway(namespace: &str, name: &str, class: &str) -> Gateway {
    Gateway {
        metadata: meta(namespace, name),
        spec: GatewaySpec {
            gateway_class_name: class.to_string(),
            listeners: Vec::new(),
        },
        status: None,
    }
}

pub(crate) fn gateway_class(name: &str, controller_name: &str) -> GatewayClass {
    GatewayClass {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..ObjectMeta::default()
        },
        spec: GatewayClassSpec {
            controller_name: controller_name.to_string(),
            description: None,
        },
    }
}

pub(crate) fn service_export(namespace: &str, name: &str) -> ServiceExport {
    ServiceExport {
        metadata: meta(namespace, name),
        spec: ServiceExportSpec {},
    }
}

pub(crate) fn service_import(namespace: &str, name: &str) -> ServiceImport {
    ServiceImport {
        metadata: meta(namespace, name),
        spec: ServiceImportSpec::default(),
    }
}

pub(crate) fn target_group_policy(
    namespace: &str,
    name: &str,
    target_ref: NamespacedTargetRef,
) -> TargetGroupPolicy {
    TargetGroupPolicy {
        metadata: meta(namespace, name),
        spec: TargetGroupPolicySpec {
            target_ref,
            protocol: None,
            protocol_version: None,
            health_check: None,
        },
    }
}

/// An AuthPolicy targeting a Gateway API kind by name.
pub(crate) fn auth_policy(
    namespace: &str,
    name: &str,
    target_kind: &str,
    target_name: &str,
    target_namespace: Option<&str>,
    created: Option<k8s::Time>,
) -> AuthPolicy {
    let mut metadata = meta(namespace, name);
    metadata.creation_timestamp = created;
    AuthPolicy {
        metadata,
        spec: AuthPolicySpec {
            target_ref: NamespacedTargetRef {
                group: Some(gateway::GROUP.to_string()),
                kind: target_kind.to_string(),
                name: target_name.to_string(),
                namespace: target_namespace.map(Into::into),
            },
            policy: "{}".to_string(),
        },
    }
}

pub(crate) fn access_log_policy(
    namespace: &str,
    name: &str,
    target_kind: &str,
    target_name: &str,
) -> AccessLogPolicy {
    AccessLogPolicy {
        metadata: meta(namespace, name),
        spec: AccessLogPolicySpec {
            target_ref: NamespacedTargetRef {
                group: Some(gateway::GROUP.to_string()),
                kind: target_kind.to_string(),
                name: target_name.to_string(),
                namespace: None,
            },
            destination: "logs://collector".to_string(),
        },
    }
}
