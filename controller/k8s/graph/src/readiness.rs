//! Decides whether a pod being created must carry the registration
//! readiness gate.
//!
//! A pod backs a managed target group when a Service selecting it is either
//! a backend of a route attached to one of this controller's gateways, or
//! exported to the cluster set. Such pods must not be considered ready
//! until target registration completes, so a mutating webhook asks this
//! decider at admission time and appends the gate when it answers true.

use crate::{
    cluster_info::ClusterInfo,
    routes::{self, Route},
    store::{ObjectStore, ResourceId},
};
use tracing::{debug, warn};
use trellis_controller_k8s_api::{
    self as k8s,
    gateway::{parent_ref_targets_kind, GRPCRoute, Gateway, GatewayClass, HTTPRoute},
    multicluster::ServiceExport,
    Labels, ResourceExt,
};

/// Single-shot decision procedure backing the pod-mutating webhook.
///
/// The decision is best effort: it runs at admission time and must never
/// block pod creation, so every internal failure is logged and answered
/// with `false`.
pub struct ReadinessGateDecider<S> {
    store: S,
    cluster: ClusterInfo,
}

// === impl ReadinessGateDecider ===

impl<S> ReadinessGateDecider<S> {
    pub fn new(store: S, cluster: ClusterInfo) -> Self {
        Self { store, cluster }
    }
}

impl<S: ObjectStore> ReadinessGateDecider<S> {
    /// True iff the pod is selected by a Service that routes through one of
    /// this controller's gateways or is exported to the cluster set, and
    /// the gate is not already declared.
    pub async fn requires_gate(&self, pod: &k8s::Pod) -> bool {
        if self.has_gate(pod) {
            return false;
        }

        let namespace = match pod.namespace() {
            Some(namespace) => namespace,
            None => return false,
        };

        let services = self.selecting_services(&namespace, pod).await;
        if services.is_empty() {
            return false;
        }

        // TODO: decide whether TLSRoute backends should also hold pod
        // readiness; they attach to gateways like the other kinds but have
        // never been part of this scan.
        if self
            .routed_via_owned_gateway::<HTTPRoute>(&services)
            .await
        {
            return true;
        }
        if self
            .routed_via_owned_gateway::<GRPCRoute>(&services)
            .await
        {
            return true;
        }

        for service in &services {
            let id = ResourceId::of(service);
            match self.store.get::<ServiceExport>(&id.namespace, &id.name).await {
                Ok(Some(_)) => return true,
                Ok(None) => {}
                Err(error) => warn!(%error, service = %id, "Failed to get ServiceExport"),
            }
        }

        false
    }

    fn has_gate(&self, pod: &k8s::Pod) -> bool {
        pod.spec
            .as_ref()
            .and_then(|spec| spec.readiness_gates.as_ref())
            .map(|gates| {
                gates
                    .iter()
                    .any(|gate| gate.condition_type == self.cluster.pod_readiness_gate)
            })
            .unwrap_or(false)
    }

    /// The services in the pod's namespace whose selector matches its
    /// labels.
    async fn selecting_services(&self, namespace: &str, pod: &k8s::Pod) -> Vec<k8s::Service> {
        let labels = Labels::from(pod.metadata.labels.clone());

        let services = match self.store.list::<k8s::Service>(Some(namespace)).await {
            Ok(services) => services,
            Err(error) => {
                warn!(%error, %namespace, "Failed to list services");
                return Vec::new();
            }
        };

        services
            .into_iter()
            .filter(|service| {
                service
                    .spec
                    .as_ref()
                    .and_then(|spec| spec.selector.as_ref())
                    .map(|selector| labels.selected_by(selector))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Whether any route of kind `R` backends one of `services` and is
    /// attached to a gateway owned by this controller.
    async fn routed_via_owned_gateway<R: Route>(&self, services: &[k8s::Service]) -> bool {
        let all = match self.store.list::<R>(None).await {
            Ok(routes) => routes,
            Err(error) => {
                warn!(%error, "Failed to list routes");
                return false;
            }
        };

        for route in all {
            let backs = services.iter().any(|service| {
                routes::references_service(&route, &ResourceId::of(service))
            });
            if !backs {
                continue;
            }
            if self.attached_to_owned_gateway(&route).await {
                return true;
            }
        }
        false
    }

    async fn attached_to_owned_gateway<R: Route>(&self, route: &R) -> bool {
        let route_ns = route.namespace().unwrap_or_default();
        for parent in route.parent_refs() {
            if !parent_ref_targets_kind::<Gateway>(parent) {
                continue;
            }
            let namespace = parent.namespace.as_deref().unwrap_or(&route_ns);

            let gw = match self.store.get::<Gateway>(namespace, &parent.name).await {
                Ok(Some(gw)) => gw,
                Ok(None) => {
                    debug!(%namespace, gateway = %parent.name, "Parent gateway not found");
                    continue;
                }
                Err(error) => {
                    warn!(%error, %namespace, gateway = %parent.name, "Failed to get Gateway");
                    continue;
                }
            };

            match self
                .store
                .get_cluster::<GatewayClass>(&gw.spec.gateway_class_name)
                .await
            {
                Ok(Some(class)) if self.cluster.owns_class(&class) => return true,
                Ok(_) => {}
                Err(error) => {
                    warn!(%error, class = %gw.spec.gateway_class_name, "Failed to get GatewayClass")
                }
            }
        }
        false
    }
}
