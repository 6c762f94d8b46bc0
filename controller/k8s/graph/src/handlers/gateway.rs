use super::{EventHandler, RequestSink};
use crate::{
    cluster_info::ClusterInfo,
    routes::Route,
    store::{ObjectStore, ResourceId},
};
use async_trait::async_trait;
use tracing::warn;
use trellis_controller_k8s_api::{
    self as k8s,
    gateway::{parent_ref_targets_kind, GRPCRoute, Gateway, GatewayClass, HTTPRoute, TLSRoute},
    ResourceExt,
};

/// Fans a gateway change out to every route attached to it.
pub struct GatewayEventHandler<S> {
    store: S,
    cluster: ClusterInfo,
    zero_transition_time: k8s::Time,
}

// === impl GatewayEventHandler ===

impl<S> GatewayEventHandler<S> {
    pub fn new(store: S, cluster: ClusterInfo, zero_transition_time: k8s::Time) -> Self {
        Self {
            store,
            cluster,
            zero_transition_time,
        }
    }
}

impl<S: ObjectStore> GatewayEventHandler<S> {
    async fn enqueue_attached_routes(&self, gw: &Gateway, requests: &RequestSink) {
        if !self.owned(gw).await {
            return;
        }
        self.enqueue_routes_of_kind::<HTTPRoute>(gw, requests).await;
        self.enqueue_routes_of_kind::<GRPCRoute>(gw, requests).await;
        self.enqueue_routes_of_kind::<TLSRoute>(gw, requests).await;
    }

    async fn owned(&self, gw: &Gateway) -> bool {
        match self
            .store
            .get_cluster::<GatewayClass>(&gw.spec.gateway_class_name)
            .await
        {
            Ok(Some(class)) => self.cluster.owns_class(&class),
            Ok(None) => false,
            Err(error) => {
                warn!(%error, class = %gw.spec.gateway_class_name, "Failed to get GatewayClass");
                false
            }
        }
    }

    async fn enqueue_routes_of_kind<R: Route>(&self, gw: &Gateway, requests: &RequestSink) {
        let routes = match self.store.list::<R>(None).await {
            Ok(routes) => routes,
            Err(error) => {
                warn!(%error, gateway = %ResourceId::of(gw), "Failed to list routes");
                return;
            }
        };

        let gw_id = ResourceId::of(gw);
        for route in routes {
            if attaches_to(&route, &gw_id) {
                requests.add(ResourceId::of(&route));
            }
        }
    }
}

/// Whether a route's first parent reference resolves to the gateway.
fn attaches_to<R: Route>(route: &R, gw: &ResourceId) -> bool {
    let route_ns = route.namespace().unwrap_or_default();
    match route.parent_refs().first() {
        Some(parent) => {
            parent_ref_targets_kind::<Gateway>(parent)
                && parent.name == gw.name
                && parent.namespace.as_deref().unwrap_or(&route_ns) == gw.namespace
        }
        None => false,
    }
}

/// Zeroes the first status condition's transition time so the status
/// reconciler recomputes it.
fn reset_first_condition_transition_time(gw: &mut Gateway, zero: &k8s::Time) {
    if let Some(condition) = gw
        .status
        .as_mut()
        .and_then(|status| status.conditions.as_mut())
        .and_then(|conditions| conditions.first_mut())
    {
        condition.last_transition_time = zero.clone();
    }
}

#[async_trait]
impl<S: ObjectStore> EventHandler<Gateway> for GatewayEventHandler<S> {
    async fn create(&self, gw: &Gateway, requests: &RequestSink) {
        self.enqueue_attached_routes(gw, requests).await;
    }

    async fn update(&self, old: &Gateway, new: &mut Gateway, requests: &RequestSink) {
        if old.spec == new.spec {
            return;
        }
        reset_first_condition_transition_time(new, &self.zero_transition_time);
        self.enqueue_attached_routes(new, requests).await;
    }

    // TODO: handle gateway deletion here once the deployer can retire a
    // service network without waiting for the full resync.
}
