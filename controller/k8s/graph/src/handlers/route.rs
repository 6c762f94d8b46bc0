use super::{EventHandler, RequestSink};
use crate::{
    routes::{self, Route},
    store::{ObjectStore, ResourceId},
};
use ahash::AHashSet as HashSet;
use async_trait::async_trait;
use std::marker::PhantomData;
use tracing::warn;
use trellis_controller_k8s_api::{self as k8s, gateway::backend_ref_targets_kind, ResourceExt};

/// Triggers the backend services a route forwards to.
pub struct RouteEventHandler<R, S> {
    store: S,
    zero_transition_time: k8s::Time,
    _route: PhantomData<R>,
}

// === impl RouteEventHandler ===

impl<R, S> RouteEventHandler<R, S> {
    pub fn new(store: S, zero_transition_time: k8s::Time) -> Self {
        Self {
            store,
            zero_transition_time,
            _route: PhantomData,
        }
    }
}

impl<R: Route, S: ObjectStore> RouteEventHandler<R, S> {
    /// Enqueues each distinct backend Service that actually exists.
    async fn enqueue_backend_services(&self, route: &R, requests: &RequestSink) {
        let route_ns = route.namespace().unwrap_or_default();

        let mut seen = HashSet::new();
        for backend in route.backend_refs() {
            if !backend_ref_targets_kind::<k8s::Service>(backend) {
                continue;
            }
            let id = ResourceId::new(
                backend
                    .namespace
                    .clone()
                    .unwrap_or_else(|| route_ns.clone()),
                backend.name.clone(),
            );
            if !seen.insert(id.clone()) {
                continue;
            }

            match self.store.get::<k8s::Service>(&id.namespace, &id.name).await {
                Ok(Some(_)) => requests.add(id),
                // Dangling references are skipped, not errors.
                Ok(None) => {}
                Err(error) => warn!(%error, backend = %id, "Failed to get backend service"),
            }
        }
    }
}

#[async_trait]
impl<R: Route, S: ObjectStore> EventHandler<R> for RouteEventHandler<R, S> {
    async fn create(&self, route: &R, requests: &RequestSink) {
        self.enqueue_backend_services(route, requests).await;
    }

    async fn update(&self, old: &R, new: &mut R, requests: &RequestSink) {
        if new.spec_eq(old) {
            return;
        }
        routes::reset_first_parent_transition_time(new, &self.zero_transition_time);
        self.enqueue_backend_services(new, requests).await;
    }
}
