use super::{EventHandler, RequestSink};
use crate::{
    resolve,
    store::{ObjectStore, ResourceId},
};
use async_trait::async_trait;
use trellis_controller_k8s_api::{
    self as k8s,
    gateway::{GRPCRoute, HTTPRoute, TLSRoute},
};

/// Triggers a service's own reconciliation, and its co-named export's, as
/// the service comes and goes.
pub struct ServiceEventHandler<S> {
    store: S,
}

// === impl ServiceEventHandler ===

impl<S> ServiceEventHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ObjectStore> ServiceEventHandler<S> {
    async fn enqueue(&self, service: &k8s::Service, requests: &RequestSink) {
        requests.add(ResourceId::of(service));
        if let Some(export) = resolve::service_export_for_service(&self.store, service).await {
            requests.add(ResourceId::of(&export));
        }
    }
}

#[async_trait]
impl<S: ObjectStore> EventHandler<k8s::Service> for ServiceEventHandler<S> {
    async fn create(&self, service: &k8s::Service, requests: &RequestSink) {
        self.enqueue(service, requests).await;
    }

    async fn delete(&self, service: &k8s::Service, requests: &RequestSink) {
        self.enqueue(service, requests).await;
    }

    // Spec updates are covered by the Endpoints watch.
}

/// Triggers every route that forwards to a changed service.
pub struct ServiceRoutesEventHandler<S> {
    store: S,
}

// === impl ServiceRoutesEventHandler ===

impl<S> ServiceRoutesEventHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ObjectStore> ServiceRoutesEventHandler<S> {
    async fn enqueue_routes(&self, service: &k8s::Service, requests: &RequestSink) {
        for route in resolve::routes_for_service::<HTTPRoute, _>(&self.store, service).await {
            requests.add(ResourceId::of(&route));
        }
        for route in resolve::routes_for_service::<GRPCRoute, _>(&self.store, service).await {
            requests.add(ResourceId::of(&route));
        }
        for route in resolve::routes_for_service::<TLSRoute, _>(&self.store, service).await {
            requests.add(ResourceId::of(&route));
        }
    }
}

#[async_trait]
impl<S: ObjectStore> EventHandler<k8s::Service> for ServiceRoutesEventHandler<S> {
    async fn create(&self, service: &k8s::Service, requests: &RequestSink) {
        self.enqueue_routes(service, requests).await;
    }

    async fn delete(&self, service: &k8s::Service, requests: &RequestSink) {
        self.enqueue_routes(service, requests).await;
    }
}
