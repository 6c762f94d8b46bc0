use super::{EventHandler, RequestSink};
use crate::{
    resolve,
    store::{ObjectStore, ResourceId},
};
use async_trait::async_trait;
use trellis_controller_k8s_api as k8s;

/// Triggers the owning Service when endpoint membership changes.
pub struct EndpointsEventHandler<S> {
    store: S,
}

// === impl EndpointsEventHandler ===

impl<S> EndpointsEventHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ObjectStore> EndpointsEventHandler<S> {
    async fn enqueue_service(&self, endpoints: &k8s::Endpoints, requests: &RequestSink) {
        if let Some(service) = resolve::service_for_endpoints(&self.store, endpoints).await {
            requests.add(ResourceId::of(&service));
        }
    }
}

#[async_trait]
impl<S: ObjectStore> EventHandler<k8s::Endpoints> for EndpointsEventHandler<S> {
    async fn create(&self, endpoints: &k8s::Endpoints, requests: &RequestSink) {
        self.enqueue_service(endpoints, requests).await;
    }

    async fn update(&self, old: &k8s::Endpoints, new: &mut k8s::Endpoints, requests: &RequestSink) {
        // Only membership changes matter to target registration.
        if old.subsets == new.subsets {
            return;
        }
        self.enqueue_service(new, requests).await;
    }

    // Deletes ride on the Service delete path.
}
