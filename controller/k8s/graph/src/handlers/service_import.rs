use super::{EventHandler, RequestSink};
use crate::{
    resolve,
    routes::Route,
    store::{ObjectStore, ResourceId},
};
use async_trait::async_trait;
use std::marker::PhantomData;
use trellis_controller_k8s_api::multicluster::ServiceImport;

/// Triggers the routes of kind `R` that forward to a changed service
/// import.
pub struct ServiceImportEventHandler<R, S> {
    store: S,
    _route: PhantomData<R>,
}

// === impl ServiceImportEventHandler ===

impl<R, S> ServiceImportEventHandler<R, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _route: PhantomData,
        }
    }
}

impl<R: Route, S: ObjectStore> ServiceImportEventHandler<R, S> {
    async fn enqueue_routes(&self, import: &ServiceImport, requests: &RequestSink) {
        for route in resolve::routes_for_service_import::<R, _>(&self.store, import).await {
            requests.add(ResourceId::of(&route));
        }
    }
}

#[async_trait]
impl<R: Route, S: ObjectStore> EventHandler<ServiceImport> for ServiceImportEventHandler<R, S> {
    async fn create(&self, import: &ServiceImport, requests: &RequestSink) {
        self.enqueue_routes(import, requests).await;
    }

    async fn update(&self, _old: &ServiceImport, new: &mut ServiceImport, requests: &RequestSink) {
        self.enqueue_routes(new, requests).await;
    }

    async fn delete(&self, import: &ServiceImport, requests: &RequestSink) {
        self.enqueue_routes(import, requests).await;
    }

    async fn generic(&self, import: &ServiceImport, requests: &RequestSink) {
        self.enqueue_routes(import, requests).await;
    }
}
