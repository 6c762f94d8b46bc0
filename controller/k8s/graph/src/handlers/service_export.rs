use super::{EventHandler, RequestSink};
use crate::store::{ObjectStore, ResourceId};
use async_trait::async_trait;
use tracing::{debug, warn};
use trellis_controller_k8s_api::{self as k8s, multicluster::ServiceExport, ResourceExt};

/// Triggers the exported Service when its export changes.
pub struct ServiceExportEventHandler<S> {
    store: S,
}

// === impl ServiceExportEventHandler ===

impl<S> ServiceExportEventHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ObjectStore> ServiceExportEventHandler<S> {
    async fn enqueue_service(&self, export: &ServiceExport, requests: &RequestSink) {
        let id = ResourceId::of(export);
        match self.store.get::<k8s::Service>(&id.namespace, &id.name).await {
            Ok(Some(service)) => requests.add(ResourceId::of(&service)),
            Ok(None) => debug!(export = %id, "No service behind export"),
            Err(error) => warn!(%error, export = %id, "Failed to get Service"),
        }
    }
}

#[async_trait]
impl<S: ObjectStore> EventHandler<ServiceExport> for ServiceExportEventHandler<S> {
    async fn create(&self, export: &ServiceExport, requests: &RequestSink) {
        self.enqueue_service(export, requests).await;
    }

    async fn update(&self, old: &ServiceExport, new: &mut ServiceExport, requests: &RequestSink) {
        // The exported-port annotations are part of the export's meaning,
        // so annotation churn counts as a change alongside the spec.
        if old.spec == new.spec && old.annotations() == new.annotations() {
            return;
        }
        self.enqueue_service(new, requests).await;
    }

    // Deletes are deferred to the periodic resync.
}
