use super::{EventHandler, RequestSink};
use crate::{
    cluster_info::ClusterInfo,
    store::{ObjectStore, ResourceId},
};
use async_trait::async_trait;
use tracing::{debug, warn};
use trellis_controller_k8s_api::{
    gateway::{Gateway, GatewayClass},
    ResourceExt,
};

/// Enqueues this controller's gateways when their class appears.
pub struct GatewayClassEventHandler<S> {
    store: S,
    cluster: ClusterInfo,
}

// === impl GatewayClassEventHandler ===

impl<S> GatewayClassEventHandler<S> {
    pub fn new(store: S, cluster: ClusterInfo) -> Self {
        Self { store, cluster }
    }
}

#[async_trait]
impl<S: ObjectStore> EventHandler<GatewayClass> for GatewayClassEventHandler<S> {
    async fn create(&self, class: &GatewayClass, requests: &RequestSink) {
        if !self.cluster.owns_class(class) {
            return;
        }

        let gateways = match self.store.list::<Gateway>(None).await {
            Ok(gateways) => gateways,
            Err(error) => {
                warn!(%error, class = %class.name_any(), "Failed to list gateways");
                return;
            }
        };

        let class_name = class.name_any();
        for gw in gateways {
            if gw.spec.gateway_class_name == class_name {
                requests.add(ResourceId::of(&gw));
            }
        }
    }

    async fn update(&self, _old: &GatewayClass, new: &mut GatewayClass, _requests: &RequestSink) {
        debug!(class = %new.name_any(), "Ignoring GatewayClass update");
    }

    async fn delete(&self, class: &GatewayClass, _requests: &RequestSink) {
        debug!(class = %class.name_any(), "Ignoring GatewayClass delete");
    }
}
