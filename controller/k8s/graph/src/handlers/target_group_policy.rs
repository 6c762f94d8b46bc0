use super::{EventHandler, RequestSink};
use crate::{
    resolve,
    routes::{self, Route},
    store::{ObjectStore, ResourceId},
};
use async_trait::async_trait;
use tracing::warn;
use trellis_controller_k8s_api::{
    gateway::{GRPCRoute, HTTPRoute},
    policy::TargetGroupPolicy,
};

/// Fans a target-group policy change out to the routes and export of its
/// target service.
pub struct TargetGroupPolicyEventHandler<S> {
    store: S,
}

// === impl TargetGroupPolicyEventHandler ===

impl<S> TargetGroupPolicyEventHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ObjectStore> TargetGroupPolicyEventHandler<S> {
    async fn enqueue_for_target(&self, policy: &TargetGroupPolicy, requests: &RequestSink) {
        let service = match resolve::service_for_target_group_policy(&self.store, policy).await {
            Some(service) => service,
            None => return,
        };
        let id = ResourceId::of(&service);

        self.enqueue_matching_routes::<HTTPRoute>(&id, requests)
            .await;
        self.enqueue_matching_routes::<GRPCRoute>(&id, requests)
            .await;

        if let Some(export) = resolve::service_export_for_service(&self.store, &service).await {
            requests.add(ResourceId::of(&export));
        }
    }

    async fn enqueue_matching_routes<R: Route>(&self, service: &ResourceId, requests: &RequestSink) {
        let all = match self.store.list::<R>(None).await {
            Ok(routes) => routes,
            Err(error) => {
                warn!(%error, service = %service, "Failed to list routes");
                return;
            }
        };

        for route in all {
            // An absent backend Kind counts as a Service reference here.
            if routes::references_service(&route, service) {
                requests.add(ResourceId::of(&route));
            }
        }
    }
}

#[async_trait]
impl<S: ObjectStore> EventHandler<TargetGroupPolicy> for TargetGroupPolicyEventHandler<S> {
    async fn create(&self, policy: &TargetGroupPolicy, requests: &RequestSink) {
        self.enqueue_for_target(policy, requests).await;
    }

    async fn update(
        &self,
        _old: &TargetGroupPolicy,
        new: &mut TargetGroupPolicy,
        requests: &RequestSink,
    ) {
        self.enqueue_for_target(new, requests).await;
    }

    async fn delete(&self, policy: &TargetGroupPolicy, requests: &RequestSink) {
        self.enqueue_for_target(policy, requests).await;
    }

    async fn generic(&self, policy: &TargetGroupPolicy, requests: &RequestSink) {
        self.enqueue_for_target(policy, requests).await;
    }
}
