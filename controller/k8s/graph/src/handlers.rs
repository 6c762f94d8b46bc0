//! Per-kind event handlers.
//!
//! The watch runtime dispatches every notification to the handler for the
//! changed resource's kind; the handler resolves the objects impacted by
//! the change and emits their identities into the reconcile queue.

use crate::store::ResourceId;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::error;

mod endpoints;
mod gateway;
mod gateway_class;
mod policies;
mod route;
mod service;
mod service_export;
mod service_import;
mod target_group_policy;

pub use self::{
    endpoints::EndpointsEventHandler,
    gateway::GatewayEventHandler,
    gateway_class::GatewayClassEventHandler,
    policies::{PolicyEventHandler, RoutePoliciesEventHandler},
    route::RouteEventHandler,
    service::{ServiceEventHandler, ServiceRoutesEventHandler},
    service_export::ServiceExportEventHandler,
    service_import::ServiceImportEventHandler,
    target_group_policy::TargetGroupPolicyEventHandler,
};

/// Emits reconcile requests into the queue owned by the watch runtime.
///
/// Delivery is at-least-once: emitting a duplicate or redundant identity is
/// always safe because the queue dedups and reconciliation is idempotent.
#[derive(Clone)]
pub struct RequestSink {
    requests: mpsc::UnboundedSender<ResourceId>,
}

// === impl RequestSink ===

impl RequestSink {
    pub fn new(requests: mpsc::UnboundedSender<ResourceId>) -> Self {
        Self { requests }
    }

    /// Enqueues one reconcile request.
    pub fn add(&self, id: ResourceId) {
        if let Err(error) = self.requests.send(id) {
            error!(%error, "Failed to enqueue reconcile request");
        }
    }
}

/// Callbacks invoked by the watch runtime as a resource of kind `T`
/// changes.
///
/// Handlers implement the notifications that can change what a reconciler
/// would compute; everything else defaults to a no-op.
#[async_trait]
pub trait EventHandler<T: Send + Sync>: Send + Sync {
    async fn create(&self, _obj: &T, _requests: &RequestSink) {}

    /// `new` is mutable so handlers can clear stale status before the
    /// object is re-read downstream.
    async fn update(&self, _old: &T, _new: &mut T, _requests: &RequestSink) {}

    async fn delete(&self, _obj: &T, _requests: &RequestSink) {}

    async fn generic(&self, _obj: &T, _requests: &RequestSink) {}
}
