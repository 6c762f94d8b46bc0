//! Stateless lookups mapping one object to the objects related to it
//! through routing references.
//!
//! Failures other than not-found are logged and degrade to "no relation":
//! callers are never blocked on a transient read error, at the cost of a
//! trigger that the periodic resync will eventually replay.

use crate::{
    routes::{self, Route},
    store::{ObjectStore, ResourceId},
};
use tracing::{debug, warn};
use trellis_controller_k8s_api::{
    self as k8s,
    multicluster::{ServiceExport, ServiceImport},
    policy::TargetGroupPolicy,
};

/// Lists the routes of kind `R` with at least one backend reference naming
/// `service`. Only references that spell out `kind: Service` count here.
pub async fn routes_for_service<R, S>(store: &S, service: &k8s::Service) -> Vec<R>
where
    R: Route,
    S: ObjectStore,
{
    let id = ResourceId::of(service);
    let all = match store.list::<R>(None).await {
        Ok(routes) => routes,
        Err(error) => {
            warn!(%error, service = %id, "Failed to list routes");
            return Vec::new();
        }
    };

    all.into_iter()
        .filter(|route| routes::references_service_explicit(route, &id))
        .collect()
}

/// Lists the routes of kind `R` with at least one backend reference naming
/// `import` as a ServiceImport.
pub async fn routes_for_service_import<R, S>(store: &S, import: &ServiceImport) -> Vec<R>
where
    R: Route,
    S: ObjectStore,
{
    let id = ResourceId::of(import);
    let all = match store.list::<R>(None).await {
        Ok(routes) => routes,
        Err(error) => {
            warn!(%error, import = %id, "Failed to list routes");
            return Vec::new();
        }
    };

    all.into_iter()
        .filter(|route| routes::references_service_import(route, &id))
        .collect()
}

/// Gets the ServiceExport sharing the service's identity, if any.
pub async fn service_export_for_service<S: ObjectStore>(
    store: &S,
    service: &k8s::Service,
) -> Option<ServiceExport> {
    let id = ResourceId::of(service);
    match store.get::<ServiceExport>(&id.namespace, &id.name).await {
        Ok(export) => export,
        Err(error) => {
            warn!(%error, service = %id, "Failed to get ServiceExport");
            None
        }
    }
}

/// Gets the Service owning an Endpoints object; the two share identity.
pub async fn service_for_endpoints<S: ObjectStore>(
    store: &S,
    endpoints: &k8s::Endpoints,
) -> Option<k8s::Service> {
    let id = ResourceId::of(endpoints);
    match store.get::<k8s::Service>(&id.namespace, &id.name).await {
        Ok(service) => service,
        Err(error) => {
            warn!(%error, endpoints = %id, "Failed to get Service");
            None
        }
    }
}

/// Resolves a TargetGroupPolicy's target Service.
///
/// The target must be a core-group Service; its namespace defaults to the
/// policy's own. Any validation failure or missing target is `None`.
pub async fn service_for_target_group_policy<S: ObjectStore>(
    store: &S,
    policy: &TargetGroupPolicy,
) -> Option<k8s::Service> {
    let id = ResourceId::of(policy);
    let target = &policy.spec.target_ref;

    if !target.targets_kind::<k8s::Service>() {
        debug!(policy = %id, kind = %target.kind, "Policy does not target a Service");
        return None;
    }

    let namespace = target.namespace.as_deref().unwrap_or(&id.namespace);
    match store.get::<k8s::Service>(namespace, &target.name).await {
        Ok(service) => service,
        Err(error) => {
            warn!(%error, policy = %id, "Failed to get target service");
            None
        }
    }
}
