use crate::store::{ResourceId, StoreObject};
use trellis_controller_k8s_api::{
    self as k8s,
    gateway::{
        backend_ref_targets_kind, backend_ref_targets_kind_explicit, BackendRef, GRPCRoute,
        HTTPRoute, ParentReference, RouteParentStatus, TLSRoute,
    },
    NamespaceResourceScope, Resource, ResourceExt,
};

/// Capability interface over the concrete route kinds.
///
/// Resolvers never care which kind of route they are looking at, only that
/// it has backend references, parent references and a parent status list.
pub trait Route: StoreObject + Resource<Scope = NamespaceResourceScope> {
    /// All backend references across the route's rules.
    fn backend_refs(&self) -> Vec<&BackendRef>;

    /// The route's parent references, in spec order.
    fn parent_refs(&self) -> &[ParentReference];

    /// The route's parent statuses, in status order.
    fn status_parents(&self) -> &[RouteParentStatus];

    fn status_parents_mut(&mut self) -> Option<&mut Vec<RouteParentStatus>>;

    /// Whether the spec halves of two versions of the route are equal.
    fn spec_eq(&self, other: &Self) -> bool;
}

macro_rules! impl_route {
    ($kind:ty) => {
        impl Route for $kind {
            fn backend_refs(&self) -> Vec<&BackendRef> {
                self.spec
                    .rules
                    .iter()
                    .flatten()
                    .flat_map(|rule| rule.backend_refs.iter().flatten())
                    .collect()
            }

            fn parent_refs(&self) -> &[ParentReference] {
                self.spec.inner.parent_refs.as_deref().unwrap_or(&[])
            }

            fn status_parents(&self) -> &[RouteParentStatus] {
                self.status
                    .as_ref()
                    .map(|status| status.parents.as_slice())
                    .unwrap_or(&[])
            }

            fn status_parents_mut(&mut self) -> Option<&mut Vec<RouteParentStatus>> {
                self.status.as_mut().map(|status| &mut status.parents)
            }

            fn spec_eq(&self, other: &Self) -> bool {
                self.spec == other.spec
            }
        }
    };
}

impl_route!(HTTPRoute);
impl_route!(GRPCRoute);
impl_route!(TLSRoute);

/// Whether any backend reference names the service, treating an absent
/// Kind as a Service reference.
pub fn references_service<R: Route>(route: &R, service: &ResourceId) -> bool {
    let route_ns = route.namespace().unwrap_or_default();
    route
        .backend_refs()
        .into_iter()
        .any(|backend| {
            backend_ref_targets_kind::<k8s::Service>(backend)
                && backend_matches(backend, &route_ns, service)
        })
}

/// Whether any backend reference names the service, requiring
/// `kind: Service` to be spelled out.
pub fn references_service_explicit<R: Route>(route: &R, service: &ResourceId) -> bool {
    let route_ns = route.namespace().unwrap_or_default();
    route
        .backend_refs()
        .into_iter()
        .any(|backend| {
            backend_ref_targets_kind_explicit::<k8s::Service>(backend)
                && backend_matches(backend, &route_ns, service)
        })
}

/// Whether any backend reference names the service import. Import
/// references always spell out their group and kind.
pub fn references_service_import<R: Route>(route: &R, import: &ResourceId) -> bool {
    let route_ns = route.namespace().unwrap_or_default();
    route
        .backend_refs()
        .into_iter()
        .any(|backend| {
            backend_ref_targets_kind_explicit::<k8s::multicluster::ServiceImport>(backend)
                && backend_matches(backend, &route_ns, import)
        })
}

fn backend_matches(backend: &BackendRef, route_ns: &str, target: &ResourceId) -> bool {
    backend.name == target.name
        && backend.namespace.as_deref().unwrap_or(route_ns) == target.namespace
}

/// The conventional "never" timestamp used to force status recomputation
/// downstream.
pub fn zero_transition_time() -> k8s::Time {
    k8s::Time(chrono::DateTime::<chrono::Utc>::MIN_UTC)
}

/// Resets the transition time of the first condition of the route's first
/// parent status to `zero`, unless it is already `zero`.
///
/// The status reconciler treats the zeroed timestamp as "recompute this
/// parent's conditions from scratch". Returns whether a reset happened.
pub fn reset_first_parent_transition_time<R: Route>(route: &mut R, zero: &k8s::Time) -> bool {
    let condition = route
        .status_parents_mut()
        .and_then(|parents| parents.first_mut())
        .and_then(|parent| parent.conditions.as_mut())
        .and_then(|conditions| conditions.first_mut());

    match condition {
        Some(condition) if condition.last_transition_time != *zero => {
            condition.last_transition_time = zero.clone();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{backend, http_route};
    use trellis_controller_k8s_api::gateway::RouteStatus;

    #[test]
    fn backend_namespace_defaults_to_route_namespace() {
        let route = http_route(
            "ns1",
            "route",
            vec![],
            vec![backend(None, "svc-1", Some("Service"))],
        );

        let local = ResourceId::new("ns1".to_string(), "svc-1".to_string());
        let remote = ResourceId::new("ns2".to_string(), "svc-1".to_string());
        assert!(references_service(&route, &local));
        assert!(!references_service(&route, &remote));
    }

    #[test]
    fn explicit_backend_namespace_never_matches_local() {
        let route = http_route(
            "ns1",
            "route",
            vec![],
            vec![backend(Some("ns2"), "svc-1", Some("Service"))],
        );

        let local = ResourceId::new("ns1".to_string(), "svc-1".to_string());
        let remote = ResourceId::new("ns2".to_string(), "svc-1".to_string());
        assert!(!references_service(&route, &local));
        assert!(references_service(&route, &remote));
    }

    #[test]
    fn absent_kind_only_matches_when_defaulted() {
        let route = http_route("ns1", "route", vec![], vec![backend(None, "svc-1", None)]);

        let service = ResourceId::new("ns1".to_string(), "svc-1".to_string());
        assert!(references_service(&route, &service));
        assert!(!references_service_explicit(&route, &service));
    }

    #[test]
    fn reset_skips_routes_without_status() {
        let mut route = http_route(
            "ns1",
            "route",
            vec![],
            vec![backend(None, "svc-1", Some("Service"))],
        );

        let zero = zero_transition_time();
        assert!(!reset_first_parent_transition_time(&mut route, &zero));
    }

    #[test]
    fn reset_zeroes_a_nonzero_first_parent() {
        let zero = zero_transition_time();
        let nonzero = k8s::Time(chrono::DateTime::<chrono::Utc>::MAX_UTC);

        let mut route = http_route(
            "ns1",
            "route",
            vec![],
            vec![backend(None, "svc-1", Some("Service"))],
        );
        route.status = Some(RouteStatus {
            parents: vec![crate::tests::parent_status(nonzero.clone())],
        });

        assert!(reset_first_parent_transition_time(&mut route, &zero));
        let t = &route.status.as_ref().unwrap().parents[0]
            .conditions
            .as_ref()
            .unwrap()[0]
            .last_transition_time;
        assert_eq!(*t, zero);

        // A second reset is a no-op.
        assert!(!reset_first_parent_transition_time(&mut route, &zero));
    }
}
