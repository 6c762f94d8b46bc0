//! Resolves the relationships between watched cluster resources and decides
//! what must be re-reconciled when any one of them changes.
//!
//! The controller watches the Gateway API kinds users express routing
//! intent with, as well as the low-level resources that intent depends on
//! (Services, Endpoints, service exports/imports, policies). None of these
//! relationships are indexed anywhere: a route names its backends, a policy
//! names its target, a gateway names its class. Whenever an object changes,
//! the handlers in this crate walk those references against live cluster
//! state and emit `(namespace, name)` reconcile requests for every object
//! whose desired state may have changed.
//!
//! ```text
//! [ Endpoints ] -> [ Service ] <- [ Route ] -> [ Gateway ] -> [ GatewayClass ]
//!                       ^                            ^
//!             [ TargetGroupPolicy ]    [ AuthPolicy / AccessLogPolicy ]
//! ```
//!
//! Everything here is stateless and read-only: each resolution is a fresh
//! query, duplicate requests are safe (the queues dedup and reconciliation
//! is idempotent), and any query failure other than not-found degrades to
//! "no relation". A missed trigger is recovered by the periodic resync.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod cluster_info;
pub mod handlers;
pub mod policy;
pub mod readiness;
pub mod resolve;
pub mod routes;
pub mod store;

#[cfg(test)]
mod tests;

pub use self::{
    cluster_info::ClusterInfo,
    handlers::RequestSink,
    readiness::ReadinessGateDecider,
    store::{ClientStore, ObjectStore, ResourceId},
};
