#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod gateway;
pub mod labels;
pub mod multicluster;
pub mod policy;

pub use self::labels::Labels;
pub use k8s_openapi::{
    api::core::v1::{
        Endpoints, EndpointAddress, EndpointSubset, Pod, PodReadinessGate, PodSpec, PodStatus,
        Service, ServicePort, ServiceSpec,
    },
    apimachinery::pkg::apis::meta::v1::{Condition, Time},
    ClusterResourceScope, NamespaceResourceScope,
};
pub use kube::api::ObjectMeta;
pub use kube::{Resource, ResourceExt};
