//! Multi-cluster services (`multicluster.x-k8s.io`).
//!
//! A `ServiceExport` marks a Service as consumable from the other clusters
//! in the set; a `ServiceImport` is the imported view of a Service exported
//! elsewhere. Both share their namespace and name with the Service they
//! refer to.

/// ServiceExport declares that the identically-named Service should be
/// visible to other clusters in the cluster set.
#[derive(
    Clone,
    Debug,
    Default,
    kube::CustomResource,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    schemars::JsonSchema,
)]
#[kube(
    group = "multicluster.x-k8s.io",
    version = "v1alpha1",
    kind = "ServiceExport",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ServiceExportSpec {}

/// ServiceImport describes a Service imported from other clusters in the
/// cluster set.
#[derive(
    Clone,
    Debug,
    Default,
    kube::CustomResource,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    schemars::JsonSchema,
)]
#[kube(
    group = "multicluster.x-k8s.io",
    version = "v1alpha1",
    kind = "ServiceImport",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ServiceImportSpec {
    /// Type of the import: ClusterSetIP or Headless.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// IPs the imported service resolves to, when ClusterSetIP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ips: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<ServiceImportPort>>,
}

#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct ServiceImportPort {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    pub port: u16,
}
