use super::NamespacedTargetRef;

/// AccessLogPolicy enables access logging on a Gateway or route, delivered
/// to the named destination.
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
    group = "policy.trellis.dev",
    version = "v1alpha1",
    kind = "AccessLogPolicy",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogPolicySpec {
    /// TargetRef names the Gateway or route whose traffic is logged.
    pub target_ref: NamespacedTargetRef,

    /// Destination is the URI of the log delivery destination.
    pub destination: String,
}
