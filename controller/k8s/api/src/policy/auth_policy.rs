use super::NamespacedTargetRef;

/// AuthPolicy attaches an authorization policy document to a Gateway or to
/// an individual route.
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
    kind = "AuthPolicy",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct AuthPolicySpec {
    /// TargetRef names the Gateway or route this policy applies to.
    pub target_ref: NamespacedTargetRef,

    /// Policy is the inline JSON authorization document applied to the
    /// target's service-network resource.
    pub policy: String,
}
