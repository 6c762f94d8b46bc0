use super::NamespacedTargetRef;

/// TargetGroupPolicy tunes how the target group registered for a backend
/// Service routes and health-checks its targets.
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
    kind = "TargetGroupPolicy",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct TargetGroupPolicySpec {
    /// TargetRef names the Service this policy configures. Only same-group
    /// core Services are valid targets.
    pub target_ref: NamespacedTargetRef,

    /// Protocol the target group speaks to its targets, e.g. HTTP or
    /// HTTPS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Protocol version, e.g. HTTP1, HTTP2 or GRPC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheckConfig>,
}

/// Health checking configuration applied to the policy's target group.
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
pub struct HealthCheckConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Destination path for health check requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Port health checks are sent to; defaults to the traffic port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy_threshold_count: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unhealthy_threshold_count: Option<u16>,
}
