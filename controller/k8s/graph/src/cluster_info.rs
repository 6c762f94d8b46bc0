use trellis_controller_k8s_api::gateway::GatewayClass;

/// The controller name claimed when no other is configured.
pub const DEFAULT_CONTROLLER_NAME: &str = "application-networking.trellis.dev/gateway-controller";

/// The readiness-gate condition type registered on pods that back managed
/// target groups.
pub const DEFAULT_POD_READINESS_GATE: &str = "application-networking.trellis.dev/pod-readiness-gate";

/// Holds the controller's identity within the cluster.
#[derive(Clone, Debug)]
pub struct ClusterInfo {
    /// Value a GatewayClass must carry in `spec.controllerName` for its
    /// gateways to be managed by this controller.
    pub controller_name: String,

    /// Condition type of the pod readiness gate this controller registers
    /// and later flips once target registration completes.
    pub pod_readiness_gate: String,
}

// === impl ClusterInfo ===

impl Default for ClusterInfo {
    fn default() -> Self {
        Self {
            controller_name: DEFAULT_CONTROLLER_NAME.to_string(),
            pod_readiness_gate: DEFAULT_POD_READINESS_GATE.to_string(),
        }
    }
}

impl ClusterInfo {
    /// Whether a gateway class delegates its gateways to this controller.
    pub fn owns_class(&self, class: &GatewayClass) -> bool {
        class.spec.controller_name == self.controller_name
    }
}
