use crate::Condition;

/// The Gateway API group all route and gateway kinds live in.
pub const GROUP: &str = "gateway.networking.k8s.io";

/// ParentReference identifies an API object (usually a Gateway) that a
/// Route wants to be attached to.
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
pub struct ParentReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Namespace of the referent. When unspecified, this refers to the
    /// local namespace of the Route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    pub name: String,

    /// SectionName is the name of a section within the target resource,
    /// e.g. a listener name on a Gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// BackendRef defines how a Route rule forwards traffic to a backend. The
/// referent is a Service unless Group and Kind say otherwise.
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
pub struct BackendRef {
    /// Group of the referent. The empty string denotes the core API group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub name: String,

    /// Namespace of the referent. When unspecified, this refers to the
    /// local namespace of the Route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

/// Common route information shared by all route kinds.
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
pub struct CommonRouteSpec {
    /// ParentRefs references the resources (usually Gateways) that a Route
    /// wants to be attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_refs: Option<Vec<ParentReference>>,
}

/// RouteStatus defines the observed state common to all route kinds.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteStatus {
    /// Parents is a list of parent resources (usually Gateways) that are
    /// associated with the route, and the status of the route with respect
    /// to each parent.
    pub parents: Vec<RouteParentStatus>,
}

/// RouteParentStatus describes the status of a route with respect to an
/// associated parent.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteParentStatus {
    pub parent_ref: ParentReference,

    /// ControllerName is a domain/path string that indicates the name of
    /// the controller that wrote this status.
    pub controller_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

/// HTTPRoute provides a way to route HTTP requests, matched by hostname,
/// path, header or query param, to a set of backends.
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
    group = "gateway.networking.k8s.io",
    version = "v1",
    kind = "HTTPRoute",
    status = "RouteStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct HTTPRouteSpec {
    /// Common route information.
    #[serde(flatten)]
    pub inner: CommonRouteSpec,

    /// Hostnames defines a set of hostnames that should match against the
    /// HTTP Host header to select a HTTPRoute used to process the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostnames: Option<Vec<String>>,

    /// Rules are a list of HTTP matchers, filters and actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<HTTPRouteRule>>,
}

/// HTTPRouteRule defines semantics for matching an HTTP request based on
/// conditions (matches) and forwarding it to backends (backendRefs).
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
pub struct HTTPRouteRule {
    /// Matches define conditions used for matching the rule against
    /// incoming HTTP requests. Each match is independent: the rule is
    /// matched if any one of them is satisfied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<HTTPRouteMatch>>,

    /// BackendRefs defines the backend(s) where matching requests should
    /// be sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_refs: Option<Vec<BackendRef>>,
}

/// HTTPRouteMatch defines the predicate used to match requests to a rule.
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
pub struct HTTPRouteMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<HTTPPathMatch>,

    /// Method specifies HTTP method matcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// HTTPPathMatch describes how to select a HTTP route by matching the
/// request path.
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
pub struct HTTPPathMatch {
    /// Type of the path match: Exact, PathPrefix or RegularExpression.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// GRPCRoute provides a way to route gRPC requests, matched by service and
/// method, to a set of backends.
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
    group = "gateway.networking.k8s.io",
    version = "v1",
    kind = "GRPCRoute",
    status = "RouteStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct GRPCRouteSpec {
    /// Common route information.
    #[serde(flatten)]
    pub inner: CommonRouteSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostnames: Option<Vec<String>>,

    /// Rules are a list of gRPC matchers and actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<GRPCRouteRule>>,
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
pub struct GRPCRouteRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<GRPCRouteMatch>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_refs: Option<Vec<BackendRef>>,
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
pub struct GRPCRouteMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<GRPCMethodMatch>,
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
pub struct GRPCMethodMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// TLSRoute provides a way to route TLS connections by SNI to a set of
/// backends, without terminating the stream.
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
    group = "gateway.networking.k8s.io",
    version = "v1alpha2",
    kind = "TLSRoute",
    status = "RouteStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct TLSRouteSpec {
    /// Common route information.
    #[serde(flatten)]
    pub inner: CommonRouteSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostnames: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<TLSRouteRule>>,
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
pub struct TLSRouteRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_refs: Option<Vec<BackendRef>>,
}

/// Gateway represents an instance of a service-traffic handling
/// infrastructure, bound to a service network by its class.
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
    group = "gateway.networking.k8s.io",
    version = "v1",
    kind = "Gateway",
    status = "GatewayStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct GatewaySpec {
    /// GatewayClassName is the name of the GatewayClass used by this
    /// Gateway.
    pub gateway_class_name: String,

    /// Listeners associated with this Gateway.
    pub listeners: Vec<Listener>,
}

/// Listener embodies the concept of a logical endpoint where a Gateway
/// accepts network connections.
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
pub struct Listener {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    pub port: u16,

    /// Protocol specifies the network protocol this listener expects to
    /// receive, e.g. HTTP or HTTPS.
    pub protocol: String,
}

/// GatewayStatus defines the observed state of a Gateway.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatewayStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

/// GatewayClass describes a class of Gateways available to the cluster and
/// names the controller responsible for managing them.
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
    group = "gateway.networking.k8s.io",
    version = "v1",
    kind = "GatewayClass"
)]
#[serde(rename_all = "camelCase")]
pub struct GatewayClassSpec {
    /// ControllerName is the name of the controller that manages Gateways
    /// of this class.
    pub controller_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Checks whether a parent reference targets the given resource type.
///
/// An absent group or kind refers to the Gateway API group and
/// `Kind=Gateway`.
pub fn parent_ref_targets_kind<T>(parent_ref: &ParentReference) -> bool
where
    T: kube::Resource,
    T::DynamicType: Default,
{
    let dt = Default::default();

    let group = match parent_ref.group.as_deref() {
        None | Some("") => GROUP,
        Some(group) => group,
    };
    let kind = parent_ref.kind.as_deref().unwrap_or("Gateway");

    group.eq_ignore_ascii_case(&T::group(&dt)) && *kind == *T::kind(&dt)
}

/// Checks whether a backend reference targets the given resource type.
///
/// Backend references default to `Kind=Service` in the core group.
pub fn backend_ref_targets_kind<T>(backend_ref: &BackendRef) -> bool
where
    T: kube::Resource,
    T::DynamicType: Default,
{
    crate::policy::targets_kind::<T>(
        backend_ref.group.as_deref(),
        backend_ref.kind.as_deref().unwrap_or("Service"),
    )
}

/// Like [`backend_ref_targets_kind`], but an absent Kind never matches.
pub fn backend_ref_targets_kind_explicit<T>(backend_ref: &BackendRef) -> bool
where
    T: kube::Resource,
    T::DynamicType: Default,
{
    match backend_ref.kind {
        Some(ref kind) => crate::policy::targets_kind::<T>(backend_ref.group.as_deref(), kind),
        None => false,
    }
}
