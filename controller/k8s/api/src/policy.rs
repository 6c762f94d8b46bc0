pub mod access_log_policy;
pub mod auth_policy;
pub mod target_group_policy;

pub use self::{
    access_log_policy::{AccessLogPolicy, AccessLogPolicySpec},
    auth_policy::{AuthPolicy, AuthPolicySpec},
    target_group_policy::{TargetGroupPolicy, TargetGroupPolicySpec},
};

/// References the resource a policy attaches to, optionally in another
/// namespace.
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
pub struct NamespacedTargetRef {
    /// Group of the referent. The empty string denotes the core API group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    pub kind: String,

    pub name: String,

    /// Namespace of the referent. When unset, the policy's own namespace
    /// is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

// === impl NamespacedTargetRef ===

impl NamespacedTargetRef {
    pub fn from_resource<T>(resource: &T) -> Self
    where
        T: kube::Resource,
        T::DynamicType: Default,
    {
        let dt = Default::default();

        let group = match &*T::group(&dt) {
            "" => None,
            group => Some(group.to_string()),
        };
        let name = resource
            .meta()
            .name
            .clone()
            .expect("resource must have a name");

        Self {
            group,
            kind: T::kind(&dt).to_string(),
            name,
            namespace: resource.meta().namespace.clone(),
        }
    }

    /// Checks whether the target references the given resource type.
    pub fn targets_kind<T>(&self) -> bool
    where
        T: kube::Resource,
        T::DynamicType: Default,
    {
        targets_kind::<T>(self.group.as_deref(), &self.kind)
    }

    /// Checks whether the target references the given namespaced resource.
    ///
    /// `local_ns` is the namespace of the referring policy; it is used when
    /// the target leaves its namespace unset.
    pub fn targets<T>(&self, resource: &T, local_ns: &str) -> bool
    where
        T: kube::Resource,
        T::DynamicType: Default,
    {
        if !self.targets_kind::<T>() {
            return false;
        }

        let tns = self.namespace.as_deref().unwrap_or(local_ns);
        match resource.meta().namespace.as_deref() {
            Some(rns) if rns == tns => {}
            _ => return false,
        }

        matches!(resource.meta().name.as_deref(), Some(rname) if rname == self.name)
    }
}

/// Checks whether a `(group, kind)` pair names the given resource type.
///
/// An absent or empty group denotes the core API group.
pub fn targets_kind<T>(group: Option<&str>, kind: &str) -> bool
where
    T: kube::Resource,
    T::DynamicType: Default,
{
    let dt = Default::default();

    let mut t_group = &*T::group(&dt);
    if t_group.is_empty() {
        t_group = "core";
    }

    let group = match group {
        None | Some("") => "core",
        Some(group) => group,
    };

    group.eq_ignore_ascii_case(t_group) && *kind == *T::kind(&dt)
}
