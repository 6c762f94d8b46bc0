//! Generic policy attachment.
//!
//! Policies reference the object they configure through a target ref;
//! nothing points the other way. Answering "which policies attach to this
//! object" is therefore a cluster-wide scan, filtered by the target ref
//! comparison rules.

use crate::store::{ObjectStore, StoreObject};
use tracing::warn;
use trellis_controller_k8s_api::{
    policy::{AccessLogPolicy, AuthPolicy, NamespacedTargetRef, TargetGroupPolicy},
    NamespaceResourceScope, Resource, ResourceExt,
};

/// A namespaced policy resource that attaches to a single target.
pub trait Policy: StoreObject + Resource<Scope = NamespaceResourceScope> {
    fn target_ref(&self) -> &NamespacedTargetRef;
}

impl Policy for TargetGroupPolicy {
    fn target_ref(&self) -> &NamespacedTargetRef {
        &self.spec.target_ref
    }
}

impl Policy for AuthPolicy {
    fn target_ref(&self) -> &NamespacedTargetRef {
        &self.spec.target_ref
    }
}

impl Policy for AccessLogPolicy {
    fn target_ref(&self) -> &NamespacedTargetRef {
        &self.spec.target_ref
    }
}

/// Lists the policies of kind `P` whose effective target reference
/// resolves to `target`.
///
/// A target namespace left unset defaults to the policy's own namespace,
/// so cross-namespace attachment only happens when it is spelled out and
/// names the target's actual namespace. No ordering is guaranteed;
/// acceptance precedence between several attached policies is decided by
/// [`resolve_precedence`], not here.
pub async fn attached_policies<P, T, S>(store: &S, target: &T) -> Vec<P>
where
    P: Policy,
    T: Resource,
    T::DynamicType: Default,
    S: ObjectStore,
{
    let policies = match store.list::<P>(None).await {
        Ok(policies) => policies,
        Err(error) => {
            warn!(%error, "Failed to list policies");
            return Vec::new();
        }
    };

    policies
        .into_iter()
        .filter(|policy| {
            let local_ns = policy.namespace().unwrap_or_default();
            policy.target_ref().targets(target, &local_ns)
        })
        .collect()
}

/// Partitions the policies attached to one target into the accepted policy
/// and the conflicted rest, which are never applied.
///
/// The earliest-created policy wins; ties break by name.
pub fn resolve_precedence<P: Policy>(mut policies: Vec<P>) -> (Option<P>, Vec<P>) {
    policies.sort_by_key(|policy| {
        let created = policy
            .meta()
            .creation_timestamp
            .as_ref()
            .map(|time| time.0)
            .unwrap_or(chrono::DateTime::<chrono::Utc>::MAX_UTC);
        (created, policy.name_any())
    });

    if policies.is_empty() {
        return (None, policies);
    }
    let accepted = policies.remove(0);
    (Some(accepted), policies)
}
