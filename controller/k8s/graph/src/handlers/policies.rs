use super::{EventHandler, RequestSink};
use crate::{
    policy::{self, Policy},
    routes::Route,
    store::{ObjectStore, ResourceId},
};
use async_trait::async_trait;
use std::marker::PhantomData;
use trellis_controller_k8s_api::{
    policy::{AccessLogPolicy, AuthPolicy},
    Resource,
};

/// Enqueues the policies of kind `P` attached to any changed target
/// object.
///
/// Policies self-reconcile when their target changes, so the emitted
/// request carries the policy's identity rather than the target's.
pub struct PolicyEventHandler<P, S> {
    store: S,
    _policy: PhantomData<P>,
}

// === impl PolicyEventHandler ===

impl<P, S> PolicyEventHandler<P, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _policy: PhantomData,
        }
    }
}

impl<P: Policy, S: ObjectStore> PolicyEventHandler<P, S> {
    async fn enqueue_attached<T>(&self, target: &T, requests: &RequestSink)
    where
        T: Resource + Sync,
        T::DynamicType: Default,
    {
        for attached in policy::attached_policies::<P, _, _>(&self.store, target).await {
            requests.add(ResourceId::of(&attached));
        }
    }
}

#[async_trait]
impl<T, P, S> EventHandler<T> for PolicyEventHandler<P, S>
where
    T: Resource + Send + Sync,
    T::DynamicType: Default,
    P: Policy,
    S: ObjectStore,
{
    async fn create(&self, obj: &T, requests: &RequestSink) {
        self.enqueue_attached(obj, requests).await;
    }

    async fn update(&self, _old: &T, new: &mut T, requests: &RequestSink) {
        self.enqueue_attached(new, requests).await;
    }

    async fn delete(&self, obj: &T, requests: &RequestSink) {
        self.enqueue_attached(obj, requests).await;
    }

    async fn generic(&self, obj: &T, requests: &RequestSink) {
        self.enqueue_attached(obj, requests).await;
    }
}

/// Enqueues the auth and access-log policies attached to a changed route.
pub struct RoutePoliciesEventHandler<S> {
    store: S,
}

// === impl RoutePoliciesEventHandler ===

impl<S> RoutePoliciesEventHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ObjectStore> RoutePoliciesEventHandler<S> {
    async fn enqueue_attached<R: Route>(&self, route: &R, requests: &RequestSink) {
        for attached in policy::attached_policies::<AuthPolicy, _, _>(&self.store, route).await {
            requests.add(ResourceId::of(&attached));
        }
        for attached in
            policy::attached_policies::<AccessLogPolicy, _, _>(&self.store, route).await
        {
            requests.add(ResourceId::of(&attached));
        }
    }
}

#[async_trait]
impl<R: Route, S: ObjectStore> EventHandler<R> for RoutePoliciesEventHandler<S> {
    async fn create(&self, route: &R, requests: &RequestSink) {
        self.enqueue_attached(route, requests).await;
    }

    async fn update(&self, _old: &R, new: &mut R, requests: &RequestSink) {
        self.enqueue_attached(new, requests).await;
    }

    async fn delete(&self, route: &R, requests: &RequestSink) {
        self.enqueue_attached(route, requests).await;
    }
}
