use async_trait::async_trait;
use kube::api::{Api, ListParams};
use serde::de::DeserializeOwned;
use std::fmt;
use trellis_controller_k8s_api::{ClusterResourceScope, NamespaceResourceScope, Resource};

/// Identifies an object within a namespace.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ResourceId {
    pub namespace: String,
    pub name: String,
}

// === impl ResourceId ===

impl ResourceId {
    pub fn new(namespace: String, name: String) -> Self {
        Self { namespace, name }
    }

    /// The id of a namespaced resource.
    pub fn of<T: Resource>(resource: &T) -> Self {
        let namespace = resource
            .meta()
            .namespace
            .clone()
            .expect("resource must have a namespace");
        let name = resource
            .meta()
            .name
            .clone()
            .expect("resource must have a name");
        Self { namespace, name }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("API request failed: {0}")]
    Api(#[from] kube::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Bounds shared by every resource the store can read.
pub trait StoreObject:
    Resource<DynamicType = ()> + Clone + DeserializeOwned + fmt::Debug + Send + Sync + 'static
{
}

impl<T> StoreObject for T where
    T: Resource<DynamicType = ()> + Clone + DeserializeOwned + fmt::Debug + Send + Sync + 'static
{
}

/// Read-only access to current cluster state.
///
/// Every call is a fresh query; nothing is cached between calls. Not-found
/// is `None`, never an error.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Gets a namespaced resource by identity.
    async fn get<T>(&self, namespace: &str, name: &str) -> Result<Option<T>>
    where
        T: StoreObject + Resource<Scope = NamespaceResourceScope>;

    /// Gets a cluster-scoped resource by name.
    async fn get_cluster<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: StoreObject + Resource<Scope = ClusterResourceScope>;

    /// Lists namespaced resources, across all namespaces when none is
    /// given.
    async fn list<T>(&self, namespace: Option<&str>) -> Result<Vec<T>>
    where
        T: StoreObject + Resource<Scope = NamespaceResourceScope>;
}

/// Store backed by direct reads against the API server.
#[derive(Clone)]
pub struct ClientStore {
    client: kube::Client,
}

// === impl ClientStore ===

impl ClientStore {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for ClientStore {
    async fn get<T>(&self, namespace: &str, name: &str) -> Result<Option<T>>
    where
        T: StoreObject + Resource<Scope = NamespaceResourceScope>,
    {
        let api = Api::<T>::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(name).await?)
    }

    async fn get_cluster<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: StoreObject + Resource<Scope = ClusterResourceScope>,
    {
        let api = Api::<T>::all(self.client.clone());
        Ok(api.get_opt(name).await?)
    }

    async fn list<T>(&self, namespace: Option<&str>) -> Result<Vec<T>>
    where
        T: StoreObject + Resource<Scope = NamespaceResourceScope>,
    {
        let api = match namespace {
            Some(namespace) => Api::<T>::namespaced(self.client.clone(), namespace),
            None => Api::<T>::all(self.client.clone()),
        };
        Ok(api.list(&ListParams::default()).await?.items)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::any::{Any, TypeId};
    use std::collections::HashMap;

    /// In-memory store for tests. Objects are shelved by concrete type and
    /// matched on metadata, so fixtures read like cluster state.
    #[derive(Default)]
    pub(crate) struct FakeStore {
        shelves: HashMap<TypeId, Vec<Box<dyn Any + Send + Sync>>>,
    }

    impl FakeStore {
        pub(crate) fn with<T: Any + Send + Sync>(mut self, obj: T) -> Self {
            self.shelves
                .entry(TypeId::of::<T>())
                .or_default()
                .push(Box::new(obj));
            self
        }

        fn all<T: Any>(&self) -> impl Iterator<Item = &T> {
            self.shelves
                .get(&TypeId::of::<T>())
                .into_iter()
                .flatten()
                .filter_map(|obj| obj.downcast_ref::<T>())
        }
    }

    #[async_trait]
    impl ObjectStore for FakeStore {
        async fn get<T>(&self, namespace: &str, name: &str) -> Result<Option<T>>
        where
            T: StoreObject + Resource<Scope = NamespaceResourceScope>,
        {
            Ok(self
                .all::<T>()
                .find(|obj| {
                    obj.meta().namespace.as_deref() == Some(namespace)
                        && obj.meta().name.as_deref() == Some(name)
                })
                .cloned())
        }

        async fn get_cluster<T>(&self, name: &str) -> Result<Option<T>>
        where
            T: StoreObject + Resource<Scope = ClusterResourceScope>,
        {
            Ok(self
                .all::<T>()
                .find(|obj| obj.meta().name.as_deref() == Some(name))
                .cloned())
        }

        async fn list<T>(&self, namespace: Option<&str>) -> Result<Vec<T>>
        where
            T: StoreObject + Resource<Scope = NamespaceResourceScope>,
        {
            Ok(self
                .all::<T>()
                .filter(|obj| namespace.is_none() || obj.meta().namespace.as_deref() == namespace)
                .cloned()
                .collect())
        }
    }
}
