use std::{collections::BTreeMap, sync::Arc};

/// An immutable, cheaply-clonable view of a resource's labels.
#[derive(Clone, Debug, Default, Eq)]
pub struct Labels(Arc<Map>);

pub type Map = BTreeMap<String, String>;

// === impl Labels ===

impl Labels {
    /// Checks whether a label selector selects these labels.
    ///
    /// An empty selector selects nothing.
    pub fn selected_by(&self, selector: &Map) -> bool {
        !selector.is_empty() && selector.iter().all(|(k, v)| self.0.get(k) == Some(v))
    }
}

impl From<Map> for Labels {
    #[inline]
    fn from(labels: Map) -> Self {
        Self(Arc::new(labels))
    }
}

impl From<Option<Map>> for Labels {
    #[inline]
    fn from(labels: Option<Map>) -> Self {
        Self(Arc::new(labels.unwrap_or_default()))
    }
}

impl AsRef<Map> for Labels {
    #[inline]
    fn as_ref(&self) -> &Map {
        self.0.as_ref()
    }
}

impl<T: AsRef<Map>> std::cmp::PartialEq<T> for Labels {
    #[inline]
    fn eq(&self, t: &T) -> bool {
        self.0.as_ref().eq(t.as_ref())
    }
}

impl std::iter::FromIterator<(String, String)> for Labels {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(Arc::new(iter.into_iter().collect()))
    }
}

impl std::iter::FromIterator<(&'static str, &'static str)> for Labels {
    fn from_iter<T: IntoIterator<Item = (&'static str, &'static str)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
