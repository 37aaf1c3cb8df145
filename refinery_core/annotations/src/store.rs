use crate::error::AnnotationError;
use crate::model::AnnotationGroup;
use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Keyed lookup of annotation groups shared between transformations.
pub trait AnnotationStore: Send + Sync {
    fn read_group(&self, name: &str) -> Result<Option<AnnotationGroup>, AnnotationError>;
}

impl<T: AnnotationStore + ?Sized> AnnotationStore for &T {
    fn read_group(&self, name: &str) -> Result<Option<AnnotationGroup>, AnnotationError> {
        (**self).read_group(name)
    }
}

/// internal flat state (easy to serde)
#[derive(Debug, Default, Serialize, Deserialize)]
struct State {
    #[serde(default)]
    groups: HashMap<String, AnnotationGroup>,
}

#[derive(Clone, Debug)]
pub struct MemoryAnnotationStore {
    inner: Arc<RwLock<State>>,
}

impl Default for MemoryAnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAnnotationStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(State::default())),
        }
    }

    /* ---------- optional durability ---------- */
    /// A missing file yields an empty store.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AnnotationError> {
        let path = path.as_ref();
        let state: State = match std::fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => State::default(),
            Err(err) => return Err(err.into()),
        };
        debug!(
            "loaded {} annotation group(s) from {}",
            state.groups.len(),
            path.display()
        );
        Ok(Self {
            inner: Arc::new(RwLock::new(state)),
        })
    }

    pub fn flush_to(&self, path: impl AsRef<Path>) -> Result<(), AnnotationError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&*self.inner.read())?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(tmp, path)?;
        Ok(())
    }

    /// Insert or replace a group under its name.
    pub fn save_group(&self, group: AnnotationGroup) -> Result<(), AnnotationError> {
        let name = group
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AnnotationError::store("Annotation groups need a name to be stored"))?;
        self.inner.write().groups.insert(name, group);
        Ok(())
    }

    pub fn remove_group(&self, name: &str) -> Option<AnnotationGroup> {
        self.inner.write().groups.remove(name)
    }

    /// Sorted group names.
    pub fn list_groups(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.read().groups.keys().cloned().collect();
        names.sort();
        names
    }
}

impl AnnotationStore for MemoryAnnotationStore {
    fn read_group(&self, name: &str) -> Result<Option<AnnotationGroup>, AnnotationError> {
        Ok(self.inner.read().groups.get(name).cloned())
    }
}
