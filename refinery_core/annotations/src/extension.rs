use crate::model::AnnotationGroup;
use crate::merge::merge;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Key under which a model annotation step publishes its accumulated group.
pub const KEY_MODEL_ANNOTATIONS: &str = "KEY_MODEL_ANNOTATIONS";

/// Job scoped side channel between annotation steps and the enclosing job.
///
/// Created by the host once per job run; clones share the same map. Steps
/// write, the job reads after the run has completed.
#[derive(Clone, Default, Debug)]
pub struct ExtensionDataMap {
    inner: Arc<RwLock<HashMap<String, AnnotationGroup>>>,
}

impl ExtensionDataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<AnnotationGroup> {
        self.inner.read().get(key).cloned()
    }

    pub fn put(&self, key: impl Into<String>, group: AnnotationGroup) {
        self.inner.write().insert(key.into(), group);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }

    /// Store `incoming` under `key`, appending to anything already there.
    /// Returns the size of the stored group.
    pub fn merge_group(&self, key: &str, incoming: &AnnotationGroup) -> usize {
        let mut g = self.inner.write();
        let merged = merge(g.remove(key), incoming);
        let size = merged.len();
        g.insert(key.to_string(), merged);
        size
    }

    pub fn model_annotations(&self) -> Option<AnnotationGroup> {
        self.get(KEY_MODEL_ANNOTATIONS)
    }
}
