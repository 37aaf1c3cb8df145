use serde::Deserialize;
use std::collections::BTreeSet;

/// Read access to the steps of the enclosing transformation.
pub trait StepGraph {
    fn find_step(&self, name: &str) -> bool;
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TransformationGraph {
    steps: BTreeSet<String>,
}

impl TransformationGraph {
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }

    pub fn add_step(&mut self, name: impl Into<String>) {
        self.steps.insert(name.into());
    }
}

impl StepGraph for TransformationGraph {
    fn find_step(&self, name: &str) -> bool {
        self.steps.contains(name)
    }
}

impl<T: StepGraph + ?Sized> StepGraph for &T {
    fn find_step(&self, name: &str) -> bool {
        (**self).find_step(name)
    }
}
