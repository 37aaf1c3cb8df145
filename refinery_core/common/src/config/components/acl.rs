use serde::{Deserialize, Serialize};

/// Users and roles granted access to a published data source.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DataSourceAclModel {
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl DataSourceAclModel {
    pub fn add_user(&mut self, user: impl Into<String>) {
        self.users.push(user.into());
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.roles.is_empty()
    }
}
