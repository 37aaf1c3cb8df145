use serde::{Deserialize, Serialize};

///  ---------------- BI Server Connection ----------------
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BiServerConnection {
    /// Base url of the server web application, e.g. `http://localhost:8080/pentaho`.
    pub url: String,
    pub user_id: String,
    pub password: String,
}

impl BiServerConnection {
    pub fn new(url: &str, user_id: &str, password: &str) -> Self {
        Self {
            url: url.to_string(),
            user_id: user_id.to_string(),
            password: password.to_string(),
        }
    }

    /// Joins a server relative path onto the base url.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_handles_trailing_slashes() {
        let with_slash = BiServerConnection::new("http://localhost:8080/pentaho/", "admin", "pw");
        let without = BiServerConnection::new("http://localhost:8080/pentaho", "admin", "pw");
        let expected = "http://localhost:8080/pentaho/plugin/data-access/api/mondrian/postAnalysis";

        assert_eq!(
            with_slash.endpoint("/plugin/data-access/api/mondrian/postAnalysis"),
            expected
        );
        assert_eq!(
            without.endpoint("plugin/data-access/api/mondrian/postAnalysis"),
            expected
        );
    }
}
