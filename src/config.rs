use serde::{Deserialize, Serialize};

/// Names of the remote collections the repository reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub posts_collection: String,
    pub favorites_collection: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            posts_collection: "posts".to_string(),
            favorites_collection: "favorite_relations".to_string(),
        }
    }
}

impl RepositoryConfig {
    /// Load from JSON. Missing keys fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RepositoryConfig::default();
        assert_eq!(config.posts_collection, "posts");
        assert_eq!(config.favorites_collection, "favorite_relations");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = RepositoryConfig::from_json(r#"{ "posts_collection": "posts_v2" }"#).unwrap();
        assert_eq!(config.posts_collection, "posts_v2");
        assert_eq!(config.favorites_collection, "favorite_relations");

        assert!(RepositoryConfig::from_json("not json").is_err());
    }
}
