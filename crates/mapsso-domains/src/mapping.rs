//! Domain mapping records and the repository seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One mapped hostname, keyed by the id the deployment configuration refers
/// to it by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainMapping {
    pub id: i64,
    pub host: String,
}

/// Lookup seam over wherever mapping records live.
///
/// The resolver only ever asks for explicit id sets, so implementations do
/// not need enumeration.
#[async_trait]
pub trait MappingRepository: Send + Sync {
    async fn find_by_ids(&self, ids: &[i64]) -> Vec<DomainMapping>;
}

/// Config-driven repository holding a fixed mapping set in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticMappingRepository {
    by_id: HashMap<i64, DomainMapping>,
}

impl StaticMappingRepository {
    pub fn new(mappings: Vec<DomainMapping>) -> Self {
        let by_id = mappings.into_iter().map(|m| (m.id, m)).collect();
        Self { by_id }
    }
}

#[async_trait]
impl MappingRepository for StaticMappingRepository {
    async fn find_by_ids(&self, ids: &[i64]) -> Vec<DomainMapping> {
        ids.iter()
            .filter_map(|id| self.by_id.get(id).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> StaticMappingRepository {
        StaticMappingRepository::new(vec![
            DomainMapping {
                id: 1,
                host: "shop.example.com".into(),
            },
            DomainMapping {
                id: 2,
                host: "blog.example.org".into(),
            },
        ])
    }

    #[tokio::test]
    async fn test_find_by_ids_returns_known_mappings() {
        let found = repo().find_by_ids(&[1, 2]).await;
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_unknown() {
        let found = repo().find_by_ids(&[2, 99]).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].host, "blog.example.org");
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_input() {
        assert!(repo().find_by_ids(&[]).await.is_empty());
    }
}
