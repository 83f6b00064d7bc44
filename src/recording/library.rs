use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::ids::IdGenerator;

/// A saved take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceArtifact {
    pub id: String,
    pub name: String,
    pub duration_secs: u32,
    pub created_at: DateTime<Utc>,
}

/// In-memory, append-only list of saved takes.
///
/// Cloning shares the same list; the app owns one and hands clones to the
/// screens that write to it.
#[derive(Clone)]
pub struct Library {
    artifacts: Arc<RwLock<Vec<VoiceArtifact>>>,
    ids: Arc<dyn IdGenerator>,
}

impl Library {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            artifacts: Arc::new(RwLock::new(Vec::new())),
            ids,
        }
    }

    pub async fn append(&self, name: String, duration_secs: u32) -> VoiceArtifact {
        let artifact = VoiceArtifact {
            id: self.ids.next_id(),
            name,
            duration_secs,
            created_at: Utc::now(),
        };

        let mut artifacts = self.artifacts.write().await;
        artifacts.push(artifact.clone());

        info!(
            "Saved \"{}\" ({}s) to library, {} total",
            artifact.name,
            artifact.duration_secs,
            artifacts.len()
        );

        artifact
    }

    /// All artifacts in save order
    pub async fn list(&self) -> Vec<VoiceArtifact> {
        self.artifacts.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.artifacts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.artifacts.read().await.is_empty()
    }

    /// Case-insensitive name match, in save order. An empty term matches all.
    pub async fn search(&self, term: &str) -> Vec<VoiceArtifact> {
        let needle = term.to_lowercase();
        let artifacts = self.artifacts.read().await;
        artifacts
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub async fn to_json(&self) -> Result<String> {
        let artifacts = self.artifacts.read().await;
        Ok(serde_json::to_string_pretty(&*artifacts)?)
    }
}
