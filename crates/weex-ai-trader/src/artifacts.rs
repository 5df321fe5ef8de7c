/*
[INPUT]:  Per-cycle documents (market report, decision, execution record)
[OUTPUT]: Timestamp-named artifact directory on disk
[POS]:    Persistence layer - cycle audit trail
[UPDATE]: When adding artifact files or changing the directory scheme
*/

use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Artifact directory for one trading cycle. Every cycle gets a fresh
/// directory named after its start time; a collision (two cycles inside
/// one second) gets a numeric suffix instead of overwriting.
#[derive(Debug)]
pub struct CycleWorkspace {
    dir: PathBuf,
}

impl CycleWorkspace {
    pub async fn create(root: &Path) -> anyhow::Result<Self> {
        let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S").to_string();
        let mut dir = root.join(&stamp);
        let mut suffix = 1u32;
        while tokio::fs::try_exists(&dir).await.unwrap_or(false) {
            dir = root.join(format!("{stamp}-{suffix}"));
            suffix += 1;
        }
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create artifact dir {}", dir.display()))?;
        debug!(dir = %dir.display(), "cycle workspace created");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn write_market_report(&self, report: &str) -> anyhow::Result<()> {
        self.write_text("market-report.md", report).await
    }

    pub async fn write_decision<T: Serialize>(&self, decision: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(decision).context("serialize decision")?;
        self.write_text("decision.json", &json).await
    }

    /// Raw completion plus the parse error, kept for postmortems when the
    /// model produced something unusable.
    pub async fn write_decision_error(&self, completion: &str, error: &str) -> anyhow::Result<()> {
        let body = format!("error: {error}\n\n--- raw completion ---\n{completion}\n");
        self.write_text("decision-error.txt", &body).await
    }

    pub async fn write_execution<T: Serialize>(&self, record: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(record).context("serialize execution record")?;
        self.write_text("execution.json", &json).await
    }

    async fn write_text(&self, name: &str, content: &str) -> anyhow::Result<()> {
        let path = self.dir.join(name);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("write artifact {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_workspace_writes_all_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let workspace = CycleWorkspace::create(root.path()).await.unwrap();

        workspace.write_market_report("# report").await.unwrap();
        workspace
            .write_decision(&serde_json::json!({"signal": "HOLD"}))
            .await
            .unwrap();
        workspace
            .write_execution(&serde_json::json!({"orders": []}))
            .await
            .unwrap();

        assert!(workspace.dir().join("market-report.md").exists());
        assert!(workspace.dir().join("decision.json").exists());
        assert!(workspace.dir().join("execution.json").exists());
    }

    #[tokio::test]
    async fn test_colliding_workspaces_get_distinct_dirs() {
        let root = tempfile::tempdir().unwrap();
        let first = CycleWorkspace::create(root.path()).await.unwrap();
        let second = CycleWorkspace::create(root.path()).await.unwrap();
        assert_ne!(first.dir(), second.dir());
    }

    #[tokio::test]
    async fn test_decision_error_preserves_raw_completion() {
        let root = tempfile::tempdir().unwrap();
        let workspace = CycleWorkspace::create(root.path()).await.unwrap();
        workspace
            .write_decision_error("not json at all", "completion contained no JSON object")
            .await
            .unwrap();
        let body = tokio::fs::read_to_string(workspace.dir().join("decision-error.txt"))
            .await
            .unwrap();
        assert!(body.contains("not json at all"));
        assert!(body.contains("no JSON object"));
    }
}
