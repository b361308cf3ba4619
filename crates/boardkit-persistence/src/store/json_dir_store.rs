use crate::store::atomic_writer::AtomicWriter;
use crate::traits::ComponentDataStore;
use async_trait::async_trait;
use boardkit_core::{BoardError, BoardResult};
use boardkit_domain::{ComponentData, Task};
use std::path::{Path, PathBuf};

/// Local store: one `<component_id>.json` per component.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, component_id: &str) -> BoardResult<PathBuf> {
        let valid = !component_id.is_empty()
            && component_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !component_id.starts_with('.');
        if !valid {
            return Err(BoardError::Validation(format!(
                "Component id '{}' cannot be used as a file name",
                component_id
            )));
        }
        Ok(self.dir.join(format!("{}.json", component_id)))
    }
}

#[async_trait]
impl ComponentDataStore for JsonDirStore {
    async fn fetch(&self, component_id: &str) -> BoardResult<Option<Vec<Task>>> {
        let path = self.path_for(component_id)?;
        let Some(bytes) = AtomicWriter::read_optional(&path).await? else {
            return Ok(None);
        };
        let data: ComponentData = serde_json::from_slice(&bytes)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        Ok(Some(data.tasks))
    }

    async fn save(&self, data: &ComponentData) -> BoardResult<()> {
        let path = self.path_for(&data.component_id)?;
        let bytes = serde_json::to_vec_pretty(data)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        AtomicWriter::write_atomic(&path, &bytes).await?;
        tracing::info!(
            "Saved {} tasks for {} to {}",
            data.tasks.len(),
            data.component_id,
            path.display()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.dir.display())
    }
}
