use async_trait::async_trait;
use boardkit_core::BoardResult;
use boardkit_domain::{ComponentData, Task};

/// Backend holding the flat task snapshot of each board component.
/// Implementations handle different storage (remote service, local directory, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComponentDataStore: Send + Sync {
    /// Stored tasks for a component, `None` when nothing was ever saved
    async fn fetch(&self, component_id: &str) -> BoardResult<Option<Vec<Task>>>;

    /// Replace the stored snapshot for `data.component_id`
    async fn save(&self, data: &ComponentData) -> BoardResult<()>;

    /// Short label for logs
    fn describe(&self) -> String;
}
