use crate::traits::ComponentDataStore;
use boardkit_domain::Task;

/// Tasks to show when a board mounts.
///
/// The stored snapshot wins when present. A missing snapshot or a failed fetch
/// falls back to the tasks already embedded in the page.
pub async fn hydrate_tasks(
    store: &dyn ComponentDataStore,
    component_id: &str,
    fallback: Vec<Task>,
) -> Vec<Task> {
    match store.fetch(component_id).await {
        Ok(Some(tasks)) => {
            tracing::debug!(
                "Hydrated {} tasks for {} from {}",
                tasks.len(),
                component_id,
                store.describe()
            );
            tasks
        }
        Ok(None) => fallback,
        Err(e) => {
            tracing::warn!(
                "Could not load stored tasks for {}, using page data: {}",
                component_id,
                e
            );
            fallback
        }
    }
}
