pub mod bridge;
pub mod hydrate;
pub mod retry;
pub mod store;
pub mod traits;

pub use bridge::{BridgeStats, PersistenceBridge, SyncHandle};
pub use hydrate::hydrate_tasks;
pub use retry::RetryPolicy;
pub use store::*;
pub use traits::*;

use boardkit_core::{AppConfig, BoardResult};
use std::sync::Arc;

/// Pick the store named by the configuration: the remote service when a URL
/// is set, else a local directory, else nothing.
pub fn store_from_config(config: &AppConfig) -> BoardResult<Option<Arc<dyn ComponentDataStore>>> {
    if let Some(remote) = HttpComponentStore::from_config(config)? {
        return Ok(Some(Arc::new(remote)));
    }
    Ok(config
        .data_dir
        .as_ref()
        .map(|dir| Arc::new(JsonDirStore::new(dir)) as Arc<dyn ComponentDataStore>))
}
