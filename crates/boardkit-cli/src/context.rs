use boardkit_core::{AppConfig, BoardError, BoardResult};
use boardkit_domain::{
    Board, BoardController, ComponentData, ComponentNode, NodePatch, Page, PersistHandle,
    SystemClock, KANBAN_COMPONENT_TYPE,
};
use boardkit_persistence::{
    hydrate_tasks, store_from_config, AtomicWriter, ComponentDataStore, PersistenceBridge,
    RetryPolicy,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

type PendingUpdates = Rc<RefCell<Vec<(String, NodePatch)>>>;

/// A loaded page document plus the optional component-data store behind it.
pub struct CliContext {
    pub page: Page,
    path: PathBuf,
    store: Option<Arc<dyn ComponentDataStore>>,
    bridge: Option<PersistenceBridge>,
}

impl CliContext {
    pub async fn load(path: &Path, config: &AppConfig) -> BoardResult<Self> {
        let bytes = AtomicWriter::read_optional(path).await?.ok_or_else(|| {
            BoardError::not_found(format!(
                "Page file {} (create it with `page init`)",
                path.display()
            ))
        })?;
        let page: Page = serde_json::from_slice(&bytes)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;

        let store = store_from_config(config)?;
        let bridge = store.clone().map(|store| {
            tracing::debug!("Replicating boards to {}", store.describe());
            PersistenceBridge::spawn(store, RetryPolicy::from_config(&config.retry))
        });

        Ok(Self {
            page,
            path: path.to_path_buf(),
            store,
            bridge,
        })
    }

    /// Write an empty page document, refusing to overwrite an existing one.
    pub async fn init(path: &Path) -> BoardResult<()> {
        if path.exists() {
            return Err(BoardError::Validation(format!(
                "Page file {} already exists",
                path.display()
            )));
        }
        write_page(path, &Page::default()).await
    }

    pub fn node(&self, id: &str) -> BoardResult<&ComponentNode> {
        self.page
            .find(id)
            .ok_or_else(|| BoardError::not_found(format!("Component {}", id)))
    }

    fn kanban_node(&self, id: &str) -> BoardResult<&ComponentNode> {
        let node = self.node(id)?;
        if node.component_type != KANBAN_COMPONENT_TYPE {
            return Err(BoardError::Validation(format!(
                "Component {} is a {}, not a kanban board",
                id, node.component_type
            )));
        }
        Ok(node)
    }

    /// Build a board from its node, preferring stored tasks when a store is set.
    pub async fn load_board(&self, id: &str) -> BoardResult<Board> {
        let node = self.kanban_node(id)?;
        let mut board = Board::from_props(
            node.id.clone(),
            node.name.clone().unwrap_or_default(),
            &node.props,
        )?;
        if let Some(store) = &self.store {
            let fallback = board.flatten_tasks();
            let tasks = hydrate_tasks(store.as_ref(), id, fallback).await;
            board.hydrate(tasks);
        }
        Ok(board)
    }

    /// Run `f` against a controller for board `id`, then commit whatever it
    /// emitted into the page and save the page if anything changed.
    pub async fn with_board<T>(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut BoardController) -> BoardResult<T>,
    ) -> BoardResult<T> {
        let board = self.load_board(id).await?;
        let props = self.kanban_node(id)?.props.clone();

        let pending: PendingUpdates = Rc::default();
        let sink_pending = pending.clone();
        let sink = move |component_id: &str, patch: NodePatch| {
            sink_pending
                .borrow_mut()
                .push((component_id.to_string(), patch));
        };

        let mut controller = BoardController::new(board, props, SystemClock, Box::new(sink));
        if let Some(bridge) = &self.bridge {
            controller = controller.with_persistence(Box::new(bridge.handle()));
        }
        let result = f(&mut controller)?;
        drop(controller);

        let updates = pending.take();
        if !updates.is_empty() {
            for (component_id, patch) in &updates {
                self.page.commit(component_id, patch)?;
            }
            self.save().await?;
        }
        Ok(result)
    }

    /// Merge a patch into any node and save the page.
    pub async fn commit(&mut self, id: &str, patch: &NodePatch) -> BoardResult<()> {
        self.page.commit(id, patch)?;
        self.save().await
    }

    /// Queue a board's current snapshot, if a store is configured.
    pub fn replicate(&self, id: &str) -> BoardResult<()> {
        let Some(bridge) = &self.bridge else {
            return Ok(());
        };
        let node = self.kanban_node(id)?;
        let board = Board::from_props(
            node.id.clone(),
            node.name.clone().unwrap_or_default(),
            &node.props,
        )?;
        bridge.handle().queue(ComponentData::from_board(&board));
        Ok(())
    }

    pub async fn save(&self) -> BoardResult<()> {
        write_page(&self.path, &self.page).await
    }

    /// Flush queued snapshots before the process exits.
    pub async fn finish(self) -> BoardResult<()> {
        if let Some(bridge) = self.bridge {
            let stats = bridge.shutdown().await?;
            if stats.failed > 0 {
                tracing::warn!(
                    "{} snapshot(s) could not be replicated; the page file has the latest state",
                    stats.failed
                );
            } else {
                tracing::info!("Replicated {} snapshot(s)", stats.saved);
            }
        }
        Ok(())
    }
}

async fn write_page(path: &Path, page: &Page) -> BoardResult<()> {
    let bytes =
        serde_json::to_vec_pretty(page).map_err(|e| BoardError::Serialization(e.to_string()))?;
    AtomicWriter::write_atomic(path, &bytes).await?;
    tracing::info!("Saved page to {}", path.display());
    Ok(())
}
