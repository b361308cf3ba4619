use crate::retry::RetryPolicy;
use crate::traits::ComponentDataStore;
use boardkit_domain::ComponentData;
use std::sync::Arc;
use tokio::sync::mpsc;

pub(crate) enum Message {
    Save(ComponentData),
    Shutdown,
}

/// Totals reported when the worker exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    pub saved: usize,
    pub failed: usize,
    /// Snapshots superseded by a newer one for the same component before
    /// they were written.
    pub coalesced: usize,
}

/// Queued snapshots awaiting a write, at most one per component.
#[derive(Default)]
struct Batch {
    pending: Vec<ComponentData>,
    coalesced: usize,
}

impl Batch {
    fn push(&mut self, data: ComponentData) {
        if let Some(pos) = self
            .pending
            .iter()
            .position(|p| p.component_id == data.component_id)
        {
            // Keeps the component's first-queued slot
            self.pending[pos] = data;
            self.coalesced += 1;
        } else {
            self.pending.push(data);
        }
    }
}

pub(crate) async fn run(
    store: Arc<dyn ComponentDataStore>,
    policy: RetryPolicy,
    mut rx: mpsc::UnboundedReceiver<Message>,
) -> BridgeStats {
    let mut stats = BridgeStats::default();
    let mut open = true;

    while open {
        let Some(first) = rx.recv().await else {
            break;
        };

        let mut batch = Batch::default();
        match first {
            Message::Save(data) => batch.push(data),
            Message::Shutdown => open = false,
        }
        // Everything already queued is written as one coalesced batch
        while open {
            match rx.try_recv() {
                Ok(Message::Save(data)) => batch.push(data),
                Ok(Message::Shutdown) => open = false,
                Err(_) => break,
            }
        }
        stats.coalesced += batch.coalesced;

        for data in batch.pending {
            let label = format!("Saving {}", data.component_id);
            match policy.run(&label, || store.save(&data)).await {
                Ok(()) => {
                    tracing::debug!(
                        "Persisted {} tasks for {}",
                        data.tasks.len(),
                        data.component_id
                    );
                    stats.saved += 1;
                }
                Err(e) => {
                    // Board state stays as the user left it
                    tracing::error!("Failed to persist {}: {}", data.component_id, e);
                    stats.failed += 1;
                }
            }
        }
    }

    tracing::debug!(
        "Persistence worker exiting: {} saved, {} failed, {} coalesced",
        stats.saved,
        stats.failed,
        stats.coalesced
    );
    stats
}
