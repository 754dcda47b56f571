use crate::props::{TreeProps, TreeSnapshot};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// A commit is a single `Arc` swap; readers never see a half-built snapshot.
pub struct PropertyStore<T> {
    tx: watch::Sender<Arc<TreeSnapshot<T>>>,
}

impl<T: Clone> PropertyStore<T> {
    pub fn new() -> Self {
        Self::with_snapshot(TreeSnapshot::default())
    }

    pub fn with_snapshot(snapshot: TreeSnapshot<T>) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(snapshot));
        Self { tx }
    }

    pub fn read(&self) -> Arc<TreeSnapshot<T>> {
        Arc::clone(&self.tx.borrow())
    }

    pub fn commit(&mut self, incoming: &TreeProps<T>) {
        let incoming = incoming.clone();
        let next = TreeSnapshot::next(&self.read(), incoming);

        debug!(
            rows = next.tree_data.len(),
            row_height = next.row_height,
            scaffold_block_width = next.scaffold_block_width,
            slide_region_size = next.slide_region_size,
            direction = next.row_direction.label(),
            "committed tree props"
        );

        self.tx.send_replace(Arc::new(next));
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<TreeSnapshot<T>>> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Default for PropertyStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
