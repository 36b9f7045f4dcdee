use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use corredor_routing::graph_store::{GraphStore, JsonGraphStore};
use corredor_routing::location_index::LocationIndex;
use corredor_routing::snapshot::{GraphSnapshot, SnapshotManager};

pub fn load_manager(path: &Path) -> anyhow::Result<Arc<SnapshotManager>> {
    let graph = JsonGraphStore::new(path)
        .load()
        .with_context(|| format!("failed to load graph {}", path.display()))?;

    let graph = Arc::new(graph);
    let index = Arc::new(LocationIndex::build_from_graph(&graph));

    Ok(Arc::new(SnapshotManager::new(GraphSnapshot::initial(
        graph, index,
    ))))
}
