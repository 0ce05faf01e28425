use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use fnv::FnvHashMap;

use crate::board::Board;
use crate::moves::Move;

/// A discovered state. At most one node exists per digest; `g`, `f`,
/// `parent` and `incoming` may be overwritten when a cheaper path shows up,
/// `h` never is - it is a function of the digest alone.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub board: Board,
    pub g: u32,
    pub h: u32,
    pub f: u32,
    pub parent: Option<u64>,
    pub incoming: Option<Move>,
}

impl SearchNode {
    pub fn new(board: Board, g: u32, h: u32, parent: Option<u64>, incoming: Option<Move>) -> Self {
        SearchNode {
            board,
            g,
            h,
            f: g + h,
            parent,
            incoming,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertOutcome {
    Inserted,
    Improved,
    Ignored,
}

/// Shared map from board digest to the best-known node. Lookups take the
/// read lock; `insert_or_improve` is the only writer.
#[derive(Debug)]
pub(crate) struct NodeTable {
    nodes: RwLock<FnvHashMap<u64, SearchNode>>,
}

impl NodeTable {
    pub fn new() -> Self {
        NodeTable {
            nodes: RwLock::new(FnvHashMap::default()),
        }
    }

    pub fn lookup(&self, digest: u64) -> Option<SearchNode> {
        self.nodes.read().unwrap().get(&digest).cloned()
    }

    pub fn insert_or_improve(&self, digest: u64, node: SearchNode) -> InsertOutcome {
        let mut nodes = self.nodes.write().unwrap();
        match nodes.get_mut(&digest) {
            None => {
                nodes.insert(digest, node);
                InsertOutcome::Inserted
            }
            Some(existing) if node.g < existing.g => {
                existing.g = node.g;
                existing.f = node.g + existing.h;
                existing.parent = node.parent;
                existing.incoming = node.incoming;
                InsertOutcome::Improved
            }
            Some(_) => InsertOutcome::Ignored,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.read().unwrap().len()
    }
}

/// Search-wide counters, updated lock-free by all workers.
#[derive(Debug)]
pub(crate) struct Counters {
    pub explored: AtomicU64,
    pub generated: AtomicU64,
    pub max_open: AtomicU64,
}

impl Counters {
    pub fn new() -> Self {
        Counters {
            explored: AtomicU64::new(0),
            generated: AtomicU64::new(0),
            max_open: AtomicU64::new(0),
        }
    }

    /// Raises the open-set watermark if `size` exceeds it.
    pub fn record_open_size(&self, size: u64) {
        let mut max = self.max_open.load(Ordering::Relaxed);
        while size > max {
            match self.max_open.compare_exchange_weak(
                max,
                size,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return,
                Err(current) => max = current,
            }
        }
    }
}
