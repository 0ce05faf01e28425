use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{after, bounded, never, select, unbounded, Receiver, Sender};
use fnv::FnvHashSet;
use log::{debug, error};

use crate::board::Board;
use crate::config::SolverConfig;
use crate::hash::board_digest;
use crate::heuristic;
use crate::moves::Moves;
use crate::queue::{QueueItem, SharedQueue};
use crate::solver::a_star::{Counters, InsertOutcome, NodeTable, SearchNode};
use crate::solver::{SolveResult, SolverErr};

/// One worker samples progress this often (in explored nodes).
const PROGRESS_INTERVAL: u64 = 10_000;

/// Everything a worker shares with the driver and its peers.
#[derive(Clone)]
struct Shared {
    queue: Arc<SharedQueue>,
    table: Arc<NodeTable>,
    closed: Arc<Mutex<FnvHashSet<u64>>>,
    counters: Arc<Counters>,
    solution_found: Arc<AtomicBool>,
    cancelled: Arc<AtomicBool>,
    failure: Arc<Mutex<Option<String>>>,
    config: Arc<SolverConfig>,
}

pub(crate) fn solve(board: &Board, config: &SolverConfig) -> Result<SolveResult, SolverErr> {
    let started = Instant::now();

    if board.is_goal() {
        return Ok(SolveResult {
            found: true,
            moves: Moves::default(),
            nodes_explored: 0,
            nodes_generated: 0,
            max_open_set_size: 0,
            elapsed: started.elapsed(),
            message: "Puzzle is already solved!".to_owned(),
        });
    }

    let shared = Shared {
        queue: Arc::new(SharedQueue::new()),
        table: Arc::new(NodeTable::new()),
        closed: Arc::new(Mutex::new(FnvHashSet::default())),
        counters: Arc::new(Counters::new()),
        solution_found: Arc::new(AtomicBool::new(false)),
        cancelled: Arc::new(AtomicBool::new(false)),
        failure: Arc::new(Mutex::new(None)),
        config: Arc::new(config.clone()),
    };

    // seed the table before the queue so no worker can pop an unknown digest
    let digest = board_digest(board);
    let h = heuristic::estimate(board, &config.heuristic);
    let root = SearchNode::new(board.clone(), 0, h, None, None);
    shared.table.insert_or_improve(digest, root);
    shared.queue.add(QueueItem::new(h, digest, None));
    shared.counters.generated.store(1, Ordering::Relaxed);
    shared.counters.record_open_size(1);

    let num_workers = resolve_workers(config.workers);
    debug!("starting search with {} workers, initial h = {}", num_workers, h);

    let (solution_tx, solution_rx) = bounded::<u64>(1);
    let (exit_tx, exit_rx) = unbounded::<()>();

    let mut handles = Vec::with_capacity(num_workers);
    for id in 0..num_workers {
        let worker_shared = shared.clone();
        let solution_tx = solution_tx.clone();
        let exit_tx = exit_tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("solver-{}", id))
            .spawn(move || {
                worker_loop(id, &worker_shared, &solution_tx);
                drop(exit_tx); // signals the driver via disconnect
            });
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(err) => {
                // no worker may outlive the returned result
                shared.cancelled.store(true, Ordering::Relaxed);
                shared.queue.close();
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(SolverErr::Internal(format!("failed to spawn worker: {}", err)));
            }
        }
    }
    drop(solution_tx);
    drop(exit_tx);

    let goal_digest = wait_for_outcome(&shared, &solution_rx, &exit_rx);

    for handle in handles {
        if handle.join().is_err() {
            return Err(SolverErr::Internal("a worker panicked".to_owned()));
        }
    }

    if let Some(message) = shared.failure.lock().unwrap().take() {
        return Err(SolverErr::Internal(message));
    }

    let nodes_explored = shared.counters.explored.load(Ordering::Relaxed);
    let nodes_generated = shared.counters.generated.load(Ordering::Relaxed);
    let max_open_set_size = shared.counters.max_open.load(Ordering::Relaxed);
    let elapsed = started.elapsed();

    let result = match goal_digest {
        Some(goal) => {
            let moves = backtrack_path(&shared.table, goal);
            let message = format!("Solution found! {} moves", moves.len());
            SolveResult {
                found: true,
                moves,
                nodes_explored,
                nodes_generated,
                max_open_set_size,
                elapsed,
                message,
            }
        }
        None => {
            let message = if shared.cancelled.load(Ordering::Relaxed) {
                "Search cancelled before the state space was exhausted.".to_owned()
            } else {
                "No solution found - search space exhausted.".to_owned()
            };
            SolveResult {
                found: false,
                moves: Moves::default(),
                nodes_explored,
                nodes_generated,
                max_open_set_size,
                elapsed,
                message,
            }
        }
    };
    Ok(result)
}

fn resolve_workers(configured: usize) -> usize {
    if configured > 0 {
        configured
    } else {
        thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    }
}

/// Blocks until a worker reports a goal, the deadline fires, or every
/// worker has exited (exhaustion).
fn wait_for_outcome(
    shared: &Shared,
    solution_rx: &Receiver<u64>,
    exit_rx: &Receiver<()>,
) -> Option<u64> {
    let deadline = match shared.config.timeout {
        Some(timeout) => after(timeout),
        None => never(),
    };

    loop {
        select! {
            recv(solution_rx) -> msg => {
                match msg {
                    Ok(goal) => {
                        // first-wins: the CAS in the worker guarantees one
                        // sender; stop everyone else
                        shared.cancelled.store(true, Ordering::Relaxed);
                        shared.queue.close();
                        return Some(goal);
                    }
                    // all senders dropped without a goal: exhaustion
                    Err(_) => return None,
                }
            }
            recv(exit_rx) -> msg => {
                if msg.is_err() {
                    // every exit_tx clone dropped: all workers terminated;
                    // a goal may still be parked in the solution channel
                    return solution_rx.try_recv().ok();
                }
            }
            recv(deadline) -> _ => {
                shared.cancelled.store(true, Ordering::Relaxed);
                shared.queue.close();
                // keep waiting for the workers to drain out
            }
        }
    }
}

fn worker_loop(id: usize, shared: &Shared, solution_tx: &Sender<u64>) {
    loop {
        if shared.cancelled.load(Ordering::Relaxed) || shared.solution_found.load(Ordering::Relaxed)
        {
            return;
        }

        let item = match shared.queue.pop_min_blocking() {
            Some(item) => item,
            None => return, // closed and drained, or exhausted
        };
        shared.counters.record_open_size(shared.queue.len() as u64);

        let node = match shared.table.lookup(item.digest) {
            Some(node) => node,
            None => {
                let message = format!(
                    "popped digest {:#018x} is missing from the node table",
                    item.digest
                );
                error!("{}", message);
                *shared.failure.lock().unwrap() = Some(message);
                shared.cancelled.store(true, Ordering::Relaxed);
                shared.queue.close();
                return;
            }
        };

        // single atomic check-and-insert; filters duplicate queue entries
        // and paths superseded by a cheaper one
        {
            let mut closed = shared.closed.lock().unwrap();
            if !closed.insert(item.digest) {
                drop(closed);
                shared.queue.task_done();
                continue;
            }
        }

        let explored = shared.counters.explored.fetch_add(1, Ordering::Relaxed) + 1;
        if id == 0 && explored % PROGRESS_INTERVAL == 0 {
            debug!(
                "explored {}, generated {}, open set ~{}",
                explored,
                shared.counters.generated.load(Ordering::Relaxed),
                shared.queue.len()
            );
        }

        if node.board.is_goal() {
            if shared
                .solution_found
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                // capacity 1 and the CAS gate mean this can never block
                let _ = solution_tx.send(item.digest);
            }
            return;
        }

        for (mov, successor) in node.board.successors() {
            if shared.cancelled.load(Ordering::Relaxed)
                || shared.solution_found.load(Ordering::Relaxed)
            {
                return;
            }

            let succ_digest = board_digest(&successor);
            if shared.closed.lock().unwrap().contains(&succ_digest) {
                continue;
            }

            let h = heuristic::estimate(&successor, &shared.config.heuristic);
            let succ = SearchNode::new(successor, node.g + 1, h, Some(item.digest), Some(mov));
            let f = succ.f;
            match shared.table.insert_or_improve(succ_digest, succ) {
                InsertOutcome::Inserted => {
                    shared.counters.generated.fetch_add(1, Ordering::Relaxed);
                    shared.queue.add(QueueItem::new(f, succ_digest, Some(mov)));
                }
                InsertOutcome::Improved => {
                    shared.queue.add(QueueItem::new(f, succ_digest, Some(mov)));
                }
                InsertOutcome::Ignored => {}
            }
        }

        shared.queue.task_done();
    }
}

/// Follows parent digests from the goal back to the root.
fn backtrack_path(table: &NodeTable, goal: u64) -> Moves {
    let mut moves = Moves::default();
    let mut digest = goal;
    while let Some(node) = table.lookup(digest) {
        match (node.parent, node.incoming) {
            (Some(parent), Some(mov)) => {
                moves.push(mov);
                digest = parent;
            }
            _ => break,
        }
    }
    moves.reverse();
    moves
}
