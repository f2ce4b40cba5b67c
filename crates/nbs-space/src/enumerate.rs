use log::{debug, trace};
use nbs_core::{AdjacencyMatrix, INPUT_NODE, NUM_INTERMEDIATE_NODES, NUM_NODES, OUTPUT_NODE};

use crate::assemble::{assemble, ParentAssignment};
use crate::constraints::ConstraintTable;
use crate::parents::{binomial, parent_sets, ParentSet, ParentSets};
use crate::validity::is_admissible;

/// First node whose parents vary in loose-ends mode; nodes below it are pinned.
pub const FIRST_FREE_NODE: usize = 2;

/// Number of matrices produced by [`enumerate_with_loose_ends`].
pub fn count_with_loose_ends(table: &ConstraintTable) -> usize {
    if !table.has_input_stem() {
        return 0;
    }
    (FIRST_FREE_NODE..NUM_NODES)
        .map(|node| binomial(node, table.required(node)))
        .product()
}

/// Assignment shared by every loose-ends cell: node 0 has no parents, node 1 reads the input.
pub(crate) fn pinned_assignment() -> ParentAssignment {
    let mut assignment = ParentAssignment::new();
    assignment.insert(ParentSet::input_only());
    assignment
}

/// Enumerates the full cartesian space of per-node parent choices, loose ends included.
///
/// Node 0 has no parents and node 1 is wired to the input; tables that do
/// not ask for exactly this stem yield nothing. Every later node
/// ranges independently over its parent sets, the output node varying
/// fastest. The sequence is finite, deterministic and restarts from scratch
/// whenever this function is called again.
pub fn enumerate_with_loose_ends(table: &ConstraintTable) -> LooseEndsIter {
    LooseEndsIter {
        table: *table,
        cursors: std::array::from_fn(|node| parent_sets(node, table.required(node))),
        assignment: pinned_assignment(),
        started: false,
        exhausted: !table.has_input_stem(),
        yielded: 0,
    }
}

/// Iterator returned by [`enumerate_with_loose_ends`].
#[derive(Debug, Clone)]
pub struct LooseEndsIter {
    table: ConstraintTable,
    cursors: [ParentSets; NUM_NODES],
    assignment: ParentAssignment,
    started: bool,
    exhausted: bool,
    yielded: usize,
}

impl LooseEndsIter {
    fn finish(&mut self) -> Option<AdjacencyMatrix> {
        self.exhausted = true;
        debug!("loose-ends enumeration finished after {} cells", self.yielded);
        None
    }

    fn fresh_cursor(&self, node: usize) -> ParentSets {
        parent_sets(node, self.table.required(node))
    }
}

impl Iterator for LooseEndsIter {
    type Item = AdjacencyMatrix;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            for node in FIRST_FREE_NODE..NUM_NODES {
                match self.cursors[node].next() {
                    Some(set) => self.assignment.insert(set),
                    None => return self.finish(),
                }
            }
        } else {
            let mut node = OUTPUT_NODE;
            loop {
                if let Some(set) = self.cursors[node].next() {
                    self.assignment.insert(set);
                    break;
                }
                if node == FIRST_FREE_NODE {
                    return self.finish();
                }
                self.cursors[node] = self.fresh_cursor(node);
                if let Some(set) = self.cursors[node].next() {
                    self.assignment.insert(set);
                }
                node -= 1;
            }
        }
        self.yielded += 1;
        Some(assemble(&self.assignment))
    }
}

/// Enumerates every complete cell: exact fan-in everywhere, no loose end, and
/// every intermediate node on an input to output path.
///
/// Parent sets are chosen node by node in increasing index order with
/// backtracking. A partial assignment is abandoned as soon as an
/// intermediate node cannot be reached from the input, or when the
/// intermediate nodes still lacking a child outnumber the edges left to
/// place. Every finished assignment is re-checked against
/// [`is_admissible`] before it is yielded. Distinct assignments give
/// distinct matrices, so each complete cell appears exactly once. Tables
/// without the input stem (see [`ConstraintTable::has_input_stem`]) yield
/// nothing.
pub fn enumerate_without_loose_ends(table: &ConstraintTable) -> CompleteIter {
    CompleteIter {
        table: *table,
        cursors: Default::default(),
        assignment: ParentAssignment::new(),
        reachable: 1 << INPUT_NODE,
        depth: 1,
        exhausted: !table.has_input_stem(),
        yielded: 0,
        pruned: 0,
    }
}

/// Iterator returned by [`enumerate_without_loose_ends`].
#[derive(Debug, Clone)]
pub struct CompleteIter {
    table: ConstraintTable,
    cursors: [Option<ParentSets>; NUM_NODES],
    assignment: ParentAssignment,
    reachable: u8,
    depth: usize,
    exhausted: bool,
    yielded: usize,
    pruned: usize,
}

impl CompleteIter {
    /// Whether the assignment of nodes `1..=node` can still be completed.
    fn feasible(&self, node: usize) -> bool {
        if node <= NUM_INTERMEDIATE_NODES && self.reachable & (1 << node) == 0 {
            return false;
        }
        let consumed = (1..=node).fold(0u8, |acc, child| acc | self.assignment.mask(child));
        let childless = (1..=node.min(NUM_INTERMEDIATE_NODES))
            .filter(|parent| consumed & (1 << parent) == 0)
            .count();
        let edges_left: usize = (node + 1..NUM_NODES)
            .map(|later| self.table.required(later))
            .sum();
        childless <= edges_left
    }

    fn refresh_reachability(&mut self, node: usize) {
        let below = (1u8 << node) - 1;
        self.reachable &= below;
        if self.assignment.mask(node) & self.reachable != 0 {
            self.reachable |= 1 << node;
        }
    }
}

impl Iterator for CompleteIter {
    type Item = AdjacencyMatrix;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        loop {
            let node = self.depth;
            let required = self.table.required(node);
            let cursor = self.cursors[node].get_or_insert_with(|| parent_sets(node, required));
            let Some(set) = cursor.next() else {
                self.cursors[node] = None;
                self.assignment.clear(node);
                if node == 1 {
                    self.exhausted = true;
                    debug!(
                        "complete-cell enumeration finished: {} cells, {} branches pruned",
                        self.yielded, self.pruned
                    );
                    return None;
                }
                self.depth -= 1;
                continue;
            };
            self.assignment.insert(set);
            self.refresh_reachability(node);
            if !self.feasible(node) {
                self.pruned += 1;
                trace!("pruned branch at node {node} with parents {set}");
                continue;
            }
            if node < OUTPUT_NODE {
                self.depth = node + 1;
                continue;
            }
            let matrix = assemble(&self.assignment);
            if is_admissible(&matrix, &self.table) {
                self.yielded += 1;
                return Some(matrix);
            }
        }
    }
}
