use std::collections::BTreeMap;

use crate::board::{
    Board,
    components::{PieceInfo, Square},
};

use super::{MoveMap, geometry};

/// Node in the transient move tree. `captured` is the piece jumped to reach
/// this node; None for the root and for plain steps.
#[derive(Debug, Clone)]
struct MoveNode {
    square: Square,
    captured: Option<PieceInfo>,
    children: BTreeMap<Square, MoveNode>,
}

impl MoveNode {
    fn new(square: Square, captured: Option<PieceInfo>) -> Self {
        Self {
            square,
            captured,
            children: BTreeMap::new(),
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Transient tree of every legal continuation for one piece. Built once per
/// selection, flattened into a [`MoveMap`], then dropped.
#[derive(Debug)]
pub(super) struct MoveTree {
    root: MoveNode,
}

impl MoveTree {
    pub(super) fn build(piece: PieceInfo, board: &Board) -> Self {
        let mut root = MoveNode::new(piece.square, None);
        Self::grow(&mut root, &piece, board, &[], false);
        Self { root }
    }

    /// Expands `node` depth first. `captured` holds the pieces jumped along
    /// the root -> node path; each branch extends its own copy, so sibling
    /// chains never share state. While any jump is available the node only
    /// gets jump children (mandatory continuation); plain steps appear only
    /// on a path that has not captured, and are never expanded further.
    ///
    /// Terminates: every jump child removes one more opponent from the pool
    /// its subtree may jump, and step children are leaves.
    fn grow(
        node: &mut MoveNode,
        piece: &PieceInfo,
        board: &Board,
        captured: &[PieceInfo],
        has_captured: bool,
    ) {
        let jumps = geometry::capture_targets(board, node.square, piece.side, piece.rank, captured);
        if !jumps.is_empty() {
            for (landing, victim) in jumps {
                let mut child = MoveNode::new(landing, Some(victim));
                let mut chain = captured.to_vec();
                chain.push(victim);
                Self::grow(&mut child, piece, board, &chain, true);
                node.children.insert(landing, child);
            }
        } else if !has_captured {
            for target in geometry::step_targets(board, node.square, piece.side, piece.rank) {
                node.children.insert(target, MoveNode::new(target, None));
            }
        }
        // No jumps left on a capturing path: the node is a valid stop.
    }

    /// Walks the tree into the destination -> capture-chain map.
    ///
    /// Under mandatory continuation only the tree's leaves are legal
    /// stopping points, so interior squares of a longer chain never appear
    /// as destinations. The root square is excluded.
    pub(super) fn flatten(&self) -> MoveMap {
        let mut map = MoveMap::new();
        Self::collect(&self.root, &[], &mut map, true);
        map
    }

    fn collect(node: &MoveNode, chain: &[PieceInfo], map: &mut MoveMap, is_root: bool) {
        if node.is_leaf() {
            if !is_root {
                map.insert(node.square, chain.to_vec());
            }
            return;
        }
        for child in node.children.values() {
            let mut extended = chain.to_vec();
            if let Some(victim) = child.captured {
                extended.push(victim);
            }
            Self::collect(child, &extended, map, false);
        }
    }
}
