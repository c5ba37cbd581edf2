//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! The TLV stack (C3): the path of dictionary nodes from root to the leaf
//! under encoding, rebuilt whenever the input cursor advances to a new AVP.
//!
//! Modeled as a fixed-size array rather than a `Vec`, per the "avoid heap
//! allocation in the hot path" design note in `spec.md` §9 — the same
//! reasoning the teacher applies when it reaches for a bounded array instead
//! of a growable collection in per-packet hot paths.

use crate::dictionary::{Dict, MAX_TLV_STACK};
use crate::error::{EncodeError, EncodeResult};

// The descriptor path from root (index 0) to leaf (index `depth`).
#[derive(Clone, Copy, Debug)]
pub struct Stack {
    nodes: [Option<&'static Dict>; MAX_TLV_STACK + 1],
    depth: usize,
}

impl Stack {
    /// Walks `leaf`'s `parent` chain to build the root-to-leaf path.
    pub fn build(leaf: &'static Dict) -> EncodeResult<Stack> {
        if leaf.depth > MAX_TLV_STACK {
            return Err(EncodeError::StackOverflow);
        }

        let mut nodes = [None; MAX_TLV_STACK + 1];
        let mut cur = Some(leaf);
        let mut depth = leaf.depth;
        loop {
            let node = cur.ok_or(EncodeError::StackOverflow)?;
            nodes[depth] = Some(node);
            cur = node.parent;
            if depth == 0 {
                break;
            }
            depth -= 1;
        }

        Ok(Stack {
            nodes,
            depth: leaf.depth,
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn root(&self) -> &'static Dict {
        self.nodes[0].expect("stack root always populated by build()")
    }

    pub fn leaf(&self) -> &'static Dict {
        self.nodes[self.depth]
            .expect("stack leaf always populated by build()")
    }

    pub fn at(&self, depth: usize) -> Option<&'static Dict> {
        self.nodes.get(depth).copied().flatten()
    }

    /// The node one level beneath `depth`, if the stack extends that far.
    pub fn child_of(&self, depth: usize) -> Option<&'static Dict> {
        self.at(depth + 1)
    }

    /// True if this stack's node at `depth` is the very same descriptor as
    /// `dict` — used by the TLV/VSA packing loops to detect "sibling AVP
    /// belongs to a different parent, stop packing" (`spec.md` §4.4).
    pub fn matches_at(&self, depth: usize, dict: &'static Dict) -> bool {
        self.at(depth).is_some_and(|node| std::ptr::eq(node, dict))
    }
}
