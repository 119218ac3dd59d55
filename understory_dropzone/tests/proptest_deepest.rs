// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for depth ordering of drop hits.
//!
//! 1. In a nested chain, the innermost element wins whatever the input order.
//! 2. `None` entries never change the winning element.
//! 3. In any tree, a descendant beats its ancestor in either order.
//! 4. The winner is always a `Some` entry, and there is none only for all-`None` input.

use proptest::prelude::*;
use proptest::sample::Index;
use understory_dropzone::resolve::index_of_deepest;
use understory_pointer::{ElementArena, ElementId, ElementSpec, path_to_root};

/// `body > div > div > ...`, returning the nested divs outermost first.
fn chain(depth: usize) -> (ElementArena, Vec<ElementId>) {
    let mut tree = ElementArena::new();
    let mut parent = tree.insert(None, ElementSpec::tag("body"));
    let mut nodes = Vec::with_capacity(depth);
    for _ in 0..depth {
        parent = tree.insert(Some(parent), ElementSpec::tag("div"));
        nodes.push(parent);
    }
    (tree, nodes)
}

/// A single-rooted tree where node `i + 1` hangs under a random earlier node.
fn random_tree(parents: &[Index]) -> (ElementArena, Vec<ElementId>) {
    let mut tree = ElementArena::new();
    let mut nodes = vec![tree.insert(None, ElementSpec::tag("body"))];
    for (i, parent) in parents.iter().enumerate() {
        let p = nodes[parent.index(i + 1)];
        nodes.push(tree.insert(Some(p), ElementSpec::tag("div")));
    }
    (tree, nodes)
}

fn shuffled_chain() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1_usize..10).prop_flat_map(|depth| {
        (
            Just(depth),
            Just((0..depth).collect::<Vec<_>>()).prop_shuffle(),
        )
    })
}

proptest! {
    #[test]
    fn innermost_wins_in_any_order((depth, order) in shuffled_chain()) {
        let (tree, nodes) = chain(depth);
        let input: Vec<_> = order.iter().map(|&i| Some(nodes[i])).collect();
        let winner = index_of_deepest(&tree, &input).map(|i| input[i]);
        prop_assert_eq!(winner, Some(Some(nodes[depth - 1])));
    }

    #[test]
    fn nones_do_not_change_the_winner(
        (depth, order) in shuffled_chain(),
        gaps in prop::collection::vec(any::<bool>(), 0..20),
    ) {
        let (tree, nodes) = chain(depth);
        let dense: Vec<_> = order.iter().map(|&i| Some(nodes[i])).collect();
        let mut sparse = Vec::new();
        let mut gaps = gaps.into_iter();
        for el in &dense {
            if gaps.next().unwrap_or(false) {
                sparse.push(None);
            }
            sparse.push(*el);
        }
        let a = index_of_deepest(&tree, &dense).map(|i| dense[i]);
        let b = index_of_deepest(&tree, &sparse).map(|i| sparse[i]);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn descendant_beats_ancestor(
        parents in prop::collection::vec(any::<Index>(), 1..40),
        pick in any::<Index>(),
        up in any::<Index>(),
    ) {
        let (tree, nodes) = random_tree(&parents);
        // Any non-root node and one of its strict ancestors.
        let node = nodes[1 + pick.index(nodes.len() - 1)];
        let path = path_to_root(&tree, node);
        let ancestor = path[up.index(path.len() - 1)];

        prop_assert_eq!(index_of_deepest(&tree, &[Some(ancestor), Some(node)]), Some(1));
        prop_assert_eq!(index_of_deepest(&tree, &[Some(node), Some(ancestor)]), Some(0));
    }

    #[test]
    fn winner_is_a_present_entry(
        parents in prop::collection::vec(any::<Index>(), 1..40),
        picks in prop::collection::vec(prop::option::of(any::<Index>()), 0..12),
    ) {
        let (tree, nodes) = random_tree(&parents);
        let input: Vec<_> = picks.iter().map(|p| p.map(|i| nodes[i.index(nodes.len())])).collect();
        match index_of_deepest(&tree, &input) {
            Some(i) => prop_assert!(input[i].is_some()),
            None => prop_assert!(input.iter().all(Option::is_none)),
        }
    }
}
