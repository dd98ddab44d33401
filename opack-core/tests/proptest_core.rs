//! Property-Based Tests for OPACK Core
//!
//! Uses `proptest` to verify influence-graph and ring-buffer invariants under
//! random inputs.

use std::collections::HashMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use opack_core::history::ActionHistory;
use opack_core::influence::InfluenceGraph;
use opack_core::ring_buffer::RingBuffer;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// A vote: (influencer, candidate, is_positive).
fn arb_votes() -> impl Strategy<Value = Vec<(u8, u8, bool)>> {
    prop::collection::vec((0..4u8, 0..6u8, any::<bool>()), 0..64)
}

fn build_graph(votes: &[(u8, u8, bool)]) -> InfluenceGraph<u8, u8> {
    let mut ig = InfluenceGraph::new();
    for &(influencer, candidate, positive) in votes {
        if positive {
            ig.positive_influence(influencer, candidate);
        } else {
            ig.negative_influence(influencer, candidate);
        }
    }
    ig
}

// ---------------------------------------------------------------------------
// Property: score = #positive − #negative
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn scores_are_additive(votes in arb_votes()) {
        let ig = build_graph(&votes);

        let mut expected: HashMap<u8, i32> = HashMap::new();
        for &(_, candidate, positive) in &votes {
            *expected.entry(candidate).or_insert(0) += if positive { 1 } else { -1 };
        }

        for candidate in 0..6u8 {
            prop_assert_eq!(ig.score(&candidate), expected.get(&candidate).copied().unwrap_or(0));
        }
        prop_assert_eq!(ig.num_candidates(), expected.len());
    }
}

// ---------------------------------------------------------------------------
// Property: influence multisets record every vote
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn influences_record_every_vote(votes in arb_votes()) {
        let ig = build_graph(&votes);
        let positives = votes.iter().filter(|v| v.2).count();
        let negatives = votes.len() - positives;

        prop_assert_eq!(ig.positive_influences().values().map(Vec::len).sum::<usize>(), positives);
        prop_assert_eq!(ig.negative_influences().values().map(Vec::len).sum::<usize>(), negatives);
    }
}

// ---------------------------------------------------------------------------
// Property: compute returns a maximum-score candidate and eligibles is exactly
// the maximum-score set
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn compute_picks_a_maximum(votes in arb_votes(), seed in any::<u64>()) {
        let mut ig = build_graph(&votes);
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = ig.compute(&mut rng).copied();

        match ig.candidates().map(|(_, score)| score).max() {
            None => {
                prop_assert_eq!(picked, None);
            }
            Some(max) => {
                let picked = picked.expect("non-empty graph selects");
                prop_assert_eq!(ig.score(&picked), max);

                let mut best: Vec<u8> = ig
                    .candidates()
                    .filter(|&(_, score)| score == max)
                    .map(|(c, _)| *c)
                    .collect();
                let mut eligibles = ig.eligibles().to_vec();
                best.sort_unstable();
                eligibles.sort_unstable();
                prop_assert_eq!(eligibles, best);
                prop_assert!(ig.is_highest(&picked));
                prop_assert_eq!(ig.result(), Some(&picked));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property: only the last N pushes are retrievable, newest first
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn ring_buffer_keeps_last_n(
        capacity in 1..16usize,
        values in prop::collection::vec(any::<i32>(), 0..64),
    ) {
        let mut rb = RingBuffer::new(capacity);
        for &v in &values {
            rb.push(v);
        }

        prop_assert_eq!(rb.len(), capacity);
        prop_assert_eq!(rb.capacity(), capacity);
        prop_assert_eq!(rb.filled(), values.len().min(capacity));

        for n in 0..capacity.min(values.len()) {
            prop_assert_eq!(*rb.peek(n), values[values.len() - 1 - n]);
        }
        for n in values.len()..capacity {
            prop_assert_eq!(*rb.peek(n), 0);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: forward iteration == peek(0..N), reverse iteration is its mirror
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn ring_buffer_iteration_matches_peek(
        capacity in 1..16usize,
        values in prop::collection::vec(any::<u16>(), 0..64),
    ) {
        let mut rb = RingBuffer::new(capacity);
        for &v in &values {
            rb.push(v);
        }

        let forward: Vec<u16> = rb.iter().copied().collect();
        let peeked: Vec<u16> = (0..capacity).map(|n| *rb.peek(n)).collect();
        prop_assert_eq!(&forward, &peeked);

        let mut backward: Vec<u16> = rb.iter().rev().copied().collect();
        backward.reverse();
        prop_assert_eq!(forward, backward);
    }
}

// ---------------------------------------------------------------------------
// Property: history length never exceeds capacity
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn history_is_bounded(
        capacity in 0..8usize,
        actions in prop::collection::vec(0..5u8, 0..32),
    ) {
        let mut history = ActionHistory::new(capacity);
        for &a in &actions {
            history.record(a);
        }
        let effective = capacity.max(1);
        prop_assert_eq!(history.capacity(), effective);
        prop_assert_eq!(history.len(), actions.len().min(effective));
        prop_assert_eq!(history.last(), actions.last());
    }
}
