mod common;
use common::*;

use std::collections::{BTreeMap, VecDeque};

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use weighted_grove::compare::Reversed;
use weighted_grove::*;

#[test]
fn random_rounds_match_the_model() {
    init_logger();
    check_random_rounds(3_000);
}

#[test]
fn ascending_seven_is_balanced_and_samples_the_middle() {
    let mut tree: WeightedTree<i32, Natural, StepRng> =
        WeightedTree::with_rng(StepRng::new(1 << 63, 0));
    for key in 1..=7 {
        assert!(tree.add(key));
    }
    tree.assert_correctness();
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.total_weight(), 7);
    assert_eq!(tree.sample(), Some(&4));
}

#[test]
fn sampling_follows_the_weights() {
    let mut tree = WeightedTree::with_config(TreeConfig::default().with_seed(0x5eed));
    tree.add_weighted('A', 1);
    tree.add_weighted('B', 3);

    let (mut a, mut b) = (0u32, 0u32);
    for _ in 0..100_000 {
        match tree.sample() {
            Some('A') => a += 1,
            Some('B') => b += 1,
            other => panic!("unexpected sample {:?}", other),
        }
    }
    let ratio = b as f64 / a as f64;
    assert!((2.85..3.15).contains(&ratio), "ratio was {}", ratio);
}

#[test]
fn every_sampled_element_has_positive_weight() {
    let mut tree: WeightedTree<u32, _, _> = WeightedTree::with_rng(StdRng::seed_from_u64(11));
    tree.extend((0..100).map(|key| (key, key % 3)));
    for key in (0..100).step_by(7) {
        tree.set_weight(&key, 0);
    }
    for _ in 0..2_000 {
        let key = *tree.sample().unwrap();
        assert!(tree.weight(&key).unwrap() > 0, "sampled {}", key);
    }

    for key in 0..100 {
        tree.set_weight(&key, 0);
    }
    assert_eq!(tree.total_weight(), 0);
    assert_eq!(tree.sample(), None);
}

#[test]
fn seeded_trees_sample_identically() {
    let build = || {
        let config = TreeConfig::default()
            .with_seed(42)
            .with_initial_capacity(64);
        let mut tree: WeightedTree<u16> = WeightedTree::with_config(config);
        tree.extend((0..64u16).map(|key| (key, 1 + key as u32)));
        tree
    };
    let (mut first, mut second) = (build(), build());
    for _ in 0..500 {
        assert_eq!(first.sample(), second.sample());
    }
}

#[test]
fn reseeding_replays_the_samples() {
    let mut tree: WeightedTree<u16> = WeightedTree::with_config(TreeConfig::default().with_seed(8));
    tree.extend((0..32u16).map(|key| (key, 1 + key as u32)));
    let draws = |tree: &mut WeightedTree<u16>| -> Vec<u16> {
        (0..50).map(|_| *tree.sample().unwrap()).collect()
    };
    let first = draws(&mut tree);
    *tree.rng_mut() = StdRng::seed_from_u64(8);
    assert_eq!(draws(&mut tree), first);
}

#[test]
fn weights_near_the_limit_keep_totals_exact() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut tree: WeightedTree<i32> = WeightedTree::new();
    let mut model = BTreeMap::new();
    let heavy = [u32::MAX, u32::MAX - 1, 1, 0];
    for _ in 0..5_000 {
        let key = rng.gen_range(0..64);
        let weight = heavy[rng.gen_range(0..heavy.len())];
        let action = match rng.gen_range(0..3) {
            0 => TreeAction::Add { key, weight },
            1 => TreeAction::Remove { key },
            _ => TreeAction::SetWeight { key, weight },
        };
        apply_action(&mut tree, &mut model, &action).unwrap();
        check_against_model(&tree, &model).unwrap();
    }
}

#[test]
fn height_stays_logarithmic() {
    let mut tree: WeightedTree<u32> = WeightedTree::new();
    for key in 0..4096 {
        tree.add(key);
    }
    assert!(tree.height() <= height_bound(tree.len()));
    for key in (0..4096).filter(|key| key % 4 != 0) {
        assert!(tree.remove(&key));
    }
    tree.assert_correctness();
    assert_eq!(tree.len(), 1024);
    assert!(tree.height() <= height_bound(tree.len()));
}

#[test]
fn insert_then_remove_restores_the_tree() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut tree: WeightedTree<i32> = WeightedTree::new();
    for _ in 0..200 {
        tree.add_weighted(rng.gen_range(0..1_000) * 2, rng.gen_range(0..10));
    }
    let snapshot: Vec<(i32, u32)> = tree.iter().map(|(k, w)| (*k, w)).collect();
    let total = tree.total_weight();

    for _ in 0..100 {
        let odd = rng.gen_range(0..1_000) * 2 + 1;
        assert!(tree.add_weighted(odd, rng.gen_range(0..10)));
        assert!(tree.remove(&odd));
        tree.assert_correctness();
    }
    itertools::assert_equal(tree.iter().map(|(k, w)| (*k, w)), snapshot);
    assert_eq!(tree.total_weight(), total);
}

#[test]
fn duplicate_insert_changes_nothing() {
    let mut tree: WeightedTree<&str> = [("x", 4), ("y", 2), ("z", 9)].into_iter().collect();
    assert!(!tree.add_weighted("y", 100));
    assert!(!tree.add("z"));
    tree.assert_correctness();
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.weight(&"y"), Some(2));
    assert_eq!(tree.total_weight(), 15);
}

#[test]
fn missing_keys_are_not_errors() {
    let mut tree: WeightedTree<i32> = (0..10).collect();
    assert!(!tree.remove(&42));
    assert_eq!(tree.take(&-1), None);
    assert_eq!(tree.weight(&10), None);
    assert_eq!(tree.set_weight(&10, 3), None);
    assert_eq!(tree.total_weight(), 10);
    assert_eq!(tree.take(&3), Some(3));
    assert_eq!(tree.first(), Some(&0));
    assert_eq!(tree.last(), Some(&9));
}

#[test]
fn custom_orders() {
    let mut by_len = WeightedTree::with_compare_fn(|a: &String, b: &String| {
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    });
    for word in ["pear", "fig", "banana", "kiwi", "apple"] {
        by_len.add(word.to_string());
    }
    by_len.assert_correctness();
    let words: Vec<&str> = by_len.iter().map(|(w, _)| w.as_str()).collect();
    assert_eq!(words, vec!["fig", "kiwi", "pear", "apple", "banana"]);

    let mut descending: WeightedTree<i32, _> = WeightedTree::with_comparator(Reversed(Natural));
    descending.extend([3, 1, 4, 1, 5, 9, 2, 6]);
    descending.assert_correctness();
    assert_eq!(descending.len(), 7);
    assert_eq!(descending.first(), Some(&9));
    assert_eq!(descending.last(), Some(&1));
}

#[test]
fn debug_lists_elements_with_weights() {
    let tree: WeightedTree<char> = [('b', 2), ('a', 1)].into_iter().collect();
    assert_eq!(format!("{:?}", tree), "{'a': 1, 'b': 2}");
}

#[test]
fn priority_map_drains_in_order() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut map = PriorityMap::with_arity(3).unwrap();
    let mut model = BTreeMap::new();
    for _ in 0..500 {
        let key = rng.gen_range(0..100u32);
        let value = rng.gen_range(0..1_000u32);
        assert_eq!(map.put(key, value), model.insert(key, value));
    }
    assert_eq!(map.len(), model.len());

    let mut previous = 0;
    while let Some((key, value)) = map.pop() {
        assert!(value >= previous);
        assert_eq!(model.remove(&key), Some(value));
        previous = value;
    }
    assert!(model.is_empty());
}

#[test]
fn circular_queue_keeps_the_latest() {
    let mut queue = CircularQueue::new(5).unwrap();
    let mut model = VecDeque::new();
    for i in 0..37 {
        if i % 4 == 3 {
            assert_eq!(queue.poll(), model.pop_front());
            continue;
        }
        if model.len() == 5 {
            model.pop_front();
        }
        model.push_back(i);
        queue.push(i);
        assert!(queue.iter().eq(model.iter()));
    }
}

#[test]
fn min_heap_as_dijkstra_frontier() {
    // 0 -> 1 (4), 0 -> 2 (1), 2 -> 1 (2), 1 -> 3 (1), 2 -> 3 (5)
    let edges: [&[(usize, f64)]; 4] = [
        &[(1, 4.0), (2, 1.0)],
        &[(3, 1.0)],
        &[(1, 2.0), (3, 5.0)],
        &[],
    ];
    let mut dist = [f64::INFINITY; 4];
    let mut frontier = MinHeap::new(4);
    dist[0] = 0.0;
    frontier.insert(0, 0.0).unwrap();
    while let Some(node) = frontier.pop() {
        for &(next, cost) in edges[node] {
            let candidate = dist[node] + cost;
            if candidate < dist[next] {
                dist[next] = candidate;
                if frontier.contains(next).unwrap() {
                    frontier.update(next, candidate).unwrap();
                } else {
                    frontier.insert(next, candidate).unwrap();
                }
            }
        }
    }
    assert_eq!(dist, [0.0, 3.0, 1.0, 4.0]);
}

#[test]
fn disjoint_sets_track_components() {
    let mut forest = DisjointSetForest::new(10);
    for (x, y) in [(0, 1), (1, 2), (5, 6), (7, 8), (8, 9), (9, 7)] {
        forest.union(x, y).unwrap();
    }
    assert_eq!(forest.set_count(), 5);
    assert!(forest.same_set(0, 2).unwrap());
    assert!(!forest.same_set(2, 5).unwrap());
    assert!(forest.same_set(7, 9).unwrap());
    assert!(forest.same_set(3, 10).is_err());
}

#[test]
fn indexable_set_samples_uniformly() {
    let set: IndexableSet<u8> = (0..4).collect();
    let mut rng = StdRng::seed_from_u64(1);
    let mut counts = [0u32; 4];
    for _ in 0..40_000 {
        counts[*set.sample(&mut rng).unwrap() as usize] += 1;
    }
    for count in counts {
        assert!((9_000..11_000).contains(&count), "count was {}", count);
    }
}
