//! Shared helpers: a `BTreeMap` model of the weighted tree, and random action generation.

#![allow(dead_code)]

use std::collections::BTreeMap;

use rand::{self, Rng};
use weighted_grove::*;

/// One mutation or query to perform on both the tree and the model.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TreeAction {
    Add { key: i32, weight: u32 },
    Remove { key: i32 },
    SetWeight { key: i32, weight: u32 },
    Query { key: i32 },
}

/// Installs a logger that prints through the test harness. Safe to call repeatedly.
pub fn init_logger() {
    let _ = simplelog::TestLogger::init(log::LevelFilter::Trace, simplelog::Config::default());
}

pub const KEY_RANGE: i32 = 300;
pub const MAX_WEIGHT: u32 = 50;

pub fn random_action(rng: &mut impl Rng) -> TreeAction {
    use TreeAction::*;
    let key = rng.gen_range(0..KEY_RANGE);
    match rng.gen_range(0..8) {
        0..=3 => Add {
            key,
            weight: rng.gen_range(0..=MAX_WEIGHT),
        },
        4 | 5 => Remove { key },
        6 => SetWeight {
            key,
            weight: rng.gen_range(0..=MAX_WEIGHT),
        },
        _ => Query { key },
    }
}

/// Applies `action` to both structures and checks that they report the same outcome.
pub fn apply_action<C, R>(
    tree: &mut WeightedTree<i32, C, R>,
    model: &mut BTreeMap<i32, u32>,
    action: &TreeAction,
) -> std::result::Result<(), String>
where
    C: Comparator<i32>,
{
    use TreeAction::*;
    let (got, expected) = match *action {
        Add { key, weight } => {
            let expected = !model.contains_key(&key);
            if expected {
                model.insert(key, weight);
            }
            (tree.add_weighted(key, weight), expected)
        }
        Remove { key } => (tree.remove(&key), model.remove(&key).is_some()),
        SetWeight { key, weight } => {
            let previous = model.get_mut(&key).map(|w| std::mem::replace(w, weight));
            let got = tree.set_weight(&key, weight);
            if got != previous {
                return Err(format!("{:?}: got {:?}, expected {:?}", action, got, previous));
            }
            return Ok(());
        }
        Query { key } => {
            let expected = model.get(&key).copied();
            let got = tree.weight(&key);
            if got != expected {
                return Err(format!("{:?}: got {:?}, expected {:?}", action, got, expected));
            }
            (tree.contains(&key), expected.is_some())
        }
    };
    if got != expected {
        return Err(format!("{:?}: got {}, expected {}", action, got, expected));
    }
    Ok(())
}

/// Checks the invariants, plus contents and total weight against the model.
pub fn check_against_model<C, R>(
    tree: &WeightedTree<i32, C, R>,
    model: &BTreeMap<i32, u32>,
) -> std::result::Result<(), String>
where
    C: Comparator<i32>,
{
    tree.assert_correctness();
    let contents: Vec<(i32, u32)> = tree.iter().map(|(k, w)| (*k, w)).collect();
    let expected: Vec<(i32, u32)> = model.iter().map(|(k, w)| (*k, *w)).collect();
    if contents != expected {
        return Err(format!("contents differ: {:?} vs {:?}", contents, expected));
    }
    let total: u64 = model.values().map(|&w| w as u64).sum();
    if tree.total_weight() != total {
        return Err(format!(
            "total weight {} but the weights sum to {}",
            tree.total_weight(),
            total
        ));
    }
    Ok(())
}

/// The largest height a red-black tree of `len` nodes may have, in edges.
pub fn height_bound(len: usize) -> usize {
    (2.0 * ((len + 1) as f64).log2()).floor() as usize
}

/// Runs random rounds against the model, checking everything after each one.
pub fn check_random_rounds(rounds: usize) {
    let mut rng = rand::thread_rng();
    let mut tree: WeightedTree<i32> = WeightedTree::new();
    let mut model = BTreeMap::new();
    for _ in 0..rounds {
        let action = random_action(&mut rng);
        apply_action(&mut tree, &mut model, &action).unwrap();
        check_against_model(&tree, &model).unwrap();
        assert!(tree.height() <= height_bound(tree.len()));
    }
}
