use std::collections::HashMap;

use super::*;
use itertools::Itertools;

/// Apply all operations to both a trie and a hash map.
fn build(ops: Vec<Operation<TestPrefix, i32>>) -> (Trie<TestPrefix, i32>, HashMap<TestPrefix, i32>) {
    let mut trie = Trie::new();
    let mut model = HashMap::new();
    for op in ops {
        match op {
            Operation::Add(k, t) => {
                assert_eq!(trie.insert(k, t), model.insert(k, t));
            }
            Operation::Remove(k) => {
                assert_eq!(trie.remove(&k), model.remove(&k));
            }
        }
    }
    (trie, model)
}

/// Longest stored prefix covering `query`, found by scanning every entry.
fn naive_best(model: &HashMap<TestPrefix, i32>, query: &TestPrefix) -> Option<(TestPrefix, i32)> {
    model
        .iter()
        .filter(|(k, _)| k.contains(query))
        .max_by_key(|(k, _)| k.1)
        .map(|(k, t)| (*k, *t))
}

qc!(insert, _insert);
fn _insert(list: Vec<(TestPrefix, i32)>) -> bool {
    let mut trie = Trie::new();
    let mut model = HashMap::new();
    for (k, t) in list {
        if trie.insert(k, t) != model.insert(k, t) {
            return false;
        }
    }
    trie.well_formed() && model.iter().all(|(k, t)| trie.search_exact(k) == Some(t))
}

qc!(mods_exact, _mods_exact);
fn _mods_exact((ops, queries): (Vec<Operation<TestPrefix, i32>>, Vec<TestPrefix>)) -> bool {
    let (trie, model) = build(ops);
    trie.well_formed()
        && trie.is_empty() == model.is_empty()
        && model.iter().all(|(k, t)| trie.search_exact(k) == Some(t))
        && queries
            .iter()
            .all(|q| trie.search_exact(q) == model.get(q))
}

qc!(mods_best, _mods_best);
fn _mods_best((ops, queries): (Vec<Operation<TestPrefix, i32>>, Vec<TestPrefix>)) -> bool {
    let (trie, model) = build(ops);
    queries.iter().chain(model.keys()).all(|q| {
        trie.search_best_entry(q).map(|(k, t)| (*k, *t)) == naive_best(&model, q)
    })
}

qc!(remove_all_empties, _remove_all_empties);
fn _remove_all_empties(ops: Vec<Operation<TestPrefix, i32>>) -> bool {
    let (mut trie, model) = build(ops);
    for k in model.keys().sorted() {
        if trie.remove(k).is_none() || !trie.well_formed() {
            return false;
        }
    }
    trie.is_empty() && reachable(&trie) == 1
}

/// Number of nodes reachable from the root.
fn reachable(trie: &Trie<TestPrefix, i32>) -> usize {
    let mut count = 0;
    let mut stack = vec![0];
    while let Some(idx) = stack.pop() {
        count += 1;
        stack.extend(trie.table[idx].left);
        stack.extend(trie.table[idx].right);
    }
    count
}

qc!(destroy_releases_all, _destroy_releases_all);
fn _destroy_releases_all(ops: Vec<Operation<TestPrefix, i32>>) -> bool {
    let (trie, model) = build(ops);
    let mut released = Vec::new();
    trie.destroy(|t: i32| released.push(t));
    released.sort();
    released == model.into_values().sorted().collect::<Vec<_>>()
}
