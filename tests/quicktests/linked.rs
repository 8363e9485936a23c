use keyed_tree::{KeyedBinaryTree, Order, TreeError};

/// Builds a tree from `xs`, using each element as both key and value.
fn build(xs: &[i8]) -> Result<KeyedBinaryTree<i8, i8>, TreeError> {
    KeyedBinaryTree::from_level_order(xs.iter().copied(), xs.iter().copied())
}

fn walk(tree: &KeyedBinaryTree<i8, i8>, order: Order) -> Vec<(i8, i8)> {
    let mut pairs = Vec::new();
    tree.walk(order, &mut |k: &i8, v: &i8| pairs.push((*k, *v)));
    pairs
}

quickcheck::quickcheck! {
    fn every_order_visits_len_nodes(xs: Vec<i8>) -> bool {
        let Ok(tree) = build(&xs) else {
            return xs.is_empty();
        };

        Order::ALL.iter().all(|&order| walk(&tree, order).len() == tree.len())
    }
}

quickcheck::quickcheck! {
    fn every_order_visits_same_pairs(xs: Vec<i8>) -> bool {
        let Ok(tree) = build(&xs) else {
            return true;
        };

        let mut expected = xs.iter().map(|&x| (x, x)).collect::<Vec<_>>();
        expected.sort_unstable();
        Order::ALL.iter().all(|&order| {
            let mut pairs = walk(&tree, order);
            pairs.sort_unstable();
            pairs == expected
        })
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let Ok(tree) = build(&xs) else {
            return true;
        };

        xs.iter().all(|x| tree.contains(x) && tree.get(x) == Some(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let Ok(tree) = build(&xs) else {
            return nots.iter().all(|x| KeyedBinaryTree::<i8, i8>::new().get(x).is_none());
        };

        nots.iter()
            .filter(|x| !xs.contains(x))
            .all(|x| !tree.contains(x) && tree.get(x).is_none())
    }
}

quickcheck::quickcheck! {
    fn add_grows_by_one(xs: Vec<i8>, extra: Vec<i8>) -> bool {
        let Ok(mut tree) = build(&xs) else {
            return true;
        };

        extra.iter().all(|&x| {
            let before = tree.len();
            tree.add(x, x).is_ok() && tree.len() == before + 1
        })
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let Ok(mut tree) = build(&xs) else {
            return true;
        };
        for delete in &deletes {
            // Keys may repeat, so keep removing until none are left.
            while let Some(value) = tree.remove(delete) {
                assert_eq!(value, *delete);
            }
        }

        let mut still_present = xs;
        still_present.retain(|x| !deletes.contains(x));

        deletes.iter().all(|x| !tree.contains(x))
            && still_present.iter().all(|x| tree.get(x) == Some(x))
            && tree.len() == still_present.len()
    }
}

quickcheck::quickcheck! {
    fn removing_level_order_tail_keeps_prefix(xs: Vec<i8>) -> bool {
        // Removing the last element of the level order is always a plain leaf removal, so the
        // rest of the tree must read back unchanged.
        let Ok(mut tree) = build(&xs) else {
            return true;
        };
        let mut expected: Vec<(i8, i8)> = xs.iter().map(|&x| (x, x)).collect();

        while let Some((k, v)) = walk(&tree, Order::LevelOrder).last().copied() {
            if expected.iter().filter(|(ek, _)| *ek == k).count() > 1 {
                // A duplicate key would remove an earlier node instead.
                break;
            }
            if tree.remove(&k) != Some(v) {
                return false;
            }
            expected.pop();
            if walk(&tree, Order::LevelOrder) != expected {
                return false;
            }
        }
        true
    }
}
