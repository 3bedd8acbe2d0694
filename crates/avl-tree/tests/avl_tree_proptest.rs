use std::collections::BTreeSet;

use avl_tree::AvlTree;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    Remove(i16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i16>().prop_map(|v| Op::Insert(v % 256)),
        2 => any::<i16>().prop_map(|v| Op::Remove(v % 256)),
    ]
}

fn height_bound(n: usize) -> f64 {
    1.44 * ((n + 2) as f64).log2() - 0.328
}

proptest! {
    #[test]
    fn matches_ordered_set_model(ops in prop::collection::vec(op(), 0..400)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(v) => prop_assert_eq!(tree.insert(v), model.insert(v)),
                Op::Remove(v) => prop_assert_eq!(tree.remove(&v), model.remove(&v)),
            }
        }

        prop_assert!(tree.assert_valid().is_ok());
        prop_assert!(tree.is_balanced());
        prop_assert_eq!(tree.len(), model.len());
        prop_assert_eq!(tree.inorder_traversal(), model.iter().copied().collect::<Vec<_>>());
        prop_assert!(f64::from(tree.height()) <= height_bound(tree.len()));
        if model.is_empty() {
            prop_assert_eq!(tree.height(), -1);
        }
    }

    #[test]
    fn traversals_cover_every_value(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let tree: AvlTree<i32> = values.iter().copied().collect();
        let distinct: BTreeSet<i32> = values.iter().copied().collect();

        let pre = tree.preorder_traversal();
        let ino = tree.inorder_traversal();
        let post = tree.postorder_traversal();
        prop_assert_eq!(pre.len(), distinct.len());
        prop_assert_eq!(ino.len(), distinct.len());
        prop_assert_eq!(post.len(), distinct.len());
        prop_assert!(ino.windows(2).all(|w| w[0] < w[1]));

        let mut pre_sorted = pre.clone();
        pre_sorted.sort();
        prop_assert_eq!(&pre_sorted, &ino);
        let mut post_sorted = post.clone();
        post_sorted.sort();
        prop_assert_eq!(&post_sorted, &ino);

        // Repeated calls on an unmodified tree agree.
        prop_assert_eq!(tree.preorder_traversal(), pre);
        prop_assert_eq!(tree.postorder_traversal(), post);
        prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ino);
    }

    #[test]
    fn insert_is_idempotent(values in prop::collection::vec(any::<i32>(), 1..100), pick in any::<prop::sample::Index>()) {
        let mut tree: AvlTree<i32> = values.iter().copied().collect();
        let x = values[pick.index(values.len())];
        let pre = tree.preorder_traversal();
        let height = tree.height();

        prop_assert!(!tree.insert(x));
        prop_assert_eq!(tree.preorder_traversal(), pre);
        prop_assert_eq!(tree.height(), height);
    }

    #[test]
    fn remove_only_affects_its_value(values in prop::collection::vec(0i32..1000, 1..150), x in 0i32..1000) {
        let mut tree: AvlTree<i32> = values.iter().copied().collect();
        tree.insert(x);
        prop_assert!(tree.search(&x));

        prop_assert!(tree.remove(&x));
        prop_assert!(!tree.search(&x));
        for y in values.iter().filter(|y| **y != x) {
            prop_assert!(tree.search(y));
        }
        prop_assert!(tree.assert_valid().is_ok());
    }
}
