//! Integration tests for the persistent list behind `Value::List`

use proptest::prelude::*;
use regmach_foundation::Seq;

#[test]
fn push_front_shares_structure() {
    let tail: Seq<i32> = [2, 3].into_iter().collect();
    let list = tail.push_front(1);

    assert_eq!(tail.len(), 2);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(list.rest(), Some(tail));
}

#[test]
fn empty_list() {
    let empty: Seq<i32> = Seq::new();
    assert!(empty.is_empty());
    assert_eq!(empty.first(), None);
    assert_eq!(empty.rest(), None);
}

proptest! {
    #[test]
    fn first_and_rest_rebuild_the_list(items in prop::collection::vec(any::<i32>(), 1..50)) {
        let list: Seq<i32> = items.iter().copied().collect();
        let first = *list.first().unwrap();
        let rest = list.rest().unwrap();
        prop_assert_eq!(rest.push_front(first), list);
        prop_assert_eq!(rest.len(), items.len() - 1);
    }
}
