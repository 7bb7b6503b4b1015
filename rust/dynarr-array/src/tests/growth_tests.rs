use crate::{DynArray, dyn_array};

/// Pushes `count` values and returns the number of elements relocated by
/// the growth steps, derived from the observed capacity transitions.
fn relocations_for_pushes(count: usize) -> (usize, usize) {
    let mut v = DynArray::new();
    let mut relocated = 0;
    let mut transitions = 0;
    for i in 0..count {
        let before = v.capacity();
        let len = v.len();
        v.push_back(i);
        if v.capacity() != before {
            relocated += len;
            transitions += 1;
        }
    }
    (relocated, transitions)
}

#[test]
fn test_push_back_capacity_sequence() {
    let mut v = DynArray::new();
    for n in 1..=200usize {
        v.push_back(n);
        let expected = n.next_power_of_two().max(DynArray::<usize>::INITIAL_CAPACITY);
        assert_eq!(v.capacity(), expected, "after {n} pushes");
        assert!(v.capacity() >= v.len());
    }
}

#[test]
fn test_first_growth_uses_initial_capacity() {
    let mut v = DynArray::new();
    v.push_back('a');
    assert_eq!(v.capacity(), 2);
    v.push_back('b');
    assert_eq!(v.capacity(), 2);
    v.push_back('c');
    assert_eq!(v.capacity(), 4);
}

#[test]
fn test_growth_doubles_odd_capacity() {
    let mut v = dyn_array![1, 2, 3];
    assert_eq!(v.capacity(), 3);
    v.push_back(4);
    assert_eq!(v.capacity(), 6);

    let mut w = DynArray::<i32>::with_capacity(5);
    w.extend(0..5);
    w.insert(2, 100).unwrap();
    assert_eq!(w.capacity(), 10);
}

#[test]
fn test_relocation_cost_is_linear() {
    for count in [0, 1, 2, 3, 10, 1000, 100_000] {
        let (relocated, transitions) = relocations_for_pushes(count);
        assert!(
            relocated <= 2 * count,
            "{count} pushes relocated {relocated} elements"
        );
        let bound = (usize::BITS - count.leading_zeros()) as usize + 1;
        assert!(
            transitions <= bound,
            "{count} pushes caused {transitions} reallocations"
        );
    }
}

#[test]
fn test_relocation_preserves_contents() {
    let mut v = DynArray::new();
    for i in 0..1000u32 {
        v.push_back(i.to_string());
    }
    for (i, s) in v.iter().enumerate() {
        assert_eq!(s, &i.to_string());
    }
}

#[test]
fn test_zero_sized_elements() {
    let mut v = DynArray::new();
    for _ in 0..100 {
        v.push_back(());
    }
    assert_eq!(v.len(), 100);
    assert_eq!(v.capacity(), 128);
    v.insert(50, ()).unwrap();
    assert_eq!(v.erase(0).unwrap(), ());
    v.erase_range(10, 20).unwrap();
    assert_eq!(v.len(), 90);
    assert_eq!(v.pop_back(), Some(()));
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 89);
    assert_eq!(v.clone().into_iter().count(), 89);
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn test_reserve_beyond_max_size_panics() {
    let mut v = DynArray::<u64>::new();
    let too_many = v.max_size() + 1;
    v.reserve(too_many);
}
