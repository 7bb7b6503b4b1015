use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crate::DynArray;

/// Element that records its id when dropped and can be told to panic on
/// clone after a number of successful clones.
struct Tracked {
    id: usize,
    ledger: Rc<Ledger>,
}

#[derive(Default)]
struct Ledger {
    next_id: Cell<usize>,
    dropped: RefCell<Vec<usize>>,
    clones_before_panic: Cell<Option<usize>>,
}

impl Ledger {
    fn make(self: &Rc<Self>) -> Tracked {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Tracked {
            id,
            ledger: self.clone(),
        }
    }

    fn drops(&self) -> usize {
        self.dropped.borrow().len()
    }

    fn assert_no_double_drop(&self) {
        let mut ids = self.dropped.borrow().clone();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total, "an element was dropped twice");
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if let Some(left) = self.ledger.clones_before_panic.get() {
            if left == 0 {
                panic!("clone failed");
            }
            self.ledger.clones_before_panic.set(Some(left - 1));
        }
        self.ledger.make()
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.dropped.borrow_mut().push(self.id);
    }
}

fn filled(ledger: &Rc<Ledger>, count: usize) -> DynArray<Tracked> {
    (0..count).map(|_| ledger.make()).collect()
}

#[test]
fn test_drop_releases_every_live_element() {
    let ledger = Rc::new(Ledger::default());
    let v = filled(&ledger, 5);
    assert_eq!(ledger.drops(), 0);
    drop(v);
    assert_eq!(ledger.drops(), 5);
    ledger.assert_no_double_drop();

    let empty = DynArray::<Tracked>::new();
    drop(empty);
}

#[test]
fn test_growth_moves_without_dropping() {
    let ledger = Rc::new(Ledger::default());
    let mut v = DynArray::new();
    for _ in 0..100 {
        v.push_back(ledger.make());
    }
    v.reserve(500);
    v.shrink_to_fit();
    assert_eq!(ledger.drops(), 0);
    drop(v);
    assert_eq!(ledger.drops(), 100);
    ledger.assert_no_double_drop();
}

#[test]
fn test_shrinking_operations_drop_exactly_the_removed_elements() {
    let ledger = Rc::new(Ledger::default());
    let mut v = filled(&ledger, 10);

    let last = v.pop_back().unwrap();
    assert_eq!(ledger.drops(), 0);
    drop(last);
    assert_eq!(ledger.drops(), 1);

    v.truncate(7);
    assert_eq!(ledger.drops(), 3);

    let removed = v.erase(0).unwrap();
    assert_eq!(removed.id, 0);
    assert_eq!(ledger.drops(), 3);
    drop(removed);

    v.erase_range(1, 3).unwrap();
    assert_eq!(ledger.drops(), 6);
    assert_eq!(v.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 4, 5, 6]);

    let filler = ledger.make();
    v.resize(2, filler);
    // Two truncated elements plus the unused fill value.
    assert_eq!(ledger.drops(), 9);

    v.clear();
    assert_eq!(ledger.drops(), 11);
    assert!(v.capacity() >= 10);
    ledger.assert_no_double_drop();
}

#[test]
fn test_assign_and_clone_from_release_old_contents() {
    let ledger = Rc::new(Ledger::default());
    let mut v = filled(&ledger, 4);

    v.assign_n(2, ledger.make());
    // Four old elements plus the template value.
    assert_eq!(ledger.drops(), 5);

    let source = filled(&ledger, 3);
    v.clone_from(&source);
    assert_eq!(ledger.drops(), 7);
    assert_eq!(v.len(), 3);

    v.assign_iter((0..2).map(|_| ledger.make()));
    assert_eq!(ledger.drops(), 10);

    drop(v);
    drop(source);
    assert_eq!(ledger.drops(), 15);
    ledger.assert_no_double_drop();
}

#[test]
fn test_partially_consumed_into_iter_drops_the_rest() {
    let ledger = Rc::new(Ledger::default());
    let v = filled(&ledger, 5);
    let mut it = v.into_iter();
    let first = it.next().unwrap();
    let last = it.next_back().unwrap();
    assert_eq!((first.id, last.id), (0, 4));
    drop(it);
    assert_eq!(ledger.drops(), 3);
    drop((first, last));
    assert_eq!(ledger.drops(), 5);
    ledger.assert_no_double_drop();
}

#[test]
fn test_panicking_clone_during_insert_n_never_double_drops() {
    let ledger = Rc::new(Ledger::default());
    let mut v = filled(&ledger, 6);
    let template = ledger.make();
    ledger.clones_before_panic.set(Some(2));

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = v.insert_n(2, 4, template);
    }));
    assert!(result.is_err());
    assert!(v.len() <= 6);

    ledger.clones_before_panic.set(None);
    drop(v);
    ledger.assert_no_double_drop();
}

#[test]
fn test_panicking_clone_during_clone_never_double_drops() {
    let ledger = Rc::new(Ledger::default());
    let v = filled(&ledger, 5);
    ledger.clones_before_panic.set(Some(3));

    let result = panic::catch_unwind(AssertUnwindSafe(|| v.clone()));
    assert!(result.is_err());
    // The three completed clones were dropped with the partial copy.
    assert_eq!(ledger.drops(), 3);

    ledger.clones_before_panic.set(None);
    drop(v);
    assert_eq!(ledger.drops(), 8);
    ledger.assert_no_double_drop();
}

#[test]
fn test_panicking_constructor_in_emplace_leaves_no_double_drop() {
    let ledger = Rc::new(Ledger::default());
    let mut v = filled(&ledger, 4);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = v.emplace(1, || -> Tracked { panic!("constructor failed") });
    }));
    assert!(result.is_err());

    drop(v);
    ledger.assert_no_double_drop();
}
