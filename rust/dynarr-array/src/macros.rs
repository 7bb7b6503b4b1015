/// Creates a [`DynArray`](crate::DynArray) from a literal sequence.
///
/// - `dyn_array![]` creates an empty array without allocating.
/// - `dyn_array![a, b, c]` allocates exactly as many slots as there are
///   elements and moves them in order.
/// - `dyn_array![value; n]` creates `n` clones of `value`.
///
/// ```
/// use dynarr_array::dyn_array;
///
/// let v = dyn_array![10, 20, 30];
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.capacity(), 3);
///
/// let w = dyn_array![7u8; 4];
/// assert_eq!(w, [7, 7, 7, 7]);
/// ```
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynArray::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynArray::from([$($x),+])
    };
}
