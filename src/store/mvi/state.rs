//! Base trait for store slices.

/// Marker trait for slice state.
///
/// Slices are:
/// - Cloneable (the store snapshots a slice before reducing it)
/// - Comparable (`same_as` decides whether subscribers are notified)
/// - Defaultable (compile-time initial value, also the logout target)
pub trait SliceState: Clone + PartialEq + Default + Send + 'static {
    /// Whether a reduce left the slice unchanged. Slices holding floats
    /// override this so a NaN field counts as equal to itself.
    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}
