/// One of the two child slots of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    /// The `left` slot, filled first.
    Left,
    /// The `right` slot.
    Right,
}

impl Side {
    /// The slot that position `index` in a level-order enumeration hangs from. Odd positions
    /// are left children, even positions (other than the root at 0) are right children.
    pub(crate) fn of_level_order_index(index: usize) -> Self {
        if index % 2 == 1 {
            Side::Left
        } else {
            Side::Right
        }
    }
}
