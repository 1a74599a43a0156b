//! Tri-state check status and the rule that derives a branch's status from
//! its children.

/// Check status of a single option.
///
/// A branch is `HalfChecked` when its children are in a mixed state. Leaves
/// are only ever `Checked` or `Unchecked`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CheckState {
    /// Neither the option nor any descendant is selected.
    #[default]
    Unchecked,
    /// Some, but not all, descendants are selected.
    HalfChecked,
    /// The option and every selectable descendant are selected.
    Checked,
}

impl CheckState {
    /// Returns `true` for [`CheckState::Checked`].
    #[must_use]
    pub const fn checked(self) -> bool {
        matches!(self, Self::Checked)
    }

    /// Returns `true` for [`CheckState::HalfChecked`].
    #[must_use]
    pub const fn half_checked(self) -> bool {
        matches!(self, Self::HalfChecked)
    }

    /// Returns `true` when both flags are clear.
    #[must_use]
    pub const fn is_clear(self) -> bool {
        matches!(self, Self::Unchecked)
    }

    /// Builds a state from the `checked`/`half_checked` flag pair.
    ///
    /// `checked` wins if both flags are set.
    #[must_use]
    pub const fn from_flags(checked: bool, half_checked: bool) -> Self {
        if checked {
            Self::Checked
        } else if half_checked {
            Self::HalfChecked
        } else {
            Self::Unchecked
        }
    }

    /// The state a toggle moves to: half-checked and checked both go to
    /// unchecked, unchecked goes to checked.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Unchecked => Self::Checked,
            Self::HalfChecked | Self::Checked => Self::Unchecked,
        }
    }

    /// Derives a branch state from the states of its children.
    ///
    /// Depends only on the multiset of child states, never on history or
    /// order. An empty iterator yields [`CheckState::Unchecked`].
    pub fn aggregate(children: impl IntoIterator<Item = Self>) -> Self {
        let mut any_checked = false;
        let mut any_half = false;
        let mut any_unchecked = false;
        for state in children {
            match state {
                Self::Checked => any_checked = true,
                Self::HalfChecked => any_half = true,
                Self::Unchecked => any_unchecked = true,
            }
        }

        if any_half || (any_checked && any_unchecked) {
            Self::HalfChecked
        } else if any_checked {
            Self::Checked
        } else {
            Self::Unchecked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CheckState::{self, Checked, HalfChecked, Unchecked};

    #[test]
    fn any_half_child_makes_branch_half() {
        assert_eq!(CheckState::aggregate([Checked, HalfChecked]), HalfChecked);
        assert_eq!(CheckState::aggregate([HalfChecked]), HalfChecked);
    }

    #[test]
    fn mixed_children_make_branch_half() {
        assert_eq!(CheckState::aggregate([Checked, Unchecked]), HalfChecked);
    }

    #[test]
    fn uniform_children() {
        assert_eq!(CheckState::aggregate([Checked, Checked]), Checked);
        assert_eq!(CheckState::aggregate([Unchecked, Unchecked]), Unchecked);
    }

    #[test]
    fn aggregate_ignores_order() {
        assert_eq!(
            CheckState::aggregate([Unchecked, Checked, Checked]),
            CheckState::aggregate([Checked, Checked, Unchecked])
        );
    }

    #[test]
    fn empty_aggregate_is_unchecked() {
        assert_eq!(CheckState::aggregate(core::iter::empty()), Unchecked);
    }

    #[test]
    fn flags_round_trip_through_state() {
        assert!(Checked.checked() && !Checked.half_checked());
        assert!(HalfChecked.half_checked() && !HalfChecked.checked());
        assert!(Unchecked.is_clear());
        assert_eq!(CheckState::from_flags(true, true), Checked);
        assert_eq!(CheckState::from_flags(false, true), HalfChecked);
    }

    #[test]
    fn toggle_clears_half_checked() {
        assert_eq!(HalfChecked.toggled(), Unchecked);
        assert_eq!(Checked.toggled(), Unchecked);
        assert_eq!(Unchecked.toggled(), Checked);
    }
}
