//! Behavior flags for choosers.
//!
//! A [`ChooserFlags`] value travels with the chooser from spec construction
//! through display: the builder validates against it, the session exposes the
//! effective set for one showing, and the host reads it to decide which
//! affordances (buttons, filter box, status bar) to put on screen.

use std::ops::{BitAnd, BitOr, BitOrAssign};

/// How the quick filter matches typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuickFilterMode {
    /// Whatever the host considers its default matching.
    #[default]
    Default,
    /// Plain substring matching.
    Normal,
    /// Substring matching on word boundaries.
    WholeWords,
    /// Regular expression matching.
    Regex,
    /// Fuzzy subsequence matching.
    Fuzzy,
}

impl QuickFilterMode {
    const fn from_bits(bits: u32) -> Self {
        match bits {
            1 => Self::Normal,
            2 => Self::WholeWords,
            3 => Self::Regex,
            4 => Self::Fuzzy,
            _ => Self::Default,
        }
    }

    const fn bits(self) -> u32 {
        match self {
            Self::Default => 0,
            Self::Normal => 1,
            Self::WholeWords => 2,
            Self::Regex => 3,
            Self::Fuzzy => 4,
        }
    }
}

/// Set of independent chooser behavior flags.
///
/// Combine with `|`:
///
/// ```
/// use picklist::ChooserFlags;
///
/// let flags = ChooserFlags::MULTI | ChooserFlags::CAN_DELETE;
/// assert!(flags.contains(ChooserFlags::MULTI));
/// assert!(!flags.contains(ChooserFlags::MODAL));
/// ```
///
/// The quick-filter matching mode rides along as a small packed field; use
/// [`with_quick_filter`](Self::with_quick_filter) and
/// [`quick_filter`](Self::quick_filter) rather than bit constants for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChooserFlags(u32);

impl ChooserFlags {
    /// No flags.
    pub const NONE: ChooserFlags = ChooserFlags(0);
    /// Block the caller until the user picks or dismisses.
    pub const MODAL: ChooserFlags = ChooserFlags(1 << 0);
    /// Allow selecting several rows at once.
    pub const MULTI: ChooserFlags = ChooserFlags(1 << 1);
    /// Hide the row-operation buttons even when operations are available.
    pub const NO_BUTTONS: ChooserFlags = ChooserFlags(1 << 2);
    /// Rows carry per-row display attributes worth querying.
    pub const CUSTOM_ATTRS: ChooserFlags = ChooserFlags(1 << 3);
    /// Usable without a backing store; the host must not persist content.
    pub const NO_STORE: ChooserFlags = ChooserFlags(1 << 4);
    /// On reopen of an identical chooser, reactivate it instead of refusing.
    pub const FORCE_DEFAULT: ChooserFlags = ChooserFlags(1 << 5);
    /// Offer an insert affordance.
    pub const CAN_INSERT: ChooserFlags = ChooserFlags(1 << 6);
    /// Offer a delete affordance.
    pub const CAN_DELETE: ChooserFlags = ChooserFlags(1 << 7);
    /// Offer an edit affordance.
    pub const CAN_EDIT: ChooserFlags = ChooserFlags(1 << 8);
    /// Offer a refresh affordance.
    pub const CAN_REFRESH: ChooserFlags = ChooserFlags(1 << 9);
    /// Open with the quick filter focused.
    pub const QUICK_FILTER: ChooserFlags = ChooserFlags(1 << 10);
    /// Hide the status bar.
    pub const NO_STATUS_BAR: ChooserFlags = ChooserFlags(1 << 11);
    /// Restore the floating window geometry from the previous run.
    pub const RESTORE_GEOMETRY: ChooserFlags = ChooserFlags(1 << 12);

    const QUICK_FILTER_SHIFT: u32 = 16;
    const QUICK_FILTER_MASK: u32 = 0x7 << Self::QUICK_FILTER_SHIFT;

    /// Check if this set contains every flag in `flags`.
    pub const fn contains(self, flags: ChooserFlags) -> bool {
        (self.0 & flags.0) == flags.0
    }

    /// Check if this set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns this set with `flags` added.
    pub const fn with(self, flags: ChooserFlags) -> Self {
        Self(self.0 | flags.0)
    }

    /// Returns this set with `flags` removed.
    pub const fn without(self, flags: ChooserFlags) -> Self {
        Self(self.0 & !flags.0)
    }

    /// The quick-filter matching mode packed into this set.
    pub const fn quick_filter(self) -> QuickFilterMode {
        QuickFilterMode::from_bits((self.0 & Self::QUICK_FILTER_MASK) >> Self::QUICK_FILTER_SHIFT)
    }

    /// Returns this set with the quick-filter matching mode replaced.
    pub const fn with_quick_filter(self, mode: QuickFilterMode) -> Self {
        Self((self.0 & !Self::QUICK_FILTER_MASK) | (mode.bits() << Self::QUICK_FILTER_SHIFT))
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Reconstructs a set from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }
}

impl BitOr for ChooserFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        ChooserFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChooserFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ChooserFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        ChooserFlags(self.0 & rhs.0)
    }
}
