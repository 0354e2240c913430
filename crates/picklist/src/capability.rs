//! Declared data-source capabilities.
//!
//! A [`ChooserModel`](crate::model::ChooserModel) states up front which of its
//! optional operations are real implementations. The session only ever
//! dispatches operations whose bit is set; the trait's default method bodies
//! exist to keep simple models short, not to be called.
//!
//! A spec may additionally carry a `forbidden` set that force-disables
//! declared bits. The combination is strictly restrictive: forbidding can
//! clear bits, never invent them.

use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Bitset of optional [`ChooserModel`](crate::model::ChooserModel) operations
/// a data source implements.
///
/// ```
/// use picklist::Capabilities;
///
/// let caps = Capabilities::DELETE | Capabilities::REFRESH;
/// assert!(caps.contains(Capabilities::DELETE));
/// assert!(!caps.contains(Capabilities::INSERT));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u16);

impl Capabilities {
    /// No optional operations.
    pub const NONE: Capabilities = Capabilities(0);
    /// `on_init` runs before the first populate.
    pub const INIT: Capabilities = Capabilities(1 << 0);
    /// `icon` supplies per-row icons.
    pub const ICON: Capabilities = Capabilities(1 << 1);
    /// `attributes` supplies per-row display attributes.
    pub const ROW_ATTRS: Capabilities = Capabilities(1 << 2);
    /// `insert` handles the insert affordance.
    pub const INSERT: Capabilities = Capabilities(1 << 3);
    /// `delete` handles the delete affordance.
    pub const DELETE: Capabilities = Capabilities(1 << 4);
    /// `edit` handles the edit affordance.
    pub const EDIT: Capabilities = Capabilities(1 << 5);
    /// `enter` handles row activation.
    pub const ENTER: Capabilities = Capabilities(1 << 6);
    /// `refresh` recomputes content on demand.
    pub const REFRESH: Capabilities = Capabilities(1 << 7);
    /// `selection_changed` wants selection tracking.
    pub const SELECTION: Capabilities = Capabilities(1 << 8);
    /// `on_close` wants the close notification.
    pub const CLOSE: Capabilities = Capabilities(1 << 9);
    /// `on_popup` extends the context menu.
    pub const POPUP: Capabilities = Capabilities(1 << 10);
    /// Every optional operation.
    pub const ALL: Capabilities = Capabilities(0x7ff);

    /// Check if this set contains every capability in `caps`.
    pub const fn contains(self, caps: Capabilities) -> bool {
        (self.0 & caps.0) == caps.0
    }

    /// Check if this set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns this set with `caps` added.
    pub const fn with(self, caps: Capabilities) -> Self {
        Self(self.0 | caps.0)
    }

    /// Returns this set with `caps` removed.
    pub const fn without(self, caps: Capabilities) -> Self {
        Self(self.0 & !caps.0)
    }

    /// Effective set after applying a `forbidden` override.
    ///
    /// Restriction is monotonic: the result is always a subset of `self`, so
    /// an override can only ever take operations away.
    pub const fn restrict(self, forbidden: Capabilities) -> Self {
        Self(self.0 & !forbidden.0)
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Reconstructs a set from raw bits.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Capabilities(self.0 | rhs.0)
    }
}

impl BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Capabilities {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Capabilities(self.0 & rhs.0)
    }
}
