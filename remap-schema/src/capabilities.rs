use serde::{Deserialize, Serialize};
use std::fmt;

/// Bitset of pipeline hooks a schema declares.
///
/// The construction engine inspects this once per type: if any bit is set,
/// the slow path runs; if none is, the fast path is eligible. The check is
/// structural — declaring a hook forces the slow path even when the hook
/// would not change behavior for a particular input.
#[derive(Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(u8);

impl Capabilities {
    /// No hooks declared.
    pub const NONE: Capabilities = Capabilities(0);
    /// Per-field inbound/outbound casts.
    pub const CASTS: Capabilities = Capabilities(1);
    /// Dot-notation source paths.
    pub const TEMPLATE: Capabilities = Capabilities(1 << 1);
    /// Validation rules.
    pub const RULES: Capabilities = Capabilities(1 << 2);
    /// Pre-cast value filters.
    pub const FILTERS: Capabilities = Capabilities(1 << 3);
    /// Derived fields (eager or lazy).
    pub const COMPUTED: Capabilities = Capabilities(1 << 4);

    /// Returns true if no hook is declared.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if all bits of `other` are set in `self`.
    #[must_use]
    pub const fn contains(self, other: Capabilities) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets the bits of `other`.
    pub fn insert(&mut self, other: Capabilities) {
        self.0 |= other.0;
    }

    /// Union of two capability sets.
    #[must_use]
    pub const fn union(self, other: Capabilities) -> Capabilities {
        Capabilities(self.0 | other.0)
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for (flag, name) in [
            (Self::CASTS, "casts"),
            (Self::TEMPLATE, "template"),
            (Self::RULES, "rules"),
            (Self::FILTERS, "filters"),
            (Self::COMPUTED, "computed"),
        ] {
            if self.contains(flag) {
                set.entry(&name);
            }
        }
        set.finish()
    }
}
