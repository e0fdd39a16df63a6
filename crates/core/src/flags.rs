use serde::{Deserialize, Serialize};

/// Independent boolean page behaviors packed into one integer.
///
/// Serialized as the raw integer so client-side consumers can test bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageFlags(u8);

impl PageFlags {
    pub const CSP_ENABLED: Self = Self(1);
    pub const NO_INDEX: Self = Self(1 << 1);
    pub const NO_FOLLOW: Self = Self(1 << 2);
    pub const NO_CACHE: Self = Self(1 << 3);
    pub const FORCE_HTTPS: Self = Self(1 << 4);

    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds flags from raw bits, dropping unknown ones.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1_1111)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }

    pub fn insert(&mut self, flag: Self) {
        self.0 |= flag.0;
    }

    pub fn remove(&mut self, flag: Self) {
        self.0 &= !flag.0;
    }

    /// Sets or clears `flag`.
    pub fn set(&mut self, flag: Self, enabled: bool) {
        if enabled {
            self.insert(flag);
        } else {
            self.remove(flag);
        }
    }
}

impl std::ops::BitOr for PageFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_independent() {
        let mut flags = PageFlags::empty();
        flags.set(PageFlags::NO_INDEX, true);
        flags.set(PageFlags::NO_CACHE, true);
        flags.set(PageFlags::NO_CACHE, false);

        assert!(flags.contains(PageFlags::NO_INDEX));
        assert!(!flags.contains(PageFlags::NO_CACHE));
        assert_eq!(flags.bits(), 2);
    }

    #[test]
    fn test_bit_values() {
        let all = PageFlags::CSP_ENABLED
            | PageFlags::NO_INDEX
            | PageFlags::NO_FOLLOW
            | PageFlags::NO_CACHE
            | PageFlags::FORCE_HTTPS;
        assert_eq!(all.bits(), 31);
    }

    #[test]
    fn test_from_bits_drops_unknown() {
        assert_eq!(PageFlags::from_bits(0xff).bits(), 31);
    }

    #[test]
    fn test_serializes_as_integer() {
        let flags = PageFlags::NO_INDEX | PageFlags::NO_FOLLOW;
        assert_eq!(serde_json::to_string(&flags).unwrap(), "6");
    }
}
