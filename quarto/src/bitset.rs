/// Macro to help with defining 16-bit set types.
///
/// `$name` must be a struct with a single `bits: u16` field, and `$item` must
/// have an `index()` method returning its bit position (0..16).
macro_rules! bitset_traits {
    ($name:ident, $item:ty) => {
        impl $name {
            /// Creates a new, empty set.
            pub const fn new() -> Self {
                Self { bits: 0 }
            }

            pub const fn len(self) -> u32 {
                self.bits.count_ones()
            }

            pub const fn is_empty(self) -> bool {
                self.bits == 0
            }

            pub fn contains(self, item: $item) -> bool {
                (self.bits & (1u16 << item.index())) != 0
            }

            #[must_use] // Because users might expect this to be a mutating method
            pub fn insert(self, item: $item) -> Self {
                Self {
                    bits: self.bits | (1u16 << item.index()),
                }
            }

            #[must_use] // Because users might expect this to be a mutating method
            pub fn remove(self, item: $item) -> Self {
                Self {
                    bits: self.bits & !(1u16 << item.index()),
                }
            }
        }

        // All 16 bits are meaningful, so no masking is needed.
        impl std::ops::Not for $name {
            type Output = Self;

            fn not(self) -> Self::Output {
                Self { bits: !self.bits }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self { bits: 0 }
            }
        }

        impl FromIterator<$item> for $name {
            fn from_iter<T: IntoIterator<Item = $item>>(iter: T) -> Self {
                let mut bits = 0;
                for item in iter {
                    bits |= 1u16 << item.index();
                }
                Self { bits }
            }
        }
    };
}
pub(crate) use bitset_traits;
