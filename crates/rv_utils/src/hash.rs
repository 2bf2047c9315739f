//! Provide hash containers, re-exports *hashbrown* and *foldhash*.
//!
//! The default build-hasher is [`FixedHashState`], which hashes through a
//! fixed seed so results only depend on the input.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6F0C_ED5A_913B_44D7);

/// A fixed hasher providing hash results that only depend on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`], created through
/// [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Fixed hash state based upon a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use rv_utils::hash::FixedHashState;
///
/// let mut hasher = FixedHashState.build_hasher();
/// 3.hash(&mut hasher);
/// let result = hasher.finish();
///
/// println!("Hash Result {result}"); // Fixed Result
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Containers

/// A [`hashbrown::HashMap`] keyed with [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] keyed with [`FixedHashState`] by default.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use super::{FixedHashState, HashMap};

    #[test]
    fn fixed_state_is_stable() {
        let first = FixedHashState.hash_one("riven");
        let second = FixedHashState.hash_one("riven");
        assert_eq!(first, second);
    }

    #[test]
    fn map_roundtrip() {
        let mut map: HashMap<&str, i32> = HashMap::default();
        map.insert("one", 1);
        map.insert("two", 2);
        assert_eq!(map.get("one"), Some(&1));
        assert_eq!(map.len(), 2);
    }
}
