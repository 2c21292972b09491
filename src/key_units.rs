//! Defines how trie keys are split into units and rebuilt from them.
use std::fmt::Debug;

/// A borrowed key type that can be walked one unit at a time.
///
/// The unit is the label of a single edge in the trie. Every operation on a
/// given `Trie<K, V>` uses the same `K`, so the unit granularity is fixed for
/// the lifetime of the container.
pub trait KeyUnits {
    /// The atomic element consumed per trie level.
    type Unit: Copy + Eq + Debug;

    /// The owned key handed back during enumeration.
    type Owned;

    /// Iterator over the units of a borrowed key.
    type Units<'a>: Iterator<Item = Self::Unit>
    where
        Self: 'a;

    /// Returns the units of this key, first to last.
    fn units(&self) -> Self::Units<'_>;

    /// Rebuilds an owned key from a unit sequence.
    fn from_units(units: &[Self::Unit]) -> Self::Owned;
}

/// String keys are split into Unicode scalar values.
impl KeyUnits for str {
    type Unit = char;
    type Owned = String;
    type Units<'a> = std::str::Chars<'a>;

    fn units(&self) -> Self::Units<'_> {
        self.chars()
    }

    fn from_units(units: &[char]) -> String {
        units.iter().collect()
    }
}

/// Byte keys are split into single bytes.
impl KeyUnits for [u8] {
    type Unit = u8;
    type Owned = Vec<u8>;
    type Units<'a> = std::iter::Copied<std::slice::Iter<'a, u8>>;

    fn units(&self) -> Self::Units<'_> {
        self.iter().copied()
    }

    fn from_units(units: &[u8]) -> Vec<u8> {
        units.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_units_are_chars() {
        let units: Vec<char> = "héllo".units().collect();
        assert_eq!(units, vec!['h', 'é', 'l', 'l', 'o']);
    }

    #[test]
    fn test_str_rebuild() {
        assert_eq!(<str as KeyUnits>::from_units(&['c', 'a', 't']), "cat");
        assert_eq!(<str as KeyUnits>::from_units(&[]), "");
    }

    #[test]
    fn test_bytes_units_split_multibyte_chars() {
        // 'é' is two bytes in UTF-8
        let key: &[u8] = "é".as_bytes();
        let units: Vec<u8> = key.units().collect();
        assert_eq!(units, vec![0xc3, 0xa9]);
        assert_eq!(<[u8] as KeyUnits>::from_units(&units), key.to_vec());
    }

    #[test]
    fn test_empty_key_has_no_units() {
        assert_eq!("".units().count(), 0);
        assert_eq!(b"".as_slice().units().count(), 0);
    }
}
