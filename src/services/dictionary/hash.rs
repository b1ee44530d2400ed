use sha2::{Digest, Sha256};

use crate::model::entry::Entry;

/// Fingerprint of a dictionary snapshot; order-sensitive.
pub fn fingerprint(entries: &[Entry]) -> String {
    let mut hasher = Sha256::new();
    for e in entries {
        for name in e.names() {
            hasher.update((name.len() as u64).to_le_bytes());
            hasher.update(name.as_bytes());
        }
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_boundaries_are_part_of_the_fingerprint() {
        let a = [Entry::new("ab", "c", "")];
        let b = [Entry::new("a", "bc", "")];
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn embedded_nul_bytes_do_not_merge_fields() {
        let a = [Entry::new("a\0", "b", "Pierre")];
        let b = [Entry::new("a", "\0b", "Pierre")];
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn empty_dictionary_has_stable_fingerprint() {
        assert_eq!(fingerprint(&[]), fingerprint(&[]));
        assert_eq!(fingerprint(&[]).len(), 64);
    }
}
