//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::Instant;

// == Cache Entry ==
/// A single cache entry threaded into the recency chain.
///
/// `prev`/`next` are slot indices into the list's arena rather than owned
/// pointers. Links and the expiry stamp are rewritten only by the list's
/// `touch` and `remove`; no other code path may mutate them.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    /// The lookup key, duplicated from the index
    pub(crate) key: K,
    /// The stored value
    pub(crate) value: V,
    /// Slot of the more recently used neighbor
    pub(crate) prev: Option<usize>,
    /// Slot of the less recently used neighbor
    pub(crate) next: Option<usize>,
    /// Absolute expiry instant, present only when a TTL is configured
    pub(crate) expires_at: Option<Instant>,
}

impl<K, V> Entry<K, V> {
    /// Creates an unlinked entry; the caller links it with a touch.
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
            expires_at: None,
        }
    }

    // == Is Expired ==
    /// Checks whether the expiry stamp is strictly in the past.
    ///
    /// An entry whose stamp equals `now` is still live; expiration only
    /// claims entries once the instant has passed. Entries without a stamp
    /// never expire.
    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(at) if at < now)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_entry_is_unlinked() {
        let entry = Entry::new("a", 1);
        assert!(entry.prev.is_none());
        assert!(entry.next.is_none());
        assert!(entry.expires_at.is_none());
    }

    #[test]
    fn test_entry_without_stamp_never_expires() {
        let entry: Entry<&str, u32> = Entry::new("a", 1);
        assert!(!entry.is_expired(Instant::now()));
    }

    #[test]
    fn test_expiry_is_strictly_past() {
        let now = Instant::now();
        let mut entry = Entry::new("a", 1);

        entry.expires_at = Some(now);
        assert!(!entry.is_expired(now), "stamp equal to now is still live");

        entry.expires_at = Some(now + Duration::from_secs(1));
        assert!(!entry.is_expired(now));

        entry.expires_at = Some(now);
        assert!(entry.is_expired(now + Duration::from_millis(1)));
    }
}
