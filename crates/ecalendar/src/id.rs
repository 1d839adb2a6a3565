use std::num::NonZeroU64;

/// Identifies which component emitted a [`crate::ChangeEvent`].
///
/// Created by hashing some source, e.g. a string naming the widget:
///
/// ```
/// # use ecalendar::SourceId;
/// assert_eq!(SourceId::new("start_date"), SourceId::new("start_date"));
/// assert_ne!(SourceId::new("start_date"), SourceId::new("end_date"));
/// ```
///
/// This is niche-optimized so that `Option<SourceId>` is the same size as `SourceId`.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SourceId(NonZeroU64);

impl SourceId {
    /// Generate a new [`SourceId`] by hashing some source (e.g. a string or integer).
    pub fn new(source: impl std::hash::Hash) -> Self {
        Self::from_hash(ahash::RandomState::with_seeds(1, 2, 3, 4).hash_one(source))
    }

    #[inline]
    const fn from_hash(hash: u64) -> Self {
        if let Some(nonzero) = NonZeroU64::new(hash) {
            Self(nonzero)
        } else {
            Self(NonZeroU64::MIN) // The hash was exactly zero (very bad luck)
        }
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.0.get()
    }

    /// Short and readable summary.
    pub fn short_debug_format(&self) -> String {
        format!("{:04X}", self.value() as u16)
    }
}

impl std::fmt::Debug for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.short_debug_format())
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::new("date_picker")
    }
}

#[test]
fn debug_is_short_hex() {
    let id = SourceId::new("picker");
    assert_eq!(format!("{id:?}"), id.short_debug_format());
    assert_eq!(id.short_debug_format().len(), 4);
}

#[test]
fn id_size() {
    assert_eq!(std::mem::size_of::<SourceId>(), 8);
    assert_eq!(std::mem::size_of::<Option<SourceId>>(), 8);
}
