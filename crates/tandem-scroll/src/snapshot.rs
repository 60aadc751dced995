use tandem_foundation::RegionSnapshot;

/// Saved position of the whole composite surface, produced by `save` and
/// consumed by a single `restore`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSnapshot {
    /// Seam collapse, `0..=offset_range`.
    pub seam_offset: i32,
    pub top: Option<RegionSnapshot>,
    pub bottom: Option<RegionSnapshot>,
}
