/// Saved scroll position of a single region.
///
/// Each region kind saves its own variant and ignores variants it does not
/// understand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum RegionSnapshot {
    /// First visible item and how far its top is scrolled past the viewport top.
    List { position: usize, offset: i32 },
    /// Header collapse plus the snapshot of the content region below it.
    Delegate {
        header_offset: i32,
        content: Option<Box<RegionSnapshot>>,
    },
}

impl RegionSnapshot {
    pub fn kind_name(&self) -> &'static str {
        match self {
            RegionSnapshot::List { .. } => "list",
            RegionSnapshot::Delegate { .. } => "delegate",
        }
    }
}
