/// What a region is asked to do with its internal scroll position.
///
/// Positive deltas move content up (towards the end), negative deltas move it
/// down (towards the start).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    Delta(i32),
    JumpToStart,
    JumpToEnd,
}

impl ScrollRequest {
    pub fn is_jump(&self) -> bool {
        !matches!(self, ScrollRequest::Delta(_))
    }

    /// `1` towards the end, `-1` towards the start, `0` for an empty delta.
    pub fn direction(&self) -> i32 {
        match self {
            ScrollRequest::Delta(delta) => delta.signum(),
            ScrollRequest::JumpToStart => -1,
            ScrollRequest::JumpToEnd => 1,
        }
    }

    /// Signed movement this request produces for a position `current` that must
    /// stay within `[min, max]`. Jumps land exactly on the bound; deltas are
    /// clamped. Never overflows.
    pub fn resolve(&self, current: i32, min: i32, max: i32) -> i32 {
        let max = max.max(min);
        match *self {
            ScrollRequest::Delta(delta) => consume_within(delta, current, min, max),
            ScrollRequest::JumpToStart => (min as i64 - current as i64) as i32,
            ScrollRequest::JumpToEnd => (max as i64 - current as i64) as i32,
        }
    }
}

impl From<i32> for ScrollRequest {
    fn from(delta: i32) -> Self {
        ScrollRequest::Delta(delta)
    }
}

/// Portion of `delta` that a position at `current` can absorb while staying in
/// `[min, max]`. The result has the sign of `delta` and never exceeds it.
///
/// A position already outside the bounds (a stale range) moves back towards
/// them by at most `delta` and never further away.
pub fn consume_within(delta: i32, current: i32, min: i32, max: i32) -> i32 {
    let target = (current as i64 + delta as i64).clamp(min as i64, max.max(min) as i64);
    let consumed = target - current as i64;
    let delta = delta as i64;
    consumed.clamp(delta.min(0), delta.max(0)) as i32
}

/// Height of a region's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentExtent {
    Finite(i32),
    /// Content taller than anything measurable; always scrollable.
    Unbounded,
}

impl ContentExtent {
    pub fn finite(&self) -> Option<i32> {
        match self {
            ContentExtent::Finite(height) => Some(*height),
            ContentExtent::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, ContentExtent::Unbounded)
    }

    /// The finite height, or `fallback` when unbounded.
    pub fn or_measured(&self, fallback: i32) -> i32 {
        self.finite().unwrap_or(fallback)
    }
}
