use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Work,
    Break,
}

impl SegmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Work => "work",
            SegmentKind::Break => "break",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A contiguous interval of the session tagged as work or break.
///
/// `duration_minutes` always reflects the current bounds: use [`Segment::retime`]
/// rather than assigning the timestamps directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub kind: SegmentKind,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_minutes: u32,
}

impl Segment {
    /// Build the `seq`-th segment of `kind`, `minutes` long, starting at `start`.
    pub fn new(kind: SegmentKind, seq: usize, start: NaiveDateTime, minutes: u32) -> Self {
        Self {
            id: format!("{kind}-{seq}"),
            kind,
            start_time: start,
            end_time: start + Duration::minutes(i64::from(minutes)),
            duration_minutes: minutes,
        }
    }

    pub fn is_work(&self) -> bool {
        self.kind == SegmentKind::Work
    }

    pub fn is_break(&self) -> bool {
        self.kind == SegmentKind::Break
    }

    /// Move the segment to new bounds and refresh `duration_minutes`.
    pub fn retime(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        self.start_time = start;
        self.end_time = end;
        self.duration_minutes = rounded_minutes(end - start);
    }

    pub fn span(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Get segment length in whole seconds, zero if the bounds are inverted.
    pub fn duration_secs(&self) -> u64 {
        u64::try_from(self.span().num_seconds()).unwrap_or(0)
    }
}

/// Round a span to the nearest whole minute, half away from zero.
/// Negative spans count as zero.
fn rounded_minutes(span: Duration) -> u32 {
    let secs = span.num_seconds().max(0);
    u32::try_from((secs + 30) / 60).unwrap_or(u32::MAX)
}

/// Ordered, contiguous sequence of segments covering the planning window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    segments: Vec<Segment>,
}

impl Schedule {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    pub fn first(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.segments.len().checked_sub(1)
    }

    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        self.first().map(|s| s.start_time)
    }

    pub fn ends_at(&self) -> Option<NaiveDateTime> {
        self.last().map(|s| s.end_time)
    }

    pub fn total_duration_min(&self) -> u64 {
        self.segments
            .iter()
            .map(|s| u64::from(s.duration_minutes))
            .sum()
    }

    /// Minutes of focus time across all work segments.
    pub fn work_minutes(&self) -> u64 {
        self.segments
            .iter()
            .filter(|s| s.is_work())
            .map(|s| u64::from(s.duration_minutes))
            .sum()
    }

    pub fn break_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_break()).count()
    }

    /// Every segment ends exactly where the next one starts.
    pub fn is_contiguous(&self) -> bool {
        self.segments
            .windows(2)
            .all(|pair| pair[0].end_time == pair[1].start_time)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
