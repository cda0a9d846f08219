//! Pooled connectivity-line sink.
//!
//! A renderer shows one segment per connectivity pair. To keep it free of
//! stale geometry the sink is synced in two steps each tick: every segment
//! is deactivated, then slot `i` receives pair `i`'s endpoints. Slots past
//! the new pair count stay inactive; the pool grows on demand and never
//! shrinks.

use subnetmaze_logic::geometry::Vec3;

use crate::reachability::ConnectionLine;

/// Where connectivity lines are pushed each tick.
///
/// Implementations draw with whatever primitive their host offers;
/// [`LinePool`] is the in-memory reference used headless.
pub trait LineSink {
    /// Deactivate every segment from the previous tick.
    fn clear_all(&mut self);
    /// Activate slot `index` with the given endpoints.
    fn draw_line(&mut self, index: usize, start: Vec3, end: Vec3);
}

/// One pooled segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub active: bool,
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment {
    const INACTIVE: Self = Self {
        active: false,
        start: Vec3::ZERO,
        end: Vec3::ZERO,
    };
}

/// Lazily grown segment pool.
#[derive(Debug, Clone, Default)]
pub struct LinePool {
    segments: Vec<Segment>,
}

impl LinePool {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// High-water mark of segments ever activated.
    pub fn capacity(&self) -> usize {
        self.segments.len()
    }

    pub fn active_count(&self) -> usize {
        self.segments.iter().filter(|s| s.active).count()
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl LineSink for LinePool {
    fn clear_all(&mut self) {
        for segment in &mut self.segments {
            segment.active = false;
        }
    }

    fn draw_line(&mut self, index: usize, start: Vec3, end: Vec3) {
        if index >= self.segments.len() {
            self.segments.resize(index + 1, Segment::INACTIVE);
        }
        self.segments[index] = Segment {
            active: true,
            start,
            end,
        };
    }
}

/// Mirror a tick's line list into a sink: clear everything, then slot `i`
/// gets pair `i`.
pub fn sync(sink: &mut dyn LineSink, lines: &[ConnectionLine]) {
    sink.clear_all();
    for (index, line) in lines.iter().enumerate() {
        sink.draw_line(index, line.start, line.end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x: f32) -> ConnectionLine {
        ConnectionLine {
            start: Vec3::ZERO,
            end: Vec3::new(x, 0.0, 0.0),
        }
    }

    #[test]
    fn sync_activates_one_slot_per_line() {
        let mut pool = LinePool::new();
        sync(&mut pool, &[line(1.0), line(2.0), line(3.0)]);
        assert_eq!(pool.active_count(), 3);
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.segment(1).unwrap().end, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn shrinking_list_leaves_no_stale_segments() {
        let mut pool = LinePool::new();
        sync(&mut pool, &[line(1.0), line(2.0), line(3.0)]);
        sync(&mut pool, &[line(9.0)]);

        assert_eq!(pool.active_count(), 1);
        // Pool never shrinks, but the extra slots are inactive.
        assert_eq!(pool.capacity(), 3);
        assert!(!pool.segment(1).unwrap().active);
        assert!(!pool.segment(2).unwrap().active);
        assert_eq!(pool.segment(0).unwrap().end, Vec3::new(9.0, 0.0, 0.0));
    }

    #[test]
    fn empty_sync_deactivates_everything() {
        let mut pool = LinePool::new();
        sync(&mut pool, &[line(1.0), line(2.0)]);
        sync(&mut pool, &[]);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn pool_grows_to_the_new_high_water_mark() {
        let mut pool = LinePool::new();
        sync(&mut pool, &[line(1.0)]);
        sync(&mut pool, &[line(1.0), line(2.0), line(3.0), line(4.0)]);
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.active_count(), 4);
    }

    #[test]
    fn slot_assignment_is_by_index() {
        let mut pool = LinePool::new();
        let lines = [line(5.0), line(6.0), line(7.0)];
        sync(&mut pool, &lines);
        for (i, l) in lines.iter().enumerate() {
            assert_eq!(pool.segment(i).unwrap().end, l.end);
        }
    }
}
