use std::time::{Duration, Instant};
use whorl_core::catalog::{IconName, ItemName, MenuItem};
use whorl_core::geometry::Point;
use whorl_core::lifecycle::ItemStyle;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Keyframe {
    position: Point,
    opacity: f64,
}

impl Keyframe {
    fn of(style: &ItemStyle) -> Self {
        Self {
            position: style.position,
            opacity: style.opacity,
        }
    }

    fn lerp(from: Self, to: Self, t: f64) -> Self {
        Self {
            position: Point::new(
                from.position.x + (to.position.x - from.position.x) * t,
                from.position.y + (to.position.y - from.position.y) * t,
            ),
            opacity: from.opacity + (to.opacity - from.opacity) * t,
        }
    }
}

/// One rendered item: where to draw it right now and how transparent.
#[derive(Debug, Clone)]
pub struct ItemFrame {
    pub name: ItemName,
    pub icon: IconName,
    pub position: Point,
    pub opacity: f64,
}

#[derive(Debug)]
struct Track {
    icon: IconName,
    from: Keyframe,
    to: Keyframe,
    delay: Duration,
    started: Instant,
}

impl Track {
    fn still(icon: IconName, at: Keyframe, delay: Duration, now: Instant) -> Self {
        Self {
            icon,
            from: at,
            to: at,
            delay,
            started: now,
        }
    }

    /// Swap the destination mid-flight, starting from the currently
    /// rendered value so supersessions never jump.
    fn retarget(&mut self, to: Keyframe, delay: Duration, now: Instant, duration: Duration) {
        self.from = self.sample(now, duration);
        self.to = to;
        self.delay = delay;
        self.started = now;
    }

    fn sample(&self, now: Instant, duration: Duration) -> Keyframe {
        let elapsed = now.saturating_duration_since(self.started);
        let Some(active) = elapsed.checked_sub(self.delay) else {
            return self.from;
        };
        let t = (active.as_secs_f64() / duration.as_secs_f64()).min(1.0);
        Keyframe::lerp(self.from, self.to, ease_out_cubic(t))
    }

    fn settled(&self, now: Instant, duration: Duration) -> bool {
        self.from == self.to
            || now.saturating_duration_since(self.started) >= self.delay + duration
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Interpolates the controller's style targets into per-frame values,
/// honoring each item's transition delay (the stagger).
#[derive(Debug)]
pub struct Animator {
    duration: Duration,
    tracks: Vec<(ItemName, Track)>,
    frames: Vec<ItemFrame>,
    settled: bool,
}

impl Animator {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            tracks: Vec::new(),
            frames: Vec::new(),
            settled: true,
        }
    }

    /// Align tracks with the controller's current styles: new mounts start
    /// in place, changed targets retarget from the rendered value, and
    /// unmounted items drop out.
    pub fn sync(&mut self, now: Instant, styles: &[(usize, &MenuItem, ItemStyle)]) {
        let mut next = Vec::with_capacity(styles.len());
        for (_, entry, style) in styles {
            let target = Keyframe::of(style);
            let track = match self.take(&entry.name) {
                Some(mut track) => {
                    if track.to != target {
                        track.retarget(target, style.transition_delay, now, self.duration);
                        self.settled = false;
                    }
                    track
                }
                None => {
                    self.settled = false;
                    Track::still(entry.icon.clone(), target, style.transition_delay, now)
                }
            };
            next.push((entry.name.clone(), track));
        }
        if !self.tracks.is_empty() {
            // leftovers unmounted this sync; one more frame clears them
            self.settled = false;
        }
        self.tracks = next;
    }

    /// Sample every track at `now`. Returns whether the rendered frames
    /// changed (one extra frame is reported after everything settles).
    pub fn sample(&mut self, now: Instant) -> bool {
        let settled_now = self
            .tracks
            .iter()
            .all(|(_, track)| track.settled(now, self.duration));
        let changed = !(self.settled && settled_now);
        if changed {
            self.frames = self
                .tracks
                .iter()
                .map(|(name, track)| {
                    let key = track.sample(now, self.duration);
                    ItemFrame {
                        name: name.clone(),
                        icon: track.icon.clone(),
                        position: key.position,
                        opacity: key.opacity,
                    }
                })
                .collect();
        }
        self.settled = settled_now;
        changed
    }

    pub fn frames(&self) -> &[ItemFrame] {
        &self.frames
    }

    fn take(&mut self, name: &ItemName) -> Option<Track> {
        let index = self.tracks.iter().position(|(n, _)| n == name)?;
        Some(self.tracks.remove(index).1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(x: f64, y: f64, opacity: f64, delay_ms: u64) -> ItemStyle {
        ItemStyle {
            position: Point::new(x, y),
            opacity,
            transition_delay: Duration::from_millis(delay_ms),
        }
    }

    fn frame_of(animator: &Animator) -> &ItemFrame {
        &animator.frames()[0]
    }

    #[test]
    fn transition_delay_holds_the_start_value() {
        let item = MenuItem::new("Cut", "edit-cut");
        let mut animator = Animator::new(Duration::from_millis(250));
        let t0 = Instant::now();

        animator.sync(t0, &[(0, &item, style(10.0, 10.0, 0.0, 100))]);
        animator.sample(t0);
        animator.sync(t0, &[(0, &item, style(110.0, 10.0, 1.0, 100))]);

        animator.sample(t0 + Duration::from_millis(50));
        assert_eq!(frame_of(&animator).opacity, 0.0);
        assert_eq!(frame_of(&animator).position, Point::new(10.0, 10.0));

        animator.sample(t0 + Duration::from_millis(350));
        assert_eq!(frame_of(&animator).opacity, 1.0);
        assert_eq!(frame_of(&animator).position, Point::new(110.0, 10.0));
    }

    #[test]
    fn retarget_mid_flight_continues_from_the_rendered_value() {
        let item = MenuItem::new("Cut", "edit-cut");
        let mut animator = Animator::new(Duration::from_millis(250));
        let t0 = Instant::now();

        animator.sync(t0, &[(0, &item, style(0.0, 0.0, 0.0, 0))]);
        animator.sample(t0);
        animator.sync(t0, &[(0, &item, style(100.0, 0.0, 1.0, 0))]);

        let midway = t0 + Duration::from_millis(125);
        animator.sample(midway);
        let reached = frame_of(&animator).opacity;
        assert!(reached > 0.0 && reached < 1.0);

        // collapse back; the first sample after retargeting must not jump
        animator.sync(midway, &[(0, &item, style(0.0, 0.0, 0.0, 0))]);
        animator.sample(midway);
        assert!((frame_of(&animator).opacity - reached).abs() < 1e-9);
    }

    #[test]
    fn unmounted_items_drop_out_after_one_frame() {
        let item = MenuItem::new("Cut", "edit-cut");
        let mut animator = Animator::new(Duration::from_millis(250));
        let t0 = Instant::now();

        animator.sync(t0, &[(0, &item, style(0.0, 0.0, 0.0, 0))]);
        assert!(animator.sample(t0));
        assert_eq!(animator.frames().len(), 1);

        animator.sync(t0 + Duration::from_millis(500), &[]);
        assert!(animator.sample(t0 + Duration::from_millis(500)));
        assert!(animator.frames().is_empty());

        // fully settled again: no further frame changes
        assert!(!animator.sample(t0 + Duration::from_millis(600)));
    }
}
