use crate::geometry::Point;
use std::time::Duration;

/// Mount/visibility phases of a single menu item.
///
/// `Unmounted` and `Visible` are the stable states; `Hidden` is transient in
/// both directions (just mounted, reveal pending — or collapsing, unmount
/// pending).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Reveal,
    Unmount,
}

/// Transition delays. All values are wall-clock milliseconds in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Mount → visible delay. Not index-scaled.
    pub open_delay: Duration,
    /// Collapse → unmount delay. Not index-scaled: every item unmounts at
    /// the same moment regardless of where it sits on the ring.
    pub close_delay: Duration,
    /// Per-item transition delay factor; item `i` animates `i × stagger`
    /// after item 0.
    pub stagger: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            open_delay: Duration::from_millis(50),
            close_delay: Duration::from_millis(350),
            stagger: Duration::from_millis(50),
        }
    }
}

/// A deferred transition the event loop should deliver back via
/// [`crate::controller::Menu::deadline_fired`] once `after` has elapsed.
///
/// `seq` pins the deadline to the item generation that scheduled it; a
/// delivery whose `seq` has been superseded is discarded, which is how
/// pending transitions are cancelled without tracking timer sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    pub item: usize,
    pub seq: u64,
    pub after: Duration,
}

/// Per-item render output consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyle {
    /// Top-left placement: the captured anchor, plus the ring offset once
    /// visible.
    pub position: Point,
    pub opacity: f64,
    /// Delay before the rendered transition starts moving. This is where
    /// the stagger lives; the phase flip itself is never staggered.
    pub transition_delay: Duration,
}

/// State machine for one menu item.
///
/// Driven entirely by the controller: `activate`/`deactivate` on the open
/// flag's edges, `anchor_moved` on live anchor updates, `fire` when a
/// scheduled deadline elapses.
#[derive(Debug)]
pub struct ItemLifecycle {
    phase: Phase,
    captured: Point,
    pending: Option<Pending>,
    seq: u64,
}

impl Default for ItemLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemLifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Unmounted,
            captured: Point::default(),
            pending: None,
            seq: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.phase != Phase::Unmounted
    }

    /// Open edge. Captures the anchor and mounts the item hidden, with the
    /// reveal scheduled after `timing.open_delay`. Reopening while the
    /// unmount timer is still pending cancels it and restarts the reveal;
    /// activating an item that is already on its way up only re-captures
    /// the anchor.
    pub fn activate(&mut self, index: usize, anchor: Point, timing: &Timing) -> Option<Deadline> {
        self.captured = anchor;
        match self.phase {
            Phase::Unmounted => {
                self.phase = Phase::Hidden;
                Some(self.schedule(index, Pending::Reveal, timing.open_delay))
            }
            Phase::Hidden if self.pending == Some(Pending::Unmount) => {
                Some(self.schedule(index, Pending::Reveal, timing.open_delay))
            }
            _ => None,
        }
    }

    /// Close edge. Collapses the item back to the captured anchor and
    /// schedules the unmount. A pending reveal is superseded, so an item
    /// closed before its reveal fires goes straight from hidden to
    /// unmounted without ever becoming visible.
    pub fn deactivate(&mut self, index: usize, timing: &Timing) -> Option<Deadline> {
        match self.phase {
            Phase::Unmounted => None,
            Phase::Hidden if self.pending == Some(Pending::Unmount) => None,
            _ => {
                self.phase = Phase::Hidden;
                Some(self.schedule(index, Pending::Unmount, timing.close_delay))
            }
        }
    }

    /// Live anchor update. Mounted items follow the anchor immediately,
    /// without touching their phase or any pending deadline.
    pub fn anchor_moved(&mut self, anchor: Point) {
        if self.is_mounted() {
            self.captured = anchor;
        }
    }

    /// Delivers an elapsed deadline. Returns false for stale deliveries
    /// (superseded by a later transition) and for spurious ones.
    pub fn fire(&mut self, seq: u64) -> bool {
        if seq != self.seq {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.phase = match pending {
            Pending::Reveal => Phase::Visible,
            Pending::Unmount => Phase::Unmounted,
        };
        true
    }

    /// Render style for this item, or `None` while unmounted. `offset` is
    /// the item's ring offset, applied only once visible; `delay` is the
    /// item's stagger share.
    pub fn style(&self, offset: Point, delay: Duration) -> Option<ItemStyle> {
        match self.phase {
            Phase::Unmounted => None,
            Phase::Hidden => Some(ItemStyle {
                position: self.captured,
                opacity: 0.0,
                transition_delay: delay,
            }),
            Phase::Visible => Some(ItemStyle {
                position: self.captured + offset,
                opacity: 1.0,
                transition_delay: delay,
            }),
        }
    }

    fn schedule(&mut self, index: usize, kind: Pending, after: Duration) -> Deadline {
        // bumping the generation invalidates whatever is still in flight
        self.seq += 1;
        self.pending = Some(kind);
        Deadline {
            item: index,
            seq: self.seq,
            after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_OFFSET: Point = Point { x: 0.0, y: 0.0 };
    const NO_DELAY: Duration = Duration::ZERO;

    fn anchor() -> Point {
        Point::new(175.0, 125.0)
    }

    #[test]
    fn reveal_runs_through_hidden() {
        let timing = Timing::default();
        let mut item = ItemLifecycle::new();

        let reveal = item.activate(0, anchor(), &timing).unwrap();
        assert_eq!(reveal.after, timing.open_delay);
        assert_eq!(item.phase(), Phase::Hidden);

        let style = item.style(NO_OFFSET, NO_DELAY).unwrap();
        assert_eq!(style.opacity, 0.0);
        assert_eq!(style.position, anchor());

        assert!(item.fire(reveal.seq));
        assert_eq!(item.phase(), Phase::Visible);

        let style = item.style(Point::new(100.0, 0.0), NO_DELAY).unwrap();
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.position, Point::new(275.0, 125.0));
    }

    #[test]
    fn close_before_reveal_never_becomes_visible() {
        let timing = Timing::default();
        let mut item = ItemLifecycle::new();

        let reveal = item.activate(0, anchor(), &timing).unwrap();
        let unmount = item.deactivate(0, &timing).unwrap();
        assert_eq!(unmount.after, timing.close_delay);

        // the reveal timer elapses anyway, but it was superseded
        assert!(!item.fire(reveal.seq));
        assert_eq!(item.phase(), Phase::Hidden);

        assert!(item.fire(unmount.seq));
        assert_eq!(item.phase(), Phase::Unmounted);
        assert!(item.style(NO_OFFSET, NO_DELAY).is_none());
    }

    #[test]
    fn reopen_before_unmount_restarts_the_reveal() {
        let timing = Timing::default();
        let mut item = ItemLifecycle::new();

        let reveal = item.activate(0, anchor(), &timing).unwrap();
        assert!(item.fire(reveal.seq));

        let unmount = item.deactivate(0, &timing).unwrap();
        let reopened = item.activate(0, Point::new(40.0, 60.0), &timing).unwrap();

        // the stale unmount must not tear the item down
        assert!(!item.fire(unmount.seq));
        assert!(item.is_mounted());

        assert!(item.fire(reopened.seq));
        assert_eq!(item.phase(), Phase::Visible);
        let style = item.style(NO_OFFSET, NO_DELAY).unwrap();
        assert_eq!(style.position, Point::new(40.0, 60.0));
    }

    #[test]
    fn anchor_moves_drag_mounted_items_without_phase_changes() {
        let timing = Timing::default();
        let mut item = ItemLifecycle::new();

        let reveal = item.activate(0, anchor(), &timing).unwrap();
        item.anchor_moved(Point::new(10.0, 20.0));
        assert_eq!(item.phase(), Phase::Hidden);
        assert_eq!(
            item.style(NO_OFFSET, NO_DELAY).unwrap().position,
            Point::new(10.0, 20.0)
        );

        // the pending reveal is untouched by the move
        assert!(item.fire(reveal.seq));
        assert_eq!(item.phase(), Phase::Visible);
    }

    #[test]
    fn unmounted_items_ignore_anchor_moves_and_close_edges() {
        let timing = Timing::default();
        let mut item = ItemLifecycle::new();

        item.anchor_moved(Point::new(10.0, 20.0));
        assert!(item.style(NO_OFFSET, NO_DELAY).is_none());
        assert!(item.deactivate(0, &timing).is_none());
    }

    #[test]
    fn deactivate_is_idempotent_while_closing() {
        let timing = Timing::default();
        let mut item = ItemLifecycle::new();

        item.activate(0, anchor(), &timing);
        assert!(item.deactivate(0, &timing).is_some());
        assert!(item.deactivate(0, &timing).is_none());
    }
}
