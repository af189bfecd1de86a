use crate::catalog::{Catalog, ItemName, MenuItem};
use crate::geometry::{Point, RingLayout};
use crate::lifecycle::{Deadline, ItemLifecycle, ItemStyle, Phase, Timing};

/// Ring dimensions. `item_radius` corrects the anchor so the press position
/// ends up at the center of the collapsed items rather than their corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingConfig {
    pub menu_radius: f64,
    pub item_radius: f64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            menu_radius: 100.0,
            item_radius: 25.0,
        }
    }
}

/// Axis-aligned hit-test region, in the same coordinate space as the
/// pointer events fed to [`Menu::pointer_down`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, target: Point) -> bool {
        target.x >= self.x
            && target.x < self.x + self.width
            && target.y >= self.y
            && target.y < self.y + self.height
    }
}

/// Registry of mounted item regions, keyed by item name.
///
/// The renderer re-registers each mounted item's region as it animates;
/// the controller consults the registry for the outside-click rule and
/// drops entries as items unmount. Owning this state here keeps the
/// containment query off the render tree.
#[derive(Debug, Default)]
pub struct HitRegistry {
    regions: Vec<(ItemName, Rect)>,
}

impl HitRegistry {
    pub fn update(&mut self, name: ItemName, rect: Rect) {
        match self.regions.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = rect,
            None => self.regions.push((name, rect)),
        }
    }

    pub fn remove(&mut self, name: &ItemName) {
        self.regions.retain(|(n, _)| n != name);
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn hit(&self, target: Point) -> bool {
        self.regions.iter().any(|(_, rect)| rect.contains(target))
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// The menu controller: single owner of the open flag, the anchor, the item
/// catalog and every item's lifecycle.
///
/// All methods run synchronously on the caller's thread. Deferred work is
/// returned as [`Deadline`]s for the event loop to schedule; elapsed
/// deadlines come back through [`Menu::deadline_fired`].
#[derive(Debug)]
pub struct Menu {
    catalog: Catalog,
    ring_config: RingConfig,
    timing: Timing,
    open: bool,
    anchor: Point,
    ring: Option<RingLayout>,
    items: Vec<ItemLifecycle>,
    registry: HitRegistry,
}

impl Menu {
    pub fn new(catalog: Catalog, ring_config: RingConfig, timing: Timing) -> Self {
        let items = (0..catalog.len()).map(|_| ItemLifecycle::new()).collect();
        Self {
            catalog,
            ring_config,
            timing,
            open: false,
            anchor: Point::default(),
            ring: None,
            items,
            registry: HitRegistry::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ring_config(&self) -> RingConfig {
        self.ring_config
    }

    pub fn any_mounted(&self) -> bool {
        self.items.iter().any(ItemLifecycle::is_mounted)
    }

    /// Open (or re-anchor) the menu at a pointer position. Returns the
    /// reveal deadlines to schedule; an empty catalog never opens.
    pub fn open_at(&mut self, pointer: Point) -> Vec<Deadline> {
        let ring = match RingLayout::new(
            self.catalog.len(),
            self.ring_config.menu_radius,
            self.ring_config.item_radius,
        ) {
            Ok(ring) => ring,
            Err(err) => {
                log::warn!("ignoring open request: {err}");
                return Vec::new();
            }
        };

        self.anchor_to(pointer);
        self.open = true;
        // the ring is sized once per activation; reconfigure() tears the
        // menu down before the catalog can change under it
        self.ring = Some(ring);
        log::debug!(
            "menu opened at ({:.0}, {:.0}) with {} items",
            self.anchor.x,
            self.anchor.y,
            self.catalog.len()
        );

        let anchor = self.anchor;
        let timing = self.timing;
        self.items
            .iter_mut()
            .enumerate()
            .filter_map(|(index, item)| item.activate(index, anchor, &timing))
            .collect()
    }

    /// Close the menu. Items collapse back to the anchor and unmount after
    /// the close delay; the returned deadlines drive the unmounts.
    pub fn close(&mut self) -> Vec<Deadline> {
        self.open = false;
        log::debug!("menu closed");
        let timing = self.timing;
        self.items
            .iter_mut()
            .enumerate()
            .filter_map(|(index, item)| item.deactivate(index, &timing))
            .collect()
    }

    /// Global pointer-down. A press inside any mounted item's region keeps
    /// the menu open; anything else (including a press while no regions are
    /// registered) closes it. Returns the unmount deadlines when a close
    /// was triggered.
    pub fn pointer_down(&mut self, target: Point) -> Option<Vec<Deadline>> {
        if !self.open {
            return None;
        }
        if self.registry.hit(target) {
            return None;
        }
        Some(self.close())
    }

    /// Live anchor re-sync: mounted items follow immediately, with no phase
    /// restarts and no new deadlines.
    pub fn anchor_to(&mut self, pointer: Point) {
        self.anchor = Point::new(
            pointer.x - self.ring_config.item_radius,
            pointer.y - self.ring_config.item_radius,
        );
        for item in &mut self.items {
            item.anchor_moved(self.anchor);
        }
    }

    /// Deliver an elapsed deadline. Stale and out-of-range deliveries are
    /// no-ops; returns whether any item actually transitioned.
    pub fn deadline_fired(&mut self, deadline: Deadline) -> bool {
        let Some(item) = self.items.get_mut(deadline.item) else {
            return false;
        };
        if !item.fire(deadline.seq) {
            return false;
        }
        if item.phase() == Phase::Unmounted {
            if let Some(entry) = self.catalog.get(deadline.item) {
                self.registry.remove(&entry.name);
            }
            if !self.any_mounted() {
                self.ring = None;
            }
        }
        true
    }

    /// Current render styles for all mounted items, in catalog order.
    pub fn styles(&self) -> Vec<(usize, &MenuItem, ItemStyle)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let entry = self.catalog.get(index)?;
                let offset = self
                    .ring
                    .as_ref()
                    .map(|ring| ring.offset(index))
                    .unwrap_or_default();
                let style = item.style(offset, self.timing.stagger * index as u32)?;
                Some((index, entry, style))
            })
            .collect()
    }

    /// Renderer feedback: the current on-screen region of a mounted item.
    pub fn update_region(&mut self, name: &ItemName, rect: Rect) {
        self.registry.update(name.clone(), rect);
    }

    /// Swap catalog and tuning (config reload). Tears the menu down;
    /// deadlines still in flight against the old catalog are invalidated by
    /// the generation counters of the fresh lifecycles.
    pub fn reconfigure(&mut self, catalog: Catalog, ring_config: RingConfig, timing: Timing) {
        self.catalog = catalog;
        self.ring_config = ring_config;
        self.timing = timing;
        self.open = false;
        self.ring = None;
        self.items = (0..self.catalog.len())
            .map(|_| ItemLifecycle::new())
            .collect();
        self.registry.clear();
    }
}
