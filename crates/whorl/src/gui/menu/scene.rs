use super::animate::{Animator, ItemFrame};
use super::icon::IconCache;
use super::SLIDE_DURATION;
use std::time::Instant;
use whorl_core::controller::{Menu, Rect};
use whorl_core::geometry::Point;

/// Everything the draw func needs: the controller, the interpolated frames
/// and the rasterized icons.
pub struct Scene {
    pub menu: Menu,
    animator: Animator,
    icons: IconCache,
}

impl Scene {
    pub fn new(menu: Menu) -> Self {
        let icons = IconCache::for_catalog(menu.catalog());
        Self {
            menu,
            animator: Animator::new(SLIDE_DURATION),
            icons,
        }
    }

    /// Advance the animation one step and feed the controller fresh hit
    /// regions for every rendered item. Returns whether the output changed
    /// and a redraw is due.
    pub fn refresh(&mut self, now: Instant) -> bool {
        {
            let styles = self.menu.styles();
            self.animator.sync(now, &styles);
        }
        let changed = self.animator.sample(now);
        if changed {
            let diameter = self.menu.ring_config().item_radius * 2.0;
            let regions: Vec<_> = self
                .animator
                .frames()
                .iter()
                .map(|frame| {
                    let rect = Rect::new(frame.position.x, frame.position.y, diameter, diameter);
                    (frame.name.clone(), rect)
                })
                .collect();
            for (name, rect) in regions {
                self.menu.update_region(&name, rect);
            }
        }
        changed
    }

    /// Swap in a reconfigured controller (config reload); animation state
    /// and icons are rebuilt for the new catalog.
    pub fn reconfigure(&mut self, menu: Menu) {
        *self = Scene::new(menu);
    }

    pub fn frames(&self) -> &[ItemFrame] {
        self.animator.frames()
    }

    pub fn icons(&self) -> &IconCache {
        &self.icons
    }

    pub fn item_radius(&self) -> f64 {
        self.menu.ring_config().item_radius
    }

    /// Center of the ring, while anything is mounted.
    pub fn anchor_center(&self) -> Option<Point> {
        self.menu.any_mounted().then(|| {
            let radius = self.item_radius();
            self.menu.anchor() + Point::new(radius, radius)
        })
    }
}
