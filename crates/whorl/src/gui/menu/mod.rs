use std::time::Duration;

pub mod animate;
pub mod icon;
pub mod scene;
pub mod view;

pub use animate::{Animator, ItemFrame};
pub use icon::IconCache;
pub use scene::Scene;
pub use view::draw;

pub const ICON_SIZE: i32 = 128;
pub const ICON_SCALE: f64 = 0.6; // icon diameter relative to the item circle
pub const LABEL_FONT_SIZE: f64 = 11.0;
pub const ANCHOR_DOT_RADIUS: f64 = 8.0;
pub const SLIDE_DURATION: Duration = Duration::from_millis(250); // render-side transition length
