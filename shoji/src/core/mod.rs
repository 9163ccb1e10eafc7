mod layouts;
mod monitor;
mod rules_engine;
mod session;
mod tag;
mod window;

#[cfg(test)]
pub(crate) use session::testing;

pub use layouts::{monocle, tile, ArrangeFn, Layout, LayoutParams, LayoutRegistry, MFACT_MAX, MFACT_MIN};
pub use monitor::{Monitor, MonitorId};
pub use rules_engine::{Placement, Rule, RulesEngine};
pub use session::Session;
pub use tag::TagSet;
pub use window::{Rect, Window, WindowId};
