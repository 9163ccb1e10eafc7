use super::{Rect, TagSet, WindowId};

pub type MonitorId = usize;

#[derive(Debug, Clone)]
pub struct Monitor {
    pub id: MonitorId,
    pub frame: Rect,
    pub visible_tags: TagSet,
    /// The set shown before the last view change, for the view(0)
    /// toggle-back sentinel.
    pub previous_tags: TagSet,
    /// Stacking order of this monitor's windows. New windows attach at the
    /// head, so the newest window becomes the master under tiled layouts.
    pub stack: Vec<WindowId>,
}

impl Monitor {
    pub fn new(id: MonitorId, frame: Rect) -> Self {
        Self {
            id,
            frame,
            visible_tags: TagSet::new(1),
            previous_tags: TagSet::new(1),
            stack: Vec::new(),
        }
    }
}
