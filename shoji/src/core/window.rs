use super::{MonitorId, TagSet};

pub type WindowId = u32;

#[derive(Debug, Clone)]
pub struct Window {
    pub id: WindowId,
    pub monitor: MonitorId,
    pub tags: TagSet,
    pub class: String,
    pub instance: String,
    pub title: String,
    pub floating: bool,
    /// Last geometry applied to (or reported for) this window. Floating
    /// windows keep this through arrange passes.
    pub frame: Rect,
}

impl Window {
    pub fn new(id: WindowId, monitor: MonitorId, tags: TagSet) -> Self {
        Self {
            id,
            monitor,
            tags,
            class: String::new(),
            instance: String::new(),
            title: String::new(),
            floating: false,
            frame: Rect::default(),
        }
    }

    pub fn visible_on(&self, visible_tags: TagSet) -> bool {
        self.tags.intersects(visible_tags)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}
