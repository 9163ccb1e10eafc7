use shoji_config::{LayoutSpec, WindowGeometry};

use super::{Rect, WindowId};

pub const MFACT_MIN: f64 = 0.05;
pub const MFACT_MAX: f64 = 0.95;

/// Runtime parameters consumed by arrange strategies.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    pub nmaster: u32,
    pub mfact: f64,
}

pub type ArrangeFn = fn(&Rect, &[WindowId], &LayoutParams) -> Vec<WindowGeometry>;

/// One selectable arrangement strategy. An absent arrange handler means
/// floating behavior: the arrange step is skipped entirely.
pub struct Layout {
    pub symbol: String,
    pub arrange: Option<ArrangeFn>,
}

/// Ordered, load-time-fixed list of layouts. The current-layout cursor
/// lives in the session, not here.
pub struct LayoutRegistry {
    layouts: Vec<Layout>,
}

impl LayoutRegistry {
    pub fn from_specs(specs: &[LayoutSpec]) -> Result<Self, String> {
        if specs.is_empty() {
            return Err("at least one layout is required".to_string());
        }
        let mut layouts = Vec::with_capacity(specs.len());
        for spec in specs {
            let arrange = match spec.arrange.as_deref() {
                None => None,
                Some("tile") => Some(tile as ArrangeFn),
                Some("monocle") => Some(monocle as ArrangeFn),
                Some(other) => return Err(format!("unknown arrange strategy: {}", other)),
            };
            layouts.push(Layout {
                symbol: spec.symbol.clone(),
                arrange,
            });
        }
        Ok(Self { layouts })
    }

    pub fn get(&self, index: usize) -> Option<&Layout> {
        self.layouts.get(index)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

/// Master/stack split. The first `nmaster` windows share the left column
/// (sized by `mfact`), the rest stack in the right column. With no stack
/// windows the masters take the full width, and vice versa.
pub fn tile(frame: &Rect, windows: &[WindowId], params: &LayoutParams) -> Vec<WindowGeometry> {
    if windows.is_empty() {
        return vec![];
    }

    let count = windows.len() as u32;
    let master_count = params.nmaster.min(count);
    let stack_count = count - master_count;

    let (master_width, stack_width) = if master_count == 0 {
        (0, frame.width)
    } else if stack_count == 0 {
        (frame.width, 0)
    } else {
        let mw = (frame.width as f64 * params.mfact) as u32;
        (mw, frame.width - mw)
    };

    let mut geometries = Vec::with_capacity(windows.len());

    if master_count > 0 {
        let height = frame.height / master_count;
        for (i, &id) in windows.iter().enumerate().take(master_count as usize) {
            let y = i as u32 * height;
            // Last master fills the remainder to absorb rounding
            let h = if i as u32 == master_count - 1 {
                frame.height - y
            } else {
                height
            };
            geometries.push(WindowGeometry {
                id,
                x: frame.x,
                y: frame.y + y as i32,
                width: master_width,
                height: h,
            });
        }
    }

    if stack_count > 0 {
        let height = frame.height / stack_count;
        let x = frame.x + master_width as i32;
        for (i, &id) in windows.iter().skip(master_count as usize).enumerate() {
            let y = i as u32 * height;
            let h = if i as u32 == stack_count - 1 {
                frame.height - y
            } else {
                height
            };
            geometries.push(WindowGeometry {
                id,
                x,
                y: frame.y + y as i32,
                width: stack_width,
                height: h,
            });
        }
    }

    geometries
}

/// Every window fills the whole frame.
pub fn monocle(frame: &Rect, windows: &[WindowId], _params: &LayoutParams) -> Vec<WindowGeometry> {
    windows
        .iter()
        .map(|&id| WindowGeometry {
            id,
            x: frame.x,
            y: frame.y,
            width: frame.width,
            height: frame.height,
        })
        .collect()
}
