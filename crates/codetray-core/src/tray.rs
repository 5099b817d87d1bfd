use crate::config::{Side, TrayDimensions, COLLAPSE_DELAY};
use crate::timer::{TimerId, TimerSlot};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// What the tray needs to know about the display it lives on.
pub trait Screen {
    /// Current screen dimensions. Queried on every geometry computation.
    fn size(&self) -> ScreenSize;
    /// Current pointer location, if known.
    fn pointer(&self) -> Option<Point>;
}

/// Window rectangle for the tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub fn contains(&self, point: Point) -> bool {
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        px >= x
            && py >= y
            && px < x + i64::from(self.width)
            && py < y + i64::from(self.height)
    }
}

/// Rectangle of a tray flush against `side`.
pub fn compute_geometry(
    side: Side,
    expanded: bool,
    dims: &TrayDimensions,
    screen: ScreenSize,
) -> Geometry {
    let (width, height) = if expanded {
        (dims.expanded_width, dims.expanded_height)
    } else {
        (dims.collapsed_width, dims.collapsed_height)
    };
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    let to_i32 = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);

    match side {
        Side::Right => Geometry {
            x: to_i32(screen.width - width),
            y: 0,
            width,
            height: screen.height,
        },
        Side::Left => Geometry {
            x: 0,
            y: 0,
            width,
            height: screen.height,
        },
        Side::Top => Geometry {
            x: 0,
            y: 0,
            width: screen.width,
            height,
        },
        Side::Bottom => Geometry {
            x: 0,
            y: to_i32(screen.height - height),
            width: screen.width,
            height,
        },
    }
}

#[derive(Debug)]
pub struct TrayState {
    pub expanded: bool,
    pub pinned: bool,
    pub side: Side,
    pending_collapse: TimerSlot,
}

impl TrayState {
    pub fn pending_collapse(&self) -> Option<TimerId> {
        self.pending_collapse.pending()
    }
}

/// Expanded/collapsed and edge-position state of the tray.
///
/// Methods that change the on-screen rectangle return the new `Geometry`
/// for the shell to apply.
#[derive(Debug)]
pub struct TrayStateMachine {
    state: TrayState,
    dims: TrayDimensions,
    collapse_delay: Duration,
}

impl TrayStateMachine {
    pub fn new(side: Side, dims: TrayDimensions) -> Self {
        Self {
            state: TrayState {
                expanded: true,
                pinned: false,
                side,
                pending_collapse: TimerSlot::new(),
            },
            dims,
            collapse_delay: COLLAPSE_DELAY,
        }
    }

    pub fn state(&self) -> &TrayState {
        &self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state.expanded
    }

    pub fn is_pinned(&self) -> bool {
        self.state.pinned
    }

    pub fn side(&self) -> Side {
        self.state.side
    }

    pub fn dimensions(&self) -> &TrayDimensions {
        &self.dims
    }

    pub fn current_geometry(&self, screen: &impl Screen) -> Geometry {
        compute_geometry(self.state.side, self.state.expanded, &self.dims, screen.size())
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.pending_collapse.deadline()
    }

    pub fn pointer_enter(&mut self, screen: &impl Screen) -> Option<Geometry> {
        if let Some(id) = self.state.pending_collapse.cancel() {
            trace!(?id, "Collapse cancelled by pointer enter");
        }
        if self.state.expanded {
            return None;
        }
        self.state.expanded = true;
        debug!(side = %self.state.side, "Tray expanded");
        Some(self.current_geometry(screen))
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        if !self.state.expanded || self.state.pinned {
            return;
        }
        let id = self.state.pending_collapse.start(now, self.collapse_delay);
        trace!(?id, "Collapse scheduled");
    }

    /// Run the collapse timer if it is due.
    ///
    /// The pointer is probed again first: if it is still inside the tray
    /// the timer is stale and nothing happens.
    pub fn fire_due(&mut self, now: Instant, screen: &impl Screen) -> Option<Geometry> {
        let id = self.state.pending_collapse.take_due(now)?;
        if !self.state.expanded {
            return None;
        }

        let bounds = self.current_geometry(screen);
        if let Some(pointer) = screen.pointer() {
            if bounds.contains(pointer) {
                trace!(?id, "Stale collapse timer, pointer still inside");
                return None;
            }
        }

        self.state.expanded = false;
        debug!(side = %self.state.side, "Tray collapsed");
        Some(self.current_geometry(screen))
    }

    pub fn set_side(&mut self, side: Side, screen: &impl Screen) -> Geometry {
        self.state.side = side;
        self.current_geometry(screen)
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.state.pinned = pinned;
        if pinned {
            self.state.pending_collapse.cancel();
        }
    }
}
