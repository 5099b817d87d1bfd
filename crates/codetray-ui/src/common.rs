use codetray_core::{Geometry, Point, Screen, ScreenSize};
use crossterm::terminal;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
};
use std::cell::Cell;

pub const BG: Color = Color::Rgb(0x1e, 0x1e, 0x1e);
pub const FG: Color = Color::Rgb(0xff, 0xff, 0xff);
pub const ACCENT: Color = Color::Rgb(0x00, 0x7a, 0xcc);
pub const BUTTON: Color = Color::Rgb(0x33, 0x33, 0x33);

/// The terminal acting as the tray's screen. The pointer is the last
/// position reported by a mouse event.
#[derive(Default)]
pub struct TerminalScreen {
    pointer: Cell<Option<Point>>,
    fixed_size: Option<ScreenSize>,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_size(width: u32, height: u32) -> Self {
        Self {
            pointer: Cell::new(None),
            fixed_size: Some(ScreenSize { width, height }),
        }
    }

    pub fn set_pointer(&self, column: u16, row: u16) {
        self.pointer.set(Some(Point {
            x: i32::from(column),
            y: i32::from(row),
        }));
    }
}

impl Screen for TerminalScreen {
    fn size(&self) -> ScreenSize {
        if let Some(size) = self.fixed_size {
            return size;
        }
        let (width, height) = terminal::size().unwrap_or((80, 24));
        ScreenSize {
            width: u32::from(width),
            height: u32::from(height),
        }
    }

    fn pointer(&self) -> Option<Point> {
        self.pointer.get()
    }
}

/// Terminal cell rectangle for a tray geometry.
pub fn geometry_to_rect(geometry: Geometry) -> Rect {
    let clamp = |v: i64| u16::try_from(v.max(0)).unwrap_or(u16::MAX);
    Rect::new(
        clamp(i64::from(geometry.x)),
        clamp(i64::from(geometry.y)),
        clamp(i64::from(geometry.width)),
        clamp(i64::from(geometry.height)),
    )
}

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_maps_to_cells() {
        let rect = geometry_to_rect(Geometry {
            x: 44,
            y: 0,
            width: 36,
            height: 24,
        });
        assert_eq!(rect, Rect::new(44, 0, 36, 24));
    }

    #[test]
    fn pointer_tracks_last_mouse_position() {
        let screen = TerminalScreen::new();
        assert_eq!(screen.pointer(), None);
        screen.set_pointer(3, 7);
        assert_eq!(screen.pointer(), Some(Point { x: 3, y: 7 }));
    }

    #[test]
    fn centered_rect_stays_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 50, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.y >= outer.y && inner.bottom() <= outer.bottom());
    }
}
