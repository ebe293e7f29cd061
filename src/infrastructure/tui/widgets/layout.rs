use ratatui::layout::{Constraint, Layout, Rect};

pub struct LayoutAreas {
    pub screen: Rect,
    pub status: Rect,
}

/// Screen on top, one-row status bar underneath.
pub fn compute_layout(area: Rect) -> LayoutAreas {
    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
    LayoutAreas {
        screen: chunks[0],
        status: chunks[1],
    }
}
