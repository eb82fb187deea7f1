//! Calculator screen rendering.
//!
//! Renders the pending expression as a muted line above the display, both
//! right-aligned inside a fixed-width box.

use crate::calculator::DisplayState;

/// Inner width of the display box, in characters.
const DISPLAY_WIDTH: usize = 24;

/// Render the calculator display.
///
/// ```text
/// ┌──────────────────────────┐
/// │                      5 + │
/// │                        3 │
/// └──────────────────────────┘
/// ```
pub fn render_calculator(state: &DisplayState) -> String {
    let expression = state.pending_expression();
    let border = "─".repeat(DISPLAY_WIDTH + 2);

    let mut lines = Vec::with_capacity(4);
    lines.push(format!("┌{}┐", border));
    lines.push(display_line(&expression));
    lines.push(display_line(state.digits()));
    lines.push(format!("└{}┘", border));
    lines.join("\n")
}

/// One right-aligned line. Text wider than the box keeps its tail, the way a
/// calculator display scrolls.
fn display_line(text: &str) -> String {
    let count = text.chars().count();
    let visible: String = if count > DISPLAY_WIDTH {
        text.chars().skip(count - DISPLAY_WIDTH).collect()
    } else {
        text.to_string()
    };
    format!("│ {:>width$} │", visible, width = DISPLAY_WIDTH)
}
