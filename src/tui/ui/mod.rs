//! UI module: View components for the TUI.

pub mod result;
pub mod usage_form;

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::styles::BatteryTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let p = Paragraph::new(Line::from(Span::styled(
        "Statistical estimate. Real battery life varies with device age and network.",
        BatteryTheme::text_muted(),
    )))
    .alignment(Alignment::Center);

    f.render_widget(p, area);
}
