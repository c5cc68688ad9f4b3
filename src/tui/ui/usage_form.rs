//! Usage input form: five sliders and one number input.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};

use crate::domain::{Feature, UsageProfile};
use crate::tui::styles::BatteryTheme;

/// Longest number the capacity buffer accepts.
const MAX_INPUT_DIGITS: usize = 5;

/// How a control accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Arrow keys move the value in unit steps
    Slider,
    /// Digits are typed; arrows move in steps of 100
    NumberInput,
}

/// One bounded input control.
///
/// The value is clamped on every change, so it is always inside the
/// feature's range.
#[derive(Debug, Clone)]
pub struct UsageControl {
    pub feature: Feature,
    pub kind: ControlKind,
    value: f64,
    buffer: Option<String>,
}

impl UsageControl {
    #[must_use]
    pub fn new(feature: Feature, kind: ControlKind) -> Self {
        Self {
            feature,
            kind,
            value: feature.default_value(),
            buffer: None,
        }
    }

    /// Current committed value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        match self.kind {
            ControlKind::Slider => 1.0,
            ControlKind::NumberInput => 100.0,
        }
    }

    /// PageUp/PageDown step: a tenth of the range, at least one unit.
    #[must_use]
    pub fn coarse_step(&self) -> f64 {
        let (min, max) = self.feature.range();
        ((max - min) / 10.0).round().max(self.step())
    }

    /// Set the value, clamping to range. Returns true if clamping changed it.
    pub fn set(&mut self, value: f64) -> bool {
        self.buffer = None;
        self.value = self.feature.clamp(value);
        self.value != value
    }

    /// Commit any typed digits, then step from the committed value.
    /// Returns the commit's clamp notice, if any.
    pub fn adjust(&mut self, delta: f64) -> Option<String> {
        let notice = self.commit();
        self.set(self.value + delta);
        notice
    }

    pub fn to_min(&mut self) {
        self.set(self.feature.range().0);
    }

    pub fn to_max(&mut self) {
        self.set(self.feature.range().1);
    }

    /// Type a digit into a number input. Sliders ignore typing.
    pub fn input_char(&mut self, c: char) {
        if self.kind != ControlKind::NumberInput || !c.is_ascii_digit() {
            return;
        }
        let buffer = self.buffer.get_or_insert_with(String::new);
        if buffer.len() < MAX_INPUT_DIGITS {
            buffer.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.pop();
        }
    }

    /// Apply any typed digits. Returns a notice if the entry was clamped.
    pub fn commit(&mut self) -> Option<String> {
        let buffer = self.buffer.take()?;
        let Ok(typed) = buffer.parse::<f64>() else {
            // Empty buffer: keep the previous value.
            return None;
        };

        if self.set(typed) {
            Some(format!(
                "{} clamped to {:.0} {}",
                self.feature.label(),
                self.value,
                self.feature.unit()
            ))
        } else {
            None
        }
    }

    /// Text shown in the control.
    #[must_use]
    pub fn display(&self) -> String {
        match &self.buffer {
            Some(buffer) => buffer.clone(),
            None => format!("{:.0}", self.value),
        }
    }

    /// Position of the value inside its range, 0.0 to 1.0.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        let (min, max) = self.feature.range();
        ((self.value - min) / (max - min)).clamp(0.0, 1.0)
    }

    fn is_editing(&self) -> bool {
        self.buffer.is_some()
    }
}

/// Usage form state
pub struct UsageFormState {
    pub controls: Vec<UsageControl>,
    pub selected: usize,
    pub notice: Option<String>,
}

impl Default for UsageFormState {
    fn default() -> Self {
        let controls = Feature::ALL
            .into_iter()
            .map(|feature| {
                let kind = if feature == Feature::BatteryCapacity {
                    ControlKind::NumberInput
                } else {
                    ControlKind::Slider
                };
                UsageControl::new(feature, kind)
            })
            .collect();

        Self {
            controls,
            selected: 0,
            notice: None,
        }
    }
}

impl UsageFormState {
    #[must_use]
    pub fn selected_control(&self) -> &UsageControl {
        &self.controls[self.selected]
    }

    fn current(&mut self) -> &mut UsageControl {
        &mut self.controls[self.selected]
    }

    /// Move to the next control
    pub fn next_field(&mut self) {
        self.commit_current();
        self.selected = (self.selected + 1) % self.controls.len();
    }

    /// Move to the previous control
    pub fn prev_field(&mut self) {
        self.commit_current();
        if self.selected == 0 {
            self.selected = self.controls.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn increase(&mut self) {
        let step = self.current().step();
        self.notice = self.current().adjust(step);
    }

    pub fn decrease(&mut self) {
        let step = self.current().step();
        self.notice = self.current().adjust(-step);
    }

    pub fn increase_coarse(&mut self) {
        let step = self.current().coarse_step();
        self.notice = self.current().adjust(step);
    }

    pub fn decrease_coarse(&mut self) {
        let step = self.current().coarse_step();
        self.notice = self.current().adjust(-step);
    }

    /// Jump to the lower bound, discarding any typed digits.
    pub fn to_min(&mut self) {
        self.current().to_min();
        self.notice = None;
    }

    /// Jump to the upper bound, discarding any typed digits.
    pub fn to_max(&mut self) {
        self.current().to_max();
        self.notice = None;
    }

    pub fn input_char(&mut self, c: char) {
        self.current().input_char(c);
        self.notice = None;
    }

    pub fn delete_char(&mut self) {
        self.current().delete_char();
    }

    /// Restore every control to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn commit_current(&mut self) {
        if let Some(notice) = self.current().commit() {
            self.notice = Some(notice);
        }
    }

    /// Commit pending input and assemble the profile to submit.
    pub fn to_profile(&mut self) -> UsageProfile {
        self.commit_current();
        let values = Feature::ALL.map(|f| self.controls[f.index()].value());
        UsageProfile::from_array(values)
    }
}

/// Render the usage form in two columns, one row per control.
pub fn render_usage_form(f: &mut Frame, area: Rect, state: &UsageFormState) {
    let selected = state.selected_control();
    let (min, max) = selected.feature.range();

    let block = Block::default()
        .title(Span::styled(
            " Usage: predict daily battery life based on usage behavior ",
            BatteryTheme::subtitle(),
        ))
        .title_bottom(Span::styled(
            format!(
                " {}: {min:.0}-{max:.0} {} ",
                selected.feature.label(),
                selected.feature.unit()
            ),
            BatteryTheme::text_muted(),
        ))
        .borders(Borders::ALL)
        .border_style(BatteryTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let mid = (state.controls.len() + 1) / 2;
    render_control_column(f, columns[0], &state.controls[..mid], 0, state.selected);
    render_control_column(f, columns[1], &state.controls[mid..], mid, state.selected);
}

fn render_control_column(
    f: &mut Frame,
    area: Rect,
    controls: &[UsageControl],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = controls
        .iter()
        .map(|_| Constraint::Length(1))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, control) in controls.iter().enumerate() {
        render_control(f, rows[i], control, offset + i == selected);
    }
}

fn render_control(f: &mut Frame, area: Rect, control: &UsageControl, is_selected: bool) {
    let (marker, label_style) = if is_selected {
        ("▸ ", BatteryTheme::focused())
    } else {
        ("  ", BatteryTheme::text_secondary())
    };
    let label = Span::styled(format!("{marker}{:<16} ", control.feature.label()), label_style);

    match control.kind {
        ControlKind::Slider => {
            let gauge = LineGauge::default()
                .filled_style(BatteryTheme::slider_filled(is_selected))
                .unfilled_style(BatteryTheme::slider_track())
                .line_set(symbols::line::THICK)
                .label(Line::from(vec![
                    label,
                    Span::styled(format!("{:>3}", control.display()), BatteryTheme::text()),
                ]))
                .ratio(control.ratio());
            f.render_widget(gauge, area);
        }
        ControlKind::NumberInput => {
            let value_style = if control.is_editing() {
                BatteryTheme::focused()
            } else {
                BatteryTheme::text()
            };
            let content = Paragraph::new(Line::from(vec![
                label,
                Span::styled(control.display(), value_style),
                if is_selected {
                    Span::styled("▌", BatteryTheme::focused())
                } else {
                    Span::raw("")
                },
                Span::styled(format!(" {}", control.feature.unit()), BatteryTheme::text_muted()),
            ]));
            f.render_widget(content, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity_form() -> UsageFormState {
        let mut form = UsageFormState::default();
        form.selected = Feature::BatteryCapacity.index();
        form
    }

    #[test]
    fn test_defaults_submit_default_profile() {
        let mut form = UsageFormState::default();
        assert_eq!(form.to_profile(), UsageProfile::default());
    }

    #[test]
    fn test_slider_clamps_at_bounds() {
        let mut form = UsageFormState::default();
        form.selected = Feature::GamingHours.index();

        for _ in 0..50 {
            form.increase();
        }
        assert_eq!(form.selected_control().value(), 10.0);

        for _ in 0..50 {
            form.decrease_coarse();
        }
        assert_eq!(form.selected_control().value(), 0.0);
    }

    #[test]
    fn test_home_end_jump_to_bounds() {
        let mut form = UsageFormState::default();
        form.selected = Feature::Brightness.index();

        form.to_max();
        assert_eq!(form.selected_control().value(), 100.0);
        form.to_min();
        assert_eq!(form.selected_control().value(), 10.0);
    }

    #[test]
    fn test_number_input_typing_commits_on_submit() {
        let mut form = capacity_form();
        for c in "5000".chars() {
            form.input_char(c);
        }
        assert_eq!(form.selected_control().display(), "5000");

        let profile = form.to_profile();
        assert_eq!(profile.battery_capacity, 5000.0);
        assert!(form.notice.is_none());
    }

    #[test]
    fn test_number_input_clamps_typed_value() {
        let mut form = capacity_form();
        for c in "90000".chars() {
            form.input_char(c);
        }
        form.next_field();

        assert_eq!(form.controls[Feature::BatteryCapacity.index()].value(), 6000.0);
        assert!(form
            .notice
            .as_deref()
            .is_some_and(|n| n.contains("Battery Capacity clamped to 6000")));
    }

    #[test]
    fn test_stepping_typed_value_keeps_clamp_notice() {
        let mut form = capacity_form();
        for c in "90000".chars() {
            form.input_char(c);
        }
        form.increase();

        assert_eq!(form.selected_control().value(), 6000.0);
        assert!(form
            .notice
            .as_deref()
            .is_some_and(|n| n.contains("Battery Capacity clamped to 6000")));

        // A plain step afterwards clears it.
        form.decrease();
        assert_eq!(form.selected_control().value(), 5900.0);
        assert!(form.notice.is_none());
    }

    #[test]
    fn test_home_end_clear_notice() {
        let mut form = capacity_form();
        for c in "100".chars() {
            form.input_char(c);
        }
        form.decrease_coarse();
        assert!(form.notice.is_some());

        form.to_max();
        assert_eq!(form.selected_control().value(), 6000.0);
        assert!(form.notice.is_none());
    }

    #[test]
    fn test_number_input_ignores_letters_and_empty_buffer() {
        let mut form = capacity_form();
        form.input_char('x');
        form.input_char('7');
        form.delete_char();

        assert_eq!(form.to_profile().battery_capacity, 4000.0);
    }

    #[test]
    fn test_sliders_ignore_typing() {
        let mut form = UsageFormState::default();
        form.input_char('9');
        assert_eq!(form.selected_control().display(), "6");
    }

    #[test]
    fn test_navigation_wraps() {
        let mut form = UsageFormState::default();
        form.prev_field();
        assert_eq!(form.selected, 5);
        form.next_field();
        assert_eq!(form.selected, 0);
    }

    #[test]
    fn test_reset() {
        let mut form = UsageFormState::default();
        form.increase();
        form.next_field();
        form.reset();

        assert_eq!(form.selected, 0);
        assert_eq!(form.to_profile(), UsageProfile::default());
    }
}
