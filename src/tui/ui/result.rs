//! Prediction result panel.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::adapters::AssetCatalog;
use crate::domain::{Estimate, FeatureImportances};
use crate::tui::styles::BatteryTheme;

/// Shown instead of the chart when the model has no importances.
pub const IMPORTANCE_FALLBACK: &str = "Feature importance available only for tree-based models.";

/// Bar values are integers; weights are scaled by this factor.
const BAR_RESOLUTION: f64 = 1000.0;

/// Borders plus hours, band, tips heading and up to three tips.
const ESTIMATE_HEIGHT: u16 = 8;

/// Result panel state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Last submission's estimate
    Complete {
        estimate: Estimate,
        importances: Option<FeatureImportances>,
    },
}

/// Render the result panel
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState, assets: &AssetCatalog) {
    match state {
        ResultState::Idle => render_idle(f, area),
        ResultState::Complete {
            estimate,
            importances,
        } => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(ESTIMATE_HEIGHT), Constraint::Min(0)])
                .split(area);

            render_estimate(f, rows[0], estimate, assets);
            render_importances(f, rows[1], importances.as_ref());
        }
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Adjust your daily usage above",
            BatteryTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", BatteryTheme::text_muted()),
            Span::styled("[Enter]", BatteryTheme::key_hint()),
            Span::styled(" to predict battery life", BatteryTheme::text_muted()),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(BatteryTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_estimate(f: &mut Frame, area: Rect, estimate: &Estimate, assets: &AssetCatalog) {
    let computed_at = format!(" Computed at {} ", estimate.created_at.format("%H:%M:%S UTC"));
    let block = Block::default()
        .title(Span::styled(" Prediction Result ", BatteryTheme::subtitle()))
        .title_bottom(
            Line::from(Span::styled(computed_at, BatteryTheme::text_muted()))
                .alignment(Alignment::Right),
        )
        .borders(Borders::ALL)
        .border_style(BatteryTheme::border_focused());

    let band_style = BatteryTheme::band(estimate.band);
    let icon = assets
        .icon(estimate.band)
        .map_or(estimate.band.icon_asset(), |a| a.name);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Estimated Battery Life: ", BatteryTheme::text_secondary()),
            Span::styled(estimate.hours_display(), band_style.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled(format!("● {} ", estimate.band), band_style),
            Span::styled(estimate.band.description(), band_style),
            Span::styled(format!("  [{icon}]"), BatteryTheme::text_muted()),
        ]),
        Line::from(Span::styled("Optimization Tips", BatteryTheme::subtitle())),
    ];

    if estimate.advisories.is_empty() {
        lines.push(Line::from(Span::styled(
            "No optimization tips for this usage.",
            BatteryTheme::text_muted(),
        )));
    } else {
        for advisory in &estimate.advisories {
            lines.push(Line::from(vec![
                Span::styled("! ", BatteryTheme::warning()),
                Span::styled(advisory.message(), BatteryTheme::text()),
            ]));
        }
    }

    let content = Paragraph::new(lines).block(block);
    f.render_widget(content, area);
}

fn render_importances(f: &mut Frame, area: Rect, importances: Option<&FeatureImportances>) {
    let block = Block::default()
        .title(Span::styled(" Feature Importance ", BatteryTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(BatteryTheme::border());

    let Some(importances) = importances else {
        let info = Paragraph::new(Span::styled(IMPORTANCE_FALLBACK, BatteryTheme::info()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(info, area);
        return;
    };

    let bars: Vec<Bar> = importances
        .iter()
        .map(|(feature, weight)| {
            Bar::default()
                .label(Line::from(feature.label()))
                .value((weight * BAR_RESOLUTION).round() as u64)
                .text_value(format!("{weight:.3}"))
                .style(BatteryTheme::info())
                .value_style(BatteryTheme::text())
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(BAR_RESOLUTION as u64)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}
