//! UI rendering using ratatui

use std::collections::HashSet;

use compform_core::{Field, FieldKind, Preset, StepTarget, BUILD_PRESETS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Control, Mode, PRESET_COLUMNS};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Tour highlight color
const HIGHLIGHT: Color = Color::Yellow;
/// Selected preset
const SUCCESS: Color = Color::Green;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

const REPOSITORY_FIELDS: [Field; 4] = [Field::Organization, Field::Repository, Field::Branch, Field::Directory];
const COMPONENT_FIELDS: [Field; 3] = [Field::DisplayName, Field::Name, Field::Description];

/// Render the entire UI
///
/// Returns the tour targets that were fully drawn, so the tour can check
/// for them before pointing at one.
pub fn render(frame: &mut Frame, app: &App) -> HashSet<StepTarget> {
    let mut visible = HashSet::new();
    let preset_rows = BUILD_PRESETS.len().div_ceil(PRESET_COLUMNS) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Header + start button
            Constraint::Length(4),               // Repository details
            Constraint::Length(4),               // Component details
            Constraint::Length(preset_rows + 3), // Build details
            Constraint::Length(3),               // Submit button
            Constraint::Min(0),
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_field_row(frame, app, chunks[1], "Repository Details", &REPOSITORY_FIELDS, &mut visible);
    render_field_row(frame, app, chunks[2], "Component Details", &COMPONENT_FIELDS, &mut visible);
    render_presets(frame, app, chunks[3], &mut visible);
    render_submit(frame, app, chunks[4], &mut visible);
    render_status_bar(frame, app, chunks[6]);

    if let Some(notice) = &app.notice.0 {
        render_notice(frame, &notice.title, &notice.body);
    }

    visible
}

/// Border style for a control: tour highlight beats keyboard focus
fn control_style(app: &App, control: Control, target: StepTarget) -> Style {
    if app.highlighter.active() == Some(target) {
        Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
    } else if app.focused() == control && app.mode != Mode::Touring {
        Style::default().fg(app.mode.color())
    } else {
        Style::default().fg(SECONDARY)
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let button_style = if app.focused() == Control::StartTour && app.mode == Mode::Normal {
        Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT)
    };

    let line = Line::from(vec![
        Span::styled("[ Start Guided Autofill ]", button_style),
        Span::raw("  "),
        Span::styled("press 'a' from anywhere", Style::default().fg(DIM)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Create Component ")
        .border_style(Style::default().fg(SECONDARY));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// A heading line followed by one bordered box per field
fn render_field_row(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    heading: &str,
    fields: &[Field],
    visible: &mut HashSet<StepTarget>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(3)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(heading, Style::default().add_modifier(Modifier::BOLD))),
        rows[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, fields.len() as u32); fields.len()])
        .split(rows[1]);

    for (field, cell) in fields.iter().zip(columns.iter()) {
        render_field(frame, app, *field, *cell);
        if cell.height >= 3 && cell.width >= 6 {
            visible.insert(StepTarget::Field(*field));
        }
    }
}

fn render_field(frame: &mut Frame, app: &App, field: Field, area: Rect) {
    let target = StepTarget::Field(field);
    let control = Control::Field(field);
    let editing = app.mode == Mode::Edit && app.focused() == control;
    let value = app.form.field(field);

    let mut spans = Vec::new();
    if value.is_empty() && !editing {
        let placeholder = match field.kind() {
            FieldKind::Choice { placeholder, .. } => placeholder,
            FieldKind::Text { placeholder } => placeholder.unwrap_or(""),
        };
        spans.push(Span::styled(placeholder, Style::default().fg(DIM)));
    } else {
        spans.push(Span::raw(value));
    }
    if editing || app.highlighter.active() == Some(target) {
        spans.push(Span::styled("_", Style::default().fg(SUCCESS)));
    }
    if field.is_choice() {
        spans.push(Span::styled(" ▾", Style::default().fg(SECONDARY)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", field.label()))
        .border_style(control_style(app, control, target));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_presets(frame: &mut Frame, app: &App, area: Rect, visible: &mut HashSet<StepTarget>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled("Build Details", Style::default().add_modifier(Modifier::BOLD))),
        rows[0],
    );

    let tour_on_grid = matches!(app.highlighter.active(), Some(StepTarget::PresetButton(_)));
    let border_style = if tour_on_grid {
        Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
    } else if app.focused() == Control::Presets && app.mode == Mode::Normal {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(SECONDARY)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Build Preset ")
        .border_style(border_style);
    let inner = block.inner(rows[1]);
    let cell_width = (inner.width as usize) / PRESET_COLUMNS;

    let lines: Vec<Line> = Preset::all()
        .collect::<Vec<_>>()
        .chunks(PRESET_COLUMNS)
        .enumerate()
        .map(|(row, presets)| {
            let spans = presets
                .iter()
                .map(|preset| {
                    let label = format!("[ {} ]", preset.name());
                    if row < inner.height as usize && cell_width >= label.chars().count() {
                        visible.insert(StepTarget::PresetButton(*preset));
                    }
                    Span::styled(
                        format!("{label:<width$}", width = cell_width),
                        preset_style(app, *preset),
                    )
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), rows[1]);
}

fn preset_style(app: &App, preset: Preset) -> Style {
    let mut style = if app.form.preset() == Some(preset) {
        Style::default().fg(Color::Black).bg(SUCCESS)
    } else {
        Style::default()
    };
    if app.highlighter.active() == Some(StepTarget::PresetButton(preset)) {
        style = style.fg(HIGHLIGHT).add_modifier(Modifier::BOLD);
    } else if app.focused() == Control::Presets && app.mode == Mode::Normal && app.preset_cursor == preset.index() {
        style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
    }
    style
}

fn render_submit(frame: &mut Frame, app: &App, area: Rect, visible: &mut HashSet<StepTarget>) {
    let target = StepTarget::SubmitButton;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(control_style(app, Control::Submit, target));
    let label = Paragraph::new(Span::styled(
        "Create Component",
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(label, area);
    if area.height >= 3 && area.width >= 20 {
        visible.insert(target);
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.mode.display_name()),
            Style::default()
                .fg(Color::Black)
                .bg(app.mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    if let Some((step, total)) = app.highlighter.progress().filter(|_| app.highlighter.is_running()) {
        spans.push(Span::styled(
            format!("step {step}/{total} "),
            Style::default().fg(HIGHLIGHT),
        ));
    }

    match &app.status_message {
        Some(msg) => spans.push(Span::raw(msg.as_str())),
        None => {
            let hints = match app.mode {
                Mode::Normal => "Tab/j/k: move | ←/→: choose | Enter: edit/select | a: autofill | q: quit",
                Mode::Edit => "type to edit | Enter/Esc: done",
                Mode::Touring => "Esc: stop autofill",
                Mode::Notice => "Enter: dismiss",
            };
            spans.push(Span::styled(hints, Style::default().fg(SECONDARY)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Modal submission notice
fn render_notice(frame: &mut Frame, title: &str, body: &str) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = body.lines().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter to dismiss",
        Style::default().fg(SECONDARY),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

/// Rect centered in `area`, sized as a percentage of it
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use compform_core::TourTimings;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App, width: u16, height: u16) -> (HashSet<StepTarget>, String) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut visible = HashSet::new();
        terminal.draw(|frame| visible = render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        (visible, text)
    }

    #[test]
    fn test_full_size_draws_every_target() {
        let app = App::new(TourTimings::instant());
        let (visible, text) = draw(&app, 120, 30);

        assert_eq!(visible.len(), 7 + BUILD_PRESETS.len() + 1);
        assert!(text.contains("Repository Details"));
        assert!(text.contains("-- Select Organization --"));
        assert!(text.contains("[ Prism Mock ]"));
        assert!(text.contains("Create Component"));
    }

    #[test]
    fn test_short_terminal_hides_some_targets() {
        let app = App::new(TourTimings::instant());
        let (visible, _) = draw(&app, 120, 12);
        assert!(visible.len() < 7 + BUILD_PRESETS.len() + 1);
    }

    #[test]
    fn test_notice_popup_renders_body() {
        let mut app = App::new(TourTimings::instant());
        app.form.set_field(Field::Name, "greeting-service");
        app.submit().unwrap();

        let (_, text) = draw(&app, 120, 40);
        assert!(text.contains("Component Created"));
        assert!(text.contains("greeting-service"));
    }
}
