//! TUI views and rendering
//!
//! All rendering logic is contained here. Views draw from AppState but
//! never modify it; display derivation for results goes through
//! [`super::present`].

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tracing::trace;

use crate::api::DetailLevel;

use super::present::present;
use super::state::{AppState, CopyFeedback, Lifecycle};

mod colors {
    use ratatui::style::Color;

    pub const TITLE: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const SELECTED: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const COPIED: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const SPINNER: Color = Color::Rgb(255, 215, 0); // Gold
    pub const DIM: Color = Color::DarkGray;
}

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    trace!("render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(8), // Prompt input
            Constraint::Length(3), // Detail level selector
            Constraint::Length(1), // Status / error line
            Constraint::Min(0),    // Output
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);
    render_input(state, frame, chunks[1]);
    render_detail_selector(state, frame, chunks[2]);
    render_status_line(state, frame, chunks[3]);
    render_output(state, frame, chunks[4]);
    render_footer(frame, chunks[5]);
}

/// Render header with title and service status
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let mut spans = vec![
        Span::styled(
            "✨ Prompt Refinement",
            Style::default().fg(colors::TITLE).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            "Transform vague prompts into clear, structured prompts",
            Style::default().fg(colors::DIM),
        ),
    ];

    if let Some(status) = &state.service_status {
        let color = if status == "healthy" { Color::Green } else { Color::Red };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("● service: {}", status), Style::default().fg(color)));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the prompt input box with an inline cursor marker
fn render_input(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_input: called");
    let mut text = state.input.clone();
    if state.can_edit() {
        let cursor = state.cursor.min(text.len());
        text.insert(cursor, '▏');
    }

    let title = if state.can_edit() { " Raw Prompt " } else { " Raw Prompt (submitting…) " };
    let placeholder = state.input.is_empty() && state.can_edit();

    let paragraph = if placeholder {
        Paragraph::new(Line::from(vec![
            Span::raw("▏"),
            Span::styled("Example: Write code for login page", Style::default().fg(colors::DIM)),
        ]))
    } else {
        Paragraph::new(text)
    };

    frame.render_widget(
        paragraph
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

/// Render the detail level selector (radio semantics)
fn render_detail_selector(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_detail_selector: called");
    let mut spans = vec![Span::styled("Detail: ", Style::default().fg(colors::DIM))];

    for level in DetailLevel::ALL {
        let selected = level == state.detail_level;
        let marker = if selected { "(•) " } else { "( ) " };
        let style = if selected {
            Style::default().fg(colors::SELECTED).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!("{}{}", marker, level.label()), style));
        spans.push(Span::styled(format!(" - {}   ", level.description()), Style::default().fg(colors::DIM)));
    }

    let selector = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(selector, area);
}

/// Render the status line: spinner, error, or copy acknowledgement
fn render_status_line(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_status_line: called");
    let line = if state.lifecycle.is_submitting() {
        Line::from(Span::styled("◐ Refining…", Style::default().fg(colors::SPINNER)))
    } else if let Some(error) = state.display_error() {
        Line::from(Span::styled(format!("⚠ {}", error), Style::default().fg(colors::ERROR)))
    } else if state.copy_feedback == CopyFeedback::Acknowledged {
        Line::from(Span::styled("✓ Copied!", Style::default().fg(colors::COPIED)))
    } else {
        Line::default()
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the output section for a successful result
fn render_output(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_output: called");
    let Lifecycle::Success(result) = &state.lifecycle else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "The refined prompt will appear here.",
            Style::default().fg(colors::DIM),
        )))
        .block(Block::default().borders(Borders::ALL).title(" Refined Prompt "));
        frame.render_widget(hint, area);
        return;
    };

    let model = present(result);

    let mut constraints = vec![Constraint::Min(5)];
    if model.analysis.is_some() {
        constraints.push(Constraint::Length(analysis_height(&model)));
    }
    if model.improvements.is_some() {
        constraints.push(Constraint::Length(4));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let refined = Paragraph::new(model.refined_prompt.as_str())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Refined Prompt (Ctrl+Y to copy) "));
    frame.render_widget(refined, chunks[0]);

    let mut next = 1;
    if let Some(analysis) = &model.analysis {
        let mut lines: Vec<Line> = analysis
            .fields()
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{}: ", label), Style::default().fg(colors::TITLE)),
                    Span::raw((*value).to_string()),
                ])
            })
            .collect();

        if !analysis.added_details.is_empty() {
            lines.push(Line::from(Span::styled("Added Details:", Style::default().fg(colors::TITLE))));
            for detail in &analysis.added_details {
                lines.push(Line::from(format!("  • {}", detail)));
            }
        }

        let widget = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Automatic Analysis "));
        frame.render_widget(widget, chunks[next]);
        next += 1;
    }

    if let Some(improvements) = &model.improvements {
        let widget = Paragraph::new(improvements.as_str())
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" What Was Improved "));
        frame.render_widget(widget, chunks[next]);
    }
}

/// Height of the analysis pane: four fields, optional bullet list, borders
fn analysis_height(model: &super::present::DisplayModel) -> u16 {
    let Some(analysis) = &model.analysis else { return 0 };
    let mut lines = 4;
    if !analysis.added_details.is_empty() {
        lines += 1 + analysis.added_details.len();
    }
    (lines + 2).min(u16::MAX as usize) as u16
}

/// Render the keybind footer
fn render_footer(frame: &mut Frame, area: Rect) {
    trace!("render_footer: called");
    let footer = Line::from(vec![
        Span::styled("Enter", Style::default().fg(colors::TITLE)),
        Span::raw(" submit  "),
        Span::styled("Alt+Enter", Style::default().fg(colors::TITLE)),
        Span::raw(" newline  "),
        Span::styled("Tab", Style::default().fg(colors::TITLE)),
        Span::raw(" detail  "),
        Span::styled("Ctrl+Y", Style::default().fg(colors::TITLE)),
        Span::raw(" copy  "),
        Span::styled("Ctrl+L", Style::default().fg(colors::TITLE)),
        Span::raw(" clear  "),
        Span::styled("Esc", Style::default().fg(colors::TITLE)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(footer), area);
}
