//! UI rendering for the debugger.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, List, ListItem},
    style::{Color, Style, Modifier},
};
use crate::crt::{WIDTH, HEIGHT};
use super::app::DebuggerApp;

/// Trace samples shown in the trace panel.
const TRACE_TAIL: usize = 8;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &DebuggerApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(55),
        ])
        .split(frame.area());

    // Left side: listing and status
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(chunks[0]);

    draw_listing(frame, left_chunks[0], app);
    draw_registers(frame, left_chunks[1], app);
    draw_status(frame, left_chunks[2], app);

    // Right side: screen, trace and help
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEIGHT as u16 + 2),
            Constraint::Min(6),
            Constraint::Length(4),
        ])
        .split(chunks[1]);

    draw_screen(frame, right_chunks[0], app);
    draw_trace(frame, right_chunks[1], app);
    draw_help(frame, right_chunks[2]);
}

/// Draw the program listing around the current PC.
fn draw_listing(frame: &mut Frame, area: Rect, app: &DebuggerApp) {
    let listing = app.get_listing((area.height as usize).saturating_sub(2));

    let items: Vec<ListItem> = listing
        .iter()
        .map(|(pc, line, is_current)| {
            let prefix = if *is_current { "▶ " } else { "  " };
            let bp = if app.breakpoints.contains(pc) { "●" } else { " " };

            let style = if *is_current {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if app.breakpoints.contains(pc) {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };

            ListItem::new(format!("{} {}{}", bp, prefix, line)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Program ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(list, area);
}

/// Draw register state.
fn draw_registers(frame: &mut Frame, area: Rect, app: &DebuggerApp) {
    let (beam_x, beam_y) = app.crt.position();

    let content = vec![
        Line::from(vec![
            Span::raw("X: "),
            Span::styled(format!("{:>6}", app.cpu.x()), Style::default().fg(Color::White)),
            Span::raw("   PC: "),
            Span::styled(format!("{:03}", app.cpu.pc()), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::raw("Cycle: "),
            Span::styled(format!("{}", app.cpu.cycle()), Style::default().fg(Color::Cyan)),
            Span::raw("   Signal: "),
            Span::styled(format!("{}", app.cpu.signal_strength()), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::raw("Beam: "),
            Span::styled(format!("({}, {})", beam_x, beam_y), Style::default().fg(Color::Magenta)),
            Span::raw("   State: "),
            Span::styled(format!("{:?}", app.cpu.state),
                if app.cpu.is_running() {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red)
                }),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(" Registers ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)));

    frame.render_widget(paragraph, area);
}

/// Draw the CRT, highlighting the pixel under the beam.
fn draw_screen(frame: &mut Frame, area: Rect, app: &DebuggerApp) {
    let (beam_x, beam_y) = app.crt.position();

    let rows: Vec<Line> = (0..HEIGHT)
        .map(|y| {
            let spans: Vec<Span> = (0..WIDTH)
                .map(|x| {
                    let lit = app.crt.pixel(x, y);
                    let ch = if lit { "#" } else { "." };
                    let style = if (x, y) == (beam_x, beam_y) {
                        Style::default().fg(Color::Black).bg(Color::Yellow)
                    } else if lit {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    Span::styled(ch, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let screen = Paragraph::new(rows)
        .block(Block::default()
            .title(" CRT ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)));

    frame.render_widget(screen, area);
}

/// Draw the most recent trace samples.
fn draw_trace(frame: &mut Frame, area: Rect, app: &DebuggerApp) {
    let trace = app.cpu.trace();
    let start = trace.len().saturating_sub(TRACE_TAIL);

    let items: Vec<ListItem> = trace[start..]
        .iter()
        .map(|sample| {
            let style = if sample.cycle % 40 == 20 {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(sample.to_string()).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Trace ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)));

    frame.render_widget(list, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &DebuggerApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("s: Step  r: Run  p: Pause  b: Breakpoint"),
        Line::from("x: Reset  q: Quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default()
        .title(" Help ")
        .borders(Borders::ALL));

    frame.render_widget(help, area);
}
