//! UI rendering for the terminal deck.
//!
//! `draw` renders one frame from the coordinator and the app model and
//! returns where the clickable widgets ended up.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, LineGauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Button, Hitboxes, InputMode};
use crate::audio::{AudioBackend, Coordinator, PlaybackState};
use crate::config::Settings;
use crate::library::{Track, UNKNOWN};

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] scrub -/+{scrub_seconds}s"),
        "[+/-] volume".to_string(),
        "[r] loop".to_string(),
        "[s] stop".to_string(),
        "[a] add songs".to_string(),
        "[j/k] cursor".to_string(),
        "[enter] play selected".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format a `Duration` as `M:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    }
}

/// Playlist row text; falls back to the file name when the title is unknown.
fn track_row(index: usize, track: &Track) -> String {
    let name = if track.title == UNKNOWN {
        track.file_name()
    } else {
        track.title.clone()
    };
    let mut row = format!("{:>3}. {} - {}", index + 1, track.artist, name);
    if !track.duration.is_zero() {
        row.push_str(&format!("  ({})", format_mmss(track.duration)));
    }
    row
}

/// Ascii platter: spokes turn with the platter angle, the needle sits on the right.
fn platter_lines(app: &App) -> Vec<Line<'static>> {
    let s = app.deck.spoke();
    let n = app.deck.needle_glyph();
    vec![
        Line::from(format!("  ╭───────╮ {n}")),
        Line::from(format!("  │   {s}   │ {n}")),
        Line::from(format!("  │ {s} ● {s} │  ")),
        Line::from(format!("  │   {s}   │  ")),
        Line::from("  ╰───────╯  ".to_string()),
    ]
}

fn status_line<B: AudioBackend>(app: &App, player: &Coordinator<B>) -> Line<'static> {
    if let InputMode::AddSongs(buf) = &app.input {
        return Line::from(format!(" add songs (enter to load, esc to cancel): {buf}_"));
    }
    if let Some(err) = player.last_error() {
        return Line::from(format!(" error: {err}")).red();
    }
    let mut text = format!(" {}", state_label(player.state()));
    if let Some(msg) = &app.status {
        text.push_str(" • ");
        text.push_str(msg);
    }
    Line::from(text)
}

/// Render the entire UI into `frame`. Returns the widget rects for mouse hit tests.
pub fn draw<B: AudioBackend>(
    frame: &mut Frame,
    app: &App,
    player: &Coordinator<B>,
    settings: &Settings,
) -> Hitboxes {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" vibe ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Deck: platter on the left, now playing on the right.
    let deck_block = Block::bordered().title(" deck ");
    let deck_inner = deck_block.inner(chunks[1]);
    frame.render_widget(deck_block, chunks[1]);

    let deck = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(15), Constraint::Min(10)])
        .split(deck_inner);
    frame.render_widget(Paragraph::new(platter_lines(app)), deck[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(deck[1]);

    let width = usize::from(rows[0].width);
    let (title, artist, total) = match player.current_track() {
        Some(t) => (t.title.as_str(), t.artist.as_str(), t.duration),
        None => ("Nothing playing", UNKNOWN, Duration::ZERO),
    };
    frame.render_widget(
        Paragraph::new(app.deck.marquee(title, width)).bold(),
        rows[0],
    );
    frame.render_widget(Paragraph::new(app.deck.marquee(artist, width)), rows[1]);

    let progress_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(5),
            Constraint::Length(7),
        ])
        .split(rows[3]);
    let shown_elapsed = if app.progress.is_dragging() {
        total.mul_f64(app.progress.value())
    } else {
        player.elapsed()
    };
    frame.render_widget(
        Paragraph::new(format_mmss(shown_elapsed)).alignment(Alignment::Right),
        progress_row[0],
    );
    let progress_area = Rect {
        x: progress_row[1].x + 1,
        width: progress_row[1].width.saturating_sub(2),
        ..progress_row[1]
    };
    frame.render_widget(
        LineGauge::default()
            .ratio(app.progress.value())
            .label("")
            .filled_style(Style::default().add_modifier(Modifier::BOLD)),
        progress_area,
    );
    frame.render_widget(Paragraph::new(format_mmss(total)), progress_row[2]);

    let volume_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(22),
            Constraint::Min(1),
        ])
        .split(rows[4]);
    frame.render_widget(
        Paragraph::new(format!("{:>3}%", (app.volume.value() * 100.0).round() as u32))
            .alignment(Alignment::Right),
        volume_row[0],
    );
    let volume_area = Rect {
        x: volume_row[1].x + 1,
        width: volume_row[1].width.saturating_sub(2),
        ..volume_row[1]
    };
    frame.render_widget(
        LineGauge::default().ratio(app.volume.value()).label(""),
        volume_area,
    );
    frame.render_widget(
        Paragraph::new(format!(" {}", player.loop_mode().label())).italic(),
        volume_row[2],
    );

    // Transport buttons
    let button_rects = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(Button::ALL.map(|_| Constraint::Length(12)))
        .split(chunks[2]);
    let mut buttons = Vec::with_capacity(Button::ALL.len());
    for (button, rect) in Button::ALL.into_iter().zip(button_rects.iter().copied()) {
        let label = match button {
            Button::PlayPause if player.state() == PlaybackState::Playing => "⏯ pause",
            _ => button.label(),
        };
        let style = if app.pressed() == Some(button) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(label)
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::bordered()),
            rect,
        );
        buttons.push((button, rect));
    }

    // Playlist. Only the visible window is built, centered on the cursor.
    {
        let tracks = player.tracks();
        let total = tracks.len();
        let list_height = usize::from(chunks[3].height.saturating_sub(2));
        let sel_pos = app.selected.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = sel_pos.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let current = player.current_index();
        let items: Vec<ListItem> = tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let i = start + offset;
                let row = track_row(i, track);
                if Some(i) == current {
                    ListItem::new(format!("♪ {row}"))
                        .style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    ListItem::new(format!("  {row}"))
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    frame.render_widget(Paragraph::new(status_line(app, player)), chunks[4]);

    let footer = Paragraph::new(controls_text(settings.controls.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);

    Hitboxes {
        progress: progress_area,
        volume: volume_area,
        buttons,
    }
}
