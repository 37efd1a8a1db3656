use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use heartscroll_core::media::MediaStatus;
use heartscroll_core::model::{SECTIONS, SectionId};
use heartscroll_core::scenes::CheeseView;
use heartscroll_core::tracker::{AnchorSource, StackedPage};
use heartscroll_core::{DeckSnapshot, Millis};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, Control};
use crate::particles::ParticleField;

const FRAME: Duration = Duration::from_millis(16);
const DOT_COLUMN: u16 = 4;

pub fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let started = Instant::now();
    let clock = || started.elapsed().as_millis() as Millis;

    let size = terminal.size()?;
    let (w, h) = content_size(size.width, size.height);
    app.resize(w, h);

    loop {
        let now = clock();
        app.frame(now);
        let snap = app.snapshot();
        terminal.draw(|frame| draw(frame, app, &snap, now))?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code, clock()) == Control::Quit {
                        break;
                    }
                }
                Event::Resize(width, height) => {
                    let (w, h) = content_size(width, height);
                    app.resize(w, h);
                }
                _ => {}
            }
        }
    }

    app.shutdown(clock());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Page area: everything under the header, left of the dot column.
fn content_size(width: u16, height: u16) -> (u16, u16) {
    (width.saturating_sub(DOT_COLUMN), height.saturating_sub(1).max(1))
}

fn draw(frame: &mut Frame<'_>, app: &App, snap: &DeckSnapshot, now: Millis) {
    let area = frame.area();

    let header = Block::default()
        .title(" heartscroll | ↑↓ scroll | 1-7 jump | ←→ scenes | v vibe | y yes | s skip | q quit ")
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_widget(header, Rect::new(0, 0, area.width, 1));

    let content = Rect::new(
        0,
        1,
        area.width.saturating_sub(DOT_COLUMN),
        area.height.saturating_sub(1),
    );
    let dots = Rect::new(content.width, 1, area.width - content.width, content.height);

    draw_panels(frame, app.page(), snap, content);
    draw_dots(frame, snap, dots);
    draw_particles(frame, app.field(), now, content);

    if let Some(intro) = &snap.intro {
        draw_intro(frame, &intro.text, area);
    }
}

fn draw_panels(frame: &mut Frame<'_>, page: &StackedPage, snap: &DeckSnapshot, area: Rect) {
    for panel in &SECTIONS {
        let Some(rect) = page.anchor_rect(panel.id) else {
            continue;
        };
        // Clip the panel to the visible rows.
        let top = rect.top().max(0.0);
        let bottom = rect.bottom().min(f64::from(area.height));
        if bottom <= top {
            continue;
        }
        let hidden_above = (top - rect.top()) as u16;
        let target = Rect::new(
            area.x,
            area.y + top as u16,
            area.width,
            (bottom - top).round() as u16,
        );

        let mut borders = Borders::LEFT | Borders::RIGHT;
        if hidden_above == 0 {
            borders |= Borders::TOP;
        }
        if rect.bottom() <= f64::from(area.height) {
            borders |= Borders::BOTTOM;
        }
        let active = panel.id == snap.active;
        let mut block = Block::default().borders(borders).border_style(if active {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default().fg(Color::DarkGray)
        });
        if hidden_above == 0 {
            block = block.title(format!(" {} ", panel.label));
        }

        let body = Paragraph::new(panel_lines(panel.id, snap))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .scroll((hidden_above, 0));
        frame.render_widget(body, target);
    }
}

fn panel_lines(id: SectionId, snap: &DeckSnapshot) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    match id {
        SectionId::Cheese => {
            let cheese = &snap.cheese;
            lines.push(Line::from(match cheese.view {
                CheeseView::Cheese => "Is the moon made of cheese?  [c] Vanuatu",
                CheeseView::Vanuatu => "Vanuatu, though.  [c] back to the cheese",
            }));
            if cheese.deal_accepted {
                lines.push(Line::from("It's Official!"));
            } else if cheese.show_deal {
                lines.push(Line::from("So Here's the deal..."));
                lines.push(Line::from("[a] yes  [b] see option b  [n] no choice  [k] knife"));
                if cheese.error {
                    lines.push(Line::styled("Wrong answer.", Style::default().fg(Color::Red)));
                }
            } else {
                lines.push(Line::from("[d] open the deal"));
            }
        }
        SectionId::Paramedic => {
            lines.push(Line::from("Saving lives, one shift at a time."));
        }
        SectionId::Faith => {
            for (i, revealed) in snap.faith_revealed.iter().enumerate() {
                let state = if *revealed { "revealed" } else { "hidden" };
                lines.push(Line::from(format!("card {}: {state}", i + 1)));
            }
            lines.push(Line::from("[f] flip the cards"));
        }
        SectionId::Nerd => {
            lines.push(Line::styled(
                format!("◀ {} ▶", snap.scene.label()),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            if snap.loki_confirmed {
                lines.push(Line::styled("Variant confirmed.", Style::default().fg(Color::Green)));
            }
            if snap.loki_glorious {
                lines.push(Line::styled(
                    "Burdened with glorious purpose.",
                    Style::default().fg(Color::Yellow),
                ));
            }
            if let MediaStatus::Failed { .. } = snap.variant_photo.status {
                lines.push(Line::from(format!("(Add {})", snap.variant_photo.asset.path)));
            }
        }
        SectionId::Marcus => {
            lines.push(Line::from("MARCUS VIBE MODULE"));
            lines.push(Line::from(snap.quote.unwrap_or("[v] run a vibe check")));
        }
        SectionId::Gallery => {
            lines.push(Line::from("The Gallery"));
            for card in &snap.gallery {
                let marker = if card.playing { '▶' } else { '■' };
                lines.push(Line::from(format!(
                    "{marker} {} {:>3.0}%",
                    card.item.title, card.progress
                )));
            }
        }
        SectionId::Finale => match &snap.success {
            Some(success) => {
                lines.push(Line::styled(
                    "YES!",
                    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
                ));
                lines.push(Line::from(format!("{} bursts and counting", success.bursts_fired)));
                lines.push(Line::from("[x] close"));
            }
            None => {
                lines.push(Line::from("Will you be my Valentine?"));
                lines.push(Line::from("[y] yes   [y] also yes"));
            }
        },
    }
    lines
}

fn draw_dots(frame: &mut Frame<'_>, snap: &DeckSnapshot, area: Rect) {
    let rows = snap.nav.len() as u16 * 2;
    let top = area.y + area.height.saturating_sub(rows) / 2;
    let buf = frame.buffer_mut();
    for (i, item) in snap.nav.iter().enumerate() {
        let y = top + i as u16 * 2;
        let x = area.x + area.width / 2;
        if y >= area.y + area.height || x >= area.x + area.width {
            continue;
        }
        let (ch, color) = if item.active {
            ('●', Color::LightRed)
        } else {
            ('○', Color::DarkGray)
        };
        buf[(x, y)].set_char(ch).set_fg(color);
    }
}

fn draw_particles(frame: &mut Frame<'_>, field: &ParticleField, now: Millis, area: Rect) {
    let buf = frame.buffer_mut();
    for (x, y, glyph, color) in field.visible(now) {
        let col = area.x + (x * f64::from(area.width)) as u16;
        let row = area.y + (y * f64::from(area.height)) as u16;
        if col < area.x + area.width && row < area.y + area.height {
            buf[(col, row)].set_char(glyph).set_fg(color);
        }
    }
}

fn draw_intro(frame: &mut Frame<'_>, text: &str, area: Rect) {
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::default(),
        Line::from(format!("{text}▌")),
        Line::default(),
        Line::styled("[s] skip", Style::default().fg(Color::DarkGray)),
    ];
    let middle = area.height.saturating_sub(lines.len() as u16) / 2;
    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });
    frame.render_widget(
        body,
        Rect::new(area.x, area.y + middle, area.width, area.height - middle),
    );
}
