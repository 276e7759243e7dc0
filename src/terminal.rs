// SPDX-License-Identifier: GPL-3.0-only

//! Terminal depth viewer
//!
//! Renders the grayscale depth view with the highlight overlay composited
//! on top, using Unicode half-block characters for improved vertical
//! resolution. Key input drives the threshold band, highlight color,
//! overlay clearing, and snapshots.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal, backend::CrosstermBackend, buffer::Buffer, layout::Rect, style::Color,
    widgets::Widget,
};
use std::io::{self, stdout};
use tracing::error;

use crate::config::{Config, HighlightColor};
use crate::constants::{input, timing};
use crate::driver::{PollDriver, ViewSurfaces};
use crate::snapshot;

/// Run the terminal viewer
///
/// The driver should already have been initialized; a driver whose
/// capture path is disabled still gets a UI (with a notice) so settings
/// remain editable.
pub fn run(driver: PollDriver, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, driver, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Which depth bound an editor session targets
#[derive(Debug, Clone, Copy)]
enum BoundField {
    Lower,
    Upper,
}

impl BoundField {
    fn label(&self) -> &'static str {
        match self {
            BoundField::Lower => "lower",
            BoundField::Upper => "upper",
        }
    }
}

/// In-progress text entry for one bound
struct BoundEditor {
    field: BoundField,
    text: String,
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut driver: PollDriver,
    mut config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor: Option<BoundEditor> = None;
    let mut show_help = false;
    let mut status_message = build_status_message(&config);

    loop {
        driver.tick(&config);

        // Draw
        terminal.draw(|f| {
            let area = f.area();

            // Reserve bottom line for status
            let view_area = Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: area.height.saturating_sub(1),
            };

            let view = DepthView {
                surfaces: driver.surfaces(),
                presented: driver.frames_presented() > 0,
            };
            f.render_widget(view, view_area);

            let status_area = Rect {
                x: area.x,
                y: area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            };

            let line = match &editor {
                Some(ed) => format!(
                    "{} bound: {}_  (Enter apply, Esc cancel)",
                    ed.field.label(),
                    ed.text
                ),
                None => format!("{} | {}", fps_label(&driver), status_message),
            };
            let status = StatusBar { message: &line };
            f.render_widget(status, status_area);
        })?;

        // Handle input with timeout for frame updates
        if event::poll(timing::INPUT_POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            // Ctrl+C always quits
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            if editor.is_some() {
                match key.code {
                    KeyCode::Char(c) if c.is_ascii_digit() => {
                        if let Some(ed) = editor.as_mut()
                            && ed.text.len() < input::BOUND_FIELD_MAX_DIGITS
                        {
                            ed.text.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        if let Some(ed) = editor.as_mut() {
                            ed.text.pop();
                        }
                    }
                    KeyCode::Enter => {
                        if let Some(ed) = editor.take() {
                            let result = match ed.field {
                                BoundField::Lower => config.set_min_bound(&ed.text),
                                BoundField::Upper => config.set_max_bound(&ed.text),
                            };
                            status_message = match result {
                                Ok(value) => {
                                    format!(
                                        "{} bound set to {} | {}",
                                        ed.field.label(),
                                        value,
                                        build_status_message(&config)
                                    )
                                }
                                Err(e) => format!("{} | {}", e, build_status_message(&config)),
                            };
                        }
                    }
                    KeyCode::Esc => {
                        editor = None;
                        status_message = build_status_message(&config);
                    }
                    _ => {}
                }
                continue;
            }

            match key.code {
                // Highlight color palette
                KeyCode::Char('r') => {
                    config.set_highlight_color(HighlightColor::Red);
                    status_message = build_status_message(&config);
                }
                KeyCode::Char('g') => {
                    config.set_highlight_color(HighlightColor::Green);
                    status_message = build_status_message(&config);
                }
                KeyCode::Char('b') => {
                    config.set_highlight_color(HighlightColor::Blue);
                    status_message = build_status_message(&config);
                }

                // Clear the overlay
                KeyCode::Char(' ') => {
                    driver.clear_overlay();
                    status_message = format!("overlay cleared | {}", build_status_message(&config));
                }

                // Edit bounds, pre-filled with the current value
                KeyCode::Char('l') => {
                    editor = Some(BoundEditor {
                        field: BoundField::Lower,
                        text: config.band.min_depth.to_string(),
                    });
                }
                KeyCode::Char('u') => {
                    editor = Some(BoundEditor {
                        field: BoundField::Upper,
                        text: config.band.max_depth.to_string(),
                    });
                }

                // Snapshot
                KeyCode::Char('p') => {
                    status_message = match driver.surfaces() {
                        Some(surfaces) => match snapshot::save_composite(surfaces, None) {
                            Ok(path) => format!("saved: {}", path.display()),
                            Err(e) => {
                                error!("Failed to save snapshot: {}", e);
                                format!("snapshot failed: {}", e)
                            }
                        },
                        None => "no capture to snapshot".to_string(),
                    };
                }

                // Help toggle
                KeyCode::Char('h') => {
                    show_help = !show_help;
                    status_message = if show_help {
                        build_help_message()
                    } else {
                        build_status_message(&config)
                    };
                }

                KeyCode::Char('q') => break,
                _ => {}
            }
        }
    }

    driver.shutdown();
    if let Err(e) = config.save() {
        error!("Failed to save settings: {}", e);
    }

    Ok(())
}

fn fps_label(driver: &PollDriver) -> String {
    match driver.fps() {
        Some(fps) => format!("FPS: {:.1}", fps),
        None => "FPS: --".to_string(),
    }
}

fn build_status_message(config: &Config) -> String {
    format!(
        "band ({}, {}) | {} | 'h' help | 'q' quit",
        config.band.min_depth,
        config.band.max_depth,
        config.highlight_color.display_name()
    )
}

fn build_help_message() -> String {
    "r/g/b: Highlight color | Space: Clear overlay | l/u: Edit lower/upper bound | \
     p: Snapshot | h: Toggle help | q/Ctrl+C: Quit"
        .to_string()
}

/// Widget that renders the composited depth view using half-block characters
struct DepthView<'a> {
    surfaces: Option<&'a ViewSurfaces>,
    presented: bool,
}

impl DepthView<'_> {
    fn placeholder(msg: &str, area: Rect, buf: &mut Buffer) {
        let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
        let y = area.y + area.height / 2;
        if y < area.y + area.height && x < area.x + area.width {
            buf.set_string(x, y, msg, ratatui::style::Style::default());
        }
    }
}

impl Widget for DepthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(surfaces) = self.surfaces else {
            Self::placeholder("Depth capture disabled", area, buf);
            return;
        };
        if !self.presented {
            Self::placeholder("Waiting for depth frames...", area, buf);
            return;
        }

        let dims = surfaces.dims();

        // Calculate display dimensions maintaining aspect ratio
        // Each terminal cell displays 2 vertical pixels using half-block characters
        let frame_aspect = dims.width as f64 / dims.height as f64;
        let term_width = area.width as f64;
        let term_height = (area.height * 2) as f64; // *2 because half-blocks

        let (display_width, display_height) = if term_width / term_height > frame_aspect {
            // Terminal is wider - fit to height
            let h = term_height;
            let w = h * frame_aspect;
            (w as u16, (h / 2.0) as u16)
        } else {
            // Terminal is taller - fit to width
            let w = term_width;
            let h = w / frame_aspect;
            (w as u16, (h / 2.0) as u16)
        };

        // Center the image
        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        // Scale factors
        let x_scale = dims.width as f64 / display_width.max(1) as f64;
        let y_scale = dims.height as f64 / (display_height.max(1) * 2) as f64;

        // Render using half-block characters
        // Each terminal cell represents 2 vertical pixels:
        // - Upper half (▀) colored with fg
        // - Lower half colored with bg
        for ty in 0..display_height {
            for tx in 0..display_width {
                let term_x = x_offset + tx;
                let term_y = y_offset + ty;

                if term_x >= area.x + area.width || term_y >= area.y + area.height {
                    continue;
                }

                let src_x = (tx as f64 * x_scale) as u32;
                let src_y_top = (ty as f64 * 2.0 * y_scale) as u32;
                let src_y_bottom = ((ty as f64 * 2.0 + 1.0) * y_scale) as u32;

                let top_color = sample_composite(surfaces, src_x, src_y_top);
                let bottom_color = sample_composite(surfaces, src_x, src_y_bottom);

                if let Some(cell) = buf.cell_mut((term_x, term_y)) {
                    cell.set_char('▀');
                    cell.set_fg(top_color);
                    cell.set_bg(bottom_color);
                }
            }
        }
    }
}

/// Sample the composite at (x, y): a painted overlay pixel wins over the
/// grayscale view
fn sample_composite(surfaces: &ViewSurfaces, x: u32, y: u32) -> Color {
    let over = surfaces.overlay().pixel_at(x, y);
    let pixel = if over.is_transparent() {
        surfaces.base().pixel_at(x, y)
    } else {
        over
    };
    Color::Rgb(pixel.r, pixel.g, pixel.b)
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        // Render text
        let text = if self.message.len() > area.width as usize {
            &self.message[..area.width as usize]
        } else {
            self.message
        };

        buf.set_string(
            area.x,
            area.y,
            text,
            ratatui::style::Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray),
        );
    }
}
