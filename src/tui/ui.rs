use image::{imageops::FilterType, DynamicImage, GenericImageView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::app::{App, AppMode, StatusMessage};
use super::form::{FormField, MAX_PROMPT_CHARS};
use super::gallery::Preview;
use crate::core::{AspectRatio, GeneratedImage, ImageStyle};

/// Magnification applied when the preview is zoomed
const ZOOM_FACTOR: f32 = 2.5;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(16),   // Form + gallery
            Constraint::Length(3), // Status bar
            Constraint::Length(1), // Help line
        ])
        .split(frame.area());

    draw_title(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    draw_form(frame, app, body[0]);
    draw_gallery(frame, app, body[1]);
    draw_status(frame, app, chunks[2]);
    draw_help(frame, app, chunks[3]);

    if let (Some(preview), Some(image)) = (app.gallery.preview(), app.preview_image()) {
        draw_preview(frame, preview, image);
    }
}

fn draw_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "Happu",
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " - Transform imagination into high-end visuals",
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("   [{}]", app.config.api.model),
            Style::default().fg(Color::DarkGray),
        ),
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightBlue)),
    );
    frame.render_widget(title, area);
}

fn focus_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let composing = app.mode == AppMode::Compose;
    let error = app.workspace.error();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),                                      // Prompt
            Constraint::Length(3),                                   // Style
            Constraint::Length(3),                                   // Aspect ratio
            Constraint::Length(if error.is_some() { 3 } else { 0 }), // Error
            Constraint::Length(3),                                   // Button
        ])
        .split(area);

    // Prompt
    let prompt_active = composing && app.form.focus == FormField::Prompt;
    let inner_width = chunks[0].width.saturating_sub(2) as usize;
    let inner_height = chunks[0].height.saturating_sub(2) as usize;
    let (rows, (cursor_col, cursor_row)) =
        wrap_prompt(app.form.prompt(), app.form.cursor(), inner_width);
    // Scroll just far enough to keep the cursor row visible
    let scroll = cursor_row.saturating_sub(inner_height.saturating_sub(1));

    let body = if app.form.prompt().is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "What do you want to create?",
            Style::default().fg(Color::DarkGray),
        )))
    } else {
        Paragraph::new(rows.into_iter().map(Line::from).collect::<Vec<_>>())
            .scroll((scroll as u16, 0))
    };
    let prompt = body.block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(prompt_active))
            .title("Description")
            .title_top(
                Line::from(format!("{}/{}", app.form.char_count(), MAX_PROMPT_CHARS))
                    .right_aligned(),
            ),
    );
    frame.render_widget(prompt, chunks[0]);

    if prompt_active && inner_width > 0 && inner_height > 0 {
        frame.set_cursor_position((
            chunks[0].x + 1 + cursor_col as u16,
            chunks[0].y + 1 + (cursor_row - scroll) as u16,
        ));
    }

    // Style presets
    let style_spans: Vec<Span> = ImageStyle::ALL
        .iter()
        .flat_map(|style| {
            let selected = *style == app.form.style;
            [
                Span::styled(
                    format!("{} {}", style.icon().glyph(), style.label()),
                    if selected {
                        Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        Style::default().fg(Color::Gray)
                    },
                ),
                Span::raw("  "),
            ]
        })
        .collect();
    let styles = Paragraph::new(Line::from(style_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(composing && app.form.focus == FormField::Style))
            .title("Visual Style [←→]"),
    );
    frame.render_widget(styles, chunks[1]);

    // Aspect ratios
    let ratio_spans: Vec<Span> = AspectRatio::ALL
        .iter()
        .flat_map(|ratio| {
            let selected = *ratio == app.form.aspect_ratio;
            [
                Span::styled(
                    ratio.label(),
                    if selected {
                        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        Style::default().fg(Color::Gray)
                    },
                ),
                Span::raw("  "),
            ]
        })
        .collect();
    let ratios = Paragraph::new(Line::from(ratio_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(composing && app.form.focus == FormField::AspectRatio))
            .title("Aspect Ratio [←→]"),
    );
    frame.render_widget(ratios, chunks[2]);

    if let Some(message) = error {
        let error = Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(error, chunks[3]);
    }

    // Generate button
    let generating = app.workspace.is_generating();
    let (label, style) = if generating {
        ("Generating...", Style::default().fg(Color::DarkGray))
    } else if app.form.can_submit(generating) {
        (
            "Generate Image →",
            Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD),
        )
    } else {
        ("Generate Image", Style::default().fg(Color::DarkGray))
    };
    let button = Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, chunks[4]);
}

fn draw_gallery(frame: &mut Frame, app: &App, area: Rect) {
    let images = app.workspace.images();
    let browsing = app.mode == AppMode::Gallery;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(7)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(browsing))
        .title(format!("Library ({})", images.len()));

    if images.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No Active Generations",
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Assets will appear here once the generation engine is triggered.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = images
        .iter()
        .map(|image| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<12}", image.id), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{:<6}", image.aspect_ratio.as_str()),
                    Style::default().fg(Color::Magenta),
                ),
                Span::raw(" "),
                Span::styled(image.prompt_preview(40), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(app.gallery.selected()));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(image) = app.selected_image() {
        draw_image_details(frame, image, chunks[1]);
    }
}

fn draw_image_details(frame: &mut Frame, image: &GeneratedImage, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled(image.style.as_str(), Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(image.aspect_ratio.as_str(), Style::default().fg(Color::Magenta)),
            Span::raw("  "),
            Span::styled(
                format!("Timestamp: {}", image.timestamp.with_timezone(&chrono::Local).format("%H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(&image.original_prompt, Style::default().fg(Color::White))),
    ];

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Details"));
    frame.render_widget(details, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let (message, style) = match &app.status {
        Some(StatusMessage::Error(err)) => (err.as_str(), Style::default().fg(Color::Red)),
        Some(StatusMessage::Info(status)) => (status.as_str(), Style::default().fg(Color::Green)),
        None if app.workspace.is_generating() => ("Generating...", Style::default().fg(Color::Yellow)),
        None => ("Ready", Style::default().fg(Color::Gray)),
    };

    let status = Paragraph::new(message)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, area);
}

fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.gallery.is_previewing() {
        "Enter/z: Zoom | s: Export | b: Back | Esc: Close"
    } else {
        match app.mode {
            AppMode::Compose => "Enter: Generate | Tab: Next field | ←→: Move/Select | Esc: Library | Ctrl+C: Quit",
            AppMode::Gallery => "↑↓: Select | Enter: Preview | s: Export PNG | d: Delete | i: Compose | q: Quit",
        }
    };

    let help = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

/// Fullscreen preview layer
fn draw_preview(frame: &mut Frame, preview: &Preview, image: &GeneratedImage) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(4)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(if preview.zoomed { "Preview (zoomed)" } else { "Preview" });
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    match preview.lines(inner.width, inner.height, render_pixels) {
        Some(lines) => {
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
        }
        None => {
            let message = Paragraph::new("Image preview unavailable")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(message, inner);
        }
    }

    let info = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(&image.id, Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(image.style.as_str(), Style::default().fg(Color::LightBlue)),
            Span::raw("  "),
            Span::styled(image.aspect_ratio.as_str(), Style::default().fg(Color::Magenta)),
        ]),
        Line::from(Span::styled(&image.prompt, Style::default().fg(Color::Gray))),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(info, chunks[1]);
}

/// Break the prompt into rows of at most `width` cells. Wide glyphs take
/// two cells and never straddle a row end. Also returns the cursor's
/// `(column, row)`, where `cursor` is a char index.
fn wrap_prompt(prompt: &str, cursor: usize, width: usize) -> (Vec<String>, (usize, usize)) {
    let width = width.max(1);
    let mut rows = vec![String::new()];
    let mut col = 0;
    let mut at = None;

    for (index, c) in prompt.chars().enumerate() {
        let cells = Span::raw(c.to_string()).width();
        if col > 0 && col + cells > width {
            rows.push(String::new());
            col = 0;
        }
        if index == cursor {
            at = Some((col, rows.len() - 1));
        }
        if let Some(row) = rows.last_mut() {
            row.push(c);
        }
        col += cells;
    }

    let at = match at {
        Some(at) => at,
        None if col >= width => {
            rows.push(String::new());
            (0, rows.len() - 1)
        }
        None => (col, rows.len() - 1),
    };
    (rows, at)
}

/// Render an image with half-block cells, two pixel rows per line
fn render_pixels(picture: &DynamicImage, width: u16, height: u16, zoomed: bool) -> Vec<Line<'static>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let source = if zoomed {
        let (w, h) = picture.dimensions();
        let crop_w = ((w as f32 / ZOOM_FACTOR) as u32).max(1);
        let crop_h = ((h as f32 / ZOOM_FACTOR) as u32).max(1);
        picture.crop_imm((w - crop_w) / 2, (h - crop_h) / 2, crop_w, crop_h)
    } else {
        picture.clone()
    };

    // Keep the aspect ratio; terminal cells are about twice as tall as wide
    let (w, h) = source.dimensions();
    let max_w = width as u32;
    let max_h = height as u32 * 2;
    let scale = (max_w as f32 / w as f32).min(max_h as f32 / h as f32);
    let target_w = ((w as f32 * scale) as u32).max(1);
    let target_h = ((h as f32 * scale) as u32).max(2);

    let pixels = source.resize_exact(target_w, target_h, FilterType::Triangle).to_rgb8();

    (0..target_h / 2)
        .map(|row| {
            let spans: Vec<Span> = (0..target_w)
                .map(|x| {
                    let top = pixels.get_pixel(x, row * 2).0;
                    let bottom = pixels.get_pixel(x, row * 2 + 1).0;
                    Span::styled(
                        "▀",
                        Style::default()
                            .fg(Color::Rgb(top[0], top[1], top[2]))
                            .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn checker(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, _| {
            if x < w / 2 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        }))
    }

    #[test]
    fn pixels_fit_inside_the_area() {
        let lines = render_pixels(&checker(64, 64), 20, 8, false);
        assert!(lines.len() <= 8);
        assert!(lines.iter().all(|line| line.spans.len() <= 20));
        assert!(!lines.is_empty());
    }

    #[test]
    fn zooming_crops_to_the_center() {
        let lines = render_pixels(&checker(100, 100), 10, 5, true);
        assert!(!lines.is_empty());
        assert!(lines.len() <= 5);
    }

    #[test]
    fn prompt_wraps_by_cell_width() {
        let (rows, at) = wrap_prompt("abcdefg", 7, 3);
        assert_eq!(rows, vec!["abc", "def", "g"]);
        assert_eq!(at, (1, 2));

        let (rows, at) = wrap_prompt("abcdef", 2, 3);
        assert_eq!(rows, vec!["abc", "def"]);
        assert_eq!(at, (2, 0));
    }

    #[test]
    fn cursor_at_a_full_row_moves_to_the_next_one() {
        let (rows, at) = wrap_prompt("abc", 3, 3);
        assert_eq!(rows, vec!["abc", ""]);
        assert_eq!(at, (0, 1));
    }

    #[test]
    fn wide_glyphs_take_two_cells_and_do_not_straddle_rows() {
        let (rows, at) = wrap_prompt("a🦊🦊", 2, 4);
        assert_eq!(rows, vec!["a🦊", "🦊"]);
        assert_eq!(at, (0, 1));

        let (_, at) = wrap_prompt("🦊b", 1, 10);
        assert_eq!(at, (2, 0));
    }

    #[test]
    fn long_prompts_stay_addressable() {
        let prompt = "x".repeat(MAX_PROMPT_CHARS);
        let (rows, at) = wrap_prompt(&prompt, MAX_PROMPT_CHARS, 40);
        assert_eq!(rows.len(), 26);
        assert_eq!(at, (0, 25));
        assert!(rows.iter().all(|row| row.chars().count() <= 40));
    }

    #[test]
    fn empty_area_renders_nothing() {
        assert!(render_pixels(&checker(4, 4), 0, 10, false).is_empty());
    }
}
