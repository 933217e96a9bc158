use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, AppMode};
use crate::core::{GeneratedImage, PREVIEW_EXPORT_FILENAME};
use crate::export;

/// Route a key press to whichever layer is on top
pub async fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    if app.gallery.is_previewing() {
        handle_preview_input(app, key).await;
        return Ok(());
    }

    match app.mode {
        AppMode::Compose => handle_compose_input(app, key),
        AppMode::Gallery => handle_gallery_input(app, key).await,
    }
    Ok(())
}

/// Handle input while the form has focus
pub fn handle_compose_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = AppMode::Gallery;
        }

        KeyCode::Enter => {
            // Blank prompt or a generation in flight: nothing happens
            app.submit();
        }

        KeyCode::Tab => app.form.focus_next(),
        KeyCode::BackTab => app.form.focus_previous(),

        KeyCode::Char(c) => app.form.insert_char(c),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Delete => app.form.delete(),
        KeyCode::Left => app.form.left(),
        KeyCode::Right => app.form.right(),
        KeyCode::Home => app.form.move_home(),
        KeyCode::End => app.form.move_end(),

        _ => {}
    }
}

/// Handle input in the gallery grid
pub async fn handle_gallery_input(app: &mut App, key: KeyEvent) {
    let len = app.workspace.images().len();

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.gallery.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.gallery.select_next(len),

        KeyCode::Enter | KeyCode::Char('p') => {
            app.gallery.open_preview(app.workspace.images());
        }

        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.delete_selected() {
                app.set_status(format!("Deleted {}", id));
            }
        }

        KeyCode::Char('s') => {
            if let Some(image) = app.selected_image().cloned() {
                let filename = image.export_filename();
                download(app, &image, &filename).await;
            }
        }

        KeyCode::Tab | KeyCode::Char('i') => {
            app.mode = AppMode::Compose;
        }

        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }

        _ => {}
    }
}

/// Handle input in the fullscreen preview
pub async fn handle_preview_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc if app.viewport.escape_bound() => app.gallery.close_preview(),

        KeyCode::Backspace | KeyCode::Char('b') | KeyCode::Char('q') => app.gallery.close_preview(),

        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('z') => app.gallery.toggle_zoom(),

        KeyCode::Char('s') => {
            if let Some(image) = app.preview_image().cloned() {
                download(app, &image, PREVIEW_EXPORT_FILENAME).await;
            }
        }

        _ => {}
    }
}

async fn download(app: &mut App, image: &GeneratedImage, filename: &str) {
    let output_dir = app.config.output_dir();
    match export::save_image(image, &output_dir, filename).await {
        Ok(path) => app.set_status(format!("Saved {}", path.display())),
        Err(e) => app.set_error(format!("Download failed: {}", e)),
    }
}
