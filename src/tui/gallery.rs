use image::DynamicImage;
use ratatui::text::Line;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::GeneratedImage;

#[derive(Debug, Default)]
struct ViewportState {
    scroll_locked: Cell<bool>,
    escape_bound: Cell<bool>,
}

/// Screen-level flags a modal layer takes over while it is open
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    state: Rc<ViewportState>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock background scrolling and bind Esc until the guard is dropped
    pub fn lock_modal(&self) -> ModalGuard {
        self.state.scroll_locked.set(true);
        self.state.escape_bound.set(true);
        ModalGuard {
            state: Rc::clone(&self.state),
        }
    }

    pub fn scroll_locked(&self) -> bool {
        self.state.scroll_locked.get()
    }

    pub fn escape_bound(&self) -> bool {
        self.state.escape_bound.get()
    }
}

/// Releases the scroll lock and the Esc binding on drop
#[derive(Debug)]
pub struct ModalGuard {
    state: Rc<ViewportState>,
}

impl Drop for ModalGuard {
    fn drop(&mut self) {
        self.state.scroll_locked.set(false);
        self.state.escape_bound.set(false);
    }
}

/// Fullscreen preview of one gallery entry
#[derive(Debug)]
pub struct Preview {
    pub image_id: String,
    pub zoomed: bool,
    /// Decoded pixels, when the payload is a readable image
    pub picture: Option<DynamicImage>,
    /// Last rendering, keyed on `(width, height, zoomed)`
    rendered: RefCell<Option<((u16, u16, bool), Vec<Line<'static>>)>>,
    _guard: ModalGuard,
}

impl Preview {
    /// Picture lines for a `width` x `height` area. `render` only runs when
    /// the area or the zoom state changed since the last frame.
    pub fn lines<F>(&self, width: u16, height: u16, render: F) -> Option<Vec<Line<'static>>>
    where
        F: FnOnce(&DynamicImage, u16, u16, bool) -> Vec<Line<'static>>,
    {
        let picture = self.picture.as_ref()?;
        let key = (width, height, self.zoomed);

        let mut rendered = self.rendered.borrow_mut();
        if let Some((cached, lines)) = rendered.as_ref() {
            if *cached == key {
                return Some(lines.clone());
            }
        }

        let lines = render(picture, width, height, self.zoomed);
        *rendered = Some((key, lines.clone()));
        Some(lines)
    }
}

/// Selection and preview state over the workspace's image list
#[derive(Debug)]
pub struct Gallery {
    selected: usize,
    preview: Option<Preview>,
    viewport: Viewport,
}

impl Gallery {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            selected: 0,
            preview: None,
            viewport,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_image<'a>(&self, images: &'a [GeneratedImage]) -> Option<&'a GeneratedImage> {
        images.get(self.selected)
    }

    pub fn select_previous(&mut self) {
        if self.viewport.scroll_locked() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self, len: usize) {
        if self.viewport.scroll_locked() {
            return;
        }
        if self.selected < len.saturating_sub(1) {
            self.selected += 1;
        }
    }

    /// Keep the selection inside the list after it changed
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// A new entry went in at the front. Jump to it, unless a preview is
    /// open, in which case stay on the entry being previewed.
    pub fn on_prepended(&mut self, len: usize) {
        if self.is_previewing() {
            self.selected += 1;
            self.clamp(len);
        } else {
            self.selected = 0;
        }
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn is_previewing(&self) -> bool {
        self.preview.is_some()
    }

    /// Open the selected entry fullscreen. Returns false on an empty list.
    pub fn open_preview(&mut self, images: &[GeneratedImage]) -> bool {
        let Some(entry) = self.selected_image(images) else {
            return false;
        };

        let picture = entry
            .bytes()
            .ok()
            .and_then(|bytes| match image::load_from_memory(&bytes) {
                Ok(picture) => Some(picture),
                Err(e) => {
                    tracing::debug!("Failed to decode {} for preview: {}", entry.id, e);
                    None
                }
            });

        // Release any previous lock before taking a new one
        self.preview = None;
        self.preview = Some(Preview {
            image_id: entry.id.clone(),
            zoomed: false,
            picture,
            rendered: RefCell::new(None),
            _guard: self.viewport.lock_modal(),
        });
        true
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    pub fn toggle_zoom(&mut self) {
        if let Some(preview) = &mut self.preview {
            preview.zoomed = !preview.zoomed;
        }
    }

    /// Forget a deleted entry: close its preview and fix the selection
    pub fn on_deleted(&mut self, id: &str, remaining: usize) {
        if self.preview.as_ref().is_some_and(|p| p.image_id == id) {
            self.close_preview();
        }
        self.clamp(remaining);
    }
}
