use async_channel::{Receiver, Sender};
use std::sync::Arc;

use super::form::GeneratorForm;
use super::gallery::{Gallery, Viewport};
use crate::api::ImageGenerator;
use crate::config::Config;
use crate::core::{GeneratedImage, HappuError, Workspace};

type GenerationResult = Result<GeneratedImage, HappuError>;

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Typing into the form
    Compose,
    /// Browsing generated images
    Gallery,
}

/// One-line feedback shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// TUI application state
pub struct App {
    /// Current mode
    pub mode: AppMode,

    /// Configuration
    pub config: Config,

    pub workspace: Workspace,

    pub form: GeneratorForm,

    pub gallery: Gallery,

    pub viewport: Viewport,

    /// Status message
    pub status: Option<StatusMessage>,

    /// Whether to quit
    pub should_quit: bool,

    generator: Arc<dyn ImageGenerator>,
    results_tx: Sender<GenerationResult>,
    results_rx: Receiver<GenerationResult>,
}

impl App {
    pub fn new(config: Config, generator: Arc<dyn ImageGenerator>) -> Self {
        let viewport = Viewport::new();
        let (results_tx, results_rx) = async_channel::unbounded();

        Self {
            mode: AppMode::Compose,
            form: GeneratorForm::new(config.defaults.style, config.defaults.aspect_ratio),
            gallery: Gallery::new(viewport.clone()),
            viewport,
            config,
            workspace: Workspace::new(),
            status: None,
            should_quit: false,
            generator,
            results_tx,
            results_rx,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(StatusMessage::Info(msg.into()));
    }

    /// Set error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status = Some(StatusMessage::Error(msg.into()));
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Submit the form. The call runs in the background; its outcome lands
    /// through `drain_results`. Returns whether a generation was started.
    pub fn submit(&mut self) -> bool {
        let Some(request) = self.form.submit(self.workspace.is_generating()) else {
            return false;
        };

        self.workspace.begin();
        self.set_status(format!("Generating: {}", request.prompt_preview(40)));

        let generator = Arc::clone(&self.generator);
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let result = generator.generate(&request).await;
            if tx.send(result).await.is_err() {
                tracing::debug!("Generation finished after the UI closed");
            }
        });
        true
    }

    /// Apply a finished generation to the workspace
    pub fn apply_result(&mut self, result: GenerationResult) {
        let succeeded = result.is_ok();
        self.workspace.complete(result);
        if succeeded {
            self.gallery.on_prepended(self.workspace.images().len());
            self.set_status("Image ready");
        } else {
            self.clear_status();
        }
    }

    /// Apply every generation result that has arrived, without waiting
    pub fn drain_results(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            self.apply_result(result);
        }
    }

    /// Wait for the in-flight generation, if any
    pub async fn wait_for_result(&mut self) {
        if !self.workspace.is_generating() {
            return;
        }
        if let Ok(result) = self.results_rx.recv().await {
            self.apply_result(result);
        }
    }

    pub fn selected_image(&self) -> Option<&GeneratedImage> {
        self.gallery.selected_image(self.workspace.images())
    }

    /// Image shown in the fullscreen preview
    pub fn preview_image(&self) -> Option<&GeneratedImage> {
        self.gallery
            .preview()
            .and_then(|p| self.workspace.get(&p.image_id))
    }

    pub fn delete_selected(&mut self) -> Option<String> {
        let id = self.selected_image()?.id.clone();
        if self.workspace.delete(&id) {
            self.gallery.on_deleted(&id, self.workspace.images().len());
            Some(id)
        } else {
            None
        }
    }
}
