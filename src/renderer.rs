use gallery_model::{Fault, GalleryConfig};
use tracing::{error, info, instrument};

use crate::config::RenderSettings;
use crate::document::Document;
use crate::loader::load_config;
use crate::markup::MarkupBuilder;
use crate::ready::ReadySubscription;

/// Result of a successful render.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// The full page, re-serialized, with the container contents replaced.
    pub page: String,
    /// What was placed in the container.
    pub markup: String,
    pub photo_count: usize,
    pub config: GalleryConfig,
}

/// Loads the gallery blocks of a page and fills its container.
#[derive(Debug, Clone)]
pub struct GalleryRenderer {
    settings: RenderSettings,
    markup: MarkupBuilder,
}

impl GalleryRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        let markup = MarkupBuilder::new(settings.empty_text_escape);
        Self { settings, markup }
    }

    /// Validate the configuration blocks of `html` without rendering.
    pub fn load(&self, html: &str) -> Result<GalleryConfig, Fault> {
        load_config(&Document::parse(html), &self.settings).inspect_err(log_fault)
    }

    /// Render the gallery into `html`.
    ///
    /// On a fault the input is left as it was; the fault is logged and returned.
    #[instrument(skip_all, fields(container = %self.settings.container))]
    pub fn render_document(&self, html: &str) -> Result<Rendered, Fault> {
        self.try_render(html).inspect_err(log_fault)
    }

    /// Wait for `ready`, then render. Produces the same result as
    /// [`render_document`](Self::render_document) whether or not the document
    /// was already ready at subscription time.
    pub async fn render_when_ready(
        &self,
        ready: ReadySubscription,
        html: &str,
    ) -> Result<Rendered, Fault> {
        ready.wait().await.inspect_err(log_fault)?;
        self.render_document(html)
    }

    fn try_render(&self, html: &str) -> Result<Rendered, Fault> {
        let document = Document::parse(html);
        let config = load_config(&document, &self.settings)?;
        let container = &self.settings.container;
        let missing = || {
            Fault::new(
                "render_document",
                20,
                format!("no container element with id `{container}`"),
            )
        };
        if !document.has_container(container) {
            return Err(missing());
        }
        let markup = self.markup.render(&config)?;
        let page = document.replace_inner(container, &markup).ok_or_else(missing)?;
        let photo_count = config.metadata.photo_indices().len();
        info!(
            gallery_uid = config.identity.gallery_uid(),
            photos = photo_count,
            "gallery rendered"
        );
        Ok(Rendered {
            page,
            markup,
            photo_count,
            config,
        })
    }
}

fn log_fault(fault: &Fault) {
    error!(
        operation = fault.operation,
        site = fault.site,
        message = %fault.message,
        "gallery render aborted"
    );
}
