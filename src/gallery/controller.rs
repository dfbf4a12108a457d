//! Landing page controller.
//!
//! Lists the three categories once, then owns the gallery and carousel state
//! in a single task. Renderers send [`PageCommand`]s and observe
//! [`PageView`] snapshots through a `watch` channel.

use anyhow::Result;
use tokio::select;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::category::{Category, ImageRef};
use crate::config::GalleryOptions;
use crate::gallery::carousel::Carousel;
use crate::gallery::join_settled;
use crate::gallery::pagination::{Filter, GalleryState, PageSizes};
use crate::lister::ImageSource;

/// Input events from the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PageCommand {
    SelectFilter(Filter),
    /// The sentinel below the gallery became visible.
    SentinelVisible,
    /// An indicator was clicked.
    GoToSlide(usize),
    DragStart { x: f32 },
    DragEnd { x: f32 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Loading,
    Ready,
}

/// What a renderer needs to draw the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    pub phase: Phase,
    pub filter: Filter,
    pub displayed: Vec<ImageRef>,
    pub has_more: bool,
    pub loading_more: bool,
    pub slides: Vec<ImageRef>,
    pub current_slide: Option<usize>,
}

/// Images captured when the page becomes ready.
#[derive(Debug, Clone, Default)]
pub struct LoadedImages {
    pub home: Vec<ImageRef>,
    pub exterior: Vec<ImageRef>,
    pub interior: Vec<ImageRef>,
}

impl From<&GalleryOptions> for PageSizes {
    fn from(options: &GalleryOptions) -> Self {
        Self {
            initial: options.initial_batch,
            batch: options.load_more_batch,
        }
    }
}

/// List every category concurrently. A failed category is logged and comes
/// back empty; nothing is returned until all listings have settled.
pub async fn load_images<S: ImageSource>(source: &S) -> LoadedImages {
    let mut loaded = LoadedImages::default();
    for (category, result) in join_settled(Category::ALL, |category| source.fetch(category)).await {
        let images = match result {
            Ok(images) => images,
            Err(err) => {
                warn!(%category, error = %err, "image listing failed; category left empty");
                Vec::new()
            }
        };
        match category {
            Category::Home => loaded.home = images,
            Category::Exterior => loaded.exterior = images,
            Category::Interior => loaded.interior = images,
        }
    }
    loaded
}

/// Drive the page until `cancel` fires or the command channel closes.
///
/// The rotation timer and any pending load-more deadline live in this task
/// and are dropped with it.
pub async fn run<S: ImageSource>(
    source: S,
    options: GalleryOptions,
    mut commands: mpsc::Receiver<PageCommand>,
    view_tx: watch::Sender<PageView>,
    cancel: CancellationToken,
) -> Result<()> {
    view_tx.send_replace(PageView::default());

    let loaded = select! {
        _ = cancel.cancelled() => {
            debug!("cancelled while loading");
            return Ok(());
        }
        loaded = load_images(&source) => loaded,
    };
    info!(
        home = loaded.home.len(),
        exterior = loaded.exterior.len(),
        interior = loaded.interior.len(),
        "gallery ready"
    );

    let mut gallery = GalleryState::new(loaded.exterior, loaded.interior, PageSizes::from(&options));
    let mut carousel = Carousel::with_drag_threshold(loaded.home, options.drag_threshold);
    let period = options.carousel_interval;
    let mut rotation = interval_at(Instant::now() + period, period);
    rotation.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut load_more_at: Option<Instant> = None;

    publish(&view_tx, &gallery, &carousel);

    loop {
        select! {
            _ = cancel.cancelled() => {
                debug!("page controller cancelled");
                break;
            }

            _ = rotation.tick(), if !carousel.is_empty() => {
                carousel.advance();
                publish(&view_tx, &gallery, &carousel);
            }

            _ = sleep_until(load_more_at.unwrap_or_else(Instant::now)), if load_more_at.is_some() => {
                load_more_at = None;
                let appended = gallery.finish_load_more();
                debug!(
                    appended,
                    displayed = gallery.displayed().len(),
                    has_more = gallery.has_more(),
                    "load-more batch appended"
                );
                publish(&view_tx, &gallery, &carousel);
            }

            maybe_cmd = commands.recv() => {
                let Some(cmd) = maybe_cmd else {
                    debug!("command channel closed; stopping page controller");
                    break;
                };
                match cmd {
                    PageCommand::SelectFilter(filter) => {
                        if load_more_at.take().is_some() {
                            debug!("pending load-more dropped by filter change");
                        }
                        gallery.select_filter(filter);
                        debug!(%filter, displayed = gallery.displayed().len(), "filter selected");
                    }
                    PageCommand::SentinelVisible => {
                        if gallery.begin_load_more() {
                            load_more_at = Some(Instant::now() + options.load_more_delay);
                        } else {
                            debug!(
                                loading = gallery.is_loading_more(),
                                has_more = gallery.has_more(),
                                "load-more trigger ignored"
                            );
                            continue;
                        }
                    }
                    PageCommand::GoToSlide(index) => {
                        if !carousel.go_to(index) {
                            debug!(index, slides = carousel.len(), "slide index out of range");
                            continue;
                        }
                    }
                    PageCommand::DragStart { x } => {
                        carousel.drag_start(x);
                        continue;
                    }
                    PageCommand::DragEnd { x } => {
                        if !carousel.drag_end(x) {
                            continue;
                        }
                    }
                }
                publish(&view_tx, &gallery, &carousel);
            }
        }
    }

    Ok(())
}

fn publish(view_tx: &watch::Sender<PageView>, gallery: &GalleryState, carousel: &Carousel) {
    view_tx.send_replace(PageView {
        phase: Phase::Ready,
        filter: gallery.filter(),
        displayed: gallery.displayed().to_vec(),
        has_more: gallery.has_more(),
        loading_more: gallery.is_loading_more(),
        slides: carousel.images().to_vec(),
        current_slide: carousel.current_index(),
    });
}
