use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::config::Configuration;
use crate::gallery::controller::{self, PageCommand, PageView, Phase};
use crate::gallery::pagination::Filter;
use crate::lister::ImageLister;

/// Drive the page controller against the configured public root without a
/// server: pick `filter`, keep loading until nothing remains, print each page.
pub async fn run(cfg: &Configuration, filter: Filter) -> Result<()> {
    let lister = ImageLister::new(cfg.public_root.clone());
    let (cmd_tx, cmd_rx) = mpsc::channel::<PageCommand>(8);
    let (view_tx, mut view_rx) = watch::channel(PageView::default());
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(controller::run(
        lister,
        cfg.gallery,
        cmd_rx,
        view_tx,
        cancel.clone(),
    ));

    view_rx
        .wait_for(|view| view.phase == Phase::Ready)
        .await
        .context("page controller stopped before it was ready")?;
    cmd_tx
        .send(PageCommand::SelectFilter(filter))
        .await
        .context("page controller is gone")?;
    let mut view = view_rx
        .wait_for(|view| view.filter == filter)
        .await
        .context("page controller stopped while switching filter")?
        .clone();

    println!(
        "# gallery dry run\n# public root: {}\n# filter: {}\n",
        cfg.public_root.display(),
        filter
    );
    print_batch(1, &view, 0);

    let mut batch = 1;
    while view.has_more {
        let shown = view.displayed.len();
        cmd_tx
            .send(PageCommand::SentinelVisible)
            .await
            .context("page controller is gone")?;
        view = view_rx
            .wait_for(|view| !view.loading_more && (view.displayed.len() > shown || !view.has_more))
            .await
            .context("page controller stopped while loading more")?
            .clone();
        batch += 1;
        print_batch(batch, &view, shown);
    }

    println!("\n# carousel slides:");
    if view.slides.is_empty() {
        println!("(no home images)");
    } else {
        for (idx, slide) in view.slides.iter().enumerate() {
            println!("  {:>3}: {}", idx + 1, slide);
        }
    }

    cancel.cancel();
    handle.await.context("page controller task panicked")??;
    Ok(())
}

fn print_batch(batch: usize, view: &PageView, from: usize) {
    println!("# batch {batch} (has more: {})", view.has_more);
    if view.displayed.len() == from {
        println!("(nothing appended)");
    }
    for (idx, image) in view.displayed.iter().enumerate().skip(from) {
        println!("  {:>4}: {}", idx + 1, image);
    }
}
