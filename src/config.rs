use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    /// Address the HTTP server listens on.
    pub bind_address: SocketAddr,
    /// Directory served as the site root; category images live in `images/<category>` below it.
    pub public_root: PathBuf,
    /// Pagination and carousel behaviour of the landing page.
    pub gallery: GalleryOptions,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 3000)),
            public_root: PathBuf::from("public"),
            gallery: GalleryOptions::default(),
        }
    }
}

impl Configuration {
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_yaml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn validated(self) -> Result<Self> {
        ensure!(
            !self.public_root.as_os_str().is_empty(),
            "public-root must not be empty"
        );
        self.gallery.validate().context("invalid gallery settings")?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct GalleryOptions {
    /// Images shown when the page loads or the filter changes.
    pub initial_batch: usize,
    /// Images appended per load-more trigger.
    pub load_more_batch: usize,
    /// Deferment between a load-more trigger and the append.
    #[serde(with = "humantime_serde")]
    pub load_more_delay: Duration,
    /// Period of the automatic carousel rotation.
    #[serde(with = "humantime_serde")]
    pub carousel_interval: Duration,
    /// Horizontal displacement a drag must exceed to change slides.
    pub drag_threshold: f32,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            initial_batch: 8,
            load_more_batch: 6,
            load_more_delay: Duration::from_millis(500),
            carousel_interval: Duration::from_secs(5),
            drag_threshold: 50.0,
        }
    }
}

impl GalleryOptions {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.initial_batch > 0, "initial-batch must be positive");
        ensure!(self.load_more_batch > 0, "load-more-batch must be positive");
        ensure!(
            !self.load_more_delay.is_zero(),
            "load-more-delay must be greater than zero"
        );
        ensure!(
            !self.carousel_interval.is_zero(),
            "carousel-interval must be greater than zero"
        );
        ensure!(
            self.drag_threshold.is_finite() && self.drag_threshold >= 0.0,
            "drag-threshold must be a non-negative number"
        );
        Ok(())
    }
}
