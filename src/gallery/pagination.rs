//! Filtered, incrementally grown gallery listing.
//!
//! The displayed list is always an order-preserving prefix of the active
//! source. Growth happens in two steps, [`GalleryState::begin_load_more`] and
//! [`GalleryState::finish_load_more`], so a caller can defer the append while
//! the guard rejects repeated triggers.

use std::fmt;
use std::str::FromStr;

use anyhow::{Error, bail};

use crate::category::{Category, ImageRef};

/// Which gallery images are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    /// Exterior images followed by interior images.
    #[default]
    All,
    Exterior,
    Interior,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Exterior => "exterior",
            Self::Interior => "interior",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "all" => Ok(Self::All),
            "exterior" => Ok(Self::Exterior),
            "interior" => Ok(Self::Interior),
            other => bail!("unknown gallery filter '{other}' (expected all, exterior or interior)"),
        }
    }
}

impl TryFrom<Category> for Filter {
    type Error = Error;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        match category {
            Category::Exterior => Ok(Self::Exterior),
            Category::Interior => Ok(Self::Interior),
            Category::Home => bail!("home images feed the carousel, not the gallery"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizes {
    pub initial: usize,
    pub batch: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            initial: 8,
            batch: 6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GalleryState {
    exterior: Vec<ImageRef>,
    interior: Vec<ImageRef>,
    sizes: PageSizes,
    filter: Filter,
    displayed: Vec<ImageRef>,
    has_more: bool,
    loading_more: bool,
}

impl GalleryState {
    /// Start on the `all` filter with the first page shown.
    pub fn new(exterior: Vec<ImageRef>, interior: Vec<ImageRef>, sizes: PageSizes) -> Self {
        let mut state = Self {
            exterior,
            interior,
            sizes,
            filter: Filter::All,
            displayed: Vec::new(),
            has_more: false,
            loading_more: false,
        };
        state.reset_page();
        state
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn displayed(&self) -> &[ImageRef] {
        &self.displayed
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn source_len(&self) -> usize {
        let (first, second) = self.source_parts();
        first.len() + second.len()
    }

    /// Switch filter and reset to the first page of its source.
    ///
    /// Clears the loading-more guard; a deferred batch for the previous
    /// filter must not be finished afterwards.
    pub fn select_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.loading_more = false;
        self.reset_page();
    }

    /// Enter the loading-more state. Returns `false` when a batch is already
    /// pending or nothing remains.
    pub fn begin_load_more(&mut self) -> bool {
        if self.loading_more || !self.has_more {
            return false;
        }
        self.loading_more = true;
        true
    }

    /// Append the next batch, starting exactly at the displayed length, and
    /// leave the loading-more state. Returns the number of images appended.
    pub fn finish_load_more(&mut self) -> usize {
        let start = self.displayed.len();
        let next: Vec<ImageRef> = self
            .source()
            .skip(start)
            .take(self.sizes.batch)
            .cloned()
            .collect();
        let appended = next.len();
        if appended == 0 {
            self.has_more = false;
        } else {
            self.displayed.extend(next);
            self.has_more = self.displayed.len() < self.source_len();
        }
        self.loading_more = false;
        appended
    }

    fn reset_page(&mut self) {
        self.displayed = self.source().take(self.sizes.initial).cloned().collect();
        self.has_more = self.displayed.len() < self.source_len();
    }

    fn source_parts(&self) -> (&[ImageRef], &[ImageRef]) {
        match self.filter {
            Filter::All => (self.exterior.as_slice(), self.interior.as_slice()),
            Filter::Exterior => (self.exterior.as_slice(), &[][..]),
            Filter::Interior => (self.interior.as_slice(), &[][..]),
        }
    }

    fn source(&self) -> impl Iterator<Item = &ImageRef> {
        let (first, second) = self.source_parts();
        first.iter().chain(second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(category: Category, count: usize) -> Vec<ImageRef> {
        (0..count)
            .map(|i| ImageRef::new(category, &format!("{i:02}.jpg")))
            .collect()
    }

    fn assert_prefix_invariant(state: &GalleryState, source: &[ImageRef]) {
        let shown = state.displayed();
        assert!(shown.len() <= source.len());
        assert_eq!(shown, &source[..shown.len()]);
        assert_eq!(state.has_more(), shown.len() < source.len());
    }

    #[test]
    fn starts_with_first_page_of_exterior_then_interior() {
        let exterior = images(Category::Exterior, 5);
        let interior = images(Category::Interior, 5);
        let state = GalleryState::new(exterior.clone(), interior.clone(), PageSizes::default());

        let all: Vec<ImageRef> = exterior.into_iter().chain(interior).collect();
        assert_eq!(state.filter(), Filter::All);
        assert_eq!(state.displayed(), &all[..8]);
        assert!(state.has_more());
    }

    #[test]
    fn exterior_scenario_appends_remaining_two_then_stops() {
        let exterior = images(Category::Exterior, 10);
        let mut state = GalleryState::new(exterior.clone(), Vec::new(), PageSizes::default());
        state.select_filter(Filter::Exterior);
        assert_eq!(state.displayed().len(), 8);
        assert!(state.has_more());

        assert!(state.begin_load_more());
        assert_eq!(state.finish_load_more(), 2);
        assert_eq!(state.displayed(), exterior.as_slice());
        assert!(!state.has_more());

        assert!(!state.begin_load_more());
        assert_eq!(state.displayed().len(), 10);
    }

    #[test]
    fn repeated_trigger_while_loading_is_rejected() {
        let mut state = GalleryState::new(
            images(Category::Exterior, 30),
            Vec::new(),
            PageSizes::default(),
        );
        assert!(state.begin_load_more());
        assert!(!state.begin_load_more());
        assert!(!state.begin_load_more());
        assert_eq!(state.finish_load_more(), 6);
        assert_eq!(state.displayed().len(), 14);
        assert!(!state.is_loading_more());
    }

    #[test]
    fn load_more_never_overlaps_or_skips() {
        let exterior = images(Category::Exterior, 17);
        let interior = images(Category::Interior, 12);
        let all: Vec<ImageRef> = exterior.iter().chain(&interior).cloned().collect();
        let mut state = GalleryState::new(exterior, interior, PageSizes::default());

        for _ in 0..10 {
            if state.begin_load_more() {
                state.finish_load_more();
            }
            assert_prefix_invariant(&state, &all);
        }
        assert_eq!(state.displayed(), all.as_slice());
    }

    #[test]
    fn filter_switch_resets_page_and_flag() {
        let exterior = images(Category::Exterior, 20);
        let interior = images(Category::Interior, 3);
        let mut state = GalleryState::new(exterior.clone(), interior.clone(), PageSizes::default());
        assert!(state.begin_load_more());
        state.finish_load_more();
        assert_eq!(state.displayed().len(), 14);

        state.select_filter(Filter::Interior);
        assert_eq!(state.displayed(), interior.as_slice());
        assert!(!state.has_more());

        state.select_filter(Filter::Exterior);
        assert_eq!(state.displayed(), &exterior[..8]);
        assert!(state.has_more());
    }

    #[test]
    fn filter_switch_clears_pending_guard() {
        let mut state = GalleryState::new(
            images(Category::Exterior, 20),
            Vec::new(),
            PageSizes::default(),
        );
        assert!(state.begin_load_more());
        state.select_filter(Filter::Exterior);
        assert!(!state.is_loading_more());
        assert!(state.begin_load_more());
    }

    #[test]
    fn exact_page_has_nothing_more() {
        let state = GalleryState::new(
            images(Category::Exterior, 4),
            images(Category::Interior, 4),
            PageSizes::default(),
        );
        assert_eq!(state.displayed().len(), 8);
        assert!(!state.has_more());
    }

    #[test]
    fn empty_sources_are_ready_but_empty() {
        let mut state = GalleryState::new(Vec::new(), Vec::new(), PageSizes::default());
        assert!(state.displayed().is_empty());
        assert!(!state.has_more());
        assert!(!state.begin_load_more());
    }

    #[test]
    fn parses_filters() {
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("interior".parse::<Filter>().unwrap(), Filter::Interior);
        assert!("home".parse::<Filter>().is_err());
        assert!(Filter::try_from(Category::Home).is_err());
        assert_eq!(Filter::try_from(Category::Exterior).unwrap(), Filter::Exterior);
    }
}
