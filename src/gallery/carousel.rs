use crate::category::ImageRef;

/// Default horizontal displacement a drag must exceed to change slides.
pub const DRAG_THRESHOLD: f32 = 50.0;

/// Slide position over the home images. The index wraps in both directions.
#[derive(Debug, Clone)]
pub struct Carousel {
    images: Vec<ImageRef>,
    current: usize,
    drag_threshold: f32,
    drag_start: Option<f32>,
}

impl Carousel {
    pub fn new(images: Vec<ImageRef>) -> Self {
        Self::with_drag_threshold(images, DRAG_THRESHOLD)
    }

    pub fn with_drag_threshold(images: Vec<ImageRef>, drag_threshold: f32) -> Self {
        Self {
            images,
            current: 0,
            drag_threshold,
            drag_start: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    /// Index of the visible slide, `None` when there are no slides.
    pub fn current_index(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.current)
    }

    pub fn advance(&mut self) {
        if self.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.images.len();
    }

    pub fn retreat(&mut self) {
        if self.is_empty() {
            return;
        }
        self.current = match self.current {
            0 => self.images.len() - 1,
            i => i - 1,
        };
    }

    /// Jump to an indicator. Out of range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            return false;
        }
        self.current = index;
        true
    }

    pub fn drag_start(&mut self, x: f32) {
        self.drag_start = Some(x);
    }

    /// Finish a drag at `x`. A drag end with no matching start is ignored.
    pub fn drag_end(&mut self, x: f32) -> bool {
        match self.drag_start.take() {
            Some(start) => self.swipe(start, x),
            None => false,
        }
    }

    /// Apply a complete horizontal gesture. Leftward movement past the
    /// threshold shows the next slide, rightward the previous one.
    pub fn swipe(&mut self, start_x: f32, end_x: f32) -> bool {
        let diff = start_x - end_x;
        if self.is_empty() || diff.abs() <= self.drag_threshold {
            return false;
        }
        if diff > 0.0 {
            self.advance();
        } else {
            self.retreat();
        }
        true
    }
}
