//! Measurement seam between the placement pipeline and the host page.
//!
//! The pipeline never caches geometry: every run queries a [`Layout`] afresh so
//! the zones always reflect the current layout. Hosts implement the trait over
//! their real element tree; [`StaticLayout`] is an in-memory stand-in.
use std::collections::HashMap;

use crate::geometry::Rect;

/// Read-only access to rendered element geometry in viewport coordinates.
pub trait Layout {
    /// Rectangles of every element matching `selector`, in document order.
    /// Unknown selectors yield an empty list.
    fn query_all(&self, selector: &str) -> Vec<Rect>;

    /// Rectangle of the first element matching `selector`.
    fn query(&self, selector: &str) -> Option<Rect> {
        self.query_all(selector).into_iter().next()
    }
}

impl<L: Layout + ?Sized> Layout for &L {
    fn query_all(&self, selector: &str) -> Vec<Rect> {
        (**self).query_all(selector)
    }

    fn query(&self, selector: &str) -> Option<Rect> {
        (**self).query(selector)
    }
}

/// Layout backed by a fixed selector-to-rectangles map.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    elements: HashMap<String, Vec<Rect>>,
}

impl StaticLayout {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }

    /// Add one element under `selector`.
    pub fn with(mut self, selector: impl Into<String>, rect: Rect) -> Self {
        self.insert(selector, rect);
        self
    }

    /// Add several elements under `selector`.
    pub fn with_all(
        mut self,
        selector: impl Into<String>,
        rects: impl IntoIterator<Item = Rect>,
    ) -> Self {
        self.elements
            .entry(selector.into())
            .or_default()
            .extend(rects);
        self
    }

    pub fn insert(&mut self, selector: impl Into<String>, rect: Rect) {
        self.elements.entry(selector.into()).or_default().push(rect);
    }

    /// Replace every element under `selector` with a single rectangle.
    pub fn set(&mut self, selector: impl Into<String>, rect: Rect) {
        self.elements.insert(selector.into(), vec![rect]);
    }

    pub fn remove(&mut self, selector: &str) -> Option<Vec<Rect>> {
        self.elements.remove(selector)
    }

    pub fn len(&self) -> usize {
        self.elements.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Layout for StaticLayout {
    fn query_all(&self, selector: &str) -> Vec<Rect> {
        self.elements.get(selector).cloned().unwrap_or_default()
    }
}
