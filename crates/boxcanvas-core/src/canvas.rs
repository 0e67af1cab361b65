//! Canvas state: element ids, per-element geometry and selection.

use crate::geometry::{Element, ElementId, Position};
use crate::state::{Atom, AtomFamily};
use kurbo::{Point, Rect};

/// Runtime canvas state (not persisted).
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Element ids in insertion order (back to front).
    elements: Atom<Vec<ElementId>>,
    /// Geometry per element.
    element: AtomFamily<ElementId, Element>,
    /// Currently selected element.
    selected: Atom<Option<ElementId>>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self {
            elements: Atom::new("elements", Vec::new()),
            element: AtomFamily::new("element", Element::default()),
            selected: Atom::new("selectedElement", None),
        }
    }

    /// Append a new element and return its id.
    ///
    /// The id is the element count at creation time. No geometry is written,
    /// so the element reads back as the default rectangle.
    pub fn add_element(&mut self) -> ElementId {
        let id = self.elements.update(|ids| {
            let id = ElementId(ids.len() as u32);
            ids.push(id);
            id
        });
        log::debug!("Added element {}", id);
        id
    }

    /// Element ids in paint order.
    pub fn elements(&self) -> &[ElementId] {
        self.elements.get()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.get().len()
    }

    /// Check if the canvas has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.get().is_empty()
    }

    /// Check if `id` was added to the canvas.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.get().contains(&id)
    }

    /// Geometry of an element (the default rectangle if never written).
    pub fn element(&self, id: ElementId) -> Element {
        self.element.get(&id)
    }

    /// Elements with their geometry, back to front.
    pub fn elements_ordered(&self) -> impl Iterator<Item = (ElementId, Element)> + '_ {
        self.elements.get().iter().map(|&id| (id, self.element.get(&id)))
    }

    /// Overwrite an element's geometry.
    pub fn set_element(&mut self, id: ElementId, element: Element) {
        self.element.set(id, element);
    }

    /// Move an element. Its size is left untouched.
    pub fn set_position(&mut self, id: ElementId, position: Position) {
        self.element.update(id, |element| element.style.position = position);
    }

    /// Overwrite an element's position and size from `rect`.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        self.element.set(id, Element::from_rect(rect));
    }

    /// Select an element (replaces any previous selection).
    pub fn select(&mut self, id: ElementId) {
        if *self.selected.get() != Some(id) {
            log::debug!("Selected element {}", id);
        }
        self.selected.set(Some(id));
    }

    /// Clear selection.
    pub fn clear_selection(&mut self) {
        self.selected.set(None);
    }

    /// The selected element, if any.
    pub fn selected(&self) -> Option<ElementId> {
        *self.selected.get()
    }

    /// Check if an element is selected.
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected() == Some(id)
    }

    /// Topmost element under `point`.
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        self.elements
            .get()
            .iter()
            .rev()
            .copied()
            .find(|id| self.element.get(id).contains(point))
    }

    /// Combined write count of all slices. Changes whenever state is written.
    pub fn revision(&self) -> u64 {
        self.elements.revision() + self.element.revision() + self.selected.revision()
    }
}
