//! Event handling for select, drag and resize interactions.

use boxcanvas_core::canvas::Canvas;
use boxcanvas_core::input::InputState;
use boxcanvas_core::selection::{HANDLE_HIT_TOLERANCE, HandleKind, ManipulationState, hit_test_handles};
use kurbo::Point;

/// Handles high-level pointer events and translates them to canvas operations.
#[derive(Debug, Default)]
pub struct EventHandler {
    /// Current manipulation state (while dragging an element or one of its handles).
    manipulation: Option<ManipulationState>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a manipulation is in progress.
    pub fn is_manipulating(&self) -> bool {
        self.manipulation.is_some()
    }

    /// Get the current manipulation state.
    pub fn manipulation(&self) -> Option<&ManipulationState> {
        self.manipulation.as_ref()
    }

    /// Determine the cursor type based on hover position.
    /// Returns: None = default, Some(None) = move, Some(Some(handle)) = resize with direction
    pub fn get_cursor_for_position(&self, canvas: &Canvas, point: Point) -> Option<Option<HandleKind>> {
        if let Some(manip) = &self.manipulation {
            return Some(manip.handle);
        }
        if let Some(id) = canvas.selected() {
            let bounds = canvas.element(id).rect();
            if let Some(handle) = hit_test_handles(bounds, point, HANDLE_HIT_TOLERANCE) {
                return Some(Some(handle));
            }
        }
        canvas.element_at(point).map(|_| None)
    }

    /// Handle a press event (mouse down).
    ///
    /// A handle of the selected element starts a resize. Otherwise the
    /// topmost element under the pointer is selected and starts a drag, and
    /// a press on empty canvas clears the selection.
    pub fn handle_press(&mut self, canvas: &mut Canvas, point: Point) {
        // Handles win over bodies so a handle overlapping another element still resizes
        if let Some(id) = canvas.selected() {
            let original = canvas.element(id);
            if let Some(handle) = hit_test_handles(original.rect(), point, HANDLE_HIT_TOLERANCE) {
                log::debug!("Resizing {} from {:?}", id, handle);
                self.manipulation = Some(ManipulationState::new(id, Some(handle), point, original));
                return;
            }
        }

        match canvas.element_at(point) {
            Some(id) => {
                canvas.select(id);
                self.manipulation = Some(ManipulationState::new(id, None, point, canvas.element(id)));
            }
            None => {
                canvas.clear_selection();
                self.manipulation = None;
            }
        }
    }

    /// Handle pointer movement while the button is held.
    pub fn handle_drag(&mut self, canvas: &mut Canvas, point: Point) {
        let Some(manip) = &mut self.manipulation else {
            return;
        };
        manip.current_point = point;

        let updated = manip.current_element();
        if manip.is_resize() {
            canvas.set_rect(manip.id, updated.rect());
        } else {
            // Dragging writes the position only
            canvas.set_position(manip.id, updated.position());
        }
    }

    /// Follow the pointer while the left button holds a drag.
    ///
    /// Moves without a held button (e.g. a release lost outside the window)
    /// leave the geometry alone.
    pub fn pointer_moved(&mut self, canvas: &mut Canvas, input: &InputState) {
        if input.drag_delta().is_some() {
            self.handle_drag(canvas, input.pointer_position());
        }
    }

    /// The window lost focus: its button release will never arrive, so the
    /// manipulation is committed at the last known pointer position.
    pub fn focus_lost(&mut self, canvas: &mut Canvas, input: &mut InputState) {
        let was_dragging = input.release_all();
        if was_dragging || self.is_manipulating() {
            self.handle_release(canvas, input.pointer_position());
        }
    }

    /// Handle a release event (mouse up).
    pub fn handle_release(&mut self, canvas: &mut Canvas, point: Point) {
        if self.manipulation.is_none() {
            return;
        }
        self.handle_drag(canvas, point);
        if let Some(manip) = self.manipulation.take() {
            let element = canvas.element(manip.id);
            log::debug!(
                "Finished {} of {}: {:?}",
                if manip.is_resize() { "resize" } else { "drag" },
                manip.id,
                element.style
            );
        }
    }

    /// Cancel any ongoing operation.
    ///
    /// Returns true if a drag or resize was undone.
    pub fn cancel(&mut self, canvas: &mut Canvas) -> bool {
        // Restore original geometry if manipulating
        match self.manipulation.take() {
            Some(manip) => {
                canvas.set_element(manip.id, manip.original);
                true
            }
            None => false,
        }
    }

    /// Escape key: undo an active drag/resize, otherwise clear the selection.
    pub fn escape(&mut self, canvas: &mut Canvas) {
        if !self.cancel(canvas) {
            canvas.clear_selection();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxcanvas_core::geometry::{Element, Position, Size};
    use boxcanvas_core::input::{MouseButton, PointerEvent};
    use boxcanvas_core::selection::Corner;

    /// Canvas with two elements: #0 at (0,0) and #1 at (100,100), both 50x50.
    fn canvas() -> Canvas {
        let mut canvas = Canvas::new();
        canvas.add_element();
        let b = canvas.add_element();
        canvas.set_position(b, Position::new(100.0, 100.0));
        canvas
    }

    #[test]
    fn test_press_selects_element() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();

        handler.handle_press(&mut canvas, Point::new(120.0, 120.0));
        assert_eq!(canvas.selected(), Some(canvas.elements()[1]));
        assert!(handler.is_manipulating());

        handler.handle_release(&mut canvas, Point::new(120.0, 120.0));
        assert!(!handler.is_manipulating());

        handler.handle_press(&mut canvas, Point::new(10.0, 10.0));
        assert_eq!(canvas.selected(), Some(canvas.elements()[0]));
    }

    #[test]
    fn test_press_background_clears_selection() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();

        handler.handle_press(&mut canvas, Point::new(10.0, 10.0));
        handler.handle_release(&mut canvas, Point::new(10.0, 10.0));
        assert!(canvas.selected().is_some());

        handler.handle_press(&mut canvas, Point::new(400.0, 400.0));
        assert_eq!(canvas.selected(), None);
        assert!(!handler.is_manipulating());
    }

    #[test]
    fn test_drag_moves_position_only() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        let id = canvas.elements()[1];

        handler.handle_press(&mut canvas, Point::new(125.0, 125.0));
        handler.handle_drag(&mut canvas, Point::new(135.0, 130.0));
        handler.handle_drag(&mut canvas, Point::new(145.0, 105.0));
        handler.handle_release(&mut canvas, Point::new(145.0, 105.0));

        let element = canvas.element(id);
        assert_eq!(element.position(), Position::new(80.0, 120.0));
        assert_eq!(element.size(), Size::default());
    }

    #[test]
    fn test_resize_from_corner_handle() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        let id = canvas.elements()[0];
        canvas.select(id);

        // Bottom-right corner of #0
        handler.handle_press(&mut canvas, Point::new(50.0, 50.0));
        assert!(matches!(
            handler.manipulation().and_then(|m| m.handle),
            Some(HandleKind::Corner(Corner::BottomRight))
        ));

        handler.handle_drag(&mut canvas, Point::new(80.0, 60.0));
        handler.handle_release(&mut canvas, Point::new(80.0, 60.0));

        let element = canvas.element(id);
        assert_eq!(element.position(), Position::new(0.0, 0.0));
        assert_eq!(element.size(), Size::new(80.0, 60.0));
    }

    #[test]
    fn test_resize_top_left_moves_position() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        let id = canvas.elements()[1];
        canvas.select(id);

        handler.handle_press(&mut canvas, Point::new(100.0, 100.0));
        handler.handle_drag(&mut canvas, Point::new(90.0, 80.0));

        let element = canvas.element(id);
        assert_eq!(element.position(), Position::new(80.0, 90.0));
        assert_eq!(element.size(), Size::new(60.0, 70.0));
    }

    #[test]
    fn test_handles_only_on_selected_element() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();

        // Nothing selected: corner of #0 is a body press, so it drags
        handler.handle_press(&mut canvas, Point::new(50.0, 50.0));
        assert!(handler.manipulation().is_some_and(|m| !m.is_resize()));
    }

    #[test]
    fn test_cancel_restores_geometry() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        let id = canvas.elements()[1];
        let before = canvas.element(id);

        handler.handle_press(&mut canvas, Point::new(110.0, 110.0));
        handler.handle_drag(&mut canvas, Point::new(300.0, 300.0));
        assert_ne!(canvas.element(id), before);

        handler.escape(&mut canvas);
        assert_eq!(canvas.element(id), before);
        assert!(!handler.is_manipulating());
        // Selection survives a cancelled drag
        assert_eq!(canvas.selected(), Some(id));

        // Idle escape clears it
        handler.escape(&mut canvas);
        assert_eq!(canvas.selected(), None);
    }

    #[test]
    fn test_cursor_for_position() {
        let mut canvas = canvas();
        let handler = EventHandler::new();

        assert_eq!(handler.get_cursor_for_position(&canvas, Point::new(400.0, 400.0)), None);
        assert_eq!(handler.get_cursor_for_position(&canvas, Point::new(10.0, 10.0)), Some(None));

        canvas.select(canvas.elements()[0]);
        assert_eq!(
            handler.get_cursor_for_position(&canvas, Point::new(0.0, 0.0)),
            Some(Some(HandleKind::Corner(Corner::TopLeft)))
        );
    }

    fn pointer(input: &mut InputState, event: PointerEvent) -> Point {
        input.handle_pointer_event(event);
        input.pointer_position()
    }

    #[test]
    fn test_pointer_moves_drive_drag() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        let mut input = InputState::new();
        let id = canvas.elements()[1];

        let start = pointer(
            &mut input,
            PointerEvent::Down {
                position: Point::new(110.0, 110.0),
                button: MouseButton::Left,
            },
        );
        handler.handle_press(&mut canvas, start);
        pointer(&mut input, PointerEvent::Move { position: Point::new(130.0, 115.0) });
        handler.pointer_moved(&mut canvas, &input);
        assert_eq!(canvas.element(id).position(), Position::new(105.0, 120.0));
    }

    #[test]
    fn test_focus_loss_ends_manipulation() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        let mut input = InputState::new();
        let id = canvas.elements()[1];

        let start = pointer(
            &mut input,
            PointerEvent::Down {
                position: Point::new(110.0, 110.0),
                button: MouseButton::Left,
            },
        );
        handler.handle_press(&mut canvas, start);
        pointer(&mut input, PointerEvent::Move { position: Point::new(120.0, 110.0) });
        handler.pointer_moved(&mut canvas, &input);

        // Release happens outside the window and is never delivered
        handler.focus_lost(&mut canvas, &mut input);
        assert!(!handler.is_manipulating());
        assert_eq!(input.drag_delta(), None);
        let committed = canvas.element(id);
        assert_eq!(committed.position(), Position::new(100.0, 110.0));

        // Later hover moves no longer drag
        pointer(&mut input, PointerEvent::Move { position: Point::new(300.0, 300.0) });
        handler.pointer_moved(&mut canvas, &input);
        assert_eq!(canvas.element(id), committed);
        assert_eq!(canvas.selected(), Some(id));
    }

    #[test]
    fn test_release_without_press_is_noop() {
        let mut canvas = canvas();
        let mut handler = EventHandler::new();
        let snapshot: Vec<Element> = canvas.elements_ordered().map(|(_, e)| e).collect();

        handler.handle_drag(&mut canvas, Point::new(10.0, 10.0));
        handler.handle_release(&mut canvas, Point::new(10.0, 10.0));

        let after: Vec<Element> = canvas.elements_ordered().map(|(_, e)| e).collect();
        assert_eq!(snapshot, after);
    }
}
