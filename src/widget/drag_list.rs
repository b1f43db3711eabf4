//! Distribute draggable content along one axis.
//!
//! Derived from the `Column` widget of [`dragking`], generalized over the
//! axis so the same widget reorders stacked cards and table header cells.
//! Drop target position is decided by the closest index, and the picked
//! item only moves along the list axis, clamped to the list bounds.
//!
//! [`dragking`]: https://github.com/airstrike/dragking/

use iced::advanced::layout::{self, Layout};
use iced::advanced::widget::{Operation, Tree, Widget, tree};
use iced::advanced::{Clipboard, Shell, overlay, renderer};
use iced::alignment::Alignment;
use iced::event::{self, Event};
use iced::{Element, Length, Padding, Pixels, Point, Rectangle, Size, Vector, mouse, window};

const DRAG_HANDLE_WIDTH: f32 = 14.0;

/// Applies a completed [`DragEvent`] to the vector backing the list.
pub fn reorder_vec<T>(vec: &mut Vec<T>, event: &DragEvent) {
    if let DragEvent::Dropped {
        index,
        target_index,
    } = event
    {
        // out-of-range indices are a no-op
        if *index >= vec.len() || *target_index > vec.len() {
            return;
        }

        if vec.len() > 1 && target_index != index {
            let item = vec.remove(*index);
            let insert_index = if index < target_index {
                *target_index - 1
            } else {
                *target_index
            };
            vec.insert(insert_index, item);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    fn main(self, point: Point) -> f32 {
        match self {
            Axis::Vertical => point.y,
            Axis::Horizontal => point.x,
        }
    }

    fn main_start(self, bounds: Rectangle) -> f32 {
        match self {
            Axis::Vertical => bounds.y,
            Axis::Horizontal => bounds.x,
        }
    }

    fn main_len(self, bounds: Rectangle) -> f32 {
        match self {
            Axis::Vertical => bounds.height,
            Axis::Horizontal => bounds.width,
        }
    }

    fn translation(self, amount: f32) -> Vector {
        match self {
            Axis::Vertical => Vector::new(0.0, amount),
            Axis::Horizontal => Vector::new(amount, 0.0),
        }
    }

    fn flex(self) -> layout::flex::Axis {
        match self {
            Axis::Vertical => layout::flex::Axis::Vertical,
            Axis::Horizontal => layout::flex::Axis::Horizontal,
        }
    }
}

#[derive(Debug, Clone)]
enum Action {
    Idle,
    Picking {
        index: usize,
        origin: Point,
    },
    Dragging {
        index: usize,
        origin: Point,
        last_cursor: Point,
    },
}

#[derive(Debug, Clone)]
pub enum DragEvent {
    Picked { index: usize },
    Dropped { index: usize, target_index: usize },
    Canceled { index: usize },
}

#[allow(missing_debug_implementations)]
pub struct List<'a, Message, Theme = iced::Theme, Renderer = iced::Renderer> {
    axis: Axis,
    spacing: f32,
    padding: Padding,
    width: Length,
    height: Length,
    align: Alignment,
    children: Vec<Element<'a, Message, Theme, Renderer>>,
    on_drag: Option<Box<dyn Fn(DragEvent) -> Message + 'a>>,
}

impl<'a, Message, Theme, Renderer> List<'a, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    pub fn new(axis: Axis) -> Self {
        Self::from_vec(axis, Vec::new())
    }

    pub fn with_children(
        axis: Axis,
        children: impl IntoIterator<Item = Element<'a, Message, Theme, Renderer>>,
    ) -> Self {
        children
            .into_iter()
            .fold(Self::new(axis), |list, child| list.push(child))
    }

    pub fn from_vec(axis: Axis, children: Vec<Element<'a, Message, Theme, Renderer>>) -> Self {
        Self {
            axis,
            spacing: 0.0,
            padding: Padding::ZERO,
            width: Length::Shrink,
            height: Length::Shrink,
            align: Alignment::Start,
            children,
            on_drag: None,
        }
    }

    /// Sets the spacing _between_ elements.
    pub fn spacing(mut self, amount: impl Into<Pixels>) -> Self {
        self.spacing = amount.into().0;
        self
    }

    pub fn padding<P: Into<Padding>>(mut self, padding: P) -> Self {
        self.padding = padding.into();
        self
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    pub fn align(mut self, align: impl Into<Alignment>) -> Self {
        self.align = align.into();
        self
    }

    pub fn push(mut self, child: impl Into<Element<'a, Message, Theme, Renderer>>) -> Self {
        let child = child.into();
        let child_size = child.as_widget().size_hint();

        self.width = self.width.enclose(child_size.width);
        self.height = self.height.enclose(child_size.height);

        self.children.push(child);
        self
    }

    /// The message produced by the [`List`] when a child is dragged.
    pub fn on_drag(mut self, on_reorder: impl Fn(DragEvent) -> Message + 'a) -> Self {
        self.on_drag = Some(Box::new(on_reorder));
        self
    }

    /// The grab zone of a child: its leading strip.
    fn handle_bounds(&self, child_bounds: Rectangle) -> Rectangle {
        Rectangle {
            width: DRAG_HANDLE_WIDTH,
            ..child_bounds
        }
    }

    fn compute_target_index(
        &self,
        cursor_position: Point,
        layout: Layout<'_>,
        dragged_index: usize,
    ) -> usize {
        let axis = self.axis;
        let cursor_main = axis.main(cursor_position);
        let bounds = layout.bounds();

        if cursor_main <= axis.main_start(bounds) {
            return 0;
        }

        if cursor_main >= axis.main_start(bounds) + axis.main_len(bounds) {
            return self.children.len();
        }

        for (i, child_layout) in layout.children().enumerate() {
            let child_bounds = child_layout.bounds();
            let start = axis.main_start(child_bounds);
            let len = axis.main_len(child_bounds);
            let middle = start + len / 2.0;

            if cursor_main >= start && cursor_main <= start + len {
                // the dragged item itself is not a drop target
                if i == dragged_index {
                    continue;
                }

                if cursor_main < middle {
                    return i;
                } else {
                    return i + 1;
                }
            } else if cursor_main < start {
                return i;
            }
        }

        self.children.len()
    }
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for List<'_, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<Action>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(Action::Idle)
    }

    fn children(&self) -> Vec<Tree> {
        self.children.iter().map(Tree::new).collect()
    }

    fn diff(&self, tree: &mut Tree) {
        tree.diff_children(&self.children);
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    fn layout(
        &self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::flex::resolve(
            self.axis.flex(),
            renderer,
            limits,
            self.width,
            self.height,
            self.padding,
            self.spacing,
            self.align,
            &self.children,
            &mut tree.children,
        )
    }

    fn operate(
        &self,
        tree: &mut Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn Operation,
    ) {
        operation.container(None, layout.bounds(), &mut |operation| {
            self.children
                .iter()
                .zip(&mut tree.children)
                .zip(layout.children())
                .for_each(|((child, state), layout)| {
                    child
                        .as_widget()
                        .operate(state, layout, renderer, operation);
                });
        });
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) -> event::Status {
        let action = tree.state.downcast_mut::<Action>();

        match &event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(cursor_position) = cursor.position_over(layout.bounds()) {
                    for (index, child_layout) in layout.children().enumerate() {
                        let handle = self.handle_bounds(child_layout.bounds());

                        if handle.contains(cursor_position) {
                            *action = Action::Picking {
                                index,
                                origin: cursor_position,
                            };
                            return event::Status::Captured;
                        }
                    }
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => match *action {
                Action::Picking { index, origin } => {
                    if let Some(cursor_position) = cursor.position() {
                        *action = Action::Dragging {
                            index,
                            origin,
                            last_cursor: cursor_position,
                        };
                        if let Some(on_reorder) = &self.on_drag {
                            shell.publish(on_reorder(DragEvent::Picked { index }));
                        }
                        return event::Status::Captured;
                    }
                }
                Action::Dragging { origin, index, .. } => {
                    if let Some(cursor_position) = cursor.position() {
                        let bounds = layout.bounds();
                        let axis = self.axis;

                        // clamp so the dragged item never leaves the list
                        let clamped_main = axis.main(cursor_position).clamp(
                            axis.main_start(bounds),
                            axis.main_start(bounds) + axis.main_len(bounds),
                        );
                        let clamped_cursor = match axis {
                            Axis::Vertical => Point::new(cursor_position.x, clamped_main),
                            Axis::Horizontal => Point::new(clamped_main, cursor_position.y),
                        };

                        *action = Action::Dragging {
                            last_cursor: clamped_cursor,
                            origin,
                            index,
                        };

                        shell.request_redraw(window::RedrawRequest::NextFrame);
                        return event::Status::Captured;
                    }
                }
                Action::Idle => {}
            },
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => match *action {
                Action::Dragging {
                    index, last_cursor, ..
                } => {
                    let target_index = self.compute_target_index(last_cursor, layout, index);

                    if let Some(on_reorder) = &self.on_drag {
                        shell.publish(on_reorder(DragEvent::Dropped {
                            index,
                            target_index,
                        }));
                    }
                    *action = Action::Idle;
                    return event::Status::Captured;
                }
                Action::Picking { index, .. } => {
                    // never moved, so not a drag
                    if let Some(on_reorder) = &self.on_drag {
                        shell.publish(on_reorder(DragEvent::Canceled { index }));
                    }
                    *action = Action::Idle;
                }
                Action::Idle => {}
            },
            _ => {}
        }

        self.children
            .iter_mut()
            .zip(&mut tree.children)
            .zip(layout.children())
            .map(|((child, tree), layout)| {
                child.as_widget_mut().on_event(
                    tree,
                    event.clone(),
                    layout,
                    cursor,
                    renderer,
                    clipboard,
                    shell,
                    viewport,
                )
            })
            .fold(event::Status::Ignored, event::Status::merge)
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        let action = tree.state.downcast_ref::<Action>();

        match action {
            Action::Dragging { .. } | Action::Picking { .. } => {
                return mouse::Interaction::Grabbing;
            }
            Action::Idle => {
                for child_layout in layout.children() {
                    let handle = self.handle_bounds(child_layout.bounds());

                    if cursor.position_in(handle).is_some() {
                        return mouse::Interaction::Grab;
                    }
                }
            }
        }

        self.children
            .iter()
            .zip(&tree.children)
            .zip(layout.children())
            .map(|((child, state), layout)| {
                child
                    .as_widget()
                    .mouse_interaction(state, layout, cursor, viewport, renderer)
            })
            .max()
            .unwrap_or_default()
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        defaults: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        let action = tree.state.downcast_ref::<Action>();

        match action {
            Action::Dragging {
                index,
                last_cursor,
                origin,
                ..
            } => {
                let axis = self.axis;
                let child_count = self.children.len();
                let target_index = self
                    .compute_target_index(*last_cursor, layout, *index)
                    .min(child_count);

                let drag_len = layout
                    .children()
                    .nth(*index)
                    .map(|l| axis.main_len(l.bounds()) + self.spacing)
                    .unwrap_or_default();

                for (i, ((child, state), child_layout)) in self
                    .children
                    .iter()
                    .zip(&tree.children)
                    .zip(layout.children())
                    .enumerate()
                {
                    if i == *index {
                        // the dragged item follows the cursor along the axis
                        let translation =
                            axis.translation(axis.main(*last_cursor) - axis.main(*origin));

                        renderer.with_translation(translation, |renderer| {
                            renderer.with_layer(child_layout.bounds(), |renderer| {
                                child.as_widget().draw(
                                    state,
                                    renderer,
                                    theme,
                                    defaults,
                                    child_layout,
                                    cursor,
                                    viewport,
                                );
                            });
                        });
                    } else {
                        // neighbors shift to open a gap at the drop target
                        let offset: i32 = match target_index.cmp(index) {
                            std::cmp::Ordering::Less if i >= target_index && i < *index => 1,
                            std::cmp::Ordering::Greater if i > *index && i < target_index => -1,
                            _ => 0,
                        };

                        renderer.with_translation(
                            axis.translation(offset as f32 * drag_len),
                            |renderer| {
                                child.as_widget().draw(
                                    state,
                                    renderer,
                                    theme,
                                    defaults,
                                    child_layout,
                                    cursor,
                                    viewport,
                                );
                            },
                        );
                    }
                }
            }
            _ => {
                for ((child, state), layout) in self
                    .children
                    .iter()
                    .zip(&tree.children)
                    .zip(layout.children())
                {
                    child
                        .as_widget()
                        .draw(state, renderer, theme, defaults, layout, cursor, viewport);
                }
            }
        }
    }

    fn overlay<'b>(
        &'b mut self,
        tree: &'b mut Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        translation: Vector,
    ) -> Option<overlay::Element<'b, Message, Theme, Renderer>> {
        overlay::from_children(&mut self.children, tree, layout, renderer, translation)
    }
}

impl<'a, Message, Theme, Renderer> From<List<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: renderer::Renderer + 'a,
{
    fn from(list: List<'a, Message, Theme, Renderer>) -> Self {
        Self::new(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_before_picked_index_inserts_at_target() {
        let mut items = vec!["a", "b", "c", "d"];

        reorder_vec(
            &mut items,
            &DragEvent::Dropped {
                index: 2,
                target_index: 0,
            },
        );

        assert_eq!(items, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn drop_after_picked_index_accounts_for_removal() {
        let mut items = vec!["a", "b", "c", "d"];

        reorder_vec(
            &mut items,
            &DragEvent::Dropped {
                index: 0,
                target_index: 3,
            },
        );

        assert_eq!(items, vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn drop_on_own_position_is_a_noop() {
        let mut items = vec!["a", "b"];

        reorder_vec(
            &mut items,
            &DragEvent::Dropped {
                index: 1,
                target_index: 1,
            },
        );
        reorder_vec(&mut items, &DragEvent::Canceled { index: 0 });

        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn out_of_range_drop_is_ignored() {
        let mut items = vec!["a", "b"];

        reorder_vec(
            &mut items,
            &DragEvent::Dropped {
                index: 5,
                target_index: 0,
            },
        );

        assert_eq!(items, vec!["a", "b"]);
    }
}
