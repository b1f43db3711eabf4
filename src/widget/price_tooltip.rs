//! Hover tooltip anchored to a cell, shown in an overlay so it can escape
//! the card's scrollable. Prefers the space above the anchor, flips below
//! when the top edge is too close, and clamps to the window either way.

use iced::advanced::layout::{self, Layout};
use iced::advanced::widget::{Operation, Tree, tree};
use iced::advanced::{Clipboard, Shell, Widget, overlay, renderer};
use iced::event::{self, Event};
use iced::{Element, Length, Point, Rectangle, Size, Vector, mouse};

const ANCHOR_GAP: f32 = 8.0;
const EDGE_MARGIN: f32 = 4.0;

pub struct PriceTooltip<'a, Message, Theme = iced::Theme, Renderer = iced::Renderer> {
    content: Element<'a, Message, Theme, Renderer>,
    tip: Element<'a, Message, Theme, Renderer>,
}

impl<'a, Message, Theme, Renderer> PriceTooltip<'a, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    pub fn new(
        content: impl Into<Element<'a, Message, Theme, Renderer>>,
        tip: impl Into<Element<'a, Message, Theme, Renderer>>,
    ) -> Self {
        Self {
            content: content.into(),
            tip: tip.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct State {
    hovered: bool,
}

/// Picks the tooltip's top-left corner for a given anchor and viewport.
fn placement(anchor: Rectangle, tip: Size, viewport: Size) -> Point {
    let max_x = (viewport.width - tip.width - EDGE_MARGIN).max(EDGE_MARGIN);
    let x = (anchor.center_x() - tip.width / 2.0).clamp(EDGE_MARGIN, max_x);

    let above = anchor.y - tip.height - ANCHOR_GAP;
    let y = if above >= EDGE_MARGIN {
        above
    } else {
        let below = anchor.y + anchor.height + ANCHOR_GAP;

        if below + tip.height <= viewport.height - EDGE_MARGIN {
            below
        } else {
            (viewport.height - tip.height - EDGE_MARGIN).max(EDGE_MARGIN)
        }
    };

    Point::new(x, y)
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for PriceTooltip<'_, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn children(&self) -> Vec<Tree> {
        vec![Tree::new(&self.content), Tree::new(&self.tip)]
    }

    fn diff(&self, tree: &mut Tree) {
        tree.diff_children(&[&self.content, &self.tip]);
    }

    fn size(&self) -> Size<Length> {
        self.content.as_widget().size()
    }

    fn layout(
        &self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        self.content
            .as_widget()
            .layout(&mut tree.children[0], renderer, limits)
    }

    fn operate(
        &self,
        tree: &mut Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn Operation,
    ) {
        self.content
            .as_widget()
            .operate(&mut tree.children[0], layout, renderer, operation);
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
        if matches!(
            event,
            Event::Mouse(mouse::Event::CursorMoved { .. } | mouse::Event::CursorLeft)
        ) {
            let state = tree.state.downcast_mut::<State>();
            let hovered = cursor.position_over(layout.bounds()).is_some();

            if state.hovered != hovered {
                state.hovered = hovered;
                shell.invalidate_layout();
            }
        }

        self.content.as_widget_mut().on_event(
            &mut tree.children[0],
            event,
            layout,
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        )
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        self.content.as_widget().mouse_interaction(
            &tree.children[0],
            layout,
            cursor,
            viewport,
            renderer,
        )
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
        self.content.as_widget().draw(
            &tree.children[0],
            renderer,
            theme,
            defaults,
            layout,
            cursor,
            viewport,
        );
    }

    fn overlay<'b>(
        &'b mut self,
        tree: &'b mut Tree,
        layout: Layout<'_>,
        _renderer: &Renderer,
        translation: Vector,
    ) -> Option<overlay::Element<'b, Message, Theme, Renderer>> {
        let hovered = tree.state.downcast_ref::<State>().hovered;
        if !hovered {
            return None;
        }

        let (_, tip_trees) = tree.children.split_at_mut(1);

        Some(overlay::Element::new(Box::new(Overlay {
            tip: &mut self.tip,
            tree: &mut tip_trees[0],
            anchor: layout.bounds() + translation,
        })))
    }
}

struct Overlay<'a, 'b, Message, Theme, Renderer> {
    tip: &'b mut Element<'a, Message, Theme, Renderer>,
    tree: &'b mut Tree,
    anchor: Rectangle,
}

impl<Message, Theme, Renderer> overlay::Overlay<Message, Theme, Renderer>
    for Overlay<'_, '_, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    fn layout(&mut self, renderer: &Renderer, bounds: Size) -> layout::Node {
        let limits = layout::Limits::new(Size::ZERO, bounds);

        let node = self.tip.as_widget().layout(self.tree, renderer, &limits);
        let position = placement(self.anchor, node.size(), bounds);

        node.move_to(position)
    }

    fn draw(
        &self,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
    ) {
        self.tip.as_widget().draw(
            self.tree,
            renderer,
            theme,
            style,
            layout,
            cursor,
            &layout.bounds(),
        );
    }

    fn is_over(&self, _layout: Layout<'_>, _renderer: &Renderer, _cursor_position: Point) -> bool {
        // purely informational, never captures the mouse
        false
    }
}

impl<'a, Message, Theme, Renderer> From<PriceTooltip<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: renderer::Renderer + 'a,
{
    fn from(tooltip: PriceTooltip<'a, Message, Theme, Renderer>) -> Self {
        Self::new(tooltip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(800.0, 600.0);

    fn anchor(x: f32, y: f32) -> Rectangle {
        Rectangle {
            x,
            y,
            width: 60.0,
            height: 20.0,
        }
    }

    #[test]
    fn prefers_space_above_the_anchor() {
        let position = placement(anchor(300.0, 300.0), Size::new(120.0, 40.0), VIEWPORT);

        assert_eq!(position, Point::new(270.0, 252.0));
    }

    #[test]
    fn flips_below_near_the_top_edge() {
        let position = placement(anchor(300.0, 10.0), Size::new(120.0, 40.0), VIEWPORT);

        assert_eq!(position.y, 38.0);
    }

    #[test]
    fn clamps_to_the_side_edges() {
        let left = placement(anchor(0.0, 300.0), Size::new(120.0, 40.0), VIEWPORT);
        assert_eq!(left.x, EDGE_MARGIN);

        let right = placement(anchor(790.0, 300.0), Size::new(120.0, 40.0), VIEWPORT);
        assert_eq!(right.x, VIEWPORT.width - 120.0 - EDGE_MARGIN);
    }
}
