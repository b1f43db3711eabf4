use api::Block;
use data::blocks::SheetKind;
use iced::{
    Element, Length,
    widget::{container, text},
};

use crate::widget::drag_list::{Axis, DragEvent, List, reorder_vec};

pub mod archive;
pub mod card;

pub use archive::Archive;
pub use card::Card;

#[derive(Debug, Clone)]
pub enum Message {
    Card(usize, card::Message),
    CardDragged(DragEvent),
    DateSelected(archive::ArchiveDate),
}

/// What the dashboard needs its parent to do after an update.
pub enum Action {
    FetchBlocks { date: Option<String> },
    None,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    pub cards: Vec<Card>,
    pub archive: Archive,
}

impl Dashboard {
    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::Card(index, message) => {
                if let Some(card) = self.cards.get_mut(index) {
                    card.update(message);
                }
                Action::None
            }
            Message::CardDragged(event) => {
                if let DragEvent::Dropped { .. } = event {
                    reorder_vec(&mut self.cards, &event);
                    self.persist_order();
                }
                Action::None
            }
            Message::DateSelected(date) => {
                self.archive.active = Some(date.clone());
                Action::FetchBlocks {
                    date: Some(date.0),
                }
            }
        }
    }

    /// Rebuilds the cards from a fresh server response: hidden sheets are
    /// dropped and any saved order is applied before display.
    pub fn set_blocks(&mut self, blocks: &[Block]) {
        let cards: Vec<Card> = blocks
            .iter()
            .filter(|block| !SheetKind::from_name(&block.sheet_name).is_hidden())
            .map(Card::from_block)
            .collect();

        self.cards = match data::order::load() {
            Some(saved) => data::order::apply_saved_order(cards, &saved, |card| &card.id),
            None => cards,
        };
    }

    fn persist_order(&self) {
        let ids: Vec<String> = self.cards.iter().map(|card| card.id.clone()).collect();

        if let Err(e) = data::order::save(&ids) {
            log::error!("{e}");
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        if self.cards.is_empty() {
            return container(text("Нет данных").size(14))
                .padding(32)
                .width(Length::Fill)
                .center_x(Length::Fill)
                .into();
        }

        let cards = self.cards.iter().enumerate().map(|(index, card)| {
            card.view()
                .map(move |message| Message::Card(index, message))
        });

        List::with_children(Axis::Vertical, cards)
            .width(Length::Fill)
            .spacing(16)
            .padding(16)
            .on_drag(Message::CardDragged)
            .into()
    }
}
