use std::fmt;

use iced::{
    Element,
    widget::{pick_list, row, text},
};

use data::format::format_date_ru;

/// One selectable snapshot date, kept in ISO form and displayed in
/// `DD.MM.YYYY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDate(pub String);

impl fmt::Display for ArchiveDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_date_ru(&self.0))
    }
}

/// The snapshot date selector. When the date listing failed the dashboard
/// still works, it just loses the ability to browse history.
#[derive(Debug, Default)]
pub struct Archive {
    dates: Vec<ArchiveDate>,
    pub active: Option<ArchiveDate>,
    pub degraded: bool,
}

impl Archive {
    /// Replaces the known dates and activates the most recent one.
    /// Returns the date the dashboard should fetch, if any.
    pub fn set_dates(&mut self, dates: Vec<String>) -> Option<String> {
        self.degraded = false;
        self.dates = dates.into_iter().map(ArchiveDate).collect();
        self.active = self.dates.first().cloned();

        self.active.as_ref().map(|date| date.0.clone())
    }

    pub fn set_degraded(&mut self) {
        self.degraded = true;
        self.dates.clear();
        self.active = None;
    }

    pub fn view<'a, M: Clone + 'a>(
        &'a self,
        on_select: impl Fn(ArchiveDate) -> M + 'a,
    ) -> Element<'a, M> {
        let selector: Element<'a, M> = if self.degraded || self.dates.is_empty() {
            text("—").size(13).into()
        } else {
            pick_list(self.dates.as_slice(), self.active.clone(), on_select)
                .text_size(13)
                .into()
        };

        row![text("Дата:").size(13), selector]
            .spacing(8)
            .align_y(iced::Alignment::Center)
            .into()
    }
}
