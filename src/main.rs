#![windows_subsystem = "windows"]

mod logger;
mod screen;
mod style;
mod widget;

use api::Block;
use image::ImageEncoder;
use screen::{
    Notification,
    dashboard::{self, Dashboard},
};

use iced::{
    Alignment, Element, Length, Size, Task, Theme,
    widget::{button, column, container, horizontal_space, pick_list, row, scrollable, text},
    window,
};

fn main() -> iced::Result {
    logger::setup(cfg!(debug_assertions)).expect("Failed to initialize logger");

    let saved_window = data::config::State::load().window;

    iced::application("Trastboard", Trastboard::update, Trastboard::view)
        .settings(iced::Settings {
            default_text_size: iced::Pixels(13.0),
            antialiasing: true,
            ..Default::default()
        })
        .window_size(Size::new(saved_window.width, saved_window.height))
        .theme(Trastboard::theme)
        .subscription(Trastboard::subscription)
        .exit_on_close_request(false)
        .run_with(Trastboard::new)
}

#[derive(Debug, Clone)]
enum Message {
    DatesFetched(Result<Vec<String>, String>),
    BlocksFetched(u64, Result<Vec<Block>, String>),
    Dashboard(dashboard::Message),
    TakeScreenshot,
    ScreenshotCaptured(window::Screenshot),
    ScreenshotSaved(Result<String, String>),
    ThemeSelected(Theme),
    DismissNotification,
    WindowResized(Size),
    WindowCloseRequested(window::Id),
}

struct Trastboard {
    config: data::config::State,
    dashboard: Dashboard,
    notification: Option<Notification>,
    /// Monotonic fetch counter; a response tagged with an older value is
    /// stale and gets dropped.
    fetch_seq: u64,
}

impl Trastboard {
    fn new() -> (Self, Task<Message>) {
        let config = data::config::State::load();
        let server_url = config.server_url.clone();

        (
            Self {
                config,
                dashboard: Dashboard::default(),
                notification: None,
                fetch_seq: 0,
            },
            Task::perform(
                async move {
                    api::client::fetch_dates(&server_url)
                        .await
                        .map_err(|e| e.to_string())
                },
                Message::DatesFetched,
            ),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DatesFetched(Ok(dates)) => {
                let active = self.dashboard.archive.set_dates(dates);
                self.fetch_blocks(active)
            }
            Message::DatesFetched(Err(e)) => {
                // history browsing degrades, the latest data still loads
                log::error!("Failed to fetch snapshot dates: {e}");
                self.dashboard.archive.set_degraded();
                self.fetch_blocks(None)
            }
            Message::BlocksFetched(seq, result) => {
                if seq != self.fetch_seq {
                    return Task::none();
                }

                match result {
                    Ok(blocks) => {
                        self.dashboard.set_blocks(&blocks);
                        self.notification = None;
                    }
                    Err(message) => {
                        self.notification = Some(Notification::Error(message));
                    }
                }

                Task::none()
            }
            Message::Dashboard(message) => match self.dashboard.update(message) {
                dashboard::Action::FetchBlocks { date } => self.fetch_blocks(date),
                dashboard::Action::None => Task::none(),
            },
            Message::TakeScreenshot => window::get_latest()
                .and_then(window::screenshot)
                .map(Message::ScreenshotCaptured),
            Message::ScreenshotCaptured(screenshot) => {
                let server_url = self.config.server_url.clone();

                Task::perform(
                    save_screenshot(server_url, screenshot),
                    Message::ScreenshotSaved,
                )
            }
            Message::ScreenshotSaved(Ok(file_name)) => {
                self.notification =
                    Some(Notification::Info(format!("Скриншот сохранён: {file_name}")));
                Task::none()
            }
            Message::ScreenshotSaved(Err(e)) => {
                log::error!("Failed to save screenshot: {e}");
                self.notification = Some(Notification::Error(format!(
                    "Не удалось сохранить скриншот: {e}"
                )));
                Task::none()
            }
            Message::ThemeSelected(theme) => {
                self.config.theme = data::config::Theme(theme);

                if let Err(e) = self.config.save() {
                    log::error!("{e}");
                }
                Task::none()
            }
            Message::DismissNotification => {
                self.notification = None;
                Task::none()
            }
            Message::WindowResized(size) => {
                self.config.window = data::config::WindowSpec {
                    width: size.width,
                    height: size.height,
                };
                Task::none()
            }
            Message::WindowCloseRequested(id) => {
                if let Err(e) = self.config.save() {
                    log::error!("{e}");
                }
                window::close(id)
            }
        }
    }

    fn subscription(&self) -> iced::Subscription<Message> {
        iced::Subscription::batch([
            window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
            window::close_requests().map(Message::WindowCloseRequested),
        ])
    }

    fn fetch_blocks(&mut self, date: Option<String>) -> Task<Message> {
        self.fetch_seq += 1;

        let seq = self.fetch_seq;
        let server_url = self.config.server_url.clone();

        Task::perform(
            async move {
                api::client::fetch_blocks(&server_url, date.as_deref())
                    .await
                    .map_err(|e| {
                        log::error!("Failed to fetch blocks: {e}");
                        describe_blocks_error(&e)
                    })
            },
            move |result| Message::BlocksFetched(seq, result),
        )
    }

    fn view(&self) -> Element<'_, Message> {
        let top_bar = row![
            text("Trastboard").size(18).style(style::branding_text),
            horizontal_space(),
            self.dashboard
                .archive
                .view(|date| Message::Dashboard(dashboard::Message::DateSelected(date))),
            button(text("Скриншот").size(13))
                .style(style::screenshot_button)
                .padding([6, 12])
                .on_press(Message::TakeScreenshot),
            pick_list(Theme::ALL, Some(self.theme()), Message::ThemeSelected).text_size(13),
        ]
        .spacing(12)
        .padding(12)
        .align_y(Alignment::Center);

        let mut content = column![top_bar];

        if let Some(notification) = &self.notification {
            content = content.push(
                container(notification.view(Message::DismissNotification)).padding([0, 12]),
            );
        }

        content
            .push(scrollable(self.dashboard.view().map(Message::Dashboard)).height(Length::Fill))
            .into()
    }

    fn theme(&self) -> Theme {
        self.config.theme.0.clone()
    }
}

/// Encodes the captured frame as PNG, keeps a local copy and uploads it to
/// the spreadsheet server. A failed local write is logged but does not
/// abort the upload.
async fn save_screenshot(
    server_url: String,
    screenshot: window::Screenshot,
) -> Result<String, String> {
    let png = encode_png(&screenshot).map_err(|e| e.to_string())?;

    let file_name = format!(
        "trastboard_{}.png",
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let path = data::data_path(Some(&format!("screenshots/{file_name}")));

    let local_write = path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|()| std::fs::write(&path, &png));

    if let Err(e) = local_write {
        log::warn!("Failed to keep a local screenshot copy: {e}");
    }

    api::client::upload_screenshot(&server_url, &png)
        .await
        .map_err(|e| e.to_string())
}

/// The user-facing banner text for a failed blocks fetch. A server-provided
/// `{ "error": ... }` message passes through; everything else gets a fixed
/// Russian message so adapter detail never leaks into the UI.
fn describe_blocks_error(error: &api::AdapterError) -> String {
    match error {
        api::AdapterError::Server(message) => message.clone(),
        api::AdapterError::Parse(_) => "Некорректный формат ответа от сервера.".to_string(),
        api::AdapterError::Fetch(_) => {
            "Не удалось загрузить данные. Проверьте, что сервер запущен.".to_string()
        }
    }
}

fn encode_png(screenshot: &window::Screenshot) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();

    image::codecs::png::PngEncoder::new(&mut out).write_image(
        &screenshot.bytes,
        screenshot.size.width,
        screenshot.size.height,
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::CellValue;

    fn state_with_one_card() -> Trastboard {
        let mut state = Trastboard {
            config: data::config::State::default(),
            dashboard: Dashboard::default(),
            notification: None,
            fetch_seq: 1,
        };

        let block = Block {
            id: "1".to_string(),
            sheet_name: "НПЗ".to_string(),
            columns: vec!["Завод".to_string()],
            rows: vec![vec![CellValue::Text("НПЗ-1".to_string())]],
            ..Block::default()
        };
        state.dashboard.set_blocks(&[block]);

        state
    }

    #[test]
    fn failed_blocks_fetch_keeps_cards_and_raises_banner() {
        let mut state = state_with_one_card();

        let _ = state.update(Message::BlocksFetched(1, Err("connection refused".into())));

        assert_eq!(state.dashboard.cards.len(), 1);
        assert!(matches!(state.notification, Some(Notification::Error(_))));
    }

    #[test]
    fn malformed_response_gets_the_fixed_banner_text() {
        let parse = api::AdapterError::Parse("missing `blocks` array".to_string());
        assert_eq!(
            describe_blocks_error(&parse),
            "Некорректный формат ответа от сервера."
        );

        let server = api::AdapterError::Server("Файл Excel недоступен".to_string());
        assert_eq!(describe_blocks_error(&server), "Файл Excel недоступен");
    }

    #[test]
    fn stale_blocks_response_is_dropped() {
        let mut state = state_with_one_card();
        state.fetch_seq = 2;

        let _ = state.update(Message::BlocksFetched(1, Ok(Vec::new())));

        assert_eq!(state.dashboard.cards.len(), 1);
        assert!(state.notification.is_none());
    }
}
