// غیرفعال کردن کنسول در ویندوز برای نسخه‌های ریلیز
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// تعریف ماژول‌های مختلف پروژه
mod chart;  // رندر نمودار قیمت روی بوم
mod logger; // سیستم ثبت وقایع (Log)
mod screen; // صفحات نتیجه، بارگذاری و خطا
mod style;  // تعریف استایل‌ها و تم‌های ظاهری
mod widget; // ویجت‌های سفارشی رابط کاربری

use chart::PriceChart;
use data::ThemeMode;
use data::chart::{ChartInput, indicator::Overlay};
use market::{AnalysisSnapshot, MockProvider, ProviderError, QuoteProvider, Symbol};
use widget::tooltip;

use enum_map::EnumMap;
use iced::{
    Alignment, Length, Task, padding,
    widget::{
        button, column, container, row, space, text, text_input,
        tooltip::Position as TooltipPosition,
    },
};

/// نقطه شروع برنامه
fn main() {
    // راه‌اندازی سیستم لاگ
    logger::setup(cfg!(debug_assertions)).expect("Failed to initialize logger");

    // اجرای برنامه اصلی با استفاده از کتابخانه Iced
    let _ = iced::application(Stockscope::new, Stockscope::update, Stockscope::view)
        .settings(iced::Settings {
            antialiasing: true, // فعال‌سازی لبه‌های نرم
            default_text_size: iced::Pixels(12.0),
            ..Default::default()
        })
        .title(Stockscope::title)
        .theme(Stockscope::theme)
        .run();
}

/// ساختار اصلی برنامه که وضعیت کل برنامه را نگه می‌دارد
struct Stockscope {
    theme_mode: ThemeMode,             // تم فعلی (روز یا شب)
    symbol_input: String,              // بافر ورودی نماد، بدون اعتبارسنجی
    overlays: EnumMap<Overlay, bool>,  // اندیکاتورهای فعال روی نمودار
    panel: Panel,                      // وضعیت صفحه نتیجه
    provider: MockProvider,            // تامین‌کننده داده بازار
    request_seq: u64,                  // شمارنده درخواست‌ها برای رد کردن پاسخ‌های قدیمی
}

/// وضعیت صفحه نتیجه؛ هر ارسال فرم آن را از نو می‌سازد
enum Panel {
    Idle,
    Loading {
        symbol: Symbol,
    },
    Ready {
        snapshot: AnalysisSnapshot,
        chart: PriceChart,
    },
    Failed {
        symbol: Symbol,
        reason: ProviderError,
    },
}

/// پیام‌های مختلف که در برنامه جابجا می‌شوند و باعث تغییر وضعیت می‌شوند
#[derive(Debug, Clone)]
enum Message {
    ThemeToggled,                    // جابجایی بین تم روز و شب
    SymbolInputChanged(String),      // تغییر متن ورودی نماد
    AnalysisRequested,               // ارسال فرم (دکمه یا کلید Enter)
    // نتیجه واکشی به همراه شماره درخواستی که آن را آغاز کرد
    AnalysisFetched(u64, Result<AnalysisSnapshot, ProviderError>),
    OverlayToggled(Overlay, bool),   // فعال/غیرفعال کردن یک اندیکاتور
}

impl Stockscope {
    fn new() -> (Self, Task<Message>) {
        let state = Self {
            theme_mode: ThemeMode::default(),
            symbol_input: String::new(),
            overlays: EnumMap::default(),
            panel: Panel::Idle,
            provider: MockProvider::new(),
            request_seq: 0,
        };

        (state, Task::none())
    }

    /// عنوان پنجره؛ بعد از تحلیل موفق نماد را هم نشان می‌دهد
    fn title(&self) -> String {
        match &self.panel {
            Panel::Ready { snapshot, .. } => {
                format!("Stockscope - {}", screen::heading(snapshot))
            }
            _ => "Stockscope".to_string(),
        }
    }

    fn theme(&self) -> iced::Theme {
        self.theme_mode.theme()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ThemeToggled => {
                self.theme_mode = self.theme_mode.toggled();

                // کش بوم رنگ‌های تم قبلی را دارد و باید از نو رسم شود
                if let Panel::Ready { chart, .. } = &mut self.panel {
                    chart.invalidate();
                }

                Task::none()
            }
            Message::SymbolInputChanged(raw) => {
                self.symbol_input = raw;
                Task::none()
            }
            Message::AnalysisRequested => {
                // نماد همان متن بافر است؛ نه حذف فاصله، نه بزرگ‌نویسی
                let symbol = Symbol::from(self.symbol_input.clone());

                self.request_seq += 1;
                let seq = self.request_seq;

                log::info!("analysis #{seq} requested for symbol {symbol:?}");

                self.panel = Panel::Loading {
                    symbol: symbol.clone(),
                };

                let provider = self.provider.clone();

                Task::perform(
                    async move { provider.fetch(&symbol) },
                    move |result| Message::AnalysisFetched(seq, result),
                )
            }
            Message::AnalysisFetched(seq, result) => {
                // پاسخ درخواست قدیمی‌تر از آخرین ارسال فرم دور ریخته می‌شود
                if seq != self.request_seq {
                    log::debug!(
                        "dropping stale analysis #{seq}, latest is #{}",
                        self.request_seq
                    );
                    return Task::none();
                }

                let symbol = match &self.panel {
                    Panel::Loading { symbol } => symbol.clone(),
                    _ => Symbol::default(),
                };

                self.panel = match result {
                    Ok(snapshot) => match self.chart_input(&snapshot) {
                        Ok(input) => Panel::Ready {
                            chart: PriceChart::new(input),
                            snapshot,
                        },
                        Err(err) => {
                            log::error!("chart input rejected: {err}");
                            Panel::Failed {
                                symbol,
                                reason: ProviderError::Parse(err.to_string()),
                            }
                        }
                    },
                    Err(reason) => {
                        log::error!("analysis #{seq} failed: {reason}");
                        Panel::Failed { symbol, reason }
                    }
                };

                Task::none()
            }
            Message::OverlayToggled(overlay, enabled) => {
                self.overlays[overlay] = enabled;

                // نمودار فعلی با مجموعه جدید سری‌ها از نو ساخته می‌شود
                if let Panel::Ready { snapshot, chart } = &mut self.panel {
                    match Self::build_chart_input(snapshot, &self.overlays) {
                        Ok(input) => chart.set_input(input),
                        Err(err) => log::error!("chart input rejected: {err}"),
                    }
                }

                Task::none()
            }
        }
    }

    fn chart_input(&self, snapshot: &AnalysisSnapshot) -> Result<ChartInput, data::chart::Error> {
        Self::build_chart_input(snapshot, &self.overlays)
    }

    /// سری قیمت به علاوه سری هر اندیکاتور فعال
    fn build_chart_input(
        snapshot: &AnalysisSnapshot,
        overlays: &EnumMap<Overlay, bool>,
    ) -> Result<ChartInput, data::chart::Error> {
        let mut input = ChartInput::from_snapshot(snapshot)?;

        for overlay in Overlay::ALL {
            if overlays[overlay] {
                for series in overlay.series(snapshot.history.closes()) {
                    input = input.with_series(series)?;
                }
            }
        }

        Ok(input)
    }

    fn view(&self) -> iced::Element<'_, Message> {
        // نوار بالایی: عنوان برنامه و دکمه جابجایی تم
        let theme_btn = button(text(self.theme_mode.to_string()).size(12))
            .on_press(Message::ThemeToggled)
            .style(style::button::theme_toggle)
            .padding(padding::left(8).right(8).top(4).bottom(4));

        let top_bar = row![
            text("Stockscope").size(16),
            space::horizontal(),
            tooltip(
                theme_btn,
                Some("Switch between day and night theme"),
                TooltipPosition::Bottom,
            ),
        ]
        .align_y(Alignment::Center);

        // فرم نماد: ورودی متن و دکمه ارسال
        let symbol_form = row![
            text_input("Enter stock symbol (e.g. AAPL)", &self.symbol_input)
                .on_input(Message::SymbolInputChanged)
                .on_submit(Message::AnalysisRequested)
                .style(style::symbol_input)
                .padding(8),
            button(text("Analyze").size(12))
                .on_press(Message::AnalysisRequested)
                .style(style::button::submit)
                .padding(padding::left(16).right(16).top(8).bottom(8)),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        // انتخاب اندیکاتورهای قابل رسم
        let overlay_toggles = Overlay::ALL.into_iter().fold(
            row![text("Overlays:").size(12)].spacing(12).align_y(Alignment::Center),
            |toggles, overlay| {
                toggles.push(
                    iced::widget::checkbox(self.overlays[overlay])
                        .label(overlay.to_string())
                        .on_toggle(move |checked| Message::OverlayToggled(overlay, checked)),
                )
            },
        );

        // محتوای صفحه نتیجه بر اساس وضعیت فعلی
        let content: iced::Element<'_, Message> = match &self.panel {
            Panel::Idle => container(
                text("Enter a symbol above to see its analysis").size(14),
            )
            .center(Length::Fill)
            .into(),
            Panel::Loading { symbol } => container(screen::loading(symbol))
                .center(Length::Fill)
                .into(),
            Panel::Ready { snapshot, chart } => row![
                container(chart.view())
                    .width(Length::FillPortion(3))
                    .height(Length::Fill),
                screen::summary(snapshot),
            ]
            .spacing(12)
            .into(),
            Panel::Failed { symbol, reason } => {
                container(screen::fetch_error(symbol, reason))
                    .center(Length::Fill)
                    .into()
            }
        };

        column![top_bar, symbol_form, overlay_toggles, content]
            .spacing(12)
            .padding(16)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> Stockscope {
        Stockscope::new().0
    }

    #[test]
    fn theme_toggle_is_an_involution() {
        let mut app = app();
        let initial = app.theme_mode;

        let _ = app.update(Message::ThemeToggled);
        assert_ne!(app.theme_mode, initial);

        let _ = app.update(Message::ThemeToggled);
        assert_eq!(app.theme_mode, initial);
    }

    #[test]
    fn submitted_symbol_is_read_verbatim() {
        let mut app = app();

        let _ = app.update(Message::SymbolInputChanged(" aapl ".to_string()));
        let _ = app.update(Message::AnalysisRequested);

        match &app.panel {
            Panel::Loading { symbol } => assert_eq!(symbol.as_str(), " aapl "),
            _ => panic!("expected a loading panel after submit"),
        }
    }

    #[test]
    fn empty_symbol_is_submitted_unchanged() {
        let mut app = app();

        let _ = app.update(Message::AnalysisRequested);

        match &app.panel {
            Panel::Loading { symbol } => assert!(symbol.is_empty()),
            _ => panic!("expected a loading panel after submit"),
        }
    }

    #[test]
    fn successful_fetch_renders_the_chart_panel() {
        let mut app = app();

        let _ = app.update(Message::SymbolInputChanged("AAPL".to_string()));
        let _ = app.update(Message::AnalysisRequested);

        let result = app.provider.fetch(&Symbol::from("AAPL"));
        let _ = app.update(Message::AnalysisFetched(app.request_seq, result));

        match &app.panel {
            Panel::Ready { snapshot, .. } => {
                assert_eq!(screen::heading(snapshot), "AAPL Stock Analysis");
                assert_eq!(snapshot.current_price, 130.0);
            }
            _ => panic!("expected a ready panel after a successful fetch"),
        }
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut app = app();

        let _ = app.update(Message::SymbolInputChanged("AAPL".to_string()));
        let _ = app.update(Message::AnalysisRequested);
        let first_seq = app.request_seq;

        // ارسال دوم قبل از رسیدن پاسخ اول
        let _ = app.update(Message::SymbolInputChanged("MSFT".to_string()));
        let _ = app.update(Message::AnalysisRequested);

        let stale = app.provider.fetch(&Symbol::from("AAPL"));
        let _ = app.update(Message::AnalysisFetched(first_seq, stale));

        // پاسخ قدیمی نباید وضعیت بارگذاری درخواست جدید را بازنویسی کند
        match &app.panel {
            Panel::Loading { symbol } => assert_eq!(symbol.as_str(), "MSFT"),
            _ => panic!("stale response must not replace the newer request"),
        }
    }

    #[test]
    fn failed_fetch_shows_the_error_panel() {
        let mut app = app();
        app.provider = MockProvider::failing(ProviderError::Timeout);

        let _ = app.update(Message::SymbolInputChanged("AAPL".to_string()));
        let _ = app.update(Message::AnalysisRequested);

        let result = app.provider.fetch(&Symbol::from("AAPL"));
        let _ = app.update(Message::AnalysisFetched(app.request_seq, result));

        match &app.panel {
            Panel::Failed { symbol, reason } => {
                assert_eq!(symbol.as_str(), "AAPL");
                assert_eq!(*reason, ProviderError::Timeout);
            }
            _ => panic!("expected a failed panel"),
        }
    }

    #[test]
    fn overlay_toggle_keeps_the_ready_panel() {
        let mut app = app();

        let _ = app.update(Message::SymbolInputChanged("AAPL".to_string()));
        let _ = app.update(Message::AnalysisRequested);
        let result = app.provider.fetch(&Symbol::from("AAPL"));
        let _ = app.update(Message::AnalysisFetched(app.request_seq, result));

        let _ = app.update(Message::OverlayToggled(Overlay::Ema, true));

        assert!(app.overlays[Overlay::Ema]);
        assert!(matches!(app.panel, Panel::Ready { .. }));
    }
}
