use crate::split_column;
use crate::style;
use crate::widget::Element;

use data::chart::indicator;
use data::util::{currency_abbr, display_price};
use market::{AnalysisSnapshot, ProviderError, Symbol};

use iced::widget::{column, container, row, space, text};
use iced::{Alignment, Length, padding};

/// عنوان صفحه نتیجه تحلیل، مثلاً "AAPL Stock Analysis"
///
/// نماد همان‌طور که وارد شده در عنوان می‌آید؛ نماد خالی هم عنوان
/// " Stock Analysis" می‌سازد.
pub fn heading(snapshot: &AnalysisSnapshot) -> String {
    format!("{} Stock Analysis", snapshot.symbol)
}

/// ردیف‌های خلاصه تحلیل به صورت زوج (برچسب، مقدار)
///
/// سه ردیف اول همیشه حاضرند؛ بقیه فقط وقتی داده‌شان موجود باشد
/// اضافه می‌شوند.
pub fn facts(snapshot: &AnalysisSnapshot) -> Vec<(String, String)> {
    let mut rows = vec![
        (
            "Current Price".to_string(),
            display_price(snapshot.current_price),
        ),
        ("Market Trend".to_string(), snapshot.trend.to_string()),
        ("Last Updated".to_string(), snapshot.last_updated_label()),
    ];

    let fundamentals = &snapshot.fundamentals;

    if let Some(pe) = fundamentals.pe_ratio {
        rows.push(("P/E Ratio".to_string(), format!("{pe:.2}")));
    }
    if let Some(pb) = fundamentals.pb_ratio {
        rows.push(("P/B Ratio".to_string(), format!("{pb:.2}")));
    }
    if let Some(roe) = fundamentals.roe {
        rows.push(("ROE".to_string(), format!("{:.2}%", roe * 100.0)));
    }
    if let Some(roa) = fundamentals.roa {
        rows.push(("ROA".to_string(), format!("{:.2}%", roa * 100.0)));
    }
    if let Some(debt) = fundamentals.debt_to_equity {
        rows.push(("Debt/Equity".to_string(), format!("{debt:.2}")));
    }
    if let Some(yield_) = fundamentals.dividend_yield {
        rows.push((
            "Dividend Yield".to_string(),
            format!("{:.2}%", yield_ * 100.0),
        ));
    }
    if let Some(fcf) = fundamentals.free_cash_flow {
        rows.push(("Free Cash Flow".to_string(), currency_abbr(fcf)));
    }

    // آخرین مقدار اندیکاتورها؛ تا وقتی پنجره پر نشده ردیفی نمایش داده نمی‌شود
    let closes = snapshot.history.closes();

    if let Some(rsi) = indicator::latest_finite(&indicator::rsi(closes, indicator::RSI_WINDOW)) {
        rows.push((
            format!("RSI {}", indicator::RSI_WINDOW),
            format!("{rsi:.1}"),
        ));
    }

    let macd = indicator::macd(closes);
    if let (Some(line), Some(signal)) = (
        indicator::latest_finite(&macd.macd),
        indicator::latest_finite(&macd.signal),
    ) {
        rows.push(("MACD".to_string(), format!("{line:.2} / {signal:.2}")));
    }

    rows
}

/// کارت خلاصه تحلیل در کنار نمودار
pub fn summary<'a, Message: 'a>(snapshot: &AnalysisSnapshot) -> Element<'a, Message> {
    let rows = facts(snapshot).into_iter().map(|(label, value)| {
        Element::from(
            row![
                text(label).size(12),
                space::horizontal(),
                text(value).size(12),
            ]
            .padding(padding::left(4).right(4))
            .align_y(Alignment::Center),
        )
    });

    let mut content = column![text(heading(snapshot)).size(16)].spacing(12);

    let mut fact_rows = column![].spacing(6);
    for (index, fact_row) in rows.enumerate() {
        if index > 0 {
            fact_rows = fact_rows.push(iced::widget::rule::horizontal(1.0).style(style::split_ruler));
        }
        fact_rows = fact_rows.push(fact_row);
    }
    content = content.push(fact_rows);

    container(content)
        .style(style::summary_card)
        .padding(16)
        .width(Length::Fixed(280.0))
        .into()
}

/// نمایش حالت در حال بارگذاری تا رسیدن نتیجه واکشی
pub fn loading<'a, Message: 'a>(symbol: &Symbol) -> Element<'a, Message> {
    container(
        split_column![
            text(format!("Fetching data for \"{symbol}\"")).size(14),
            text("This should only take a moment").size(12);
            spacing = 8, align_x = Alignment::Center
        ],
    )
    .style(style::summary_card)
    .padding(24)
    .into()
}

/// نمایش خطای واکشی به همراه راهنمای تلاش مجدد
pub fn fetch_error<'a, Message: 'a>(
    symbol: &Symbol,
    reason: &ProviderError,
) -> Element<'a, Message> {
    container(
        split_column![
            text(format!("Couldn't load data for \"{symbol}\"")).size(14),
            text(reason.to_string()).size(12),
            text("Submit the form again to retry").size(12);
            spacing = 8, align_x = Alignment::Center
        ],
    )
    .style(style::summary_card)
    .padding(24)
    .into()
}
