use crate::style;

use iced::widget::{container, text, tooltip::Position};

pub type Element<'a, Message> = iced::Element<'a, Message>;

/// ایجاد یک تولتیپ (Tooltip) ساده برای یک عنصر
pub fn tooltip<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>, // عنصر اصلی
    tooltip: Option<&'a str>,                 // متن تولتیپ
    position: Position,                       // موقعیت نمایش
) -> Element<'a, Message> {
    match tooltip {
        Some(tooltip) => iced::widget::tooltip(
            content,
            container(text(tooltip)).style(style::tooltip).padding(8),
            position,
        )
        .into(),
        None => content.into(),
    }
}

#[macro_export]
/// ایجاد یک ستون که بین هر آیتم آن یک خط جداکننده افقی قرار می‌گیرد
macro_rules! split_column {
    () => {
        column![]
    };

    ($item:expr $(,)?) => {
        column![$item]
    };

    ($first:expr, $($rest:expr),+ $(,)?) => {{
        let mut col = column![$first];
        $(
            col = col.push(iced::widget::rule::horizontal(1.0).style($crate::style::split_ruler));
            col = col.push($rest);
        )+
        col
    }};

    ($($item:expr),* $(,)?; spacing = $spacing:expr) => {{
        $crate::split_column![$($item),*].spacing($spacing)
    }};

    ($($item:expr),* $(,)?; spacing = $spacing:expr, align_x = $align:expr) => {{
        $crate::split_column![$($item),*].spacing($spacing).align_x($align)
    }};
}
