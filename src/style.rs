use iced::widget::container::Style;
use iced::{Border, Color, Shadow, Theme, widget};

/// استایل مربوط به تولتیپ‌ها (Tooltip)
pub fn tooltip(theme: &Theme) -> Style {
    let palette = theme.extended_palette();

    Style {
        background: Some(palette.background.weakest.color.into()),
        border: Border {
            width: 1.0,
            color: palette.background.weak.color,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}

/// استایل کارت خلاصه تحلیل
pub fn summary_card(theme: &Theme) -> Style {
    let palette = theme.extended_palette();

    Style {
        background: {
            if palette.is_dark {
                Some(palette.background.weak.color.scale_alpha(0.4).into())
            } else {
                Some(palette.background.strong.color.scale_alpha(0.4).into())
            }
        },
        border: Border {
            radius: 4.0.into(),
            width: 1.0,
            color: palette.background.strong.color,
        },
        ..Default::default()
    }
}

/// استایل کانتینر نمودار
pub fn chart_container(theme: &Theme) -> Style {
    let palette = theme.extended_palette();

    Style {
        background: Some(palette.background.weakest.color.into()),
        border: Border {
            radius: 4.0.into(),
            width: 1.0,
            color: palette.background.weak.color,
        },
        shadow: Shadow {
            offset: iced::Vector { x: 0.0, y: 0.0 },
            blur_radius: 4.0,
            color: Color::BLACK.scale_alpha(if palette.is_dark { 0.6 } else { 0.1 }),
        },
        ..Default::default()
    }
}

/// استایل ورودی متن نماد
///
/// نماد اعتبارسنجی نمی‌شود، بنابراین برخلاف فرم‌های معمول حالت
/// نامعتبر ندارد.
pub fn symbol_input(theme: &Theme, status: widget::text_input::Status) -> widget::text_input::Style {
    let palette = theme.extended_palette();

    let (background, border_color, placeholder) = match status {
        widget::text_input::Status::Active => (
            palette.background.weakest.color,
            palette.background.weak.color,
            palette.background.strongest.color,
        ),
        widget::text_input::Status::Hovered => (
            palette.background.weak.color,
            palette.background.strong.color,
            palette.background.weak.text,
        ),
        widget::text_input::Status::Focused { .. } | widget::text_input::Status::Disabled => (
            palette.background.base.color,
            palette.background.strong.color,
            palette.background.strong.color,
        ),
    };

    widget::text_input::Style {
        background: background.into(),
        border: Border {
            radius: 3.0.into(),
            width: 1.0,
            color: border_color,
        },
        icon: palette.background.strong.text,
        placeholder,
        value: palette.background.base.text,
        selection: palette.background.strongest.color,
    }
}

/// استایل خط جداکننده بین ردیف‌های خلاصه
pub fn split_ruler(theme: &Theme) -> iced::widget::rule::Style {
    let palette = theme.extended_palette();

    iced::widget::rule::Style {
        color: palette.background.strong.color.scale_alpha(0.25),
        radius: iced::border::Radius::default(),
        fill_mode: iced::widget::rule::FillMode::Full,
        snap: true,
    }
}

pub mod button {
    use iced::{
        Border, Theme,
        widget::button::{Status, Style},
    };

    /// استایل دکمه اصلی (ارسال فرم)
    pub fn submit(theme: &Theme, status: Status) -> Style {
        let palette = theme.extended_palette();

        let background = match status {
            Status::Active => palette.primary.base.color,
            Status::Hovered => palette.primary.strong.color,
            Status::Pressed => palette.primary.weak.color,
            Status::Disabled => palette.background.weak.color,
        };

        Style {
            text_color: palette.primary.base.text,
            background: Some(background.into()),
            border: Border {
                radius: 3.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// استایل دکمه جابجایی تم (قاب‌دار)
    pub fn theme_toggle(theme: &Theme, status: Status) -> Style {
        let palette = theme.extended_palette();

        Style {
            text_color: palette.background.base.text,
            background: match status {
                Status::Hovered | Status::Pressed => {
                    Some(palette.background.weak.color.into())
                }
                _ => Some(palette.background.weakest.color.into()),
            },
            border: Border {
                radius: 3.0.into(),
                width: 1.0,
                color: palette.background.strong.color,
            },
            ..Default::default()
        }
    }
}
