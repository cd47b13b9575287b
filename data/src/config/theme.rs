use iced_core::{
    Color,
    theme::{Custom, Palette},
};
use palette::{FromColor, Hsva, RgbHue, rgb::Rgba};

use std::fmt;

/// حالت نمایشی برنامه: روز یا شب
///
/// این مقدار فقط در حافظه نگهداری می‌شود و متعلق به کامپوننت اصلی
/// برنامه است؛ بین اجراهای برنامه ذخیره نمی‌شود.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Day,   // حالت روز (روشن)
    Night, // حالت شب (تیره)
}

impl ThemeMode {
    /// جابجایی بین روز و شب؛ دو بار اعمال آن به حالت اولیه برمی‌گردد
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        }
    }

    /// تم Iced متناظر با این حالت
    pub fn theme(self) -> iced_core::Theme {
        iced_core::Theme::Custom(custom_theme(self).into())
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Day => write!(f, "Day"),
            ThemeMode::Night => write!(f, "Night"),
        }
    }
}

/// ساخت پالت رنگی هر حالت
fn custom_theme(mode: ThemeMode) -> Custom {
    match mode {
        ThemeMode::Day => Custom::new(
            "Stockscope Day".to_string(),
            Palette {
                background: Color::from_rgb8(248, 248, 246),
                text: Color::from_rgb8(36, 38, 40),
                primary: Color::from_rgb8(72, 76, 82),
                success: from_hsv_degrees(152.0, 0.72, 0.58),
                danger: from_hsv_degrees(2.0, 0.68, 0.72),
                warning: from_hsv_degrees(45.0, 0.75, 0.72),
            },
        ),
        ThemeMode::Night => Custom::new(
            "Stockscope Night".to_string(),
            Palette {
                background: Color::from_rgb8(24, 22, 22),
                text: Color::from_rgb8(197, 201, 197),
                primary: Color::from_rgb8(200, 200, 200),
                success: from_hsv_degrees(158.0, 0.60, 0.80),
                danger: from_hsv_degrees(2.0, 0.60, 0.75),
                warning: from_hsv_degrees(47.0, 0.42, 0.93),
            },
        ),
    }
}

/// ساخت رنگ از مولفه‌های HSV (فام بر حسب درجه، اشباع و روشنایی در بازه ۰ تا ۱)
pub fn from_hsv_degrees(h_deg: f32, s: f32, v: f32) -> Color {
    let hue = RgbHue::from_degrees(h_deg);
    from_hsva(Hsva::new(hue, s, v, 1.0))
}

pub fn from_hsva(color: Hsva) -> Color {
    to_color(palette::Srgba::from_color(color))
}

fn to_color(rgba: Rgba) -> Color {
    Color {
        r: rgba.color.red,
        g: rgba.color.green,
        b: rgba.color.blue,
        a: rgba.alpha,
    }
}
