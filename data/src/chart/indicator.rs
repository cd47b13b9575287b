use std::fmt::{self, Display};

use enum_map::Enum;
use iced_core::Color;

use super::ChartSeries;

// پنجره‌های پیش‌فرض اندیکاتورها (مطابق تحلیل‌های رایج)
pub const SMA_WINDOW: usize = 20;
pub const EMA_SPAN: usize = 20;
pub const RSI_WINDOW: usize = 14;
pub const BOLLINGER_WINDOW: usize = 20;
const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;

const SMA_COLOR: Color = Color {
    r: 1.0,
    g: 159.0 / 255.0,
    b: 64.0 / 255.0,
    a: 1.0,
};
const EMA_COLOR: Color = Color {
    r: 153.0 / 255.0,
    g: 102.0 / 255.0,
    b: 1.0,
    a: 1.0,
};
const BOLLINGER_COLOR: Color = Color {
    r: 201.0 / 255.0,
    g: 203.0 / 255.0,
    b: 207.0 / 255.0,
    a: 1.0,
};

/// اندیکاتورهای قابل رسم روی محور قیمت
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum Overlay {
    Sma,       // میانگین متحرک ساده
    Ema,       // میانگین متحرک نمایی
    Bollinger, // باندهای بولینگر
}

impl Overlay {
    /// همه اندیکاتورهای قابل انتخاب در رابط کاربری
    pub const ALL: [Overlay; 3] = [Overlay::Sma, Overlay::Ema, Overlay::Bollinger];

    /// سری‌های قابل رسم این اندیکاتور روی تاریخچه قیمت داده شده
    ///
    /// طول خروجی‌ها همیشه با طول ورودی برابر است؛ دوره گرم شدن با `NaN`
    /// پر می‌شود و رندرکننده آن نقاط را رسم نمی‌کند.
    pub fn series(self, closes: &[f32]) -> Vec<ChartSeries> {
        match self {
            Overlay::Sma => vec![ChartSeries {
                label: format!("SMA {SMA_WINDOW}"),
                values: sma(closes, SMA_WINDOW),
                color: SMA_COLOR,
                filled: false,
            }],
            Overlay::Ema => vec![ChartSeries {
                label: format!("EMA {EMA_SPAN}"),
                values: ema(closes, EMA_SPAN),
                color: EMA_COLOR,
                filled: false,
            }],
            Overlay::Bollinger => {
                let bands = bollinger(closes, BOLLINGER_WINDOW);

                vec![
                    ChartSeries {
                        label: "BB Upper".to_string(),
                        values: bands.upper,
                        color: BOLLINGER_COLOR,
                        filled: false,
                    },
                    ChartSeries {
                        label: "BB Lower".to_string(),
                        values: bands.lower,
                        color: BOLLINGER_COLOR,
                        filled: false,
                    },
                ]
            }
        }
    }
}

impl Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Overlay::Sma => write!(f, "SMA {SMA_WINDOW}"),
            Overlay::Ema => write!(f, "EMA {EMA_SPAN}"),
            Overlay::Bollinger => write!(f, "Bollinger Bands"),
        }
    }
}

/// خروجی محاسبه MACD
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub macd: Vec<f32>,   // خط MACD (تفاضل دو میانگین نمایی)
    pub signal: Vec<f32>, // خط سیگنال
}

/// خروجی محاسبه باندهای بولینگر
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: Vec<f32>,
    pub middle: Vec<f32>,
    pub lower: Vec<f32>,
}

/// میانگین متحرک ساده؛ قبل از پر شدن پنجره مقدار `NaN` دارد
pub fn sma(values: &[f32], window: usize) -> Vec<f32> {
    if window == 0 {
        return vec![f32::NAN; values.len()];
    }

    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                f32::NAN
            } else {
                let slice = &values[i + 1 - window..=i];
                slice.iter().sum::<f32>() / window as f32
            }
        })
        .collect()
}

/// میانگین متحرک نمایی با هموارسازی بازگشتی
///
/// از مقدار اول شروع می‌شود و ضریب هموارسازی `2 / (span + 1)` است،
/// بنابراین برخلاف SMA دوره گرم شدن ندارد.
pub fn ema(values: &[f32], span: usize) -> Vec<f32> {
    let alpha = 2.0 / (span as f32 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f32> = None;

    for &value in values {
        let next = match prev {
            None => value,
            Some(prev) => (1.0 - alpha) * prev + alpha * value,
        };
        out.push(next);
        prev = Some(next);
    }

    out
}

/// شاخص قدرت نسبی (RSI) با میانگین ساده سود و زیان
pub fn rsi(values: &[f32], window: usize) -> Vec<f32> {
    let mut out = vec![f32::NAN; values.len()];

    if window == 0 || values.len() <= window {
        return out;
    }

    for i in window..values.len() {
        let mut gains = 0.0f32;
        let mut losses = 0.0f32;

        // تغییرات قیمت در پنجره منتهی به نقطه فعلی
        for j in i + 1 - window..=i {
            let delta = values[j] - values[j - 1];
            if delta > 0.0 {
                gains += delta;
            } else {
                losses -= delta;
            }
        }

        let avg_gain = gains / window as f32;
        let avg_loss = losses / window as f32;

        let rs = avg_gain / avg_loss;
        out[i] = 100.0 - (100.0 / (1.0 + rs));
    }

    out
}

/// محاسبه خط MACD و خط سیگنال آن
pub fn macd(values: &[f32]) -> Macd {
    let fast = ema(values, MACD_FAST);
    let slow = ema(values, MACD_SLOW);

    let line: Vec<f32> = fast
        .iter()
        .zip(slow.iter())
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal = ema(&line, MACD_SIGNAL);

    Macd { macd: line, signal }
}

/// باندهای بولینگر: میانگین ساده به علاوه/منهای دو انحراف معیار نمونه
pub fn bollinger(values: &[f32], window: usize) -> BollingerBands {
    let middle = sma(values, window);
    let mut upper = vec![f32::NAN; values.len()];
    let mut lower = vec![f32::NAN; values.len()];

    if window >= 2 {
        for i in 0..values.len() {
            if i + 1 < window {
                continue;
            }

            let slice = &values[i + 1 - window..=i];
            let mean = middle[i];
            let variance = slice
                .iter()
                .map(|value| {
                    let diff = value - mean;
                    diff * diff
                })
                .sum::<f32>()
                / (window as f32 - 1.0);
            let std_dev = variance.sqrt();

            upper[i] = mean + 2.0 * std_dev;
            lower[i] = mean - 2.0 * std_dev;
        }
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}

/// آخرین مقدار متناهی یک سری (برای نمایش خلاصه اندیکاتورها)
pub fn latest_finite(values: &[f32]) -> Option<f32> {
    values.iter().rev().copied().find(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn sma_warms_up_with_nan() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);

        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert_close(out[2], 2.0);
        assert_close(out[3], 3.0);
        assert_close(out[4], 4.0);
    }

    #[test]
    fn ema_is_recursive_from_first_value() {
        // span = 3 → alpha = 0.5
        let out = ema(&[1.0, 2.0, 3.0], 3);

        assert_close(out[0], 1.0);
        assert_close(out[1], 1.5);
        assert_close(out[2], 2.25);
    }

    #[test]
    fn rsi_of_monotonic_rise_is_100() {
        let values: Vec<f32> = (0..=14).map(|i| i as f32).collect();
        let out = rsi(&values, 14);

        assert!(out[13].is_nan());
        assert_close(out[14], 100.0);
    }

    #[test]
    fn rsi_of_balanced_swings_is_50() {
        let out = rsi(&[1.0, 2.0, 1.0, 2.0], 2);

        assert!(out[1].is_nan());
        assert_close(out[2], 50.0);
        assert_close(out[3], 50.0);
    }

    #[test]
    fn macd_of_flat_series_is_zero() {
        let out = macd(&[5.0; 40]);

        assert!(out.macd.iter().all(|v| v.abs() < 1e-6));
        assert!(out.signal.iter().all(|v| v.abs() < 1e-6));
    }

    #[test]
    fn bollinger_bands_collapse_on_constant_series() {
        let out = bollinger(&[10.0; 25], 20);

        assert_close(out.upper[24], 10.0);
        assert_close(out.middle[24], 10.0);
        assert_close(out.lower[24], 10.0);
        assert!(out.upper[18].is_nan());
    }

    #[test]
    fn bollinger_bands_bracket_the_mean() {
        let values: Vec<f32> = (0..30).map(|i| (i % 5) as f32).collect();
        let out = bollinger(&values, 20);

        let last = values.len() - 1;
        assert!(out.upper[last] > out.middle[last]);
        assert!(out.lower[last] < out.middle[last]);
    }

    #[test]
    fn overlay_series_lengths_match_input() {
        let closes = [120.0, 130.0, 125.0, 140.0, 135.0];

        for overlay in Overlay::ALL {
            for series in overlay.series(&closes) {
                assert_eq!(series.values.len(), closes.len());
                // پنجره ۲۰تایی روی ۵ نقطه پر نمی‌شود؛ SMA و بولینگر چیزی برای رسم ندارند
                if !matches!(overlay, Overlay::Ema) {
                    assert!(series.values.iter().all(|v| v.is_nan()));
                }
            }
        }
    }

    #[test]
    fn latest_finite_skips_trailing_nan() {
        assert_eq!(latest_finite(&[1.0, 2.0, f32::NAN]), Some(2.0));
        assert_eq!(latest_finite(&[f32::NAN, f32::NAN]), None);
        assert_eq!(latest_finite(&[]), None);
    }
}
