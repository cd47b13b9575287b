// ماژول‌های مربوط به اجزای نمودار
pub mod indicator;

use iced_core::Color;
use market::AnalysisSnapshot;

/// پسوند ثابت برچسب سری قیمت (به نماد وارد شده اضافه می‌شود)
pub const SERIES_LABEL_SUFFIX: &str = " Stock Price";

// رنگ پیش‌فرض سری قیمت
const PRICE_SERIES_COLOR: Color = Color {
    r: 75.0 / 255.0,
    g: 192.0 / 255.0,
    b: 192.0 / 255.0,
    a: 1.0,
};

/// خطاهای مربوط به ساخت ورودی نمودار
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("series '{label}' has {values} values for {labels} labels")]
    LengthMismatch {
        label: String,
        labels: usize,
        values: usize,
    },
}

/// یک سری داده قابل رسم روی نمودار
///
/// مقادیر غایب (مثلاً دوره گرم شدن اندیکاتورها) با `NaN` نشان داده
/// می‌شوند و رندرکننده خط را در آن نقاط قطع می‌کند.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f32>,
    pub color: Color,
    pub filled: bool,
}

/// ورودی نمودار: برچسب‌های محور افقی به همراه یک یا چند سری داده
///
/// در هر ارسال فرم از نو ساخته می‌شود و بعد از رسیدن به رندرکننده
/// نگهداری نمی‌شود.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartInput {
    labels: Vec<String>,
    series: Vec<ChartSeries>,
}

impl ChartInput {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            series: Vec::new(),
        }
    }

    /// ساخت ورودی نمودار از نتیجه واکشی؛ فقط شامل سری قیمت است
    pub fn from_snapshot(snapshot: &AnalysisSnapshot) -> Result<Self, Error> {
        Self::new(snapshot.history.labels().to_vec()).with_series(ChartSeries {
            label: format!("{}{}", snapshot.symbol, SERIES_LABEL_SUFFIX),
            values: snapshot.history.closes().to_vec(),
            color: PRICE_SERIES_COLOR,
            filled: false,
        })
    }

    /// افزودن یک سری به نمودار با حفظ نامتغیر برابری طول‌ها
    pub fn with_series(mut self, series: ChartSeries) -> Result<Self, Error> {
        if series.values.len() != self.labels.len() {
            return Err(Error::LengthMismatch {
                label: series.label,
                labels: self.labels.len(),
                values: series.values.len(),
            });
        }

        self.series.push(series);
        Ok(self)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    /// نموداری بدون هیچ نقطه قابل رسم
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.series.is_empty()
    }

    /// بیشینه مقدار متناهی بین تمام سری‌ها (برای مقیاس محور عمودی)
    ///
    /// محور عمودی همیشه از صفر شروع می‌شود، بنابراین فقط سقف لازم است.
    pub fn max_value(&self) -> Option<f32> {
        let max = self
            .series
            .iter()
            .flat_map(|series| series.values.iter())
            .copied()
            .filter(|value| value.is_finite())
            .fold(f32::NEG_INFINITY, f32::max);

        max.is_finite().then_some(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use market::{Fundamentals, MarketTrend, MockProvider, QuoteProvider, Symbol};

    fn snapshot_for(symbol: &str) -> AnalysisSnapshot {
        MockProvider::new()
            .fetch(&Symbol::from(symbol))
            .expect("mock fetch should not fail")
    }

    #[test]
    fn price_series_label_is_symbol_plus_suffix() {
        let input = ChartInput::from_snapshot(&snapshot_for("AAPL")).unwrap();

        assert_eq!(input.series().len(), 1);
        assert_eq!(input.series()[0].label, "AAPL Stock Price");
        assert_eq!(input.series()[0].values, [120.0, 130.0, 125.0, 140.0, 135.0]);
        assert!(!input.series()[0].filled);
        assert_eq!(
            input.labels(),
            ["January", "February", "March", "April", "May"]
        );
    }

    #[test]
    fn empty_symbol_still_builds_a_chart_input() {
        let input = ChartInput::from_snapshot(&snapshot_for("")).unwrap();

        // بدون اعتبارسنجی: پسوند به رشته خالی هم اضافه می‌شود
        assert_eq!(input.series()[0].label, " Stock Price");
    }

    #[test]
    fn mismatched_series_is_rejected() {
        let result = ChartInput::new(vec!["January".to_string(), "February".to_string()])
            .with_series(ChartSeries {
                label: "broken".to_string(),
                values: vec![1.0],
                color: PRICE_SERIES_COLOR,
                filled: false,
            });

        assert!(matches!(result, Err(Error::LengthMismatch { .. })));
    }

    #[test]
    fn empty_input_has_no_bounds_and_does_not_panic() {
        let empty = ChartInput::default();

        assert!(empty.is_empty());
        assert_eq!(empty.max_value(), None);

        let snapshot = AnalysisSnapshot {
            symbol: Symbol::from("X"),
            history: market::PriceHistory::try_new(vec![], vec![]).unwrap(),
            current_price: 0.0,
            trend: MarketTrend::Sideways,
            last_updated: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            fundamentals: Fundamentals::default(),
        };
        let input = ChartInput::from_snapshot(&snapshot).unwrap();

        assert!(input.is_empty() || input.max_value().is_none());
    }

    #[test]
    fn nan_values_are_ignored_for_bounds() {
        let input = ChartInput::new(vec!["a".into(), "b".into(), "c".into()])
            .with_series(ChartSeries {
                label: "sma".to_string(),
                values: vec![f32::NAN, f32::NAN, 12.0],
                color: PRICE_SERIES_COLOR,
                filled: false,
            })
            .unwrap();

        assert_eq!(input.max_value(), Some(12.0));
    }
}
