pub mod provider;

pub use provider::{MockProvider, ProviderError, QuoteProvider};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use std::fmt;

/// نماد سهام وارد شده توسط کاربر (مانند `AAPL`)
///
/// نماد فقط به عنوان یک برچسب نمایشی استفاده می‌شود؛ هیچ اعتبارسنجی یا
/// نرمال‌سازی روی آن انجام نمی‌شود و رشته خالی هم مجاز است.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Symbol {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// تاریخچه قیمت‌های پایانی به همراه برچسب هر نقطه (مثلاً نام ماه)
///
/// نامتغیر: تعداد برچسب‌ها همیشه با تعداد قیمت‌ها برابر است.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    labels: Vec<String>,
    closes: Vec<f32>,
}

impl PriceHistory {
    /// ساخت تاریخچه قیمت؛ در صورت ناهماهنگی طول برچسب‌ها و قیمت‌ها خطا برمی‌گرداند
    pub fn try_new(labels: Vec<String>, closes: Vec<f32>) -> Result<Self, ProviderError> {
        if labels.len() != closes.len() {
            return Err(ProviderError::Parse(format!(
                "label/close count mismatch: {} labels, {} closes",
                labels.len(),
                closes.len(),
            )));
        }

        Ok(Self { labels, closes })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn closes(&self) -> &[f32] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

/// روند کلی بازار برای نمایش در خلاصه تحلیل
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum MarketTrend {
    Bullish,  // صعودی
    Bearish,  // نزولی
    Sideways, // خنثی
}

impl fmt::Display for MarketTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketTrend::Bullish => write!(f, "Bullish"),
            MarketTrend::Bearish => write!(f, "Bearish"),
            MarketTrend::Sideways => write!(f, "Sideways"),
        }
    }
}

/// داده‌های بنیادی نماد (نسبت‌های مالی)
///
/// هر فیلد ممکن است برای یک نماد در دسترس نباشد؛ ردیف‌های غایب در
/// رابط کاربری نمایش داده نمی‌شوند.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Fundamentals {
    pub pe_ratio: Option<f32>,       // نسبت قیمت به سود
    pub pb_ratio: Option<f32>,       // نسبت قیمت به ارزش دفتری
    pub roe: Option<f32>,            // بازده حقوق صاحبان سهام
    pub roa: Option<f32>,            // بازده دارایی‌ها
    pub debt_to_equity: Option<f32>, // نسبت بدهی به حقوق صاحبان سهام
    pub dividend_yield: Option<f32>, // بازده سود نقدی
    pub free_cash_flow: Option<f32>, // جریان نقدی آزاد
}

/// نتیجه کامل یک بار واکشی داده برای یک نماد
///
/// این ساختار در هر ارسال فرم از نو ساخته می‌شود و بعد از رندر شدن
/// نگهداری نمی‌شود؛ هیچ موجودیتی بیشتر از یک ارسال عمر ندارد.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSnapshot {
    pub symbol: Symbol,
    pub history: PriceHistory,
    pub current_price: f32,
    pub trend: MarketTrend,
    pub last_updated: NaiveDate,
    pub fundamentals: Fundamentals,
}

impl AnalysisSnapshot {
    /// متن تاریخ آخرین به‌روزرسانی (مثلاً "February 2025")
    pub fn last_updated_label(&self) -> String {
        self.last_updated.format("%B %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_kept_verbatim() {
        assert_eq!(Symbol::from("AAPL").as_str(), "AAPL");
        assert_eq!(Symbol::from("").as_str(), "");
        // نماد اعتبارسنجی نمی‌شود؛ کاراکترهای خاص HTML هم دست‌نخورده می‌مانند
        assert_eq!(
            Symbol::from("<script>alert(1)</script>").as_str(),
            "<script>alert(1)</script>"
        );
    }

    #[test]
    fn price_history_rejects_length_mismatch() {
        let result = PriceHistory::try_new(vec!["January".to_string()], vec![120.0, 130.0]);

        assert!(matches!(result, Err(ProviderError::Parse(_))));
    }

    #[test]
    fn last_updated_formats_as_month_and_year() {
        let snapshot = AnalysisSnapshot {
            symbol: Symbol::from("AAPL"),
            history: PriceHistory::try_new(vec![], vec![]).unwrap(),
            current_price: 130.0,
            trend: MarketTrend::Bullish,
            last_updated: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            fundamentals: Fundamentals::default(),
        };

        assert_eq!(snapshot.last_updated_label(), "February 2025");
    }
}
