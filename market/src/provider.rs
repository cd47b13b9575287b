use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::{AnalysisSnapshot, Fundamentals, MarketTrend, PriceHistory, Symbol};

/// خطاهای مربوط به واکشی داده بازار
///
/// تامین‌کننده آزمایشی فقط می‌تواند با خطای `Parse` مواجه شود؛ بقیه
/// حالت‌ها برای تامین‌کننده‌های واقعی شبکه‌ای تعریف شده‌اند تا مسیر
/// خطا در رابط کاربری از همین حالا وجود داشته باشد.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Request(String), // خطای ارتباط با سرور
    #[error("Invalid response: {0}")]
    Parse(String), // خطای تجزیه پاسخ دریافتی
    #[error("Request timed out")]
    Timeout, // پایان مهلت درخواست
}

/// قابلیت واکشی داده برای یک نماد
///
/// رابط کاربری فقط به این تریت وابسته است تا بتوان در آزمون‌ها یا در
/// آینده، تامین‌کننده واقعی شبکه‌ای را جایگزین نسخه آزمایشی کرد.
pub trait QuoteProvider {
    /// واکشی یک تحلیل کامل برای نماد داده شده
    fn fetch(&self, symbol: &Symbol) -> Result<AnalysisSnapshot, ProviderError>;
}

/// پاسخ خام تامین‌کننده، پیش از تبدیل به مدل داخلی
///
/// نام فیلدهای بنیادی عمداً با کلیدهای رایج APIهای مالی یکی است.
#[derive(Deserialize, Debug)]
struct HistoryPayload {
    labels: Vec<String>,
    #[serde(deserialize_with = "de_vec_string_to_f32")]
    closes: Vec<f32>,
    #[serde(deserialize_with = "de_string_to_f32")]
    price: f32,
    trend: MarketTrend,
    updated: NaiveDate,
    fundamentals: FundamentalsPayload,
}

#[derive(Deserialize, Debug, Default)]
struct FundamentalsPayload {
    #[serde(rename = "trailingPE")]
    pe_ratio: Option<f32>,
    #[serde(rename = "priceToBook")]
    pb_ratio: Option<f32>,
    #[serde(rename = "returnOnEquity")]
    roe: Option<f32>,
    #[serde(rename = "returnOnAssets")]
    roa: Option<f32>,
    #[serde(rename = "debtToEquity")]
    debt_to_equity: Option<f32>,
    #[serde(rename = "dividendYield")]
    dividend_yield: Option<f32>,
    #[serde(rename = "freeCashflow")]
    free_cash_flow: Option<f32>,
}

impl From<FundamentalsPayload> for Fundamentals {
    fn from(payload: FundamentalsPayload) -> Self {
        Fundamentals {
            pe_ratio: payload.pe_ratio,
            pb_ratio: payload.pb_ratio,
            roe: payload.roe,
            roa: payload.roa,
            debt_to_equity: payload.debt_to_equity,
            dividend_yield: payload.dividend_yield,
            free_cash_flow: payload.free_cash_flow,
        }
    }
}

/// دی‌سریال‌سازی قیمت از رشته به عدد اعشاری
fn de_string_to_f32<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: String = Deserialize::deserialize(deserializer)?;
    raw.parse::<f32>().map_err(serde::de::Error::custom)
}

/// دی‌سریال‌سازی لیستی از قیمت‌های رشته‌ای
fn de_vec_string_to_f32<'de, D>(deserializer: D) -> Result<Vec<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = Deserialize::deserialize(deserializer)?;
    raw.iter()
        .map(|value| value.parse::<f32>().map_err(serde::de::Error::custom))
        .collect()
}

/// تبدیل پاسخ خام به مدل داخلی تحلیل
fn snapshot_from_payload(
    symbol: Symbol,
    payload: HistoryPayload,
) -> Result<AnalysisSnapshot, ProviderError> {
    let history = PriceHistory::try_new(payload.labels, payload.closes)?;

    Ok(AnalysisSnapshot {
        symbol,
        history,
        current_price: payload.price,
        trend: payload.trend,
        last_updated: payload.updated,
        fundamentals: payload.fundamentals.into(),
    })
}

// داده ثابت آزمایشی؛ یک تامین‌کننده واقعی همین شکل پاسخ را از شبکه می‌گیرد
const MOCK_PAYLOAD: &str = r#"{
    "labels": ["January", "February", "March", "April", "May"],
    "closes": ["120", "130", "125", "140", "135"],
    "price": "130",
    "trend": "Bullish",
    "updated": "2025-02-01",
    "fundamentals": {
        "trailingPE": 29.4,
        "priceToBook": 46.1,
        "returnOnEquity": 1.45,
        "debtToEquity": 176.3,
        "dividendYield": 0.0045
    }
}"#;

/// تامین‌کننده آزمایشی که به جای شبکه، داده ثابت برمی‌گرداند
///
/// داده ثابت از همان مسیر تجزیه‌ای عبور می‌کند که پاسخ واقعی شبکه
/// عبور خواهد کرد، بنابراین مسیر `Parse` هم تمرین می‌شود.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    fail_with: Option<ProviderError>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// تامین‌کننده‌ای که همیشه با خطای داده شده شکست می‌خورد (برای آزمون مسیر خطا)
    pub fn failing(error: ProviderError) -> Self {
        Self {
            fail_with: Some(error),
        }
    }
}

impl QuoteProvider for MockProvider {
    fn fetch(&self, symbol: &Symbol) -> Result<AnalysisSnapshot, ProviderError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }

        log::debug!("serving mock analysis for symbol {symbol:?}");

        let payload: HistoryPayload = serde_json::from_str(MOCK_PAYLOAD)
            .map_err(|err| ProviderError::Parse(err.to_string()))?;

        snapshot_from_payload(symbol.clone(), payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_fetch_returns_fixed_history() {
        let snapshot = MockProvider::new()
            .fetch(&Symbol::from("AAPL"))
            .expect("mock fetch should not fail");

        assert_eq!(
            snapshot.history.labels(),
            ["January", "February", "March", "April", "May"]
        );
        assert_eq!(
            snapshot.history.closes(),
            [120.0, 130.0, 125.0, 140.0, 135.0]
        );
        assert_eq!(snapshot.current_price, 130.0);
        assert_eq!(snapshot.trend, MarketTrend::Bullish);
        assert_eq!(snapshot.last_updated_label(), "February 2025");
    }

    #[test]
    fn mock_fetch_keeps_symbol_untouched() {
        let provider = MockProvider::new();

        // رشته خالی هم یک نماد مجاز است
        for raw in ["", "AAPL", "<b>x</b>"] {
            let snapshot = provider.fetch(&Symbol::from(raw)).unwrap();
            assert_eq!(snapshot.symbol.as_str(), raw);
        }
    }

    #[test]
    fn mock_fundamentals_come_from_payload() {
        let snapshot = MockProvider::new().fetch(&Symbol::from("AAPL")).unwrap();

        assert_eq!(snapshot.fundamentals.pe_ratio, Some(29.4));
        assert_eq!(snapshot.fundamentals.roa, None);
        assert_eq!(snapshot.fundamentals.free_cash_flow, None);
    }

    #[test]
    fn failing_provider_surfaces_its_error() {
        let provider = MockProvider::failing(ProviderError::Timeout);

        assert_eq!(
            provider.fetch(&Symbol::from("AAPL")),
            Err(ProviderError::Timeout)
        );
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        let error = serde_json::from_str::<HistoryPayload>("{\"labels\": []}")
            .map_err(|err| ProviderError::Parse(err.to_string()))
            .unwrap_err();

        assert!(matches!(error, ProviderError::Parse(_)));
    }
}
