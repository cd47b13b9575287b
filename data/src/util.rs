/// اختصار اعداد بزرگ (مثلاً 1.5m برای یک میلیون و پانصد هزار)
pub fn abbr_large_numbers(value: f32) -> String {
    let abs_value = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    match abs_value {
        v if v >= 1_000_000_000.0 => format!("{}{:.2}b", sign, v / 1_000_000_000.0),
        v if v >= 1_000_000.0 => format!("{}{:.2}m", sign, v / 1_000_000.0),
        v if v >= 10_000.0 => format!("{}{:.1}k", sign, v / 1_000.0),
        v if v >= 1_000.0 => format!("{}{:.2}k", sign, v / 1_000.0),
        v if v >= 100.0 => format!("{}{:.0}", sign, v),
        v if v >= 10.0 => format!("{}{:.1}", sign, v),
        v if v >= 1.0 => format!("{}{:.2}", sign, v),
        _ => {
            if abs_value == 0.0 {
                "0".to_string()
            } else {
                let s = format!("{}{:.3}", sign, abs_value);
                s.trim_end_matches('0').trim_end_matches('.').to_string()
            }
        }
    }
}

/// نمایش قیمت به صورت دلاری بدون صفرهای اضافی انتها (مثلاً "$130" یا "$130.55")
pub fn display_price(price: f32) -> String {
    let formatted = format!("{price:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    format!("${trimmed}")
}

/// اختصار مبالغ ارزی بزرگ (مثلاً $1.5m)
pub fn currency_abbr(price: f32) -> String {
    match price {
        p if p > 1_000_000_000.0 => format!("${:.2}b", p / 1_000_000_000.0),
        p if p > 1_000_000.0 => format!("${:.1}m", p / 1_000_000.0),
        p if p > 1000.0 => format!("${:.2}k", p / 1000.0),
        _ => format!("${:.2}", price),
    }
}

/// فرمت‌بندی درصد تغییرات (با علامت + برای مقادیر مثبت)
pub fn pct_change(change: f32) -> String {
    match change {
        c if c > 0.0 => format!("+{:.2}%", c),
        _ => format!("{:.2}%", change),
    }
}

/// حدس زدن گام مناسب برای خطوط راهنمای محور قیمت بر اساس دامنه مقادیر
pub fn guesstimate_ticks(range: f32) -> f32 {
    match range {
        r if r > 1_000_000.0 => 100_000.0,
        r if r > 100_000.0 => 10_000.0,
        r if r > 10_000.0 => 1_000.0,
        r if r > 1_000.0 => 100.0,
        r if r > 100.0 => 10.0,
        r if r > 10.0 => 1.0,
        r if r > 1.0 => 0.1,
        r if r > 0.1 => 0.01,
        _ => 0.001,
    }
}

/// گرد کردن قیمت به گام بعدی (بالا یا پایین)
pub fn round_to_next_tick(value: f32, tick_size: f32, down: bool) -> f32 {
    if down {
        (value / tick_size).floor() * tick_size
    } else {
        (value / tick_size).ceil() * tick_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_price_trims_trailing_zeros() {
        assert_eq!(display_price(130.0), "$130");
        assert_eq!(display_price(130.5), "$130.5");
        assert_eq!(display_price(130.55), "$130.55");
        assert_eq!(display_price(0.0), "$0");
    }

    #[test]
    fn abbreviates_large_numbers() {
        assert_eq!(abbr_large_numbers(1_500_000.0), "1.50m");
        assert_eq!(abbr_large_numbers(12_500.0), "12.5k");
        assert_eq!(abbr_large_numbers(135.0), "135");
        assert_eq!(abbr_large_numbers(-1_200.0), "-1.20k");
        assert_eq!(abbr_large_numbers(0.0), "0");
    }

    #[test]
    fn percent_changes_keep_their_sign() {
        assert_eq!(pct_change(4.2), "+4.20%");
        assert_eq!(pct_change(-1.5), "-1.50%");
        assert_eq!(pct_change(0.0), "0.00%");
    }

    #[test]
    fn tick_rounding_brackets_a_range() {
        let tick = guesstimate_ticks(140.0);

        assert_eq!(round_to_next_tick(118.0, tick, true), 110.0);
        assert_eq!(round_to_next_tick(141.0, tick, false), 150.0);
    }
}
