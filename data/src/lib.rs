// ماژول‌های کریت داده
pub mod chart;
pub mod config;
pub mod log;
pub mod util;

pub use config::theme::ThemeMode;

use std::path::PathBuf;

/// مسیر پوشه داده برنامه؛ در صورت وجود نام فایل، مسیر کامل آن فایل
///
/// اگر پوشه پیکربندی سیستم در دسترس نباشد، از پوشه جاری استفاده می‌شود.
pub fn data_path(path_name: Option<&str>) -> PathBuf {
    let data_path = dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockscope");

    if let Some(file_name) = path_name {
        data_path.join(file_name)
    } else {
        data_path
    }
}
