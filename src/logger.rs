use std::{fs, io, path::Path};

pub use data::log::Error;

/// راه‌اندازی سیستم لاگینگ برنامه
pub fn setup(is_debug: bool) -> Result<(), Error> {
    // تعیین سطح لاگ پیش‌فرض بر اساس وضعیت دیباگ
    let default_level = if is_debug {
        log::Level::Debug
    } else {
        log::Level::Info
    };

    // دریافت سطح لاگ از متغیر محیطی RUST_LOG در صورت وجود
    let level_filter = std::env::var("RUST_LOG")
        .ok()
        .as_deref()
        .map(str::parse::<log::Level>)
        .transpose()?
        .unwrap_or(default_level)
        .to_level_filter();

    // تنظیم فرمت نمایش لاگ‌ها
    let mut io_sink = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "{}:{} -- {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            message
        ));
    });

    if is_debug {
        // در حالت دیباگ، لاگ‌ها در کنسول نمایش داده می‌شوند
        io_sink = io_sink.chain(std::io::stdout());
    } else {
        // در حالت عادی، لاگ‌ها در فایل ذخیره می‌شوند
        let log_path = data::log::path()?;
        initial_rotation(&log_path)?; // چرخش فایل لاگ اجرای قبلی

        io_sink = io_sink.chain(data::log::file()?);
    }

    // تنظیم سطوح لاگ برای ماژول‌های مختلف
    fern::Dispatch::new()
        .level(log::LevelFilter::Off)
        .level_for("panic", log::LevelFilter::Error)
        .level_for("iced_wgpu", log::LevelFilter::Info)
        .level_for("stockscope_data", level_filter)
        .level_for("stockscope_market", level_filter)
        .level_for("stockscope", level_filter)
        .chain(io_sink)
        .apply()?;

    Ok(())
}

/// انتقال لاگ اجرای قبلی به فایل جداگانه تا لاگ فعلی از صفر شروع شود
fn initial_rotation(log_path: &Path) -> io::Result<()> {
    let previous_log_path = data::log::previous_path()
        .map_err(|err| io::Error::other(err.to_string()))?;

    // حذف فایل لاگ قبلی در صورت وجود
    if previous_log_path.exists() {
        fs::remove_file(&previous_log_path)?;
    }

    // تغییر نام فایل لاگ فعلی به فایل قبلی
    if log_path.exists() {
        fs::rename(log_path, &previous_log_path)?;
    }

    Ok(())
}
