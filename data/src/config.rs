// ماژول‌های مربوط به تنظیمات برنامه
pub mod theme;
