//! Error kinds surfaced by the core engines.
//!
//! Every failure is caught at the boundary of the user action that caused it and shown
//! once as a dismissible alert; nothing here is fatal to the process.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, NoorError>;

/// What: Enumerates every recoverable failure the engines can report.
///
/// Details:
/// - Each variant carries a short technical detail for the log; [`NoorError::user_message`]
///   gives the Arabic text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoorError {
    /// Transport failure or non-success HTTP status.
    #[error("network error: {0}")]
    Network(String),
    /// Device position could not be obtained (capability absent, denied, or timed out).
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),
    /// The geocoding service returned no match for a place description.
    #[error("place not found: {0}")]
    PlaceNotFound(String),
    /// A runtime permission (orientation sensor) was refused.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// Prayer timetable could not be fetched or was malformed.
    #[error("prayer schedule unavailable: {0}")]
    ScheduleFetch(String),
    /// Qibla bearing could not be fetched.
    #[error("qibla bearing unavailable: {0}")]
    BearingFetch(String),
    /// The local key-value store could not be written.
    #[error("storage error: {0}")]
    Storage(String),
    /// The external audio player could not be started.
    #[error("playback error: {0}")]
    Playback(String),
}

impl NoorError {
    /// What: Produce the one-shot alert text for this error.
    ///
    /// Output:
    /// - Arabic sentence suitable for `Modal::Alert`.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(detail) => format!("تعذر الاتصال بالخادم: {detail}"),
            Self::LocationUnavailable(_) => {
                "تعذر تحديد الموقع تلقائيًا. استخدم الإدخال اليدوي.".to_string()
            }
            Self::PlaceNotFound(_) => "تعذر ضبط الموقع: لم يتم العثور على الموقع".to_string(),
            Self::PermissionDenied(_) => "لم يتم منح إذن مستشعر الاتجاه.".to_string(),
            Self::ScheduleFetch(_) => "تعذر تحميل مواقيت الصلاة.".to_string(),
            Self::BearingFetch(_) => "تعذر تحميل اتجاه القبلة.".to_string(),
            Self::Storage(_) => "تعذر حفظ الإعدادات.".to_string(),
            Self::Playback(_) => "تعذر تشغيل الصوت.".to_string(),
        }
    }
}
