#[cfg(test)]
use mockall::automock;

/// User-facing messages, the equivalent of a toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    TimingsUnavailable,
    LocationDetected(String),
    LocationUnavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Notification {
    pub fn severity(&self) -> Severity {
        match self {
            Notification::LocationDetected(_) => Severity::Success,
            Notification::TimingsUnavailable | Notification::LocationUnavailable => {
                Severity::Error
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notification::TimingsUnavailable => {
                "Gagal memuat jadwal sholat. Silakan coba lagi nanti.".to_string()
            }
            Notification::LocationDetected(region) => format!("Lokasi terdeteksi: {region}"),
            Notification::LocationUnavailable => {
                "Gagal mendeteksi lokasi. Silakan pilih lokasi secara manual.".to_string()
            }
        }
    }
}

#[cfg_attr(test, automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Surfaces notifications through the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let message = notification.message();
        match notification.severity() {
            Severity::Success => tracing::info!(notification = %message),
            Severity::Error => tracing::error!(notification = %message),
        }
    }
}
