use std::time::Duration;

use dioxus::dioxus_core::spawn_forever;
use dioxus::prelude::*;

const NOTIFICATIONS_CSS: Asset = asset!("/assets/styling/notifications.css");

/// How long a toast stays on screen.
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(5);

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    fn class(self) -> &'static str {
        match self {
            NoticeLevel::Info => "toast info",
            NoticeLevel::Success => "toast success",
            NoticeLevel::Warning => "toast warning",
            NoticeLevel::Error => "toast error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub timestamp: String,
    pub level: NoticeLevel,
    pub message: String,
}

/// Toasts currently on screen, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notifications {
    entries: Vec<Notice>,
    next_id: u64,
}

impl Notifications {
    pub fn push(&mut self, level: NoticeLevel, message: &str) -> u64 {
        self.next_id += 1;
        self.entries.push(Notice {
            id: self.next_id,
            timestamp: current_time(),
            level,
            message: message.to_string(),
        });
        self.next_id
    }

    /// Remove a toast. Dismissing an id twice is harmless.
    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|notice| notice.id != id);
    }

    pub fn entries(&self) -> &[Notice] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub fn use_notifications() -> Signal<Notifications> {
    use_context::<Signal<Notifications>>()
}

/// Show a toast and schedule its dismissal.
///
/// The dismissal timer belongs to the root scope, so it still fires when the
/// caller navigates away right after notifying.
pub fn notify(notifications: &mut Signal<Notifications>, level: NoticeLevel, message: &str) {
    match level {
        NoticeLevel::Error => tracing::error!("{message}"),
        NoticeLevel::Warning => tracing::warn!("{message}"),
        NoticeLevel::Info | NoticeLevel::Success => tracing::info!("{message}"),
    }

    let id = notifications.write().push(level, message);
    let mut notifications = *notifications;
    spawn_forever(async move {
        sleep(NOTICE_TIMEOUT).await;
        notifications.write().dismiss(id);
    });
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("{:02}:{:02}:{:02}", secs / 3600 % 24, secs / 60 % 60, secs % 60)
}

/// Provides the notification signal and renders the toast stack above `children`.
#[component]
pub fn NotificationProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(Notifications::default()));

    rsx! {
        {children}
        ToastStack {}
    }
}

#[component]
pub fn ToastStack() -> Element {
    let mut notifications = use_notifications();
    let entries = notifications().entries().to_vec();

    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        document::Stylesheet { href: NOTIFICATIONS_CSS }

        div {
            class: "toast-stack",
            for entry in entries {
                div {
                    key: "{entry.id}",
                    class: entry.level.class(),
                    span { class: "toast-time", "{entry.timestamp}" }
                    span { class: "toast-message", " {entry.message}" }
                    button {
                        class: "toast-close",
                        onclick: move |_| notifications.write().dismiss(entry.id),
                        "×"
                    }
                }
            }
        }
    }
}
