//! Authentication context and hooks for the UI.

use api::{Session, SessionChange, SessionStore};
use dioxus::prelude::*;
use store::ClientConfig;

use crate::client::{make_client, WebClient};
use crate::notifications::{notify, use_notifications, NoticeLevel, SESSION_EXPIRED_MESSAGE};

/// Get the current session.
/// Returns a signal that updates when the user signs in, signs out, or the
/// server rejects the token.
pub fn use_auth() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Get the shared API client.
pub fn use_api() -> WebClient {
    use_context::<WebClient>()
}

/// Provider component that owns the API client and mirrors its session into a
/// signal. Must be rendered inside a `NotificationProvider`.
#[component]
pub fn AuthProvider(config: ClientConfig, children: Element) -> Element {
    let client = use_context_provider(|| make_client(&config));
    use_session_sync(client.session().clone());

    rsx! {
        {children}
    }
}

/// Restore `sessions` and provide it as the `use_auth` signal, kept in step
/// with every later change. An expiry raises the session-expired warning.
pub fn use_session_sync(sessions: SessionStore) -> Signal<Session> {
    let mut session = use_context_provider(|| Signal::new(sessions.restore().unwrap_or_default()));
    let mut notifications = use_notifications();

    // The receiver is dropped with the task when the caller unmounts.
    use_future(move || {
        let sessions = sessions.clone();
        async move {
            let mut changes = sessions.subscribe();
            while changes.changed().await.is_ok() {
                let state = changes.borrow_and_update().clone();
                tracing::debug!(change = ?state.change, revision = state.revision, "session changed");
                if state.change == SessionChange::Expired {
                    notify(&mut notifications, NoticeLevel::Warning, SESSION_EXPIRED_MESSAGE);
                }
                if *session.peek() != state.session {
                    session.set(state.session);
                }
            }
        }
    });

    session
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    on_logout: EventHandler<()>,
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let client = use_api();
    let mut session = use_auth();

    let onclick = move |_| {
        client.logout();
        session.set(Session::default());
        on_logout.call(());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
