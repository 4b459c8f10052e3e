//! Sign-up page.

use api::SignupRequest;
use dioxus::prelude::*;
use ui::{notify, use_api, use_auth, use_notifications, NoticeLevel};

use crate::Route;

#[component]
pub fn Signup() -> Element {
    let client = use_api();
    let nav = use_navigator();
    let mut auth = use_auth();
    let mut notifications = use_notifications();
    let mut request = use_signal(SignupRequest::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let mut body = request();
        body.username = body.username.trim().to_string();
        body.email = body.email.trim().to_string();
        if body.username.is_empty() || body.email.is_empty() || body.password.is_empty() {
            error.set(Some("All fields are required.".to_string()));
            return;
        }
        let client = client.clone();
        busy.set(true);
        error.set(None);
        spawn(async move {
            match client.signup(&body).await {
                Ok(session) => {
                    auth.set(session);
                    notify(&mut notifications, NoticeLevel::Success, "Account created.");
                    nav.push(Route::Root {});
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
    };

    let current = request();

    rsx! {
        section {
            class: "auth-page",
            h1 { "Sign Up" }
            form {
                class: "auth-form",
                onsubmit: onsubmit,
                label {
                    span { "Username" }
                    input {
                        r#type: "text",
                        autocomplete: "username",
                        value: "{current.username}",
                        oninput: move |evt: FormEvent| request.write().username = evt.value(),
                    }
                }
                label {
                    span { "Email" }
                    input {
                        r#type: "email",
                        autocomplete: "email",
                        value: "{current.email}",
                        oninput: move |evt: FormEvent| request.write().email = evt.value(),
                    }
                }
                label {
                    span { "Password" }
                    input {
                        r#type: "password",
                        autocomplete: "new-password",
                        value: "{current.password}",
                        oninput: move |evt: FormEvent| request.write().password = evt.value(),
                    }
                }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                button {
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Creating account..." } else { "Sign Up" }
                }
            }
            p {
                class: "auth-switch",
                "Already have an account? "
                Link { to: Route::Signin {}, "Sign in" }
            }
        }
    }
}
