//! Sign-in page.

use api::SigninRequest;
use dioxus::prelude::*;
use ui::{notify, use_api, use_auth, use_notifications, NoticeLevel};

use crate::Route;

#[component]
pub fn Signin() -> Element {
    let client = use_api();
    let nav = use_navigator();
    let mut auth = use_auth();
    let mut notifications = use_notifications();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let request = SigninRequest {
            email: email().trim().to_string(),
            password: password(),
        };
        let client = client.clone();
        busy.set(true);
        error.set(None);
        spawn(async move {
            match client.signin(&request).await {
                Ok(session) => {
                    auth.set(session);
                    notify(&mut notifications, NoticeLevel::Success, "Signed in.");
                    nav.push(Route::Root {});
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
    };

    rsx! {
        section {
            class: "auth-page",
            h1 { "Sign In" }
            form {
                class: "auth-form",
                onsubmit: onsubmit,
                label {
                    span { "Email" }
                    input {
                        r#type: "email",
                        autocomplete: "email",
                        value: "{email}",
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                label {
                    span { "Password" }
                    input {
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                button {
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Signing in..." } else { "Sign In" }
                }
            }
            p {
                class: "auth-switch",
                "No account yet? "
                Link { to: Route::Signup {}, "Sign up" }
            }
        }
    }
}
