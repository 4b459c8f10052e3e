use dioxus::prelude::*;
use ui::{
    notify, use_api, use_notifications, CreateLinkForm, LinkField, NoticeLevel, SubmitOutcome,
};

use crate::Route;

/// Create-link form. On success the user lands on their list.
#[component]
pub fn CreateLink() -> Element {
    let client = use_api();
    let nav = use_navigator();
    let mut notifications = use_notifications();
    let mut form = use_signal(CreateLinkForm::default);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let payload = match form.write().begin_submit() {
            Ok(payload) => payload,
            Err(e) => {
                notify(&mut notifications, NoticeLevel::Warning, &e.to_string());
                return;
            }
        };
        let client = client.clone();
        spawn(async move {
            let result = client.create_link(&payload).await;
            let outcome = form.write().finish_submit(result);
            match outcome {
                SubmitOutcome::Created(link) => {
                    notify(
                        &mut notifications,
                        NoticeLevel::Success,
                        &format!("Added \"{}\"", link.title),
                    );
                    nav.push(Route::Links {});
                }
                SubmitOutcome::Failed(e) if e.is_session_expired() => {}
                SubmitOutcome::Failed(e) => {
                    notify(
                        &mut notifications,
                        NoticeLevel::Error,
                        &format!("Could not create link: {e}"),
                    );
                }
            }
        });
    };

    let submitting = form.read().is_submitting();
    let is_public = form.read().draft().is_public;

    rsx! {
        section {
            class: "create-link-page",
            h1 { "Create Link" }
            form {
                class: "link-form",
                onsubmit: onsubmit,
                for field in LinkField::REQUIRED {
                    label {
                        key: "{field.label()}",
                        span { "{field.label()}" }
                        if field == LinkField::Description {
                            textarea {
                                rows: 3,
                                value: "{form.read().get(field)}",
                                oninput: move |evt: FormEvent| form.write().set(field, evt.value()),
                            }
                        } else {
                            input {
                                r#type: if field == LinkField::Url { "url" } else { "text" },
                                value: "{form.read().get(field)}",
                                oninput: move |evt: FormEvent| form.write().set(field, evt.value()),
                            }
                        }
                    }
                }
                label {
                    class: "checkbox",
                    input {
                        r#type: "checkbox",
                        checked: is_public,
                        onchange: move |evt: FormEvent| form.write().set_public(evt.checked()),
                    }
                    " Share on the public feed"
                }
                button {
                    r#type: "submit",
                    disabled: submitting,
                    if submitting { "Saving..." } else { "Create" }
                }
            }
        }
    }
}
