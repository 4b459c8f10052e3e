use dioxus::prelude::*;

use store::ClientConfig;
use ui::{use_auth, AuthProvider, LogoutButton, Navbar, NotificationProvider};
use views::{CreateLink, Links, PublicFeed, Signin, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Root {},
        #[route("/links")]
        Links {},
        #[route("/public")]
        PublicFeed {},
        #[route("/create-link")]
        CreateLink {},
        #[route("/signin")]
        Signin {},
        #[route("/signup")]
        Signup {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

const BUNDLED_CONFIG: &str = include_str!("../linkshelf.toml");

fn main() {
    dioxus::launch(App);
}

/// Bundled `linkshelf.toml`, with the API URL overridable at build time
/// through `LINKSHELF_API_URL`.
fn load_config() -> ClientConfig {
    let config = ClientConfig::from_toml(BUNDLED_CONFIG).unwrap_or_else(|e| {
        tracing::warn!("invalid {}: {e}; using defaults", ClientConfig::filename());
        ClientConfig::default()
    });
    match option_env!("LINKSHELF_API_URL") {
        Some(url) if !url.is_empty() => config.with_base_url(url),
        _ => config,
    }
}

#[component]
fn App() -> Element {
    let config = use_context_provider(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        NotificationProvider {
            AuthProvider {
                config: config,
                Router::<Route> {}
            }
        }
    }
}

/// Where a visitor must be sent instead of `route`, if anywhere.
fn gate(route: &Route, signed_in: bool) -> Option<Route> {
    match route {
        Route::Signin {} | Route::Signup {} if signed_in => Some(Route::Root {}),
        Route::Links {} | Route::CreateLink {} if !signed_in => Some(Route::Signin {}),
        _ => None,
    }
}

/// Navbar, access gating, and the routed page.
#[component]
fn Shell() -> Element {
    let auth = use_auth();
    let route = use_route::<Route>();
    let nav = use_navigator();
    let session = auth();
    let signed_in = session.is_active();

    if let Some(target) = gate(&route, signed_in) {
        tracing::debug!(from = %route, to = %target, "redirecting");
        nav.replace(target);
        return rsx! {};
    }

    rsx! {
        Navbar {
            Link { to: Route::Root {}, "Home" }
            Link { to: Route::PublicFeed {}, "Public" }
            if signed_in {
                Link { to: Route::CreateLink {}, "Create Link" }
                Link { to: Route::Links {}, "My Links" }
                if let Some(user) = session.user {
                    span { class: "navbar-user", "{user.display_name()}" }
                }
                LogoutButton {
                    class: "navbar-logout",
                    on_logout: move |_| {
                        nav.push(Route::Signin {});
                    },
                }
            } else {
                Link { to: Route::Signin {}, "Sign In" }
                Link { to: Route::Signup {}, "Sign Up" }
            }
        }
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}

/// Redirect `/` to `/links`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Links {});
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_out_users_are_sent_to_signin() {
        assert_eq!(gate(&Route::Links {}, false), Some(Route::Signin {}));
        assert_eq!(gate(&Route::CreateLink {}, false), Some(Route::Signin {}));
        assert_eq!(gate(&Route::PublicFeed {}, false), None);
        assert_eq!(gate(&Route::Signup {}, false), None);
    }

    #[test]
    fn test_signed_in_users_skip_auth_pages() {
        assert_eq!(gate(&Route::Signin {}, true), Some(Route::Root {}));
        assert_eq!(gate(&Route::Signup {}, true), Some(Route::Root {}));
        assert_eq!(gate(&Route::Links {}, true), None);
        assert_eq!(gate(&Route::CreateLink {}, true), None);
    }

    #[test]
    fn test_bundled_config_parses() {
        let config = ClientConfig::from_toml(BUNDLED_CONFIG).unwrap();
        assert_eq!(config.session.storage_key, "token");
        assert_eq!(config.feed.default_filter, store::FeedFilter::Latest);
    }
}
