//! Admin navigation component

use dioxus::prelude::*;

use crate::auth::{sign_out, use_auth};
use crate::routes::Route;
use crate::types::EntityKind;

/// Admin navigation bar
#[component]
pub fn AdminNav() -> Element {
    let auth = use_auth();
    let navigator = use_navigator();
    let email = auth
        .user
        .read()
        .as_ref()
        .map(|user| user.email.clone())
        .unwrap_or_default();

    let handle_sign_out = move |_| {
        spawn(async move {
            if let Err(e) = sign_out().await {
                tracing::warn!("Sign out failed: {}", e);
            }
            auth.clear();
            navigator.push(Route::AdminLogin {});
        });
    };

    rsx! {
        nav {
            class: "bg-white border-b border-zinc-200 px-6 py-3",
            div {
                class: "flex items-center justify-between",

                div {
                    class: "flex items-center gap-6",
                    Link {
                        to: Route::AdminDashboard {},
                        class: "text-xl font-bold text-zinc-900",
                        "OpenAlternative Admin"
                    }

                    div {
                        class: "hidden md:flex items-center gap-1",
                        NavLink { to: Route::AdminDashboard {}, label: "Dashboard" }
                        for kind in EntityKind::variants().iter().copied() {
                            NavLink { to: kind.new_route(), label: kind.label() }
                        }
                    }
                }

                div {
                    class: "flex items-center gap-4 text-sm text-zinc-500",

                    // Command menu hint
                    span {
                        kbd { class: "px-1.5 py-0.5 rounded border border-zinc-300 bg-zinc-50", "⌘K" }
                        " to search"
                    }

                    span { "{email}" }
                    button {
                        class: "text-zinc-600 hover:text-zinc-900",
                        onclick: handle_sign_out,
                        "Sign out"
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct NavLinkProps {
    to: Route,
    label: &'static str,
}

#[component]
fn NavLink(props: NavLinkProps) -> Element {
    let route = use_route::<Route>();
    let is_active = route == props.to;

    rsx! {
        Link {
            to: props.to.clone(),
            class: if is_active {
                "px-3 py-2 rounded-md text-sm font-medium bg-zinc-200 text-zinc-900"
            } else {
                "px-3 py-2 rounded-md text-sm font-medium text-zinc-600 hover:bg-zinc-100 hover:text-zinc-900"
            },
            "{props.label}"
        }
    }
}
