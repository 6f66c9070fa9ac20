//! Admin sign-in page

use dioxus::prelude::*;

use crate::auth::{sign_in, use_auth};
use crate::routes::Route;

/// Exchange an admin token (from `issue_admin_token`) for a session
#[component]
pub fn AdminLogin() -> Element {
    let auth = use_auth();
    let navigator = use_navigator();

    let mut token = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_pending = use_signal(|| false);

    if auth.is_authenticated() {
        return rsx! {
            Redirect { to: Route::AdminDashboard {} }
        };
    }

    let handle_sign_in = move |event: FormEvent| {
        event.prevent_default();
        let pasted = token();

        spawn(async move {
            is_pending.set(true);
            error.set(None);

            match sign_in(pasted).await {
                Ok(user) => {
                    auth.set_user(user);
                    token.set(String::new());
                    navigator.push(Route::AdminDashboard {});
                }
                Err(e) => error.set(Some(e.to_string())),
            }

            is_pending.set(false);
        });
    };

    rsx! {
        div {
            class: "min-h-screen bg-zinc-100 flex items-center justify-center px-4",

            div {
                class: "bg-white rounded-lg shadow-md p-8 max-w-md w-full",

                div {
                    class: "mb-6 text-center",
                    h1 { class: "text-2xl font-bold text-zinc-900 mb-2", "Admin Sign In" }
                    p { class: "text-zinc-600 text-sm", "OpenAlternative" }
                }

                if let Some(err) = error() {
                    div {
                        class: "mb-4 p-3 bg-red-50 border border-red-200 text-red-800 rounded text-sm",
                        "{err}"
                    }
                }

                form {
                    onsubmit: handle_sign_in,
                    div {
                        class: "mb-4",
                        label {
                            class: "block text-sm font-medium text-zinc-700 mb-2",
                            "Admin token"
                        }
                        input {
                            r#type: "password",
                            autocomplete: "off",
                            value: "{token}",
                            oninput: move |e| token.set(e.value()),
                            class: "w-full px-3 py-2 border border-zinc-300 rounded-md focus:outline-none focus:ring-2 focus:ring-zinc-500",
                            disabled: is_pending()
                        }
                        p {
                            class: "mt-1 text-xs text-zinc-500",
                            "Issued with the issue_admin_token command"
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "w-full bg-zinc-900 text-white py-2 px-4 rounded-md hover:bg-zinc-700 disabled:opacity-50 disabled:cursor-not-allowed",
                        disabled: is_pending(),
                        if is_pending() { "Signing in..." } else { "Sign In" }
                    }
                }
            }
        }
    }
}
