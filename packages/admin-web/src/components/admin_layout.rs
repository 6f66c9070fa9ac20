//! Admin layout wrapper with auth protection

use dioxus::prelude::*;

use super::{AdminNav, CommandMenu, LoadingDots};
use crate::auth::use_auth;
use crate::routes::Route;

/// Admin layout: navigation, page content and the global command menu.
/// Signed-out visitors are sent to the sign-in page.
#[component]
pub fn AdminLayout() -> Element {
    let auth = use_auth();

    if *auth.loading.read() {
        return rsx! {
            div {
                class: "min-h-screen flex items-center justify-center bg-zinc-100",
                LoadingDots {}
            }
        };
    }

    if !auth.is_authenticated() {
        return rsx! {
            Redirect { to: Route::AdminLogin {} }
        };
    }

    rsx! {
        div {
            class: "min-h-screen bg-zinc-100",

            AdminNav {}

            main {
                class: "p-6",
                Outlet::<Route> {}
            }

            CommandMenu {}
        }
    }
}
