//! Loading components

use dioxus::prelude::*;

/// Inline loading indicator
#[component]
pub fn LoadingDots() -> Element {
    rsx! {
        div {
            class: "inline-flex space-x-1",
            aria_label: "Searching",
            div { class: "w-2 h-2 bg-zinc-400 rounded-full animate-bounce" }
            div { class: "w-2 h-2 bg-zinc-400 rounded-full animate-bounce", style: "animation-delay: 0.1s" }
            div { class: "w-2 h-2 bg-zinc-400 rounded-full animate-bounce", style: "animation-delay: 0.2s" }
        }
    }
}
