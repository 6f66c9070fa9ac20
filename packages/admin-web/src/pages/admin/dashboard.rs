//! Admin dashboard page

use dioxus::prelude::*;

use crate::routes::Route;
use crate::types::EntityKind;

/// Landing page of the back office
#[component]
pub fn AdminDashboard() -> Element {
    rsx! {
        div {
            h1 { class: "text-2xl font-bold text-zinc-900 mb-6", "Dashboard" }

            // Quick Actions
            div {
                class: "bg-white rounded-lg shadow-sm border border-zinc-200 p-6 mb-6",
                h2 { class: "text-lg font-semibold text-zinc-900 mb-4", "Quick Actions" }
                div {
                    class: "flex flex-wrap gap-3",
                    for kind in EntityKind::variants().iter().copied() {
                        QuickActionLink {
                            key: "{kind.segment()}",
                            to: kind.new_route(),
                            label: kind.singular(),
                            icon: icon_for(kind),
                        }
                    }
                }
            }

            p {
                class: "text-sm text-zinc-500",
                "Press "
                kbd { class: "px-1.5 py-0.5 rounded border border-zinc-300 bg-zinc-50", "⌘K" }
                " (or Ctrl+K) anywhere to search tools, alternatives, categories and licenses."
            }
        }
    }
}

fn icon_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Tool => "\u{1F527}",
        EntityKind::Alternative => "\u{1F504}",
        EntityKind::Category => "\u{1F4C1}",
        EntityKind::License => "\u{1F4DC}",
    }
}

#[derive(Props, Clone, PartialEq)]
struct QuickActionLinkProps {
    to: Route,
    label: &'static str,
    icon: &'static str,
}

#[component]
fn QuickActionLink(props: QuickActionLinkProps) -> Element {
    rsx! {
        Link {
            to: props.to.clone(),
            class: "inline-flex items-center gap-2 px-4 py-2 bg-zinc-100 text-zinc-700 rounded-lg hover:bg-zinc-200 transition-colors",
            span { "{props.icon}" }
            "New {props.label}"
        }
    }
}
