//! Create and detail pages for catalog entities

use dioxus::prelude::*;

use crate::api::{get_alternative, send_social_post};
use crate::components::{use_toasts, LoadingDots};
use crate::types::EntityKind;

#[component]
pub fn ToolNew() -> Element {
    rsx! { EntityNewPage { kind: EntityKind::Tool } }
}

#[component]
pub fn ToolDetail(slug: String) -> Element {
    rsx! {
        EntityDetailPage { kind: EntityKind::Tool, slug: slug.clone() }
        LaunchPostPanel { slug }
    }
}

#[component]
pub fn AlternativeNew() -> Element {
    rsx! { EntityNewPage { kind: EntityKind::Alternative } }
}

#[component]
pub fn AlternativeDetail(slug: String) -> Element {
    rsx! {
        EntityDetailPage { kind: EntityKind::Alternative, slug: slug.clone() }
        AlternativePanel { slug }
    }
}

#[component]
pub fn CategoryNew() -> Element {
    rsx! { EntityNewPage { kind: EntityKind::Category } }
}

#[component]
pub fn CategoryDetail(slug: String) -> Element {
    rsx! { EntityDetailPage { kind: EntityKind::Category, slug } }
}

#[component]
pub fn LicenseNew() -> Element {
    rsx! { EntityNewPage { kind: EntityKind::License } }
}

#[component]
pub fn LicenseDetail(slug: String) -> Element {
    rsx! { EntityDetailPage { kind: EntityKind::License, slug } }
}

#[component]
fn EntityNewPage(kind: EntityKind) -> Element {
    rsx! {
        div {
            h1 { class: "text-2xl font-bold text-zinc-900 mb-2", "New {kind.singular()}" }
            p { class: "text-sm text-zinc-500", "{kind.new_path()}" }
        }
    }
}

#[component]
fn EntityDetailPage(kind: EntityKind, slug: String) -> Element {
    rsx! {
        div {
            class: "mb-6",
            p { class: "text-sm uppercase tracking-wide text-zinc-500", "{kind.singular()}" }
            h1 { class: "text-2xl font-bold text-zinc-900", "{slug}" }
            p { class: "text-sm text-zinc-500", "{kind.detail_path(&slug)}" }
        }
    }
}

#[component]
fn AlternativePanel(slug: String) -> Element {
    let detail = use_resource(use_reactive!(|(slug,)| async move { get_alternative(slug).await }));

    let body = match &*detail.read_unchecked() {
        None => rsx! { LoadingDots {} },
        Some(Err(e)) => rsx! {
            p { class: "text-sm text-red-700", "Failed to load alternative: {e}" }
        },
        Some(Ok(alternative)) => rsx! {
            dl {
                class: "grid grid-cols-3 gap-2 text-sm",
                dt { class: "text-zinc-500", "Name" }
                dd { class: "col-span-2 text-zinc-900", "{alternative.name}" }

                if let Some(website) = &alternative.website {
                    dt { class: "text-zinc-500", "Website" }
                    dd {
                        class: "col-span-2",
                        a { class: "text-zinc-900 underline", href: "{website}", "{website}" }
                    }
                }

                if let Some(description) = &alternative.description {
                    dt { class: "text-zinc-500", "Description" }
                    dd { class: "col-span-2 text-zinc-900", "{description}" }
                }

                dt { class: "text-zinc-500", "Discount" }
                dd {
                    class: "col-span-2 text-zinc-900",
                    match &alternative.discount_label {
                        Some(label) => rsx! { "{label}" },
                        None => rsx! { span { class: "text-zinc-400", "None" } },
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "bg-white rounded-lg shadow-sm border border-zinc-200 p-6",
            h2 { class: "text-lg font-semibold text-zinc-900 mb-4", "Details" }
            {body}
        }
    }
}

/// Posts the launch announcement of a tool immediately
#[component]
fn LaunchPostPanel(slug: String) -> Element {
    let mut toasts = use_toasts();
    let mut sending = use_signal(|| false);

    let post = move |_| {
        let slug = slug.clone();
        sending.set(true);
        spawn(async move {
            match send_social_post(slug).await {
                Ok(platforms) if platforms.is_empty() => {
                    toasts.success("No social networks are configured")
                }
                Ok(platforms) => toasts.success(format!("Posted to {}", platforms.join(", "))),
                Err(e) => toasts.error(format!("Failed to post: {}", e)),
            }
            sending.set(false);
        });
    };

    rsx! {
        div {
            class: "bg-white rounded-lg shadow-sm border border-zinc-200 p-6",
            h2 { class: "text-lg font-semibold text-zinc-900 mb-4", "Launch" }
            button {
                class: "px-4 py-2 bg-zinc-900 text-white rounded-lg hover:bg-zinc-700 disabled:opacity-50",
                disabled: sending(),
                onclick: post,
                if sending() {
                    LoadingDots {}
                } else {
                    "Post launch on socials"
                }
            }
        }
    }
}
