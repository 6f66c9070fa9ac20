//! Global command palette (⌘K / Ctrl+K)

use dioxus::prelude::*;

use super::{use_toasts, LoadingDots};
use crate::api::{search_items, send_social_post};
use crate::routes::Route;
use crate::state::{CommandMenuState, SearchAction, CLEAR_DELAY, SEARCH_DEBOUNCE};
use crate::types::EntityKind;
use crate::util::sleep;

const REGISTER_HOTKEY_JS: &str = r#"
    window.__commandMenuHotkey = (event) => {
        if (event.key === "k" && (event.metaKey || event.ctrlKey)) {
            event.preventDefault();
            dioxus.send(true);
        }
    };
    document.addEventListener("keydown", window.__commandMenuHotkey);
"#;

const UNREGISTER_HOTKEY_JS: &str = r#"
    if (window.__commandMenuHotkey) {
        document.removeEventListener("keydown", window.__commandMenuHotkey);
        delete window.__commandMenuHotkey;
    }
"#;

fn schedule_clear(mut menu: Signal<CommandMenuState>, ticket: u64) {
    spawn(async move {
        sleep(CLEAR_DELAY).await;
        menu.write().clear_after_close(ticket);
    });
}

fn close_menu(mut menu: Signal<CommandMenuState>) {
    let ticket = menu.write().close();
    schedule_clear(menu, ticket);
}

#[component]
pub fn CommandMenu() -> Element {
    let mut menu = use_signal(CommandMenuState::new);
    let navigator = use_navigator();
    let mut toasts = use_toasts();

    // Listen for the hotkey for as long as the menu is mounted
    use_hook(|| {
        spawn(async move {
            let mut hotkey = document::eval(REGISTER_HOTKEY_JS);
            while hotkey.recv::<bool>().await.is_ok() {
                let ticket = menu.write().toggle();
                if let Some(ticket) = ticket {
                    schedule_clear(menu, ticket);
                }
            }
        })
    });
    use_drop(|| {
        document::eval(UNREGISTER_HOTKEY_JS);
    });

    let on_input = move |event: FormEvent| {
        let ticket = menu.write().type_input(event.value());
        spawn(async move {
            sleep(SEARCH_DEBOUNCE).await;

            let action = menu.write().settle(ticket);
            let SearchAction::Search { generation, query } = action else {
                return;
            };

            match search_items(query).await {
                Ok(result) => {
                    menu.write().finish_search(generation, result);
                }
                Err(e) => {
                    tracing::warn!("Command menu search failed: {}", e);
                    menu.write().fail_search(generation);
                }
            }
        });
    };

    let on_keydown = move |event: KeyboardEvent| {
        if event.key() == Key::Escape {
            close_menu(menu);
        }
    };

    let go_to = move |route: Route, ticket: u64| {
        navigator.push(route);
        schedule_clear(menu, ticket);
    };

    let send_test_post = move |_| {
        let Some(slug) = menu.write().begin_social_post() else {
            return;
        };
        spawn(async move {
            let sent = send_social_post(slug.to_string()).await;
            menu.write().finish_social_post();
            match sent {
                Ok(platforms) if platforms.is_empty() => {
                    toasts.success("No social networks are configured")
                }
                Ok(platforms) => {
                    toasts.success(format!("Social post sent to {}", platforms.join(", ")))
                }
                Err(e) => toasts.error(format!("Failed to send social post: {}", e)),
            }
        });
    };

    let state = menu.read();
    if !state.open {
        return rsx! {};
    }

    let query = state.query.clone();
    let is_searching = state.is_searching;
    let results = state.results.clone();
    let sending_post = state.sending_post;
    drop(state);

    rsx! {
        div {
            class: "command-menu-backdrop",
            onclick: move |_| close_menu(menu),

            div {
                class: "command-menu",
                role: "dialog",
                aria_label: "Command menu",
                onclick: move |event| event.stop_propagation(),
                onkeydown: on_keydown,

                input {
                    r#type: "text",
                    placeholder: "Type a command or search...",
                    autofocus: true,
                    value: "{query}",
                    oninput: on_input,
                }

                if is_searching {
                    div { class: "p-3", LoadingDots {} }
                }

                if let Some(results) = results {
                    if results.is_empty() {
                        p { class: "px-4 py-3 text-sm text-zinc-500", "No results found." }
                    }

                    for (kind, items) in results.groups() {
                        if !items.is_empty() {
                            div {
                                key: "{kind.segment()}",
                                class: "command-menu-group",
                                h3 { {kind.label()} }

                                for item in items.iter().cloned() {
                                    button {
                                        key: "{item.id}",
                                        class: "command-menu-item",
                                        onclick: move |_| {
                                            let (route, ticket) = menu.write().select(kind, &item.slug);
                                            go_to(route, ticket);
                                        },
                                        "{item.name}"
                                    }
                                }
                            }
                        }
                    }
                }

                div {
                    class: "command-menu-group",
                    h3 { "Create" }

                    for kind in EntityKind::variants().iter().copied() {
                        button {
                            key: "{kind.segment()}",
                            class: "command-menu-item",
                            onclick: move |_| {
                                let (route, ticket) = menu.write().create(kind);
                                go_to(route, ticket);
                            },
                            "New {kind.singular()}"
                        }
                    }
                }

                div {
                    class: "command-menu-group",
                    h3 { "Quick Commands" }

                    button {
                        class: "command-menu-item",
                        disabled: sending_post,
                        onclick: send_test_post,
                        "Send Social Post"
                    }
                }
            }
        }
    }
}
