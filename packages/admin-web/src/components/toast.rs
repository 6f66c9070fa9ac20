//! Transient notifications

use dioxus::prelude::*;
use std::time::Duration;

use crate::util::sleep;

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Handle for showing notifications, provided by [`ToastProvider`]
#[derive(Clone, Copy)]
pub struct Toasts {
    current: Signal<Option<Toast>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.show(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(ToastKind::Error, message.into());
    }

    fn show(&mut self, kind: ToastKind, message: String) {
        let id = *self.next_id.peek() + 1;
        self.next_id.set(id);
        self.current.set(Some(Toast { id, kind, message }));

        let mut current = self.current;
        spawn(async move {
            sleep(TOAST_DURATION).await;
            // A newer toast keeps its own timer
            if current.peek().as_ref().map(|t| t.id) == Some(id) {
                current.set(None);
            }
        });
    }
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

#[component]
pub fn ToastProvider(children: Element) -> Element {
    let current = use_signal(|| None::<Toast>);
    let next_id = use_signal(|| 0u64);
    use_context_provider(|| Toasts { current, next_id });

    rsx! {
        {children}

        if let Some(toast) = current.read().as_ref() {
            div {
                class: match toast.kind {
                    ToastKind::Success => "toast toast-success",
                    ToastKind::Error => "toast toast-error",
                },
                role: "status",
                "{toast.message}"
            }
        }
    }
}
