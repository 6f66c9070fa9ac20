//! Authentication context provider

use dioxus::prelude::*;

use super::server_fns::get_current_user;
use crate::types::AdminUser;

/// Operator state shared with every page
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub user: Signal<Option<AdminUser>>,
    /// True until the session has been checked once
    pub loading: Signal<bool>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    /// Reload the operator from the server session
    pub async fn refresh(mut self) {
        match get_current_user().await {
            Ok(user) => self.user.set(user),
            Err(e) => {
                tracing::warn!("Failed to load operator session: {}", e);
                self.user.set(None);
            }
        }
        self.loading.set(false);
    }

    pub fn set_user(mut self, user: AdminUser) {
        self.user.set(Some(user));
        self.loading.set(false);
    }

    pub fn clear(mut self) {
        self.user.set(None);
    }
}

/// Wraps the app and loads the operator once
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let user = use_signal(|| None::<AdminUser>);
    let loading = use_signal(|| true);

    let auth = use_context_provider(|| AuthContext { user, loading });

    use_hook(|| {
        spawn(async move {
            auth.refresh().await;
        })
    });

    children
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}
