//! Auth service
//!
//! Lets the back office check an operator's token before starting a session.

use restate_sdk::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::common::auth::restate_auth::require_admin;
use crate::common::EmptyRequest;
use crate::impl_restate_serde;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub email: String,
    pub is_admin: bool,
}

impl_restate_serde!(AdminIdentity);

#[restate_sdk::service]
#[name = "Auth"]
pub trait AuthService {
    /// Identity behind the caller's admin token
    async fn whoami(req: EmptyRequest) -> Result<AdminIdentity, HandlerError>;
}

pub struct AuthServiceImpl {
    deps: Arc<ServerDeps>,
}

impl AuthServiceImpl {
    pub fn with_deps(deps: Arc<ServerDeps>) -> Self {
        Self { deps }
    }
}

impl AuthService for AuthServiceImpl {
    async fn whoami(
        &self,
        ctx: Context<'_>,
        _req: EmptyRequest,
    ) -> Result<AdminIdentity, HandlerError> {
        let user = require_admin(ctx.headers(), &self.deps.jwt_service)?;
        tracing::info!(admin = %user.email, "Auth/whoami");

        Ok(AdminIdentity {
            email: user.email,
            is_admin: user.is_admin,
        })
    }
}
