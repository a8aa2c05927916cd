//! Session accessor: resolves the authenticated identity of a request

use crate::contract::{MarketplaceError, Session};

/// Verifies a session token issued by the authentication provider
pub trait SessionResolver: Send + Sync {
    /// Returns `None` for a missing, malformed or expired token
    fn resolve(&self, token: &str) -> Option<Session>;
}

/// Fail with `Unauthorized` when no session is present
pub fn require_auth(session: Option<Session>) -> Result<Session, MarketplaceError> {
    session.ok_or(MarketplaceError::Unauthorized)
}

/// Like [`require_auth`], additionally requiring a storefront-managing role
pub fn require_partner_auth(session: Option<Session>) -> Result<Session, MarketplaceError> {
    let session = require_auth(session)?;
    if !session.role.can_manage_storefront() {
        tracing::warn!(user_id = %session.user_id, role = session.role.as_str(), "Partner access denied");
        return Err(MarketplaceError::forbidden("partner area", session.user_id));
    }
    Ok(session)
}
