//! Per-request identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a user, as resolved by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Returns the underlying id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The resolved caller of an operation.
///
/// Every operation that touches user-owned data takes one of these
/// explicitly; nothing reads identity from ambient state.
///
/// # Examples
///
/// ```
/// use marina::RequestContext;
///
/// let ctx = RequestContext::new(42.into());
/// assert_eq!(ctx.user_id.value(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// The authenticated user.
    pub user_id: UserId,
}

impl RequestContext {
    /// Creates a context for `user_id`.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
