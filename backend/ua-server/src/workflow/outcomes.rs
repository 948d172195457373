use ua_core::User;

/// Successful password login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Identity asserted by an external provider
#[derive(Debug, Clone, Default)]
pub struct OAuthCallbackInput {
    pub provider: String,
    pub provider_account_id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct OAuthOutcome {
    pub user: User,
    /// True when this call created the identity link
    pub is_new_user: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub bio: &'static str,
}
