//! Well-known role name constants.
//!
//! These must match the role names issued by the authentication layer.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
