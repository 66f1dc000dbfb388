//! Static role requirements for protected endpoints.

use crate::models::Role;

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const STAFF: &[Role] = &[Role::Admin, Role::Teacher];

pub fn check(role: Role, required: &[Role]) -> bool {
    required.contains(&role)
}
