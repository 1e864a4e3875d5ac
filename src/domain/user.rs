use crate::domain::id::UserId;
use crate::domain::resource::ResourceCategory;

/// The caller's role as reported by the (external) auth collaborator.
///
/// The booking engine never manages accounts or sessions; it only consumes
/// the capability implied by the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Standard,
    Vip,
    Owner,
    Admin,
}

impl UserRole {
    pub fn parse(value: &str) -> Option<UserRole> {
        match value.to_ascii_lowercase().as_str() {
            "standard" => Some(UserRole::Standard),
            "vip" => Some(UserRole::Vip),
            "owner" => Some(UserRole::Owner),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// Identity and capability of the user on whose behalf a request runs.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: UserId,
    pub role: UserRole,
}

impl UserContext {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        UserContext { user_id, role }
    }

    /// Capability check consumed by the scheduler: VIP rigs require an
    /// elevated role, standard rigs are open to everyone.
    pub fn can_access(&self, category: ResourceCategory) -> bool {
        match category {
            ResourceCategory::Standard => true,
            ResourceCategory::Vip => matches!(self.role, UserRole::Vip | UserRole::Owner | UserRole::Admin),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
