use crate::backend::domain::models::user::{
    User as DomainUser, UserRole as DomainUserRole,
};
use shared::{User as SharedUser, UserRole as SharedUserRole};

pub struct UserMapper;

impl UserMapper {
    /// Public view of an account; the credential fields never cross this
    /// boundary.
    pub fn to_dto(domain: DomainUser) -> SharedUser {
        SharedUser {
            id: domain.id,
            username: domain.username,
            display_name: domain.display_name,
            role: Self::role_to_dto(domain.role),
            created_at: domain.created_at,
        }
    }

    pub fn role_to_domain(dto_role: SharedUserRole) -> DomainUserRole {
        match dto_role {
            SharedUserRole::Admin => DomainUserRole::Admin,
            SharedUserRole::User => DomainUserRole::User,
        }
    }

    pub fn role_to_dto(domain_role: DomainUserRole) -> SharedUserRole {
        match domain_role {
            DomainUserRole::Admin => SharedUserRole::Admin,
            DomainUserRole::User => SharedUserRole::User,
        }
    }
}
