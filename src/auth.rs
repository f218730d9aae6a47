//! Identity comes from the gateway in front of this service, which
//! authenticates the user and forwards `X-User-Id`, `X-Employee-Name` and
//! `X-Role`. This module only does the role check gating each operation.

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};

use crate::model::role::Role;

pub struct AuthUser {
    pub user_id: u64,
    pub employee_name: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned)
        };

        let user_id = match header("X-User-Id").and_then(|v| v.parse::<u64>().ok()) {
            Some(id) => id,
            None => return ready(Err(ErrorUnauthorized("Missing or invalid X-User-Id"))),
        };

        let role = match header("X-Role").and_then(|v| v.parse::<Role>().ok()) {
            Some(r) => r,
            None => return ready(Err(ErrorUnauthorized("Missing or invalid X-Role"))),
        };

        let employee_name = header("X-Employee-Name").unwrap_or_default();

        ready(Ok(AuthUser {
            user_id,
            employee_name,
            role,
        }))
    }
}

impl AuthUser {
    pub fn require_manager_or_admin(&self) -> actix_web::Result<()> {
        if matches!(self.role, Role::Admin | Role::Manager) {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Manager/Admin only"))
        }
    }

    pub fn require_hr_or_admin(&self) -> actix_web::Result<()> {
        if matches!(self.role, Role::Admin | Role::Hr) {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("HR/Admin only"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: 1,
            employee_name: "Test".into(),
            role,
        }
    }

    #[test]
    fn role_gates() {
        assert!(user(Role::Manager).require_manager_or_admin().is_ok());
        assert!(user(Role::Admin).require_manager_or_admin().is_ok());
        assert!(user(Role::Employee).require_manager_or_admin().is_err());
        assert!(user(Role::Hr).require_manager_or_admin().is_err());

        assert!(user(Role::Hr).require_hr_or_admin().is_ok());
        assert!(user(Role::Admin).require_hr_or_admin().is_ok());
        assert!(user(Role::Manager).require_hr_or_admin().is_err());
    }

    #[test]
    fn role_parses_from_header_values() {
        assert_eq!("hr".parse::<Role>().unwrap(), Role::Hr);
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert!("superuser".parse::<Role>().is_err());
    }
}
