use chrono::NaiveDateTime;
use garde::Validate;
use kernel::model::{
    id::{ReservationId, UserId},
    payment::Payment,
    reservation::Reservation,
    user::{
        event::{DeactivateUser, UpdateProfile},
        User, UserSearch,
    },
    vehicle::Vehicle,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::user::{
    AdminLoginRequest, CreateUserRequest, CreateUserRequestWithTime, LoginRequest,
    UpdateProfileRequest,
};

pub fn register_user(
    registry: &AppRegistry,
    req: CreateUserRequest,
    now: NaiveDateTime,
) -> AppResult<UserId> {
    req.validate()?;

    registry
        .user_repository()
        .create(CreateUserRequestWithTime::new(req, now).into())
}

pub fn login_user(registry: &AppRegistry, req: LoginRequest) -> AppResult<User> {
    registry
        .user_repository()
        .authenticate(&req.phone, &req.password)
}

pub fn login_admin(registry: &AppRegistry, req: AdminLoginRequest) -> AppResult<()> {
    // 資格情報が未設定なら管理者メニューは使えない
    let admin = registry
        .admin_config()
        .ok_or(AppError::ForbiddenOperation)?;
    if admin.matches(&req.username, &req.password) {
        Ok(())
    } else {
        Err(AppError::UnauthenticatedError)
    }
}

pub fn update_profile(
    registry: &AppRegistry,
    user_id: UserId,
    req: UpdateProfileRequest,
) -> AppResult<User> {
    req.validate()?;

    let user_repository = registry.user_repository();
    user_repository.update_profile(UpdateProfile::new(user_id, req.into()))?;
    find_user(registry, user_id)
}

pub fn find_user(registry: &AppRegistry, user_id: UserId) -> AppResult<User> {
    registry
        .user_repository()
        .find_by_id(user_id)
        .and_then(|user| match user {
            Some(user) => Ok(user),
            None => Err(AppError::EntityNotFound(format!("User {user_id} not found"))),
        })
}

pub fn show_user_list(registry: &AppRegistry) -> AppResult<Vec<User>> {
    registry.user_repository().find_all()
}

pub fn search_users(registry: &AppRegistry, query: UserSearch) -> AppResult<Vec<User>> {
    registry.user_repository().search(&query)
}

pub fn deactivate_user(
    registry: &AppRegistry,
    user_id: UserId,
    now: NaiveDateTime,
) -> AppResult<Vec<ReservationId>> {
    registry
        .user_repository()
        .deactivate(DeactivateUser::new(user_id, now))
}

pub struct UserHistory {
    pub user: User,
    pub vehicles: Vec<Vehicle>,
    pub reservations: Vec<Reservation>,
    pub payments: Vec<Payment>,
}

pub fn show_user_history(registry: &AppRegistry, user_id: UserId) -> AppResult<UserHistory> {
    Ok(UserHistory {
        user: find_user(registry, user_id)?,
        vehicles: registry.vehicle_repository().find_by_user_id(user_id)?,
        reservations: registry.reservation_repository().find_by_user_id(user_id)?,
        payments: registry.payment_repository().find_by_user_id(user_id)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handler::fixture::{app_config, at, registry},
        model::user::ProfileFieldKind,
    };
    use adapter::database::{Database, Tables};

    fn rahim() -> CreateUserRequest {
        CreateUserRequest::new(
            "Rahim".into(),
            "01712345678".into(),
            "rahim@mail.com".into(),
            "pw".into(),
        )
    }

    #[test]
    fn register_then_login() {
        let registry = registry();
        let user_id = register_user(&registry, rahim(), at(9, 0)).unwrap();
        let user = login_user(
            &registry,
            LoginRequest::new("01712345678".into(), "pw".into()),
        )
        .unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.registered_at, at(9, 0));
    }

    #[test]
    fn malformed_registration_is_not_stored() {
        let registry = registry();
        let mut req = rahim();
        req.phone = "12345".into();
        assert!(matches!(
            register_user(&registry, req, at(9, 0)),
            Err(AppError::ValidationError(_))
        ));
        assert!(show_user_list(&registry).unwrap().is_empty());
    }

    #[test]
    fn admin_login_is_disabled_without_credentials() {
        let registry = registry();
        let req = AdminLoginRequest::new("admin".into(), "123".into());
        assert!(login_admin(&registry, req).is_ok());
        assert!(matches!(
            login_admin(&registry, AdminLoginRequest::new("admin".into(), "1234".into())),
            Err(AppError::UnauthenticatedError)
        ));

        let locked = AppRegistry::new(
            Database::in_memory(Tables::with_initial_slots()),
            app_config(false),
        );
        assert!(matches!(
            login_admin(&locked, AdminLoginRequest::new("admin".into(), "123".into())),
            Err(AppError::ForbiddenOperation)
        ));
    }

    #[test]
    fn profile_update_returns_the_new_profile() {
        let registry = registry();
        let user_id = register_user(&registry, rahim(), at(9, 0)).unwrap();
        let user = update_profile(
            &registry,
            user_id,
            UpdateProfileRequest::new(ProfileFieldKind::Email, "rahim@park.org".into()),
        )
        .unwrap();
        assert_eq!(user.email, "rahim@park.org");

        let invalid = update_profile(
            &registry,
            user_id,
            UpdateProfileRequest::new(ProfileFieldKind::Email, "nope".into()),
        );
        assert!(matches!(invalid, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn history_of_unknown_user_is_not_found() {
        let registry = registry();
        assert!(matches!(
            show_user_history(&registry, UserId::new(3)),
            Err(AppError::EntityNotFound(_))
        ));
    }
}
