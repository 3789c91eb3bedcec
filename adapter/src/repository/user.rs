use derive_new::new;
use kernel::model::{
    id::{ReservationId, UserId},
    user::{
        event::{CreateUser, DeactivateUser, ProfileField, UpdateProfile},
        User, UserSearch,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::{
    database::{Database, Tables},
    repository::release_slot,
};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: Database,
}

impl UserRepository for UserRepositoryImpl {
    fn create(&self, event: CreateUser) -> AppResult<UserId> {
        let mut tables = self.db.write();

        ensure_unique(&tables, None, Some(&event.phone), Some(&event.email))?;

        let user_id = tables.next_user_id();
        tables.users.insert(
            user_id,
            User {
                user_id,
                name: event.name,
                phone: event.phone,
                email: event.email,
                password: event.password,
                registered_at: event.registered_at,
                is_active: true,
            },
        );
        tracing::info!(%user_id, "user registered");
        Ok(user_id)
    }

    fn authenticate(&self, phone: &str, password: &str) -> AppResult<User> {
        self.db
            .read()
            .users
            .values()
            .find(|u| u.phone == phone && u.password == password && u.is_active)
            .cloned()
            .ok_or(AppError::UnauthenticatedError)
    }

    fn update_profile(&self, event: UpdateProfile) -> AppResult<()> {
        let mut tables = self.db.write();
        if !tables.users.contains_key(&event.user_id) {
            return Err(user_not_found(event.user_id));
        }

        match &event.field {
            ProfileField::Phone(phone) => {
                ensure_unique(&tables, Some(event.user_id), Some(phone), None)?
            }
            ProfileField::Email(email) => {
                ensure_unique(&tables, Some(event.user_id), None, Some(email))?
            }
            ProfileField::Name(_) | ProfileField::Password(_) => {}
        }

        let Some(user) = tables.users.get_mut(&event.user_id) else {
            return Err(user_not_found(event.user_id));
        };
        match event.field {
            ProfileField::Name(name) => user.name = name,
            ProfileField::Phone(phone) => user.phone = phone,
            ProfileField::Email(email) => user.email = email,
            ProfileField::Password(password) => user.password = password,
        }
        tracing::info!(user_id = %event.user_id, "profile updated");
        Ok(())
    }

    fn deactivate(&self, event: DeactivateUser) -> AppResult<Vec<ReservationId>> {
        let mut guard = self.db.write();
        let tables = &mut *guard;

        let user = tables
            .users
            .get_mut(&event.user_id)
            .ok_or_else(|| user_not_found(event.user_id))?;
        if !user.is_active {
            return Err(AppError::UnprocessableEntity(format!(
                "User {} is already deactivated",
                event.user_id
            )));
        }
        user.is_active = false;

        // 無効化したユーザーの有効な予約はすべて取り消し、駐車枠を解放する
        let mut cancelled = Vec::new();
        for reservation in tables
            .reservations
            .values_mut()
            .filter(|r| r.user_id == event.user_id && r.is_active())
        {
            reservation.cancel(event.deactivated_at);
            release_slot(&mut tables.slots, reservation);
            cancelled.push(reservation.reservation_id);
        }

        tracing::info!(
            user_id = %event.user_id,
            cancelled_reservations = cancelled.len(),
            "user deactivated"
        );
        Ok(cancelled)
    }

    fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.db.read().users.get(&user_id).cloned())
    }

    fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.db.read().users.values().cloned().collect())
    }

    fn search(&self, query: &UserSearch) -> AppResult<Vec<User>> {
        Ok(self
            .db
            .read()
            .users
            .values()
            .filter(|u| query.matches(u))
            .cloned()
            .collect())
    }
}

fn user_not_found(user_id: UserId) -> AppError {
    AppError::EntityNotFound(format!("User {user_id} not found"))
}

// 自分自身 (except) 以外に同じ電話番号・メールアドレスのユーザーがいないか確認する
fn ensure_unique(
    tables: &Tables,
    except: Option<UserId>,
    phone: Option<&String>,
    email: Option<&String>,
) -> AppResult<()> {
    let others = || {
        tables
            .users
            .values()
            .filter(move |u| Some(u.user_id) != except)
    };
    if let Some(phone) = phone {
        if others().any(|u| &u.phone == phone) {
            return Err(AppError::UnprocessableEntity(
                "Phone number already registered".into(),
            ));
        }
    }
    if let Some(email) = email {
        if others().any(|u| &u.email == email) {
            return Err(AppError::UnprocessableEntity(
                "Email already registered".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        fixture::{at, seeded},
        reservation::ReservationRepositoryImpl,
    };
    use kernel::{
        model::{
            id::{SlotId, VehicleId},
            reservation::{event::CreateReservation, ReservationStatus},
            slot::SlotStatus,
        },
        repository::reservation::ReservationRepository,
    };

    fn create_event(phone: &str, email: &str) -> CreateUser {
        CreateUser::new(
            "Karim".into(),
            phone.into(),
            email.into(),
            "pw".into(),
            at(9, 0),
        )
    }

    #[test]
    fn register_assigns_next_id_and_activates() {
        let db = seeded();
        let repo = UserRepositoryImpl::new(db.clone());

        let user_id = repo
            .create(create_event("01799999999", "karim@mail.com"))
            .unwrap();
        assert_eq!(user_id, UserId::new(7));

        let user = repo.find_by_id(user_id).unwrap().unwrap();
        assert!(user.is_active);
        assert_eq!(user.name, "Karim");
    }

    #[test]
    fn register_rejects_duplicate_phone_and_email() {
        let repo = UserRepositoryImpl::new(seeded());

        let dup_phone = repo.create(create_event("01700000005", "new@mail.com"));
        assert!(matches!(dup_phone, Err(AppError::UnprocessableEntity(m)) if m.contains("Phone")));

        let dup_email = repo.create(create_event("01799999999", "five@mail.com"));
        assert!(matches!(dup_email, Err(AppError::UnprocessableEntity(m)) if m.contains("Email")));

        assert_eq!(repo.find_all().unwrap().len(), 2);
    }

    #[test]
    fn authenticate_requires_active_account() {
        let repo = UserRepositoryImpl::new(seeded());
        let user = repo.authenticate("01700000005", "secret").unwrap();
        assert_eq!(user.user_id, UserId::new(5));

        assert!(matches!(
            repo.authenticate("01700000005", "wrong"),
            Err(AppError::UnauthenticatedError)
        ));

        repo.deactivate(DeactivateUser::new(UserId::new(5), at(10, 0)))
            .unwrap();
        assert!(matches!(
            repo.authenticate("01700000005", "secret"),
            Err(AppError::UnauthenticatedError)
        ));
    }

    #[test]
    fn profile_update_keeps_own_phone_but_rejects_others() {
        let repo = UserRepositoryImpl::new(seeded());
        let five = UserId::new(5);

        repo.update_profile(UpdateProfile::new(
            five,
            ProfileField::Phone("01700000005".into()),
        ))
        .unwrap();

        let taken = repo.update_profile(UpdateProfile::new(
            five,
            ProfileField::Email("six@mail.com".into()),
        ));
        assert!(matches!(taken, Err(AppError::UnprocessableEntity(_))));

        repo.update_profile(UpdateProfile::new(five, ProfileField::Name("Nila".into())))
            .unwrap();
        assert_eq!(repo.find_by_id(five).unwrap().unwrap().name, "Nila");
    }

    #[test]
    fn deactivation_cancels_every_active_reservation_and_frees_slots() {
        let db = seeded();
        let users = UserRepositoryImpl::new(db.clone());
        let reservations = ReservationRepositoryImpl::new(db.clone());
        let five = UserId::new(5);

        let bike = reservations
            .create(CreateReservation::new(
                five,
                VehicleId::new(12),
                SlotId::new(1),
                2.0,
                at(9, 0),
            ))
            .unwrap();
        let car = reservations
            .create(CreateReservation::new(
                five,
                VehicleId::new(13),
                SlotId::new(41),
                1.0,
                at(9, 5),
            ))
            .unwrap();

        let cancelled = users
            .deactivate(DeactivateUser::new(five, at(11, 0)))
            .unwrap();
        assert_eq!(cancelled, vec![bike, car]);

        let tables = db.read();
        assert!(!tables.users[&five].is_active);
        for id in [bike, car] {
            let r = &tables.reservations[&id];
            assert_eq!(r.status, ReservationStatus::Cancelled);
            assert_eq!(r.end_time, Some(at(11, 0)));
        }
        assert_eq!(tables.slots[&SlotId::new(1)].status(), SlotStatus::Available);
        assert_eq!(tables.slots[&SlotId::new(41)].status(), SlotStatus::Available);
    }

    #[test]
    fn deactivating_twice_is_an_error() {
        let repo = UserRepositoryImpl::new(seeded());
        let six = UserId::new(6);
        assert!(repo
            .deactivate(DeactivateUser::new(six, at(10, 0)))
            .unwrap()
            .is_empty());
        let again = repo.deactivate(DeactivateUser::new(six, at(10, 1)));
        assert!(
            matches!(again, Err(AppError::UnprocessableEntity(m)) if m.contains("already deactivated"))
        );
    }

    #[test]
    fn search_matches_substrings_and_ids() {
        let repo = UserRepositoryImpl::new(seeded());
        assert_eq!(repo.search(&UserSearch::Email("mail.com".into())).unwrap().len(), 2);
        assert_eq!(repo.search(&UserSearch::Phone("06".into())).unwrap().len(), 1);
        assert_eq!(repo.search(&UserSearch::Id(UserId::new(6))).unwrap()[0].name, "user6");
        assert!(repo.search(&UserSearch::Name("zzz".into())).unwrap().is_empty());
    }
}
