use chrono::NaiveDateTime;
use garde::Validate;
use kernel::model::{
    id::{UserId, VehicleId},
    report::FleetSummary,
    vehicle::Vehicle,
};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::vehicle::{CreateVehicleRequest, CreateVehicleRequestWithOwner};

pub fn register_vehicle(
    registry: &AppRegistry,
    user_id: UserId,
    req: CreateVehicleRequest,
    now: NaiveDateTime,
) -> AppResult<VehicleId> {
    req.validate()?;

    registry
        .vehicle_repository()
        .create(CreateVehicleRequestWithOwner::new(user_id, req, now).into())
}

pub fn show_my_vehicles(registry: &AppRegistry, user_id: UserId) -> AppResult<Vec<Vehicle>> {
    registry.vehicle_repository().find_by_user_id(user_id)
}

pub fn show_all_vehicles(registry: &AppRegistry) -> AppResult<(Vec<Vehicle>, FleetSummary)> {
    let vehicles = registry.vehicle_repository().find_all()?;
    let fleet = FleetSummary::from_vehicles(&vehicles);
    Ok((vehicles, fleet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handler::{
            fixture::{at, registry},
            user::register_user,
        },
        model::user::CreateUserRequest,
    };
    use kernel::model::vehicle::VehicleType;
    use shared::error::AppError;

    #[test]
    fn vehicles_are_listed_per_owner_and_in_the_fleet() {
        let registry = registry();
        let owner = register_user(
            &registry,
            CreateUserRequest::new(
                "Mina".into(),
                "01811111111".into(),
                "mina@mail.com".into(),
                "pw".into(),
            ),
            at(9, 0),
        )
        .unwrap();

        for (vehicle_type, plate) in [(VehicleType::Car, "DHA-1"), (VehicleType::Car, "DHA-2")] {
            register_vehicle(
                &registry,
                owner,
                CreateVehicleRequest::new(vehicle_type, plate.into(), "black".into()),
                at(9, 5),
            )
            .unwrap();
        }
        let rejected = register_vehicle(
            &registry,
            owner,
            CreateVehicleRequest::new(VehicleType::Bike, "DHA 3".into(), "black".into()),
            at(9, 6),
        );
        assert!(matches!(rejected, Err(AppError::ValidationError(_))));

        assert_eq!(show_my_vehicles(&registry, owner).unwrap().len(), 2);
        let (all, fleet) = show_all_vehicles(&registry).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(fleet.car, 2);
        assert_eq!(fleet.most_popular(), Some(VehicleType::Car));
    }
}
