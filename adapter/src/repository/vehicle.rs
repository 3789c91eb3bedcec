use derive_new::new;
use kernel::model::{
    id::{UserId, VehicleId},
    vehicle::{event::CreateVehicle, Vehicle},
};
use kernel::repository::vehicle::VehicleRepository;
use shared::error::{AppError, AppResult};

use crate::database::Database;

#[derive(new)]
pub struct VehicleRepositoryImpl {
    db: Database,
}

impl VehicleRepository for VehicleRepositoryImpl {
    fn create(&self, event: CreateVehicle) -> AppResult<VehicleId> {
        let mut tables = self.db.write();
        if !tables.users.contains_key(&event.user_id) {
            return Err(AppError::EntityNotFound(format!(
                "User {} not found",
                event.user_id
            )));
        }

        let vehicle_id = tables.next_vehicle_id();
        tables.vehicles.insert(
            vehicle_id,
            Vehicle {
                vehicle_id,
                user_id: event.user_id,
                vehicle_type: event.vehicle_type,
                license_plate: event.license_plate,
                color: event.color,
                registered_at: event.registered_at,
            },
        );
        tracing::info!(
            %vehicle_id,
            user_id = %event.user_id,
            vehicle_type = %event.vehicle_type,
            "vehicle registered"
        );
        Ok(vehicle_id)
    }

    fn find_by_id(&self, vehicle_id: VehicleId) -> AppResult<Option<Vehicle>> {
        Ok(self.db.read().vehicles.get(&vehicle_id).cloned())
    }

    fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Vehicle>> {
        Ok(self
            .db
            .read()
            .vehicles
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect())
    }

    fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.db.read().vehicles.values().cloned().collect())
    }
}
