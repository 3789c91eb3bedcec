use crate::model::{
    id::{UserId, VehicleId},
    vehicle::{event::CreateVehicle, Vehicle},
};
use shared::error::AppResult;

pub trait VehicleRepository {
    fn create(&self, event: CreateVehicle) -> AppResult<VehicleId>;
    fn find_by_id(&self, vehicle_id: VehicleId) -> AppResult<Option<Vehicle>>;
    fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Vehicle>>;
    fn find_all(&self) -> AppResult<Vec<Vehicle>>;
}
