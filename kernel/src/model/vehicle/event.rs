use crate::model::{id::UserId, vehicle::VehicleType};
use chrono::NaiveDateTime;
use derive_new::new;

#[derive(new)]
pub struct CreateVehicle {
    pub user_id: UserId,
    pub vehicle_type: VehicleType,
    pub license_plate: String,
    pub color: String,
    pub registered_at: NaiveDateTime,
}
