use std::fmt;

use chrono::NaiveDateTime;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    vehicle::{event::CreateVehicle, Vehicle, VehicleType},
};

use super::{format_time, single_word};

#[derive(Debug, Validate, new)]
pub struct CreateVehicleRequest {
    #[garde(skip)]
    pub vehicle_type: VehicleType,
    #[garde(custom(single_word))]
    pub license_plate: String,
    #[garde(custom(single_word))]
    pub color: String,
}

#[derive(new)]
pub struct CreateVehicleRequestWithOwner(UserId, CreateVehicleRequest, NaiveDateTime);

impl From<CreateVehicleRequestWithOwner> for CreateVehicle {
    fn from(value: CreateVehicleRequestWithOwner) -> Self {
        let CreateVehicleRequestWithOwner(
            user_id,
            CreateVehicleRequest {
                vehicle_type,
                license_plate,
                color,
            },
            registered_at,
        ) = value;
        CreateVehicle {
            user_id,
            vehicle_type,
            license_plate,
            color,
            registered_at,
        }
    }
}

pub struct VehicleView(pub Vehicle);

impl fmt::Display for VehicleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.0;
        write!(
            f,
            "{:<6} {:<6} {:<16} {:<14} {:<10} {}",
            v.vehicle_id,
            v.user_id,
            v.vehicle_type.label(),
            v.license_plate,
            v.color,
            format_time(&v.registered_at)
        )
    }
}
