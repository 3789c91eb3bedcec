use crate::model::id::{UserId, VehicleId};
use chrono::NaiveDateTime;
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum VehicleType {
    Bike,
    Car,
    Truck,
}

impl VehicleType {
    /// Flat hourly tariff; there is no peak pricing.
    pub fn hourly_rate(self) -> f64 {
        match self {
            VehicleType::Bike => 10.0,
            VehicleType::Car => 20.0,
            VehicleType::Truck => 50.0,
        }
    }

    /// Number of slots of this type in the lot.
    pub fn capacity(self) -> u32 {
        match self {
            VehicleType::Bike => 40,
            VehicleType::Car => 40,
            VehicleType::Truck => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Bike => "Bike/Motorcycle",
            VehicleType::Car => "Car/SUV",
            VehicleType::Truck => "Truck/Van",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub vehicle_id: VehicleId,
    pub user_id: UserId,
    pub vehicle_type: VehicleType,
    pub license_plate: String,
    pub color: String,
    pub registered_at: NaiveDateTime,
}
