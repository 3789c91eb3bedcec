use kernel::model::{
    id::{UserId, VehicleId},
    vehicle::{Vehicle, VehicleType},
};

use super::{format_timestamp, parse_field, parse_timestamp, Record};

// vehicles.txt: id user_id type license_plate color reg_date
pub struct VehicleRow(pub Vehicle);

impl Record for VehicleRow {
    const FIELDS: usize = 6;

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        Ok(Self(Vehicle {
            vehicle_id: parse_field::<VehicleId>(fields[0], "vehicle id")?,
            user_id: parse_field::<UserId>(fields[1], "owner id")?,
            vehicle_type: parse_field::<VehicleType>(fields[2], "vehicle type")?,
            license_plate: fields[3].to_string(),
            color: fields[4].to_string(),
            registered_at: parse_timestamp(fields[5], "registration date")?,
        }))
    }

    fn to_line(&self) -> String {
        let v = &self.0;
        format!(
            "{} {} {} {} {} {}",
            v.vehicle_id,
            v.user_id,
            v.vehicle_type,
            v.license_plate,
            v.color,
            format_timestamp(&v.registered_at)
        )
    }
}

impl From<VehicleRow> for Vehicle {
    fn from(value: VehicleRow) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_vehicle_type() {
        let err = VehicleRow::parse_line("1 1 bus DHA-11 red 2025-01-15_10:30:00")
            .err()
            .unwrap();
        assert!(err.contains("vehicle type"));
    }
}
