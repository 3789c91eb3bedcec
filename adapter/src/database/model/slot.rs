use kernel::model::{
    id::{SlotId, UserId, VehicleId},
    slot::{Slot, SlotHolder, SlotState, SlotStatus},
    vehicle::VehicleType,
};

use super::{format_optional_timestamp, parse_field, parse_optional_timestamp, Record};

// slots.txt: id type status vehicle_id reserved_time user_id
// 空き枠は vehicle_id / user_id が 0、reserved_time が "-"
pub struct SlotRow(pub Slot);

impl Record for SlotRow {
    const FIELDS: usize = 6;

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        let slot_id = parse_field::<SlotId>(fields[0], "slot id")?;
        let slot_type = parse_field::<VehicleType>(fields[1], "slot type")?;
        let status = parse_field::<SlotStatus>(fields[2], "slot status")?;
        let vehicle_id = parse_field::<u32>(fields[3], "vehicle id")?;
        let reserved_at = parse_optional_timestamp(fields[4], "reserved time")?;
        let user_id = parse_field::<u32>(fields[5], "user id")?;

        let state = match status {
            SlotStatus::Available => {
                if vehicle_id != 0 || user_id != 0 || reserved_at.is_some() {
                    return Err(format!("slot {slot_id} is available but still has a holder"));
                }
                SlotState::Available
            }
            SlotStatus::Reserved | SlotStatus::Occupied => {
                let reserved_at = match (vehicle_id, user_id, reserved_at) {
                    (v, u, Some(at)) if v != 0 && u != 0 => at,
                    _ => {
                        return Err(format!(
                            "slot {slot_id} is {status} but has no complete holder"
                        ))
                    }
                };
                let holder = SlotHolder {
                    vehicle_id: VehicleId::new(vehicle_id),
                    user_id: UserId::new(user_id),
                    reserved_at,
                };
                if status == SlotStatus::Reserved {
                    SlotState::Reserved(holder)
                } else {
                    SlotState::Occupied(holder)
                }
            }
        };

        Ok(Self(Slot {
            slot_id,
            slot_type,
            state,
        }))
    }

    fn to_line(&self) -> String {
        let slot = &self.0;
        let holder = slot.holder();
        format!(
            "{} {} {} {} {} {}",
            slot.slot_id,
            slot.slot_type,
            slot.status(),
            holder.map(|h| h.vehicle_id.raw()).unwrap_or(0),
            format_optional_timestamp(holder.map(|h| &h.reserved_at)),
            holder.map(|h| h.user_id.raw()).unwrap_or(0),
        )
    }
}

impl From<SlotRow> for Slot {
    fn from(value: SlotRow) -> Self {
        value.0
    }
}
