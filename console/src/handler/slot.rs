use kernel::model::{slot::Slot, vehicle::VehicleType};
use registry::AppRegistry;
use shared::error::AppResult;

pub fn show_available_slots(
    registry: &AppRegistry,
    slot_type: VehicleType,
) -> AppResult<Vec<Slot>> {
    registry.slot_repository().find_available_by_type(slot_type)
}

pub fn show_slot_list(registry: &AppRegistry) -> AppResult<Vec<Slot>> {
    registry.slot_repository().find_all()
}
