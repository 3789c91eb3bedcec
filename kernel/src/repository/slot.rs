use crate::model::{
    id::SlotId,
    slot::Slot,
    vehicle::VehicleType,
};
use shared::error::AppResult;

pub trait SlotRepository {
    fn find_all(&self) -> AppResult<Vec<Slot>>;
    fn find_by_id(&self, slot_id: SlotId) -> AppResult<Option<Slot>>;
    fn find_available_by_type(&self, slot_type: VehicleType) -> AppResult<Vec<Slot>>;
}
