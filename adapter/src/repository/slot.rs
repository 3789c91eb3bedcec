use derive_new::new;
use kernel::model::{id::SlotId, slot::Slot, vehicle::VehicleType};
use kernel::repository::slot::SlotRepository;
use shared::error::AppResult;

use crate::database::Database;

#[derive(new)]
pub struct SlotRepositoryImpl {
    db: Database,
}

impl SlotRepository for SlotRepositoryImpl {
    fn find_all(&self) -> AppResult<Vec<Slot>> {
        Ok(self.db.read().slots.values().cloned().collect())
    }

    fn find_by_id(&self, slot_id: SlotId) -> AppResult<Option<Slot>> {
        Ok(self.db.read().slots.get(&slot_id).cloned())
    }

    fn find_available_by_type(&self, slot_type: VehicleType) -> AppResult<Vec<Slot>> {
        Ok(self
            .db
            .read()
            .slots
            .values()
            .filter(|s| s.slot_type == slot_type && s.is_available())
            .cloned()
            .collect())
    }
}
