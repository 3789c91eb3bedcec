use crate::model::{
    id::{SlotId, UserId, VehicleId},
    vehicle::VehicleType,
};
use chrono::NaiveDateTime;
use strum::{AsRefStr, Display, EnumString, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Reserved,
    Occupied,
}

/// Who holds a slot that is not available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotHolder {
    pub vehicle_id: VehicleId,
    pub user_id: UserId,
    pub reserved_at: NaiveDateTime,
}

// 空き枠には保持者が存在しない
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Available,
    Reserved(SlotHolder),
    Occupied(SlotHolder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub slot_id: SlotId,
    pub slot_type: VehicleType,
    pub state: SlotState,
}

impl Slot {
    /// Fresh lot: bikes first, then cars, then trucks, numbered contiguously from 1.
    pub fn initial_layout() -> Vec<Slot> {
        let mut slot_id = SlotId::FIRST;
        let mut slots = Vec::new();
        for slot_type in VehicleType::iter() {
            for _ in 0..slot_type.capacity() {
                slots.push(Slot {
                    slot_id,
                    slot_type,
                    state: SlotState::Available,
                });
                slot_id = slot_id.next();
            }
        }
        slots
    }

    pub fn status(&self) -> SlotStatus {
        match self.state {
            SlotState::Available => SlotStatus::Available,
            SlotState::Reserved(_) => SlotStatus::Reserved,
            SlotState::Occupied(_) => SlotStatus::Occupied,
        }
    }

    pub fn holder(&self) -> Option<&SlotHolder> {
        match &self.state {
            SlotState::Available => None,
            SlotState::Reserved(holder) | SlotState::Occupied(holder) => Some(holder),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, SlotState::Available)
    }

    pub fn reserve(&mut self, holder: SlotHolder) {
        self.state = SlotState::Reserved(holder);
    }

    /// Marks a reserved slot as paid. A slot that is not reserved is left as is.
    pub fn occupy(&mut self) {
        if let SlotState::Reserved(holder) = self.state {
            self.state = SlotState::Occupied(holder);
        }
    }

    pub fn release(&mut self) {
        self.state = SlotState::Available;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn holder() -> SlotHolder {
        SlotHolder {
            vehicle_id: VehicleId::new(12),
            user_id: UserId::new(5),
            reserved_at: NaiveDate::from_ymd_opt(2025, 1, 2)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn initial_layout_is_contiguous_by_type() {
        let slots = Slot::initial_layout();
        assert_eq!(slots.len(), 100);
        assert_eq!(slots[0].slot_id, SlotId::new(1));
        assert_eq!(slots[39].slot_type, VehicleType::Bike);
        assert_eq!(slots[40].slot_id, SlotId::new(41));
        assert_eq!(slots[40].slot_type, VehicleType::Car);
        assert_eq!(slots[80].slot_type, VehicleType::Truck);
        assert_eq!(slots[99].slot_id, SlotId::new(100));
        assert!(slots.iter().all(Slot::is_available));
    }

    #[test]
    fn holder_exists_only_when_not_available() {
        let mut slot = Slot::initial_layout().remove(0);
        assert!(slot.holder().is_none());

        slot.reserve(holder());
        assert_eq!(slot.status(), SlotStatus::Reserved);
        assert_eq!(slot.holder().map(|h| h.user_id), Some(UserId::new(5)));

        slot.occupy();
        assert_eq!(slot.status(), SlotStatus::Occupied);
        assert!(slot.holder().is_some());

        slot.release();
        assert_eq!(slot.status(), SlotStatus::Available);
        assert!(slot.holder().is_none());
    }

    #[test]
    fn occupy_does_not_touch_an_available_slot() {
        let mut slot = Slot::initial_layout().remove(0);
        slot.occupy();
        assert_eq!(slot.status(), SlotStatus::Available);
    }
}
