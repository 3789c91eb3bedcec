use std::collections::BTreeMap;

use kernel::model::{id::SlotId, reservation::Reservation, slot::Slot};

pub mod payment;
pub mod reservation;
pub mod slot;
pub mod user;
pub mod vehicle;

// 予約の取り消し時に、その予約が押さえている駐車枠を空きに戻す
pub(crate) fn release_slot(slots: &mut BTreeMap<SlotId, Slot>, reservation: &Reservation) {
    match slots.get_mut(&reservation.slot_id) {
        Some(slot)
            if slot
                .holder()
                .is_some_and(|h| h.vehicle_id == reservation.vehicle_id) =>
        {
            slot.release()
        }
        Some(slot) => tracing::warn!(
            slot_id = %slot.slot_id,
            reservation_id = %reservation.reservation_id,
            status = %slot.status(),
            "slot is not held by the cancelled reservation, leaving it unchanged"
        ),
        None => tracing::warn!(
            slot_id = %reservation.slot_id,
            reservation_id = %reservation.reservation_id,
            "cancelled reservation points at an unknown slot"
        ),
    }
}
