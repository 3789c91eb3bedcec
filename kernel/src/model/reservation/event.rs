use crate::model::{
    actor::Actor,
    id::{ReservationId, SlotId, UserId, VehicleId},
};
use chrono::NaiveDateTime;
use derive_new::new;

#[derive(new)]
pub struct CreateReservation {
    pub user_id: UserId,
    pub vehicle_id: VehicleId,
    pub slot_id: SlotId,
    pub duration_hours: f64,
    pub reserved_at: NaiveDateTime,
}

#[derive(new)]
pub struct CancelReservation {
    pub reservation_id: ReservationId,
    pub requested_by: Actor,
    pub cancelled_at: NaiveDateTime,
}
