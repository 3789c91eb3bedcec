use std::fmt;

use chrono::NaiveDateTime;
use derive_new::new;
use kernel::model::{
    id::{SlotId, UserId, VehicleId},
    reservation::{event::CreateReservation, OverstayAlert, Reservation},
};

use super::format_time;

// 時間の範囲は台帳側で検証する
#[derive(Debug, new)]
pub struct CreateReservationRequest {
    pub vehicle_id: VehicleId,
    pub slot_id: SlotId,
    pub duration_hours: f64,
}

#[derive(new)]
pub struct CreateReservationRequestWithUser(UserId, CreateReservationRequest, NaiveDateTime);

impl From<CreateReservationRequestWithUser> for CreateReservation {
    fn from(value: CreateReservationRequestWithUser) -> Self {
        let CreateReservationRequestWithUser(
            user_id,
            CreateReservationRequest {
                vehicle_id,
                slot_id,
                duration_hours,
            },
            reserved_at,
        ) = value;
        CreateReservation {
            user_id,
            vehicle_id,
            slot_id,
            duration_hours,
            reserved_at,
        }
    }
}

pub struct ReservationView(pub Reservation);

impl fmt::Display for ReservationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.0;
        write!(
            f,
            "#{:<5} slot {:<4} vehicle {:<5} {} -> {:<17} {:<10} {:>5.2}h ${:.2}",
            r.reservation_id,
            r.slot_id,
            r.vehicle_id,
            format_time(&r.start_time),
            r.end_time.as_ref().map(format_time).unwrap_or_else(|| "-".into()),
            r.status,
            r.duration_hours,
            r.total_amount
        )
    }
}

pub struct OverstayView(pub OverstayAlert);

impl fmt::Display for OverstayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let OverstayAlert {
            reservation,
            slot_type,
            overstay,
        } = &self.0;
        write!(
            f,
            "Reservation #{} (user {}, slot {} {}): booked {:.2}h, parked {:.2}h, over by {:.2}h, additional charge ${:.2}",
            reservation.reservation_id,
            reservation.user_id,
            reservation.slot_id,
            slot_type.label(),
            reservation.duration_hours,
            overstay.elapsed_hours,
            overstay.overstay_hours,
            overstay.additional_charge
        )
    }
}
