use crate::model::{
    id::{ReservationId, SlotId, UserId, VehicleId},
    round_cents,
    vehicle::VehicleType,
};
use chrono::NaiveDateTime;
use strum::{AsRefStr, Display, EnumString};

pub mod event;

pub const MAX_DURATION_HOURS: f64 = 24.0;
pub const OVERSTAY_PENALTY_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ReservationStatus {
    Active,
    // 現状この状態へ遷移させる操作はない。読み込みと集計のみ
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub slot_id: SlotId,
    pub vehicle_id: VehicleId,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub status: ReservationStatus,
    pub duration_hours: f64,
    pub total_amount: f64,
}

impl Reservation {
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    pub fn cancel(&mut self, cancelled_at: NaiveDateTime) {
        self.status = ReservationStatus::Cancelled;
        self.end_time = Some(cancelled_at);
    }
}

pub fn is_valid_duration(duration_hours: f64) -> bool {
    duration_hours > 0.0 && duration_hours <= MAX_DURATION_HOURS
}

pub fn quote_amount(duration_hours: f64, vehicle_type: VehicleType) -> f64 {
    round_cents(duration_hours * vehicle_type.hourly_rate())
}

/// Advisory penalty for a reservation parked past its booked duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overstay {
    pub elapsed_hours: f64,
    pub overstay_hours: f64,
    pub additional_charge: f64,
}

impl Overstay {
    pub fn assess(
        reservation: &Reservation,
        slot_type: VehicleType,
        now: NaiveDateTime,
    ) -> Option<Overstay> {
        if !reservation.is_active() {
            return None;
        }
        let elapsed_hours = (now - reservation.start_time).num_seconds() as f64 / 3600.0;
        if elapsed_hours <= reservation.duration_hours {
            return None;
        }
        let overstay_hours = elapsed_hours - reservation.duration_hours;
        Some(Overstay {
            elapsed_hours,
            overstay_hours,
            additional_charge: overstay_hours
                * slot_type.hourly_rate()
                * OVERSTAY_PENALTY_MULTIPLIER,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverstayAlert {
    pub reservation: Reservation,
    pub slot_type: VehicleType,
    pub overstay: Overstay,
}
