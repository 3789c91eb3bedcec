use kernel::model::{
    id::{ReservationId, SlotId, UserId, VehicleId},
    reservation::{Reservation, ReservationStatus},
};

use super::{
    format_optional_timestamp, format_timestamp, parse_field, parse_optional_timestamp,
    parse_timestamp, Record,
};

// reservations.txt:
// id user_id slot_id vehicle_id start_time end_time status duration_hours total_amount
pub struct ReservationRow(pub Reservation);

impl Record for ReservationRow {
    const FIELDS: usize = 9;

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        Ok(Self(Reservation {
            reservation_id: parse_field::<ReservationId>(fields[0], "reservation id")?,
            user_id: parse_field::<UserId>(fields[1], "user id")?,
            slot_id: parse_field::<SlotId>(fields[2], "slot id")?,
            vehicle_id: parse_field::<VehicleId>(fields[3], "vehicle id")?,
            start_time: parse_timestamp(fields[4], "start time")?,
            end_time: parse_optional_timestamp(fields[5], "end time")?,
            status: parse_field::<ReservationStatus>(fields[6], "reservation status")?,
            duration_hours: parse_field::<f64>(fields[7], "duration")?,
            total_amount: parse_field::<f64>(fields[8], "total amount")?,
        }))
    }

    fn to_line(&self) -> String {
        let r = &self.0;
        format!(
            "{} {} {} {} {} {} {} {:.2} {:.2}",
            r.reservation_id,
            r.user_id,
            r.slot_id,
            r.vehicle_id,
            format_timestamp(&r.start_time),
            format_optional_timestamp(r.end_time.as_ref()),
            r.status,
            r.duration_hours,
            r.total_amount
        )
    }
}

impl From<ReservationRow> for Reservation {
    fn from(value: ReservationRow) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_reservation_writes_placeholder_end_time() {
        let line = "4 5 1 12 2025-02-01_08:15:00 - active 3.00 30.00";
        let reservation: Reservation = ReservationRow::parse_line(line).unwrap().into();
        assert_eq!(reservation.end_time, None);
        assert_eq!(reservation.status, ReservationStatus::Active);
        assert_eq!(reservation.total_amount, 30.0);
        assert_eq!(ReservationRow(reservation).to_line(), line);
    }

    #[test]
    fn reads_completed_status() {
        let line = "4 5 1 12 2025-02-01_08:15:00 2025-02-01_11:15:00 completed 3.00 30.00";
        let reservation: Reservation = ReservationRow::parse_line(line).unwrap().into();
        assert_eq!(reservation.status, ReservationStatus::Completed);
        assert!(reservation.end_time.is_some());
    }

    #[test]
    fn rejects_short_lines() {
        let err = ReservationRow::parse_line("4 5 1 12 2025-02-01_08:15:00 active 3.00 30.00")
            .err()
            .unwrap();
        assert!(err.contains("expected 9 fields"));
    }
}
