use kernel::model::{
    id::{PaymentId, ReservationId, UserId},
    payment::{Payment, PaymentMethod, PaymentStatus},
};

use super::{format_timestamp, parse_field, parse_timestamp, Record};

// payments.txt: id user_id reservation_id amount method payment_date status
pub struct PaymentRow(pub Payment);

impl Record for PaymentRow {
    const FIELDS: usize = 7;

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        Ok(Self(Payment {
            payment_id: parse_field::<PaymentId>(fields[0], "payment id")?,
            user_id: parse_field::<UserId>(fields[1], "user id")?,
            reservation_id: parse_field::<ReservationId>(fields[2], "reservation id")?,
            amount: parse_field::<f64>(fields[3], "amount")?,
            method: parse_field::<PaymentMethod>(fields[4], "payment method")?,
            paid_at: parse_timestamp(fields[5], "payment date")?,
            status: parse_field::<PaymentStatus>(fields[6], "payment status")?,
        }))
    }

    fn to_line(&self) -> String {
        let p = &self.0;
        format!(
            "{} {} {} {:.2} {} {} {}",
            p.payment_id,
            p.user_id,
            p.reservation_id,
            p.amount,
            p.method,
            format_timestamp(&p.paid_at),
            p.status
        )
    }
}

impl From<PaymentRow> for Payment {
    fn from(value: PaymentRow) -> Self {
        value.0
    }
}
