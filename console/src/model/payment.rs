use std::fmt;

use kernel::model::payment::Payment;

use super::format_time;

pub struct PaymentView(pub Payment);

impl fmt::Display for PaymentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.0;
        write!(
            f,
            "#{:<5} reservation {:<5} ${:<9.2} {:<22} {} {}",
            p.payment_id,
            p.reservation_id,
            p.amount,
            p.method.label(),
            format_time(&p.paid_at),
            p.status
        )
    }
}
