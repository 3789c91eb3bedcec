use crate::model::id::{PaymentId, ReservationId, UserId};
use chrono::NaiveDateTime;
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Bkash,
    Nagad,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash Payment",
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::Bkash => "bKash Mobile Payment",
            PaymentMethod::Nagad => "Nagad Mobile Payment",
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, PaymentMethod::Bkash | PaymentMethod::Nagad)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub user_id: UserId,
    pub reservation_id: ReservationId,
    pub amount: f64,
    pub method: PaymentMethod,
    pub paid_at: NaiveDateTime,
    pub status: PaymentStatus,
}

impl Payment {
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}
