//! Read-only aggregations behind the history and report screens.
//!
//! Nothing here mutates ledger state; every report is rebuilt from the
//! current collections each time it is shown.

use crate::model::{
    payment::{Payment, PaymentMethod},
    reservation::{Reservation, ReservationStatus},
    slot::{Slot, SlotStatus},
    user::User,
    vehicle::{Vehicle, VehicleType},
};
use strum::{Display, IntoEnumIterator};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BookingSummary {
    pub active: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl BookingSummary {
    pub fn from_reservations<'a>(reservations: impl IntoIterator<Item = &'a Reservation>) -> Self {
        reservations
            .into_iter()
            .fold(Self::default(), |mut acc, r| {
                match r.status {
                    ReservationStatus::Active => acc.active += 1,
                    ReservationStatus::Completed => acc.completed += 1,
                    ReservationStatus::Cancelled => acc.cancelled += 1,
                }
                acc
            })
    }

    pub fn total(&self) -> usize {
        self.active + self.completed + self.cancelled
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PaymentSummary {
    /// Sum over completed payments only.
    pub total_paid: f64,
    pub transactions: usize,
    pub cash: usize,
    pub card: usize,
    pub mobile: usize,
}

impl PaymentSummary {
    pub fn from_payments<'a>(payments: impl IntoIterator<Item = &'a Payment>) -> Self {
        payments.into_iter().fold(Self::default(), |mut acc, p| {
            acc.transactions += 1;
            if p.is_completed() {
                acc.total_paid += p.amount;
                match p.method {
                    PaymentMethod::Cash => acc.cash += 1,
                    PaymentMethod::Card => acc.card += 1,
                    PaymentMethod::Bkash | PaymentMethod::Nagad => acc.mobile += 1,
                }
            }
            acc
        })
    }

    pub fn average(&self) -> f64 {
        average(self.total_paid, self.transactions)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CustomerTier {
    Premium,
    Gold,
    Silver,
    Regular,
}

impl CustomerTier {
    pub fn from_total_paid(total_paid: f64) -> Self {
        if total_paid >= 500.0 {
            CustomerTier::Premium
        } else if total_paid >= 200.0 {
            CustomerTier::Gold
        } else if total_paid >= 100.0 {
            CustomerTier::Silver
        } else {
            CustomerTier::Regular
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserReport {
    pub bookings: BookingSummary,
    pub payments: PaymentSummary,
    pub vehicle_count: usize,
    pub booking_value: f64,
}

impl UserReport {
    pub fn build(vehicles: &[Vehicle], reservations: &[Reservation], payments: &[Payment]) -> Self {
        Self {
            bookings: BookingSummary::from_reservations(reservations),
            payments: PaymentSummary::from_payments(payments),
            vehicle_count: vehicles.len(),
            booking_value: reservations.iter().map(|r| r.total_amount).sum(),
        }
    }

    pub fn average_per_booking(&self) -> f64 {
        average(self.payments.total_paid, self.bookings.total())
    }

    pub fn tier(&self) -> CustomerTier {
        CustomerTier::from_total_paid(self.payments.total_paid)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FleetSummary {
    pub bike: usize,
    pub car: usize,
    pub truck: usize,
}

impl FleetSummary {
    pub fn from_vehicles<'a>(vehicles: impl IntoIterator<Item = &'a Vehicle>) -> Self {
        vehicles.into_iter().fold(Self::default(), |mut acc, v| {
            *acc.count_mut(v.vehicle_type) += 1;
            acc
        })
    }

    fn count_mut(&mut self, vehicle_type: VehicleType) -> &mut usize {
        match vehicle_type {
            VehicleType::Bike => &mut self.bike,
            VehicleType::Car => &mut self.car,
            VehicleType::Truck => &mut self.truck,
        }
    }

    pub fn count(&self, vehicle_type: VehicleType) -> usize {
        match vehicle_type {
            VehicleType::Bike => self.bike,
            VehicleType::Car => self.car,
            VehicleType::Truck => self.truck,
        }
    }

    pub fn total(&self) -> usize {
        self.bike + self.car + self.truck
    }

    pub fn share(&self, vehicle_type: VehicleType) -> f64 {
        percent(self.count(vehicle_type), self.total())
    }

    // 同数の場合は車種の並び順で後ろのものを優先する
    pub fn most_popular(&self) -> Option<VehicleType> {
        if self.total() == 0 {
            return None;
        }
        if self.bike > self.car && self.bike > self.truck {
            Some(VehicleType::Bike)
        } else if self.car > self.truck {
            Some(VehicleType::Car)
        } else {
            Some(VehicleType::Truck)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotTypeUsage {
    pub slot_type: VehicleType,
    pub capacity: usize,
    pub available: usize,
    pub reserved: usize,
    pub occupied: usize,
}

impl SlotTypeUsage {
    pub fn utilization(&self) -> f64 {
        percent(self.reserved + self.occupied, self.capacity)
    }

    pub fn paid_occupancy(&self) -> f64 {
        percent(self.occupied, self.capacity)
    }

    pub fn hourly_revenue(&self) -> f64 {
        self.occupied as f64 * self.slot_type.hourly_rate()
    }

    pub fn max_hourly_revenue(&self) -> f64 {
        self.capacity as f64 * self.slot_type.hourly_rate()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotUsageReport {
    pub by_type: Vec<SlotTypeUsage>,
}

impl SlotUsageReport {
    pub fn build(slots: &[Slot]) -> Self {
        let by_type = VehicleType::iter()
            .map(|slot_type| {
                let of_type = slots.iter().filter(|s| s.slot_type == slot_type);
                let mut usage = SlotTypeUsage {
                    slot_type,
                    capacity: 0,
                    available: 0,
                    reserved: 0,
                    occupied: 0,
                };
                for slot in of_type {
                    usage.capacity += 1;
                    match slot.status() {
                        SlotStatus::Available => usage.available += 1,
                        SlotStatus::Reserved => usage.reserved += 1,
                        SlotStatus::Occupied => usage.occupied += 1,
                    }
                }
                usage
            })
            .collect();
        Self { by_type }
    }

    pub fn total_slots(&self) -> usize {
        self.by_type.iter().map(|u| u.capacity).sum()
    }

    pub fn total_available(&self) -> usize {
        self.by_type.iter().map(|u| u.available).sum()
    }

    pub fn total_occupied(&self) -> usize {
        self.by_type.iter().map(|u| u.occupied).sum()
    }

    pub fn total_in_use(&self) -> usize {
        self.by_type.iter().map(|u| u.reserved + u.occupied).sum()
    }

    pub fn occupancy_rate(&self) -> f64 {
        percent(self.total_occupied(), self.total_slots())
    }

    pub fn hourly_revenue(&self) -> f64 {
        self.by_type.iter().map(SlotTypeUsage::hourly_revenue).sum()
    }

    pub fn max_hourly_revenue(&self) -> f64 {
        self.by_type.iter().map(SlotTypeUsage::max_hourly_revenue).sum()
    }

    pub fn max_daily_revenue(&self) -> f64 {
        self.max_hourly_revenue() * 24.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyReport {
    pub total_users: usize,
    pub active_users: usize,
    pub total_vehicles: usize,
    pub bookings: BookingSummary,
    pub completed_payments: usize,
    pub revenue: f64,
    pub slots: SlotUsageReport,
}

impl DailyReport {
    pub fn build(
        users: &[User],
        vehicles: &[Vehicle],
        slots: &[Slot],
        reservations: &[Reservation],
        payments: &[Payment],
    ) -> Self {
        let completed: Vec<&Payment> = payments.iter().filter(|p| p.is_completed()).collect();
        Self {
            total_users: users.len(),
            active_users: users.iter().filter(|u| u.is_active).count(),
            total_vehicles: vehicles.len(),
            bookings: BookingSummary::from_reservations(reservations),
            completed_payments: completed.len(),
            revenue: completed.iter().map(|p| p.amount).sum(),
            slots: SlotUsageReport::build(slots),
        }
    }

    pub fn average_transaction(&self) -> f64 {
        average(self.revenue, self.completed_payments)
    }
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
