use std::fmt;

use kernel::model::{
    report::{DailyReport, FleetSummary, SlotUsageReport, UserReport},
    user::User,
    vehicle::VehicleType,
};
use strum::IntoEnumIterator;

pub struct UserReportView {
    pub user: User,
    pub report: UserReport,
}

impl fmt::Display for UserReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let UserReportView { user, report } = self;
        writeln!(f, "Report for {} (user {})", user.name, user.user_id)?;
        writeln!(f, "  Vehicles registered : {}", report.vehicle_count)?;
        writeln!(
            f,
            "  Bookings            : {} (active {}, completed {}, cancelled {})",
            report.bookings.total(),
            report.bookings.active,
            report.bookings.completed,
            report.bookings.cancelled
        )?;
        writeln!(f, "  Booked value        : ${:.2}", report.booking_value)?;
        writeln!(
            f,
            "  Total paid          : ${:.2} in {} payment(s)",
            report.payments.total_paid, report.payments.transactions
        )?;
        writeln!(
            f,
            "  Payment methods     : cash {}, card {}, mobile {}",
            report.payments.cash, report.payments.card, report.payments.mobile
        )?;
        writeln!(f, "  Average per booking : ${:.2}", report.average_per_booking())?;
        write!(f, "  Customer tier       : {}", report.tier())
    }
}

pub struct FleetView(pub FleetSummary);

impl fmt::Display for FleetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fleet = &self.0;
        writeln!(f, "Total vehicles: {}", fleet.total())?;
        for vehicle_type in VehicleType::iter() {
            writeln!(
                f,
                "  {:<16} {:>4} ({:.1}%)",
                vehicle_type.label(),
                fleet.count(vehicle_type),
                fleet.share(vehicle_type)
            )?;
        }
        match fleet.most_popular() {
            Some(vehicle_type) => write!(f, "Most popular: {}", vehicle_type.label()),
            None => write!(f, "Most popular: -"),
        }
    }
}

pub struct SlotUsageView(pub SlotUsageReport);

impl fmt::Display for SlotUsageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let usage = &self.0;
        writeln!(
            f,
            "{:<16} {:>5} {:>9} {:>8} {:>8} {:>8} {:>8} {:>10}",
            "Type", "Total", "Available", "Reserved", "Occupied", "In use", "Paid", "Revenue/h"
        )?;
        for u in &usage.by_type {
            writeln!(
                f,
                "{:<16} {:>5} {:>9} {:>8} {:>8} {:>7.1}% {:>7.1}% {:>10.2}",
                u.slot_type.label(),
                u.capacity,
                u.available,
                u.reserved,
                u.occupied,
                u.utilization(),
                u.paid_occupancy(),
                u.hourly_revenue()
            )?;
        }
        writeln!(
            f,
            "Total slots {}, available {}, in use {}, occupancy {:.1}%",
            usage.total_slots(),
            usage.total_available(),
            usage.total_in_use(),
            usage.occupancy_rate()
        )?;
        write!(
            f,
            "Current revenue ${:.2}/hour, potential ${:.2}/hour (${:.2}/day)",
            usage.hourly_revenue(),
            usage.max_hourly_revenue(),
            usage.max_daily_revenue()
        )
    }
}

pub struct DailyReportView(pub DailyReport);

impl fmt::Display for DailyReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.0;
        writeln!(
            f,
            "Users: {} ({} active)",
            report.total_users, report.active_users
        )?;
        writeln!(f, "Vehicles: {}", report.total_vehicles)?;
        writeln!(
            f,
            "Reservations: {} (active {}, completed {}, cancelled {})",
            report.bookings.total(),
            report.bookings.active,
            report.bookings.completed,
            report.bookings.cancelled
        )?;
        writeln!(
            f,
            "Revenue: ${:.2} from {} payment(s), average ${:.2}",
            report.revenue,
            report.completed_payments,
            report.average_transaction()
        )?;
        write!(f, "{}", SlotUsageView(report.slots.clone()))
    }
}
