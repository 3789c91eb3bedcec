use std::io::{BufRead, Write};

use kernel::model::{actor::Actor, id::UserId, user::UserSearch};
use registry::AppRegistry;
use shared::error::AppResult;

use super::{checkpoint, invalid_choice, now, say_list, settle};
use crate::{
    handler::{
        report::{generate_daily_report, generate_slot_usage_report},
        reservation::{cancel_reservation, check_overstays, show_all_active_reservations},
        user::{deactivate_user, login_admin, search_users, show_user_history, show_user_list},
        vehicle::show_all_vehicles,
    },
    model::{
        payment::PaymentView,
        report::{DailyReportView, FleetView, SlotUsageView},
        reservation::{OverstayView, ReservationView},
        user::{AdminLoginRequest, UserView},
        vehicle::VehicleView,
    },
    terminal::Terminal,
};

const ADMIN_MENU: &str = "\n==== ADMIN PANEL ====\n\
1. View All Users\n\
2. Search Users\n\
3. Deactivate User\n\
4. View User History\n\
5. View All Vehicles\n\
6. Slot Usage Report\n\
7. Generate Daily Report\n\
8. Check System Overstays\n\
9. Cancel Any Reservation\n\
10. Logout";

pub(crate) fn login<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    let req = AdminLoginRequest::new(term.prompt("Username")?, term.prompt("Password")?);
    login_admin(registry, req)?;
    tracing::info!("administrator logged in");
    term.say("Admin access granted.")?;
    session(registry, term)
}

fn session<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    loop {
        term.say(ADMIN_MENU)?;
        let outcome = match term.prompt("Enter choice")?.as_str() {
            "1" => list_users(registry, term),
            "2" => search(registry, term),
            "3" => deactivate(registry, term),
            "4" => user_history(registry, term),
            "5" => list_vehicles(registry, term),
            "6" => slot_usage(registry, term),
            "7" => daily_report(registry, term),
            "8" => overstays(registry, term),
            "9" => cancel_any(registry, term),
            "10" => {
                tracing::info!("administrator logged out");
                return Ok(());
            }
            _ => Err(invalid_choice()),
        };
        settle(term, outcome)?;
    }
}

fn list_users<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    let users = show_user_list(registry)?;
    say_list(
        term,
        users.into_iter().map(UserView::from),
        "No users registered.",
    )?;
    Ok(())
}

fn search<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    let criteria = [
        "Search by Name",
        "Search by Phone",
        "Search by Email",
        "Search by User ID",
    ];
    say_list(term, criteria, "")?;
    let query = match term.choose("Search by", criteria.len())? {
        0 => UserSearch::Name(term.prompt("Name contains")?),
        1 => UserSearch::Phone(term.prompt("Phone contains")?),
        2 => UserSearch::Email(term.prompt("Email contains")?),
        _ => UserSearch::Id(UserId::new(term.prompt_number("User ID")?)),
    };

    let found = search_users(registry, query)?;
    say_list(term, found.into_iter().map(UserView::from), "No users found.")?;
    Ok(())
}

fn deactivate<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    let user_id = UserId::new(term.prompt_number("User ID")?);
    let history = show_user_history(registry, user_id)?;
    term.say(UserView::from(history.user))?;
    if !term
        .prompt("Deactivate this user and cancel their active reservations? (y/n)")?
        .eq_ignore_ascii_case("y")
    {
        return term.say("Deactivation aborted.");
    }

    let cancelled = deactivate_user(registry, user_id, now())?;
    checkpoint(registry, term)?;
    term.say(format!(
        "User {user_id} deactivated. {} active reservation(s) cancelled.",
        cancelled.len()
    ))
}

fn user_history<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    let user_id = UserId::new(term.prompt_number("User ID")?);
    let history = show_user_history(registry, user_id)?;

    term.say(UserView::from(history.user))?;
    term.say("-- Vehicles --")?;
    say_list(term, history.vehicles.into_iter().map(VehicleView), "None.")?;
    term.say("-- Reservations --")?;
    say_list(
        term,
        history.reservations.into_iter().map(ReservationView),
        "None.",
    )?;
    term.say("-- Payments --")?;
    say_list(term, history.payments.into_iter().map(PaymentView), "None.")?;
    Ok(())
}

fn list_vehicles<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    let (vehicles, fleet) = show_all_vehicles(registry)?;
    say_list(
        term,
        vehicles.into_iter().map(VehicleView),
        "No vehicles registered.",
    )?;
    term.say(FleetView(fleet))
}

fn slot_usage<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    let usage = generate_slot_usage_report(registry)?;
    term.say(SlotUsageView(usage))
}

fn daily_report<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    let report = generate_daily_report(registry)?;
    term.say(format!("Daily report for {}", now().format("%Y-%m-%d")))?;
    term.say(DailyReportView(report))
}

fn overstays<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    let alerts = check_overstays(registry, None, now())?;
    let total: f64 = alerts.iter().map(|a| a.overstay.additional_charge).sum();
    if say_list(
        term,
        alerts.into_iter().map(OverstayView),
        "No overstays in the system.",
    )? > 0
    {
        term.say(format!("Total additional charges: ${total:.2}"))?;
    }
    Ok(())
}

fn cancel_any<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    let active = show_all_active_reservations(registry)?;
    let count = say_list(
        term,
        active.iter().cloned().map(ReservationView),
        "No active reservations.",
    )?;
    if count == 0 {
        return Ok(());
    }
    let reservation = &active[term.choose("Select reservation", count)?];

    cancel_reservation(
        registry,
        Actor::Administrator,
        reservation.reservation_id,
        now(),
    )?;
    checkpoint(registry, term)?;
    term.say(format!(
        "Reservation #{} of user {} cancelled.",
        reservation.reservation_id, reservation.user_id
    ))
}
