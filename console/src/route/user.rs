use std::io::{BufRead, Write};

use kernel::model::{
    actor::Actor,
    id::{SlotId, UserId},
    payment::PaymentMethod,
    slot::Slot,
    vehicle::VehicleType,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use strum::IntoEnumIterator;

use super::{checkpoint, invalid_choice, now, say_list, settle};
use crate::{
    handler::{
        payment::{pay_reservation, show_payment_history},
        report::generate_user_report,
        reservation::{
            cancel_reservation, check_overstays, reserve_slot, show_active_reservations,
            show_booking_history, show_unpaid_reservations,
        },
        slot::show_available_slots,
        user::{login_user, update_profile},
        vehicle::{register_vehicle, show_my_vehicles},
    },
    model::{
        payment::PaymentView,
        reservation::{CreateReservationRequest, OverstayView, ReservationView},
        user::{LoginRequest, ProfileFieldKind, UpdateProfileRequest},
        vehicle::{CreateVehicleRequest, VehicleView},
    },
    terminal::Terminal,
};

const USER_MENU: &str = "\n==== CUSTOMER MENU ====\n\
1. Update Profile\n\
2. Add Vehicle\n\
3. View My Vehicles\n\
4. View Available Slots\n\
5. Reserve Slot\n\
6. Cancel Reservation\n\
7. Make Payment\n\
8. View Payment History\n\
9. View Booking History\n\
10. Check Overstay Alerts\n\
11. Generate My Report\n\
12. Logout";

pub(crate) fn login<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    let req = LoginRequest::new(term.prompt("Phone")?, term.prompt("Password")?);
    let user = login_user(registry, req)?;
    tracing::info!(user_id = %user.user_id, "customer logged in");
    term.say(format!("Welcome, {}!", user.name))?;
    session(registry, term, user.user_id)
}

fn session<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    loop {
        term.say(USER_MENU)?;
        let outcome = match term.prompt("Enter choice")?.as_str() {
            "1" => change_profile(registry, term, user_id),
            "2" => add_vehicle(registry, term, user_id),
            "3" => list_vehicles(registry, term, user_id),
            "4" => list_available_slots(registry, term),
            "5" => reserve(registry, term, user_id),
            "6" => cancel(registry, term, user_id),
            "7" => pay(registry, term, user_id),
            "8" => payment_history(registry, term, user_id),
            "9" => booking_history(registry, term, user_id),
            "10" => overstays(registry, term, user_id),
            "11" => my_report(registry, term, user_id),
            "12" => {
                tracing::info!(%user_id, "customer logged out");
                return Ok(());
            }
            _ => Err(invalid_choice()),
        };
        settle(term, outcome)?;
    }
}

fn change_profile<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    const FIELDS: [(ProfileFieldKind, &str); 4] = [
        (ProfileFieldKind::Name, "Update Name"),
        (ProfileFieldKind::Phone, "Update Phone"),
        (ProfileFieldKind::Email, "Update Email"),
        (ProfileFieldKind::Password, "Change Password"),
    ];
    let labels = FIELDS
        .iter()
        .map(|(_, label)| *label)
        .chain(std::iter::once("Go Back"));
    say_list(term, labels, "")?;
    let choice = term.choose("Select field", FIELDS.len() + 1)?;
    if choice == FIELDS.len() {
        return Ok(());
    }
    let (kind, _) = FIELDS[choice];

    let value = term.prompt("New value")?;
    let user = update_profile(registry, user_id, UpdateProfileRequest::new(kind, value))?;
    checkpoint(registry, term)?;
    term.say(format!(
        "Profile updated: {} / {} / {}",
        user.name, user.phone, user.email
    ))
}

fn add_vehicle<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    let types: Vec<VehicleType> = VehicleType::iter().collect();
    say_list(
        term,
        types
            .iter()
            .map(|t| format!("{} (${:.2}/hour)", t.label(), t.hourly_rate())),
        "",
    )?;
    let vehicle_type = types[term.choose("Vehicle type", types.len())?];

    let req = CreateVehicleRequest::new(
        vehicle_type,
        term.prompt("License plate")?,
        term.prompt("Color")?,
    );
    let vehicle_id = register_vehicle(registry, user_id, req, now())?;
    checkpoint(registry, term)?;
    term.say(format!("Vehicle registered with ID {vehicle_id}."))
}

fn list_vehicles<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    let vehicles = show_my_vehicles(registry, user_id)?;
    say_list(
        term,
        vehicles.into_iter().map(VehicleView),
        "No vehicles registered.",
    )?;
    Ok(())
}

fn list_available_slots<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    for slot_type in VehicleType::iter() {
        let slots = show_available_slots(registry, slot_type)?;
        term.say(format!(
            "{} (${:.2}/hour): {} of {} available",
            slot_type.label(),
            slot_type.hourly_rate(),
            slots.len(),
            slot_type.capacity()
        ))?;
        if !slots.is_empty() {
            term.say(format!("  {}", slot_ids(&slots)))?;
        }
    }
    Ok(())
}

fn slot_ids(slots: &[Slot]) -> String {
    slots
        .iter()
        .map(|s| s.slot_id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn reserve<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    let vehicles = show_my_vehicles(registry, user_id)?;
    if vehicles.is_empty() {
        return Err(AppError::InvalidInput(
            "No vehicles registered! Please add a vehicle first.".into(),
        ));
    }
    say_list(term, vehicles.iter().cloned().map(VehicleView), "")?;
    let vehicle = &vehicles[term.choose("Select vehicle", vehicles.len())?];

    let slots = show_available_slots(registry, vehicle.vehicle_type)?;
    if slots.is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "No {} slots available right now.",
            vehicle.vehicle_type.label()
        )));
    }
    term.say(format!("Available slots: {}", slot_ids(&slots)))?;
    let slot_id = SlotId::new(term.prompt_number("Slot ID")?);
    let duration_hours: f64 = term.prompt_number("Duration in hours (1-24)")?;

    let reservation = reserve_slot(
        registry,
        user_id,
        CreateReservationRequest::new(vehicle.vehicle_id, slot_id, duration_hours),
        now(),
    )?;
    checkpoint(registry, term)?;
    term.say(format!(
        "Reservation #{} confirmed: slot {} for {:.2} hour(s), total ${:.2}. Please pay to occupy the slot.",
        reservation.reservation_id,
        reservation.slot_id,
        reservation.duration_hours,
        reservation.total_amount
    ))
}

fn cancel<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    let active = show_active_reservations(registry, user_id)?;
    let count = say_list(
        term,
        active.iter().cloned().map(ReservationView),
        "No active reservations.",
    )?;
    if count == 0 {
        return Ok(());
    }
    let reservation = &active[term.choose("Select reservation", count)?];
    if !term
        .prompt("Confirm cancellation? (y/n)")?
        .eq_ignore_ascii_case("y")
    {
        return term.say("Cancellation aborted.");
    }

    cancel_reservation(
        registry,
        Actor::Customer(user_id),
        reservation.reservation_id,
        now(),
    )?;
    checkpoint(registry, term)?;
    term.say(format!(
        "Reservation #{} cancelled. Slot {} is available again.",
        reservation.reservation_id, reservation.slot_id
    ))
}

fn pay<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    let unpaid = show_unpaid_reservations(registry, user_id)?;
    let count = say_list(
        term,
        unpaid.iter().cloned().map(ReservationView),
        "No unpaid reservations.",
    )?;
    if count == 0 {
        return Ok(());
    }
    let reservation = &unpaid[term.choose("Select reservation", count)?];

    let methods: Vec<PaymentMethod> = PaymentMethod::iter().collect();
    say_list(term, methods.iter().map(|m| m.label()), "")?;
    let method = methods[term.choose("Payment method", methods.len())?];
    if !term
        .prompt(&format!(
            "Pay ${:.2} via {}? (y/n)",
            reservation.total_amount,
            method.label()
        ))?
        .eq_ignore_ascii_case("y")
    {
        return term.say("Payment cancelled.");
    }

    let payment = pay_reservation(
        registry,
        user_id,
        reservation.reservation_id,
        method,
        now(),
    )?;
    checkpoint(registry, term)?;
    term.say(format!(
        "Payment #{} of ${:.2} completed via {}. Slot {} is now occupied.",
        payment.payment_id,
        payment.amount,
        payment.method.label(),
        reservation.slot_id
    ))
}

fn payment_history<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    let payments = show_payment_history(registry, user_id)?;
    let total: f64 = payments
        .iter()
        .filter(|p| p.is_completed())
        .map(|p| p.amount)
        .sum();
    if say_list(term, payments.into_iter().map(PaymentView), "No payments yet.")? > 0 {
        term.say(format!("Total paid: ${total:.2}"))?;
    }
    Ok(())
}

fn booking_history<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    let reservations = show_booking_history(registry, user_id)?;
    say_list(
        term,
        reservations.into_iter().map(ReservationView),
        "No bookings yet.",
    )?;
    Ok(())
}

fn overstays<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    let alerts = check_overstays(registry, Some(user_id), now())?;
    say_list(
        term,
        alerts.into_iter().map(OverstayView),
        "No overstay alerts. All your reservations are within their booked time.",
    )?;
    Ok(())
}

fn my_report<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
    user_id: UserId,
) -> AppResult<()> {
    let report = generate_user_report(registry, user_id)?;
    term.say(report)
}
