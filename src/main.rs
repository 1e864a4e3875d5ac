use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use simrace_booking::api::reservation_dto::ReservationRequestDto;
use simrace_booking::domain::clock::SystemClock;
use simrace_booking::domain::id::{ReservationId, ResourceId, UserId};
use simrace_booking::domain::user::{UserContext, UserRole};
use simrace_booking::logger;
use simrace_booking::service::CancelOutcome;

#[derive(Parser, Debug)]
#[command(name = "simrace_booking", about = "Slot scheduling and reservations for the sim-racing center.")]
struct Cli {
    /// Path to the booking config JSON (business hours, resources, pricing).
    #[arg(long, default_value = "config/booking.json")]
    config: String,

    /// Path to the JSON reservation store file.
    #[arg(long, default_value = "data/reservations.json")]
    store: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the candidate start slots for a resource on one date.
    Slots {
        #[arg(long)]
        resource: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value_t = 60)]
        duration: i64,
    },

    /// Validate, price and record a new reservation.
    Reserve {
        #[arg(long)]
        resource: String,
        /// Booking date, YYYY-MM-DD.
        #[arg(long)]
        date: String,
        /// Start time, HH:MM.
        #[arg(long)]
        time: String,
        #[arg(long, default_value_t = 60)]
        duration: i64,
        #[arg(long, default_value_t = 1)]
        participants: u32,
        #[arg(long)]
        user: String,
        #[arg(long, default_value = "standard")]
        role: String,
    },

    /// Soft-cancel a reservation by id.
    Cancel {
        #[arg(long)]
        id: String,
        #[arg(long)]
        user: String,
        #[arg(long, default_value = "standard")]
        role: String,
    },

    /// List reservations, optionally filtered by resource and/or date.
    List {
        #[arg(long)]
        resource: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn parse_caller(user: &str, role: &str) -> Result<UserContext, String> {
    let role = UserRole::parse(role).ok_or_else(|| format!("Unknown role '{}'. Expected standard, vip, owner or admin.", role))?;
    Ok(UserContext::new(UserId::new(user), role))
}

fn run(cli: Cli) -> Result<(), String> {
    let service = simrace_booking::build_service(&cli.config, &cli.store, SystemClock::shared()).map_err(|e| e.to_string())?;

    match cli.command {
        Command::Slots { resource, date, duration } => {
            let resource_id = ResourceId::new(resource);
            let slots = service.get_available_slots(&resource_id, date, duration).map_err(|e| e.to_string())?;

            if slots.is_empty() {
                println!("No slots on {} (closed or nothing fits the requested duration).", date);
                return Ok(());
            }

            for slot in slots {
                println!("{}  {}", slot.label(), if slot.available { "available" } else { "booked" });
            }

            Ok(())
        }

        Command::Reserve { resource, date, time, duration, participants, user, role } => {
            let caller = parse_caller(&user, &role)?;

            let request = ReservationRequestDto { resource_id: resource, date, time, duration_minutes: duration, participants };
            let candidate = request.to_candidate().map_err(|e| e.to_string())?;

            let reservation = service.submit_reservation(candidate, &caller).map_err(|e| e.to_string())?;

            println!("{}", serde_json::to_string_pretty(&reservation).map_err(|e| e.to_string())?);

            Ok(())
        }

        Command::Cancel { id, user, role } => {
            let caller = parse_caller(&user, &role)?;
            let reservation_id = ReservationId::parse(&id).ok_or_else(|| format!("'{}' is not a valid reservation id.", id))?;

            match service.cancel(reservation_id, &caller).map_err(|e| e.to_string())? {
                CancelOutcome::Cancelled => println!("Reservation {} cancelled.", reservation_id),
                CancelOutcome::AlreadyCancelled => println!("Reservation {} was already cancelled.", reservation_id),
            }

            Ok(())
        }

        Command::List { resource, date } => {
            let resource_id = resource.map(ResourceId::new);
            let reservations = service.list_reservations(resource_id.as_ref(), date).map_err(|e| e.to_string())?;

            println!("{}", serde_json::to_string_pretty(&reservations).map_err(|e| e.to_string())?);

            Ok(())
        }
    }
}

fn main() {
    logger::init();

    let cli = Cli::parse();

    if let Err(message) = run(cli) {
        log::error!("{}", message);
        std::process::exit(1);
    }
}
