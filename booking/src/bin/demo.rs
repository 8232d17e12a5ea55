//! Courtside Booking Demo
//!
//! Walks the three booking wizards against the simulated booking service:
//! - Browsing clubs and trainers with facets
//! - Searching for an opponent
//! - Booking a court, a training session and a match
//! - Cancelling one of the bookings
//!
//! # Usage
//!
//! ```bash
//! # Deterministic run without latency
//! COURTSIDE_SEED=7 COURTSIDE_SLOT_LATENCY_MS=0 COURTSIDE_SUBMIT_LATENCY_MS=0 \
//!     cargo run --bin courtside-demo
//! ```

use anyhow::Context;
use courtside_booking::{
    BrowseAction, BrowseEnvironment, BrowseReducer, BrowseState, Catalog, Config,
    CourtReservation, FlowAction, FlowEnvironment, FlowReducer, FlowState, MatchReservation,
    MockBookingGateway, ReservationDomain, Step, TrainingReservation,
    filter::{ClubFilters, MatchPreferences},
    flow::{MatchExtras, TrainingExtras},
    types::{Booking, MatchType, SessionType, SkillLevel, Surface},
};
use courtside_core::environment::{Clock, SystemClock};
use courtside_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type FlowStore<D> = Store<FlowState<D>, FlowAction<D>, FlowEnvironment, FlowReducer<D>>;

/// Days searched for an open slot, starting today
const SEARCH_DAYS: i64 = 7;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,courtside_booking=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n🎾 ============================================");
    println!("   Courtside Booking - Live Demo");
    println!("============================================\n");

    let config = Config::from_env().context("loading configuration")?;
    let wait = step_timeout(&config);

    println!("⚙️  Configuration:");
    println!("{}\n", serde_json::to_string_pretty(&config)?);

    let catalog = Arc::new(Catalog::seeded());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let gateway = MockBookingGateway::shared(
        Arc::clone(&catalog),
        Arc::clone(&clock),
        config.gateway.clone(),
    );
    let flow_env = FlowEnvironment::new(Arc::clone(&clock), gateway);

    // ========== Browse ==========

    println!("1️⃣  Browsing clay clubs...");
    let browse = Store::new(
        BrowseState::default(),
        BrowseReducer::new(),
        BrowseEnvironment::new(Arc::clone(&catalog), Arc::clone(&clock), config.search_latency),
    );
    browse
        .send(BrowseAction::SetClubFilters {
            filters: ClubFilters {
                surface: Some(Surface::Clay),
                ..ClubFilters::default()
            },
        })
        .await?;
    for id in browse.state(|s| s.clubs.clone()).await {
        let club = catalog.club(&id)?;
        println!(
            "   ✓ {} ({}), {} to {}",
            club.name, club.location, club.price_range.min, club.price_range.max
        );
    }

    println!("\n2️⃣  Searching for intermediate and advanced opponents...");
    let found = browse
        .send_and_wait_for(
            BrowseAction::SearchPlayers {
                query: String::new(),
                preferences: MatchPreferences {
                    skill_levels: vec![SkillLevel::Intermediate, SkillLevel::Advanced],
                    ..MatchPreferences::starting(clock.today())
                },
            },
            |a| matches!(a, BrowseAction::PlayersFound { .. }),
            config.search_latency + wait,
        )
        .await?;
    let players = match found {
        BrowseAction::PlayersFound { players, .. } => players,
        other => anyhow::bail!("player search answered with {other:?}"),
    };
    for id in &players {
        let player = catalog.player(id)?;
        println!("   ✓ {} ({}, rating {})", player.name, player.skill_level.label(), player.rating);
    }

    // ========== Court ==========

    println!("\n3️⃣  Booking a court at Baseline...");
    let courts: FlowStore<CourtReservation> =
        Store::new(FlowState::new(), FlowReducer::new(), flow_env.clone());
    let court_booking = book(&courts, "baseline".into(), "baseline-1".into(), (), &clock, wait).await?;
    report(court_booking.as_ref())?;

    // ========== Training ==========

    println!("\n4️⃣  Booking a training session...");
    let trainer = catalog
        .trainers
        .first()
        .context("catalog has no trainers")?;
    let venue = trainer
        .clubs
        .first()
        .with_context(|| format!("{} coaches nowhere", trainer.name))?;
    println!("   Trainer: {} at {venue}", trainer.name);
    let training: FlowStore<TrainingReservation> =
        Store::new(FlowState::new(), FlowReducer::new(), flow_env.clone());
    let extras = TrainingExtras {
        session_type: SessionType::Assessment,
        focus: vec!["Serve".to_string()],
        ..TrainingExtras::default()
    };
    let training_booking =
        book(&training, trainer.id.clone(), venue.clone(), extras, &clock, wait).await?;
    report(training_booking.as_ref())?;

    // ========== Match ==========

    println!("\n5️⃣  Booking a match...");
    let opponent = players.first().context("no opponents found")?;
    let opponent = catalog.player(opponent)?;
    let venue = catalog
        .venues
        .iter()
        .find(|venue| opponent.preferred_clubs.contains(&venue.id))
        .or_else(|| catalog.venues.first())
        .context("catalog has no venues")?;
    println!("   Opponent: {} at {}", opponent.name, venue.name);
    let matches: FlowStore<MatchReservation> =
        Store::new(FlowState::new(), FlowReducer::new(), flow_env);
    let extras = MatchExtras {
        match_type: MatchType::Competitive,
    };
    let match_booking =
        book(&matches, opponent.id.clone(), venue.id.clone(), extras, &clock, wait).await?;
    report(match_booking.as_ref())?;

    // ========== Cancel ==========

    if let Some(booking) = court_booking {
        println!("\n6️⃣  Cancelling {}...", booking.id);
        let outcome = courts
            .send_and_wait_for(
                FlowAction::CancelBooking {
                    booking_id: booking.id.clone(),
                },
                |a| {
                    matches!(
                        a,
                        FlowAction::BookingCancelled { .. } | FlowAction::CancellationFailed { .. }
                    )
                },
                wait,
            )
            .await?;
        match outcome {
            FlowAction::BookingCancelled { .. } => {
                let status = courts
                    .state(|s| s.booking(&booking.id).map(|b| b.status))
                    .await;
                println!("   ✓ Status: {status:?}");
            },
            other => println!("   ✗ {other:?}"),
        }
    }

    // ========== Shutdown ==========

    println!("\n🛑 Shutting down...");
    browse.shutdown(config.shutdown_timeout).await?;
    courts.shutdown(config.shutdown_timeout).await?;
    training.shutdown(config.shutdown_timeout).await?;
    matches.shutdown(config.shutdown_timeout).await?;

    println!("✓ Demo complete\n");
    Ok(())
}

/// Longest a single gateway round trip may take before the demo gives up
fn step_timeout(config: &Config) -> Duration {
    let gateway = &config.gateway;
    gateway
        .slot_latency
        .max(gateway.submit_latency)
        .max(gateway.cancel_latency)
        + Duration::from_secs(5)
}

/// Drive one wizard from selection to a submitted booking
///
/// Returns `None` when no open slot was found or the service rejected the
/// booking.
async fn book<D: ReservationDomain>(
    store: &FlowStore<D>,
    primary: D::Primary,
    secondary: D::Secondary,
    extras: D::Extras,
    clock: &Arc<dyn Clock>,
    wait: Duration,
) -> anyhow::Result<Option<Booking>> {
    let slots_answered = |a: &FlowAction<D>| {
        matches!(
            a,
            FlowAction::SlotsLoaded { .. } | FlowAction::SlotsFailed { .. }
        )
    };

    store.send(FlowAction::SelectPrimary { primary }).await?;
    store.send(FlowAction::Proceed).await?;
    store.send(FlowAction::SelectSecondary { secondary }).await?;
    store
        .send_and_wait_for(FlowAction::Proceed, slots_answered, wait)
        .await?;

    let today = clock.today();
    let mut open = None;
    for offset in 0..SEARCH_DAYS {
        let date = today + chrono::Duration::days(offset);
        if offset > 0 {
            store
                .send_and_wait_for(FlowAction::SelectDate { date }, slots_answered, wait)
                .await?;
        }
        let first_open = store
            .state(|s| s.slots.iter().find(|slot| slot.available).map(|slot| slot.time))
            .await;
        if let Some(time) = first_open {
            open = Some((date, time));
            break;
        }
        println!("   · nothing open on {date}");
    }
    let Some((date, time)) = open else {
        println!("   ✗ No open slot in the next {SEARCH_DAYS} days");
        return Ok(None);
    };

    println!("   {} on {date} at {time}", D::KIND.as_str());
    store.send(FlowAction::SelectSlot { time }).await?;
    store.send(FlowAction::SetExtras { extras }).await?;
    store.send(FlowAction::Proceed).await?;

    let (step, error) = store.state(|s| (s.step, s.error.clone())).await;
    if step != Step::Confirmation {
        println!("   ✗ Stuck on {step:?}: {error:?}");
        return Ok(None);
    }

    let outcome = store
        .send_and_wait_for(
            FlowAction::Submit,
            |a| {
                matches!(
                    a,
                    FlowAction::BookingConfirmed { .. } | FlowAction::BookingRejected { .. }
                )
            },
            wait,
        )
        .await?;
    if let FlowAction::BookingRejected { error } = outcome {
        println!("   ✗ Rejected: {error}");
        return Ok(None);
    }

    Ok(store.state(|s| s.confirmed.clone()).await)
}

fn report(booking: Option<&Booking>) -> anyhow::Result<()> {
    if let Some(booking) = booking {
        println!("   ✓ Booked {} for {}", booking.id, booking.total_price);
        println!("{}", serde_json::to_string_pretty(booking)?);
    }
    Ok(())
}
