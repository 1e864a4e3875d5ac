use std::sync::Arc;

use crate::api::config_dto::BookingConfigDto;
use crate::domain::business_hours::BusinessHours;
use crate::domain::clock::SharedClock;
use crate::domain::pricing::PricingPolicy;
use crate::domain::resource::ResourceCatalog;
use crate::domain::scheduler::SlotScheduler;
use crate::domain::store::JsonFileStore;
use crate::error::Result;
use crate::loader::parser::parse_json_file;
use crate::service::BookingService;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod service;

/// Builds a ready-to-use booking service from a config file, a JSON store
/// file and a clock.
pub fn build_service(config_path: &str, store_path: &str, clock: SharedClock) -> Result<BookingService> {
    let config: BookingConfigDto = parse_json_file::<BookingConfigDto>(config_path)?;
    log::info!("Booking config parsed successfully from '{}'.", config_path);

    let hours = BusinessHours::from_dto(config.business_hours)?;
    let catalog = ResourceCatalog::from_dto(config.resources)?;
    let pricing = PricingPolicy::from_dto(config.pricing)?;
    let scheduler = SlotScheduler::new(hours, config.slot_granularity_minutes)?;

    let store = Arc::new(JsonFileStore::open(store_path)?);
    log::info!("Booking service constructed with {} resource(s).", catalog.len());

    Ok(BookingService::new(catalog, scheduler, pricing, store, clock))
}
