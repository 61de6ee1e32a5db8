use crate::infra::InMemoryBookingLedger;
use chrono::{Local, NaiveDate};
use clap::Args;
use keyhaven::config::AppConfig;
use keyhaven::error::AppError;
use keyhaven::marketplace::booking::{
    BookingQuote, BookingService, BookingStatusView, FeeSchedule, PaystackInline, RawDuration,
};
use keyhaven::marketplace::catalog::{Catalog, Property, PropertyFilter, PropertyId};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Listing to price
    #[arg(long)]
    pub(crate) property_id: u32,
    /// Lease length in years (defaults to the listing's first option)
    #[arg(long)]
    pub(crate) duration: Option<String>,
    /// Lease start date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start_date: Option<NaiveDate>,
    /// CSV catalog to price against instead of the configured one
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct StatusArgs {
    /// Six character booking code, case-insensitive
    #[arg(long)]
    pub(crate) code: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Text matched against name, location, and category
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Exact city filter
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// CSV catalog to list instead of the configured one
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

fn load_catalog(config: &AppConfig, override_path: Option<PathBuf>) -> Result<Catalog, AppError> {
    match override_path {
        Some(path) => Ok(Catalog::from_path(path)?),
        None => Ok(Catalog::load(&config.catalog)),
    }
}

fn booking_service(
    config: &AppConfig,
    catalog: Catalog,
) -> BookingService<InMemoryBookingLedger, PaystackInline> {
    BookingService::new(
        Arc::new(catalog),
        Arc::new(InMemoryBookingLedger::seeded()),
        Arc::new(PaystackInline::from_config(&config.payments)),
        FeeSchedule::from(&config.payments),
    )
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config, args.catalog_csv)?;
    let service = booking_service(&config, catalog);

    let duration = args.duration.map(RawDuration::Text);
    let start_date = args.start_date.unwrap_or_else(|| Local::now().date_naive());
    let quote = service.quote_on(PropertyId(args.property_id), duration.as_ref(), start_date)?;

    print!("{}", QuoteReport(&quote));
    Ok(())
}

pub(crate) fn run_status(args: StatusArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = booking_service(&config, Catalog::load(&config.catalog));
    let view = service.status(&args.code)?;

    print!("{}", StatusReport(&view));
    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config, args.catalog_csv)?;
    let filter = PropertyFilter {
        q: args.query,
        city: args.city,
        ..PropertyFilter::default()
    };

    let listings = catalog.search(&filter);
    print!("{}", ListingTable(&listings));
    Ok(())
}

/// Order summary as printed by `quote`.
pub(crate) struct QuoteReport<'a>(pub(crate) &'a BookingQuote);

impl fmt::Display for QuoteReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = self.0;
        let offered = quote
            .acceptable_durations
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(f, "Order summary: {}", quote.property_name)?;
        writeln!(f, "- Start date: {}", quote.start_date.format("%Y-%m-%d"))?;
        writeln!(f, "- Duration: {} (offered: {})", quote.duration, offered)?;
        writeln!(f, "- Price per year: {}", quote.price)?;
        writeln!(f, "- Property total: {}", quote.total_property_price)?;
        writeln!(
            f,
            "- Agent fee ({}%): {}",
            quote.agent_fee_percentage, quote.agent_fee
        )?;
        writeln!(f, "- Walking fee: {}", quote.walking_fee)?;
        writeln!(f, "Total: {}", quote.total)
    }
}

pub(crate) struct StatusReport<'a>(pub(crate) &'a BookingStatusView);

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let booking = &view.booking;

        writeln!(f, "Booking {}: {}", booking.id, view.status_label)?;
        writeln!(f, "- Property: {}", view.property_name)?;
        if let Some(property) = &view.property {
            writeln!(
                f,
                "- Location: {}, {}",
                property.address.city, property.address.state
            )?;
        }
        writeln!(f, "- Booked on: {}", booking.booking_date)?;
        writeln!(
            f,
            "- Stay: {} to {} ({} days, {:.1} years)",
            booking.check_in,
            booking.check_out,
            booking.stay_days(),
            view.stay_length_years
        )?;
        writeln!(f, "- Amount: {}", booking.total_amount)
    }
}

pub(crate) struct ListingTable<'a>(pub(crate) &'a [&'a Property]);

impl fmt::Display for ListingTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listings = self.0;
        if listings.is_empty() {
            return writeln!(f, "No properties match.");
        }

        writeln!(f, "{} properties", listings.len())?;
        for property in listings {
            write!(
                f,
                "- #{} {} ({}) | {} / year | rating {:.1}",
                property.id,
                property.name,
                property.address.city,
                property.price,
                property.rating
            )?;
            if property.has_discount() {
                write!(f, " | {}% off", property.discount)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyhaven::marketplace::booking::{sample_bookings, LeaseDuration};

    #[test]
    fn quote_rendering_lists_every_fee() {
        let catalog = Catalog::sample();
        let property = catalog.get(PropertyId(1)).expect("sample property");
        let quote = FeeSchedule::default().quote(
            property,
            LeaseDuration::new(2).expect("valid duration"),
            NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date"),
        );

        let rendered = QuoteReport(&quote).to_string();
        assert!(rendered.contains("- Duration: 2 Years (offered: 1, 2, 3)"));
        assert!(rendered.contains("- Agent fee (5%): Ghc 320"));
        assert!(rendered.contains("Total: Ghc 6,770"));
    }

    #[test]
    fn status_rendering_falls_back_when_property_is_missing() {
        let booking = sample_bookings().remove(0);
        let view = BookingStatusView::new(booking, None);

        let rendered = StatusReport(&view).to_string();
        assert!(rendered.starts_with("Booking ABC123: Confirmed"));
        assert!(rendered.contains("- Property: Property Not Found"));
        assert!(rendered.contains("(5 days, 0.0 years)"));
    }

    #[test]
    fn empty_listing_rendering_says_so() {
        assert_eq!(ListingTable(&[]).to_string(), "No properties match.\n");

        let catalog = Catalog::sample();
        let top = catalog.top_rated();
        let rendered = ListingTable(&top).to_string();
        assert!(rendered.contains("Villa Ocean Breeze"));
        assert!(rendered.contains("% off"));
    }
}
