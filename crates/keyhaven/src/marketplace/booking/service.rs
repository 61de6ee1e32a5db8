use chrono::{DateTime, Local, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::checkout::{
    BookingRequest, CheckoutError, CheckoutOrder, OrderSummary, PaymentError, PaymentGateway,
};
use super::duration::{
    default_duration, duration_options, ensure_accepted, DurationError, DurationOption,
    RawDuration,
};
use super::pricing::{BookingQuote, FeeSchedule};
use super::status::{BookingCode, BookingCodeError, BookingLedger, BookingStatusView, LedgerError};
use crate::marketplace::catalog::{Catalog, CatalogError, Property, PropertyId};

#[derive(Debug, thiserror::Error)]
pub enum BookingServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Duration(#[from] DurationError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error(transparent)]
    Code(#[from] BookingCodeError),
    #[error("Booking not found: {0}")]
    BookingNotFound(BookingCode),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Durations offered for a listing, with the preselected one.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DurationChoices {
    pub property_id: PropertyId,
    pub options: Vec<DurationOption>,
    pub default: u8,
}

/// Pricing, checkout, and status lookup over one catalog.
pub struct BookingService<L, G> {
    catalog: Arc<Catalog>,
    ledger: Arc<L>,
    gateway: Arc<G>,
    fees: FeeSchedule,
}

impl<L, G> BookingService<L, G>
where
    L: BookingLedger + 'static,
    G: PaymentGateway + 'static,
{
    pub fn new(catalog: Arc<Catalog>, ledger: Arc<L>, gateway: Arc<G>, fees: FeeSchedule) -> Self {
        Self {
            catalog,
            ledger,
            gateway,
            fees,
        }
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    fn property(&self, id: PropertyId) -> Result<&Property, BookingServiceError> {
        Ok(self.catalog.require(id)?)
    }

    pub fn durations(&self, id: PropertyId) -> Result<DurationChoices, BookingServiceError> {
        let property = self.property(id)?;
        Ok(DurationChoices {
            property_id: id,
            options: duration_options(property),
            default: default_duration(property).years(),
        })
    }

    /// Quote starting today. A missing duration takes the listing's default option.
    pub fn quote(
        &self,
        id: PropertyId,
        duration: Option<&RawDuration>,
    ) -> Result<BookingQuote, BookingServiceError> {
        self.quote_on(id, duration, Local::now().date_naive())
    }

    pub fn quote_on(
        &self,
        id: PropertyId,
        duration: Option<&RawDuration>,
        start_date: NaiveDate,
    ) -> Result<BookingQuote, BookingServiceError> {
        let property = self.property(id)?;
        let duration = match duration.filter(|raw| !raw.is_blank()) {
            Some(raw) => raw.resolve()?,
            None => default_duration(property),
        };
        ensure_accepted(property, duration)?;

        let quote = self.fees.quote(property, duration, start_date);
        debug!(
            property_id = %id,
            years = duration.years(),
            total = %quote.total,
            "booking quote computed"
        );
        Ok(quote)
    }

    pub fn checkout(&self, request: BookingRequest) -> Result<OrderSummary, BookingServiceError> {
        self.checkout_at(request, Utc::now())
    }

    pub fn checkout_at(
        &self,
        request: BookingRequest,
        placed_at: DateTime<Utc>,
    ) -> Result<OrderSummary, BookingServiceError> {
        let property = self.property(request.property_id)?;
        let (contact, raw_duration) = request.validate()?;
        let duration = raw_duration.resolve().map_err(CheckoutError::from)?;
        ensure_accepted(property, duration).map_err(CheckoutError::from)?;

        let start_date = placed_at.with_timezone(&Local).date_naive();
        let quote = self.fees.quote(property, duration, start_date);
        let order = CheckoutOrder {
            quote,
            contact,
            placed_at,
        };

        let checkout = self.gateway.begin_checkout(&order).map_err(|error| {
            warn!(property_id = %request.property_id, %error, "payment checkout unavailable");
            error
        })?;

        info!(
            property_id = %request.property_id,
            reference = %checkout.reference,
            amount = checkout.amount,
            "checkout session prepared"
        );

        Ok(OrderSummary {
            quote: order.quote,
            contact: order.contact,
            checkout,
        })
    }

    pub fn status(&self, raw_code: &str) -> Result<BookingStatusView, BookingServiceError> {
        let code = BookingCode::parse(raw_code)?;
        let booking = self
            .ledger
            .find(&code)?
            .ok_or_else(|| BookingServiceError::BookingNotFound(code.clone()))?;

        let property = self.catalog.get(booking.property_id).cloned();
        if property.is_none() {
            warn!(code = %code, property_id = %booking.property_id, "booking references unknown property");
        }

        Ok(BookingStatusView::new(booking, property))
    }
}
