//! Booking flow: lease options, the fee breakdown, checkout handoff, and reservation status.

pub mod checkout;
pub mod duration;
pub mod pricing;
pub mod router;
pub mod service;
pub mod status;

pub use checkout::{
    BookingRequest, CheckoutError, CheckoutSession, ContactDetails, OrderSummary, PaymentError,
    PaymentGateway, PaystackInline,
};
pub use duration::{DurationError, DurationOption, LeaseDuration, RawDuration};
pub use pricing::{BookingQuote, FeeSchedule};
pub use router::booking_router;
pub use service::{BookingService, BookingServiceError, DurationChoices};
pub use status::{
    sample_bookings, BookingCode, BookingCodeError, BookingLedger, BookingRecord, BookingStatus,
    BookingStatusView, LedgerError,
};
