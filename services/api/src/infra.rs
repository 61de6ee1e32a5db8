use chrono::NaiveDate;
use keyhaven::marketplace::booking::{
    sample_bookings, BookingCode, BookingLedger, BookingRecord, LedgerError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reservation store backing the status page, keyed by booking code.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBookingLedger {
    records: Arc<Mutex<HashMap<BookingCode, BookingRecord>>>,
}

impl InMemoryBookingLedger {
    pub(crate) fn seeded() -> Self {
        let records = sample_bookings()
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub(crate) fn len(&self) -> Result<usize, LedgerError> {
        Ok(self.records()?.len())
    }

    fn records(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<BookingCode, BookingRecord>>, LedgerError> {
        self.records
            .lock()
            .map_err(|_| LedgerError::Unavailable("ledger mutex poisoned".to_string()))
    }
}

impl BookingLedger for InMemoryBookingLedger {
    fn find(&self, code: &BookingCode) -> Result<Option<BookingRecord>, LedgerError> {
        Ok(self.records()?.get(code).cloned())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyhaven::marketplace::catalog::PropertyId;

    #[test]
    fn seeded_ledger_finds_known_codes() {
        let ledger = InMemoryBookingLedger::seeded();
        assert_eq!(ledger.len().expect("ledger readable"), 5);

        let code = BookingCode::parse("jkl012").expect("valid code");
        let record = ledger.find(&code).expect("lookup").expect("present");
        assert_eq!(record.property_id, PropertyId(11));
    }

    #[test]
    fn poisoned_ledger_reports_unavailable_instead_of_empty() {
        let ledger = InMemoryBookingLedger::seeded();
        let records = ledger.records.clone();
        let _ = std::thread::spawn(move || {
            let _guard = records.lock().expect("first lock");
            panic!("writer died while holding the ledger");
        })
        .join();

        assert!(matches!(ledger.len(), Err(LedgerError::Unavailable(_))));
        let code = BookingCode::parse("ABC123").expect("valid code");
        assert!(matches!(
            ledger.find(&code),
            Err(LedgerError::Unavailable(_))
        ));
    }

    #[test]
    fn parse_date_reports_bad_input() {
        assert!(parse_date(" 2025-02-30 ").is_err());
        assert!(parse_date("2025-02-28").is_ok());
    }
}
