use keyhaven::marketplace::booking::{FeeSchedule, LeaseDuration};
use keyhaven::marketplace::catalog::{Catalog, CatalogError, PropertyFilter, PropertyId};
use keyhaven::marketplace::money::Money;

fn imported() -> Catalog {
    let data = include_bytes!("../listings.csv");
    Catalog::from_reader(&data[..]).expect("listings import")
}

#[test]
fn csv_catalog_imports_every_row() {
    let catalog = imported();
    assert_eq!(catalog.len(), 4);

    let loft = catalog.get(PropertyId(102)).expect("loft present");
    assert_eq!(loft.address.country, "Ghana");
    assert_eq!(loft.agent_fee_percentage, None);
    assert_eq!(loft.walking_fee, None);
    assert!(loft.images.is_empty());

    let beach = catalog.get(PropertyId(103)).expect("beach house present");
    assert_eq!(beach.acceptable_durations, vec![2, 3, 4]);
    assert_eq!(beach.category, vec!["House", "Beachfront"]);
}

#[test]
fn imported_listings_feed_featured_rails() {
    let catalog = imported();

    let top: Vec<_> = catalog.top_rated().iter().map(|p| p.id).collect();
    assert_eq!(top, vec![PropertyId(101), PropertyId(103)]);

    let newest: Vec<_> = catalog.new_listings().iter().map(|p| p.id).collect();
    assert_eq!(
        newest,
        vec![PropertyId(104), PropertyId(103), PropertyId(102), PropertyId(101)]
    );
}

#[test]
fn imported_listing_prices_with_its_own_fees() {
    let catalog = imported();
    let flat = catalog.get(PropertyId(101)).expect("flat present");
    assert_eq!(flat.primary_image(), "https://images.example.com/dzorwulu-1.jpg");

    let quote = FeeSchedule::default().quote(
        flat,
        LeaseDuration::new(2).expect("valid duration"),
        chrono::NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date"),
    );
    // 5,200 + 6% + 60
    assert_eq!(quote.total, Money::from_major(5_572));
}

#[test]
fn search_spans_state_and_category() {
    let catalog = imported();

    let ashanti = catalog.search(&PropertyFilter::text("ashanti"));
    assert_eq!(ashanti.len(), 1);
    assert_eq!(ashanti[0].name, "Adum Loft");

    let houses = catalog.search(&PropertyFilter {
        category: Some("house".to_string()),
        min_beds: Some(4),
        ..PropertyFilter::default()
    });
    assert_eq!(houses.len(), 1);
    assert_eq!(houses[0].id, PropertyId(103));
}

#[test]
fn bad_rows_report_their_line() {
    let csv = "id,name,city,price,image\n\
7,Okay,Accra,100,a.jpg\n\
8,Broken,Accra,-5,b.jpg\n";

    match Catalog::from_reader(csv.as_bytes()) {
        Err(CatalogError::InvalidRow { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected invalid row, got {other:?}"),
    }
}
