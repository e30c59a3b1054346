use super::*;
use crate::catalog::{Catalog, CatalogPolicy};
use crate::fixtures::{complete_selection, sample_catalog};

fn price(catalog: &Catalog, selection: &SelectionState) -> Result<PriceBreakdown, PricingError> {
    catalog.price("roller-blackout", selection)
}

#[test]
fn banded_base_plus_option_deltas() {
    let catalog = sample_catalog();
    let breakdown = price(&catalog, &complete_selection()).expect("price");

    assert_eq!((breakdown.width_band, breakdown.height_band), (1, 0));
    assert_eq!(breakdown.base_price, Decimal::from(140));
    assert_eq!(breakdown.total, Decimal::from(170));
    assert_eq!(breakdown.options_total(), Decimal::from(30));
    assert_eq!(breakdown.currency_code, "USD");
}

#[test]
fn total_is_base_plus_sum_of_deltas() {
    let catalog = sample_catalog();
    let selection = complete_selection()
        .with_option("valance", "fabric-wrapped")
        .with_option("room", "kitchen");
    let breakdown = price(&catalog, &selection).expect("price");
    let sum: Decimal = breakdown.adjustments.iter().map(|a| a.delta).sum();
    assert_eq!(breakdown.total, breakdown.base_price + sum);
    assert_eq!(breakdown.total, Decimal::from(205));
}

#[test]
fn adjustments_follow_display_order_not_entry_order() {
    let catalog = sample_catalog();
    let forwards = SelectionState::new()
        .with_size(Decimal::from(600), Decimal::from(799))
        .with_option("room", "bedroom")
        .with_option("mount", "outside")
        .with_option("fabric-type", "blockout")
        .with_option("colour", "charcoal")
        .with_option("headrail", "cassette");
    let mut backwards = SelectionState::new();
    backwards.select("headrail", "cassette");
    backwards.select("colour", "charcoal");
    backwards.select("fabric-type", "blockout");
    backwards.select("mount", "outside");
    backwards.select("room", "bedroom");
    backwards = backwards.with_size(Decimal::from(600), Decimal::from(799));

    let a = price(&catalog, &forwards).expect("forwards");
    let b = price(&catalog, &backwards).expect("backwards");
    assert_eq!(a, b);

    let order: Vec<CategoryKind> = a.adjustments.iter().map(|adj| adj.category).collect();
    assert_eq!(
        order,
        vec![
            CategoryKind::Room,
            CategoryKind::Mount,
            CategoryKind::FabricType,
            CategoryKind::Colour,
            CategoryKind::Headrail,
        ]
    );
}

#[test]
fn zero_delta_options_are_listed() {
    let catalog = sample_catalog();
    let breakdown = price(&catalog, &complete_selection()).expect("price");
    let mount = breakdown
        .adjustments
        .iter()
        .find(|a| a.category == CategoryKind::Mount)
        .expect("mount adjustment");
    assert_eq!(mount.delta, Decimal::ZERO);
    assert_eq!(mount.option_name, "Inside Mount");
}

#[test]
fn missing_required_category_is_named() {
    let catalog = sample_catalog();
    let mut selection = complete_selection();
    selection.deselect("fabric-type");
    let err = price(&catalog, &selection).unwrap_err();
    assert_eq!(
        err,
        PricingError::MissingSelection {
            category: "fabric-type".to_string()
        }
    );
}

#[test]
fn optional_category_may_be_omitted() {
    let catalog = sample_catalog();
    let mut selection = complete_selection();
    selection.deselect("headrail");
    let breakdown = price(&catalog, &selection).expect("headrail is optional");
    assert_eq!(breakdown.total, Decimal::from(160));
}

#[test]
fn missing_dimension_is_reported_after_mount() {
    let catalog = sample_catalog();
    let mut selection = complete_selection();
    selection.width_mm = None;
    selection.deselect("mount");
    selection.deselect("colour");

    let issues = validate_selection(
        catalog.product("roller-blackout").expect("product"),
        &catalog.resolve_catalog("roller-blackout").expect("resolve"),
        &selection,
    );
    let fields: Vec<Option<String>> = issues.iter().map(PricingError::field).collect();
    assert_eq!(
        fields,
        vec![
            Some("mount".to_string()),
            Some("width".to_string()),
            Some("colour".to_string()),
        ]
    );
}

#[test]
fn unknown_option_is_invalid() {
    let catalog = sample_catalog();
    let selection = complete_selection().with_option("headrail", "deluxe");
    let err = price(&catalog, &selection).unwrap_err();
    assert_eq!(
        err,
        PricingError::InvalidOption {
            category: "headrail".to_string(),
            option: "deluxe".to_string()
        }
    );
}

#[test]
fn completeness_is_checked_before_option_validity() {
    let catalog = sample_catalog();
    let mut selection = complete_selection().with_option("room", "garage");
    selection.deselect("colour");
    let err = price(&catalog, &selection).unwrap_err();
    assert!(
        matches!(err, PricingError::MissingSelection { ref category } if category == "colour"),
        "got {err:?}"
    );
}

#[test]
fn category_not_offered_is_not_found() {
    let catalog = sample_catalog();
    // Motorization exists in the catalog but this product does not offer it.
    let selection = complete_selection().with_option("motorization", "battery");
    let err = price(&catalog, &selection).unwrap_err();
    assert_eq!(
        err,
        PricingError::NotFound {
            kind: "category",
            id: "motorization".to_string()
        }
    );
}

#[test]
fn unknown_category_key_is_not_found() {
    let catalog = sample_catalog();
    let selection = complete_selection().with_option("pelmet", "box");
    assert!(matches!(
        price(&catalog, &selection),
        Err(PricingError::NotFound { kind: "category", .. })
    ));
}

#[test]
fn dimension_errors_propagate_from_matrix() {
    let catalog = sample_catalog();
    let below = complete_selection().with_size(Decimal::from(299), Decimal::from(500));
    let above = complete_selection().with_size(Decimal::from(500), Decimal::from(1200));
    assert!(matches!(
        price(&catalog, &below),
        Err(PricingError::OutOfRange {
            dimension: Dimension::Width,
            ..
        })
    ));
    assert!(matches!(
        price(&catalog, &above),
        Err(PricingError::OutOfRange {
            dimension: Dimension::Height,
            ..
        })
    ));
}

#[test]
fn height_at_band_upper_bound_uses_next_band() {
    let catalog = sample_catalog();
    let selection = complete_selection().with_size(Decimal::from(600), Decimal::from(800));
    let breakdown = price(&catalog, &selection).expect("price");
    assert_eq!(breakdown.height_band, 1);
    assert_eq!(breakdown.base_price, Decimal::from(175));
}

#[test]
fn misconfigured_matrix_blocks_pricing() {
    let mut catalog = sample_catalog();
    catalog.products[0].price_matrix.prices[1].truncate(0);
    let err = price(&catalog, &complete_selection()).unwrap_err();
    assert!(!err.is_user_correctable());
    assert_eq!(
        err,
        PricingError::Misconfigured {
            width_band: 1,
            height_band: 0
        }
    );
}

#[test]
fn pricing_is_deterministic() {
    let catalog = sample_catalog();
    let first = price(&catalog, &complete_selection()).expect("first");
    for _ in 0..10 {
        assert_eq!(price(&catalog, &complete_selection()).expect("again"), first);
    }
}

#[test]
fn negative_total_is_refused() {
    let mut catalog = sample_catalog();
    catalog.categories[2].options[1].price_delta = Decimal::from(-500);
    let err = price(&catalog, &complete_selection()).unwrap_err();
    assert!(matches!(err, PricingError::DataIntegrity(_)), "got {err:?}");
}

#[test]
fn overflowing_total_is_an_integrity_error() {
    let mut catalog = sample_catalog();
    catalog.products[0].price_matrix.prices[1][0] = Decimal::MAX;
    assert!(catalog.validate(CatalogPolicy::default()).is_ok());

    let err = price(&catalog, &complete_selection()).unwrap_err();
    assert!(matches!(err, PricingError::DataIntegrity(_)), "got {err:?}");
}

#[test]
fn breakdown_survives_json_round_trip() {
    let catalog = sample_catalog();
    let breakdown = price(&catalog, &complete_selection()).expect("price");
    let json = serde_json::to_string(&breakdown).expect("serialize");
    let decoded: PriceBreakdown = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded.total, breakdown.total);
    assert_eq!(decoded.adjustments, breakdown.adjustments);
}

#[test]
fn verify_accepts_matching_breakdown() {
    let catalog = sample_catalog();
    let selection = complete_selection();
    let client = price(&catalog, &selection).expect("client price");
    let server = catalog
        .verify("roller-blackout", &selection, &client)
        .expect("verify");
    assert_eq!(server, client);
}

#[test]
fn verify_rejects_tampered_total() {
    let catalog = sample_catalog();
    let selection = complete_selection();
    let mut client = price(&catalog, &selection).expect("client price");
    client.total = Decimal::from(1);
    let err = catalog
        .verify("roller-blackout", &selection, &client)
        .unwrap_err();
    assert_eq!(
        err,
        PricingError::PriceMismatch {
            expected: Decimal::from(170),
            claimed: Decimal::from(1)
        }
    );
}

#[test]
fn verify_rejects_relabelled_currency() {
    let catalog = sample_catalog();
    let selection = complete_selection();
    let mut client = price(&catalog, &selection).expect("client price");
    client.currency_code = "EUR".to_string();
    assert!(matches!(
        catalog.verify("roller-blackout", &selection, &client),
        Err(PricingError::PriceMismatch { .. })
    ));
}

#[test]
fn verify_rejects_reordered_adjustments() {
    let catalog = sample_catalog();
    let selection = complete_selection();
    let mut client = price(&catalog, &selection).expect("client price");
    client.adjustments.reverse();
    assert!(matches!(
        catalog.verify("roller-blackout", &selection, &client),
        Err(PricingError::PriceMismatch { .. })
    ));
}

#[test]
fn label_does_not_affect_price() {
    let catalog = sample_catalog();
    let labelled = complete_selection().with_label("Kitchen left");
    assert_eq!(
        price(&catalog, &labelled).expect("labelled").total,
        Decimal::from(170)
    );
}
