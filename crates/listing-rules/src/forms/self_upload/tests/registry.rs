use super::common::*;
use crate::forms::self_upload::descriptor::{FieldParams, FieldType, FormSection};
use crate::forms::self_upload::domain::Service;
use crate::forms::self_upload::registry::{parse_section, RegistryError};

fn keys(section: FormSection, params: &FieldParams) -> Vec<String> {
    registry()
        .section_fields(section, params)
        .into_iter()
        .map(|descriptor| descriptor.key)
        .collect()
}

#[test]
fn unknown_fields_are_errors() {
    match registry().get_field(FormSection::Basic, "swimming_pool", &params(Service::Buy)) {
        Err(RegistryError::UnknownField { section, name }) => {
            assert_eq!(section, FormSection::Basic);
            assert_eq!(name, "swimming_pool");
        }
        other => panic!("expected unknown field, got {other:?}"),
    }
}

#[test]
fn fields_are_scoped_to_their_section() {
    let registry = registry();
    let pg = params(Service::Pg);

    assert!(registry
        .get_field(FormSection::PgDetails, "rent", &pg)
        .is_err());
    let room_deposit = registry
        .get_field(FormSection::PgRooms, "security_deposit", &pg)
        .expect("registered")
        .expect("static");
    assert_eq!(room_deposit.section, FormSection::PgRooms);
    assert_eq!(
        room_deposit.path.as_deref(),
        Some("selfUpload.basic.offerings[].security_deposit")
    );
}

#[test]
fn unknown_section_labels_are_errors() {
    assert_eq!(parse_section("pg_rooms"), Ok(FormSection::PgRooms));
    assert_eq!(
        parse_section("photos"),
        Err(RegistryError::UnknownSection("photos".to_string()))
    );
}

#[test]
fn price_does_not_apply_to_rentals() {
    let registry = registry();

    let rental = registry
        .get_field(FormSection::Basic, "price", &params(Service::Rent))
        .expect("registered");
    assert!(rental.is_none());

    let plot = FieldParams {
        is_plot: true,
        ..params(Service::Buy)
    };
    let price = registry
        .get_field(FormSection::Basic, "price", &plot)
        .expect("registered")
        .expect("applies to sales");
    assert_eq!(price.title, "Plot Price");
}

#[test]
fn factories_are_deterministic() {
    let registry = registry();
    let params = FieldParams {
        service: Service::Rent,
        is_broker_profile: true,
        show_immediate: true,
        ..FieldParams::default()
    };

    for name in ["price", "available_from", "maintenance_charges", "brokerage_chargeable"] {
        let first = registry.get_field(FormSection::Basic, name, &params);
        let second = registry.get_field(FormSection::Basic, name, &params);
        assert_eq!(first, second, "{name}");
    }
}

#[test]
fn brokerage_questions_are_for_brokers_only() {
    let owner = registry()
        .get_field(FormSection::Basic, "brokerage_chargeable", &params(Service::Rent))
        .expect("registered");
    assert!(owner.is_none());

    let owner_keys = keys(FormSection::Basic, &params(Service::Rent));
    assert!(!owner_keys.iter().any(|key| key.contains("brokerage")));

    let broker_keys = keys(FormSection::Basic, &broker(Service::Rent));
    assert!(broker_keys.ends_with(&[
        "is_rent_brokerage_chargeable".to_string(),
        "rent_brokerage".to_string(),
        "is_rent_brokerage_negotiable".to_string(),
    ]));
}

#[test]
fn chargeable_question_is_a_yes_no_radio() {
    let field = field(
        FormSection::Basic,
        "brokerage_chargeable",
        &broker(Service::Buy),
    );

    assert_eq!(field.key, "is_buy_brokerage_chargeable");
    assert_eq!(field.field_type, FieldType::Radio);
    assert_eq!(field.options.len(), 2);
    assert_eq!(
        field.param_state.as_deref(),
        Some("user_flats[0].user_flat_details.is_buy_brokerage_chargeable")
    );
}

#[test]
fn rental_layout_asks_rent_and_deposit() {
    let keys = keys(FormSection::Basic, &params(Service::Rent));

    assert_eq!(
        keys,
        vec![
            "built_up_area",
            "furnish_type_id",
            "rent",
            "security_deposit",
            "available_from",
            "maintenance_charges_rent",
            "age_of_property",
            "total_bathroom_count",
            "total_balcony_count",
            "covered_parking_count",
            "open_parking_count",
        ]
    );
}

#[test]
fn plot_layout_asks_dimensions_instead_of_rooms() {
    let plot = FieldParams {
        is_plot: true,
        ..params(Service::Buy)
    };
    let keys = keys(FormSection::Basic, &plot);

    assert_eq!(
        keys,
        vec![
            "area_unit_id",
            "plot_area",
            "plot_length",
            "plot_width",
            "facing_road_width",
            "price",
        ]
    );
}

#[test]
fn under_construction_sales_skip_age_and_ask_possession() {
    let params = FieldParams {
        is_uc_property: true,
        ..params(Service::Buy)
    };
    let keys = keys(FormSection::Basic, &params);

    assert!(keys.contains(&"available_from".to_string()));
    assert!(!keys.contains(&"age_of_property".to_string()));
    assert!(keys.contains(&"maintenance_charges_buy".to_string()));
}

#[test]
fn pg_listings_use_the_pg_sections() {
    let pg = params(Service::Pg);
    assert!(keys(FormSection::Basic, &pg).is_empty());

    let details = registry().section_fields(FormSection::PgDetails, &pg);
    assert!(details.first().is_some_and(|field| field.is_heading()));
    let rules = details
        .iter()
        .skip_while(|field| field.content.as_deref() != Some("PG RULES"))
        .skip(1)
        .count();
    assert_eq!(rules, 8);

    assert_eq!(
        keys(FormSection::PgRooms, &pg),
        vec![
            "occupancy_type_id",
            "total_beds",
            "monthly_rent",
            "security_deposit",
            "amenity_ids",
            "offering_details.toilet_type_id",
        ]
    );
}

#[test]
fn every_section_has_unique_keys() {
    let registry = registry();
    for section in FormSection::ALL {
        let names = registry.names(section);
        let mut sorted = names.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), names.len(), "{}", section.label());
    }
}
