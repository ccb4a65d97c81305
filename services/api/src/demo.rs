use crate::infra::{parse_date, parse_section, parse_service};
use chrono::{Local, NaiveDate};
use clap::Args;
use listing_rules::error::AppError;
use listing_rules::forms::self_upload::{
    FieldParams, FieldRegistry, FieldResult, FormSection, ListingSnapshot, PgOffering,
    SectionReport, Service, TrackingFlags,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// JSON file holding a listing snapshot
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Wizard section to evaluate (basic, pg_details, pg_rooms, pg_extras)
    #[arg(long, value_parser = parse_section, default_value = "basic")]
    pub(crate) section: FormSection,
    /// Service the listing is created for; defaults to the snapshot's own service
    #[arg(long, value_parser = parse_service)]
    pub(crate) service: Option<Service>,
    /// Listing is a plot
    #[arg(long)]
    pub(crate) plot: bool,
    /// Listing is under construction
    #[arg(long)]
    pub(crate) under_construction: bool,
    /// Listing is posted by a broker profile
    #[arg(long)]
    pub(crate) broker: bool,
    /// Include analytics events for failed checks
    #[arg(long)]
    pub(crate) track: bool,
    /// Print the raw JSON reports instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date the sample listings are evaluated on (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.snapshot)?;
    let snapshot: ListingSnapshot = serde_json::from_str(&raw)?;

    let params = FieldParams {
        service: args.service.unwrap_or(snapshot.service),
        is_plot: args.plot,
        is_uc_property: args.under_construction,
        is_broker_profile: args.broker,
        ..FieldParams::default()
    };
    let tracking = if args.track {
        TrackingFlags::enabled()
    } else {
        TrackingFlags::disabled()
    };

    let registry = FieldRegistry::new();
    let reports = registry.evaluate(args.section, &params, &snapshot, tracking);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            render_report(report);
        }
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let registry = FieldRegistry::new();

    println!("Self-upload field rules demo (evaluated {as_of})");

    println!("\n2 BHK apartment for rent");
    let rental = sample_rental(as_of);
    let params = FieldParams {
        service: Service::Rent,
        ..FieldParams::default()
    };
    for report in registry.evaluate(FormSection::Basic, &params, &rental, TrackingFlags::enabled()) {
        render_report(&report);
    }

    println!("\nPlot for sale by a broker");
    let plot = sample_plot(as_of);
    let params = FieldParams {
        service: Service::Buy,
        is_plot: true,
        is_broker_profile: true,
        ..FieldParams::default()
    };
    for report in registry.evaluate(FormSection::Basic, &params, &plot, TrackingFlags::enabled()) {
        render_report(&report);
    }

    println!("\nPG rooms");
    let pg = sample_pg(as_of);
    let params = FieldParams {
        service: Service::Pg,
        ..FieldParams::default()
    };
    for report in registry.evaluate(FormSection::PgRooms, &params, &pg, TrackingFlags::default()) {
        render_report(&report);
    }

    Ok(())
}

fn render_report(report: &SectionReport) {
    let group = report
        .group_index
        .map(|index| format!(" (room {})", index + 1))
        .unwrap_or_default();
    let status = if report.complete { "complete" } else { "incomplete" };
    println!(
        "- {}{group}: {status}, {}/{} answered",
        report.section.label(),
        report.answered,
        report.visible
    );

    for field in report.fields.iter().filter(|field| field.visible) {
        match &field.result {
            FieldResult::Rejected(message) => println!("    {}: {message}", field.key),
            FieldResult::Incomplete => println!("    {}: required", field.key),
            FieldResult::Valid | FieldResult::Unanswered => {}
        }
        if let Some(warning) = &field.warning {
            println!("    {} (warning): {warning}", field.key);
        }
    }

    let events = report.analytics().count();
    if events > 0 {
        println!("    {events} analytics event(s) queued");
    }
}

fn sample_rental(as_of: NaiveDate) -> ListingSnapshot {
    let mut listing = ListingSnapshot::new(Service::Rent, as_of);
    let basic = &mut listing.basic;
    basic.apartment_type_id = Some(3);
    basic.property_type_id = Some(1);
    basic.built_up_area = Some(1_050.0);
    basic.furnish_type_id = Some(2);
    basic.rent = Some(28_000.0);
    basic.security_deposit = Some(84_000.0);
    basic.available_from = Some(as_of);
    basic.maintenance_charges_rent = Some(16_000.0);
    basic.age_of_property = Some(6.0);
    basic.total_bathroom_count = Some(2);
    basic.total_balcony_count = Some(1);
    basic.covered_parking_count = Some(1);
    basic.open_parking_count = Some(0);
    listing
}

fn sample_plot(as_of: NaiveDate) -> ListingSnapshot {
    let mut listing = ListingSnapshot::new(Service::Buy, as_of);
    let basic = &mut listing.basic;
    basic.property_type_id = Some(5);
    basic.area_unit_id = Some(3);
    basic.plot_area = Some(240.0);
    basic.plot_length = Some(20.0);
    basic.plot_width = Some(10.0);
    basic.facing_road_width = Some(3.0);
    basic.price = Some(6_000_000.0);
    basic.is_buy_brokerage_chargeable = Some(true);
    listing
}

fn sample_pg(as_of: NaiveDate) -> ListingSnapshot {
    let mut listing = ListingSnapshot::new(Service::Pg, as_of);
    listing.basic.offerings = vec![
        PgOffering {
            occupancy_type_id: Some(5),
            monthly_rent: Some(9_500.0),
            amenity_ids: vec![74, 78],
            ..PgOffering::default()
        },
        PgOffering {
            occupancy_type_id: Some(4),
            monthly_rent: Some(15_000.0),
            security_deposit: Some(30_000.0),
            amenity_ids: vec![74, 76, 11],
            ..PgOffering::default()
        },
    ];
    listing
}
