use std::collections::BTreeMap;

use tracing::debug;

use super::descriptor::{Factory, FieldDescriptor, FieldParams, FieldSource, FormSection};
use super::domain::{FieldValue, ListingSnapshot, Service};
use super::engine::{self, SectionReport};
use super::fields::{basic, brokerage, pg};
use super::outcome::TrackingFlags;
use super::persisted::PersistedListing;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown form section `{0}`")]
    UnknownSection(String),
    #[error("no field `{name}` in section `{}`", .section.label())]
    UnknownField { section: FormSection, name: String },
}

pub fn parse_section(label: &str) -> Result<FormSection, RegistryError> {
    FormSection::from_label(label).ok_or_else(|| RegistryError::UnknownSection(label.to_string()))
}

/// Registry names of entries whose descriptor key depends on the params.
pub const PRICE: &str = "price";
pub const AVAILABLE_FROM: &str = "available_from";
pub const MAINTENANCE: &str = "maintenance_charges";
pub const BROKERAGE_CHARGEABLE: &str = "brokerage_chargeable";
pub const BROKERAGE_NEGOTIABLE: &str = "brokerage_negotiable";

/// Every field the self-upload wizard knows about, keyed by `(section, name)`.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    entries: BTreeMap<(FormSection, String), FieldSource>,
    order: BTreeMap<FormSection, Vec<String>>,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            entries: BTreeMap::new(),
            order: BTreeMap::new(),
        };
        registry.register_basic();
        registry.register_pg();
        registry
    }

    fn insert(&mut self, section: FormSection, name: &str, source: FieldSource) {
        self.entries.insert((section, name.to_string()), source);
        self.order.entry(section).or_default().push(name.to_string());
    }

    fn insert_static(&mut self, descriptor: FieldDescriptor) {
        let name = descriptor.key.clone();
        self.insert(descriptor.section, &name, FieldSource::Static(descriptor));
    }

    fn register_basic(&mut self) {
        for descriptor in [
            basic::built_up_area(),
            basic::area_unit(),
            basic::plot_area(),
            basic::plot_length(),
            basic::plot_width(),
            basic::facing_road_width(),
            basic::furnish_type(),
            basic::rent(),
            basic::security_deposit(),
            basic::age_of_property(),
            basic::total_bathrooms(),
            basic::total_balconies(),
            basic::covered_parking(),
            basic::open_parking(),
            brokerage::rent_brokerage(),
            brokerage::buy_brokerage(),
        ] {
            self.insert_static(descriptor);
        }

        let factories: [(&str, Factory); 5] = [
            (PRICE, basic::price),
            (AVAILABLE_FROM, basic::available_from),
            (MAINTENANCE, basic::maintenance),
            (BROKERAGE_CHARGEABLE, brokerage::chargeable),
            (BROKERAGE_NEGOTIABLE, brokerage::negotiable),
        ];
        for (name, factory) in factories {
            self.insert(FormSection::Basic, name, FieldSource::Parameterized(factory));
        }
    }

    fn register_pg(&mut self) {
        let details = [
            pg::details_heading(),
            pg::pg_name(),
            pg::total_beds(),
            pg::available_for(),
            pg::suitable_for(),
            pg::meals_available(),
            pg::meal_offerings(),
            pg::meal_speciality(),
            pg::notice_period(),
            pg::lock_in_period(),
            pg::common_areas(),
            pg::manager_heading(),
            pg::property_manager(),
            pg::manager_on_property(),
            pg::rules_heading(),
        ];
        let rooms = [
            pg::room_type(),
            pg::room_beds(),
            pg::room_rent(),
            pg::room_deposit(),
            pg::facilities(),
            pg::bathroom_style(),
        ];
        let extras = [
            pg::extras_heading(),
            pg::move_in_charges(),
            pg::meal_charges(),
            pg::electricity_charges(),
            pg::additional_information(),
        ];

        for descriptor in details
            .into_iter()
            .chain(pg::house_rules())
            .chain(rooms)
            .chain(extras)
        {
            self.insert_static(descriptor);
        }
    }

    /// Descriptor registered under `name`, or `None` when its factory does not apply to
    /// `params` (e.g. price on a rental).
    pub fn get_field(
        &self,
        section: FormSection,
        name: &str,
        params: &FieldParams,
    ) -> Result<Option<FieldDescriptor>, RegistryError> {
        self.entries
            .get(&(section, name.to_string()))
            .map(|source| source.resolve(params))
            .ok_or_else(|| RegistryError::UnknownField {
                section,
                name: name.to_string(),
            })
    }

    pub fn names(&self, section: FormSection) -> &[String] {
        self.order
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Ordered fields shown for `section` under `params`.
    pub fn section_fields(&self, section: FormSection, params: &FieldParams) -> Vec<FieldDescriptor> {
        let names: Vec<&str> = match section {
            FormSection::Basic => basic_layout(params),
            _ => self.names(section).iter().map(String::as_str).collect(),
        };

        names
            .into_iter()
            .filter_map(|name| {
                self.entries
                    .get(&(section, name.to_string()))
                    .and_then(|source| source.resolve(params))
            })
            .collect()
    }

    /// Evaluates a section; the PG rooms section yields one report per room group.
    pub fn evaluate(
        &self,
        section: FormSection,
        params: &FieldParams,
        snapshot: &ListingSnapshot,
        tracking: TrackingFlags,
    ) -> Vec<SectionReport> {
        let fields = self.section_fields(section, params);
        debug!(section = section.label(), fields = fields.len(), "evaluating snapshot");

        if !section.is_grouped() {
            return vec![engine::evaluate_section(section, &fields, snapshot, tracking, None)];
        }

        let groups = snapshot.basic.offerings.len().max(1);
        (0..groups)
            .map(|index| engine::evaluate_section(section, &fields, snapshot, tracking, Some(index)))
            .collect()
    }

    /// Initial values for `section` from a stored listing, keyed by descriptor key.
    pub fn populate(
        &self,
        section: FormSection,
        params: &FieldParams,
        record: &PersistedListing,
    ) -> BTreeMap<String, FieldValue> {
        self.section_fields(section, params)
            .iter()
            .filter_map(|descriptor| {
                engine::populate(descriptor, record).map(|value| (descriptor.key.clone(), value))
            })
            .collect()
    }
}

/// Basic-section layout. PG listings are described by the PG sections only.
fn basic_layout(params: &FieldParams) -> Vec<&'static str> {
    if params.service == Service::Pg {
        return Vec::new();
    }

    let mut names = if params.is_plot {
        vec![
            "area_unit_id",
            "plot_area",
            "plot_length",
            "plot_width",
            "facing_road_width",
        ]
    } else {
        vec!["built_up_area", "furnish_type_id"]
    };

    match params.service {
        Service::Rent => names.extend(["rent", "security_deposit"]),
        Service::Buy | Service::Pg => names.push(PRICE),
    }
    names.extend([AVAILABLE_FROM, MAINTENANCE]);

    if !params.is_plot {
        if !params.is_uc_property {
            names.push("age_of_property");
        }
        names.extend([
            "total_bathroom_count",
            "total_balcony_count",
            "covered_parking_count",
            "open_parking_count",
        ]);
    }

    if params.is_broker_profile {
        let amount = match params.service {
            Service::Rent => "rent_brokerage",
            Service::Buy | Service::Pg => "buy_brokerage",
        };
        names.extend([BROKERAGE_CHARGEABLE, amount, BROKERAGE_NEGOTIABLE]);
    }
    names
}
