//! Stateless constructors for leaf elements.

use crate::domain::AirlineCode;
use crate::schedule::{AvailabilityPeriod, LineDataSet};
use crate::stops::{StopReference, StopReferenceData};

use super::config::{AuthorityInfo, DocumentConfig};
use super::error::ConversionError;
use super::ids::{Codespace, ElementType};
use super::model::{
    Authority, AvailabilityCondition, Branding, CodespaceElement, ContactStructure, FrameDefaults,
    Line, LocaleStructure, MultilingualString, Network, Operator, PassengerStopAssignment,
    PointProjection, RoutePoint, ScheduledStopPoint,
};

const TRANSPORT_MODE: &str = "air";
const TRANSPORT_SUBMODE: &str = "domesticFlight";

pub fn multilingual(value: impl Into<String>) -> MultilingualString {
    MultilingualString {
        value: value.into(),
        lang: None,
    }
}

pub fn contact(url: &str, phone: Option<&str>) -> ContactStructure {
    ContactStructure {
        phone: phone.map(str::to_string),
        url: Some(url.to_string()),
        email: None,
    }
}

/// Stop reference for an airport a line depends on.
pub fn require_stop(
    stops: &StopReferenceData,
    airport: crate::domain::AirportCode,
) -> Result<&StopReference, ConversionError> {
    stops
        .get(airport)
        .ok_or(ConversionError::MissingReferenceData { airport })
}

pub fn authority_id(codespace: &Codespace, authority: &AuthorityInfo) -> String {
    codespace.id(ElementType::Authority, &authority.local_id)
}

pub fn authority(codespace: &Codespace, authority: &AuthorityInfo) -> Authority {
    Authority {
        id: authority_id(codespace, authority),
        company_number: Some(authority.company_number.clone()),
        name: multilingual(&authority.name),
        legal_name: multilingual(&authority.legal_name),
        contact_details: contact(&authority.url, authority.phone.as_deref()),
        organisation_type: "authority".to_string(),
    }
}

/// Operator for an airline, with contact details from the airline table
/// when the airline is known.
pub fn operator(codespace: &Codespace, airline: AirlineCode) -> Operator {
    let info = airline.info();
    let legal_name = info.map_or(airline.name(), |i| i.legal_name);
    let contact_details = info
        .map(|i| contact(i.url, i.phone))
        .unwrap_or_default();
    Operator {
        id: codespace.id(ElementType::Operator, airline.as_str()),
        company_number: None,
        name: multilingual(airline.name()),
        legal_name: multilingual(legal_name),
        customer_service_contact_details: contact_details.clone(),
        contact_details,
        organisation_type: "operator".to_string(),
    }
}

pub fn branding(codespace: &Codespace, airline: AirlineCode) -> Branding {
    Branding {
        id: codespace.id(ElementType::Branding, airline.as_str()),
        name: multilingual(airline.name()),
        url: airline.info().map(|i| i.url.to_string()),
    }
}

pub fn network(codespace: &Codespace, config: &DocumentConfig, airline: AirlineCode) -> Network {
    Network {
        id: codespace.id(ElementType::Network, airline.as_str()),
        name: multilingual(airline.name()),
        authority_ref: authority_id(codespace, &config.authority),
    }
}

pub fn line(codespace: &Codespace, line: &LineDataSet) -> Line {
    let airline = line.airline.as_str();
    Line {
        id: codespace.id(ElementType::Line, &line.local_id()),
        name: multilingual(&line.line_name),
        transport_mode: TRANSPORT_MODE.to_string(),
        transport_submode: TRANSPORT_SUBMODE.to_string(),
        public_code: line.line_designation.clone(),
        operator_ref: codespace.id(ElementType::Operator, airline),
        branding_ref: codespace.id(ElementType::Branding, airline),
        represented_by_group_ref: codespace.id(ElementType::Network, airline),
    }
}

pub fn scheduled_stop_point(stop: &StopReference) -> ScheduledStopPoint {
    ScheduledStopPoint {
        id: stop.scheduled_stop_point_id.clone(),
        name: multilingual(stop.airport.name()),
        short_name: multilingual(stop.airport.short_name()),
    }
}

pub fn route_point(codespace: &Codespace, stop: &StopReference) -> RoutePoint {
    RoutePoint {
        id: stop.route_point_id.clone(),
        projections: vec![PointProjection {
            id: codespace.id(ElementType::PointProjection, stop.airport.as_str()),
            project_to_point_ref: stop.scheduled_stop_point_id.clone(),
        }],
    }
}

pub fn stop_assignment(
    codespace: &Codespace,
    stop: &StopReference,
    order: u32,
) -> PassengerStopAssignment {
    PassengerStopAssignment {
        id: codespace.id(ElementType::PassengerStopAssignment, stop.airport.as_str()),
        order,
        scheduled_stop_point_ref: stop.scheduled_stop_point_id.clone(),
        stop_place_ref: stop.stop_place_id.clone(),
        quay_ref: stop.quay_ref.clone(),
    }
}

pub fn availability_condition(
    codespace: &Codespace,
    local_id: &str,
    period: AvailabilityPeriod,
) -> AvailabilityCondition {
    AvailabilityCondition {
        id: codespace.id(ElementType::AvailabilityCondition, local_id),
        from_date: period.from,
        to_date: period.to,
    }
}

pub fn codespace_element(codespace: &Codespace) -> CodespaceElement {
    CodespaceElement {
        id: codespace.codespace_id(),
        xmlns: codespace.xmlns.clone(),
        xmlns_url: codespace.xmlns_url.clone(),
    }
}

pub fn frame_defaults(config: &DocumentConfig) -> FrameDefaults {
    FrameDefaults {
        default_locale: LocaleStructure {
            time_zone: config.time_zone.name().to_string(),
            default_language: config.default_language.clone(),
        },
    }
}
