//! Output document value types.
//!
//! Plain data mirroring the NeTEx frame hierarchy. Values are built by the
//! functions in `builder` and `compose`, already carrying their final ids
//! and references; nothing here is mutated after construction.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

fn is_zero(n: &i64) -> bool {
    *n == 0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MultilingualString {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactStructure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// --- resources ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Authority {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_number: Option<String>,
    pub name: MultilingualString,
    pub legal_name: MultilingualString,
    pub contact_details: ContactStructure,
    pub organisation_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Operator {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_number: Option<String>,
    pub name: MultilingualString,
    pub legal_name: MultilingualString,
    pub contact_details: ContactStructure,
    pub customer_service_contact_details: ContactStructure,
    pub organisation_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Branding {
    pub id: String,
    pub name: MultilingualString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// --- network, lines and routes ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Network {
    pub id: String,
    pub name: MultilingualString,
    pub authority_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Line {
    pub id: String,
    pub name: MultilingualString,
    pub transport_mode: String,
    pub transport_submode: String,
    pub public_code: String,
    pub operator_ref: String,
    pub branding_ref: String,
    pub represented_by_group_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PointOnRoute {
    pub id: String,
    pub order: u32,
    pub route_point_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Route {
    pub id: String,
    pub name: MultilingualString,
    pub short_name: MultilingualString,
    pub line_ref: String,
    pub points_in_sequence: Vec<PointOnRoute>,
}

// --- stops ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PointProjection {
    pub id: String,
    pub project_to_point_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoutePoint {
    pub id: String,
    pub projections: Vec<PointProjection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduledStopPoint {
    pub id: String,
    pub name: MultilingualString,
    pub short_name: MultilingualString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PassengerStopAssignment {
    pub id: String,
    pub order: u32,
    pub scheduled_stop_point_ref: String,
    pub stop_place_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quay_ref: Option<String>,
}

// --- journey patterns and displays ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Via {
    pub destination_display_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DestinationDisplay {
    pub id: String,
    pub front_text: MultilingualString,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vias: Vec<Via>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopPointInJourneyPattern {
    pub id: String,
    pub order: u32,
    pub scheduled_stop_point_ref: String,
    pub for_alighting: bool,
    pub for_boarding: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_display_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct JourneyPattern {
    pub id: String,
    pub name: MultilingualString,
    pub route_ref: String,
    pub points_in_sequence: Vec<StopPointInJourneyPattern>,
}

// --- timetable and calendar ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimetabledPassingTime {
    pub id: String,
    pub stop_point_in_journey_pattern_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "is_zero")]
    pub arrival_day_offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "is_zero")]
    pub departure_day_offset: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceJourney {
    pub id: String,
    pub public_code: String,
    pub departure_time: NaiveTime,
    pub day_type_refs: Vec<String>,
    pub journey_pattern_ref: String,
    pub operator_ref: String,
    pub line_ref: String,
    pub passing_times: Vec<TimetabledPassingTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DayType {
    pub id: String,
    pub name: MultilingualString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DayTypeAssignment {
    pub id: String,
    pub order: u32,
    pub date: NaiveDate,
    pub day_type_ref: String,
}

// --- frames ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceFrame {
    pub id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authorities: Vec<Authority>,
    pub operators: Vec<Operator>,
    pub brandings: Vec<Branding>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceFrame {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub route_points: Vec<RoutePoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<Line>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub destination_displays: Vec<DestinationDisplay>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scheduled_stop_points: Vec<ScheduledStopPoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop_assignments: Vec<PassengerStopAssignment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub journey_patterns: Vec<JourneyPattern>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimetableFrame {
    pub id: String,
    pub vehicle_journeys: Vec<ServiceJourney>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceCalendarFrame {
    pub id: String,
    pub day_types: Vec<DayType>,
    pub day_type_assignments: Vec<DayTypeAssignment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Frames {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_frame: Option<ResourceFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_frame: Option<ServiceFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timetable_frame: Option<TimetableFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_calendar_frame: Option<ServiceCalendarFrame>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AvailabilityCondition {
    pub id: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodespaceElement {
    pub id: String,
    pub xmlns: String,
    pub xmlns_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocaleStructure {
    pub time_zone: String,
    pub default_language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FrameDefaults {
    pub default_locale: LocaleStructure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompositeFrame {
    pub id: String,
    pub validity_conditions: Vec<AvailabilityCondition>,
    pub codespaces: Vec<CodespaceElement>,
    pub frame_defaults: FrameDefaults,
    pub frames: Frames,
}

/// Root of every output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicationDelivery {
    pub version: String,
    pub publication_timestamp: DateTime<Utc>,
    pub participant_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub data_objects: Vec<CompositeFrame>,
}

impl PublicationDelivery {
    /// Frames of the first composite frame.
    pub fn frames(&self) -> Option<&Frames> {
        self.data_objects.first().map(|c| &c.frames)
    }
}
