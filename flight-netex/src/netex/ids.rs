//! Identifier composition.
//!
//! Every output object is named `"<Codespace>:<ElementType>:<LocalId>"`.
//! Local ids are either stable codes (airport, airline) or a short decimal
//! hash of a composite key. The hash is deterministic across runs but not
//! collision-free; see [`super::context::ConversionContext`] for how
//! collisions are reported.

use std::fmt;

/// Digits kept from [`short_hash`] unless a caller asks otherwise.
pub const DEFAULT_HASH_WIDTH: usize = 10;

/// Namespace that owns every id in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codespace {
    /// Short prefix, e.g. "AVI"
    pub xmlns: String,
    pub xmlns_url: String,
}

impl Codespace {
    pub fn new(xmlns: impl Into<String>, xmlns_url: impl Into<String>) -> Self {
        Self {
            xmlns: xmlns.into(),
            xmlns_url: xmlns_url.into(),
        }
    }

    /// Compose an id in this codespace.
    pub fn id(&self, element_type: ElementType, local_id: &str) -> String {
        compose_id(&self.xmlns, element_type.as_str(), local_id)
    }

    /// Id of the `Codespace` element itself.
    pub fn codespace_id(&self) -> String {
        self.xmlns.to_lowercase()
    }
}

impl Default for Codespace {
    fn default() -> Self {
        Self::new("AVI", "http://www.rutebanken.org/ns/avi")
    }
}

/// Element types that appear in composed ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Authority,
    AvailabilityCondition,
    Branding,
    CompositeFrame,
    DayType,
    DayTypeAssignment,
    DestinationDisplay,
    JourneyPattern,
    Line,
    Network,
    Operator,
    PassengerStopAssignment,
    PointOnRoute,
    PointProjection,
    ResourceFrame,
    Route,
    RoutePoint,
    ScheduledStopPoint,
    ServiceCalendarFrame,
    ServiceFrame,
    ServiceJourney,
    SiteFrame,
    StopPlace,
    StopPointInJourneyPattern,
    TimetableFrame,
    TimetabledPassingTime,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Authority => "Authority",
            ElementType::AvailabilityCondition => "AvailabilityCondition",
            ElementType::Branding => "Branding",
            ElementType::CompositeFrame => "CompositeFrame",
            ElementType::DayType => "DayType",
            ElementType::DayTypeAssignment => "DayTypeAssignment",
            ElementType::DestinationDisplay => "DestinationDisplay",
            ElementType::JourneyPattern => "JourneyPattern",
            ElementType::Line => "Line",
            ElementType::Network => "Network",
            ElementType::Operator => "Operator",
            ElementType::PassengerStopAssignment => "PassengerStopAssignment",
            ElementType::PointOnRoute => "PointOnRoute",
            ElementType::PointProjection => "PointProjection",
            ElementType::ResourceFrame => "ResourceFrame",
            ElementType::Route => "Route",
            ElementType::RoutePoint => "RoutePoint",
            ElementType::ScheduledStopPoint => "ScheduledStopPoint",
            ElementType::ServiceCalendarFrame => "ServiceCalendarFrame",
            ElementType::ServiceFrame => "ServiceFrame",
            ElementType::ServiceJourney => "ServiceJourney",
            ElementType::SiteFrame => "SiteFrame",
            ElementType::StopPlace => "StopPlace",
            ElementType::StopPointInJourneyPattern => "StopPointInJourneyPattern",
            ElementType::TimetableFrame => "TimetableFrame",
            ElementType::TimetabledPassingTime => "TimetabledPassingTime",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compose `"{codespace}:{element_type}:{local_id}"`, trimming the local id.
///
/// # Examples
///
/// ```
/// use flight_netex::netex::ids::compose_id;
///
/// assert_eq!(compose_id("AVI", "Line", "DY_OSL-BGO"), "AVI:Line:DY_OSL-BGO");
/// assert_eq!(compose_id("AVI", "Network", " DY "), "AVI:Network:DY");
/// ```
pub fn compose_id(codespace: &str, element_type: &str, local_id: &str) -> String {
    format!("{}:{}:{}", codespace, element_type, local_id.trim())
}

/// Zero-padded suffixes "1" to "n", padded to the width of `n`.
///
/// # Examples
///
/// ```
/// use flight_netex::netex::ids::sequential_suffixes;
///
/// assert_eq!(sequential_suffixes(3), vec!["1", "2", "3"]);
/// assert_eq!(sequential_suffixes(10)[0], "01");
/// ```
pub fn sequential_suffixes(n: usize) -> Vec<String> {
    let width = n.to_string().len();
    (1..=n).map(|i| format!("{:0width$}", i)).collect()
}

/// Rolling string hash (`h = h * 31 + c` over UTF-16 units, wrapping at
/// 32 bits), absolute value in decimal, keeping the leftmost `width` digits.
///
/// Distinct keys can produce the same digest.
pub fn short_hash(key: &str, width: usize) -> String {
    let hash = key
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    let mut digits = hash.unsigned_abs().to_string();
    digits.truncate(width);
    digits
}
