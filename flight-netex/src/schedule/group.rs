//! Grouping of itineraries into lines and routes.
//!
//! A line is one airline serving one pair of end airports, in either
//! direction. Each distinct stop sequence on the line is a route, and every
//! itinerary is filed under its route and flight number.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::domain::{AirlineCode, AirportCode, Itinerary};
use crate::netex::ids::{DEFAULT_HASH_WIDTH, short_hash};

/// First and last operating date covered by a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl AvailabilityPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Smallest period covering every itinerary's operating date.
    pub fn covering<'a>(itineraries: impl IntoIterator<Item = &'a Itinerary>) -> Option<Self> {
        let mut dates = itineraries.into_iter().map(Itinerary::date_of_operation);
        let first = dates.next()?;
        let (from, to) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self { from, to })
    }
}

/// One distinct stop pattern on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightRoute {
    /// Dash-joined airport codes, e.g. "OSL-HOV-SOG"
    pub route_designation: String,
    /// Short airport names joined with " - "
    pub route_name: String,
    pub airports: Vec<AirportCode>,
}

impl FlightRoute {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        let airports = itinerary.airports();
        Self {
            route_designation: itinerary.route_designation(),
            route_name: display_name(&airports),
            airports,
        }
    }

    /// Key hashed into the route's local id.
    pub fn hash_key(&self, airline: AirlineCode) -> String {
        format!("{}{}", airline, self.route_designation)
    }

    /// Local id of the route: airline plus a hash of airline and stop pattern.
    pub fn local_id(&self, airline: AirlineCode) -> String {
        let hash = short_hash(&self.hash_key(airline), DEFAULT_HASH_WIDTH);
        format!("{}_{}", airline, hash)
    }
}

/// Flights on one route, keyed by flight number, each list ordered by date.
pub type FlightsByNumber = BTreeMap<String, Vec<Itinerary>>;

/// Everything needed to convert one line.
#[derive(Debug, Clone)]
pub struct LineDataSet {
    pub airline: AirlineCode,
    pub airline_name: String,
    /// End airports in the line's main direction, e.g. "OSL-BGO"
    pub line_designation: String,
    pub line_name: String,
    pub availability_period: AvailabilityPeriod,
    /// Routes, ordered by route local id.
    pub routes: Vec<FlightRoute>,
    /// Route designation → flight number → flights on each day.
    pub route_journeys: BTreeMap<String, FlightsByNumber>,
}

impl LineDataSet {
    /// Local id of the line, e.g. "DY_OSL-BGO".
    pub fn local_id(&self) -> String {
        format!("{}_{}", self.airline, self.line_designation)
    }

    /// All itineraries on the line.
    pub fn itineraries(&self) -> impl Iterator<Item = &Itinerary> {
        self.route_journeys
            .values()
            .flat_map(|flights| flights.values().flatten())
    }

    /// Airports served by the line, in alphabetical order.
    pub fn airports(&self) -> BTreeSet<AirportCode> {
        self.routes
            .iter()
            .flat_map(|r| r.airports.iter().copied())
            .collect()
    }

    pub fn route(&self, designation: &str) -> Option<&FlightRoute> {
        self.routes
            .iter()
            .find(|r| r.route_designation == designation)
    }
}

/// Line key: airline and the unordered pair of end airports.
type LineKey = (AirlineCode, AirportCode, AirportCode);

fn line_key(itinerary: &Itinerary) -> LineKey {
    let (a, b) = (itinerary.origin(), itinerary.destination());
    (itinerary.airline(), a.min(b), a.max(b))
}

fn display_name(airports: &[AirportCode]) -> String {
    airports
        .iter()
        .map(AirportCode::short_name)
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Group itineraries into line data sets.
///
/// When `period` is `None` each line's availability period covers its own
/// operating dates. Lines come back ordered by local id.
pub fn group_lines(
    itineraries: Vec<Itinerary>,
    period: Option<AvailabilityPeriod>,
) -> Vec<LineDataSet> {
    let mut by_line: BTreeMap<LineKey, Vec<Itinerary>> = BTreeMap::new();
    for itinerary in itineraries {
        by_line.entry(line_key(&itinerary)).or_default().push(itinerary);
    }

    let mut lines: Vec<LineDataSet> = by_line
        .into_iter()
        .filter_map(|((airline, _, _), itineraries)| build_line(airline, itineraries, period))
        .collect();
    lines.sort_by_key(LineDataSet::local_id);
    lines
}

fn build_line(
    airline: AirlineCode,
    itineraries: Vec<Itinerary>,
    period: Option<AvailabilityPeriod>,
) -> Option<LineDataSet> {
    let availability_period = period.or_else(|| AvailabilityPeriod::covering(&itineraries))?;
    let (origin, destination) = main_direction(&itineraries)?;

    let mut routes: Vec<FlightRoute> = Vec::new();
    let mut route_journeys: BTreeMap<String, FlightsByNumber> = BTreeMap::new();

    for itinerary in itineraries {
        let designation = itinerary.route_designation();
        if !route_journeys.contains_key(&designation) {
            routes.push(FlightRoute::from_itinerary(&itinerary));
        }
        route_journeys
            .entry(designation)
            .or_default()
            .entry(itinerary.flight_number().to_string())
            .or_default()
            .push(itinerary);
    }

    routes.sort_by_key(|r| r.local_id(airline));
    for flights in route_journeys.values_mut() {
        for days in flights.values_mut() {
            days.sort_by_key(|it| (it.date_of_operation(), it.first_departure()));
        }
    }

    Some(LineDataSet {
        airline,
        airline_name: airline.name().to_string(),
        line_designation: format!("{}-{}", origin, destination),
        line_name: display_name(&[origin, destination]),
        availability_period,
        routes,
        route_journeys,
    })
}

/// Direction with the most journeys; alphabetical on ties.
fn main_direction(itineraries: &[Itinerary]) -> Option<(AirportCode, AirportCode)> {
    let mut counts: HashMap<(AirportCode, AirportCode), usize> = HashMap::new();
    for it in itineraries {
        *counts.entry((it.origin(), it.destination())).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|(dir_a, n_a), (dir_b, n_b)| n_a.cmp(n_b).then(dir_b.cmp(dir_a)))
        .map(|(direction, _)| direction)
}
