//! Document composition.
//!
//! [`compose_line`] produces one document per line; [`compose_common`]
//! produces the shared document with authority, operators and stops. Both
//! return a complete document or an error, never a partial one.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::known_airlines;
use crate::schedule::{AvailabilityPeriod, LineDataSet};
use crate::stops::StopReferenceData;

use super::builder;
use super::config::DocumentConfig;
use super::context::ConversionContext;
use super::error::ConversionError;
use super::ids::ElementType;
use super::model::{
    CompositeFrame, Frames, PublicationDelivery, ResourceFrame, ServiceCalendarFrame,
    ServiceFrame, TimetableFrame,
};

/// Local id of every frame in the common document.
pub const COMMON_LOCAL_ID: &str = "CommonData";

/// Compose the document for one line.
pub fn compose_line(
    line: &LineDataSet,
    stops: &StopReferenceData,
    config: &DocumentConfig,
    published_at: DateTime<Utc>,
) -> Result<PublicationDelivery, ConversionError> {
    let cs = &config.codespace;
    let local_id = line.local_id();
    let mut ctx = ConversionContext::new(cs, stops, config.time_zone, line);

    let routes = line
        .routes
        .iter()
        .map(|route| ctx.route(route))
        .collect::<Result<Vec<_>, _>>()?;
    for route in &line.routes {
        ctx.journey_pattern(route)?;
    }

    let mut service_journeys = Vec::new();
    for route in &line.routes {
        let Some(flights) = line.route_journeys.get(&route.route_designation) else {
            continue;
        };
        for days in flights.values() {
            for (i, itinerary) in days.iter().enumerate() {
                let order = u32::try_from(i + 1).unwrap_or(u32::MAX);
                service_journeys.push(ctx.service_journey(route, itinerary, order)?);
            }
        }
    }
    if service_journeys.is_empty() {
        return Err(ConversionError::EmptyLine(local_id));
    }

    let objects = ctx.finish();
    debug!(
        line = %local_id,
        routes = routes.len(),
        journeys = service_journeys.len(),
        day_types = objects.day_types.len(),
        "composed line"
    );

    let resource_frame = (!config.is_frequent_operator(line.airline)).then(|| ResourceFrame {
        id: cs.id(ElementType::ResourceFrame, &local_id),
        authorities: Vec::new(),
        operators: vec![builder::operator(cs, line.airline)],
        brandings: vec![builder::branding(cs, line.airline)],
    });

    let frames = Frames {
        resource_frame,
        service_frame: Some(ServiceFrame {
            id: cs.id(ElementType::ServiceFrame, &local_id),
            network: Some(builder::network(cs, config, line.airline)),
            routes,
            lines: vec![builder::line(cs, line)],
            destination_displays: objects.destination_displays,
            journey_patterns: objects.journey_patterns,
            ..ServiceFrame::default()
        }),
        timetable_frame: Some(TimetableFrame {
            id: cs.id(ElementType::TimetableFrame, &local_id),
            vehicle_journeys: service_journeys,
        }),
        service_calendar_frame: Some(ServiceCalendarFrame {
            id: cs.id(ElementType::ServiceCalendarFrame, &local_id),
            day_types: objects.day_types,
            day_type_assignments: objects.day_type_assignments,
        }),
    };

    Ok(delivery(
        config,
        published_at,
        &local_id,
        line.availability_period,
        Some(line.line_name.clone()),
        frames,
    ))
}

/// Compose the document shared by every line: the authority, every known
/// airline's operator and branding, and every stop in `stops`.
pub fn compose_common(
    stops: &StopReferenceData,
    config: &DocumentConfig,
    period: AvailabilityPeriod,
    published_at: DateTime<Utc>,
) -> Result<PublicationDelivery, ConversionError> {
    if stops.is_empty() {
        return Err(ConversionError::NoStopReferenceData);
    }
    let cs = &config.codespace;

    let resource_frame = ResourceFrame {
        id: cs.id(ElementType::ResourceFrame, COMMON_LOCAL_ID),
        authorities: vec![builder::authority(cs, &config.authority)],
        operators: known_airlines().map(|a| builder::operator(cs, a)).collect(),
        brandings: known_airlines().map(|a| builder::branding(cs, a)).collect(),
    };

    let service_frame = ServiceFrame {
        id: cs.id(ElementType::ServiceFrame, COMMON_LOCAL_ID),
        route_points: stops.iter().map(|s| builder::route_point(cs, s)).collect(),
        scheduled_stop_points: stops.iter().map(builder::scheduled_stop_point).collect(),
        stop_assignments: stops
            .iter()
            .enumerate()
            .map(|(i, s)| builder::stop_assignment(cs, s, u32::try_from(i + 1).unwrap_or(u32::MAX)))
            .collect(),
        ..ServiceFrame::default()
    };

    debug!(stops = stops.len(), "composed common data");

    Ok(delivery(
        config,
        published_at,
        COMMON_LOCAL_ID,
        period,
        Some("Shared data".to_string()),
        Frames {
            resource_frame: Some(resource_frame),
            service_frame: Some(service_frame),
            ..Frames::default()
        },
    ))
}

fn delivery(
    config: &DocumentConfig,
    published_at: DateTime<Utc>,
    local_id: &str,
    period: AvailabilityPeriod,
    description: Option<String>,
    frames: Frames,
) -> PublicationDelivery {
    let cs = &config.codespace;
    PublicationDelivery {
        version: config.netex_version.clone(),
        publication_timestamp: published_at,
        participant_ref: config.participant_ref.clone(),
        description,
        data_objects: vec![CompositeFrame {
            id: cs.id(ElementType::CompositeFrame, local_id),
            validity_conditions: vec![builder::availability_condition(cs, local_id, period)],
            codespaces: vec![builder::codespace_element(cs)],
            frame_defaults: builder::frame_defaults(config),
            frames,
        }],
    }
}
