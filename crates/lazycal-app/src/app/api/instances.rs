use chrono::NaiveDate;
use lazycal_service::calendar::{InstanceAggregator, month_window};
use lazycal_service::error::ServiceError;
use lazycal_store::store::EventStore;
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};

use super::INSTANCES_ROUTE_COMPONENT;
use super::response::{render_app_error, render_error};
use crate::store_handler::get_store_from_depot;

/// The window a request asks for, as given on the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InstanceQuery {
    Range(NaiveDate, NaiveDate),
    Month(i32, u32),
}

impl InstanceQuery {
    /// Parses `start`+`end` or `year`+`month`. Month bounds are checked later.
    fn from_request(req: &Request) -> Result<Self, String> {
        let query = |name: &str| req.query::<String>(name).filter(|value| !value.is_empty());

        match (query("start"), query("end"), query("year"), query("month")) {
            (Some(start), Some(end), _, _) => {
                Ok(Self::Range(parse_date(&start)?, parse_date(&end)?))
            }
            (None, None, Some(year), Some(month)) => {
                let year: i32 = year
                    .parse()
                    .map_err(|_err| format!("Invalid year: {year}"))?;
                let month: u32 = month
                    .parse()
                    .map_err(|_err| format!("Invalid month: {month}"))?;
                Ok(Self::Month(year, month))
            }
            _ => Err("Expected start and end, or year and month".to_string()),
        }
    }

    /// ## Errors
    /// Returns `ServiceError::InvalidWindow` for a month outside 1-12.
    fn bounds(self) -> Result<(NaiveDate, NaiveDate), ServiceError> {
        match self {
            Self::Range(start, end) => Ok((start, end)),
            Self::Month(year, month) => month_window(year, month)
                .ok_or_else(|| ServiceError::InvalidWindow(format!("{year}-{month}"))),
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_err| format!("Invalid date: {value}"))
}

/// Shared prologue of the instance handlers: parsed window plus aggregator.
fn prepare(
    req: &Request,
    depot: &Depot,
    res: &mut Response,
) -> Option<(InstanceQuery, InstanceAggregator<dyn EventStore>)> {
    let query = match InstanceQuery::from_request(req) {
        Ok(query) => query,
        Err(message) => {
            render_error(res, StatusCode::BAD_REQUEST, message);
            return None;
        }
    };
    match get_store_from_depot(depot) {
        Ok(store) => Some((query, InstanceAggregator::new(store))),
        Err(err) => {
            render_app_error(res, &err);
            None
        }
    }
}

/// ## Summary
/// GET /api/instances - every occurrence in a window, ascending by date
///
/// Accepts `?start=YYYY-MM-DD&end=YYYY-MM-DD` or `?year=YYYY&month=M`.
///
/// ## Errors
/// Returns HTTP 400 for missing or malformed window parameters.
/// Returns HTTP 500 if the events cannot be read.
#[handler]
async fn list_instances(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((query, aggregator)) = prepare(req, depot, res) else {
        return;
    };

    let result = match query {
        InstanceQuery::Range(start, end) => aggregator.get_instances(start, end).await,
        InstanceQuery::Month(year, month) => aggregator.get_month_instances(year, month).await,
    };
    match result {
        Ok(instances) => res.render(Json(instances)),
        Err(err) => render_app_error(res, &err.into()),
    }
}

/// ## Summary
/// GET /api/instances/days - the same occurrences keyed by date
///
/// Takes the same query parameters as `GET /api/instances`. Days without an
/// occurrence are absent from the object.
///
/// ## Errors
/// Returns HTTP 400 for missing or malformed window parameters.
/// Returns HTTP 500 if the events cannot be read.
#[handler]
async fn list_instances_by_day(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((query, aggregator)) = prepare(req, depot, res) else {
        return;
    };

    let result = match query.bounds() {
        Ok((start, end)) => aggregator.get_instances_by_day(start, end).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(days) => res.render(Json(days)),
        Err(err) => render_app_error(res, &err.into()),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(INSTANCES_ROUTE_COMPONENT)
        .get(list_instances)
        .push(Router::with_path("days").get(list_instances_by_day))
}
