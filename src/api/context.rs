use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data, web::Query};
use chrono_tz::Tz;
use futures::future::{Ready, ready};
use std::collections::HashMap;

use crate::config::Config;
use crate::error::AppError;
use crate::utils::timezone::{DEFAULT_ZONE, find_zone};

pub const TIMEZONE_HEADER: &str = "X-Timezone";
pub const TIMEZONE_QUERY: &str = "timezone";

/// Time zone the caller wants timestamps rendered in.
///
/// Taken from the `X-Timezone` header, then the `timezone` query parameter,
/// then the configured default. Unknown zone names fall through to the
/// next source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientContext {
    pub zone: Tz,
}

impl ClientContext {
    fn from_http(req: &HttpRequest) -> Self {
        let fallback = req
            .app_data::<Data<Config>>()
            .map(|c| c.default_timezone)
            .unwrap_or(DEFAULT_ZONE);

        let from_header = req
            .headers()
            .get(TIMEZONE_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(find_zone);
        let from_query = || {
            Query::<HashMap<String, String>>::from_query(req.query_string())
                .ok()
                .and_then(|q| q.get(TIMEZONE_QUERY).and_then(|name| find_zone(name)))
        };

        Self {
            zone: from_header.or_else(from_query).unwrap_or(fallback),
        }
    }
}

impl FromRequest for ClientContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_http(req)))
    }
}
