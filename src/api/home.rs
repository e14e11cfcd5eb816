use std::collections::BTreeMap;

use actix_web::{HttpResponse, Responder, get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::utils::currency::Currency;
use crate::utils::locale::system_locales;
use crate::utils::timezone::{available_time_zone_ids, time_zones_grouped_by_offset};

pub const GREETING: &str = "Hello, this is the payroll public api";

#[derive(Serialize, ToSchema)]
pub struct ZoneOffsetGroup {
    #[schema(example = "-05:00")]
    pub offset: String,
    #[schema(example = json!(["America/Bogota", "America/Lima"]))]
    pub zones: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = String)),
    tag = "Home"
)]
#[get("/")]
pub async fn index() -> impl Responder {
    GREETING
}

/// Available time zone ids
#[utoipa::path(
    get,
    path = "/timezones",
    responses((status = 200, description = "Sorted IANA zone ids", body = Vec<String>)),
    tag = "Home"
)]
#[get("/timezones")]
pub async fn timezones() -> impl Responder {
    HttpResponse::Ok().json(available_time_zone_ids())
}

/// Time zones grouped by their current UTC offset
#[utoipa::path(
    get,
    path = "/timezones/offsets",
    responses((status = 200, description = "Zones per offset, west to east", body = Vec<ZoneOffsetGroup>)),
    tag = "Home"
)]
#[get("/timezones/offsets")]
pub async fn timezone_offsets() -> impl Responder {
    let groups: Vec<ZoneOffsetGroup> = time_zones_grouped_by_offset()
        .into_iter()
        .map(|(offset, zones)| ZoneOffsetGroup {
            offset: offset.to_string(),
            zones: zones.into_iter().map(str::to_string).collect(),
        })
        .collect();
    HttpResponse::Ok().json(groups)
}

/// Supported locales
#[utoipa::path(
    get,
    path = "/locales",
    responses((status = 200, description = "Locale tag to language", body = Object, example = json!({"en_US": "English", "fr_FR": "French"}))),
    tag = "Home"
)]
#[get("/locales")]
pub async fn locales() -> impl Responder {
    let locales: BTreeMap<&str, &str> = system_locales();
    HttpResponse::Ok().json(locales)
}

/// Supported currency codes
#[utoipa::path(
    get,
    path = "/currencies",
    responses((status = 200, description = "Sorted ISO-4217 codes", body = Vec<String>)),
    tag = "Home"
)]
#[get("/currencies")]
pub async fn currencies() -> impl Responder {
    HttpResponse::Ok().json(Currency::all_names())
}
