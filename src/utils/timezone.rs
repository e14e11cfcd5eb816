use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Offset, SubsecRound, TimeZone, Utc};
use chrono_tz::{TZ_VARIANTS, Tz};
use once_cell::sync::Lazy;

/// Zone used when a requested zone id is unknown.
pub const DEFAULT_ZONE: Tz = Tz::UTC;

static SORTED_ZONE_IDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut ids: Vec<&'static str> = TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
    ids.sort_unstable();
    ids
});

/// All IANA zone ids, sorted.
pub fn available_time_zone_ids() -> &'static [&'static str] {
    &SORTED_ZONE_IDS
}

/// Case-insensitive lookup of a zone id.
pub fn find_zone(name: &str) -> Option<Tz> {
    let name = name.trim();
    TZ_VARIANTS
        .iter()
        .copied()
        .find(|tz| tz.name().eq_ignore_ascii_case(name))
}

/// Like [`find_zone`] but falls back to [`DEFAULT_ZONE`].
pub fn zone_id(name: &str) -> Tz {
    find_zone(name).unwrap_or(DEFAULT_ZONE)
}

pub fn offset_at(zone: Tz, instant: DateTime<Utc>) -> FixedOffset {
    zone.offset_from_utc_datetime(&instant.naive_utc()).fix()
}

/// Current UTC offset of the named zone.
pub fn zone_offset(name: &str) -> FixedOffset {
    offset_at(zone_id(name), Utc::now())
}

pub fn convert<Z: TimeZone>(value: &DateTime<Z>, zone: Tz) -> DateTime<Tz> {
    value.with_timezone(&zone)
}

/// Current instant, truncated to the microsecond precision the store keeps.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Zone ids keyed by their current offset, ordered west to east.
pub fn time_zones_grouped_by_offset() -> Vec<(FixedOffset, Vec<&'static str>)> {
    let now = Utc::now();
    let mut groups: BTreeMap<i32, Vec<&'static str>> = BTreeMap::new();
    for &id in available_time_zone_ids() {
        let offset = offset_at(zone_id(id), now);
        groups.entry(offset.local_minus_utc()).or_default().push(id);
    }

    groups
        .into_iter()
        .filter_map(|(seconds, zones)| FixedOffset::east_opt(seconds).map(|o| (o, zones)))
        .collect()
}

/// Renders a stored timestamp in `zone`, e.g. `2024-03-01 09:15:00AM -05:00`.
pub fn format_in_zone(value: &DateTime<Utc>, zone: Tz) -> String {
    let local = convert(value, zone);
    let offset = if local.offset().fix().local_minus_utc() == 0 {
        "Z".to_string()
    } else {
        local.format("%:z").to_string()
    };
    format!("{} {}", local.format("%Y-%m-%d %I:%M:%S%p"), offset)
}
