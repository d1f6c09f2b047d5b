//! Zone resolution for challenge FQDNs
//!
//! Finds the hosted zone that owns a name, either by the pinned zone ID from
//! the solver config or by longest-suffix match over the account's zones.
//! Nothing is cached; every call reads the current zone listing.

use tracing::debug;

use crate::errors::DnsError;
use crate::providers::DnsProvider;

/// The zone chosen for a challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneInfo {
    pub id: i64,
    pub name: String,
}

/// Strip one trailing dot and lowercase
pub fn normalize_name(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase()
}

/// Parse a pinned zone ID from the solver config
pub fn parse_zone_id(zone_id: &str) -> Result<i64, DnsError> {
    zone_id.trim().parse::<i64>().map_err(|e| {
        DnsError::InvalidArgument(format!("invalid zoneID format {:?}: {}", zone_id, e))
    })
}

/// Resolve the zone owning `fqdn`
///
/// With a pinned zone ID the listing must contain that exact ID; its name is
/// still needed to derive the record host.
pub async fn resolve(
    provider: &dyn DnsProvider,
    fqdn: &str,
    pinned_zone_id: Option<i64>,
) -> Result<ZoneInfo, DnsError> {
    let zones = provider.list_zones().await?;

    if let Some(zone_id) = pinned_zone_id {
        let zone = zones
            .into_iter()
            .find(|z| z.id == zone_id)
            .ok_or_else(|| DnsError::NotFound(format!("configured zoneID {} not found", zone_id)))?;

        debug!("Using pinned zone {} ({})", zone.name, zone.id);
        return Ok(ZoneInfo {
            id: zone.id,
            name: zone.name,
        });
    }

    let target = normalize_name(fqdn);
    let mut best: Option<(usize, ZoneInfo)> = None;

    for zone in zones {
        let zone_name = normalize_name(&zone.name);
        if !is_within(&target, &zone_name) {
            continue;
        }
        // Strictly longer wins, so the first of two equal-length matches is kept.
        if best.as_ref().map_or(true, |(len, _)| zone_name.len() > *len) {
            best = Some((
                zone_name.len(),
                ZoneInfo {
                    id: zone.id,
                    name: zone.name,
                },
            ));
        }
    }

    let (_, zone) = best
        .ok_or_else(|| DnsError::NotFound(format!("no matching zone found for {}", target)))?;

    debug!("Resolved {} to zone {} ({})", fqdn, zone.name, zone.id);
    Ok(zone)
}

/// Both arguments must already be normalized
fn is_within(fqdn: &str, zone_name: &str) -> bool {
    fqdn == zone_name
        || (fqdn.len() > zone_name.len()
            && fqdn.ends_with(zone_name)
            && fqdn.as_bytes()[fqdn.len() - zone_name.len() - 1] == b'.')
}

/// Record host of `fqdn` relative to `zone_name`
///
/// `"@"` for the apex. A name outside the zone comes back unchanged, minus its
/// trailing dot.
pub fn extract_host(fqdn: &str, zone_name: &str) -> String {
    let trimmed = fqdn.strip_suffix('.').unwrap_or(fqdn);
    let name = trimmed.to_ascii_lowercase();
    let zone = normalize_name(zone_name);

    if name == zone {
        return "@".to_string();
    }
    if is_within(&name, &zone) {
        return trimmed[..trimmed.len() - zone.len() - 1].to_string();
    }
    trimmed.to_string()
}
