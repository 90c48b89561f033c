//! Period-over-period change detection between two collection snapshots.
//!
//! Records are matched by the same keys the upsert uses: `provider_name` for
//! VPN, `provider_name + plan_name` for hosting. The change list is an output
//! artifact: it is printed and stored in the snapshot, nothing downstream
//! consumes it programmatically.

use std::collections::HashMap;

use planwatch_core::{Dataset, HostingProvider, VpnProvider};

/// Compares the previous snapshot against the fresh one and returns
/// human-readable change lines. A missing previous snapshot yields a single
/// baseline marker.
pub(crate) fn detect_changes(old: Option<&Dataset>, new: &Dataset) -> Vec<String> {
    let Some(old) = old else {
        return vec!["first run: establishing baseline data".to_string()];
    };

    let mut changes = Vec::new();

    let old_vpns: HashMap<String, &VpnProvider> =
        old.vpn.iter().map(|p| (p.key(), p)).collect();
    for new_p in &new.vpn {
        let Some(old_p) = old_vpns.get(&new_p.key()) else {
            continue;
        };
        let name = &new_p.provider_name;

        if let (Some(old_price), Some(new_price)) = (old_p.pricing_monthly, new_p.pricing_monthly)
        {
            if new_price < old_price {
                let diff = old_price - new_price;
                let pct = (diff / old_price) * 100.0;
                changes.push(format!(
                    "VPN promotion: {name} price dropped by ${diff:.2} ({pct:.1}%), now ${new_price}/mo"
                ));
            } else if new_price > old_price {
                let diff = new_price - old_price;
                changes.push(format!(
                    "VPN price hike: {name} increased by ${diff:.2}, now ${new_price}/mo"
                ));
            }
        }

        if let (Some(old_speed), Some(new_speed)) = (old_p.avg_speed_mbps, new_p.avg_speed_mbps) {
            if new_speed > old_speed {
                let delta = new_speed - old_speed;
                changes.push(format!(
                    "VPN speed boost: {name} now {new_speed} Mbps (+{delta:.0} Mbps)"
                ));
            }
        }

        if let (Some(old_servers), Some(new_servers)) = (old_p.server_count, new_p.server_count) {
            if new_servers > old_servers {
                changes.push(format!(
                    "VPN expansion: {name} added {} new servers",
                    new_servers - old_servers
                ));
            }
        }
    }

    let old_hosts: HashMap<String, &HostingProvider> =
        old.hosting.iter().map(|p| (p.key(), p)).collect();
    for new_p in &new.hosting {
        let Some(old_p) = old_hosts.get(&new_p.key()) else {
            continue;
        };
        let name = format!("{} ({})", new_p.provider_name, new_p.plan_name);

        if let (Some(old_price), Some(new_price)) = (old_p.pricing_monthly, new_p.pricing_monthly)
        {
            if new_price < old_price {
                changes.push(format!(
                    "hosting sale: {name} now ${new_price}/mo (was ${old_price})"
                ));
            }
        }

        // A move from a hard limit to absent reads as "now unmetered".
        let storage_upgraded = match (old_p.storage_gb, new_p.storage_gb) {
            (Some(_), None) => true,
            (Some(old_gb), Some(new_gb)) => new_gb > old_gb,
            _ => false,
        };
        if storage_upgraded {
            changes.push(format!("storage upgrade: {name} storage increased"));
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use planwatch_core::{HostingFeatures, HostingPricing, VpnFeatures, VpnPricing};

    fn vpn(name: &str, monthly: Option<f64>, speed: Option<f64>, servers: Option<i32>) -> VpnProvider {
        VpnProvider::from_parts(
            name,
            None,
            VpnPricing {
                pricing_monthly: monthly,
                ..VpnPricing::default()
            },
            VpnFeatures {
                avg_speed_mbps: speed,
                server_count: servers,
                ..VpnFeatures::default()
            },
        )
    }

    fn hosting(
        provider: &str,
        plan: &str,
        monthly: Option<f64>,
        storage_gb: Option<i32>,
    ) -> HostingProvider {
        HostingProvider::from_parts(
            provider,
            plan,
            None,
            HostingPricing {
                pricing_monthly: monthly,
                ..HostingPricing::default()
            },
            HostingFeatures {
                storage_gb,
                ..HostingFeatures::default()
            },
        )
    }

    fn dataset(hosting: Vec<HostingProvider>, vpn: Vec<VpnProvider>) -> Dataset {
        Dataset {
            collected_at: Some(Utc::now()),
            hosting,
            vpn,
            changes_detected: Vec::new(),
        }
    }

    #[test]
    fn missing_previous_snapshot_is_a_baseline() {
        let new = dataset(vec![], vec![vpn("NordVPN", Some(3.39), None, None)]);
        let changes = detect_changes(None, &new);
        assert_eq!(changes, vec!["first run: establishing baseline data"]);
    }

    #[test]
    fn vpn_price_drop_reports_amount_and_percentage() {
        let old = dataset(vec![], vec![vpn("NordVPN", Some(4.00), None, None)]);
        let new = dataset(vec![], vec![vpn("NordVPN", Some(3.00), None, None)]);
        let changes = detect_changes(Some(&old), &new);
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes[0],
            "VPN promotion: NordVPN price dropped by $1.00 (25.0%), now $3/mo"
        );
    }

    #[test]
    fn vpn_price_hike_and_improvements_are_reported() {
        let old = dataset(
            vec![],
            vec![vpn("NordVPN", Some(3.00), Some(5000.0), Some(6000))],
        );
        let new = dataset(
            vec![],
            vec![vpn("NordVPN", Some(3.50), Some(6730.0), Some(6300))],
        );
        let changes = detect_changes(Some(&old), &new);
        assert_eq!(changes.len(), 3);
        assert!(changes[0].starts_with("VPN price hike: NordVPN increased by $0.50"));
        assert!(changes[1].contains("speed boost"));
        assert!(changes[1].contains("+1730 Mbps"));
        assert_eq!(changes[2], "VPN expansion: NordVPN added 300 new servers");
    }

    #[test]
    fn hosting_sale_and_storage_upgrade_are_reported() {
        let old = dataset(
            vec![hosting("Bluehost", "Basic", Some(4.95), Some(10))],
            vec![],
        );
        let new = dataset(
            vec![hosting("Bluehost", "Basic", Some(2.95), None)],
            vec![],
        );
        let changes = detect_changes(Some(&old), &new);
        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes[0],
            "hosting sale: Bluehost (Basic) now $2.95/mo (was $4.95)"
        );
        assert_eq!(
            changes[1],
            "storage upgrade: Bluehost (Basic) storage increased"
        );
    }

    #[test]
    fn unchanged_and_unmatched_records_produce_no_changes() {
        let old = dataset(
            vec![hosting("Bluehost", "Basic", Some(2.95), Some(10))],
            vec![vpn("NordVPN", Some(3.39), None, None)],
        );
        let new = dataset(
            // Same values, plus a brand-new provider with no counterpart.
            vec![
                hosting("Bluehost", "Basic", Some(2.95), Some(10)),
                hosting("Hostwinds", "Basic", Some(5.24), None),
            ],
            vec![vpn("NordVPN", Some(3.39), None, None)],
        );
        assert!(detect_changes(Some(&old), &new).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive_on_the_upsert_key() {
        let old = dataset(vec![], vec![vpn("nordvpn", Some(4.00), None, None)]);
        let new = dataset(vec![], vec![vpn("NordVPN", Some(3.00), None, None)]);
        assert_eq!(detect_changes(Some(&old), &new).len(), 1);
    }
}
