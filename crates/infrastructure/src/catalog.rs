//! Seeded package catalog
//!
//! The 2022 package lineup: Accelerate, Optimize, and Orchestrate, each a
//! superset of the previous tier. Capability capacity limits are
//! descriptive metadata only and are never enforced by this service.

use domain::entities::{Capability, CapacityLimit, Package, PackagingPlan};

const CALLS_PER_DAY: &str = "CallsPerDay";

fn base_capabilities() -> Vec<Capability> {
    vec![
        Capability::new("cpb:sequence", "Sequence"),
        Capability::new("cpb:calendaring", "Calendaring"),
        Capability::new("cpb:basic-reporting", "Basic Reporting"),
        Capability::new("cpb:basic-opportunity-view", "Basic Opportunity View"),
    ]
}

fn optimize_capabilities() -> Vec<Capability> {
    let mut capabilities = base_capabilities();
    capabilities.push(Capability::new("cpb:sentiment", "ML Driven Sentiment"));
    capabilities.push(Capability::new("cpb:advanced-reporting", "Advanced Reporting"));
    capabilities
}

fn crm_sync(limit: u64) -> Capability {
    Capability::new("cpb:crm-sync", "CRM Sync")
        .with_capacity_limit(CapacityLimit::new(limit, CALLS_PER_DAY))
}

/// The Accelerate 2022 package (entry tier)
pub fn accelerate_2022() -> Package {
    let mut capabilities = base_capabilities();
    capabilities.push(crm_sync(10_000));
    Package::new("pkg:base-accelerate-2022", "Accelerate", capabilities)
}

/// The Optimize 2022 package (mid tier)
pub fn optimize_2022() -> Package {
    let mut capabilities = optimize_capabilities();
    capabilities.push(crm_sync(250_000));
    Package::new("pkg:base-optimize-2022", "Optimize", capabilities)
}

/// The Orchestrate 2022 package (top tier)
pub fn orchestrate_2022() -> Package {
    let mut capabilities = optimize_capabilities();
    capabilities.push(Capability::new("cpb:success-plan", "Success Plan"));
    capabilities.push(Capability::new("cpb:kaia-meeting", "Kaia Meeting Assistant"));
    capabilities.push(crm_sync(1_000_000));
    Package::new("pkg:base-orchestrate-2022", "Orchestrate", capabilities)
}

/// All packages of the 2022 lineup
pub fn standard_catalog() -> Vec<Package> {
    vec![accelerate_2022(), optimize_2022(), orchestrate_2022()]
}

/// The packaging plan aggregating the 2022 lineup
pub fn standard_packaging_plan() -> PackagingPlan {
    PackagingPlan::new(1, 0, standard_catalog())
}

#[cfg(test)]
mod tests {
    use domain::value_objects::{CapabilityId, PackageId};

    use super::*;

    #[test]
    fn optimize_includes_sequence_but_not_kaia() {
        let package = optimize_2022();
        assert!(package.includes_capability(&CapabilityId::new("cpb:sequence")));
        assert!(!package.includes_capability(&CapabilityId::new("cpb:kaia-meeting")));
    }

    #[test]
    fn orchestrate_is_the_full_lineup() {
        let package = orchestrate_2022();
        for capability in [
            "cpb:sequence",
            "cpb:calendaring",
            "cpb:basic-reporting",
            "cpb:basic-opportunity-view",
            "cpb:sentiment",
            "cpb:advanced-reporting",
            "cpb:success-plan",
            "cpb:kaia-meeting",
            "cpb:crm-sync",
        ] {
            assert!(
                package.includes_capability(&CapabilityId::new(capability)),
                "missing {capability}"
            );
        }
    }

    #[test]
    fn crm_sync_limits_grow_per_tier() {
        let limit = |package: &Package| {
            package
                .included_capabilities()
                .iter()
                .find(|c| c.id().as_str() == "cpb:crm-sync")
                .and_then(Capability::capacity_limit)
                .map(|l| l.limit)
                .unwrap()
        };
        assert_eq!(limit(&accelerate_2022()), 10_000);
        assert_eq!(limit(&optimize_2022()), 250_000);
        assert_eq!(limit(&orchestrate_2022()), 1_000_000);
    }

    #[test]
    fn catalog_has_three_packages_with_unique_ids() {
        let catalog = standard_catalog();
        assert_eq!(catalog.len(), 3);
        let mut ids: Vec<_> = catalog.iter().map(|p| p.id().clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn plan_supports_the_whole_catalog() {
        let plan = standard_packaging_plan();
        assert_eq!(plan.id(), "pkgplan:v1.0");
        for package in standard_catalog() {
            assert!(plan.supports_package(package.id()));
        }
        assert!(!plan.supports_package(&PackageId::new("pkg:base-optimize-2019")));
    }
}
