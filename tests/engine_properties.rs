//! Property tests for the filter/aggregate engine.

use launch_dash::data::filter::{compute_pie_data, compute_scatter_data};
use launch_dash::data::model::{LaunchDataset, LaunchRecord, Outcome, PayloadRange, SiteSelector};
use proptest::prelude::*;

const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];
const BOOSTERS: [&str; 5] = ["v1.0", "v1.1", "FT", "B4", "B5"];

fn record() -> impl Strategy<Value = LaunchRecord> {
    (0..SITES.len(), 0.0..10_000.0f64, any::<bool>(), 0..BOOSTERS.len()).prop_map(
        |(site, payload, success, booster)| {
            let outcome = if success { Outcome::Success } else { Outcome::Failure };
            LaunchRecord::new(SITES[site], payload, outcome, BOOSTERS[booster])
        },
    )
}

fn dataset() -> impl Strategy<Value = LaunchDataset> {
    prop::collection::vec(record(), 1..60)
        .prop_map(|records| LaunchDataset::from_records(records).unwrap())
}

fn site() -> impl Strategy<Value = String> {
    (0..SITES.len()).prop_map(|i| SITES[i].to_string())
}

proptest! {
    #[test]
    fn all_view_matches_per_site_success_count(ds in dataset(), s in site()) {
        let all = compute_pie_data(&ds, &SiteSelector::All);
        let expected = ds
            .records()
            .iter()
            .filter(|r| r.launch_site == s && r.outcome == Outcome::Success)
            .count();

        if ds.sites().contains(&s) {
            prop_assert_eq!(all.get(&s), Some(expected));
            let single = compute_pie_data(&ds, &SiteSelector::Site(s.clone()));
            prop_assert_eq!(single.get("Success").unwrap_or(0), expected);
        } else {
            prop_assert_eq!(all.get(&s), None);
        }
    }

    #[test]
    fn all_view_lists_every_site(ds in dataset()) {
        let all = compute_pie_data(&ds, &SiteSelector::All);
        let labels: Vec<&str> = all.slices().iter().map(|s| s.label.as_str()).collect();
        let sites: Vec<&str> = ds.sites().iter().map(String::as_str).collect();
        prop_assert_eq!(labels, sites);
    }

    #[test]
    fn site_view_counts_every_launch_at_site(ds in dataset(), s in site()) {
        let pie = compute_pie_data(&ds, &SiteSelector::Site(s.clone()));
        let at_site = ds.records().iter().filter(|r| r.launch_site == s).count();
        prop_assert_eq!(pie.total(), at_site);
        prop_assert_eq!(pie.is_empty(), at_site == 0);
    }

    #[test]
    fn full_bounds_return_every_record(ds in dataset()) {
        let points = compute_scatter_data(&ds, &SiteSelector::All, ds.payload_bounds());
        prop_assert_eq!(points.len(), ds.len());
    }

    #[test]
    fn scatter_is_exactly_the_matching_records(
        ds in dataset(),
        s in prop::option::of(site()),
        a in 0.0..10_000.0f64,
        b in 0.0..10_000.0f64,
    ) {
        let selector = s.map(SiteSelector::Site).unwrap_or(SiteSelector::All);
        let range = PayloadRange::new(a.min(b), a.max(b));
        let points = compute_scatter_data(&ds, &selector, range);

        let expected: Vec<(f64, Outcome, &str)> = ds
            .records()
            .iter()
            .filter(|r| range.low <= r.payload_mass_kg && r.payload_mass_kg <= range.high)
            .filter(|r| selector.matches(&r.launch_site))
            .map(|r| (r.payload_mass_kg, r.outcome, r.booster_version_category.as_str()))
            .collect();
        let actual: Vec<(f64, Outcome, &str)> = points
            .iter()
            .map(|p| (p.payload_mass_kg, p.outcome, p.booster_version_category.as_str()))
            .collect();

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn reversed_bounds_return_nothing(ds in dataset(), a in 0.0..10_000.0f64, b in 0.0..10_000.0f64) {
        prop_assume!(a < b);
        let points = compute_scatter_data(&ds, &SiteSelector::All, PayloadRange::new(b, a));
        prop_assert!(points.is_empty());
    }
}

#[test]
fn unknown_site_yields_empty_pie() {
    let ds = LaunchDataset::from_records(vec![LaunchRecord::new(
        "KSC LC-39A",
        500.0,
        Outcome::Success,
        "FT",
    )])
    .unwrap();
    assert!(compute_pie_data(&ds, &SiteSelector::Site("Boca Chica".into())).is_empty());
}
