//! Proximity aggregation over a scripted provider

mod common;

use common::{FakeProvider, hotel, record};
use hotelscope::proximity::{RosterKey, SearchKey};
use hotelscope::{
    Coordinate, HotelScopeError, ManualClock, OTHER_LODGING, PoiFetcher, PoiLookup,
    ProximityAggregator, ResultCache, nearest,
};
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(3600);

fn aggregator(provider: Arc<FakeProvider>, clock: Arc<ManualClock>) -> ProximityAggregator {
    ProximityAggregator::new(
        PoiFetcher::new(provider),
        ResultCache::<SearchKey, PoiLookup>::with_clock(TTL, clock.clone()),
        ResultCache::<RosterKey, _>::with_clock(TTL, clock),
    )
}

fn hotel_a() -> Coordinate {
    Coordinate::new(37.50, 127.02)
}

fn hotel_b() -> Coordinate {
    Coordinate::new(37.56, 126.97)
}

fn provider_near_a() -> FakeProvider {
    FakeProvider::new().with_nearby(
        hotel_a(),
        vec![
            record("Bongeunsa Temple", 37.5150, 127.0573, 76),
            record("COEX Mall", 37.5117, 127.0592, 79),
            record("Guesthouse Gangnam", 37.5010, 127.0260, OTHER_LODGING),
        ],
    )
}

#[tokio::test]
async fn test_roster_scenario_excludes_lodging() {
    let provider = Arc::new(provider_near_a());
    let aggregator = aggregator(provider, Arc::new(ManualClock::new()));
    let roster = vec![
        hotel("A", hotel_a().latitude, hotel_a().longitude),
        hotel("B", hotel_b().latitude, hotel_b().longitude),
    ];

    let counts = aggregator.aggregate_roster(&roster, 1000).await.unwrap();

    assert_eq!(counts.len(), 2);
    assert_eq!(counts["A"], 2);
    assert_eq!(counts["B"], 0);
}

#[tokio::test]
async fn test_roster_survives_one_failing_hotel() {
    let provider = Arc::new(
        provider_near_a()
            .with_nearby(hotel_b(), vec![record("Deoksugung", 37.5658, 126.9751, 76)])
            .failing_at(Coordinate::new(37.57, 126.98)),
    );
    let aggregator = aggregator(provider, Arc::new(ManualClock::new())).with_concurrency(3);
    let roster = vec![
        hotel("A", 37.50, 127.02),
        hotel("B", 37.56, 126.97),
        hotel("C", 37.57, 126.98),
    ];

    let counts = aggregator.aggregate_roster(&roster, 1000).await.unwrap();

    assert_eq!(counts.len(), 3);
    assert_eq!(counts["A"], 2);
    assert_eq!(counts["B"], 1);
    assert_eq!(counts["C"], 0);
}

#[tokio::test]
async fn test_fetch_never_returns_lodging() {
    let provider = Arc::new(provider_near_a());
    let fetcher = PoiFetcher::new(provider);

    let pois = fetcher.fetch_pois(hotel_a(), 1000).await.unwrap();

    assert_eq!(pois.len(), 2);
    assert!(pois.iter().all(|poi| poi.category_id != OTHER_LODGING));
}

#[tokio::test]
async fn test_failed_fetch_is_typed_but_empty() {
    let provider = Arc::new(FakeProvider::new().failing_at(hotel_a()));
    let fetcher = PoiFetcher::new(provider);

    let lookup = fetcher.lookup(hotel_a(), 1000).await.unwrap();
    assert!(matches!(lookup, PoiLookup::Unavailable { ref reason } if reason.contains("connection reset")));
    assert!(fetcher.fetch_pois(hotel_a(), 1000).await.unwrap().is_empty());
}

#[rstest]
#[case(Coordinate::new(37.50, 127.02), 1000)]
#[case(Coordinate::new(37.56, 126.97), 1000)]
#[case(Coordinate::new(37.50, 127.02), 2000)]
#[tokio::test]
async fn test_cached_count_matches_fetch(#[case] center: Coordinate, #[case] radius_m: u32) {
    let provider = Arc::new(provider_near_a());
    let fetcher = PoiFetcher::new(provider.clone());
    let aggregator = aggregator(provider, Arc::new(ManualClock::new()));

    let fetched = fetcher.fetch_pois(center, radius_m).await.unwrap().len();
    let first = aggregator.count_nearby(center, radius_m).await.unwrap();
    let second = aggregator.count_nearby(center, radius_m).await.unwrap();

    assert_eq!(first, fetched);
    assert_eq!(second, fetched);
}

#[tokio::test]
async fn test_count_nearby_hits_cache_until_ttl() {
    let provider = Arc::new(provider_near_a());
    let clock = Arc::new(ManualClock::new());
    let aggregator = aggregator(provider.clone(), clock.clone());

    aggregator.count_nearby(hotel_a(), 1000).await.unwrap();
    aggregator.pois_near(hotel_a(), 1000).await.unwrap();
    clock.advance(Duration::from_secs(3599));
    aggregator.count_nearby(hotel_a(), 1000).await.unwrap();
    assert_eq!(provider.nearby_calls(), 1);

    clock.advance(Duration::from_secs(1));
    aggregator.count_nearby(hotel_a(), 1000).await.unwrap();
    assert_eq!(provider.nearby_calls(), 2);

    aggregator.count_nearby(hotel_a(), 1500).await.unwrap();
    assert_eq!(provider.nearby_calls(), 3);
}

#[tokio::test]
async fn test_failed_lookup_stays_empty_for_the_cache_generation() {
    let provider = Arc::new(FakeProvider::new().failing_at(hotel_a()));
    let aggregator = aggregator(provider.clone(), Arc::new(ManualClock::new()));

    assert_eq!(aggregator.count_nearby(hotel_a(), 1000).await.unwrap(), 0);
    assert_eq!(aggregator.count_nearby(hotel_a(), 1000).await.unwrap(), 0);
    assert_eq!(provider.nearby_calls(), 1);
}

#[tokio::test]
async fn test_concurrent_roster_shares_lookups_per_key() {
    let provider = Arc::new(provider_near_a().with_delay(Duration::from_millis(20)));
    let aggregator =
        aggregator(provider.clone(), Arc::new(ManualClock::new())).with_concurrency(4);
    // Two hotels in the same building share one radius query
    let roster = vec![
        hotel("A", 37.50, 127.02),
        hotel("A-annex", 37.50, 127.02),
        hotel("B", 37.56, 126.97),
    ];

    let counts = aggregator.aggregate_roster(&roster, 1000).await.unwrap();

    assert_eq!(counts["A"], 2);
    assert_eq!(counts["A-annex"], 2);
    assert_eq!(counts["B"], 0);
    assert_eq!(provider.nearby_calls(), 2);
}

#[tokio::test]
async fn test_roster_aggregate_is_memoized() {
    let provider = Arc::new(provider_near_a());
    let clock = Arc::new(ManualClock::new());
    let aggregator = aggregator(provider.clone(), clock.clone());
    let roster = vec![hotel("A", 37.50, 127.02), hotel("B", 37.56, 126.97)];
    let reordered = vec![roster[1].clone(), roster[0].clone()];

    let first = aggregator.aggregate_roster(&roster, 1000).await.unwrap();
    let second = aggregator.aggregate_roster(&reordered, 1000).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(provider.nearby_calls(), 2);

    clock.advance(TTL);
    aggregator.aggregate_roster(&roster, 1000).await.unwrap();
    assert_eq!(provider.nearby_calls(), 4);
}

#[tokio::test]
async fn test_programmer_errors_are_rejected() {
    let provider = Arc::new(provider_near_a());
    let aggregator = aggregator(provider.clone(), Arc::new(ManualClock::new()));

    let zero_radius = aggregator.count_nearby(hotel_a(), 0).await;
    assert!(matches!(zero_radius, Err(HotelScopeError::Validation(_))));

    let bad_coordinate = aggregator
        .count_nearby(Coordinate::new(f64::NAN, 127.0), 1000)
        .await;
    assert!(matches!(bad_coordinate, Err(HotelScopeError::Validation(_))));

    let roster = vec![hotel("A", 37.50, 127.02)];
    assert!(aggregator.aggregate_roster(&roster, 0).await.is_err());
    assert_eq!(provider.nearby_calls(), 0);
}

#[tokio::test]
async fn test_roster_hotel_with_invalid_position_counts_zero() {
    let provider = Arc::new(provider_near_a());
    let aggregator = aggregator(provider, Arc::new(ManualClock::new()));
    let roster = vec![hotel("A", 37.50, 127.02), hotel("broken", f64::NAN, 127.0)];

    let counts = aggregator.aggregate_roster(&roster, 1000).await.unwrap();

    assert_eq!(counts["A"], 2);
    assert_eq!(counts["broken"], 0);
}

#[tokio::test]
async fn test_nearest_over_fetched_pois() {
    let origin = Coordinate::new(0.0, 0.0);
    let provider = Arc::new(FakeProvider::new().with_nearby(
        origin,
        vec![
            record("P1", 5.0, 0.0, 76),
            record("P2", 1.0, 0.0, 82),
            record("P3", 0.0, 1.0, 78),
        ],
    ));
    let fetcher = PoiFetcher::new(provider);
    let pois = fetcher.fetch_pois(origin, 1000).await.unwrap();

    let names: Vec<String> = nearest(&pois, &origin, OTHER_LODGING, 2)
        .into_iter()
        .map(|poi| poi.name)
        .collect();

    assert_eq!(names, vec!["P2", "P3"]);
}
