//! Integration tests for the enrichment pipeline using mock repositories.

mod mocks;

use mocks::{sample_market_data, sample_profile, MockMarketDataRepository, MockProfileRepository};
use std::sync::Arc;
use std::time::Duration;
use token_screener_mcp::cache::{CachedPayload, ScreenerCache};
use token_screener_mcp::models::{ProfileLink, ProfileLinks};
use token_screener_mcp::repositories::{MarketDataRepository, ProfileRepository};
use token_screener_mcp::tools::enrichment::{
    enriched_key, market_key, profiles_key, PLATFORM_TELEGRAM, PLATFORM_TOKEN_NAME,
    PLATFORM_TOKEN_SYMBOL, PLATFORM_TWITTER, PLATFORM_WEBSITE,
};
use token_screener_mcp::tools::{EnrichmentPipeline, PipelineSettings, PLATFORM_TOKEN_ADDRESS};
use token_screener_mcp::Metrics;

struct Fixture {
    profiles: MockProfileRepository,
    market: MockMarketDataRepository,
    cache: ScreenerCache,
    pipeline: EnrichmentPipeline,
}

fn setup(settings: PipelineSettings) -> Fixture {
    let profiles = MockProfileRepository::new();
    let market = MockMarketDataRepository::new();
    let cache = ScreenerCache::new();

    let pipeline = EnrichmentPipeline::new(
        Arc::new(profiles.clone()) as Arc<dyn ProfileRepository>,
        Arc::new(market.clone()) as Arc<dyn MarketDataRepository>,
        cache.clone(),
        Metrics::new(),
        settings,
    );

    Fixture {
        profiles,
        market,
        cache,
        pipeline,
    }
}

fn addresses(tokens: &[token_screener_mcp::Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.token_address.as_str()).collect()
}

#[tokio::test]
async fn test_drops_profiles_without_market_data_and_keeps_order() {
    let f = setup(PipelineSettings::default());

    // Page 2 with limit 3 is items 3..6 of the latest list
    let mut all: Vec<_> = (0..3).map(|i| sample_profile(&format!("FILL{}", i))).collect();
    all.extend(["A", "B", "C"].iter().map(|a| sample_profile(a)));
    f.profiles.set_profiles(all);

    f.market.add_market_data("A", sample_market_data("A", "AAA", "Token A"));
    f.market.add_market_data("C", sample_market_data("C", "CCC", "Token C"));

    let tokens = f.pipeline.enrich_page(2, 3).await.unwrap();

    assert_eq!(addresses(&tokens), vec!["A", "C"]);
    assert_eq!(tokens[0].name, "AAA");
    assert_eq!(tokens[1].symbol, "Token C");
    assert_eq!(f.market.get_call_count("B"), 1);
    assert_eq!(f.pipeline.metrics().tokens_dropped_total(), 1);
}

#[tokio::test]
async fn test_page_one_injects_platform_token_first() {
    let f = setup(PipelineSettings::default());
    f.profiles
        .set_profiles((0..20).map(|i| sample_profile(&format!("T{}", i))).collect());

    f.market.add_market_data(
        PLATFORM_TOKEN_ADDRESS,
        sample_market_data(PLATFORM_TOKEN_ADDRESS, "WRONG", "Wrong Name"),
    );
    for i in 0..20 {
        let address = format!("T{}", i);
        f.market
            .add_market_data(&address, sample_market_data(&address, "SYM", "Name"));
    }

    let tokens = f.pipeline.enrich_page(1, 15).await.unwrap();

    assert_eq!(tokens.len(), 15);
    assert_eq!(tokens[0].token_address, PLATFORM_TOKEN_ADDRESS);
    assert_eq!(
        tokens
            .iter()
            .filter(|t| t.token_address == PLATFORM_TOKEN_ADDRESS)
            .count(),
        1
    );
    assert_eq!(tokens[1].token_address, "T0");
    assert_eq!(tokens[14].token_address, "T13");

    // One less profile is requested to make room for the platform token
    assert_eq!(f.profiles.requests(), vec![(1, 14)]);
}

#[tokio::test]
async fn test_page_two_never_injects_platform_token() {
    let f = setup(PipelineSettings::default());
    f.profiles
        .set_profiles((0..30).map(|i| sample_profile(&format!("T{}", i))).collect());
    f.market.add_market_data(
        PLATFORM_TOKEN_ADDRESS,
        sample_market_data(PLATFORM_TOKEN_ADDRESS, "X", "Y"),
    );
    for i in 0..30 {
        let address = format!("T{}", i);
        f.market
            .add_market_data(&address, sample_market_data(&address, "SYM", "Name"));
    }

    let tokens = f.pipeline.enrich_page(2, 15).await.unwrap();

    assert_eq!(tokens.len(), 15);
    assert_eq!(tokens[0].token_address, "T15");
    assert!(tokens.iter().all(|t| t.token_address != PLATFORM_TOKEN_ADDRESS));
    assert_eq!(f.market.get_call_count(PLATFORM_TOKEN_ADDRESS), 0);
}

#[tokio::test]
async fn test_platform_token_dropped_without_market_data() {
    let f = setup(PipelineSettings::default());
    f.profiles.set_profiles(vec![sample_profile("T0")]);
    f.market
        .add_market_data("T0", sample_market_data("T0", "SYM", "Name"));

    let tokens = f.pipeline.enrich_page(1, 5).await.unwrap();
    assert_eq!(addresses(&tokens), vec!["T0"]);
}

#[tokio::test]
async fn test_zero_limit_returns_nothing() {
    let f = setup(PipelineSettings::default());
    f.profiles.set_profiles(vec![sample_profile("T0")]);
    f.market.add_market_data(
        PLATFORM_TOKEN_ADDRESS,
        sample_market_data(PLATFORM_TOKEN_ADDRESS, "LC", "Launch"),
    );

    for page in [1, 2] {
        let tokens = f.pipeline.enrich_page(page, 0).await.unwrap();
        assert!(tokens.is_empty());
    }

    assert_eq!(f.profiles.get_call_count("latest_page"), 0);
    assert_eq!(f.market.total_calls(), 0);
    assert!(f.cache.is_empty());
}

#[tokio::test]
async fn test_platform_override_applied() {
    let f = setup(PipelineSettings::default());
    f.market.add_market_data(
        PLATFORM_TOKEN_ADDRESS,
        sample_market_data(PLATFORM_TOKEN_ADDRESS, "OTHER", "Other Token"),
    );

    // limit 1 on page 1 is the platform token alone
    let tokens = f.pipeline.enrich_page(1, 1).await.unwrap();

    assert_eq!(tokens.len(), 1);
    let token = &tokens[0];
    assert_eq!(token.name, PLATFORM_TOKEN_NAME);
    assert_eq!(token.symbol, PLATFORM_TOKEN_SYMBOL);
    assert_eq!(token.links.website.as_deref(), Some(PLATFORM_WEBSITE));
    assert_eq!(token.links.twitter.as_deref(), Some(PLATFORM_TWITTER));
    assert_eq!(token.links.telegram.as_deref(), Some(PLATFORM_TELEGRAM));
    assert_eq!(f.profiles.get_call_count("latest_page"), 0);
}

#[tokio::test]
async fn test_links_normalized_from_profile() {
    let f = setup(PipelineSettings::default());
    let mut profile = sample_profile("A");
    profile.links = Some(ProfileLinks::Sequence(vec![
        ProfileLink {
            label: Some("Website".to_string()),
            link_type: None,
            url: Some("https://a".to_string()),
        },
        ProfileLink {
            label: None,
            link_type: Some("x".to_string()),
            url: Some("https://b".to_string()),
        },
    ]));
    f.profiles
        .set_profiles(vec![sample_profile("P0"), sample_profile("P1"), profile]);
    f.market
        .add_market_data("A", sample_market_data("A", "AAA", "Token A"));

    let tokens = f.pipeline.enrich_page(2, 2).await.unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].links.website.as_deref(), Some("https://a"));
    assert_eq!(tokens[0].links.twitter.as_deref(), Some("https://b"));
    assert_eq!(tokens[0].links.telegram, None);
}

#[tokio::test]
async fn test_cache_hit_makes_no_repository_calls() {
    let f = setup(PipelineSettings::default());
    f.profiles
        .set_profiles((0..6).map(|i| sample_profile(&format!("T{}", i))).collect());
    for i in 0..6 {
        let address = format!("T{}", i);
        f.market
            .add_market_data(&address, sample_market_data(&address, "SYM", "Name"));
    }

    let first = f.pipeline.enrich_page(2, 3).await.unwrap();
    let profile_calls = f.profiles.get_call_count("latest_page");
    let market_calls = f.market.total_calls();

    let second = f.pipeline.enrich_page(2, 3).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(f.profiles.get_call_count("latest_page"), profile_calls);
    assert_eq!(f.market.total_calls(), market_calls);
    assert!(f.cache.contains_key(&enriched_key(2, 3)));
}

#[tokio::test]
async fn test_market_data_shared_across_pages_through_cache() {
    let f = setup(PipelineSettings::default());
    f.profiles
        .set_profiles(vec![sample_profile("A"), sample_profile("B")]);
    f.market
        .add_market_data("A", sample_market_data("A", "AAA", "Token A"));
    f.market
        .add_market_data("B", sample_market_data("B", "BBB", "Token B"));

    f.pipeline.enrich_page(2, 1).await.unwrap();
    f.pipeline.enrich_page(1, 3).await.unwrap();

    // B was fetched for page 2 and served from the market-data cache for page 1
    assert_eq!(f.market.get_call_count("B"), 1);
    assert_eq!(f.market.get_call_count("A"), 1);
    assert!(f.cache.contains_key(&market_key("A")));
}

#[tokio::test]
async fn test_batches_bound_concurrency() {
    let f = setup(PipelineSettings::default());
    f.market.set_delay(Duration::from_millis(20));
    f.profiles
        .set_profiles((0..12).map(|i| sample_profile(&format!("T{}", i))).collect());
    for i in 0..12 {
        let address = format!("T{}", i);
        f.market
            .add_market_data(&address, sample_market_data(&address, "SYM", "Name"));
    }

    let tokens = f.pipeline.enrich_page(1, 13).await.unwrap();

    // 13 profiles (platform + 12) in batches of 5, 5 and 3
    assert_eq!(f.market.total_calls(), 13);
    assert!(f.market.max_in_flight() <= 5);
    assert!(f.market.max_in_flight() > 1);

    // Platform token has no market data here, the rest keep profile order
    let expected: Vec<String> = (0..12).map(|i| format!("T{}", i)).collect();
    assert_eq!(
        tokens.iter().map(|t| t.token_address.clone()).collect::<Vec<_>>(),
        expected
    );
}

#[tokio::test]
async fn test_batch_size_one_is_sequential() {
    let f = setup(PipelineSettings {
        batch_size: 1,
        ..PipelineSettings::default()
    });
    f.market.set_delay(Duration::from_millis(5));
    f.profiles
        .set_profiles((0..8).map(|i| sample_profile(&format!("T{}", i))).collect());

    f.pipeline.enrich_page(2, 4).await.unwrap();

    assert_eq!(f.market.total_calls(), 4);
    assert_eq!(f.market.max_in_flight(), 1);
}

#[tokio::test]
async fn test_failed_profile_fetch_is_empty_and_not_cached() {
    let f = setup(PipelineSettings::default());
    f.profiles.set_failing(true);

    let tokens = f.pipeline.enrich_page(2, 5).await.unwrap();
    assert!(tokens.is_empty());
    assert!(!f.cache.contains_key(&profiles_key(2, 5)));
    assert!(!f.cache.contains_key(&enriched_key(2, 5)));

    // Upstream recovers: the next call fetches again instead of serving a pinned failure
    f.profiles.set_failing(false);
    f.profiles
        .set_profiles((0..10).map(|i| sample_profile(&format!("T{}", i))).collect());
    f.market
        .add_market_data("T5", sample_market_data("T5", "SYM", "Name"));

    let tokens = f.pipeline.enrich_page(2, 5).await.unwrap();
    assert_eq!(addresses(&tokens), vec!["T5"]);
    assert_eq!(f.profiles.get_call_count("latest_page"), 2);
}

#[tokio::test]
async fn test_market_data_errors_and_absences_not_cached() {
    let f = setup(PipelineSettings::default());
    f.profiles
        .set_profiles(vec![sample_profile("A"), sample_profile("B")]);
    f.market.add_failure("A");
    f.market
        .add_market_data("A", sample_market_data("A", "AAA", "Token A"));

    let failed = f.pipeline.get_token("A").await.unwrap();
    assert!(failed.is_none());
    assert!(!f.cache.contains_key(&market_key("A")));

    let missing = f.pipeline.get_token("B").await.unwrap();
    assert!(missing.is_none());
    assert!(!f.cache.contains_key(&market_key("B")));

    f.market.clear_failures();
    let token = f.pipeline.get_token("A").await.unwrap();
    assert_eq!(token.map(|t| t.name), Some("AAA".to_string()));
    assert_eq!(f.market.get_call_count("A"), 2);
}

#[tokio::test]
async fn test_get_token_for_platform_address_uses_platform_profile() {
    let f = setup(PipelineSettings::default());
    f.market.add_market_data(
        PLATFORM_TOKEN_ADDRESS,
        sample_market_data(PLATFORM_TOKEN_ADDRESS, "OTHER", "Other"),
    );

    let token = f
        .pipeline
        .get_token(PLATFORM_TOKEN_ADDRESS)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(token.name, PLATFORM_TOKEN_NAME);
    assert!(token.description.is_some());
}

#[tokio::test]
async fn test_enriched_page_expires_after_ttl() {
    let f = setup(PipelineSettings {
        enriched_ttl: Duration::from_millis(50),
        profiles_ttl: Duration::from_millis(50),
        ..PipelineSettings::default()
    });
    f.profiles
        .set_profiles((0..4).map(|i| sample_profile(&format!("T{}", i))).collect());

    f.pipeline.enrich_page(2, 2).await.unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;
    f.pipeline.enrich_page(2, 2).await.unwrap();

    assert_eq!(f.profiles.get_call_count("latest_page"), 2);
}

#[tokio::test]
async fn test_cached_entries_use_expected_payloads() {
    let f = setup(PipelineSettings::default());
    f.profiles
        .set_profiles(vec![sample_profile("A"), sample_profile("B")]);
    f.market
        .add_market_data("B", sample_market_data("B", "BBB", "Token B"));

    f.pipeline.enrich_page(2, 1).await.unwrap();

    assert!(matches!(
        f.cache.get(&profiles_key(2, 1)),
        Some(CachedPayload::Profiles(p)) if p.len() == 1
    ));
    assert!(matches!(
        f.cache.get(&market_key("B")),
        Some(CachedPayload::MarketData(_))
    ));
    assert!(matches!(
        f.cache.get(&enriched_key(2, 1)),
        Some(CachedPayload::Tokens(t)) if t.len() == 1
    ));
}
