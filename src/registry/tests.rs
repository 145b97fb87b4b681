//! Registry Module Tests
//!
//! ## Test Scopes
//! - **Store**: Registration identity, heartbeat refresh and TTL-based eviction.
//! - **Concurrency**: Read-time sweeps racing registrations on the same name.
//! - **HTTP API**: The wire contract of `/register`, `/heartbeat/{name}` and `/services`.

#[cfg(test)]
mod tests {
    use crate::registry::handlers::router;
    use crate::registry::protocol::StatusResponse;
    use crate::registry::store::RegistryStore;
    use crate::registry::types::{HeartbeatStatus, InstanceAddr};
    use crate::testing::serve;
    use std::time::{Duration, Instant};

    const TTL: Duration = Duration::from_secs(15);

    // ============================================================
    // REGISTRATION TESTS
    // ============================================================

    #[test]
    fn test_register_same_address_twice_yields_one_entry() {
        let store = RegistryStore::new(TTL);

        store.register("catalog", "127.0.0.1", 9001);
        store.register("catalog", "127.0.0.1", 9001);

        let all = store.list_all();
        assert_eq!(all["catalog"].len(), 1);
        assert_eq!(store.list_live("catalog").len(), 1);
    }

    #[test]
    fn test_register_distinct_ports_are_distinct_instances() {
        let store = RegistryStore::new(TTL);

        store.register("catalog", "127.0.0.1", 9001);
        store.register("catalog", "127.0.0.1", 9002);
        store.register("readers", "127.0.0.1", 9001);

        assert_eq!(store.list_live("catalog").len(), 2);
        assert_eq!(store.list_live("readers").len(), 1);
    }

    #[test]
    fn test_register_then_resolve_immediately() {
        let store = RegistryStore::new(TTL);

        store.register("catalog", "127.0.0.1", 9001);

        assert_eq!(
            store.list_live("catalog"),
            vec![InstanceAddr::new("127.0.0.1", 9001)]
        );
    }

    #[test]
    fn test_reregistration_revives_expiring_instance() {
        let store = RegistryStore::new(TTL);
        let t0 = Instant::now();

        store.register_at("catalog", "127.0.0.1", 9001, t0);
        store.register_at("catalog", "127.0.0.1", 9001, t0 + Duration::from_secs(10));

        let live = store.list_live_at("catalog", t0 + Duration::from_secs(20));
        assert_eq!(live.len(), 1);
    }

    #[test]
    fn test_base_url_brackets_ipv6_hosts() {
        assert_eq!(
            InstanceAddr::new("127.0.0.1", 9001).base_url(),
            "http://127.0.0.1:9001"
        );
        assert_eq!(InstanceAddr::new("::1", 9001).base_url(), "http://[::1]:9001");
        assert_eq!(
            InstanceAddr::new("[fe80::1]", 9001).base_url(),
            "http://[fe80::1]:9001"
        );
        assert_eq!(
            InstanceAddr::new("catalog.local", 9001).base_url(),
            "http://catalog.local:9001"
        );
    }

    // ============================================================
    // HEARTBEAT TESTS
    // ============================================================

    #[test]
    fn test_heartbeat_unknown_name_is_not_found() {
        let store = RegistryStore::new(TTL);

        assert_eq!(
            store.heartbeat("ghost", "127.0.0.1", 1),
            HeartbeatStatus::NotFound
        );
    }

    #[test]
    fn test_heartbeat_unknown_address_is_not_found() {
        let store = RegistryStore::new(TTL);
        store.register("catalog", "127.0.0.1", 9001);

        assert_eq!(
            store.heartbeat("catalog", "127.0.0.1", 9002),
            HeartbeatStatus::NotFound
        );
        // A missed heartbeat never registers implicitly
        assert_eq!(store.list_live("catalog").len(), 1);
    }

    #[test]
    fn test_heartbeat_resets_age() {
        let store = RegistryStore::new(TTL);
        let t0 = Instant::now();

        store.register_at("catalog", "127.0.0.1", 9001, t0);
        let status = store.heartbeat_at("catalog", "127.0.0.1", 9001, t0 + Duration::from_secs(14));
        assert_eq!(status, HeartbeatStatus::Alive);

        // 28s after registration, but only 14s after the last beat
        let live = store.list_live_at("catalog", t0 + Duration::from_secs(28));
        assert_eq!(live.len(), 1);
    }

    #[test]
    fn test_heartbeat_every_half_ttl_never_expires() {
        let store = RegistryStore::new(TTL);
        let t0 = Instant::now();
        let half = TTL / 2;

        store.register_at("catalog", "127.0.0.1", 9001, t0);

        for beat in 1..=50u32 {
            let now = t0 + half * beat;
            assert_eq!(
                store.list_live_at("catalog", now).len(),
                1,
                "instance expired at beat {}",
                beat
            );
            store.heartbeat_at("catalog", "127.0.0.1", 9001, now);
        }
    }

    // ============================================================
    // LIVENESS FILTERING TESTS
    // ============================================================

    #[test]
    fn test_instance_expires_after_ttl() {
        let store = RegistryStore::new(TTL);
        let t0 = Instant::now();

        store.register_at("catalog", "127.0.0.1", 9001, t0);

        assert_eq!(store.list_live_at("catalog", t0 + TTL - Duration::from_millis(1)).len(), 1);
        // Age equal to the TTL already counts as dead
        assert!(store.list_live_at("catalog", t0 + TTL).is_empty());
    }

    #[test]
    fn test_list_live_sweeps_store() {
        let store = RegistryStore::new(TTL);
        let t0 = Instant::now();

        store.register_at("catalog", "127.0.0.1", 9001, t0);
        store.register_at("catalog", "127.0.0.1", 9002, t0 + Duration::from_secs(10));

        let live = store.list_live_at("catalog", t0 + Duration::from_secs(16));
        assert_eq!(live, vec![InstanceAddr::new("127.0.0.1", 9002)]);

        // The stale entry is gone from the backing store, not just filtered
        let all = store.list_all();
        assert_eq!(all["catalog"].len(), 1);
        assert_eq!(all["catalog"][0].port, 9002);
    }

    #[test]
    fn test_list_all_does_not_sweep() {
        let store = RegistryStore::new(Duration::from_millis(1));
        store.register("catalog", "127.0.0.1", 9001);

        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(store.list_all()["catalog"].len(), 1);
        assert!(store.list_live("catalog").is_empty());
        assert!(store.list_all()["catalog"].is_empty());
    }

    #[test]
    fn test_list_live_unknown_name_is_empty() {
        let store = RegistryStore::new(TTL);

        assert!(store.list_live("nothing").is_empty());
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn test_sweep_expired_covers_every_name() {
        let store = RegistryStore::new(TTL);
        let t0 = Instant::now();

        store.register_at("catalog", "127.0.0.1", 9001, t0);
        store.register_at("readers", "127.0.0.1", 9002, t0);
        store.register_at("loans", "127.0.0.1", 9003, t0 + Duration::from_secs(10));

        let evicted = store.sweep_expired_at(t0 + Duration::from_secs(20));

        assert_eq!(evicted, 2);
        let all = store.list_all();
        assert!(all["catalog"].is_empty());
        assert!(all["readers"].is_empty());
        assert_eq!(all["loans"].len(), 1);
    }

    #[tokio::test]
    async fn test_sweeper_task_evicts_without_reads() {
        let store = RegistryStore::new(Duration::from_millis(50));
        store.register("catalog", "127.0.0.1", 9001);

        let sweeper = store.clone().spawn_sweeper(Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(200)).await;
        sweeper.abort();

        assert!(store.list_all()["catalog"].is_empty());
    }

    // ============================================================
    // CONCURRENCY TESTS
    // ============================================================

    #[test]
    fn test_sweep_never_drops_concurrent_registrations() {
        let store = RegistryStore::new(TTL);
        let t0 = Instant::now();
        let fresh = t0 + Duration::from_secs(60);

        // Stale instances give every sweep something to evict.
        for port in 1..=200 {
            store.register_at("catalog", "10.0.0.1", port, t0);
        }

        const WRITERS: u16 = 4;
        const PER_WRITER: u16 = 250;

        std::thread::scope(|scope| {
            for writer in 0..WRITERS {
                let store = &store;
                scope.spawn(move || {
                    for i in 0..PER_WRITER {
                        let port = 10_000 + writer * PER_WRITER + i;
                        store.register_at("catalog", "127.0.0.1", port, fresh);
                        assert_eq!(
                            store.heartbeat_at("catalog", "127.0.0.1", port, fresh),
                            HeartbeatStatus::Alive
                        );
                    }
                });
            }

            for _ in 0..2 {
                let store = &store;
                scope.spawn(move || {
                    for _ in 0..500 {
                        store.list_live_at("catalog", fresh);
                    }
                });
            }
        });

        let live = store.list_live_at("catalog", fresh);
        assert_eq!(live.len(), (WRITERS * PER_WRITER) as usize);
        assert!(live.iter().all(|addr| addr.host == "127.0.0.1"));
        for port in 10_000..10_000 + WRITERS * PER_WRITER {
            assert!(live.contains(&InstanceAddr::new("127.0.0.1", port)));
        }
    }

    // ============================================================
    // HTTP API TESTS
    // ============================================================

    #[tokio::test]
    async fn test_http_register_heartbeat_and_list() {
        let store = RegistryStore::new(TTL);
        let addr = serve(router(store.clone())).await;
        let client = reqwest::Client::new();
        let base = format!("http://{}", addr);

        let registered: StatusResponse = client
            .post(format!("{}/register", base))
            .query(&[("name", "catalog"), ("host", "127.0.0.1"), ("port", "9001")])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(registered.status, "registered");

        let alive: StatusResponse = client
            .post(format!("{}/heartbeat/catalog", base))
            .query(&[("host", "127.0.0.1"), ("port", "9001")])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(alive.status, "alive");

        let missing: StatusResponse = client
            .post(format!("{}/heartbeat/catalog", base))
            .query(&[("host", "127.0.0.1"), ("port", "9999")])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(missing.status, "not found");

        let live: Vec<InstanceAddr> = client
            .get(format!("{}/services/catalog", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(live, vec![InstanceAddr::new("127.0.0.1", 9001)]);

        let unknown: Vec<InstanceAddr> = client
            .get(format!("{}/services/unknown", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_http_list_all_shape() {
        let store = RegistryStore::new(TTL);
        store.register("catalog", "127.0.0.1", 9001);
        let addr = serve(router(store)).await;

        let body: serde_json::Value = reqwest::get(format!("http://{}/services", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let entry = &body["catalog"][0];
        assert_eq!(entry["host"], "127.0.0.1");
        assert_eq!(entry["port"], 9001);
        assert!(entry["lastSeen"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_http_expired_instance_disappears() {
        let store = RegistryStore::new(Duration::from_millis(100));
        let addr = serve(router(store)).await;
        let client = reqwest::Client::new();

        client
            .post(format!("http://{}/register", addr))
            .query(&[("name", "catalog"), ("host", "127.0.0.1"), ("port", "9001")])
            .send()
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;

        let live: Vec<InstanceAddr> = client
            .get(format!("http://{}/services/catalog", addr))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(live.is_empty());
    }
}
