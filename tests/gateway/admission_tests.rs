// tests/gateway/admission_tests.rs

#[cfg(test)]
mod tests {

    use crate::{TestClock, TestServer, client};
    use axum::{Router, routing::get};
    use reqwest::StatusCode;
    use server_data_gateway::middleware::admission_guard;
    use server_data_gateway::models::ServerData;
    use server_data_gateway::state::AppState;
    use server_data_gateway::{AdmissionConfig, AdmissionController, SharedClock};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tokio::io::AsyncWriteExt;
    use tokio::net::{TcpListener, TcpStream};

    const SERVER_DATA: &str = "/growtopia/server_data.php";

    #[tokio::test]
    async fn eleventh_request_in_a_window_is_rate_limited() {
        let server = TestServer::start(AdmissionConfig::default()).await;
        let client = client();

        for _ in 0..10 {
            let res = client.post(server.url(SERVER_DATA)).send().await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
        }

        let res = client.post(server.url(SERVER_DATA)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(
            res.headers()["content-type"]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        assert_eq!(
            res.text().await.unwrap(),
            "Rate limit exceeded. Please try again later."
        );

        // a new window opens once the old one has passed
        server.clock.advance(61);
        let res = client.post(server.url(SERVER_DATA)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let usage = server.state.admission.usage("127.0.0.1").unwrap();
        assert_eq!(usage.request_count, 1);
        assert_eq!(usage.active, 0);
    }

    #[tokio::test]
    async fn get_requests_share_the_budget() {
        let server = TestServer::start(AdmissionConfig::default().max_requests_per_window(2)).await;
        let client = client();

        let res = client.get(server.url(SERVER_DATA)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        let res = client.post(server.url(SERVER_DATA)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = client.get(server.url(SERVER_DATA)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn no_connection_slots_means_503() {
        let server =
            TestServer::start(AdmissionConfig::default().max_concurrent_connections(0)).await;

        let res = client().post(server.url(SERVER_DATA)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            res.text().await.unwrap(),
            "Too many concurrent connections. Please try again later."
        );
    }

    #[tokio::test]
    async fn rate_limit_is_reported_before_connection_limit() {
        let config = AdmissionConfig::default()
            .max_requests_per_window(0)
            .max_concurrent_connections(0);
        let server = TestServer::start(config).await;

        let res = client().post(server.url(SERVER_DATA)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn unguarded_routes_do_not_count() {
        let server = TestServer::start(AdmissionConfig::default().max_requests_per_window(1)).await;
        let client = client();

        for _ in 0..5 {
            let res = client.get(server.url("/cache")).send().await.unwrap();
            assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        }

        assert!(server.state.admission.usage("127.0.0.1").is_none());
        let res = client.post(server.url(SERVER_DATA)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn client_disconnect_releases_the_slot() {
        let (base_url, state) =
            start_stalling_server(AdmissionConfig::default().max_concurrent_connections(1)).await;
        let addr = base_url.trim_start_matches("http://").to_string();

        // hold one request open; the handler never finishes
        let mut held = TcpStream::connect(&addr).await.unwrap();
        held.write_all(b"GET /stall HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        wait_for_active(&state, 1).await;

        // the single slot is taken, so a second request is turned away
        let res = client()
            .get(format!("{}/stall", base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

        drop(held);
        wait_for_active(&state, 0).await;
        assert_eq!(state.admission.active_connections(), 0);
    }

    // admission guard wrapped around a handler that never completes
    async fn start_stalling_server(config: AdmissionConfig) -> (String, Arc<AppState>) {
        let shared: SharedClock = Arc::new(TestClock::new(1_000));
        let admission = Arc::new(AdmissionController::new(config, shared));
        let state = Arc::new(AppState::new(
            admission,
            ServerData::new("127.0.0.1", 17091),
        ));

        let app = Router::new()
            .route(
                "/stall",
                get(|| async { std::future::pending::<&'static str>().await }),
            )
            .route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                admission_guard,
            ))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
        });

        (format!("http://{}", addr), state)
    }

    async fn wait_for_active(state: &AppState, expected: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while state.admission.active_connections() != expected {
            assert!(
                Instant::now() < deadline,
                "active connections stuck at {}, expected {}",
                state.admission.active_connections(),
                expected
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}
