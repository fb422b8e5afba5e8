// tests/gateway/shutdown_tests.rs

#[cfg(test)]
mod tests {

    use crate::{TestServer, client};
    use reqwest::StatusCode;
    use server_data_gateway::AdmissionConfig;
    use std::time::Duration;

    #[tokio::test]
    async fn stop_route_shuts_the_server_down() {
        let server = TestServer::start_with(AdmissionConfig::default(), true).await;

        {
            let client = client();
            let res = client.get(server.url("/stop")).send().await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
        }

        let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
