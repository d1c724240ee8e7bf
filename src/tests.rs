#[cfg(test)]
mod integration_tests {
    use crate::router::create_router;
    use crate::schemas::ApiResponse;
    use crate::test_utils::test_utils::{setup_test_app, setup_test_app_state, write_fixture};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn dashboard_path(region: &str) -> String {
        format!("/api/v1/regions/{}/dashboard", region)
    }

    #[tokio::test]
    async fn test_health_check() {
        // Setup test server
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Send GET request to health endpoint
        let response = server.get("/health").await;

        // Verify response
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["data_dir"], "available");
        assert_eq!(body["datasets"], 3);
        assert!(!body["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_regions() {
        // Setup test server
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Get the region catalog
        let response = server.get("/api/v1/regions").await;

        // Verify response
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Regions retrieved successfully");
        assert_eq!(body.data.len(), 3);

        // The fixture directory only holds euro-area-inflation files
        let euro = body
            .data
            .iter()
            .find(|r| r["region"] == "euro-area-inflation")
            .unwrap();
        assert_eq!(euro["unit"], "fraction");
        assert_eq!(euro["first_year"], 2022);
        assert_eq!(euro["last_year"], 2023);

        // Regions without data files still list, without year bounds
        let us = body
            .data
            .iter()
            .find(|r| r["region"] == "us-inflation")
            .unwrap();
        assert!(us["first_year"].is_null());
        assert!(us["last_year"].is_null());
    }

    #[tokio::test]
    async fn test_get_dashboard() {
        // Setup test server
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Request the 2023 dashboard for the euro area
        let response = server
            .get(&dashboard_path("euro-area-inflation"))
            .add_query_param("start_year", 2023)
            .add_query_param("end_year", 2023)
            .await;

        // Verify response
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Dashboard retrieved successfully");

        let data = &body.data;
        assert_eq!(data["region"], "euro-area-inflation");
        assert_eq!(data["unit"], "fraction");

        // Raw rows 2022-12..2023-08 align to 2022-11..2023-08; 2023 keeps 8 months
        let actual = data["actual"]["points"].as_array().unwrap();
        assert_eq!(actual.len(), 8);
        assert_eq!(actual[0]["date"], "2023-01-01");
        assert_eq!(actual[7]["date"], "2023-08-01");
        assert!(actual[7]["value"].is_null());

        // Forecasts from the shifted column reach one month past the actuals
        let model = data["model_forecast"]["points"].as_array().unwrap();
        assert_eq!(model.len(), 8);
        assert!((model[6]["value"].as_f64().unwrap() - 0.048).abs() < 1e-12);
        assert!(model[7]["value"].is_null());

        // Band spans the last two known forecast months
        let vertices = data["band"]["vertices"].as_array().unwrap();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0]["date"], "2023-06-01");
        assert_eq!(vertices[1]["date"], "2023-07-01");
        assert_eq!(vertices[3]["date"], "2023-06-01");
        let width = vertices[2]["value"].as_f64().unwrap() - vertices[1]["value"].as_f64().unwrap();
        assert!((width - 0.0031622776601683794).abs() < 1e-9);

        // Metrics stay off unless requested
        assert!(data["model_errors"]["absolute"].is_null());
        assert!(data["model_errors"]["squared"].is_null());
        assert!(data["benchmark_errors"]["absolute"].is_null());

        // Summary scales fraction datasets to percentage points
        let latest_actual = &data["summary"]["latest_actual"];
        assert_eq!(latest_actual["date"], "2023-06-01");
        assert!((latest_actual["value"].as_f64().unwrap() - 5.5).abs() < 1e-9);
        let latest_forecast = &data["summary"]["latest_model_forecast"];
        assert_eq!(latest_forecast["date"], "2023-07-01");
        assert!((latest_forecast["value"].as_f64().unwrap() - 4.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_get_dashboard_with_metrics() {
        // Setup test server
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Request the dashboard with both metric toggles on
        let response = server
            .get(&dashboard_path("euro-area-inflation"))
            .add_query_param("start_year", 2023)
            .add_query_param("end_year", 2023)
            .add_query_param("absolute_errors", true)
            .add_query_param("squared_errors", true)
            .await;

        // Verify response
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);

        let absolute = body.data["model_errors"]["absolute"].as_array().unwrap();
        assert_eq!(absolute.len(), 8);
        let defined: Vec<f64> = absolute
            .iter()
            .filter_map(|point| point["value"].as_f64())
            .collect();
        assert_eq!(defined.len(), 6);
        assert!((defined[0] - 0.002).abs() < 1e-9);

        // Running sum skips undefined months without resetting
        let cumulative = body.data["model_errors"]["cumulative_squared"]
            .as_array()
            .unwrap();
        assert!(cumulative[7]["value"].is_null());
        let last_defined = cumulative
            .iter()
            .filter_map(|point| point["value"].as_f64())
            .last()
            .unwrap();
        assert!((last_defined - 0.00029).abs() < 1e-12);

        // Benchmark gets the same treatment
        assert!(body.data["benchmark_errors"]["absolute"].is_array());
        assert!(body.data["benchmark_errors"]["squared"].is_array());
    }

    #[tokio::test]
    async fn test_get_dashboard_inverted_range_is_empty() {
        // Setup test server
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Send an inverted year range
        let response = server
            .get(&dashboard_path("euro-area-inflation"))
            .add_query_param("start_year", 2024)
            .add_query_param("end_year", 2023)
            .await;

        // An inverted range is an empty result, not an error
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert!(body.data["actual"]["points"].as_array().unwrap().is_empty());
        assert!(body.data["band"].is_null());
        assert!(body.data["summary"]["latest_actual"].is_null());
    }

    #[tokio::test]
    async fn test_get_dashboard_unknown_region() {
        // Setup test server
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Request a region outside the identifier set
        let response = server
            .get(&dashboard_path("atlantis"))
            .add_query_param("start_year", 2023)
            .add_query_param("end_year", 2023)
            .await;

        // Verify response
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "INVALID_REGION");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_get_dashboard_region_without_files() {
        // Setup test server
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // us-inflation is configured but its files are not in the fixture dir
        let response = server
            .get(&dashboard_path("us-inflation"))
            .add_query_param("start_year", 2023)
            .add_query_param("end_year", 2023)
            .await;

        // Verify response
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "MALFORMED_INPUT");
    }

    #[tokio::test]
    async fn test_get_dashboard_rejects_non_increasing_dates() {
        // Setup test server over a corrupted table
        let state = setup_test_app_state();
        write_fixture(
            &state.data_dir,
            "euro-area-inflation.csv",
            "date,inflation,pred_signal_llama_70b,pred_swap\n\
             2023-02,0.085,0.084,0.083\n\
             2023-01,0.086,0.087,0.085\n",
        );
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .get(&dashboard_path("euro-area-inflation"))
            .add_query_param("start_year", 2023)
            .add_query_param("end_year", 2023)
            .await;

        // Verify response
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "MALFORMED_INPUT");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_get_dashboard_missing_column() {
        // Setup test server over a table lacking the benchmark column
        let state = setup_test_app_state();
        write_fixture(
            &state.data_dir,
            "euro-area-inflation.csv",
            "date,inflation,pred_signal_llama_70b\n2023-01,0.086,0.087\n",
        );
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .get(&dashboard_path("euro-area-inflation"))
            .add_query_param("start_year", 2023)
            .add_query_param("end_year", 2023)
            .await;

        // Verify response
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "MALFORMED_INPUT");
    }

    #[tokio::test]
    async fn test_get_dashboard_short_error_sample_omits_band() {
        // Setup test server with a one-observation residual file
        let state = setup_test_app_state();
        write_fixture(&state.data_dir, "euro-area-inflation-errors.csv", "error\n0.004\n");
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .get(&dashboard_path("euro-area-inflation"))
            .add_query_param("start_year", 2023)
            .add_query_param("end_year", 2023)
            .await;

        // The dashboard still renders; only the band is dropped
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert!(body.data["band"].is_null());
        assert!(!body.data["actual"]["points"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_dashboard_rejects_out_of_range_years() {
        // Setup test server
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Year below the validated range
        let response = server
            .get(&dashboard_path("euro-area-inflation"))
            .add_query_param("start_year", 1600)
            .add_query_param("end_year", 2023)
            .await;

        // Verify response
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_dashboard_served_from_cache_on_repeat() {
        // Setup test server
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // First request computes, second hits the cache
        let first = server
            .get(&dashboard_path("euro-area-inflation"))
            .add_query_param("start_year", 2023)
            .add_query_param("end_year", 2023)
            .await;
        first.assert_status(StatusCode::OK);

        let second = server
            .get(&dashboard_path("euro-area-inflation"))
            .add_query_param("start_year", 2023)
            .add_query_param("end_year", 2023)
            .await;
        second.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = second.json();
        assert_eq!(body.message, "Dashboard retrieved from cache");

        // The cached payload matches the computed one
        let first_body: ApiResponse<serde_json::Value> = first.json();
        assert_eq!(first_body.data, body.data);
    }
}
