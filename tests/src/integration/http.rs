//! # HTTP Scenarios
//!
//! End-to-end requests through the gateway router: identity resolution, the
//! route guard, fg-01 to fg-03 and the error mapping, all in one pass.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{
        gateway, gateway_config, get, scenario_store, send, CLIENT_KEY, OTHER_KEY,
    };
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;

    const JAN_SUBMISSION: &str = "/forms/contact/submissions/uuid-jan";

    // =========================================================================
    // access
    // =========================================================================

    #[tokio::test]
    async fn test_single_submission_is_gated_by_allow_list() {
        let gateway = gateway(scenario_store(), gateway_config());

        let (status, body) = send(gateway.router(), get(JAN_SUBMISSION, Some(OTHER_KEY))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "forbidden");

        let (status, _) = send(gateway.router(), get(JAN_SUBMISSION, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(gateway.router(), get(JAN_SUBMISSION, Some(CLIENT_KEY))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entity"]["uuid"], "uuid-jan");
        assert_eq!(body["data"]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_query_param_key_is_accepted() {
        let gateway = gateway(scenario_store(), gateway_config());
        let uri = format!("{JAN_SUBMISSION}?api-key={CLIENT_KEY}");
        let (status, _) = send(gateway.router(), get(&uri, None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_view_any_user_reads_unlisted_form() {
        let mut config = gateway_config();
        config.access.view_any_users = vec![7];
        let gateway = gateway(scenario_store(), config);

        let (status, _) = send(gateway.router(), get(JAN_SUBMISSION, Some(OTHER_KEY))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_form_without_allow_list() {
        let closed = gateway(scenario_store(), gateway_config());
        let (status, _) = send(closed.router(), get("/forms/open/submissions", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let mut config = gateway_config();
        config.access.open_when_allow_list_empty = true;
        let open = gateway(scenario_store(), config);
        let (status, body) = send(open.router(), get("/forms/open/submissions", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["submissions"].as_object().map(|s| s.len()), Some(1));
    }

    #[tokio::test]
    async fn test_uuid_of_other_form_is_not_found() {
        let gateway = gateway(scenario_store(), gateway_config());
        let (status, _) = send(
            gateway.router(),
            get("/forms/contact/submissions/uuid-survey", Some(CLIENT_KEY)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // =========================================================================
    // listing
    // =========================================================================

    #[tokio::test]
    async fn test_invalid_endtime_is_400_naming_parameter() {
        let gateway = gateway(scenario_store(), gateway_config());
        let (status, body) = send(
            gateway.router(),
            get(
                "/forms/contact/submissions?starttime=2024-01-01T00:00:00Z&endtime=not-a-date",
                Some(CLIENT_KEY),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_parameter");
        assert!(body["error"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("endtime")));
    }

    #[tokio::test]
    async fn test_listing_window() {
        let gateway = gateway(scenario_store(), gateway_config());
        let (status, body) = send(
            gateway.router(),
            get(
                "/forms/contact/submissions?starttime=2024-01-15",
                Some(CLIENT_KEY),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "webform_id": "contact",
                "starttime": "2024-01-15",
                "submissions": {
                    "uuid-feb": "http://forms.test/forms/contact/submissions/uuid-feb"
                }
            })
        );
    }

    #[tokio::test]
    async fn test_inverted_window_lists_nothing() {
        let gateway = gateway(scenario_store(), gateway_config());
        let (status, body) = send(
            gateway.router(),
            get(
                "/forms/contact/submissions?starttime=2024-03-01&endtime=2024-01-01",
                Some(CLIENT_KEY),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["submissions"], json!({}));
    }

    // =========================================================================
    // enrichment
    // =========================================================================

    #[tokio::test]
    async fn test_managed_file_upload_is_linked() {
        let gateway = gateway(scenario_store(), gateway_config());
        let (status, body) = send(gateway.router(), get(JAN_SUBMISSION, Some(CLIENT_KEY))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["upload"], "127");
        assert_eq!(
            body["data"]["linked"],
            json!({
                "upload": {
                    "127": {
                        "id": "127",
                        "url": "http://forms.test/files/private/webform/contact/1/cv.pdf",
                        "mimeType": "application/pdf",
                        "size": 2048
                    }
                }
            })
        );
        assert_eq!(body["data"]["attachments"]["receipt"]["type"], "pdf");
    }

    #[tokio::test]
    async fn test_linked_url_resolves_through_files_route() {
        let gateway = gateway(scenario_store(), gateway_config());
        let (_, body) = send(gateway.router(), get(JAN_SUBMISSION, Some(CLIENT_KEY))).await;
        let url = body["data"]["linked"]["upload"]["127"]["url"]
            .as_str()
            .unwrap()
            .to_string();
        let path = url.strip_prefix("http://forms.test").unwrap();

        let (status, file) = send(gateway.router(), get(path, Some(CLIENT_KEY))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(file["id"], "127");
        assert_eq!(file["url"], url);

        let (status, _) = send(gateway.router(), get(path, Some(OTHER_KEY))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    // =========================================================================
    // writes
    // =========================================================================

    #[tokio::test]
    async fn test_submit_then_read_back() {
        let store = scenario_store();
        let gateway = gateway(store, gateway_config());

        let submit = Request::builder()
            .method("POST")
            .uri("/forms/submit")
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-API-Key", CLIENT_KEY)
            .body(Body::from(
                json!({"webform_id": "contact", "name": "Linus", "upload": "127"}).to_string(),
            ))
            .unwrap();
        let (status, created) = send(gateway.router(), submit).await;
        assert_eq!(status, StatusCode::OK);
        let sid = created["sid"].as_str().unwrap().to_string();

        let uri = format!("/forms/contact/submissions/{sid}");
        let (status, body) = send(gateway.router(), get(&uri, Some(CLIENT_KEY))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Linus");
        assert!(body["data"].get("webform_id").is_none());
        assert!(body["data"]["linked"]["upload"]["127"].is_object());

        let (_, listing) = send(
            gateway.router(),
            get("/forms/contact/submissions", Some(CLIENT_KEY)),
        )
        .await;
        assert_eq!(listing["submissions"].as_object().map(|s| s.len()), Some(3));
    }

    #[tokio::test]
    async fn test_submit_to_foreign_form_is_forbidden() {
        let gateway = gateway(scenario_store(), gateway_config());
        let submit = Request::builder()
            .method("POST")
            .uri("/forms/submit")
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-API-Key", CLIENT_KEY)
            .body(Body::from(json!({"webform_id": "survey", "rating": 1}).to_string()))
            .unwrap();
        let (status, _) = send(gateway.router(), submit).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_submit_with_existing_uuid_still_checks_form() {
        let gateway = gateway(scenario_store(), gateway_config());
        let submit = Request::builder()
            .method("POST")
            .uri("/forms/submit")
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-API-Key", OTHER_KEY)
            .body(Body::from(
                json!({"webform_id": "contact", "submission_uuid": "uuid-jan", "name": "x"})
                    .to_string(),
            ))
            .unwrap();
        let (status, _) = send(gateway.router(), submit).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (_, listing) = send(
            gateway.router(),
            get("/forms/contact/submissions", Some(CLIENT_KEY)),
        )
        .await;
        assert_eq!(listing["submissions"].as_object().map(|s| s.len()), Some(2));
    }

    #[tokio::test]
    async fn test_head_is_gated_like_get() {
        let gateway = gateway(scenario_store(), gateway_config());
        let mut req = get(JAN_SUBMISSION, Some(OTHER_KEY));
        *req.method_mut() = axum::http::Method::HEAD;
        let (status, _) = send(gateway.router(), req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    // =========================================================================
    // metrics
    // =========================================================================

    #[tokio::test]
    async fn test_denials_show_up_in_metrics() {
        let gateway = gateway(scenario_store(), gateway_config());
        send(gateway.router(), get(JAN_SUBMISSION, Some(OTHER_KEY))).await;
        send(gateway.router(), get(JAN_SUBMISSION, None)).await;

        let (status, body) = send(gateway.router(), get("/admin/metrics", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["access"]["denied"], 2);
        assert_eq!(body["requests"]["error"], 2);
    }
}
