#[cfg(test)]
mod integration_tests {
    use crate::handlers::applications::{
        RespondToApplicationRequest, SubmitApplicationRequest, WithdrawApplicationRequest,
    };
    use crate::handlers::dismissals::DismissRequest;
    use crate::handlers::offers::{IssueOfferRequest, RespondToOfferRequest};
    use crate::handlers::postings::CreatePostingRequest;
    use crate::handlers::users::{CreateUserRequest, EmployerProfilePayload, SeekerProfilePayload};
    use crate::schemas::{ApiResponse, ErrorResponse};
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{Duration, Utc};

    async fn create_employer(server: &TestServer, name: &str, phone: &str) -> i32 {
        let request = CreateUserRequest {
            name: name.to_string(),
            phone: phone.to_string(),
            email: format!("{}@example.com", phone),
            role: "employer".to_string(),
            seeker_profile: None,
            employer_profile: Some(EmployerProfilePayload {
                company_name: format!("{} Services", name),
                company_type: Some("Household".to_string()),
                industry: None,
                business_description: None,
            }),
        };
        let response = server.post("/api/v1/users").json(&request).await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap() as i32
    }

    async fn create_seeker(server: &TestServer, name: &str, phone: &str) -> i32 {
        let request = CreateUserRequest {
            name: name.to_string(),
            phone: phone.to_string(),
            email: format!("{}@example.com", phone),
            role: "seeker".to_string(),
            seeker_profile: Some(SeekerProfilePayload {
                experience: Some("2-5 years".to_string()),
                education: None,
                expected_salary: Some(15000),
                job_types: vec!["cook".to_string()],
                availability: vec!["full-time".to_string()],
                languages: vec!["Hindi".to_string()],
            }),
            employer_profile: None,
        };
        let response = server.post("/api/v1/users").json(&request).await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap() as i32
    }

    async fn create_posting(server: &TestServer, employer_id: i32, required: i32) -> i32 {
        let request = CreatePostingRequest {
            employer_id,
            title: "Live-in Cook".to_string(),
            description: "North Indian meals for a family of four".to_string(),
            requirements: Some("Vegetarian cooking".to_string()),
            benefits: None,
            location: "Pune".to_string(),
            job_type: "cook".to_string(),
            salary: 18000,
            required_candidates: required,
        };
        let response = server.post("/api/v1/postings").json(&request).await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap() as i32
    }

    async fn submit_application(server: &TestServer, applicant_id: i32, job_id: i32) -> i32 {
        let request = SubmitApplicationRequest {
            applicant_id,
            job_id,
        };
        let response = server.post("/api/v1/applications").json(&request).await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap() as i32
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_users_with_role_profiles() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let employer_id = create_employer(&server, "Meera", "9000000001").await;
        let seeker_id = create_seeker(&server, "Ravi", "9000000002").await;
        assert!(employer_id > 0);
        assert!(seeker_id > 0);

        // Fetch the seeker back with their profile attached
        let response = server
            .get(&format!("/api/v1/users/{}", seeker_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["role"], "seeker");
        assert_eq!(body.data["seeker_profile"]["expected_salary"], 15000);
        assert_eq!(body.data["seeker_profile"]["job_types"][0], "cook");

        // The employer listing carries company profiles
        let response = server.get("/api/v1/users?role=employer").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data.as_array().unwrap().len(), 1);
        assert_eq!(
            body.data[0]["employer_profile"]["company_name"],
            "Meera Services"
        );
    }

    #[tokio::test]
    async fn test_create_user_rejects_mismatched_profile() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let request = CreateUserRequest {
            name: "Ravi".to_string(),
            phone: "9000000003".to_string(),
            email: "ravi@example.com".to_string(),
            role: "seeker".to_string(),
            seeker_profile: None,
            employer_profile: Some(EmployerProfilePayload {
                company_name: "Not Allowed".to_string(),
                company_type: None,
                industry: None,
                business_description: None,
            }),
        };
        let response = server.post("/api/v1/users").json(&request).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_a_conflict() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_seeker(&server, "Ravi", "9000000004").await;

        let request = CreateUserRequest {
            name: "Other Ravi".to_string(),
            phone: "9000000004".to_string(),
            email: "other@example.com".to_string(),
            role: "seeker".to_string(),
            seeker_profile: None,
            employer_profile: None,
        };
        let response = server.post("/api/v1/users").json(&request).await;

        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "PHONE_OR_EMAIL_EXISTS");
    }

    #[tokio::test]
    async fn test_posting_fills_up_and_auto_closes() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let employer_id = create_employer(&server, "Meera", "9100000001").await;
        let seeker_a = create_seeker(&server, "Asha", "9100000002").await;
        let seeker_b = create_seeker(&server, "Binu", "9100000003").await;
        let seeker_c = create_seeker(&server, "Chitra", "9100000004").await;
        let job_id = create_posting(&server, employer_id, 2).await;

        let app_a = submit_application(&server, seeker_a, job_id).await;
        let app_b = submit_application(&server, seeker_b, job_id).await;
        let app_c = submit_application(&server, seeker_c, job_id).await;

        // A second active application from the same seeker is refused
        let response = server
            .post("/api/v1/applications")
            .json(&SubmitApplicationRequest {
                applicant_id: seeker_a,
                job_id,
            })
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "DUPLICATE_APPLICATION");

        // Accept the first two applicants
        for application_id in [app_a, app_b] {
            let response = server
                .post(&format!("/api/v1/applications/{}/respond", application_id))
                .json(&RespondToApplicationRequest {
                    decision: "accept".to_string(),
                    message: Some("See you Monday".to_string()),
                })
                .await;
            response.assert_status(StatusCode::OK);
        }

        // Both positions are filled, the posting auto-closed
        let response = server.get(&format!("/api/v1/postings/{}", job_id)).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["is_closed"], true);
        assert_eq!(body.data["auto_closed"], true);
        assert_eq!(body.data["progress"]["phase"], "auto_closed");
        assert_eq!(body.data["progress"]["remaining_slots"], 0);
        assert_eq!(body.data["progress"]["applications_count"], 3);

        // Accepting the third applicant must fail, capacity is exhausted
        let response = server
            .post(&format!("/api/v1/applications/{}/respond", app_c))
            .json(&RespondToApplicationRequest {
                decision: "accept".to_string(),
                message: None,
            })
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "POSTING_FULL");

        // The failed accept left the application pending, rejection still works
        let response = server
            .post(&format!("/api/v1/applications/{}/respond", app_c))
            .json(&RespondToApplicationRequest {
                decision: "reject".to_string(),
                message: Some("Positions filled".to_string()),
            })
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status"], "rejected");
    }

    #[tokio::test]
    async fn test_application_withdraw_blocks_later_decisions() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let employer_id = create_employer(&server, "Meera", "9200000001").await;
        let seeker_id = create_seeker(&server, "Asha", "9200000002").await;
        let job_id = create_posting(&server, employer_id, 1).await;
        let application_id = submit_application(&server, seeker_id, job_id).await;

        let response = server
            .post(&format!("/api/v1/applications/{}/withdraw", application_id))
            .json(&WithdrawApplicationRequest {
                applicant_id: seeker_id,
            })
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status"], "withdrawn");

        // The employer can no longer accept it
        let response = server
            .post(&format!("/api/v1/applications/{}/respond", application_id))
            .json(&RespondToApplicationRequest {
                decision: "accept".to_string(),
                message: None,
            })
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "ALREADY_RESPONDED");
    }

    #[tokio::test]
    async fn test_offer_expiry_validation_and_decline() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let employer_id = create_employer(&server, "Meera", "9300000001").await;
        let seeker_id = create_seeker(&server, "Asha", "9300000002").await;
        let job_id = create_posting(&server, employer_id, 1).await;

        // Expiry in the past is refused outright
        let response = server
            .post("/api/v1/offers")
            .json(&IssueOfferRequest {
                employer_id,
                job_seeker_id: seeker_id,
                job_id,
                job_title: "Live-in Cook".to_string(),
                job_description: "North Indian meals".to_string(),
                location: "Pune".to_string(),
                salary_offered: 20000,
                expires_at: Some(Utc::now().naive_utc() - Duration::hours(1)),
            })
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_EXPIRY");

        // Omitted expiry defaults to a future deadline
        let response = server
            .post("/api/v1/offers")
            .json(&IssueOfferRequest {
                employer_id,
                job_seeker_id: seeker_id,
                job_id,
                job_title: "Live-in Cook".to_string(),
                job_description: "North Indian meals".to_string(),
                location: "Pune".to_string(),
                salary_offered: 20000,
                expires_at: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        let offer_id = body.data["id"].as_i64().unwrap();
        assert_eq!(body.data["status"], "pending");

        let response = server
            .post(&format!("/api/v1/offers/{}/respond", offer_id))
            .json(&RespondToOfferRequest {
                decision: "decline".to_string(),
                message: Some("Found another job".to_string()),
            })
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status"], "declined");

        // Declining leaves the posting open
        let response = server.get(&format!("/api/v1/postings/{}", job_id)).await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["is_closed"], false);

        // A second answer is refused
        let response = server
            .post(&format!("/api/v1/offers/{}/respond", offer_id))
            .json(&RespondToOfferRequest {
                decision: "accept".to_string(),
                message: None,
            })
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "ALREADY_RESPONDED");

        // Nothing stale for the sweep to pick up
        let response = server.post("/api/v1/offers/sweep").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["expired"], 0);
    }

    #[tokio::test]
    async fn test_accepted_offer_records_the_hire() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let employer_id = create_employer(&server, "Meera", "9400000001").await;
        let seeker_id = create_seeker(&server, "Asha", "9400000002").await;
        let job_id = create_posting(&server, employer_id, 1).await;

        let response = server
            .post("/api/v1/offers")
            .json(&IssueOfferRequest {
                employer_id,
                job_seeker_id: seeker_id,
                job_id,
                job_title: "Live-in Cook".to_string(),
                job_description: "North Indian meals".to_string(),
                location: "Pune".to_string(),
                salary_offered: 20000,
                expires_at: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        let offer_id = body.data["id"].as_i64().unwrap();

        let response = server
            .post(&format!("/api/v1/offers/{}/respond", offer_id))
            .json(&RespondToOfferRequest {
                decision: "accept".to_string(),
                message: None,
            })
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status"], "accepted");

        // The single position is filled, the posting auto-closed
        let response = server.get(&format!("/api/v1/postings/{}", job_id)).await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["is_closed"], true);
        assert_eq!(body.data["progress"]["phase"], "auto_closed");
        assert_eq!(body.data["progress"]["hired_count"], 1);
    }

    #[tokio::test]
    async fn test_congratulations_flow_with_idempotent_dismissal() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let employer_id = create_employer(&server, "Meera", "9500000001").await;
        let seeker_id = create_seeker(&server, "Asha", "9500000002").await;
        let job_id = create_posting(&server, employer_id, 1).await;
        let application_id = submit_application(&server, seeker_id, job_id).await;

        let response = server
            .post(&format!("/api/v1/applications/{}/respond", application_id))
            .json(&RespondToApplicationRequest {
                decision: "accept".to_string(),
                message: None,
            })
            .await;
        response.assert_status(StatusCode::OK);

        // The fresh hire shows up on the congratulations surface
        let response = server
            .get(&format!("/api/v1/users/{}/congratulations", seeker_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data.as_array().unwrap().len(), 1);
        assert_eq!(body.data[0]["status"], "accepted");

        // Dismiss it, twice; the replay is a silent no-op
        for _ in 0..2 {
            let response = server
                .post("/api/v1/congratulations/dismiss")
                .json(&DismissRequest {
                    user_id: seeker_id,
                    job_id,
                    application_id,
                })
                .await;
            response.assert_status(StatusCode::OK);
        }

        let response = server
            .get(&format!("/api/v1/users/{}/congratulations", seeker_id))
            .await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.data.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_posting_listing_hides_closed_and_deleted() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let employer_id = create_employer(&server, "Meera", "9600000001").await;
        let open_id = create_posting(&server, employer_id, 2).await;
        let closed_id = create_posting(&server, employer_id, 2).await;
        let deleted_id = create_posting(&server, employer_id, 2).await;

        let response = server
            .post(&format!("/api/v1/postings/{}/close", closed_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["progress"]["phase"], "manually_closed");

        let response = server
            .delete(&format!(
                "/api/v1/postings/{}?employer_id={}",
                deleted_id, employer_id
            ))
            .await;
        response.assert_status(StatusCode::OK);

        // Default browse only shows the open posting
        let response = server.get("/api/v1/postings").await;
        let body: ApiResponse<serde_json::Value> = response.json();
        let listed: Vec<i64> = body
            .data
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect();
        assert_eq!(listed, vec![i64::from(open_id)]);

        // Employer dashboard includes the closed one, never the deleted one
        let response = server
            .get(&format!(
                "/api/v1/postings?employer_id={}&include_closed=true",
                employer_id
            ))
            .await;
        let body: ApiResponse<serde_json::Value> = response.json();
        let listed: Vec<i64> = body
            .data
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect();
        assert_eq!(listed.len(), 2);
        assert!(listed.contains(&i64::from(closed_id)));
        assert!(!listed.contains(&i64::from(deleted_id)));

        // The deleted posting also 404s on direct fetch
        let response = server.get(&format!("/api/v1/postings/{}", deleted_id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_user_deletion_cascades_to_applications() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let employer_id = create_employer(&server, "Meera", "9700000001").await;
        let seeker_id = create_seeker(&server, "Asha", "9700000002").await;
        let job_id = create_posting(&server, employer_id, 1).await;
        submit_application(&server, seeker_id, job_id).await;

        let response = server.delete(&format!("/api/v1/users/{}", seeker_id)).await;
        response.assert_status(StatusCode::OK);

        let response = server
            .get(&format!("/api/v1/postings/{}/applications", job_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.data.as_array().unwrap().is_empty());
    }
}
