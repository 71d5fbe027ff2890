//! Tests for the transport-agnostic API handlers

use archsec::adapters::OfflineCompletion;
use archsec::adapters::toml::TomlRuleStore;
use archsec::api::{
    self, AnalysisRequest, ApiContext, ApiResponse, DiffRequest, ErrorCode, RulesQuery,
    ValidateRequest, VerificationRequest,
};
use archsec::core::models::RiskLevel;
use archsec::core::services::{AnalysisOptions, prompt};

use crate::common::mocks::{MockCompletion, MockRuleStore, rule};
use crate::common::{WEB_APP, WEB_APP_FIXED, analysis_response, verification_response};

fn context(llm: MockCompletion) -> ApiContext {
    ApiContext::new(
        Box::new(llm),
        Box::new(MockRuleStore::with_rules(vec![rule("rds-1", Some("aws-rds"))], Vec::new())),
    )
}

fn builtin_context() -> ApiContext {
    ApiContext::new(
        Box::new(OfflineCompletion::new("offline")),
        Box::new(TomlRuleStore::builtin().unwrap()),
    )
}

#[test]
fn analyze_runs_analysis_then_verification() {
    let ctx = context(MockCompletion::with_replies([
        analysis_response(),
        verification_response(WEB_APP_FIXED),
    ]));
    let req = AnalysisRequest {
        diagram: WEB_APP.to_string(),
    };

    let data = api::analyze(&ctx, &req).unwrap();

    assert_eq!(data.analysis.overall_risk_score, 33);
    let verification = data.verification.unwrap();
    assert_eq!(verification.corrected, WEB_APP_FIXED);
    assert_eq!(verification.changes.len(), 2);
}

#[test]
fn analyze_and_verify_matches_analyze() {
    let ctx = context(MockCompletion::with_replies([
        analysis_response(),
        verification_response(WEB_APP),
    ]));
    let req = AnalysisRequest {
        diagram: WEB_APP.to_string(),
    };

    let data = api::analyze_and_verify(&ctx, &req).unwrap();
    assert!(data.verification.unwrap().changes.is_empty());
}

#[test]
fn analyze_only_skips_verification() {
    let ctx = context(MockCompletion::with_replies([analysis_response()]));
    let req = AnalysisRequest {
        diagram: WEB_APP.to_string(),
    };

    let data = api::analyze_only(&ctx, &req).unwrap();
    assert!(data.verification.is_none());

    let json = serde_json::to_value(ApiResponse::success(&data)).unwrap();
    assert_eq!(json["success"], true);
    assert!(json["data"].get("verification").is_none());
}

#[test]
fn analyze_maps_bad_diagram_to_bad_request() {
    let ctx = context(MockCompletion::new());
    let req = AnalysisRequest {
        diagram: "not a diagram".to_string(),
    };

    let err = api::analyze(&ctx, &req).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
    assert_eq!(err.status_code(), 400);
}

#[test]
fn analyze_maps_invalid_generated_diagram_to_bad_request() {
    let ctx = context(MockCompletion::with_replies([
        analysis_response(),
        verification_response("@startdiagram\naws-ec2 web -> aws-rds db"),
    ]));
    let req = AnalysisRequest {
        diagram: WEB_APP.to_string(),
    };

    let err = api::analyze(&ctx, &req).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
    assert!(err.message.contains("Generated diagram has invalid format"));
}

#[test]
fn analyze_maps_model_outage_to_internal() {
    let ctx = context(MockCompletion::failing("timeout"));
    let req = AnalysisRequest {
        diagram: WEB_APP.to_string(),
    };

    let err = api::analyze(&ctx, &req).unwrap_err();
    assert_eq!(err.code, ErrorCode::Internal);
    assert_eq!(err.status_code(), 500);
}

#[test]
fn verify_uses_supplied_risks() {
    let ctx = context(MockCompletion::with_replies([verification_response(WEB_APP_FIXED)]));
    let req: VerificationRequest = serde_json::from_value(serde_json::json!({
        "original_diagram": WEB_APP,
        "risks": [{
            "level": "high",
            "title": "No CDN",
            "description": "d",
            "recommendation": "Add CloudFront"
        }]
    }))
    .unwrap();

    let result = api::verify(&ctx, &req).unwrap();
    assert_eq!(result.changes.len(), 2);
}

#[test]
fn verify_accepts_uppercase_risk_levels() {
    let ctx = context(MockCompletion::with_replies([verification_response(WEB_APP_FIXED)]));
    let req: VerificationRequest = serde_json::from_value(serde_json::json!({
        "original_diagram": WEB_APP,
        "risks": [{
            "level": "HIGH",
            "title": "No CDN",
            "description": "d",
            "recommendation": "Add CloudFront"
        }]
    }))
    .unwrap();

    assert_eq!(req.risks[0].level, RiskLevel::High);
    assert!(prompt::format_risks(&req.risks).contains("[HIGH] No CDN"));
    assert!(api::verify(&ctx, &req).is_ok());
}

#[test]
fn health_reports_each_collaborator() {
    let ctx = context(MockCompletion::with_replies(["pong"]));
    let report = api::health(&ctx);

    assert_eq!(report.status, "healthy");
    assert_eq!(report.services["mock-llm"], "healthy");
    assert_eq!(report.services["mock-rules"], "healthy");
    assert_eq!(report.version, archsec::VERSION);
    assert!(api::ensure_healthy(&report).is_ok());
}

#[test]
fn health_degrades_when_model_is_down() {
    let ctx = context(MockCompletion::failing("no route"));
    let report = api::health(&ctx);

    assert_eq!(report.status, "degraded");
    assert_eq!(report.services["mock-llm"], "unhealthy: AI service unavailable: no route");

    let err = api::ensure_healthy(&report).unwrap_err();
    assert_eq!(err.code, ErrorCode::ServiceUnavailable);
    assert!(err.message.contains("mock-llm"));
}

#[test]
fn list_services_returns_catalog() {
    let data = api::list_services(&builtin_context());
    assert_eq!(data.services.len(), 18);
    assert_eq!(data.services[0].id, "aws-ec2");
}

#[test]
fn validate_summarises_valid_diagram() {
    let req = ValidateRequest {
        diagram: "@startdiagram\naws-ec2 web -> oracle-db db\n@enddiagram".to_string(),
    };
    let data = api::validate(&builtin_context(), &req);

    assert!(data.valid);
    assert!(data.reason.is_none());
    assert_eq!(data.connections, vec!["aws-ec2 web -> oracle-db db"]);
    assert!(data.unsupported_services.contains("oracle-db"));
    assert!(!data.unsupported_services.contains("aws-ec2"));
}

#[test]
fn validate_explains_invalid_diagram() {
    let req = ValidateRequest {
        diagram: "@startdiagram\naws-ec2 web -> aws-rds db\naws-s3 logs -> aws-rds db".to_string(),
    };
    let data = api::validate(&builtin_context(), &req);

    assert!(!data.valid);
    assert_eq!(
        data.reason.as_deref(),
        Some("Invalid diagram format: last line must start with @enddiagram")
    );
    assert!(data.services.is_empty());
}

#[test]
fn diff_requires_valid_diagrams() {
    let ok = api::diff(&DiffRequest {
        original: WEB_APP.to_string(),
        corrected: WEB_APP_FIXED.to_string(),
    })
    .unwrap();
    assert_eq!(ok.changes.len(), 2);

    let err = api::diff(&DiffRequest {
        original: "junk".to_string(),
        corrected: WEB_APP.to_string(),
    })
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
    assert!(err.message.starts_with("Invalid original diagram format"));
}

#[test]
fn rules_by_service_and_query() {
    let ctx = builtin_context().with_options(AnalysisOptions {
        temperature: 0.1,
        general_query_limit: 3,
    });

    let by_service = api::rules(
        &ctx,
        &RulesQuery {
            service: Some("aws-s3".to_string()),
            ..RulesQuery::default()
        },
    )
    .unwrap();
    assert!(!by_service.rules.is_empty());
    assert!(by_service.rules.iter().all(|r| r.service_id.as_deref() == Some("aws-s3")));

    let by_text = api::rules(
        &ctx,
        &RulesQuery {
            query: Some("encryption at rest".to_string()),
            ..RulesQuery::default()
        },
    )
    .unwrap();
    assert!(!by_text.rules.is_empty());
    assert!(by_text.rules.len() <= 3);
}

#[test]
fn rules_reject_bad_queries() {
    let ctx = builtin_context();

    let missing = api::rules(&ctx, &RulesQuery::default()).unwrap_err();
    assert_eq!(missing.code, ErrorCode::BadRequest);

    let unknown = api::rules(
        &ctx,
        &RulesQuery {
            service: Some("oracle-db".to_string()),
            ..RulesQuery::default()
        },
    )
    .unwrap_err();
    assert_eq!(unknown.code, ErrorCode::NotFound);
    assert_eq!(unknown.status_code(), 404);
}

#[test]
fn error_envelope_shape() {
    let json = serde_json::to_value(ApiResponse::error("BAD_REQUEST", "nope")).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert_eq!(json["error"]["message"], "nope");
    assert!(json.get("data").is_none());
}
