//! Tests for the risk analysis orchestrator

use archsec::core::error::{DiagramError, OrchestrationError, ResponseError, StepError};
use archsec::core::models::{RiskLevel, ServiceCatalog};
use archsec::core::ports::Role;
use archsec::core::services::{AnalysisOptions, RiskAnalyzer, RiskScorer};

use crate::common::mocks::{MockCompletion, MockRuleStore, rule};
use crate::common::{WEB_APP, analysis_response};

fn rule_store() -> MockRuleStore {
    MockRuleStore::with_rules(
        vec![rule("rds-1", Some("aws-rds")), rule("s3-1", Some("aws-s3"))],
        vec![rule("rds-1", Some("aws-rds")), rule("general-1", None)],
    )
}

#[test]
fn analysis_converts_and_scores_response() {
    let llm = MockCompletion::with_replies([analysis_response()]);
    let rules = rule_store();
    let catalog = ServiceCatalog::builtin();
    let analyzer = RiskAnalyzer::new(&llm, &rules, &catalog, RiskScorer::default());

    let analysis = analyzer.analyze(WEB_APP).unwrap();

    assert_eq!(analysis.risks.len(), 2);
    assert_eq!(analysis.risks[0].id, "risk-1");
    assert_eq!(analysis.risks[0].level, RiskLevel::Critical);
    assert_eq!(analysis.risks[0].service_affected.as_deref(), Some("aws-rds"));
    assert!(!analysis.risks[1].id.is_empty());
    assert_eq!(analysis.compliance_issues[0].affected_services, vec!["aws-s3"]);
    assert_eq!(analysis.summary, "Two risks found");
    // critical 25 + medium 8
    assert_eq!(analysis.overall_risk_score, 33);
}

#[test]
fn analysis_prompt_carries_rules_and_services() {
    let llm = MockCompletion::with_replies([analysis_response()]);
    let rules = rule_store();
    let catalog = ServiceCatalog::builtin();
    RiskAnalyzer::new(&llm, &rules, &catalog, RiskScorer::default()).analyze(WEB_APP).unwrap();

    assert_eq!(llm.call_count(), 1);
    let (messages, temperature) = llm.call(0);
    assert!((temperature - 0.1).abs() < f32::EPSILON);
    assert_eq!(messages[0].role, Role::System);
    let prompt = &messages[1].content;
    assert!(prompt.contains("SERVICES DETECTED: aws-ec2, aws-rds, aws-s3"));
    assert!(prompt.contains("SUPPORTED CLOUD SERVICES:"));
    assert!(prompt.contains(WEB_APP));
    // rds-1 is returned by both queries but listed once
    assert_eq!(prompt.matches("• Rule rds-1:").count(), 1);
    assert!(prompt.contains("• Rule s3-1:"));
    assert!(prompt.contains("• Rule general-1:"));
}

#[test]
fn analysis_general_query_uses_configured_limit() {
    let llm = MockCompletion::with_replies([analysis_response()]);
    let rules = rule_store();
    let catalog = ServiceCatalog::builtin();
    let options = AnalysisOptions {
        temperature: 0.3,
        general_query_limit: 4,
    };
    RiskAnalyzer::new(&llm, &rules, &catalog, RiskScorer::default())
        .with_options(options)
        .analyze(WEB_APP)
        .unwrap();

    let queries = rules.queries();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].0.starts_with("architecture security best practices @startdiagram"));
    assert_eq!(queries[0].1, 4);
    assert!((llm.call(0).1 - 0.3).abs() < f32::EPSILON);
}

#[test]
fn analysis_rejects_malformed_diagram_before_calling_model() {
    let llm = MockCompletion::new();
    let rules = MockRuleStore::new();
    let catalog = ServiceCatalog::builtin();

    let err = RiskAnalyzer::new(&llm, &rules, &catalog, RiskScorer::default())
        .analyze("aws-ec2 web -> aws-rds db")
        .unwrap_err();

    assert!(err.is_client_fault());
    assert!(matches!(err.step(), StepError::Diagram(DiagramError::Input(_))));
    assert!(err.to_string().starts_with("Risk analysis failed: Invalid diagram format"));
    assert_eq!(llm.call_count(), 0);
}

#[test]
fn analysis_accepts_fenced_json() {
    let reply = format!("Here you go:\n```json\n{}\n```", analysis_response());
    let llm = MockCompletion::with_replies([reply]);
    let rules = MockRuleStore::new();
    let catalog = ServiceCatalog::builtin();

    let analysis = RiskAnalyzer::new(&llm, &rules, &catalog, RiskScorer::default())
        .analyze(WEB_APP)
        .unwrap();
    assert_eq!(analysis.risks.len(), 2);
}

#[test]
fn analysis_reports_prose_reply_as_format_error() {
    let llm = MockCompletion::with_replies(["I cannot help with that."]);
    let rules = MockRuleStore::new();
    let catalog = ServiceCatalog::builtin();

    let err = RiskAnalyzer::new(&llm, &rules, &catalog, RiskScorer::default())
        .analyze(WEB_APP)
        .unwrap_err();

    assert!(!err.is_client_fault());
    assert!(matches!(
        err.step(),
        StepError::Response(ResponseError::InvalidFormat(_))
    ));
}

#[test]
fn analysis_reports_missing_key_as_structure_error() {
    let llm = MockCompletion::with_replies([r#"{"risks": [], "summary": "ok"}"#]);
    let rules = MockRuleStore::new();
    let catalog = ServiceCatalog::builtin();

    let err = RiskAnalyzer::new(&llm, &rules, &catalog, RiskScorer::default())
        .analyze(WEB_APP)
        .unwrap_err();

    match err {
        OrchestrationError::Analysis(StepError::Response(ResponseError::InvalidStructure(msg))) => {
            assert!(msg.contains("compliance_issues"));
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn analysis_propagates_unavailable_model() {
    let llm = MockCompletion::failing("connection refused");
    let rules = MockRuleStore::new();
    let catalog = ServiceCatalog::builtin();

    let err = RiskAnalyzer::new(&llm, &rules, &catalog, RiskScorer::default())
        .analyze(WEB_APP)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Risk analysis failed: AI service unavailable: connection refused"
    );
}

#[test]
fn analysis_scores_unknown_severity_as_zero() {
    let reply = serde_json::json!({
        "risks": [
            {"level": "severe", "title": "t", "description": "d", "recommendation": "r"},
            {"level": "HIGH", "title": "t", "description": "d", "recommendation": "r"}
        ],
        "compliance_issues": [],
        "summary": "s"
    })
    .to_string();
    let llm = MockCompletion::with_replies([reply]);
    let rules = MockRuleStore::new();
    let catalog = ServiceCatalog::builtin();

    let analysis = RiskAnalyzer::new(&llm, &rules, &catalog, RiskScorer::default())
        .analyze(WEB_APP)
        .unwrap();

    assert_eq!(analysis.risks[0].level, RiskLevel::Unknown);
    assert_eq!(analysis.overall_risk_score, 15);
}
