//! Prompt construction for the analysis and verification calls

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::core::models::{ComplianceRule, RiskItem, ServiceCatalog};
use crate::core::ports::ChatMessage;

/// Top-level keys the analysis response must carry
pub const ANALYSIS_KEYS: [&str; 3] = ["risks", "compliance_issues", "summary"];

/// Top-level keys the verification response must carry
pub const VERIFICATION_KEYS: [&str; 2] = ["corrected_diagram", "explanation"];

const ANALYST_SYSTEM: &str = "You are a cloud security expert with deep knowledge of AWS, Azure, \
                              and GCP security best practices.";

const ARCHITECT_SYSTEM: &str = "You are a cloud security architect with expertise in AWS, Azure, \
                                and GCP security best practices.";

/// Render the supported-service catalog, grouped by provider
#[must_use]
pub fn services_context(catalog: &ServiceCatalog) -> String {
    let mut out = String::from("SUPPORTED CLOUD SERVICES:\n\n");
    for (provider, services) in catalog.by_provider() {
        let _ = writeln!(out, "{provider} Services:");
        for s in services {
            let _ = writeln!(out, "- {} ({}): {}", s.name, s.id, s.category);
        }
        out.push('\n');
    }
    out
}

/// One bullet per rule, with service and severity hints
#[must_use]
pub fn format_rules(rules: &[ComplianceRule]) -> String {
    if rules.is_empty() {
        return "No specific compliance rules found.".to_string();
    }

    rules
        .iter()
        .map(|rule| {
            let mut line = format!("• {}: {}", rule.title, rule.description);
            if let Some(service) = rule.service_id.as_deref().filter(|s| !s.is_empty()) {
                let _ = write!(line, " (Service: {service})");
            }
            if !rule.severity.is_empty() {
                let _ = write!(line, " (Severity: {})", rule.severity);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One bullet per risk: level tag, title, description, affected service and fix
#[must_use]
pub fn format_risks(risks: &[RiskItem]) -> String {
    if risks.is_empty() {
        return "No specific risks identified.".to_string();
    }

    risks
        .iter()
        .map(|risk| {
            let mut line = format!("• [{}] {}: {}", risk.level.tag(), risk.title, risk.description);
            if let Some(service) = risk.service_affected.as_deref().filter(|s| !s.is_empty()) {
                let _ = write!(line, " (Affects: {service})");
            }
            if !risk.recommendation.is_empty() {
                let _ = write!(line, " (Fix: {})", risk.recommendation);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Messages asking the model to classify risks in `diagram`
#[must_use]
pub fn analysis_messages(
    catalog: &ServiceCatalog,
    rules: &[ComplianceRule],
    diagram: &str,
    services: &BTreeSet<String>,
) -> Vec<ChatMessage> {
    let detected = services.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
    let prompt = format!(
        r#"Review the cloud architecture diagram below for security risks and compliance gaps.

{catalog}
COMPLIANCE RULES AND BEST PRACTICES:
{rules}

ARCHITECTURE DIAGRAM:
{diagram}

SERVICES DETECTED: {detected}

Only consider the supported services listed above.

Respond with JSON in exactly this shape:
{{
    "risks": [
        {{
            "id": "unique_id",
            "level": "critical|high|medium|low",
            "title": "Risk title",
            "description": "What is wrong and why it matters",
            "service_affected": "service_id or null",
            "recommendation": "Concrete fix",
            "compliance_rule": "Related compliance rule or null"
        }}
    ],
    "compliance_issues": [
        {{
            "id": "unique_id",
            "rule": "Compliance rule name",
            "description": "How the architecture violates it",
            "severity": "critical|high|medium|low",
            "affected_services": ["service_id"]
        }}
    ],
    "summary": "Overall security posture and main concerns"
}}

Cover network segmentation, encryption at rest and in transit, identity and
access control, logging and monitoring, backup and disaster recovery,
service-specific configuration and data-flow security. Name the affected
services and give actionable recommendations."#,
        catalog = services_context(catalog),
        rules = format_rules(rules),
    );

    vec![ChatMessage::system(ANALYST_SYSTEM), ChatMessage::user(prompt)]
}

/// Messages asking the model for a corrected diagram addressing `risks`
#[must_use]
pub fn verification_messages(
    catalog: &ServiceCatalog,
    diagram: &str,
    risks: &[RiskItem],
) -> Vec<ChatMessage> {
    let prompt = format!(
        r#"Produce a hardened version of the architecture diagram below that fixes the listed security risks.

{catalog}
ORIGINAL ARCHITECTURE DIAGRAM:
{diagram}

SECURITY RISKS IDENTIFIED:
{risks}

Constraints:
1. Use ONLY the supported service ids listed above as service types.
2. Keep the exact line format of the input: one connection per line,
   `<service_type> <id> <connector> <service_type> <id>`, connector one of
   ->, -->, ..>, framed by @startdiagram and @enddiagram.
3. You may add or remove services and connections.
4. Address every critical and high risk, apply defense in depth and keep the
   original functionality where possible.

Respond with JSON in exactly this shape:
{{
    "corrected_diagram": "@startdiagram\n...\n@enddiagram",
    "explanation": "What changed and how it improves security"
}}"#,
        catalog = services_context(catalog),
        risks = format_risks(risks),
    );

    vec![ChatMessage::system(ARCHITECT_SYSTEM), ChatMessage::user(prompt)]
}
