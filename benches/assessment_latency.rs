use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

use claimroute::domain::{
    AssetDetails, ClaimRecord, IncidentDetails, MandatoryData, PolicyDetails,
};
use claimroute::intake::{FieldExtractor, JsonFieldExtractor};
use claimroute::rules::{
    audit_missing, AuditedClaim, ClaimText, KeywordRule, RoutingRule, RuleSet,
};

fn create_test_claim(description: &str, claim_type: &str, damage: i64) -> ClaimRecord {
    ClaimRecord {
        policy: PolicyDetails {
            policy_number: Some("POL-2025-0042".to_string()),
            policy_holder_name: Some("Avery Quinn".to_string()),
            ..Default::default()
        },
        incident: IncidentDetails {
            date: Some("2025-04-18".to_string()),
            location: Some("I-90 westbound, exit 12".to_string()),
            description: Some(description.to_string()),
            ..Default::default()
        },
        asset: AssetDetails {
            asset_type: Some("Vehicle".to_string()),
            estimated_damage: Some(Decimal::new(damage, 0)),
            ..Default::default()
        },
        mandatory: MandatoryData {
            claim_type: Some(claim_type.to_string()),
            has_attachments: true,
            has_initial_estimate: true,
        },
        ..Default::default()
    }
}

fn bench_fraud_rule(c: &mut Criterion) {
    let keywords: Vec<String> = ["fraud", "staged", "inconsistent"]
        .iter()
        .map(|k| k.to_string())
        .collect();
    let rule = KeywordRule::fraud("R1_FRAUD_KEYWORDS".to_string(), &keywords);

    let claim = create_test_claim(
        "Vehicle was struck from behind while waiting at a red light on the exit ramp",
        "Auto Collision",
        12000,
    );
    let missing = audit_missing(&claim);
    let audited = AuditedClaim::new(&claim, &missing);

    c.bench_function("fraud_rule_evaluate_miss", |b| {
        b.iter(|| rule.evaluate(black_box(&audited)))
    });
}

fn bench_injury_rule(c: &mut Criterion) {
    let keywords = vec!["injury".to_string()];
    let rule = KeywordRule::new(
        "R2_INJURY_CLAIM".to_string(),
        ClaimText::ClaimType,
        &keywords,
        claimroute::domain::Route::SpecialistQueue,
        "Claim involves injury.",
    );

    let claim = create_test_claim("Rear-ended", "Bodily Injury", 12000);
    let missing = audit_missing(&claim);
    let audited = AuditedClaim::new(&claim, &missing);

    c.bench_function("injury_rule_evaluate_hit", |b| {
        b.iter(|| rule.evaluate(black_box(&audited)))
    });
}

fn bench_audit(c: &mut Criterion) {
    let complete = create_test_claim("Hail damage", "Property", 5000);
    let empty = ClaimRecord::default();

    c.bench_function("audit_missing_complete", |b| {
        b.iter(|| audit_missing(black_box(&complete)))
    });

    c.bench_function("audit_missing_empty", |b| {
        b.iter(|| audit_missing(black_box(&empty)))
    });
}

fn bench_full_cascade(c: &mut Criterion) {
    let ruleset = RuleSet::standard();

    let fast_track = create_test_claim("Cracked windshield from road debris", "Auto Glass", 900);
    let fall_through = create_test_claim("Kitchen fire damaged cabinets", "Property", 48000);

    c.bench_function("cascade_fast_track", |b| {
        b.iter(|| ruleset.evaluate(black_box(&fast_track)))
    });

    c.bench_function("cascade_default_leaf", |b| {
        b.iter(|| ruleset.evaluate(black_box(&fall_through)))
    });
}

fn bench_extract_and_assess(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let ruleset = RuleSet::standard();

    let raw = r#"```json
{
  "policyDetails": {"policyNumber": "POL-2025-0042", "policyHolderName": "Avery Quinn"},
  "incidentDetails": {"date": "2025-04-18", "description": "Rear-ended at a red light"},
  "involvedParties": {"claimantName": "Avery Quinn", "thirdPartyName": "J. Doe"},
  "assetDetails": {"assetType": "Vehicle", "estimatedDamage": "$12,500.00"},
  "mandatoryData": {"claimType": "Auto Collision", "hasAttachments": true}
}
```"#;

    c.bench_function("extract_and_assess", |b| {
        b.to_async(&rt).iter(|| async {
            let claim = JsonFieldExtractor
                .extract_fields(black_box(raw))
                .await
                .unwrap_or_default();
            ruleset.assess(&claim)
        })
    });
}

criterion_group!(
    benches,
    bench_fraud_rule,
    bench_injury_rule,
    bench_audit,
    bench_full_cascade,
    bench_extract_and_assess,
);

criterion_main!(benches);
