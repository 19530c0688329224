//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use chrono::{NaiveDate, Utc};
use schemars::schema_for;
use site_core::entities::*;
use site_core::enums::*;
use site_core::identity::Identity;
use site_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_issue(image_url: Option<&str>) -> Issue {
    Issue {
        id: "iss-a3f8b2c1d4e5f607".into(),
        description: "Crane malfunction".into(),
        status: IssueStatus::Pending,
        logger_name: "Shaheer Syed".into(),
        timestamp: Utc::now(),
        image_url: image_url.map(String::from),
    }
}

roundtrip_and_validate!(issue_without_photo_roundtrip, Issue, sample_issue(None));

roundtrip_and_validate!(
    issue_with_photo_roundtrip,
    Issue,
    sample_issue(Some("file:///srv/photos/issue-photos/1767225600000-crane.jpg"))
);

roundtrip_and_validate!(
    draft_roundtrip,
    IssueDraft,
    IssueDraft::new("Material delay", IssueStatus::InProgress, "Shaheer Syed")
);

roundtrip_and_validate!(
    identity_roundtrip,
    Identity,
    Identity {
        user_id: "k3Jd92LqP0".into(),
        email: "foreman@duplex.test".into(),
    }
);

roundtrip_and_validate!(
    create_response_roundtrip,
    IssueCreateResponse,
    IssueCreateResponse {
        issue: sample_issue(None),
    }
);

roundtrip_and_validate!(
    delete_response_roundtrip,
    IssueDeleteResponse,
    IssueDeleteResponse {
        id: "iss-a3f8b2c1d4e5f607".into(),
        deleted: true,
    }
);

roundtrip_and_validate!(
    dashboard_response_roundtrip,
    DashboardResponse,
    DashboardResponse {
        welcome: "Welcome, foreman@duplex.test".into(),
        today: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        summary: DashboardSummary {
            total: 3,
            pending: 1,
            in_progress: 1,
            resolved: 1,
            resolved_today: 0,
        },
        issues: vec![sample_issue(None), sample_issue(Some("https://cdn.test/p.jpg"))],
    }
);

#[test]
fn summary_active_counts_open_work() {
    let summary = DashboardSummary {
        total: 5,
        pending: 2,
        in_progress: 1,
        resolved: 2,
        resolved_today: 1,
    };
    assert_eq!(summary.active(), 3);
}
