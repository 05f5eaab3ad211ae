//! Retention policies and legal hold enforcement.

use chrono::Duration;

use docvault_core::{AppError, Clock};
use docvault_entity::access::Classification;
use docvault_service::document::UpdateMetadataRequest;
use docvault_service::retention::CreatePolicyRequest;

use crate::helpers::{TestApp, content};

#[tokio::test]
async fn only_admins_create_policies() {
    let app = TestApp::new();
    let req = CreatePolicyRequest {
        name: "Seven years".to_string(),
        retention_days: 7 * 365,
        description: None,
    };

    let err = app.retention.create_policy(&app.manager(), req.clone()).await;
    assert!(matches!(err, Err(AppError::AccessDenied(_))));

    let policy = app.retention.create_policy(&app.admin(), req).await.unwrap();
    assert_eq!(policy.retention_days, 7 * 365);
}

#[tokio::test]
async fn applying_a_policy_fixes_the_expiry_once() {
    let app = TestApp::new();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&admin, &folder, &doc_type, "kept.pdf", Classification::Internal)
        .await;
    let policy = app
        .retention
        .create_policy(
            &admin,
            CreatePolicyRequest {
                name: "90 days".to_string(),
                retention_days: 90,
                description: None,
            },
        )
        .await
        .unwrap();

    let applied_at = app.clock.now();
    let doc = app
        .retention
        .apply_policy(&admin, doc.id, policy.id, None)
        .await
        .unwrap();
    assert_eq!(doc.retention_policy_id, Some(policy.id));
    assert_eq!(doc.retention_expires_at, Some(applied_at + Duration::days(90)));
}

#[tokio::test]
async fn a_reference_date_shifts_the_expiry() {
    let app = TestApp::new();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&admin, &folder, &doc_type, "kept.pdf", Classification::Internal)
        .await;
    let policy = app
        .retention
        .create_policy(
            &admin,
            CreatePolicyRequest {
                name: "30 days".to_string(),
                retention_days: 30,
                description: None,
            },
        )
        .await
        .unwrap();

    let reference = app.clock.now() - Duration::days(10);
    let doc = app
        .retention
        .apply_policy(&admin, doc.id, policy.id, Some(reference))
        .await
        .unwrap();
    assert_eq!(doc.retention_expires_at, Some(reference + Duration::days(30)));
}

#[tokio::test]
async fn retained_documents_resist_deletion_until_expiry() {
    let app = TestApp::new();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&admin, &folder, &doc_type, "kept.pdf", Classification::Internal)
        .await;
    let policy = app
        .retention
        .create_policy(
            &admin,
            CreatePolicyRequest {
                name: "30 days".to_string(),
                retention_days: 30,
                description: None,
            },
        )
        .await
        .unwrap();
    app.retention
        .apply_policy(&admin, doc.id, policy.id, None)
        .await
        .unwrap();

    let err = app.documents.delete(&admin, doc.id, false).await;
    assert!(matches!(err, Err(AppError::RetentionActive { .. })));

    // Past expiry the document is free again.
    app.clock.advance(Duration::days(31));
    app.documents.delete(&admin, doc.id, false).await.unwrap();
}

#[tokio::test]
async fn the_override_bypasses_retention_but_never_a_hold() {
    let app = TestApp::new();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let retained = app
        .create_document(&admin, &folder, &doc_type, "retained.pdf", Classification::Internal)
        .await;
    let held = app
        .create_document(&admin, &folder, &doc_type, "held.pdf", Classification::Internal)
        .await;
    let policy = app
        .retention
        .create_policy(
            &admin,
            CreatePolicyRequest {
                name: "30 days".to_string(),
                retention_days: 30,
                description: None,
            },
        )
        .await
        .unwrap();
    app.retention
        .apply_policy(&admin, retained.id, policy.id, None)
        .await
        .unwrap();
    app.retention
        .apply_policy(&admin, held.id, policy.id, None)
        .await
        .unwrap();
    app.retention.set_legal_hold(&admin, held.id, true).await.unwrap();

    app.documents.delete(&admin, retained.id, true).await.unwrap();

    let err = app.documents.delete(&admin, held.id, true).await;
    assert!(matches!(err, Err(AppError::LegalHoldActive)));
}

#[tokio::test]
async fn legal_hold_blocks_content_mutation_but_not_reads_or_metadata() {
    let app = TestApp::new();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&admin, &folder, &doc_type, "held.pdf", Classification::Internal)
        .await;
    app.retention.set_legal_hold(&admin, doc.id, true).await.unwrap();

    assert!(matches!(
        app.checkout.checkout(&admin, doc.id).await,
        Err(AppError::LegalHoldActive)
    ));
    assert!(matches!(
        app.documents.delete(&admin, doc.id, false).await,
        Err(AppError::LegalHoldActive)
    ));

    // Reads and metadata-only edits stay open.
    assert!(app.documents.get(&admin, doc.id).await.is_ok());
    let renamed = app
        .documents
        .update_metadata(
            &admin,
            doc.id,
            UpdateMetadataRequest {
                name: Some("held-renamed.pdf".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "held-renamed.pdf");
}

#[tokio::test]
async fn a_hold_placed_mid_checkout_blocks_the_content_checkin() {
    let app = TestApp::new();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&admin, &folder, &doc_type, "held.pdf", Classification::Internal)
        .await;

    app.checkout.checkout(&admin, doc.id).await.unwrap();
    app.retention.set_legal_hold(&admin, doc.id, true).await.unwrap();

    let err = app
        .checkout
        .checkin(&admin, doc.id, Some(content("v2")), None)
        .await;
    assert!(matches!(err, Err(AppError::LegalHoldActive)));

    // Releasing the lock without content is still possible.
    let doc = app.checkout.checkin(&admin, doc.id, None, None).await.unwrap();
    assert!(!doc.is_checked_out);
    assert_eq!(doc.version, 1);
}

#[tokio::test]
async fn holds_and_policies_stop_at_the_company_boundary() {
    let app = TestApp::new();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&admin, &folder, &doc_type, "ours.pdf", Classification::Internal)
        .await;

    let foreign_admin = docvault_service::context::RequestContext::new(
        uuid::Uuid::new_v4(),
        uuid::Uuid::new_v4(),
        vec![],
        docvault_entity::principal::PrincipalRole::Admin,
    );

    assert!(matches!(
        app.retention.set_legal_hold(&foreign_admin, doc.id, true).await,
        Err(AppError::NotFound(_))
    ));

    // A policy from another company cannot attach to our document either.
    let foreign_policy = app
        .retention
        .create_policy(
            &foreign_admin,
            CreatePolicyRequest {
                name: "Theirs".to_string(),
                retention_days: 30,
                description: None,
            },
        )
        .await
        .unwrap();
    assert!(matches!(
        app.retention
            .apply_policy(&foreign_admin, doc.id, foreign_policy.id, None)
            .await,
        Err(AppError::NotFound(_))
    ));

    // Nothing stuck to the document.
    let doc = app.documents.get(&admin, doc.id).await.unwrap();
    assert!(!doc.legal_hold);
    assert_eq!(doc.retention_policy_id, None);
}

#[tokio::test]
async fn releasing_a_hold_restores_mutation() {
    let app = TestApp::new();
    let admin = app.admin();
    let manager = app.manager();
    let member = app.member();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&admin, &folder, &doc_type, "held.pdf", Classification::Internal)
        .await;

    // Members cannot manage holds; managers can.
    assert!(matches!(
        app.retention.set_legal_hold(&member, doc.id, true).await,
        Err(AppError::AccessDenied(_))
    ));
    app.retention.set_legal_hold(&manager, doc.id, true).await.unwrap();
    app.retention.set_legal_hold(&manager, doc.id, false).await.unwrap();

    assert!(app.checkout.checkout(&admin, doc.id).await.is_ok());
}
