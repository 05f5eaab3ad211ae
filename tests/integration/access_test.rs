//! Classification defaults, explicit grants, and role bypasses.

use docvault_core::AppError;
use docvault_core::types::pagination::PageRequest;
use docvault_entity::access::{Classification, GrantLevel, GrantPrincipal};
use docvault_service::access::GrantRequest;
use docvault_service::document::UpdateMetadataRequest;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn public_and_internal_default_to_view_for_members() {
    let app = TestApp::new();
    let owner = app.member();
    let other = app.member();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;

    let public = app
        .create_document(&owner, &folder, &doc_type, "pub.pdf", Classification::Public)
        .await;
    let internal = app
        .create_document(&owner, &folder, &doc_type, "int.pdf", Classification::Internal)
        .await;

    assert!(app.documents.get(&other, public.id).await.is_ok());
    assert!(app.documents.get(&other, internal.id).await.is_ok());

    // View does not extend to mutation.
    let err = app
        .documents
        .update_metadata(
            &other,
            internal.id,
            UpdateMetadataRequest {
                name: Some("renamed.pdf".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(err, Err(AppError::AccessDenied(_))));
}

#[tokio::test]
async fn confidential_documents_require_an_explicit_grant() {
    let app = TestApp::new();
    let owner = app.member();
    let other = app.member();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&owner, &folder, &doc_type, "sec.pdf", Classification::Confidential)
        .await;

    let err = app.documents.get(&other, doc.id).await;
    assert!(matches!(err, Err(AppError::AccessDenied(_))));

    app.grants
        .grant(
            &owner,
            doc.id,
            GrantRequest {
                principal: GrantPrincipal::User(other.user_id),
                level: GrantLevel::View,
            },
        )
        .await
        .unwrap();

    assert!(app.documents.get(&other, doc.id).await.is_ok());
    // A view grant still does not allow checkout.
    assert!(matches!(
        app.checkout.checkout(&other, doc.id).await,
        Err(AppError::AccessDenied(_))
    ));
}

#[tokio::test]
async fn owner_keeps_edit_on_restricted_documents() {
    let app = TestApp::new();
    let owner = app.member();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&owner, &folder, &doc_type, "mine.pdf", Classification::Restricted)
        .await;

    assert!(app.checkout.checkout(&owner, doc.id).await.is_ok());
}

#[tokio::test]
async fn a_user_grant_beats_department_grants() {
    let app = TestApp::new();
    let admin = app.admin();
    let owner = app.member();
    let dept = Uuid::new_v4();
    let user = app.member_of(vec![dept]);
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&owner, &folder, &doc_type, "sec.pdf", Classification::Confidential)
        .await;

    app.grants
        .grant(
            &owner,
            doc.id,
            GrantRequest {
                principal: GrantPrincipal::Department(dept),
                level: GrantLevel::Edit,
            },
        )
        .await
        .unwrap();
    app.grants
        .grant(
            &owner,
            doc.id,
            GrantRequest {
                principal: GrantPrincipal::User(user.user_id),
                level: GrantLevel::View,
            },
        )
        .await
        .unwrap();

    // The per-user grant decides outright, even though a broader
    // department grant exists.
    let err = app.checkout.checkout(&user, doc.id).await;
    assert!(matches!(err, Err(AppError::AccessDenied(_))));
}

#[tokio::test]
async fn department_grants_take_the_most_permissive_level() {
    let app = TestApp::new();
    let admin = app.admin();
    let owner = app.member();
    let viewers = Uuid::new_v4();
    let editors = Uuid::new_v4();
    let user = app.member_of(vec![viewers, editors]);
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&owner, &folder, &doc_type, "sec.pdf", Classification::Confidential)
        .await;

    app.grants
        .grant(
            &owner,
            doc.id,
            GrantRequest {
                principal: GrantPrincipal::Department(viewers),
                level: GrantLevel::View,
            },
        )
        .await
        .unwrap();
    app.grants
        .grant(
            &owner,
            doc.id,
            GrantRequest {
                principal: GrantPrincipal::Department(editors),
                level: GrantLevel::Edit,
            },
        )
        .await
        .unwrap();

    assert!(app.checkout.checkout(&user, doc.id).await.is_ok());
}

#[tokio::test]
async fn managers_see_past_classification_but_cannot_edit() {
    let app = TestApp::new();
    let admin = app.admin();
    let owner = app.member();
    let manager = app.manager();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&owner, &folder, &doc_type, "sec.pdf", Classification::Restricted)
        .await;

    assert!(app.documents.get(&manager, doc.id).await.is_ok());
    assert!(matches!(
        app.checkout.checkout(&manager, doc.id).await,
        Err(AppError::AccessDenied(_))
    ));
}

#[tokio::test]
async fn admins_have_full_access_everywhere() {
    let app = TestApp::new();
    let admin = app.admin();
    let another_admin = app.admin();
    let owner = app.member();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&owner, &folder, &doc_type, "sec.pdf", Classification::Restricted)
        .await;

    assert!(app.documents.get(&another_admin, doc.id).await.is_ok());
    assert!(app.checkout.checkout(&another_admin, doc.id).await.is_ok());
}

#[tokio::test]
async fn regranting_a_principal_replaces_the_old_grant() {
    let app = TestApp::new();
    let admin = app.admin();
    let owner = app.member();
    let user = app.member();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&owner, &folder, &doc_type, "sec.pdf", Classification::Confidential)
        .await;

    app.grants
        .grant(
            &owner,
            doc.id,
            GrantRequest {
                principal: GrantPrincipal::User(user.user_id),
                level: GrantLevel::View,
            },
        )
        .await
        .unwrap();
    app.grants
        .grant(
            &owner,
            doc.id,
            GrantRequest {
                principal: GrantPrincipal::User(user.user_id),
                level: GrantLevel::Edit,
            },
        )
        .await
        .unwrap();

    let grants = app.grants.list(&owner, doc.id).await.unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].level, GrantLevel::Edit);
    assert!(app.checkout.checkout(&user, doc.id).await.is_ok());
}

#[tokio::test]
async fn revoking_a_grant_removes_the_access() {
    let app = TestApp::new();
    let admin = app.admin();
    let owner = app.member();
    let user = app.member();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&owner, &folder, &doc_type, "sec.pdf", Classification::Confidential)
        .await;

    let grant = app
        .grants
        .grant(
            &owner,
            doc.id,
            GrantRequest {
                principal: GrantPrincipal::User(user.user_id),
                level: GrantLevel::View,
            },
        )
        .await
        .unwrap();
    assert!(app.documents.get(&user, doc.id).await.is_ok());

    app.grants.revoke(&owner, grant.id).await.unwrap();
    assert!(matches!(
        app.documents.get(&user, doc.id).await,
        Err(AppError::AccessDenied(_))
    ));
}

#[tokio::test]
async fn grants_stop_at_the_company_boundary() {
    let app = TestApp::new();
    let admin = app.admin();
    let owner = app.member();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&owner, &folder, &doc_type, "sec.pdf", Classification::Restricted)
        .await;

    // Admin role in another company conveys nothing here.
    let foreign_admin = docvault_service::context::RequestContext::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        vec![],
        docvault_entity::principal::PrincipalRole::Admin,
    );

    assert!(matches!(
        app.grants
            .grant(
                &foreign_admin,
                doc.id,
                GrantRequest {
                    principal: GrantPrincipal::User(foreign_admin.user_id),
                    level: GrantLevel::Edit,
                },
            )
            .await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        app.grants.list(&foreign_admin, doc.id).await,
        Err(AppError::NotFound(_))
    ));

    let own_grant = app
        .grants
        .grant(
            &owner,
            doc.id,
            GrantRequest {
                principal: GrantPrincipal::User(Uuid::new_v4()),
                level: GrantLevel::View,
            },
        )
        .await
        .unwrap();
    assert!(matches!(
        app.grants.revoke(&foreign_admin, own_grant.id).await,
        Err(AppError::NotFound(_))
    ));

    let grants = app.grants.list(&owner, doc.id).await.unwrap();
    assert_eq!(grants.len(), 1);
}

#[tokio::test]
async fn listings_hide_documents_the_caller_cannot_view() {
    let app = TestApp::new();
    let admin = app.admin();
    let owner = app.member();
    let other = app.member();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    app.create_document(&owner, &folder, &doc_type, "memo.pdf", Classification::Internal)
        .await;
    let secret = app
        .create_document(&owner, &folder, &doc_type, "secret.pdf", Classification::Restricted)
        .await;

    let page = app
        .documents
        .list_by_folder(&other, folder.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "memo.pdf");

    // A grant brings the document back into the listing.
    app.grants
        .grant(
            &owner,
            secret.id,
            GrantRequest {
                principal: GrantPrincipal::User(other.user_id),
                level: GrantLevel::View,
            },
        )
        .await
        .unwrap();
    let page = app
        .documents
        .list_by_folder(&other, folder.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 2);
}

#[tokio::test]
async fn granting_requires_edit_access() {
    let app = TestApp::new();
    let admin = app.admin();
    let owner = app.member();
    let outsider = app.member();
    let doc_type = app.create_type("DOC", false).await;
    let folder = app.create_folder(&admin, "docs").await;
    let doc = app
        .create_document(&owner, &folder, &doc_type, "sec.pdf", Classification::Internal)
        .await;

    let err = app
        .grants
        .grant(
            &outsider,
            doc.id,
            GrantRequest {
                principal: GrantPrincipal::User(outsider.user_id),
                level: GrantLevel::Edit,
            },
        )
        .await;
    assert!(matches!(err, Err(AppError::AccessDenied(_))));
}
