//! Folder hierarchy: paths, uniqueness, deletion, tree assembly.

use docvault_core::AppError;
use docvault_entity::access::Classification;
use docvault_service::folder::CreateFolderRequest;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn paths_and_depths_follow_the_hierarchy() {
    let app = TestApp::new();
    let admin = app.admin();

    let root = app.create_folder(&admin, "engineering").await;
    assert_eq!(root.path, "/engineering");
    assert_eq!(root.depth, 0);

    let child = app.create_subfolder(&admin, &root, "designs").await;
    assert_eq!(child.path, "/engineering/designs");
    assert_eq!(child.depth, 1);
    assert_eq!(child.parent_id, Some(root.id));
}

#[tokio::test]
async fn duplicate_paths_are_rejected() {
    let app = TestApp::new();
    let admin = app.admin();
    app.create_folder(&admin, "reports").await;

    let err = app
        .folders
        .create(
            &admin,
            CreateFolderRequest {
                name: "reports".to_string(),
                parent_id: None,
            },
        )
        .await;
    assert!(matches!(err, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn sibling_names_may_repeat_under_different_parents() {
    let app = TestApp::new();
    let admin = app.admin();
    let a = app.create_folder(&admin, "2024").await;
    let b = app.create_folder(&admin, "2025").await;

    let under_a = app.create_subfolder(&admin, &a, "reports").await;
    let under_b = app.create_subfolder(&admin, &b, "reports").await;
    assert_ne!(under_a.path, under_b.path);
}

#[tokio::test]
async fn missing_parent_is_reported() {
    let app = TestApp::new();
    let orphan_parent = Uuid::new_v4();

    let err = app
        .folders
        .create(
            &app.admin(),
            CreateFolderRequest {
                name: "lost".to_string(),
                parent_id: Some(orphan_parent),
            },
        )
        .await;
    assert!(matches!(err, Err(AppError::ParentNotFound(id)) if id == orphan_parent));
}

#[tokio::test]
async fn names_containing_separators_are_rejected() {
    let app = TestApp::new();
    let err = app
        .folders
        .create(
            &app.admin(),
            CreateFolderRequest {
                name: "a/b".to_string(),
                parent_id: None,
            },
        )
        .await;
    assert!(matches!(err, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn non_empty_folder_is_not_deleted_without_cascade() {
    let app = TestApp::new();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let root = app.create_folder(&admin, "root").await;
    app.create_subfolder(&admin, &root, "child").await;
    app.create_document(&admin, &root, &doc_type, "keep.pdf", Classification::Internal)
        .await;

    let err = app.folders.delete(&admin, root.id, false, false).await;
    assert!(matches!(
        err,
        Err(AppError::FolderNotEmpty {
            child_folders: 1,
            documents: 1,
        })
    ));

    // The folder is still there.
    assert!(app.folders.get(&admin, root.id).await.is_ok());
}

#[tokio::test]
async fn cascade_removes_the_whole_subtree() {
    let app = TestApp::new();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let root = app.create_folder(&admin, "root").await;
    let child = app.create_subfolder(&admin, &root, "child").await;
    let grandchild = app.create_subfolder(&admin, &child, "grandchild").await;
    let doc = app
        .create_document(&admin, &grandchild, &doc_type, "deep.pdf", Classification::Internal)
        .await;

    app.folders.delete(&admin, root.id, true, false).await.unwrap();

    assert!(matches!(
        app.folders.get(&admin, root.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        app.folders.get(&admin, grandchild.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        app.documents.get(&admin, doc.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn cascade_aborts_atomically_on_a_held_document() {
    let app = TestApp::new();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let root = app.create_folder(&admin, "root").await;
    let child = app.create_subfolder(&admin, &root, "child").await;
    let loose = app
        .create_document(&admin, &root, &doc_type, "loose.pdf", Classification::Internal)
        .await;
    let held = app
        .create_document(&admin, &child, &doc_type, "held.pdf", Classification::Internal)
        .await;
    app.retention.set_legal_hold(&admin, held.id, true).await.unwrap();

    let err = app.folders.delete(&admin, root.id, true, true).await;
    assert!(matches!(err, Err(AppError::LegalHoldActive)));

    // Nothing in the subtree changed.
    assert!(app.folders.get(&admin, root.id).await.is_ok());
    assert!(app.folders.get(&admin, child.id).await.is_ok());
    assert!(app.documents.get(&admin, loose.id).await.is_ok());
    assert!(app.documents.get(&admin, held.id).await.is_ok());
}

#[tokio::test]
async fn tree_counts_folders_and_documents() {
    let app = TestApp::new();
    let admin = app.admin();
    let doc_type = app.create_type("DOC", false).await;
    let root = app.create_folder(&admin, "root").await;
    let child = app.create_subfolder(&admin, &root, "alpha").await;
    app.create_subfolder(&admin, &root, "beta").await;
    app.create_document(&admin, &root, &doc_type, "top.pdf", Classification::Internal)
        .await;
    app.create_document(&admin, &child, &doc_type, "nested.pdf", Classification::Internal)
        .await;

    let tree = app.tree.build(&admin, Some(root.id)).await.unwrap();
    assert_eq!(tree.total_folders, 3);
    assert_eq!(tree.total_documents, 2);

    let root_node = &tree.roots[0];
    assert_eq!(root_node.document_count, 1);
    assert_eq!(root_node.children.len(), 2);
    // Children come back sorted by name.
    assert_eq!(root_node.children[0].name, "alpha");
    assert_eq!(root_node.children[1].name, "beta");
}

#[tokio::test]
async fn tree_for_a_foreign_folder_is_empty() {
    let app = TestApp::new();
    let admin = app.admin();
    let root = app.create_folder(&admin, "root").await;

    let outsider = docvault_service::context::RequestContext::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        vec![],
        docvault_entity::principal::PrincipalRole::Admin,
    );
    let tree = app.tree.build(&outsider, Some(root.id)).await.unwrap();
    assert!(tree.roots.is_empty());
    assert_eq!(tree.total_folders, 0);
}
