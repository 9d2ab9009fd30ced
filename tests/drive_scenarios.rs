//! End-to-end scenarios across the whole service stack.

mod common;

use common::{path, TestDrive};

use drivebox_core::error::ErrorKind;
use drivebox_core::types::path::DrivePath;
use drivebox_entity::file::CreateFile;
use drivebox_entity::item::{DriveItem, ItemKind};

#[tokio::test]
async fn test_create_list_and_total_size() {
    let t = TestDrive::new();

    t.mkdir("Docs", &[]).await;
    t.mkfile("x.txt", "hi", &["Docs"]).await;

    let children = t.drive.items_by_path(&path(&["Docs"])).await.unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].name(), "x.txt");
    assert_eq!(children[0].kind(), ItemKind::File);

    let stats = t.drive.storage_stats().await.unwrap();
    assert_eq!(stats.total_size_bytes, 2);
}

#[tokio::test]
async fn test_folder_move_rewrites_nested_paths() {
    let t = TestDrive::new();

    let a = t.mkdir("A", &[]).await;
    t.mkdir("B", &["A"]).await;
    t.mkfile("f.txt", "f", &["A", "B"]).await;
    t.mkdir("X", &[]).await;

    // Moving to the folder's current parent is a harmless no-op.
    t.drive
        .move_item(a.id, ItemKind::Folder, &DrivePath::root())
        .await
        .unwrap();

    t.drive
        .move_item(a.id, ItemKind::Folder, &path(&["X"]))
        .await
        .unwrap();

    let b = t
        .drive
        .folders()
        .get_by_identity(&path(&["X", "A", "B"]))
        .await
        .unwrap();
    assert!(b.is_some(), "B's path should now be X/A");

    let files = t.drive.files().get_by_path(&path(&["X", "A", "B"])).await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "f.txt");
}

#[tokio::test]
async fn test_upload_to_reserved_view_is_rejected() {
    let t = TestDrive::new();

    let err = t
        .drive
        .files()
        .create(CreateFile {
            name: "a.txt".to_string(),
            content: bytes::Bytes::from_static(b"x"),
            path: path(&["Starred"]),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    let (files, _) = t.row_counts().await;
    assert_eq!(files, 0, "no file row may exist after a rejected upload");
}

#[tokio::test]
async fn test_recursive_delete_drops_exactly_the_subtree() {
    let t = TestDrive::new();

    let doomed = t.mkdir("Doomed", &[]).await;
    t.mkfile("a.txt", "1", &["Doomed"]).await;
    t.mkfile("b.txt", "2", &["Doomed"]).await;
    t.mkfile("c.txt", "3", &["Doomed"]).await;
    t.mkdir("Sub", &["Doomed"]).await;
    t.mkfile("d.txt", "4", &["Doomed", "Sub"]).await;

    // A bystander that must survive.
    t.mkfile("keep.txt", "k", &[]).await;

    let (files_before, folders_before) = t.row_counts().await;
    assert_eq!(files_before + folders_before, 7);

    let removed = t.drive.folders().delete_recursive(doomed.id).await.unwrap();
    assert_eq!(removed.total(), 6);

    let (files_after, folders_after) = t.row_counts().await;
    assert_eq!(files_before + folders_before - (files_after + folders_after), 6);
    assert_eq!(folders_after, 0);
    assert_eq!(files_after, 1);

    let survivors = t.drive.items_by_path(&DrivePath::root()).await.unwrap();
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].name(), "keep.txt");
}

#[tokio::test]
async fn test_recent_view_orders_newest_first() {
    let t = TestDrive::new();

    let old = t.mkfile("old.txt", "1", &[]).await;
    let fresh = t.mkfile("fresh.txt", "2", &[]).await;
    // Renaming bumps the modification time.
    t.drive.files().rename(old.id, "older.txt").await.unwrap();

    let recent = t.drive.items_by_path(&path(&["Recent"])).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].name(), "older.txt");
    assert_eq!(recent[1].id(), fresh.id);
}

#[tokio::test]
async fn test_starred_view_tracks_favorites() {
    let t = TestDrive::new();

    let file = t.mkfile("a.txt", "1", &[]).await;
    let folder = t.mkdir("F", &[]).await;
    t.drive.toggle_favorite(file.id, ItemKind::File).await.unwrap();
    t.drive.toggle_favorite(folder.id, ItemKind::Folder).await.unwrap();

    let starred = t.drive.items_by_path(&path(&["Starred"])).await.unwrap();
    assert_eq!(starred.len(), 2);

    t.drive.toggle_favorite(file.id, ItemKind::File).await.unwrap();
    let starred = t.drive.items_by_path(&path(&["Starred"])).await.unwrap();
    assert_eq!(starred.len(), 1);
    assert!(matches!(starred[0], DriveItem::Folder(_)));
}

#[tokio::test]
async fn test_search_spans_both_kinds() {
    let t = TestDrive::new();

    t.mkdir("Reports", &[]).await;
    t.mkfile("report-final.pdf", "x", &[]).await;
    t.mkfile("unrelated.txt", "x", &[]).await;

    let hits = t.drive.search("repo").await.unwrap();
    assert_eq!(hits.len(), 2);
    // Folders come first in combined results.
    assert_eq!(hits[0].kind(), ItemKind::Folder);
}

#[tokio::test]
async fn test_get_by_extension() {
    let t = TestDrive::new();

    t.mkfile("a.PDF", "x", &[]).await;
    t.mkfile("b.pdf", "x", &[]).await;
    t.mkfile("c.txt", "x", &[]).await;

    let pdfs = t.drive.files().get_by_extension("pdf").await.unwrap();
    assert_eq!(pdfs.len(), 2);
}
