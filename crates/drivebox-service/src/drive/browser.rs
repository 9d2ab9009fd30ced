//! The UI-facing browsing session.
//!
//! Holds the pieces of state a drive view needs — current path, sort
//! order, search query, pagination, and the selection — and exposes the
//! listing, navigation, upload, and bulk entry points the UI drives.

use std::cmp::Ordering;
use std::sync::Arc;

use bytes::Bytes;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::path::DrivePath;
use drivebox_core::types::{
    ItemId, PageRequest, PageResponse, SortDirection, SortKey, VirtualDir,
};
use drivebox_entity::file::CreateFile;
use drivebox_entity::folder::{CreateFolder, FolderEntry};
use drivebox_entity::item::{DriveItem, ItemKind};

use crate::drive::bulk::{BulkReport, BulkService, DownloadBatch};
use crate::drive::selection::SelectionState;
use crate::drive::service::DriveService;

/// One user's view of the drive.
#[derive(Debug)]
pub struct DriveBrowser {
    drive: Arc<DriveService>,
    bulk: BulkService,
    current_path: DrivePath,
    sort_key: SortKey,
    sort_direction: SortDirection,
    search_query: String,
    page: PageRequest,
    selection: SelectionState,
}

impl DriveBrowser {
    /// A browser rooted at the top of the drive.
    pub fn new(drive: Arc<DriveService>) -> Self {
        Self {
            bulk: BulkService::new(drive.clone()),
            drive,
            current_path: DrivePath::root(),
            sort_key: SortKey::default(),
            sort_direction: SortKey::default().default_direction(),
            search_query: String::new(),
            page: PageRequest::default(),
            selection: SelectionState::new(),
        }
    }

    /// The directory (or reserved view) currently shown.
    pub fn current_path(&self) -> &DrivePath {
        &self.current_path
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Navigate to a path; the selection and page reset.
    pub fn navigate_to(&mut self, path: DrivePath) {
        self.current_path = path;
        self.page.page = 1;
        self.selection.clear();
    }

    /// Apply a search query to the current listing; the page resets.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.page.page = 1;
    }

    /// Sort by a key; choosing the current key again flips direction.
    pub fn sort_by(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_direction = self.sort_direction.reversed();
        } else {
            self.sort_key = key;
            self.sort_direction = key.default_direction();
        }
        self.page.page = 1;
    }

    /// Jump to a page (1-based).
    pub fn set_page(&mut self, page: usize) {
        self.page.page = page.max(1);
    }

    /// Change the page size.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page = PageRequest::new(1, page_size);
    }

    /// The current page of the filtered, sorted listing.
    pub async fn list(&self) -> AppResult<PageResponse<DriveItem>> {
        let visible = self.visible_items().await?;
        Ok(PageResponse::paginate(visible, &self.page))
    }

    /// The full filtered, sorted listing (all pages); range selection
    /// works over this order.
    pub async fn visible_items(&self) -> AppResult<Vec<DriveItem>> {
        let mut items = self.drive.items_by_path(&self.current_path).await?;

        if !self.search_query.is_empty() {
            let needle = self.search_query.to_lowercase();
            items.retain(|item| item.name().to_lowercase().contains(&needle));
        }

        let key = self.sort_key;
        items.sort_by(|a, b| compare_items(a, b, key));
        if self.sort_direction == SortDirection::Desc {
            items.reverse();
        }
        Ok(items)
    }

    /// Apply a click to the selection. `toggle` wins over `range` when
    /// both modifier keys are down.
    pub async fn select(&mut self, id: ItemId, toggle: bool, range: bool) -> AppResult<()> {
        if toggle {
            self.selection.toggle_click(id);
        } else if range {
            let displayed: Vec<ItemId> = self
                .visible_items()
                .await?
                .iter()
                .map(DriveItem::id)
                .collect();
            self.selection.range_click(id, &displayed);
        } else {
            self.selection.click(id);
        }
        Ok(())
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Upload files into the current directory.
    pub async fn upload(&self, batch: Vec<(String, Bytes)>) -> AppResult<Vec<ItemId>> {
        if let Some(dir) = VirtualDir::of_path(&self.current_path) {
            return Err(AppError::validation(format!(
                "Cannot upload to '{dir}'; navigate to a folder first"
            )));
        }

        let requests = batch
            .into_iter()
            .map(|(name, content)| CreateFile {
                name,
                content,
                path: self.current_path.clone(),
            })
            .collect();
        self.drive.files().create_many(requests).await
    }

    /// Create a folder in the current directory.
    pub async fn create_folder(&self, name: &str) -> AppResult<FolderEntry> {
        self.drive
            .folders()
            .create(CreateFolder {
                name: name.to_string(),
                path: self.current_path.clone(),
            })
            .await
    }

    /// Drag-and-drop: move one item onto a target directory.
    pub async fn drop_item(&self, id: ItemId, target: &DrivePath) -> AppResult<DriveItem> {
        let item = self.drive.get_item(id).await?;
        self.drive.move_item(id, item.kind(), target).await
    }

    /// Move everything selected to `target`, then clear the selection.
    pub async fn move_selection(&mut self, target: &DrivePath) -> AppResult<BulkReport> {
        let report = self.bulk.bulk_move(self.selection.ids(), target).await?;
        self.selection.clear();
        Ok(report)
    }

    /// Delete everything selected, then clear the selection.
    pub async fn delete_selection(&mut self) -> AppResult<BulkReport> {
        let report = self.bulk.bulk_delete(self.selection.ids()).await;
        self.selection.clear();
        Ok(report)
    }

    /// Collect download payloads for the selected files.
    pub async fn download_selection(&self) -> DownloadBatch {
        self.bulk.bulk_download(self.selection.ids()).await
    }
}

fn compare_items(a: &DriveItem, b: &DriveItem, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        SortKey::Modified => a.modified_at().cmp(&b.modified_at()),
        SortKey::Size => a
            .size_bytes()
            .cmp(&b.size_bytes())
            .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase())),
        SortKey::Kind => kind_rank(a.kind())
            .cmp(&kind_rank(b.kind()))
            .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase())),
    }
}

/// Files sort before folders under the kind key.
fn kind_rank(kind: ItemKind) -> u8 {
    match kind {
        ItemKind::File => 0,
        ItemKind::Folder => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivebox_database::repositories::file::FileRepository;
    use drivebox_database::repositories::folder::FolderRepository;
    use drivebox_database::store::DriveStore;

    use crate::file::FileService;
    use crate::folder::{ArchiveService, FolderService, TreeService};

    fn browser() -> DriveBrowser {
        let store = Arc::new(DriveStore::in_memory());
        let file_repo = Arc::new(FileRepository::new(store.clone()));
        let folder_repo = Arc::new(FolderRepository::new(store));
        let drive = Arc::new(DriveService::new(
            Arc::new(FileService::new(file_repo.clone(), folder_repo.clone())),
            Arc::new(FolderService::new(folder_repo.clone(), file_repo.clone())),
            Arc::new(TreeService::new(folder_repo.clone(), file_repo.clone())),
            Arc::new(ArchiveService::new(folder_repo, file_repo)),
        ));
        DriveBrowser::new(drive)
    }

    fn payload(name: &str) -> (String, Bytes) {
        (name.to_string(), Bytes::from_static(b"data"))
    }

    #[tokio::test]
    async fn test_upload_rejected_in_reserved_view() {
        let mut browser = browser();
        browser.navigate_to(DrivePath::new(["Starred"]).unwrap());

        let err = browser.upload(vec![payload("a.txt")]).await.unwrap_err();
        assert_eq!(err.kind, drivebox_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_listing_filters_and_sorts() {
        let mut browser = browser();
        browser.create_folder("Zulu").await.unwrap();
        browser
            .upload(vec![payload("alpha.txt"), payload("zebra notes.txt")])
            .await
            .unwrap();

        let page = browser.list().await.unwrap();
        let names: Vec<&str> = page.items.iter().map(DriveItem::name).collect();
        assert_eq!(names, ["alpha.txt", "zebra notes.txt", "Zulu"]);

        browser.set_search_query("zu");
        let page = browser.list().await.unwrap();
        let names: Vec<&str> = page.items.iter().map(DriveItem::name).collect();
        assert_eq!(names, ["Zulu"]);
    }

    #[tokio::test]
    async fn test_sort_by_same_key_flips_direction() {
        let mut browser = browser();
        browser
            .upload(vec![payload("a.txt"), payload("b.txt")])
            .await
            .unwrap();

        browser.sort_by(SortKey::Name); // already name => flips to desc
        let page = browser.list().await.unwrap();
        let names: Vec<&str> = page.items.iter().map(DriveItem::name).collect();
        assert_eq!(names, ["b.txt", "a.txt"]);
    }

    #[tokio::test]
    async fn test_kind_sort_puts_files_first() {
        let mut browser = browser();
        browser.create_folder("AAA").await.unwrap();
        browser.upload(vec![payload("zzz.txt")]).await.unwrap();

        browser.sort_by(SortKey::Kind);
        let page = browser.list().await.unwrap();
        let names: Vec<&str> = page.items.iter().map(DriveItem::name).collect();
        assert_eq!(names, ["zzz.txt", "AAA"]);
    }

    #[tokio::test]
    async fn test_range_selection_over_visible_order() {
        let mut browser = browser();
        browser
            .upload(vec![
                payload("a.txt"),
                payload("b.txt"),
                payload("c.txt"),
                payload("d.txt"),
                payload("e.txt"),
            ])
            .await
            .unwrap();

        let visible = browser.visible_items().await.unwrap();
        browser.select(visible[0].id(), false, false).await.unwrap();
        browser.select(visible[3].id(), false, true).await.unwrap();

        assert_eq!(browser.selection().len(), 4);
        assert!(!browser.selection().contains(visible[4].id()));
    }

    #[tokio::test]
    async fn test_delete_selection_clears_it() {
        let mut browser = browser();
        browser.upload(vec![payload("a.txt")]).await.unwrap();
        let visible = browser.visible_items().await.unwrap();
        browser.select(visible[0].id(), false, false).await.unwrap();

        let report = browser.delete_selection().await.unwrap();
        assert!(report.is_complete());
        assert!(browser.selection().is_empty());
        assert!(browser.visible_items().await.unwrap().is_empty());
    }
}
