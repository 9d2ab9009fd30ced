//! Terminal output helpers for listings, trees, and statistics.

use drivebox_entity::folder::{FolderStats, FolderTreeNode};
use drivebox_entity::item::{DriveItem, ItemKind, StorageStats};

/// Human-readable byte size.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Print a directory listing, one item per line.
pub fn print_items(items: &[DriveItem]) {
    if items.is_empty() {
        println!("(empty)");
        return;
    }
    for item in items {
        let kind = match item.kind() {
            ItemKind::Folder => "d",
            ItemKind::File => "-",
        };
        let favorite = if item.is_favorite() { "*" } else { " " };
        let size = match item {
            DriveItem::File(file) => format_size(file.size_bytes),
            DriveItem::Folder(folder) => format!("{} items", folder.item_count),
        };
        println!(
            "{kind}{favorite} {size:>12}  {}  {}",
            item.modified_at().format("%Y-%m-%d %H:%M"),
            item.name()
        );
    }
}

/// Print the folder hierarchy with indentation.
pub fn print_tree(nodes: &[FolderTreeNode]) {
    if nodes.is_empty() {
        println!("(no folders)");
        return;
    }
    for node in nodes {
        print_tree_node(node, 0);
    }
}

fn print_tree_node(node: &FolderTreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{indent}{}/ ({} items)", node.folder.name, node.folder.item_count);
    for child in &node.children {
        print_tree_node(child, depth + 1);
    }
    for file in &node.files {
        println!("{indent}  {} ({})", file.name, format_size(file.size_bytes));
    }
}

/// Print drive-wide statistics.
pub fn print_storage_stats(stats: &StorageStats) {
    println!("Total size:  {}", format_size(stats.total_size_bytes));
    println!("Files:       {}", stats.file_count);
    println!("Folders:     {}", stats.folder_count);
    println!("Total items: {}", stats.total_items);
}

/// Print per-folder statistics.
pub fn print_folder_stats(name: &str, stats: &FolderStats) {
    println!("Folder:     {name}");
    println!("Files:      {}", stats.file_count);
    println!("Subfolders: {}", stats.subfolder_count);
    println!("Total size: {}", format_size(stats.total_size_bytes));
}
