mod common;

use std::fs;
use std::path::Path;
use tempfile::tempdir;

use common::{CountingFs, base, names, s};
use relocate::{Overrides, ResultCode, copy_entry, copy_entry_with, move_entry, move_entry_with};

fn make_tree(root: &Path) {
    fs::create_dir_all(root.join("sub/deeper")).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("sub/b.txt"), "b").unwrap();
    fs::write(root.join("sub/deeper/c.txt"), "c").unwrap();
}

#[test]
fn copy_folder_recursively() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("dst");

    let out = copy_entry(s(&src), s(&dst), &Overrides::new());
    assert!(out.is_success(), "{out}");
    assert_eq!(fs::read_to_string(dst.join("sub/deeper/c.txt")).unwrap(), "c");
    assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "a");
    assert!(src.join("sub/deeper/c.txt").exists());
}

#[test]
fn copy_folder_not_recursive_skips_subfolders() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("dst");

    let out = copy_entry(s(&src), s(&dst), &Overrides::new().recursive(false));
    assert!(out.is_success(), "{out}");
    assert_eq!(names(&dst), vec!["a.txt"]);
}

#[test]
fn folder_abort_on_existing_destination() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("dst");
    fs::create_dir_all(&dst).unwrap();
    let fs_ = CountingFs::new();

    let out = copy_entry_with(&fs_, s(&src), s(&dst), &Overrides::new());
    assert_eq!(out.code(), ResultCode::DstExists);
    assert!(names(&dst).is_empty());
    assert_eq!(fs_.mutations(), 0);
}

#[test]
fn folder_skip_is_success_without_changes() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("dst");
    fs::create_dir_all(&dst).unwrap();

    let out = move_entry(s(&src), s(&dst), &Overrides::new().folder_mode("skip"));
    assert!(out.is_success(), "{out}");
    assert!(src.join("a.txt").exists());
    assert!(names(&dst).is_empty());
}

#[test]
fn folder_merge_keeps_extra_destination_files() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("dst");
    fs::create_dir_all(dst.join("sub")).unwrap();
    fs::write(dst.join("keep.txt"), "keep").unwrap();
    fs::write(dst.join("sub/old.txt"), "old").unwrap();

    let out = copy_entry(s(&src), s(&dst), &Overrides::new().folder_mode("merge"));
    assert!(out.is_success(), "{out}");
    assert_eq!(names(&dst), vec!["a.txt", "keep.txt", "sub"]);
    assert_eq!(names(&dst.join("sub")), vec!["b.txt", "deeper", "old.txt"]);
}

#[test]
fn folder_merge_stops_on_file_conflict_under_abort() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("dst");
    fs::create_dir_all(&dst).unwrap();
    fs::write(dst.join("a.txt"), "old").unwrap();

    let out = copy_entry(s(&src), s(&dst), &Overrides::new().folder_mode("merge"));
    assert_eq!(out.code(), ResultCode::DstExists);
    assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "old");
}

#[test]
fn first_child_failure_stops_the_walk() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    fs::create_dir_all(&src).unwrap();
    for name in ["a.txt", "b.txt", "c.txt"] {
        fs::write(src.join(name), name).unwrap();
    }
    let dst = b.join("dst");
    fs::create_dir_all(&dst).unwrap();
    fs::write(dst.join("b.txt"), "old").unwrap();
    let fs_ = CountingFs::sorted();

    let out = copy_entry_with(&fs_, s(&src), s(&dst), &Overrides::new().folder_mode("merge"));
    assert_eq!(out.code(), ResultCode::DstExists);
    assert!(out.message().contains("b.txt"), "{}", out.message());
    assert_eq!(fs_.copies.get(), 1);
    assert_eq!(names(&dst), vec!["a.txt", "b.txt"]);
    assert_eq!(fs::read_to_string(dst.join("b.txt")).unwrap(), "old");
}

#[test]
fn folder_replace_drops_previous_contents() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("dst");
    fs::create_dir_all(&dst).unwrap();
    fs::write(dst.join("stale.txt"), "stale").unwrap();

    let out = copy_entry(s(&src), s(&dst), &Overrides::new().folder_mode("replace"));
    assert!(out.is_success(), "{out}");
    assert_eq!(names(&dst), vec!["a.txt", "sub"]);
}

#[test]
fn folder_replace_that_leaves_destination_fails() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("dst");
    fs::create_dir_all(&dst).unwrap();
    fs::write(dst.join("stale.txt"), "stale").unwrap();
    let fs_ = CountingFs::declining_delete_recursive();

    let out = copy_entry_with(&fs_, s(&src), s(&dst), &Overrides::new().folder_mode("replace"));
    assert_eq!(out.code(), ResultCode::DstReplaceFailed);
    assert_eq!(out.destination(), dst.as_path());
    assert_eq!(names(&dst), vec!["stale.txt"]);
    assert_eq!(fs_.copies.get(), 0);
}

#[test]
fn folder_rename_dts_creates_stamped_sibling() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("photos");
    fs::create_dir_all(&dst).unwrap();

    let out = copy_entry(s(&src), s(&dst), &Overrides::new().folder_mode("rename-dts"));
    assert!(out.is_success(), "{out}");
    let listed = names(&b);
    let stamped = listed
        .iter()
        .find(|n| n.starts_with("photos_"))
        .expect("stamped folder");
    assert!(stamped["photos_".len()..].parse::<i64>().is_ok());
    assert!(names(&dst).is_empty());
    assert!(b.join(stamped).join("sub/deeper/c.txt").exists());
}

#[test]
fn siblings_share_one_stamp() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("x.txt"), "x-new").unwrap();
    fs::write(src.join("y.txt"), "y-new").unwrap();
    let dst = b.join("dst");
    fs::create_dir_all(&dst).unwrap();
    fs::write(dst.join("x.txt"), "x-old").unwrap();
    fs::write(dst.join("y.txt"), "y-old").unwrap();

    let ov = Overrides::new().folder_mode("merge").file_mode("rename-dts");
    let out = copy_entry(s(&src), s(&dst), &ov);
    assert!(out.is_success(), "{out}");

    let stamps: Vec<String> = names(&dst)
        .into_iter()
        .filter(|n| n.contains('_'))
        .map(|n| n.split('_').nth(1).unwrap().split('.').next().unwrap().to_string())
        .collect();
    assert_eq!(stamps.len(), 2, "{stamps:?}");
    assert_eq!(stamps[0], stamps[1]);
}

#[test]
fn move_folder_uses_single_rename() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("dst");
    let fs_ = CountingFs::new();

    let out = move_entry_with(&fs_, s(&src), s(&dst), &Overrides::new());
    assert!(out.is_success(), "{out}");
    assert!(!src.exists());
    assert!(dst.join("sub/deeper/c.txt").exists());
    assert_eq!(fs_.renames.get(), 1);
    assert_eq!(fs_.copies.get(), 0);
}

#[test]
fn move_folder_across_boundary_copies_then_removes() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("dst");
    let fs_ = CountingFs::denying_rename();

    let out = move_entry_with(&fs_, s(&src), s(&dst), &Overrides::new());
    assert!(out.is_success(), "{out}");
    assert!(!src.exists());
    assert_eq!(fs::read_to_string(dst.join("sub/deeper/c.txt")).unwrap(), "c");
    assert_eq!(fs_.copies.get(), 3);
    // three folders and three files each tried a rename first
    assert_eq!(fs_.renames.get(), 6);
}

#[test]
fn move_by_copy_keeps_success_when_source_cannot_be_removed() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("dst");
    let fs_ = CountingFs::denying_rename();

    let out = move_entry_with(&fs_, s(&src), s(&dst), &Overrides::new().recursive(false));
    assert!(out.is_success(), "{out}");
    assert_eq!(out.code(), ResultCode::Success);
    assert!(out.message().contains("could not be removed"), "{}", out.message());
    assert_eq!(names(&src), vec!["sub"]);
    assert_eq!(names(&dst), vec!["a.txt"]);
    assert_eq!(fs::read_to_string(src.join("sub/deeper/c.txt")).unwrap(), "c");
}

#[test]
fn move_folder_merge_removes_source() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let dst = b.join("dst");
    fs::create_dir_all(&dst).unwrap();
    fs::write(dst.join("keep.txt"), "keep").unwrap();

    let out = move_entry(s(&src), s(&dst), &Overrides::new().folder_mode("merge"));
    assert!(out.is_success(), "{out}");
    assert!(!src.exists());
    assert_eq!(names(&dst), vec!["a.txt", "keep.txt", "sub"]);
}

#[test]
fn max_depth_bounds_the_walk() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);

    let out = copy_entry(s(&src), s(&b.join("shallow")), &Overrides::new().max_depth(1));
    assert_eq!(out.code(), ResultCode::Unknown);
    assert!(out.message().contains("depth"), "{}", out.message());

    let out = copy_entry(s(&src), s(&b.join("deep")), &Overrides::new().max_depth(2));
    assert!(out.is_success(), "{out}");
}

#[test]
fn destination_blocked_by_file_is_mkdir_failure() {
    let td = tempdir().unwrap();
    let b = base(&td);
    let src = b.join("src");
    make_tree(&src);
    let blocker = b.join("blocker");
    fs::write(&blocker, "file").unwrap();

    let out = copy_entry(s(&src), s(&blocker.join("dst")), &Overrides::new());
    assert_eq!(out.code(), ResultCode::DstMkdirFailed);
}
