use horizon_gallery::category::Category;
use horizon_gallery::error::ListError;
use horizon_gallery::lister::{ImageLister, ImageSource};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn category_dir(root: &Path, category: &str) -> std::path::PathBuf {
    let dir = root.join("images").join(category);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn names(images: &[horizon_gallery::category::ImageRef]) -> HashSet<String> {
    images.iter().map(|i| i.as_str().to_string()).collect()
}

#[test]
fn lists_only_allowed_extensions_case_insensitively() {
    let tmp = tempdir().unwrap();
    let dir = category_dir(tmp.path(), "exterior");
    for name in ["a.jpg", "b.JPEG", "c.Png", "d.webp", "e.gif", "notes.txt", "noext"] {
        fs::write(dir.join(name), b"x").unwrap();
    }
    fs::create_dir(dir.join("folder.jpg")).unwrap();

    let lister = ImageLister::new(tmp.path());
    let images = lister.list("exterior").unwrap();

    let expected: HashSet<String> = [
        "/images/exterior/a.jpg",
        "/images/exterior/b.JPEG",
        "/images/exterior/c.Png",
        "/images/exterior/d.webp",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(images.len(), 4);
    assert_eq!(names(&images), expected);
}

#[test]
fn does_not_recurse_into_subdirectories() {
    let tmp = tempdir().unwrap();
    let dir = category_dir(tmp.path(), "interior");
    fs::create_dir(dir.join("nested")).unwrap();
    fs::write(dir.join("nested").join("deep.jpg"), b"x").unwrap();
    fs::write(dir.join("top.jpg"), b"x").unwrap();

    let images = ImageLister::new(tmp.path())
        .list_category(Category::Interior)
        .unwrap();
    assert_eq!(names(&images), HashSet::from(["/images/interior/top.jpg".to_string()]));
}

#[test]
fn unknown_category_is_rejected() {
    let tmp = tempdir().unwrap();
    let err = ImageLister::new(tmp.path()).list("invalid").unwrap_err();
    assert!(matches!(err, ListError::InvalidCategory(ref raw) if raw == "invalid"));
}

#[test]
fn removed_directory_is_not_found() {
    let tmp = tempdir().unwrap();
    let dir = category_dir(tmp.path(), "home");
    fs::write(dir.join("hero.jpg"), b"x").unwrap();
    let lister = ImageLister::new(tmp.path());
    assert_eq!(lister.list("home").unwrap().len(), 1);

    fs::remove_dir_all(&dir).unwrap();
    let err = lister.list("home").unwrap_err();
    assert!(matches!(err, ListError::DirectoryNotFound(ref p) if *p == dir));
}

#[test]
fn file_in_place_of_directory_is_a_read_failure() {
    let tmp = tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("images")).unwrap();
    fs::write(tmp.path().join("images").join("exterior"), b"not a dir").unwrap();

    let err = ImageLister::new(tmp.path()).list("exterior").unwrap_err();
    assert!(matches!(err, ListError::ReadFailure { .. }), "got {err:?}");
}

#[test]
fn listing_twice_yields_same_set_and_sees_new_files() {
    let tmp = tempdir().unwrap();
    let dir = category_dir(tmp.path(), "exterior");
    for i in 0..12 {
        fs::write(dir.join(format!("{i}.jpg")), b"x").unwrap();
    }
    let lister = ImageLister::new(tmp.path());

    let first = lister.list("exterior").unwrap();
    let second = lister.list("exterior").unwrap();
    assert_eq!(names(&first), names(&second));

    fs::write(dir.join("late.webp"), b"x").unwrap();
    let third = lister.list("exterior").unwrap();
    assert_eq!(third.len(), 13);
    assert!(names(&third).contains("/images/exterior/late.webp"));
}

#[test]
fn empty_directory_lists_nothing() {
    let tmp = tempdir().unwrap();
    category_dir(tmp.path(), "interior");
    assert!(ImageLister::new(tmp.path()).list("interior").unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_source_matches_blocking_listing() {
    let tmp = tempdir().unwrap();
    let dir = category_dir(tmp.path(), "home");
    fs::write(dir.join("a.png"), b"x").unwrap();
    let lister = ImageLister::new(tmp.path());

    let fetched = lister.fetch(Category::Home).await.unwrap();
    assert_eq!(names(&fetched), names(&lister.list_category(Category::Home).unwrap()));

    let missing = lister.fetch(Category::Interior).await.unwrap_err();
    assert!(matches!(missing, ListError::DirectoryNotFound(_)));
}

#[cfg(unix)]
#[test]
fn dangling_symlink_is_skipped_not_fatal() {
    let tmp = tempdir().unwrap();
    let dir = category_dir(tmp.path(), "exterior");
    fs::write(dir.join("a.jpg"), b"x").unwrap();
    std::os::unix::fs::symlink(dir.join("gone.txt"), dir.join("stale.txt")).unwrap();
    std::os::unix::fs::symlink(dir.join("gone.jpg"), dir.join("broken.jpg")).unwrap();

    let images = ImageLister::new(tmp.path()).list("exterior").unwrap();
    assert_eq!(names(&images), HashSet::from(["/images/exterior/a.jpg".to_string()]));
}
