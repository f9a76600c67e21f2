use super::*;

fn temp_album_root(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "gridshot_fs_album_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn sample_pixmap() -> Pixmap {
    let mut pm = Pixmap::new(5, 3).unwrap();
    for y in 0..3 {
        for x in 0..5 {
            pm.set_pixel(x, y, 0xFF00_0000 | (x << 16) | (y << 8) | (x + y));
        }
    }
    pm
}

#[test]
fn put_and_get_round_trip_through_png() {
    let root = temp_album_root("round_trip");
    let mut album = FsAlbum::open(&root).unwrap();
    let pm = sample_pixmap();

    let location = album.put("shot", &pm).unwrap();
    assert!(location.ends_with("shot.png"));
    assert!(location.exists());

    let loaded = album.get("shot").unwrap().unwrap();
    pm.verify_matches(&loaded).unwrap();
    assert_eq!(album.get("missing").unwrap(), None);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn alpha_survives_the_png_round_trip() {
    let root = temp_album_root("alpha");
    let mut album = FsAlbum::open(&root).unwrap();
    let mut pm = Pixmap::new(2, 1).unwrap();
    pm.set_pixel(0, 0, 0x80FF_0000);

    album.put("translucent", &pm).unwrap();
    let loaded = album.get("translucent").unwrap().unwrap();
    pm.verify_matches(&loaded).unwrap();

    fs::remove_dir_all(&root).ok();
}

#[test]
fn ledger_lists_artifacts_and_dumps() {
    let root = temp_album_root("ledger");
    let mut album = FsAlbum::open(&root).unwrap();

    album.put("shot", &sample_pixmap()).unwrap();
    album.put_dump("shot", b"<hierarchy/>").unwrap();
    album.flush().unwrap();

    let entries = album.entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "shot");
    assert_eq!(entries[0].file, "shot.png");
    assert_eq!(entries[1].name, "shot_dump");
    assert_eq!(entries[1].file, "shot_dump.xml");

    let raw = fs::read_to_string(album.metadata_path()).unwrap();
    assert!(raw.contains("shot_dump.xml"));

    let dumped = fs::read(root.join("shot_dump.xml")).unwrap();
    assert_eq!(dumped, b"<hierarchy/>");

    fs::remove_dir_all(&root).ok();
}

#[test]
fn find_filters_ledger_entries() {
    let root = temp_album_root("find");
    let mut album = FsAlbum::open(&root).unwrap();
    album.put("login", &sample_pixmap()).unwrap();
    album.put("login_1_0", &sample_pixmap()).unwrap();
    album.put("settings", &sample_pixmap()).unwrap();

    assert_eq!(album.find("login").unwrap().len(), 2);
    assert_eq!(album.find("settings").unwrap().len(), 1);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn cleanup_removes_the_storage_area() {
    let root = temp_album_root("cleanup");
    let mut album = FsAlbum::open(&root).unwrap();
    album.put("shot", &sample_pixmap()).unwrap();
    assert!(root.exists());

    album.cleanup().unwrap();
    assert!(!root.exists());
    // A second cleanup of a missing area is not an error.
    album.cleanup().unwrap();
}

#[test]
fn reopening_preserves_the_ledger() {
    let root = temp_album_root("reopen");
    {
        let mut album = FsAlbum::open(&root).unwrap();
        album.put("first", &sample_pixmap()).unwrap();
    }
    let mut album = FsAlbum::open(&root).unwrap();
    album.put("second", &sample_pixmap()).unwrap();

    let names: Vec<String> = album.entries().unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["first".to_owned(), "second".to_owned()]);

    fs::remove_dir_all(&root).ok();
}
