mod common;

use std::fs;

use anox_dat::{
    error::{Error, Result},
    load_archive, EntrySummary, Session,
};
use common::ArchiveBuilder;
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

#[test]
fn unloaded_session_refuses_work() -> Result<()> {
    let session = Session::new();
    let root = tempfile::tempdir()?;

    assert!(!session.is_loaded());
    assert!(matches!(session.list_entries(), Err(Error::NotLoaded)));
    assert!(matches!(session.extract_all(root.path()), Err(Error::NotLoaded)));
    assert!(matches!(
        session.extract_one("a.txt", root.path()),
        Err(Error::NotLoaded)
    ));
    assert_eq!(fs::read_dir(root.path())?.count(), 0);

    Ok(())
}

#[traced_test]
#[test]
fn load_list_and_close() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Objects.dat");
    fs::write(
        &path,
        ArchiveBuilder::new()
            .raw("readme.txt", b"hello")
            .compressed("objects/box.md2", &[7; 300])
            .build(),
    )?;

    let mut session = load_archive(&path)?;
    assert!(session.is_loaded());
    assert_eq!(session.basename()?, "objects");
    assert_eq!(
        session.list_entries()?,
        vec![
            EntrySummary {
                name: "readme.txt".into(),
                uncompressed_length: 5,
                is_compressed: false,
            },
            EntrySummary {
                name: "objects/box.md2".into(),
                uncompressed_length: 300,
                is_compressed: true,
            },
        ]
    );

    session.close();
    assert!(!session.is_loaded());
    assert!(matches!(session.list_entries(), Err(Error::NotLoaded)));

    Ok(())
}

#[test]
fn failed_load_leaves_session_unloaded() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let good = dir.path().join("good.dat");
    let bad = dir.path().join("bad.dat");
    fs::write(&good, ArchiveBuilder::new().raw("a.txt", b"a").build())?;
    fs::write(&bad, b"PK\x03\x04 definitely not a dat archive")?;

    let mut session = load_archive(&good)?;
    assert!(session.is_loaded());

    assert!(matches!(session.load(&bad), Err(Error::InvalidMagic(_))));
    assert!(!session.is_loaded());

    assert!(matches!(
        session.load(dir.path().join("missing.dat")),
        Err(Error::IOError(_))
    ));
    assert!(!session.is_loaded());

    Ok(())
}

#[test]
fn reload_replaces_archive() -> Result<()> {
    let mut session = Session::new();
    session.load_bytes(ArchiveBuilder::new().raw("one.txt", b"1").build(), "First")?;
    assert_eq!(session.basename()?, "first");

    session.load_bytes(ArchiveBuilder::new().raw("two.txt", b"2").build(), "second")?;
    let names = session
        .list_entries()?
        .into_iter()
        .map(|e| e.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["two.txt"]);

    let root = tempfile::tempdir()?;
    let path = session.extract_one("two.txt", root.path())?;
    assert_eq!(path, root.path().join("second").join("two.txt"));
    assert!(matches!(
        session.extract_one("one.txt", root.path()),
        Err(Error::FileNotFound(_))
    ));

    Ok(())
}

#[test]
fn independent_sessions() -> Result<()> {
    let mut left = Session::new();
    let mut right = Session::new();
    left.load_bytes(ArchiveBuilder::new().raw("same.txt", b"left").build(), "left")?;
    right.load_bytes(ArchiveBuilder::new().raw("same.txt", b"right").build(), "right")?;

    let root = tempfile::tempdir()?;
    left.extract_all(root.path())?;
    right.extract_all(root.path())?;

    assert_eq!(fs::read(root.path().join("left/same.txt"))?, b"left");
    assert_eq!(fs::read(root.path().join("right/same.txt"))?, b"right");

    Ok(())
}
