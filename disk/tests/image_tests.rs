//! Blank-disk and block-copy tests

mod common;

use common::ScratchDir;
use floppyforge_disk::{copy_block, create_blank_disk, CopyRequest, DiskError};
use std::fs;

#[test]
fn blank_disk_is_zero_filled() {
    let dir = ScratchDir::new("blank");
    let disk = dir.path("temp.img");

    create_blank_disk(&disk, 10).unwrap();
    assert_eq!(fs::read(&disk).unwrap(), vec![0u8; 10]);
}

#[test]
fn blank_disk_spanning_several_chunks() {
    let dir = ScratchDir::new("blank-chunks");
    let disk = dir.path("temp.img");

    // Not a multiple of the 4096-byte buffer
    create_blank_disk(&disk, 10_000).unwrap();
    let contents = fs::read(&disk).unwrap();
    assert_eq!(contents.len(), 10_000);
    assert!(contents.iter().all(|&byte| byte == 0));
}

#[test]
fn blank_disk_of_zero_bytes() {
    let dir = ScratchDir::new("blank-empty");
    let disk = dir.path("temp.img");

    create_blank_disk(&disk, 0).unwrap();
    assert_eq!(fs::metadata(&disk).unwrap().len(), 0);
}

#[test]
fn blank_disk_replaces_existing_content() {
    let dir = ScratchDir::new("blank-replace");
    let disk = dir.write_file("temp.img", &[0xFF; 64]);

    create_blank_disk(&disk, 8).unwrap();
    assert_eq!(fs::read(&disk).unwrap(), vec![0u8; 8]);
}

#[test]
fn blank_disk_creates_the_parent_directory() {
    let dir = ScratchDir::new("blank-parent");
    let disk = dir.path("disks/nested/temp.img");

    create_blank_disk(&disk, 4).unwrap();
    assert_eq!(fs::read(&disk).unwrap(), vec![0u8; 4]);
}

fn copy_fixture(dir: &ScratchDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let source = dir.write_file("in.bin", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    let dest = dir.write_file("out.bin", &[0xA, 0xB, 0xC, 0xD, 0xE, 0xF]);
    (source, dest)
}

#[test]
fn copies_a_window_at_a_destination_offset() {
    let dir = ScratchDir::new("copy-window");
    let (source, dest) = copy_fixture(&dir);

    let copied = copy_block(&CopyRequest {
        source,
        dest: dest.clone(),
        source_offset: 4,
        max_length: Some(3),
        dest_offset: 1,
    })
    .unwrap();

    assert_eq!(copied, 3);
    // Only bytes [1, 4) of the destination change
    assert_eq!(fs::read(&dest).unwrap(), [0xA, 4, 5, 6, 0xE, 0xF]);
}

#[test]
fn copies_the_entire_source_when_no_length_is_given() {
    let dir = ScratchDir::new("copy-full");
    let (source, dest) = copy_fixture(&dir);

    let copied = copy_block(&CopyRequest::new(&source, &dest)).unwrap();

    assert_eq!(copied, 10);
    assert_eq!(fs::read(&dest).unwrap(), [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn copy_is_bounded_by_the_source_size() {
    let dir = ScratchDir::new("copy-bounded");
    let (source, dest) = copy_fixture(&dir);

    let copied = copy_block(&CopyRequest {
        source,
        dest,
        source_offset: 6,
        max_length: Some(100),
        dest_offset: 0,
    })
    .unwrap();

    assert_eq!(copied, 4);
}

#[test]
fn copy_creates_a_missing_destination() {
    let dir = ScratchDir::new("copy-create");
    let source = dir.write_file("in.bin", b"payload");
    let dest = dir.path("fresh.bin");

    let copied = copy_block(&CopyRequest::new(&source, &dest)).unwrap();

    assert_eq!(copied, 7);
    assert_eq!(fs::read(&dest).unwrap(), b"payload");
}

#[test]
fn copy_from_a_missing_source_is_not_found() {
    let dir = ScratchDir::new("copy-missing");
    let source = dir.path("absent.bin");
    let dest = dir.path("out.bin");

    let err = copy_block(&CopyRequest::new(&source, &dest)).unwrap_err();

    assert!(matches!(err, DiskError::NotFound { ref path } if *path == source));
    assert!(err.to_string().contains("not found"));
}
