//! Trailing-zero trimmer tests

mod common;

use common::ScratchDir;
use floppyforge_disk::trim_trailing_zeros;

#[test]
fn leaves_a_file_with_no_trailing_zeros_alone() {
    let dir = ScratchDir::new("trim-none");
    let contents = [1, 2, 3, 4, 5, 6, 7, 8, 1, 2, 3, 4, 5, 6, 7, 8];
    let file = dir.write_file("in.bin", &contents);

    assert_eq!(trim_trailing_zeros(&file).unwrap(), 0);
    assert_eq!(dir.read_file("in.bin"), contents);
}

#[test]
fn keeps_zeros_that_fill_out_the_final_block() {
    let dir = ScratchDir::new("trim-boundary");
    let contents = [1, 2, 3, 4, 5, 6, 7, 8, 1, 2, 3, 0, 0, 0, 0, 0];
    let file = dir.write_file("in.bin", &contents);

    assert_eq!(trim_trailing_zeros(&file).unwrap(), 0);
    assert_eq!(dir.read_file("in.bin"), contents);
}

#[test]
fn pads_short_content_up_to_the_boundary() {
    let dir = ScratchDir::new("trim-pad");
    let file = dir.write_file("in.bin", &[1, 2, 3, 4]);

    assert_eq!(trim_trailing_zeros(&file).unwrap(), -12);
    assert_eq!(
        dir.read_file("in.bin"),
        [1, 2, 3, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn trims_a_zero_run_down_to_the_boundary() {
    let dir = ScratchDir::new("trim-run");
    #[rustfmt::skip]
    let contents = [
        1, 2, 3, 4, 5, 6, 7, 8,  1, 2, 3, 4, 5, 6, 7, 8,
        1, 2, 3, 0, 0, 0, 0, 0,  0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0,  0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0,  0, 0, 0, 0, 0, 0, 0, 0,
    ];
    let file = dir.write_file("in.bin", &contents);

    assert_eq!(trim_trailing_zeros(&file).unwrap(), 32);
    assert_eq!(dir.read_file("in.bin"), contents[..32]);
}

#[test]
fn trims_an_all_zero_file_to_empty() {
    let dir = ScratchDir::new("trim-zero");
    let file = dir.write_file("in.bin", &[0u8; 40]);

    assert_eq!(trim_trailing_zeros(&file).unwrap(), 40);
    assert_eq!(dir.read_file("in.bin"), Vec::<u8>::new());
}

#[test]
fn leaves_an_empty_file_empty() {
    let dir = ScratchDir::new("trim-empty");
    let file = dir.write_file("in.bin", &[]);

    assert_eq!(trim_trailing_zeros(&file).unwrap(), 0);
    assert_eq!(dir.read_file("in.bin"), Vec::<u8>::new());
}
