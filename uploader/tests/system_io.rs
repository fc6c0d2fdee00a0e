// This file is part of efpga-upload, an application to upload bitstreams to eFPGAs over UART or a bit-banged GPIO link.
//
// Copyright 2025 Canonical Ltd.
//
// SPDX-License-Identifier: GPL-3.0-only
//
// efpga-upload is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License version 3, as published by the Free Software Foundation.
//
// efpga-upload is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranties of MERCHANTABILITY, SATISFACTORY QUALITY, or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with this program.  If not, see http://www.gnu.org/licenses/.

mod common;

use common::write_file;
use efpga_uploader::error::UploaderError;
use efpga_uploader::system_io::{fs_read, fs_write, read_bitstream, validate_serial_device};
use googletest::prelude::*;
use rstest::*;
use std::path::{Path, PathBuf};

#[gtest]
#[rstest]
#[case::not_found(
    "bad_input",
    err(displays_as(contains_substring("No such file or directory")))
)]
#[case::is_dir("/etc/", err(displays_as(contains_substring("Is a directory"))))]
#[case::ok("Cargo.toml", ok(contains_substring("efpga_uploader")))]
fn test_fs_read<M: for<'a> Matcher<&'a std::result::Result<String, UploaderError>>>(
    #[case] path_str: &str,
    #[case] condition: M,
) {
    let r = fs_read(Path::new(path_str));
    expect_that!(r, condition);
}

#[gtest]
fn fs_write_never_creates_the_attribute() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("attr");

    expect_that!(
        fs_write(&path, "1"),
        err(displays_as(contains_substring("UploaderError::IOWrite")))
    );
    expect_that!(path.exists(), eq(false));
}

#[gtest]
fn fs_write_overwrites_existing_attribute() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_file(dir.path(), "direction", "in");

    expect_that!(fs_write(&path, "low"), ok(eq(&())));
    expect_that!(fs_read(&path), ok(eq("low")));
}

#[gtest]
fn bitstream_is_read_verbatim() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let contents: [u8; 6] = [0x00, 0x0A, 0x0D, 0xFA, 0xB1, 0xFF];
    let path = write_file(dir.path(), "bitstream.bin", contents);
    expect_that!(read_bitstream(&path), ok(eq(&contents.to_vec())));
}

#[gtest]
fn empty_bitstream_is_allowed() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_file(dir.path(), "empty.bin", b"");
    expect_that!(read_bitstream(&path), ok(is_empty()));
}

#[gtest]
#[rstest]
#[case::missing("does/not/exist.bin")]
#[case::directory("/etc")]
fn bitstream_must_be_a_regular_file(#[case] path_str: &str) {
    let result = read_bitstream(Path::new(path_str));
    expect_that!(
        result,
        err(displays_as(contains_substring(
            "UploaderError::BitstreamNotFound"
        )))
    );
}

#[gtest]
fn char_device_is_accepted() {
    expect_that!(
        validate_serial_device(Path::new("/dev/null")),
        ok(eq(&PathBuf::from("/dev/null")))
    );
}

#[gtest]
fn bare_device_name_is_looked_up_in_dev() {
    expect_that!(
        validate_serial_device(Path::new("null")),
        ok(eq(&PathBuf::from("/dev/null")))
    );
}

#[gtest]
fn regular_file_is_not_a_device() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_file(dir.path(), "ttyFAKE0", "not a tty");
    assert!(path.exists());

    expect_that!(
        validate_serial_device(&path),
        err(displays_as(contains_substring("is not a character device")))
    );
}

#[gtest]
#[rstest]
#[case::absolute("/dev/ttyDOESNOTEXIST9")]
#[case::bare("ttyDOESNOTEXIST9")]
fn missing_device_is_rejected(#[case] port: &str) {
    expect_that!(
        validate_serial_device(Path::new(port)),
        err(displays_as(contains_substring(
            "Device port \"/dev/ttyDOESNOTEXIST9\" does not exist"
        )))
    );
}

#[gtest]
fn directory_is_not_a_device() {
    expect_that!(
        validate_serial_device(Path::new("/dev/")),
        err(displays_as(contains_substring("is not a character device")))
    );
}
