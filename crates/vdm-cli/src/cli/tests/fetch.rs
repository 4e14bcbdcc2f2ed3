//! Tests for the fetch subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_fetch() {
    match parse(&["vdm", "fetch", "https://www.bilibili.com/video/BV1xx"]) {
        CliCommand::Fetch {
            url,
            out_dir,
            cookies,
        } => {
            assert_eq!(url, "https://www.bilibili.com/video/BV1xx");
            assert!(out_dir.is_none());
            assert!(cookies.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_out_dir_and_cookies() {
    match parse(&[
        "vdm",
        "fetch",
        "https://example.com/v",
        "-o",
        "/tmp/videos",
        "--cookies",
        "/home/me/cookies.txt",
    ]) {
        CliCommand::Fetch {
            out_dir, cookies, ..
        } => {
            assert_eq!(out_dir.as_deref(), Some(Path::new("/tmp/videos")));
            assert_eq!(cookies.as_deref(), Some(Path::new("/home/me/cookies.txt")));
        }
        _ => panic!("expected Fetch with options"),
    }
}

#[test]
fn cli_parse_fetch_requires_url() {
    assert!(Cli::try_parse_from(["vdm", "fetch"]).is_err());
}
