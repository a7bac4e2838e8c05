//! CLI parse tests.

use super::Cli;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use webpgrab_core::config::GrabConfig;

use super::commands::pipeline_options;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn url_only() {
    let cli = parse(&["webpgrab", "https://example.com/gallery"]);
    assert_eq!(cli.url, "https://example.com/gallery");
    assert!(cli.output_dir.is_none());
    assert!(cli.extension.is_none());
}

#[test]
fn output_dir_and_extension() {
    let cli = parse(&[
        "webpgrab",
        "-o",
        "/tmp/pics",
        "--extension",
        ".PNG",
        "https://example.com/g",
    ]);
    assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/pics")));
    assert_eq!(cli.extension.as_deref(), Some(".PNG"));

    let opts = pipeline_options(&cli, &GrabConfig::default());
    assert_eq!(opts.image_extension, "PNG");
    assert_eq!(opts.output_root, PathBuf::from("/tmp/pics"));
}

#[test]
fn defaults_come_from_config() {
    let cli = parse(&["webpgrab", "https://example.com/g"]);
    let mut cfg = GrabConfig::default();
    cfg.heading_tag = "h2".to_string();
    let opts = pipeline_options(&cli, &cfg);
    assert_eq!(opts.image_extension, "webp");
    assert_eq!(opts.heading_tag, "h2");
    assert_eq!(opts.output_root, PathBuf::new());
}

#[test]
fn missing_url_is_an_error() {
    let err = Cli::try_parse_from(["webpgrab"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn extra_positional_rejected() {
    assert!(Cli::try_parse_from(["webpgrab", "https://a.example", "https://b.example"]).is_err());
}
