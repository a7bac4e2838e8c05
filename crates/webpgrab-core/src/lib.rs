//! Render a web page, pick out digits-only image files and download them
//! into a folder named after the page heading.

pub mod config;
pub mod document;
pub mod downloader;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod storage;
pub mod url_model;
