#![allow(dead_code)]

#[cfg(unix)]
pub mod fake_ytdlp;
pub mod scripted_engine;
