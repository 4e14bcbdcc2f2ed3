//! Core of VDM: a single-job controller that drives an external media
//! engine (yt-dlp) on a background thread and relays its progress to an
//! observer as a stream of [`ProgressEvent`]s.

pub mod config;
pub mod controller;
pub mod engine;
pub mod event;
pub mod logging;
pub mod relay;
pub mod request;

pub use controller::{JobController, JobHandle, StartError};
pub use engine::{Engine, EngineError, EngineOptions, MediaInfo, ProgressUpdate};
pub use event::{JobEvents, ProgressEvent};
pub use request::JobRequest;
