//! In-process engine that replays a fixed script of progress ticks.
//!
//! Optionally blocks at the start of `download` until the test opens the
//! gate, so a test can cancel before the first tick is delivered.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

use vdm_core::engine::{Engine, EngineError, EngineOptions, MediaInfo, ProgressHook, ProgressUpdate};

#[derive(Debug, Clone)]
pub enum Step {
    Tick(ProgressUpdate),
    Fail(String),
    Panic(String),
}

#[derive(Debug, Default)]
pub struct Record {
    pub options: Option<EngineOptions>,
    /// Whether the output directory existed when the engine was first called.
    pub output_dir_existed: Option<bool>,
    pub download_called: bool,
    pub hook_calls: usize,
    pub aborted: bool,
}

pub struct ScriptedEngine {
    metadata: Result<MediaInfo, String>,
    steps: Vec<Step>,
    gate: Option<Mutex<Receiver<()>>>,
    record: Mutex<Record>,
}

impl ScriptedEngine {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            metadata: Ok(MediaInfo {
                title: Some("Test Clip".into()),
                id: Some("BV1test".into()),
                entry_count: None,
            }),
            steps,
            gate: None,
            record: Mutex::new(Record::default()),
        }
    }

    pub fn with_metadata_error(mut self, message: &str) -> Self {
        self.metadata = Err(message.to_string());
        self
    }

    /// Block `download` until the returned sender is used (or dropped).
    pub fn gated(mut self) -> (Self, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        self.gate = Some(Mutex::new(rx));
        (self, tx)
    }

    pub fn record(&self) -> std::sync::MutexGuard<'_, Record> {
        self.record.lock().unwrap()
    }
}

/// Three downloading ticks of a 1 MB file, then `finished`.
pub fn typical_script() -> Vec<Step> {
    let total = 1_000_000;
    let mut steps: Vec<Step> = [250_000u64, 512_000, 900_000]
        .iter()
        .map(|done| {
            let mut u = ProgressUpdate::downloading(*done, Some(total));
            u.filename = Some("/out/Test Clip [BV1test].f30080.m4s".into());
            u.speed = Some(2.0 * 1024.0 * 1024.0);
            u.eta = Some(1);
            Step::Tick(u)
        })
        .collect();
    steps.push(Step::Tick(ProgressUpdate::finished()));
    steps
}

impl Engine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch_metadata(&self, opts: &EngineOptions, _url: &str) -> Result<MediaInfo, EngineError> {
        {
            let mut rec = self.record();
            rec.options = Some(opts.clone());
            let dir: Option<PathBuf> = opts.output_template.parent().map(PathBuf::from);
            rec.output_dir_existed = Some(dir.map_or(false, |d| d.is_dir()));
        }
        self.metadata.clone().map_err(|message| EngineError::Failed {
            code: Some(1),
            message,
        })
    }

    fn download(
        &self,
        _opts: &EngineOptions,
        _url: &str,
        hook: &mut ProgressHook<'_>,
    ) -> Result<(), EngineError> {
        self.record().download_called = true;
        if let Some(ref gate) = self.gate {
            let _ = gate.lock().unwrap().recv();
        }
        for step in &self.steps {
            match step {
                Step::Tick(update) => {
                    self.record().hook_calls += 1;
                    if let Err(aborted) = hook(update) {
                        self.record().aborted = true;
                        return Err(aborted.into());
                    }
                }
                Step::Fail(message) => {
                    return Err(EngineError::Failed {
                        code: Some(1),
                        message: message.clone(),
                    })
                }
                Step::Panic(message) => panic!("{}", message),
            }
        }
        Ok(())
    }
}
