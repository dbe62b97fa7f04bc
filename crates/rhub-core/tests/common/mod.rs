#![allow(dead_code)]

pub mod api_server;

use rhub_core::retry::Sleeper;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records requested delays instead of sleeping. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper(Arc<Mutex<Vec<Duration>>>);

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.0.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, delay: Duration) {
        self.0.lock().unwrap().push(delay);
    }
}
