// wallet-core/src/import/progress.rs
//
// Progress Tracker - (position, total) đơn điệu, bão hòa tại total

use serde::{Deserialize, Serialize};

/// Snapshot gửi cho `on_progress`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub position: u32,
    pub total: u32,
}

impl Progress {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.position >= self.total
    }
}

#[derive(Debug)]
pub struct ProgressTracker {
    position: u32,
    total: u32,
}

impl ProgressTracker {
    pub fn new(total: u32) -> Self {
        Self { position: 0, total }
    }

    /// Tiến 1 bước (không vượt total) và trả về snapshot
    pub fn tick(&mut self) -> Progress {
        if self.position < self.total {
            self.position += 1;
        }
        self.snapshot()
    }

    /// Ép position = total. Lần tick cuối do caller phát.
    pub fn finish(&mut self) {
        self.position = self.total;
    }

    #[inline]
    pub fn snapshot(&self) -> Progress {
        Progress {
            position: self.position,
            total: self.total,
        }
    }
}
