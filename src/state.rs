use std::sync::Arc;

use crate::config::Timeouts;
use crate::tasks::repository::Deadline;
use crate::tasks::TaskUseCase;

#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<dyn TaskUseCase>,
    pub timeouts: Timeouts,
}

impl AppState {
    pub fn new(tasks: Arc<dyn TaskUseCase>, timeouts: Timeouts) -> Self {
        Self { tasks, timeouts }
    }

    pub fn read_deadline(&self) -> Deadline {
        Deadline::after(self.timeouts.read)
    }

    pub fn write_deadline(&self) -> Deadline {
        Deadline::after(self.timeouts.write)
    }
}
