mod kv;
mod reminder_state;

pub use kv::{FileKVRepo, IKVRepo, InMemoryKVRepo};
pub use reminder_state::ReminderStateRepo;
use std::{path::PathBuf, sync::Arc};
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub kv_repo: Arc<dyn IKVRepo>,
    pub reminder_state_repo: ReminderStateRepo,
}

impl Repos {
    fn create(kv_repo: Arc<dyn IKVRepo>) -> Self {
        Self {
            reminder_state_repo: ReminderStateRepo::new(kv_repo.clone()),
            kv_repo,
        }
    }

    pub fn create_file(state_dir: PathBuf) -> Self {
        info!("Reminder state is stored in: {}", state_dir.display());
        Self::create(Arc::new(FileKVRepo::new(state_dir)))
    }

    pub fn create_inmemory() -> Self {
        Self::create(Arc::new(InMemoryKVRepo::new()))
    }
}
