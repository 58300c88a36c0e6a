use super::IKVRepo;
use std::{collections::HashMap, sync::Mutex};

pub struct InMemoryKVRepo {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryKVRepo {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryKVRepo {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow::Error::msg("InMemoryKVRepo lock poisoned")
}

#[async_trait::async_trait]
impl IKVRepo for InMemoryKVRepo {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let values = self.values.lock().map_err(poisoned)?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self.values.lock().map_err(poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let mut values = self.values.lock().map_err(poisoned)?;
        values.remove(key);
        Ok(())
    }
}
