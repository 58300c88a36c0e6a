use super::IKVRepo;
use std::{io::ErrorKind, path::PathBuf};
use tokio::fs;

/// Stores every key as `<dir>/<key>.json`.
///
/// Writes go to a temporary file which is then renamed over the old value,
/// so a crash never leaves a half written value behind.
pub struct FileKVRepo {
    dir: PathBuf,
}

impl FileKVRepo {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self, key: &str) -> anyhow::Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(anyhow::Error::msg(format!("Invalid key: {}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait::async_trait]
impl IKVRepo for FileKVRepo {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        match fs::read_to_string(self.path(key)?).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path(key)?;
        let tmp_path = self.dir.join(format!("{}.json.tmp", key));
        fs::create_dir_all(&self.dir).await?;
        fs::write(&tmp_path, value).await?;
        fs::rename(&tmp_path, &path).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        match fs::remove_file(self.path(key)?).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_survives_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileKVRepo::new(dir.path().to_path_buf());
        repo.set("notified", "{}").await.unwrap();

        let reopened = FileKVRepo::new(dir.path().to_path_buf());
        assert_eq!(
            reopened.get("notified").await.unwrap(),
            Some("{}".to_string())
        );
    }

    #[tokio::test]
    async fn it_rejects_keys_that_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileKVRepo::new(dir.path().to_path_buf());
        assert!(repo.set("../config", "{}").await.is_err());
        assert!(repo.get("").await.is_err());
    }
}
