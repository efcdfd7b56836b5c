use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use super::{DeliveryError, DeliveryReport, DeliverySink};

/// Default export file name.
pub const EXPORT_FILE_NAME: &str = "export.json";

/// Owner read/write, group and other read.
#[cfg(unix)]
const EXPORT_FILE_MODE: u32 = 0o644;

/// Writes the document to a local file, replacing any previous export.
#[derive(Debug, Clone)]
pub struct FileSink {
    destination: PathBuf,
}

impl FileSink {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// `export.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(EXPORT_FILE_NAME))
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    async fn write(&self, payload: &[u8]) -> std::io::Result<()> {
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(EXPORT_FILE_MODE);

        let mut file = options.open(&self.destination).await?;
        file.write_all(payload).await?;
        file.flush().await?;

        // `mode` only applies on creation and is subject to the umask.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(
                &self.destination,
                std::fs::Permissions::from_mode(EXPORT_FILE_MODE),
            )
            .await?;
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl DeliverySink for FileSink {
    fn describe(&self) -> String {
        format!("file {}", self.destination.display())
    }

    async fn deliver(&self, payload: &[u8]) -> Result<DeliveryReport, DeliveryError> {
        tracing::info!(path = %self.destination.display(), "writing data to file");

        self.write(payload)
            .await
            .map_err(|source| DeliveryError::FileWrite {
                path: self.destination.clone(),
                source,
            })?;

        tracing::info!(bytes = payload.len(), "done");
        Ok(DeliveryReport::Written {
            path: self.destination.clone(),
            bytes: payload.len(),
        })
    }
}
