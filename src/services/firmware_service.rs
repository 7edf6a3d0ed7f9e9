use std::io;
use std::path::PathBuf;

use tokio::fs;
use tokio::sync::Mutex;

use crate::configs::Firmware;
use crate::errors::FirmwareError;
use crate::models::FirmwareVersion;

const IMAGE_FILE: &str = "firmware.bin";
const MARKER_FILE: &str = "version.txt";

/// The firmware slot: one binary image plus a version marker under a
/// configured directory. Uploads are serialized because bumping the marker
/// is a read-then-write sequence.
pub struct FirmwareService {
    dir: PathBuf,
    upload_lock: Mutex<()>,
}

impl FirmwareService {
    pub fn new(firmware: Firmware) -> Self {
        Self {
            dir: firmware.dir,
            upload_lock: Mutex::new(()),
        }
    }

    /// Replace the current image with `image` and bump the patch component
    /// of the version marker. Both files are written to a temp path and
    /// renamed into place, so a crashed upload never leaves a torn slot.
    pub async fn store(&self, image: &[u8]) -> Result<FirmwareVersion, FirmwareError> {
        let _guard = self.upload_lock.lock().await;

        fs::create_dir_all(&self.dir).await?;

        let current = self
            .read_marker()
            .await?
            .unwrap_or(FirmwareVersion::INITIAL);
        let next = current.bump_patch();

        self.replace_file(IMAGE_FILE, image).await?;
        self.replace_file(MARKER_FILE, next.to_string().as_bytes())
            .await?;

        tracing::info!(version = %next, bytes = image.len(), "firmware image replaced");

        Ok(next)
    }

    /// Bytes of the current image, or `None` when nothing was uploaded yet.
    pub async fn current_image(&self) -> Result<Option<Vec<u8>>, FirmwareError> {
        match fs::read(self.dir.join(IMAGE_FILE)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn current_version(&self) -> Result<Option<FirmwareVersion>, FirmwareError> {
        self.read_marker().await
    }

    async fn read_marker(&self) -> Result<Option<FirmwareVersion>, FirmwareError> {
        match fs::read_to_string(self.dir.join(MARKER_FILE)).await {
            Ok(raw) => Ok(Some(raw.parse()?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn replace_file(&self, name: &str, bytes: &[u8]) -> Result<(), io::Error> {
        let target = self.dir.join(name);
        let staging = self.dir.join(format!("{name}.tmp"));

        fs::write(&staging, bytes).await?;
        fs::rename(&staging, &target).await?;

        Ok(())
    }
}
