use std::sync::Arc;
use tracing::{debug, warn};

use crate::record::CaptureRecord;
use crate::stamp::{Compositor, RenderBackend, StampError, StampedImage};

/// One capture event: the source frame, its metadata and the latest stamped
/// output. Stamping runs immediately; a late address triggers a full re-run
/// whose output replaces the previous one.
pub struct CaptureSession<B> {
    compositor: Arc<Compositor<B>>,
    source: Vec<u8>,
    record: CaptureRecord,
    output: Option<StampedImage>,
}

impl<B> CaptureSession<B>
where
    B: RenderBackend + Clone + Send + 'static,
    B::Surface: Send + 'static,
{
    pub fn new(compositor: Arc<Compositor<B>>, source: Vec<u8>, record: CaptureRecord) -> Self {
        Self {
            compositor,
            source,
            record,
            output: None,
        }
    }

    pub fn record(&self) -> &CaptureRecord {
        &self.record
    }

    /// Latest successful output, if any
    pub fn output(&self) -> Option<&StampedImage> {
        self.output.as_ref()
    }

    /// Stamp the current record. On failure the previous output is kept.
    pub async fn stamp(&mut self) -> Result<&StampedImage, StampError> {
        let stamped = self
            .compositor
            .stamp_async(self.source.clone(), &self.record)
            .await?;
        debug!(capture_id = %self.record.id, "Replacing session output");
        Ok(self.output.insert(stamped))
    }

    /// Attach a resolved address and stamp again from scratch.
    pub async fn resolve_address(
        &mut self,
        address: impl Into<String>,
    ) -> Result<&StampedImage, StampError> {
        if !self.record.set_address(address) {
            warn!(
                capture_id = %self.record.id,
                "Address resolved for a capture without a location fix, ignoring"
            );
        }
        self.stamp().await
    }
}
