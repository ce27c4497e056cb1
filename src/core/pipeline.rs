//! The extraction pipeline.
//!
//! ```text
//! Init → StoreAvailabilityChecked → ConfigRootResolved → ConfigLoaded
//!      → CiphertextValidated → Decrypted → OutputWritten → Done
//! ```
//!
//! The first failing step ends the run; nothing is retried. Secret storage
//! availability and root resolution both happen before any file is read.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::core::ciphertext;
use crate::core::locator::{self, ConfigLocator};
use crate::core::sink;
use crate::core::store::{self, SafeStorage};
use crate::error::{Error, Result};

/// Progress through a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    StoreAvailabilityChecked,
    ConfigRootResolved,
    ConfigLoaded,
    CiphertextValidated,
    Decrypted,
    OutputWritten,
    Done,
}

pub struct Pipeline {
    locator: ConfigLocator,
    store: Box<dyn SafeStorage>,
    stage: Stage,
}

impl Pipeline {
    pub fn new(locator: ConfigLocator, store: Box<dyn SafeStorage>) -> Self {
        Self {
            locator,
            store,
            stage: Stage::Init,
        }
    }

    /// Last stage reached. After a failed run this is where it stopped.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run every stage, writing the key to `destination` or `stdout`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that fails.
    pub fn run(&mut self, destination: Option<&Path>, stdout: &mut dyn Write) -> Result<()> {
        let result = self.steps(destination, stdout);
        if let Err(e) = &result {
            debug!(stage = ?self.stage, kind = ?e.kind(), "pipeline stopped");
        }
        result
    }

    fn steps(&mut self, destination: Option<&Path>, stdout: &mut dyn Write) -> Result<()> {
        debug!(backend = self.store.name(), "checking secret storage");
        if !self.store.is_available() {
            return Err(Error::SecretStoreUnavailable(format!(
                "{} is not usable in this session",
                self.store.name()
            )));
        }
        self.advance(Stage::StoreAvailabilityChecked);

        let path = self.locator.resolve()?;
        debug!(path = %path.display(), "looking for Signal config");
        self.advance(Stage::ConfigRootResolved);

        locator::ensure_exists(&path)?;
        let record = locator::load(&path)?;
        self.advance(Stage::ConfigLoaded);

        let hex = ciphertext::extract(&record)?;
        let blob = ciphertext::decode(&hex)?;
        self.advance(Stage::CiphertextValidated);

        let secret = store::decrypt(self.store.as_ref(), &blob)?;
        self.advance(Stage::Decrypted);

        sink::write(&secret, destination, stdout)?;
        self.advance(Stage::OutputWritten);

        self.advance(Stage::Done);
        Ok(())
    }

    fn advance(&mut self, next: Stage) {
        debug!(from = ?self.stage, to = ?next, "stage complete");
        self.stage = next;
    }
}
