//! Job dispatch
//!
//! Takes a fully composed payload and pushes it through the configured
//! transport, one independent attempt per copy. A failed copy never
//! aborts the remaining ones and there is no internal retry; the caller
//! sees exactly what happened to each copy and decides what to do.

use meltemi_printer::{NetworkPrinter, PrintError, Printer, SpoolerPrinter};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::config::{PrinterSettings, Transport};

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The settings cannot possibly reach a device; caught before any
    /// composition or connection work is spent
    #[error("printer configuration missing: {0}")]
    ConfigurationMissing(String),
    #[error(transparent)]
    Transport(#[from] PrintError),
}

/// A composed payload bound for one printer
#[derive(Debug, Clone)]
pub struct PrintJob {
    /// Complete ESC/POS byte stream for a single copy
    pub payload: Vec<u8>,
    pub copies: u32,
    pub settings: PrinterSettings,
}

impl PrintJob {
    pub fn new(payload: Vec<u8>, settings: PrinterSettings) -> Self {
        Self {
            payload,
            copies: 1,
            settings,
        }
    }

    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies = copies.max(1);
        self
    }
}

/// Result of one copy attempt
#[derive(Debug)]
pub struct CopyOutcome {
    /// Zero-based copy index
    pub copy: u32,
    pub result: Result<(), PrintError>,
}

impl CopyOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcome of a whole job, one entry per requested copy
#[derive(Debug)]
pub struct DispatchReport {
    pub outcomes: Vec<CopyOutcome>,
}

impl DispatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(CopyOutcome::succeeded)
    }

    pub fn failed_copies(&self) -> Vec<u32> {
        self.outcomes
            .iter()
            .filter(|o| !o.succeeded())
            .map(|o| o.copy)
            .collect()
    }
}

enum ConfiguredPrinter {
    Network(NetworkPrinter),
    Spooler(SpoolerPrinter),
}

impl ConfiguredPrinter {
    fn from_settings(settings: &PrinterSettings) -> Result<Self, DispatchError> {
        settings.validate()?;
        match settings.transport {
            Transport::Network => {
                let ip = settings.ip.as_deref().unwrap_or_default();
                Ok(Self::Network(NetworkPrinter::new(ip, settings.port)?))
            }
            Transport::Usb | Transport::Bluetooth => {
                let name = settings.device_name.as_deref().unwrap_or_default();
                Ok(Self::Spooler(SpoolerPrinter::new(name)))
            }
        }
    }
}

impl Printer for ConfiguredPrinter {
    async fn print(&self, data: &[u8]) -> Result<(), PrintError> {
        match self {
            Self::Network(p) => p.print(data).await,
            Self::Spooler(p) => p.print(data).await,
        }
    }

    async fn is_online(&self) -> bool {
        match self {
            Self::Network(p) => p.is_online().await,
            Self::Spooler(p) => p.is_online().await,
        }
    }
}

#[derive(Debug, Default)]
pub struct Dispatcher;

impl Dispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the transport from the job settings and send every copy
    #[instrument(skip(self, job), fields(copies = job.copies, bytes = job.payload.len()))]
    pub async fn dispatch(&self, job: &PrintJob) -> Result<DispatchReport, DispatchError> {
        let printer = ConfiguredPrinter::from_settings(&job.settings)?;
        Ok(self.dispatch_with(job, &printer).await)
    }

    /// Send every copy of `job` through an already resolved printer
    pub async fn dispatch_with<P: Printer>(&self, job: &PrintJob, printer: &P) -> DispatchReport {
        let mut outcomes = Vec::with_capacity(job.copies as usize);
        for copy in 0..job.copies {
            let result = printer.print(&job.payload).await;
            match &result {
                Ok(()) => info!(copy, "copy printed"),
                Err(e) => warn!(copy, error = %e, "copy failed"),
            }
            outcomes.push(CopyOutcome { copy, result });
        }
        let report = DispatchReport { outcomes };
        if !report.all_succeeded() {
            error!(failed = ?report.failed_copies(), "job finished with failures");
        }
        report
    }
}
