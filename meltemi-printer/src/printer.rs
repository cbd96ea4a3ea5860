//! Printer transports for sending ESC/POS data
//!
//! Supports:
//! - Network printers (raw TCP, port 9100)
//! - OS print spooler RAW jobs (USB/Bluetooth printers behind a driver)
//!
//! A transport delivers a finished byte buffer exactly once. No retry
//! or backoff happens here: a failed send is reported to the caller,
//! which decides whether to resubmit. Timeouts are the only defense
//! against a hung physical device.

use crate::error::{PrintError, PrintResult};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Default connect/write timeout for network printers
pub const NETWORK_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for printer transports
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// Network printer (raw TCP, port 9100)
///
/// Each print opens its own connection: write the full payload,
/// half-close the stream, then drop it. No pooling — thermal printers
/// handle one job at a time anyway.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer from host IP and port
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        let addr_str = format!("{}:{}", host, port);
        Self::from_addr(&addr_str)
    }

    /// Create from a socket address string (e.g., "192.168.1.100:9100")
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;

        Ok(Self {
            addr,
            timeout: NETWORK_TIMEOUT,
        })
    }

    /// Override the connect/write timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(data), fields(addr = %self.addr, data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Connecting to printer");

        let mut stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr, e)))?;

        info!("Connected, sending {} bytes", data.len());

        let write = async {
            stream.write_all(data).await?;
            stream.flush().await?;
            // Half-close signals end of job; waits for the write to be
            // acknowledged before the socket drops.
            stream.shutdown().await
        };

        tokio::time::timeout(self.timeout, write)
            .await
            .map_err(|_| PrintError::Timeout(format!("Write timeout: {}", self.addr)))?
            .map_err(|e| {
                PrintError::Io(std::io::Error::new(e.kind(), format!("Write failed: {}", e)))
            })?;

        info!("Print job sent successfully");
        Ok(())
    }

    #[instrument(fields(addr = %self.addr))]
    async fn is_online(&self) -> bool {
        let check_timeout = Duration::from_millis(500);

        match tokio::time::timeout(check_timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_)) => {
                info!("Printer online");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Printer offline");
                false
            }
            Err(_) => {
                warn!("Printer check timeout");
                false
            }
        }
    }
}

/// OS print spooler transport
///
/// USB and Bluetooth printers sit behind an installed driver; the
/// payload is handed to the spooler as a RAW datatype job addressed to
/// the printer's system name, so the driver passes the bytes through
/// untouched.
#[derive(Debug, Clone)]
pub struct SpoolerPrinter {
    name: String,
}

impl SpoolerPrinter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(windows)]
impl SpoolerPrinter {
    /// Check printer status with the spooler
    pub fn check_online(name: &str) -> PrintResult<bool> {
        use windows::Win32::Graphics::Printing::{
            ClosePrinter, GetPrinterW, OpenPrinterW, PRINTER_HANDLE, PRINTER_INFO_6,
            PRINTER_STATUS_OFFLINE,
        };
        use windows::core::PCWSTR;

        let name_w = to_wide(name);

        unsafe {
            let mut handle: PRINTER_HANDLE = PRINTER_HANDLE::default();
            OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
                .map_err(|_| PrintError::Spooler(format!("OpenPrinterW failed: {}", name)))?;

            let mut needed: u32 = 0;
            let _ = GetPrinterW(handle, 6, None, &mut needed);

            let mut online = true;
            if needed > 0 {
                let mut buf: Vec<u8> = vec![0; needed as usize];
                if GetPrinterW(handle, 6, Some(buf.as_mut_slice()), &mut needed).is_ok() {
                    let info = *(buf.as_ptr() as *const PRINTER_INFO_6);
                    online = (info.dwStatus & PRINTER_STATUS_OFFLINE) == 0;
                }
            }

            let _ = ClosePrinter(handle);
            Ok(online)
        }
    }

    /// Send raw data synchronously (for blocking contexts)
    pub fn print_sync(&self, data: &[u8]) -> PrintResult<()> {
        self.write_raw(data)
    }

    fn write_raw(&self, data: &[u8]) -> PrintResult<()> {
        use core::ffi::c_void;
        use windows::Win32::Graphics::Printing::{
            ClosePrinter, DOC_INFO_1W, EndDocPrinter, EndPagePrinter, OpenPrinterW, PRINTER_HANDLE,
            StartDocPrinterW, StartPagePrinter, WritePrinter,
        };
        use windows::core::{PCWSTR, PWSTR};

        unsafe {
            if !Self::check_online(&self.name).unwrap_or(true) {
                return Err(PrintError::Offline(self.name.clone()));
            }

            let mut handle: PRINTER_HANDLE = PRINTER_HANDLE::default();
            let name_w = to_wide(&self.name);

            OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
                .map_err(|_| PrintError::Spooler("OpenPrinterW failed".to_string()))?;

            let doc_name_w = to_wide("Receipt");
            let datatype_w = to_wide("RAW");
            let doc_info = DOC_INFO_1W {
                pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
                pOutputFile: PWSTR::null(),
                pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
            };

            if StartDocPrinterW(handle, 1, &doc_info as *const DOC_INFO_1W) == 0 {
                let _ = ClosePrinter(handle);
                return Err(PrintError::Spooler("StartDocPrinter failed".to_string()));
            }

            if !StartPagePrinter(handle).as_bool() {
                let _ = EndDocPrinter(handle);
                let _ = ClosePrinter(handle);
                return Err(PrintError::Spooler("StartPagePrinter failed".to_string()));
            }

            let mut written: u32 = 0;
            let ok = WritePrinter(
                handle,
                data.as_ptr() as *const c_void,
                data.len() as u32,
                &mut written,
            );

            let _ = EndPagePrinter(handle);
            let _ = EndDocPrinter(handle);
            let _ = ClosePrinter(handle);

            if !ok.as_bool() {
                return Err(PrintError::Spooler("WritePrinter failed".to_string()));
            }
            if written != data.len() as u32 {
                return Err(PrintError::Spooler("Incomplete write".to_string()));
            }

            Ok(())
        }
    }
}

#[cfg(windows)]
fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(windows)]
impl Printer for SpoolerPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        // Spooler calls are synchronous; run in a blocking task
        let printer = self.clone();
        let data = data.to_vec();

        tokio::task::spawn_blocking(move || printer.write_raw(&data))
            .await
            .map_err(|e| PrintError::Spooler(format!("Task join failed: {}", e)))?
    }

    async fn is_online(&self) -> bool {
        Self::check_online(&self.name).unwrap_or(false)
    }
}

#[cfg(not(windows))]
impl Printer for SpoolerPrinter {
    async fn print(&self, _data: &[u8]) -> PrintResult<()> {
        Err(PrintError::Spooler(format!(
            "Spooler printing not supported on this platform: {}",
            self.name
        )))
    }

    async fn is_online(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_printer_new() {
        let printer = NetworkPrinter::new("192.168.1.100", 9100).unwrap();
        assert_eq!(printer.addr().port(), 9100);
    }

    #[test]
    fn test_network_printer_from_addr() {
        let printer = NetworkPrinter::from_addr("192.168.1.100:9100").unwrap();
        assert_eq!(printer.addr().port(), 9100);
    }

    #[test]
    fn test_invalid_addr() {
        assert!(NetworkPrinter::from_addr("invalid").is_err());
        assert!(NetworkPrinter::new("not an ip", 9100).is_err());
    }

    #[test]
    fn test_default_timeout_is_ten_seconds() {
        let printer = NetworkPrinter::from_addr("10.0.0.5:9100").unwrap();
        assert_eq!(printer.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_unreachable_printer_fails_within_timeout() {
        // TEST-NET-1 address: connection will not succeed
        let printer = NetworkPrinter::from_addr("192.0.2.1:9100")
            .unwrap()
            .with_timeout(Duration::from_millis(300));

        let start = std::time::Instant::now();
        let result = printer.print(b"\x1B\x40test").await;
        assert!(result.is_err());
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_spooler_stub_errors_off_windows() {
        if cfg!(not(windows)) {
            let printer = SpoolerPrinter::new("Front Desk");
            let err = printer.print(b"data").await.unwrap_err();
            assert!(matches!(err, PrintError::Spooler(_)));
            assert!(!printer.is_online().await);
        }
    }
}
