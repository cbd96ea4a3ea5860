//! Receipt and printer configuration
//!
//! All of this is read-only at print time: the settings store hands a
//! snapshot to the composer and dispatcher, and a job never observes a
//! mid-flight change. Validation is fail-fast — a network printer with
//! no address is rejected before any encoding work begins.

use meltemi_printer::PaperProfile;
use serde::{Deserialize, Serialize};

use crate::dispatch::DispatchError;

/// Receipt language, driving translations and date formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    El,
}

/// Receipt template variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    /// Plain horizontal-rule dividers, uniform sizes
    #[default]
    Classic,
    /// Filled "pill" box headers for section titles and totals
    Modern,
}

/// How Greek text reaches the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Code-page text (windows-1253); requires printer firmware support
    #[default]
    Text,
    /// Rasterized with a system font; works on any printer
    Bitmap,
}

/// Physical transport for a configured printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Network,
    Usb,
    Bluetooth,
}

/// A configured physical printer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterSettings {
    pub transport: Transport,
    /// Network address, required for `Transport::Network`
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    /// OS printer name, required for USB/Bluetooth (spooler) printers
    #[serde(default)]
    pub device_name: Option<String>,
}

fn default_port() -> u16 {
    9100
}

impl PrinterSettings {
    pub fn network(ip: impl Into<String>, port: u16) -> Self {
        Self {
            transport: Transport::Network,
            ip: Some(ip.into()),
            port,
            device_name: None,
        }
    }

    pub fn spooler(transport: Transport, device_name: impl Into<String>) -> Self {
        Self {
            transport,
            ip: None,
            port: default_port(),
            device_name: Some(device_name.into()),
        }
    }

    /// Reject configurations that cannot possibly reach a device
    pub fn validate(&self) -> Result<(), DispatchError> {
        match self.transport {
            Transport::Network => {
                if self.ip.as_deref().is_none_or(str::is_empty) {
                    return Err(DispatchError::ConfigurationMissing(
                        "Network printer selected but no IP configured".to_string(),
                    ));
                }
            }
            Transport::Usb | Transport::Bluetooth => {
                if self.device_name.as_deref().is_none_or(str::is_empty) {
                    return Err(DispatchError::ConfigurationMissing(
                        "Spooler printer selected but no device name configured".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Store branding and rendering policy for receipt documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptConfig {
    /// Paper roll width in millimeters (58, 80 or 112)
    #[serde(default = "default_paper_mm")]
    pub paper_mm: u16,
    #[serde(default)]
    pub language: Language,
    /// ISO currency code or literal symbol
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub variant: TemplateVariant,
    #[serde(default)]
    pub greek_render: RenderMode,
    #[serde(default)]
    pub store_name: String,
    /// Free-form branding lines printed under the store name
    #[serde(default)]
    pub header_lines: Vec<String>,
    /// Free-form lines printed at the bottom of sale receipts
    #[serde(default)]
    pub footer_lines: Vec<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// IANA timezone for receipt timestamps
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Kick the cash drawer after printing a sale receipt
    #[serde(default)]
    pub open_drawer: bool,
}

fn default_paper_mm() -> u16 {
    80
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_timezone() -> String {
    "Europe/Athens".to_string()
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            paper_mm: default_paper_mm(),
            language: Language::default(),
            currency: default_currency(),
            variant: TemplateVariant::default(),
            greek_render: RenderMode::default(),
            store_name: String::new(),
            header_lines: Vec::new(),
            footer_lines: Vec::new(),
            logo_url: None,
            timezone: default_timezone(),
            open_drawer: false,
        }
    }
}

impl ReceiptConfig {
    /// Resolve the paper profile, falling back to 80mm for unknown widths
    pub fn profile(&self) -> PaperProfile {
        PaperProfile::from_mm(self.paper_mm).unwrap_or(PaperProfile::MM80)
    }

    /// Resolve the configured timezone, falling back to UTC
    pub fn tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_network_requires_ip() {
        let mut settings = PrinterSettings::network("192.168.1.50", 9100);
        assert!(settings.validate().is_ok());

        settings.ip = None;
        assert!(matches!(
            settings.validate(),
            Err(DispatchError::ConfigurationMissing(_))
        ));

        settings.ip = Some(String::new());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_spooler_requires_name() {
        let settings = PrinterSettings::spooler(Transport::Usb, "EPSON TM-T20III");
        assert!(settings.validate().is_ok());

        let mut settings = settings;
        settings.device_name = None;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_profile_fallback() {
        let mut config = ReceiptConfig::default();
        assert_eq!(config.profile(), PaperProfile::MM80);

        config.paper_mm = 58;
        assert_eq!(config.profile(), PaperProfile::MM58);

        config.paper_mm = 77; // unknown width
        assert_eq!(config.profile(), PaperProfile::MM80);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ReceiptConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.paper_mm, 80);
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.language, Language::En);
        assert_eq!(config.greek_render, RenderMode::Text);
    }

    #[test]
    fn test_transport_tags() {
        let settings: PrinterSettings =
            serde_json::from_str(r#"{"transport":"network","ip":"10.0.0.9"}"#).unwrap();
        assert_eq!(settings.transport, Transport::Network);
        assert_eq!(settings.port, 9100);
    }
}
