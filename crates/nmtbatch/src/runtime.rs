//! # Runtime Configuration
//!
//! Device placement and random seeding are explicit configuration,
//! passed to the components that use them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{NBResult, NmtBatchError};

/// The default shuffle seed.
pub const DEFAULT_SEED: u64 = 1337;

/// A device placement hint.
///
/// Text pipelines do not place data; the hint is attached to batches
/// and forwarded to translation services.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Device {
    /// Host CPU.
    #[default]
    Cpu,

    /// CUDA accelerators; an empty ordinal list means "all visible".
    Cuda(Vec<usize>),
}

impl Device {
    /// Is this an accelerator device?
    pub fn is_accelerator(&self) -> bool {
        matches!(self, Device::Cuda(_))
    }
}

impl fmt::Display for Device {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(ordinals) if ordinals.is_empty() => write!(f, "cuda"),
            Device::Cuda(ordinals) => {
                let ordinals: Vec<String> = ordinals.iter().map(|o| o.to_string()).collect();
                write!(f, "cuda:{}", ordinals.join(","))
            }
        }
    }
}

impl FromStr for Device {
    type Err = NmtBatchError;

    /// Parse `"cpu"`, `"cuda"`, `"cuda:0,1"`, or a bare ordinal list `"0,1"`.
    fn from_str(s: &str) -> NBResult<Self> {
        let s = s.trim();
        let ordinals = match s.to_ascii_lowercase().as_str() {
            "cpu" => return Ok(Device::Cpu),
            "cuda" | "gpu" => return Ok(Device::Cuda(Vec::new())),
            lower => lower
                .strip_prefix("cuda:")
                .or_else(|| lower.strip_prefix("gpu:"))
                .unwrap_or(lower)
                .to_string(),
        };

        ordinals
            .split(',')
            .map(|o| {
                o.trim()
                    .parse::<usize>()
                    .map_err(|e| NmtBatchError::Parse(format!("device {s:?}: {e}")))
            })
            .collect::<NBResult<Vec<_>>>()
            .map(Device::Cuda)
    }
}

impl From<Device> for String {
    fn from(device: Device) -> Self {
        device.to_string()
    }
}

impl TryFrom<String> for Device {
    type Error = NmtBatchError;

    fn try_from(value: String) -> NBResult<Self> {
        value.parse()
    }
}

/// Process-wide configuration, passed explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// The device placement hint.
    pub device: Device,

    /// The shuffle seed.
    pub seed: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            device: Device::Cpu,
            seed: DEFAULT_SEED,
        }
    }
}

impl RuntimeConfig {
    /// Sets the device.
    pub fn with_device(
        mut self,
        device: Device,
    ) -> Self {
        self.device = device;
        self
    }

    /// Sets the shuffle seed.
    pub fn with_seed(
        mut self,
        seed: u64,
    ) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_parse() {
        assert_eq!("cpu".parse::<Device>().unwrap(), Device::Cpu);
        assert_eq!("CUDA".parse::<Device>().unwrap(), Device::Cuda(vec![]));
        assert_eq!("cuda:0,1".parse::<Device>().unwrap(), Device::Cuda(vec![0, 1]));
        assert_eq!("0, 1".parse::<Device>().unwrap(), Device::Cuda(vec![0, 1]));
        assert!("tpu".parse::<Device>().is_err());
    }

    #[test]
    fn test_device_display_roundtrip() {
        for device in [Device::Cpu, Device::Cuda(vec![]), Device::Cuda(vec![2, 3])] {
            assert_eq!(device.to_string().parse::<Device>().unwrap(), device);
        }
        assert!(Device::Cuda(vec![0]).is_accelerator());
        assert!(!Device::Cpu.is_accelerator());
    }

    #[test]
    fn test_runtime_config() {
        let config = RuntimeConfig::default()
            .with_device(Device::Cuda(vec![1]))
            .with_seed(7);
        assert_eq!(config.seed, 7);
        assert_eq!(serde_json::to_string(&config.device).unwrap(), "\"cuda:1\"");
    }
}
