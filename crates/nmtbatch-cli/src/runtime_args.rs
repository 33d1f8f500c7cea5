use nmtbatch::{Device, RuntimeConfig, runtime::DEFAULT_SEED};

/// Device and seed arg group.
#[derive(clap::Args, Debug)]
pub struct RuntimeArgs {
    /// Device hint: "cpu", "cuda", or "cuda:0,1".
    #[arg(long, default_value = "cpu")]
    device: Device,

    /// Shuffle seed.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

impl RuntimeArgs {
    /// Build the runtime configuration.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig::default()
            .with_device(self.device.clone())
            .with_seed(self.seed)
    }
}
