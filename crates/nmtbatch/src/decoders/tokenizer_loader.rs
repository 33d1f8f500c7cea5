//! # Tokenizer Loading

use std::{path::Path, sync::Arc};

use tokenizers::Tokenizer;

use crate::errors::{NBResult, NmtBatchError};

/// Load a [`Tokenizer`] from a `tokenizer.json` file.
pub fn load_tokenizer_path<P: AsRef<Path>>(path: P) -> NBResult<Arc<Tokenizer>> {
    let path = path.as_ref();
    log::debug!("loading tokenizer: {}", path.display());

    Tokenizer::from_file(path)
        .map(Arc::new)
        .map_err(|e| NmtBatchError::Tokenizer(format!("{}: {e}", path.display())))
}

/// Load a [`Tokenizer`] by local path, or by hub model name.
///
/// Names which are not existing files are resolved through the hub
/// when the "hub" feature is enabled.
pub fn load_tokenizer(name: &str) -> NBResult<Arc<Tokenizer>> {
    if Path::new(name).exists() {
        return load_tokenizer_path(name);
    }

    load_hub_tokenizer(name)
}

#[cfg(feature = "hub")]
fn load_hub_tokenizer(name: &str) -> NBResult<Arc<Tokenizer>> {
    log::info!("fetching tokenizer: {name}");
    Tokenizer::from_pretrained(name, None)
        .map(Arc::new)
        .map_err(|e| NmtBatchError::Tokenizer(format!("{name}: {e}")))
}

#[cfg(not(feature = "hub"))]
fn load_hub_tokenizer(name: &str) -> NBResult<Arc<Tokenizer>> {
    Err(NmtBatchError::Tokenizer(format!(
        "tokenizer file not found: {name}"
    )))
}
