use std::{fs::File, io::BufReader, path::Path};

use snafu::ResultExt;

use crate::common::{Result, SyncSnafu};
use crate::resources::RRSetSpec;

/// Reads desired record sets from a JSON array and validates each one.
pub fn read_desired(source: &Path) -> Result<Vec<RRSetSpec>> {
    let file = File::open(source).boxed().context(SyncSnafu {
        message: format!("Failed to open source {}", source.display()),
    })?;

    let reader = BufReader::new(file);
    let desired: Vec<RRSetSpec> = serde_json::from_reader(reader)
        .boxed()
        .context(SyncSnafu {
            message: format!("Failed to read record sets from {}", source.display()),
        })?;

    for rrset in desired.iter() {
        rrset.validate()?;
    }

    tracing::info!(
        source = source.display().to_string(),
        rrsets = desired.len(),
        "Read desired state",
    );
    Ok(desired)
}
