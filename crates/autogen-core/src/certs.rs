//! Self-signed certificate generation with the openssl found in the
//! dependency manifest.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::runner::Invocation;

/// One key/certificate pair to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertTarget {
    /// Shown to the operator before generation.
    pub label: String,
    pub key: String,
    pub cert: String,
}

impl CertTarget {
    pub fn new(label: &str, key: &str, cert: &str) -> Self {
        Self {
            label: label.to_string(),
            key: key.to_string(),
            cert: cert.to_string(),
        }
    }
}

pub fn default_targets() -> Vec<CertTarget> {
    vec![
        CertTarget::new(
            "example webserver",
            "./etc/example-webserver-data/key.pem",
            "./etc/example-webserver-data/cert.pem",
        ),
        CertTarget::new(
            "sci-bat-service",
            "./etc/sci-bat-app-dir/conf/key.pem",
            "./etc/sci-bat-app-dir/conf/cert.pem",
        ),
    ]
}

/// `openssl req` producing an unencrypted RSA-2048 key and a one-year
/// self-signed certificate for `localhost`.
pub fn self_signed(openssl: &Path, config: &str, target: &CertTarget, root: &Path) -> Invocation {
    Invocation::new(openssl.display().to_string())
        .args(["req", "-config", config, "-x509", "-newkey", "rsa:2048"])
        .args(["-keyout", target.key.as_str(), "-out", target.cert.as_str()])
        .args(["-sha256", "-days", "365", "-nodes", "-subj", "/CN=localhost"])
        .current_dir(root)
}
