use crate::config::TlsConfig;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::TlsAcceptor;

/// Build a TLS acceptor from PEM certificate chain and private key files.
pub(crate) fn load_acceptor(tls: &TlsConfig) -> Result<TlsAcceptor> {
    let certs = load_certs(&tls.cert_file)?;
    let key = load_key(&tls.key_file)?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| Error::Tls(e.to_string()))?;

    Ok(TlsAcceptor::from(Arc::new(config)))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::Tls(format!("{}: {}", path.display(), e)))
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>> {
    let certs = rustls_pemfile::certs(&mut open(path)?)
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::Tls(format!("{}: {}", path.display(), e)))?;
    if certs.is_empty() {
        return Err(Error::Tls(format!(
            "{}: no certificates found",
            path.display()
        )));
    }
    Ok(certs)
}

fn load_key(path: &Path) -> Result<PrivateKeyDer<'static>> {
    rustls_pemfile::private_key(&mut open(path)?)
        .map_err(|e| Error::Tls(format!("{}: {}", path.display(), e)))?
        .ok_or_else(|| Error::Tls(format!("{}: no private key found", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_self_signed(dir: &Path) -> TlsConfig {
        let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let tls = TlsConfig {
            cert_file: dir.join("cert.pem"),
            key_file: dir.join("key.pem"),
        };
        fs::write(&tls.cert_file, certified.cert.pem()).unwrap();
        fs::write(&tls.key_file, certified.key_pair.serialize_pem()).unwrap();
        tls
    }

    #[test]
    fn self_signed_pair_builds_acceptor() {
        let temp = TempDir::new().unwrap();
        let tls = write_self_signed(temp.path());
        assert!(load_acceptor(&tls).is_ok());
    }

    #[test]
    fn key_file_without_key_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut tls = write_self_signed(temp.path());
        tls.key_file = tls.cert_file.clone();
        let err = load_acceptor(&tls).err().unwrap();
        assert!(matches!(err, Error::Tls(msg) if msg.contains("no private key")));
    }

    #[test]
    fn missing_files_are_reported() {
        let temp = TempDir::new().unwrap();
        let tls = TlsConfig {
            cert_file: temp.path().join("cert.pem"),
            key_file: temp.path().join("key.pem"),
        };
        let err = load_acceptor(&tls).err().unwrap();
        assert!(matches!(err, Error::Tls(msg) if msg.contains("cert.pem")));
    }

    #[test]
    fn pem_without_certificates_is_rejected() {
        let temp = TempDir::new().unwrap();
        let cert = temp.path().join("cert.pem");
        fs::write(&cert, "not a certificate\n").unwrap();
        let tls = TlsConfig {
            cert_file: cert,
            key_file: temp.path().join("key.pem"),
        };
        let err = load_acceptor(&tls).err().unwrap();
        assert!(matches!(err, Error::Tls(msg) if msg.contains("no certificates")));
    }
}
