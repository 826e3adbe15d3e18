use infrakit_tlsutils::tls::*;
use infrakit_tlsutils::{FileHandle, LocalFile};

fn pair() -> CertKeyPair {
    create_self_signed_certificate(&X509CreateCertificateOptions::new("files.example.com")).unwrap()
}

#[test]
fn test_write_and_load_pem_files() {
    let dir = tempfile::tempdir().unwrap();
    let cert_file = LocalFile::new(dir.path().join("server.crt"));
    let key_file = LocalFile::new(dir.path().join("server.key"));
    let original = pair();

    original.write_pem_files(&cert_file, &key_file).unwrap();
    assert!(cert_file.exists().unwrap());
    assert!(cert_file.read_as_string().unwrap().contains("BEGIN CERTIFICATE"));
    assert!(key_file.read_as_string().unwrap().contains("BEGIN PRIVATE KEY"));

    let loaded = CertKeyPair::load_pem_files(&cert_file, &key_file).unwrap();
    assert_eq!(loaded, original);
}

#[cfg(unix)]
#[test]
fn test_key_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let (_, key_path) = pair().write_to_directory(dir.path(), "ca").unwrap();

    let mode = std::fs::metadata(key_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_directory_round_trip_creates_missing_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("pki").join("issued");
    let original = pair();

    let (cert_path, key_path) = original.write_to_directory(&nested, "web").unwrap();
    assert_eq!(cert_path, nested.join("web.crt"));
    assert_eq!(key_path, nested.join("web.key"));

    let loaded = CertKeyPair::load_from_directory(&nested, "web").unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_loading_missing_files_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = CertKeyPair::load_from_directory(dir.path(), "absent").unwrap_err();
    assert!(matches!(err, TlsError::FileOperation(_)));
}

#[test]
fn test_bad_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    assert!(pair().write_to_directory(dir.path(), "../escape").is_err());
    assert!(pair().write_to_directory(dir.path(), "").is_err());
}
