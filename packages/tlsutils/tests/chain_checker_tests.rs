use std::time::{Duration, SystemTime};

use infrakit_tlsutils::tls::*;

struct Chain {
    root: CertKeyPair,
    intermediate: CertKeyPair,
    leaf: CertKeyPair,
}

fn issue_chain(leaf_options: X509CreateCertificateOptions) -> Chain {
    let root = create_root_ca_certificate(
        &X509CreateCertificateOptions::new("Chain Root CA").with_organization("Infrakit"),
    )
    .unwrap();
    let intermediate = create_signed_intermediate_certificate(
        &X509CreateCertificateOptions::new("Chain Intermediate CA").with_organization("Infrakit"),
        &root,
    )
    .unwrap();
    let leaf = create_signed_end_entity_certificate(&leaf_options, &intermediate).unwrap();
    Chain {
        root,
        intermediate,
        leaf,
    }
}

fn pem_of(pairs: &[&CertKeyPair]) -> String {
    pairs.iter().map(|p| p.certificate_pem()).collect()
}

#[test]
fn test_valid_chain_passes() {
    let chain = issue_chain(X509CreateCertificateOptions::new("service.example.com"));
    let pem = pem_of(&[&chain.leaf, &chain.intermediate, &chain.root]);

    check_certificate_chain_string(&pem).unwrap();
}

#[test]
fn test_empty_string_fails() {
    let err = check_certificate_chain_string("").unwrap_err();
    assert!(matches!(err, TlsError::ChainLength { expected: 3, found: 0 }));
}

#[test]
fn test_only_end_entity_fails() {
    let chain = issue_chain(X509CreateCertificateOptions::new("service.example.com"));
    let err = check_certificate_chain_string(&pem_of(&[&chain.leaf])).unwrap_err();
    assert!(matches!(err, TlsError::ChainLength { expected: 3, found: 1 }));
}

#[test]
fn test_missing_root_fails() {
    let chain = issue_chain(X509CreateCertificateOptions::new("service.example.com"));
    let err =
        check_certificate_chain_string(&pem_of(&[&chain.leaf, &chain.intermediate])).unwrap_err();
    assert!(matches!(err, TlsError::ChainLength { expected: 3, found: 2 }));
}

#[test]
fn test_extra_certificate_fails() {
    let chain = issue_chain(X509CreateCertificateOptions::new("service.example.com"));
    let pem = pem_of(&[&chain.leaf, &chain.intermediate, &chain.root, &chain.root]);
    assert!(matches!(
        check_certificate_chain_string(&pem).unwrap_err(),
        TlsError::ChainLength { found: 4, .. }
    ));
}

#[test]
fn test_wrong_order_fails() {
    let chain = issue_chain(X509CreateCertificateOptions::new("service.example.com"));
    let pem = pem_of(&[&chain.root, &chain.intermediate, &chain.leaf]);

    let err = check_certificate_chain_string(&pem).unwrap_err();
    assert!(err.is_no_valid_chain(), "unexpected error: {err}");
}

#[test]
fn test_unrelated_root_fails() {
    let chain = issue_chain(X509CreateCertificateOptions::new("service.example.com"));
    let stranger = create_root_ca_certificate(&X509CreateCertificateOptions::new("Chain Root CA"))
        .unwrap();
    let pem = pem_of(&[&chain.leaf, &chain.intermediate, &stranger]);

    let err = check_certificate_chain_string(&pem).unwrap_err();
    assert!(err.is_no_valid_chain(), "unexpected error: {err}");
}

#[test]
fn test_expired_end_entity_fails() {
    let chain = issue_chain(
        X509CreateCertificateOptions::new("expired.example.com")
            .with_not_before(SystemTime::now() - Duration::from_secs(10 * 86_400))
            .with_validity(Duration::from_secs(86_400)),
    );
    let pem = pem_of(&[&chain.leaf, &chain.intermediate, &chain.root]);

    let err = check_certificate_chain_string(&pem).unwrap_err();
    assert!(matches!(err, TlsError::CertificateExpired(_)));
}

#[test]
fn test_malformed_pem_fails() {
    let pem = "-----BEGIN CERTIFICATE-----\nbm90IGEgY2VydA==\n-----END CERTIFICATE-----\n".repeat(3);
    let err = check_certificate_chain_string(&pem).unwrap_err();
    assert!(matches!(err, TlsError::CertificateParsing(_)));
}

const DAY: Duration = Duration::from_secs(86_400);

fn backdated(cn: &str) -> X509CreateCertificateOptions {
    X509CreateCertificateOptions::new(cn)
        .with_not_before(SystemTime::now() - 10 * DAY)
        .with_validity(DAY)
}

fn postdated(cn: &str) -> X509CreateCertificateOptions {
    X509CreateCertificateOptions::new(cn).with_not_before(SystemTime::now() + 10 * DAY)
}

fn chain_pem_with(
    root_options: &X509CreateCertificateOptions,
    intermediate_options: &X509CreateCertificateOptions,
) -> String {
    let root = create_root_ca_certificate(root_options).unwrap();
    let intermediate = create_signed_intermediate_certificate(intermediate_options, &root).unwrap();
    let leaf = create_signed_end_entity_certificate(
        &X509CreateCertificateOptions::new("service.example.com"),
        &intermediate,
    )
    .unwrap();
    pem_of(&[&leaf, &intermediate, &root])
}

#[test]
fn test_expired_intermediate_fails() {
    let pem = chain_pem_with(
        &X509CreateCertificateOptions::new("Chain Root CA"),
        &backdated("Expired Intermediate CA"),
    );
    let err = check_certificate_chain_string(&pem).unwrap_err();
    assert!(matches!(err, TlsError::CertificateExpired(_)), "unexpected error: {err}");
}

#[test]
fn test_expired_root_fails() {
    let pem = chain_pem_with(
        &backdated("Expired Root CA"),
        &X509CreateCertificateOptions::new("Chain Intermediate CA"),
    );
    let err = check_certificate_chain_string(&pem).unwrap_err();
    assert!(matches!(err, TlsError::CertificateExpired(_)), "unexpected error: {err}");
}

#[test]
fn test_not_yet_valid_intermediate_fails() {
    let pem = chain_pem_with(
        &X509CreateCertificateOptions::new("Chain Root CA"),
        &postdated("Future Intermediate CA"),
    );
    let err = check_certificate_chain_string(&pem).unwrap_err();
    assert!(matches!(err, TlsError::CertificateExpired(_)), "unexpected error: {err}");
}

#[test]
fn test_not_yet_valid_root_fails() {
    let pem = chain_pem_with(
        &postdated("Future Root CA"),
        &X509CreateCertificateOptions::new("Chain Intermediate CA"),
    );
    let err = check_certificate_chain_string(&pem).unwrap_err();
    assert!(matches!(err, TlsError::CertificateExpired(_)), "unexpected error: {err}");
}

/// Self-signed CA built directly with rcgen, for constraints issuance never produces
fn external_ca(
    cn: &str,
    constraints: rcgen::BasicConstraints,
    key_usages: Vec<rcgen::KeyUsagePurpose>,
) -> CertKeyPair {
    let key = rcgen::KeyPair::generate().unwrap();
    let mut params = rcgen::CertificateParams::new(Vec::<String>::new()).unwrap();
    params.distinguished_name = rcgen::DistinguishedName::new();
    params.distinguished_name.push(rcgen::DnType::CommonName, cn);
    params.is_ca = rcgen::IsCa::Ca(constraints);
    params.key_usages = key_usages;
    let cert = params.self_signed(&key).unwrap();
    CertKeyPair::from_pem(&cert.pem(), &key.serialize_pem()).unwrap()
}

fn signing_usages() -> Vec<rcgen::KeyUsagePurpose> {
    vec![
        rcgen::KeyUsagePurpose::KeyCertSign,
        rcgen::KeyUsagePurpose::CrlSign,
        rcgen::KeyUsagePurpose::DigitalSignature,
    ]
}

#[test]
fn test_intermediate_under_intermediate_verifies() {
    let root = create_root_ca_certificate(&X509CreateCertificateOptions::new("Deep Root CA"))
        .unwrap();
    let first = create_signed_intermediate_certificate(
        &X509CreateCertificateOptions::new("Deep Intermediate CA 1"),
        &root,
    )
    .unwrap();
    let second = create_signed_intermediate_certificate(
        &X509CreateCertificateOptions::new("Deep Intermediate CA 2"),
        &first,
    )
    .unwrap();
    let leaf = create_signed_end_entity_certificate(
        &X509CreateCertificateOptions::new("deep.example.com"),
        &second,
    )
    .unwrap();

    assert!(is_intermediate_certificate(second.certificate()));
    verify_certificate_chain(
        leaf.certificate(),
        &[second.certificate().clone(), first.certificate().clone()],
        &[root.certificate().clone()],
    )
    .unwrap();
}

#[test]
fn test_intermediate_path_length_counts_down() {
    let root = external_ca(
        "Constrained Root CA",
        rcgen::BasicConstraints::Constrained(2),
        signing_usages(),
    );
    let intermediate = create_signed_intermediate_certificate(
        &X509CreateCertificateOptions::new("Constrained Intermediate CA"),
        &root,
    )
    .unwrap();

    assert_eq!(root.certificate().parsed().path_len_constraint, Some(2));
    assert_eq!(intermediate.certificate().parsed().path_len_constraint, Some(1));
}

#[test]
fn test_issuer_with_zero_path_length_cannot_sign_intermediates() {
    let root = external_ca(
        "Leaf-only Root CA",
        rcgen::BasicConstraints::Constrained(0),
        signing_usages(),
    );

    let err = create_signed_intermediate_certificate(
        &X509CreateCertificateOptions::new("Refused Intermediate CA"),
        &root,
    )
    .unwrap_err();
    assert!(matches!(err, TlsError::InvalidInput(_)), "unexpected error: {err}");

    let leaf = create_signed_end_entity_certificate(
        &X509CreateCertificateOptions::new("direct.example.com"),
        &root,
    )
    .unwrap();
    verify_certificate_chain(leaf.certificate(), &[], &[root.certificate().clone()]).unwrap();
}

#[test]
fn test_ca_without_key_cert_sign_fails_basic_constraints() {
    let ca = external_ca(
        "No Signing CA",
        rcgen::BasicConstraints::Unconstrained,
        vec![rcgen::KeyUsagePurpose::DigitalSignature],
    );

    let err = validate_basic_constraints(ca.certificate(), true).unwrap_err();
    assert!(matches!(err, TlsError::CertificateValidation(_)), "unexpected error: {err}");
}

#[test]
fn test_basic_constraints_reject_wrong_role() {
    let chain = issue_chain(X509CreateCertificateOptions::new("service.example.com"));

    validate_basic_constraints(chain.intermediate.certificate(), true).unwrap();
    validate_basic_constraints(chain.leaf.certificate(), false).unwrap();
    assert!(validate_basic_constraints(chain.leaf.certificate(), true).is_err());
    assert!(validate_basic_constraints(chain.root.certificate(), false).is_err());
}
