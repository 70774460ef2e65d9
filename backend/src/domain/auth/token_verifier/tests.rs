//! Verifier tests driven by the signed-token fixtures.

use std::sync::Arc;

use jsonwebtoken::Algorithm;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{KeyResolverError, MockKeyResolver, StaticKeyResolver};
use crate::test_support::jwt::{
    AUDIENCE, KID, NOW, ROGUE_KEY_PEM, ROTATED_KID, SIGNING_KEY_PEM, SUBJECT, fixture_clock,
    key_set, sign, sign_with, unsigned, valid_claims,
};

#[fixture]
fn verifier() -> TokenVerifier {
    TokenVerifier::new(
        Arc::new(StaticKeyResolver::new(key_set())),
        AUDIENCE,
        fixture_clock(),
    )
}

fn with_claim(name: &str, value: Value) -> Value {
    let mut claims = valid_claims();
    claims[name] = value;
    claims
}

fn without_claim(name: &str) -> Value {
    let mut claims = valid_claims();
    if let Some(map) = claims.as_object_mut() {
        map.remove(name);
    }
    claims
}

#[rstest]
#[tokio::test]
async fn accepts_a_valid_bearer_token(verifier: TokenVerifier) {
    let header = format!("Bearer {}", sign(&valid_claims()));
    let subject = verifier
        .verify_header(Some(&header))
        .await
        .expect("valid token");
    assert_eq!(subject.as_ref(), SUBJECT);
}

#[rstest]
#[case::rs384(Algorithm::RS384)]
#[case::rs512(Algorithm::RS512)]
#[tokio::test]
async fn accepts_every_rsa_family_algorithm(verifier: TokenVerifier, #[case] alg: Algorithm) {
    let token = sign_with(&valid_claims(), alg, Some(KID), SIGNING_KEY_PEM);
    assert!(verifier.verify_token(&token).await.is_ok());
}

#[rstest]
#[case::absent(None)]
#[case::empty(Some(""))]
#[case::wrong_scheme(Some("Basic abc"))]
#[case::lowercase_scheme(Some("bearer abc"))]
#[case::missing_token(Some("Bearer"))]
#[case::empty_token(Some("Bearer "))]
#[case::extra_part(Some("Bearer abc def"))]
#[tokio::test]
async fn rejects_malformed_headers(verifier: TokenVerifier, #[case] header: Option<&str>) {
    let err = verifier.verify_header(header).await.expect_err("bad header");
    assert_eq!(err, AuthError::MalformedHeader);
}

#[rstest]
#[case::one_segment("abc")]
#[case::four_segments("a.b.c.d")]
#[case::header_not_base64("***.e30.sig")]
#[tokio::test]
async fn rejects_structurally_invalid_tokens(verifier: TokenVerifier, #[case] token: &str) {
    let err = verifier.verify_token(token).await.expect_err("bad token");
    assert_eq!(err, AuthError::MalformedToken);
}

#[rstest]
#[case::none("none")]
#[case::hmac("HS256")]
#[case::ecdsa("ES256")]
#[case::pss("PS256")]
#[tokio::test]
async fn rejects_non_rsa_algorithms(verifier: TokenVerifier, #[case] alg: &str) {
    let token = unsigned(&json!({ "alg": alg, "kid": KID }), &valid_claims());
    let err = verifier.verify_token(&token).await.expect_err("bad alg");
    assert_eq!(
        err,
        AuthError::UnsupportedAlgorithm {
            alg: alg.to_owned()
        }
    );
}

#[rstest]
#[tokio::test]
async fn rejects_tokens_without_key_id(verifier: TokenVerifier) {
    let token = sign_with(&valid_claims(), Algorithm::RS256, None, SIGNING_KEY_PEM);
    let err = verifier.verify_token(&token).await.expect_err("no kid");
    assert_eq!(err, AuthError::MissingKeyId);
}

#[rstest]
#[tokio::test]
async fn propagates_unknown_key_id(verifier: TokenVerifier) {
    let token = sign_with(
        &valid_claims(),
        Algorithm::RS256,
        Some("retired-key"),
        SIGNING_KEY_PEM,
    );
    let err = verifier.verify_token(&token).await.expect_err("unknown kid");
    assert_eq!(
        err,
        AuthError::KeyResolution(KeyResolverError::key_not_found("retired-key"))
    );
}

#[rstest]
#[tokio::test]
async fn propagates_key_fetch_failures() {
    let mut keys = MockKeyResolver::new();
    keys.expect_resolve()
        .times(1)
        .return_once(|_| Err(KeyResolverError::fetch("status 503")));
    let verifier = TokenVerifier::new(Arc::new(keys), AUDIENCE, fixture_clock());

    let err = verifier
        .verify_token(&sign(&valid_claims()))
        .await
        .expect_err("fetch failure");

    assert!(matches!(
        err,
        AuthError::KeyResolution(KeyResolverError::Fetch { .. })
    ));
}

#[rstest]
#[tokio::test]
async fn rejects_signature_from_another_key(verifier: TokenVerifier) {
    let token = sign_with(&valid_claims(), Algorithm::RS256, Some(KID), ROGUE_KEY_PEM);
    let err = verifier.verify_token(&token).await.expect_err("forged");
    assert_eq!(err, AuthError::InvalidSignature);
}

#[rstest]
#[tokio::test]
async fn accepts_the_rotated_key_under_its_own_kid(verifier: TokenVerifier) {
    let token = sign_with(
        &valid_claims(),
        Algorithm::RS256,
        Some(ROTATED_KID),
        ROGUE_KEY_PEM,
    );
    assert!(verifier.verify_token(&token).await.is_ok());
}

#[rstest]
#[tokio::test]
async fn rejects_claims_that_are_not_an_object(verifier: TokenVerifier) {
    let token = sign_with(
        &json!("just a string"),
        Algorithm::RS256,
        Some(KID),
        SIGNING_KEY_PEM,
    );
    let err = verifier.verify_token(&token).await.expect_err("bad claims");
    assert_eq!(err, AuthError::MalformedClaims);
}

#[rstest]
#[case::one_second_ago(json!(NOW - 1), false)]
#[case::exactly_now(json!(NOW), false)]
#[case::one_second_ahead(json!(NOW + 1), true)]
#[case::fractional_ahead(json!(1_780_000_000.5_f64), true)]
#[case::fractional_behind(json!(1_779_999_999.5_f64), false)]
#[case::beyond_i64(json!(u64::MAX), true)]
#[case::not_numeric(json!("tomorrow"), false)]
#[tokio::test]
async fn expiry_boundary(verifier: TokenVerifier, #[case] exp: Value, #[case] accepted: bool) {
    let token = sign(&with_claim("exp", exp));
    let result = verifier.verify_token(&token).await;
    if accepted {
        assert!(result.is_ok(), "expected acceptance, got {result:?}");
    } else {
        assert_eq!(result, Err(AuthError::TokenExpired));
    }
}

#[rstest]
#[tokio::test]
async fn missing_expiry_counts_as_expired(verifier: TokenVerifier) {
    let token = sign(&without_claim("exp"));
    let err = verifier.verify_token(&token).await.expect_err("no exp");
    assert_eq!(err, AuthError::TokenExpired);
}

#[rstest]
#[case::list_containing(json!(["https://other.test", AUDIENCE]), Ok(()))]
#[case::single_string(json!(AUDIENCE), Ok(()))]
#[case::other_string(json!("https://other.test"), Err(AuthError::InvalidAudience))]
#[case::list_without(json!(["https://other.test"]), Err(AuthError::InvalidAudience))]
#[case::empty_list(json!([]), Err(AuthError::InvalidAudience))]
#[case::prefix_only(json!("https://menu-api"), Err(AuthError::InvalidAudience))]
#[case::number(json!(42), Err(AuthError::InvalidAudience))]
#[case::null(Value::Null, Err(AuthError::MissingAudience))]
#[tokio::test]
async fn audience_matching(
    verifier: TokenVerifier,
    #[case] aud: Value,
    #[case] expected: Result<(), AuthError>,
) {
    let token = sign(&with_claim("aud", aud));
    let result = verifier.verify_token(&token).await.map(|_| ());
    assert_eq!(result, expected);
}

#[rstest]
#[tokio::test]
async fn absent_audience_is_missing(verifier: TokenVerifier) {
    let token = sign(&without_claim("aud"));
    let err = verifier.verify_token(&token).await.expect_err("no aud");
    assert_eq!(err, AuthError::MissingAudience);
}

#[rstest]
#[case::absent(without_claim("sub"))]
#[case::empty(with_claim("sub", json!("")))]
#[case::not_a_string(with_claim("sub", json!(123)))]
#[tokio::test]
async fn rejects_unusable_subjects(verifier: TokenVerifier, #[case] claims: Value) {
    let err = verifier
        .verify_token(&sign(&claims))
        .await
        .expect_err("no subject");
    assert_eq!(err, AuthError::MissingSubject);
}

#[rstest]
#[tokio::test]
async fn checks_expiry_before_audience(verifier: TokenVerifier) {
    let mut claims = with_claim("exp", json!(NOW - 10));
    claims["aud"] = json!("https://other.test");
    let err = verifier.verify_token(&sign(&claims)).await.expect_err("expired");
    assert_eq!(err, AuthError::TokenExpired);
}

#[rstest]
#[case::integer(json!(42), Some(42))]
#[case::fraction_rounds_up(json!(41.2), Some(42))]
#[case::negative_fraction(json!(-1.5), Some(-1))]
#[case::huge_float(json!(1e300), Some(i64::MAX))]
#[case::tiny_float(json!(-1e300), None)]
#[case::string(json!("42"), None)]
fn expiry_is_read_in_whole_seconds(#[case] value: Value, #[case] expected: Option<i64>) {
    assert_eq!(expiry_seconds(&value), expected);
}
