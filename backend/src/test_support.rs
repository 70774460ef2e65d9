//! Test utilities shared by unit tests across the crate.
//!
//! Only compiled for `cfg(test)`.

pub(crate) mod jwt {
    //! Signed-token fixtures.
    //!
    //! `fixtures/jwt/jwks.json` publishes the public half of
    //! `signing_key.pem` under [`KID`] and of `rogue_key.pem` under
    //! [`ROTATED_KID`].

    use std::sync::Arc;

    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use mockable::Clock;
    use serde_json::{Value, json};

    use crate::domain::ports::KeySet;

    pub(crate) const KID: &str = "test-key-1";
    pub(crate) const ROTATED_KID: &str = "rotated-key-2";
    pub(crate) const AUDIENCE: &str = "https://menu-api.test";
    pub(crate) const SUBJECT: &str = "auth0|fixture-user";
    /// Fixed "now" for verifier tests (2026-05-28T20:26:40Z).
    pub(crate) const NOW: i64 = 1_780_000_000;

    pub(crate) const SIGNING_KEY_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/fixtures/jwt/signing_key.pem"
    ));
    pub(crate) const ROGUE_KEY_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/fixtures/jwt/rogue_key.pem"
    ));
    pub(crate) const JWKS_JSON: &str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/jwt/jwks.json"));

    /// Decoded fixture key set.
    pub(crate) fn key_set() -> KeySet {
        crate::outbound::jwks::decode_key_set(JWKS_JSON.as_bytes())
            .expect("fixture JWKS decodes")
    }

    /// Claims accepted by a verifier configured with [`AUDIENCE`] at [`NOW`].
    pub(crate) fn valid_claims() -> Value {
        json!({
            "iss": "https://tenant.example.test/",
            "sub": SUBJECT,
            "aud": AUDIENCE,
            "exp": NOW + 60,
        })
    }

    /// Sign `claims` with the PEM key under `kid`.
    pub(crate) fn sign_with(
        claims: &Value,
        algorithm: Algorithm,
        kid: Option<&str>,
        pem: &str,
    ) -> String {
        let mut header = Header::new(algorithm);
        header.kid = kid.map(str::to_owned);
        let key = EncodingKey::from_rsa_pem(pem.as_bytes()).expect("fixture PEM parses");
        jsonwebtoken::encode(&header, claims, &key).expect("token signs")
    }

    /// Sign `claims` with the published RS256 fixture key.
    pub(crate) fn sign(claims: &Value) -> String {
        sign_with(claims, Algorithm::RS256, Some(KID), SIGNING_KEY_PEM)
    }

    /// Assemble an unsigned token from a raw header and payload.
    pub(crate) fn unsigned(header: &Value, payload: &Value) -> String {
        let encode = |value: &Value| URL_SAFE_NO_PAD.encode(value.to_string());
        format!("{}.{}.", encode(header), encode(payload))
    }

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    /// Clock frozen at [`NOW`].
    pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
        Arc::new(FixtureClock {
            utc_now: Utc
                .timestamp_opt(NOW, 0)
                .single()
                .expect("fixture timestamp"),
        })
    }
}
