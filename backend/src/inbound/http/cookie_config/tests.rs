//! Unit tests for auth configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn secret_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temporary secret file");
    file.write_all(&vec![b's'; len]).expect("write secret");
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_defaults(secret_path: String) -> HashMap<&'static str, String> {
    HashMap::from([
        (SECRET_FILE_ENV, secret_path),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn expect_error(result: Result<AuthSettings, AuthConfigError>, label: &str) -> AuthConfigError {
    match result {
        Ok(_) => panic!("{label}"),
        Err(error) => error,
    }
}

#[rstest]
fn release_reads_secret_file() {
    let file = secret_file(SECRET_MIN_LEN);
    let env = mock_env(release_defaults(path_of(&file)));

    let settings =
        auth_settings_from_env(&env, BuildMode::Release).expect("valid release settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.token_secret.as_slice(), vec![b's'; SECRET_MIN_LEN]);
}

#[rstest]
fn release_missing_cookie_secure_is_rejected() {
    let file = secret_file(SECRET_MIN_LEN);
    let mut vars = release_defaults(path_of(&file));
    vars.remove(COOKIE_SECURE_ENV);
    let env = mock_env(vars);

    let err = expect_error(
        auth_settings_from_env(&env, BuildMode::Release),
        "expected missing cookie secure to fail",
    );
    assert!(matches!(
        err,
        AuthConfigError::MissingEnv {
            name: COOKIE_SECURE_ENV
        }
    ));
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_invalid_cookie_secure_is_rejected(#[case] value: &str) {
    let file = secret_file(SECRET_MIN_LEN);
    let mut vars = release_defaults(path_of(&file));
    vars.insert(COOKIE_SECURE_ENV, value.to_owned());
    let env = mock_env(vars);

    let err = expect_error(
        auth_settings_from_env(&env, BuildMode::Release),
        "expected invalid cookie secure to fail",
    );
    assert!(matches!(
        err,
        AuthConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            ..
        }
    ));
}

#[rstest]
fn release_short_secret_is_rejected() {
    let file = secret_file(SECRET_MIN_LEN - 1);
    let env = mock_env(release_defaults(path_of(&file)));

    let err = expect_error(
        auth_settings_from_env(&env, BuildMode::Release),
        "expected short secret to fail",
    );
    assert!(matches!(err, AuthConfigError::SecretTooShort { .. }));
}

#[rstest]
fn release_missing_secret_file_is_rejected() {
    let mut vars = release_defaults("/nonexistent/catalogue-secret".to_owned());
    vars.insert(ALLOW_EPHEMERAL_ENV, "0".to_owned());
    let env = mock_env(vars);

    let err = expect_error(
        auth_settings_from_env(&env, BuildMode::Release),
        "expected unreadable secret to fail",
    );
    assert!(matches!(err, AuthConfigError::SecretRead { .. }));
}

#[rstest]
fn release_rejects_ephemeral_secret() {
    let file = secret_file(SECRET_MIN_LEN);
    let mut vars = release_defaults(path_of(&file));
    vars.insert(ALLOW_EPHEMERAL_ENV, "1".to_owned());
    let env = mock_env(vars);

    let err = expect_error(
        auth_settings_from_env(&env, BuildMode::Release),
        "expected ephemeral secret to be refused",
    );
    assert!(matches!(err, AuthConfigError::EphemeralNotAllowed));
}

#[rstest]
fn debug_defaults_to_secure_cookie_and_ephemeral_secret() {
    let vars = HashMap::from([(SECRET_FILE_ENV, "/nonexistent/catalogue-secret".to_owned())]);
    let env = mock_env(vars);

    let settings = auth_settings_from_env(&env, BuildMode::Debug).expect("debug settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.token_secret.len(), EPHEMERAL_SECRET_LEN);
}

#[rstest]
#[case("0", false)]
#[case("no", false)]
#[case("TRUE", true)]
fn cookie_secure_accepts_boolean_spellings(#[case] value: &str, #[case] expected: bool) {
    let file = secret_file(SECRET_MIN_LEN);
    let mut vars = release_defaults(path_of(&file));
    vars.insert(COOKIE_SECURE_ENV, value.to_owned());
    let env = mock_env(vars);

    let settings = auth_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert_eq!(settings.cookie_secure, expected);
}

#[rstest]
fn token_cookie_carries_lifetime_and_flags() {
    let settings = AuthCookieSettings {
        secure: false,
        max_age: Duration::from_secs(86_400),
    };
    let cookie = settings.token_cookie("abc".to_owned());

    assert_eq!(cookie.value(), "abc");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.secure(), Some(false));
    assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86_400)));
}

#[rstest]
fn removal_cookie_expires_immediately() {
    let settings = AuthCookieSettings {
        secure: true,
        max_age: Duration::from_secs(86_400),
    };
    let cookie = settings.removal_cookie();

    assert_eq!(cookie.name(), AUTH_COOKIE);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
}
