// Error taxonomy tests
//
// Every failure of the codec maps to exactly one category:
// - InvalidUrl: grammar mismatch or malformed pattern on parse
// - IllegalArgument: structural problems on build, bad signer input
// - IllegalQueryParameter: bad dpr / f_auto in either direction

use pixelbin_url::config::UrlConfig;
use pixelbin_url::error::{ErrorKind, PixelbinError};
use pixelbin_url::security::sign_url;
use pixelbin_url::url::{obj_to_url, url_to_obj, Dpr, UrlDescriptor};

#[test]
fn test_parse_failures_are_invalid_url() {
    let config = UrlConfig::default();

    for url in [
        "https://cdn.pixelbin.io/v2",
        "https://cdn.pixelbin.io/",
        "https://cdn.pixelbin.io/v2/demo/t.resize/a.png",
        "cdn.pixelbin.io/v2/demo/original/a.png",
    ] {
        let err = url_to_obj(url, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl, "url: {}", url);
    }
}

#[test]
fn test_build_failures_are_illegal_argument() {
    let err = obj_to_url(&UrlDescriptor::default(), &UrlConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);
    assert!(matches!(err, PixelbinError::IllegalArgument(_)));
}

#[test]
fn test_option_failures_are_illegal_query_parameter() {
    let obj = UrlDescriptor {
        cloud_name: "demo".to_string(),
        file_path: "a.png".to_string(),
        options: pixelbin_url::url::UrlOptions {
            dpr: Some(Dpr::Ratio(0.0)),
            f_auto: None,
        },
        ..Default::default()
    };
    let err = obj_to_url(&obj, &UrlConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalQueryParameter);
    assert_eq!(
        err.to_string(),
        "DPR value should be numeric and should be between 0.1 to 5.0"
    );
}

#[test]
fn test_signer_failures_are_illegal_argument() {
    let err = sign_url("", 20, "key", "token").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);
}

#[test]
fn test_errors_are_deterministic() {
    let config = UrlConfig::default();
    let url = "https://cdn.pixelbin.io/v2/red-scene-95b6ea/zonesls/t.resize()/a.jpeg";

    let first = url_to_obj(url, &config).unwrap_err();
    let second = url_to_obj(url, &config).unwrap_err();
    assert_eq!(first, second);
}

#[test]
fn test_error_converts_into_anyhow() {
    fn run() -> anyhow::Result<()> {
        url_to_obj("https://cdn.pixelbin.io/v2", &UrlConfig::default())?;
        Ok(())
    }

    let err = run().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid pixelbin url. Please make sure the url is correct."
    );
    assert!(err.downcast_ref::<PixelbinError>().is_some());
}
