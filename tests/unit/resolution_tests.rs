// End-to-end resolution tests
//
// Each test builds a fresh Settings value, so no test depends on shared
// configuration state.

use imgix_resolve::*;

const IMAGE: &str = "media/image/image_0001.jpg";

fn resolver(settings: Settings) -> UrlResolver {
    UrlResolver::from_settings(&settings)
}

fn single_domain() -> Settings {
    Settings::new().with_domains("test1.imgix.net")
}

fn alias_one() -> ParameterSet {
    ParameterSet::new()
        .with("w", 150)
        .with("h", 350)
        .with("auto", "format")
}

fn overrides() -> ParameterSet {
    ParameterSet::new()
        .with("w", 111)
        .with("h", 222)
        .with("auto", "format")
}

fn resolve_with(settings: Settings, request: ResolutionRequest) -> String {
    resolver(settings).resolve(&request).unwrap()
}

#[test]
fn test_correct_url_is_generated() {
    assert_eq!(
        resolve_with(single_domain(), ResolutionRequest::new(IMAGE)),
        "https://test1.imgix.net/media/image/image_0001.jpg"
    );
}

#[test]
fn test_query_is_not_html_escaped() {
    // Escaping `&` for markup is the template layer's job
    assert_eq!(
        resolve_with(
            single_domain(),
            ResolutionRequest::new(IMAGE).param("w", 600).param("h", 400)
        ),
        "https://test1.imgix.net/media/image/image_0001.jpg?h=400&w=600"
    );
}

#[test]
fn test_arguments_are_used_correctly() {
    let request = ResolutionRequest::new(IMAGE)
        .param("h", 100)
        .param("w", 250)
        .param("lossless", 1)
        .param("auto", "format");
    assert_eq!(
        resolve_with(single_domain(), request),
        "https://test1.imgix.net/media/image/image_0001.jpg?auto=format&h=100&lossless=1&w=250"
    );
}

#[test]
fn test_no_https() {
    assert_eq!(
        resolve_with(single_domain().with_https(false), ResolutionRequest::new(IMAGE)),
        "http://test1.imgix.net/media/image/image_0001.jpg"
    );
}

#[test]
fn test_sharding_returns_configured_domain() {
    let settings = Settings::new().with_domains(vec![
        "test1.imgix.net",
        "test2.imgix.net",
        "test3.imgix.net",
    ]);
    let expected = [
        "https://test1.imgix.net/media/image/image_0001.jpg",
        "https://test2.imgix.net/media/image/image_0001.jpg",
        "https://test3.imgix.net/media/image/image_0001.jpg",
    ];
    let resolver = resolver(settings);
    for _ in 0..20 {
        let url = resolver.resolve(&ResolutionRequest::new(IMAGE)).unwrap();
        assert!(expected.contains(&url.as_str()), "unexpected url {}", url);
    }
}

#[test]
fn test_sharding_with_fixed_selector_is_deterministic() {
    let settings = Settings::new().with_domains(vec!["test1.imgix.net", "test2.imgix.net"]);
    let resolver = resolver(settings).with_selector(FixedSelector::new(1));
    assert_eq!(
        resolver.resolve(&ResolutionRequest::new(IMAGE)).unwrap(),
        "https://test2.imgix.net/media/image/image_0001.jpg"
    );
}

#[test]
fn test_single_domain_resolution_is_idempotent() {
    let resolver = resolver(single_domain().with_sign_key("1234test"));
    let request = ResolutionRequest::new(IMAGE).param("w", 300).param("fit", "crop");
    assert_eq!(
        resolver.resolve(&request).unwrap(),
        resolver.resolve(&request).unwrap()
    );
}

#[test]
fn test_sign_key() {
    assert_eq!(
        resolve_with(single_domain().with_sign_key("1234test"), ResolutionRequest::new(IMAGE)),
        "https://test1.imgix.net/media/image/image_0001.jpg?s=3ffb2810efc98cca7de5cd9c8ee6aec1"
    );
}

#[test]
fn test_alias_without_overrides() {
    let settings = single_domain().with_alias("alias_one", alias_one());
    assert_eq!(
        resolve_with(settings, ResolutionRequest::new(IMAGE).alias("alias_one")),
        "https://test1.imgix.net/media/image/image_0001.jpg?auto=format&h=350&w=150"
    );
}

#[test]
fn test_alias_with_other_arguments() {
    let settings = single_domain().with_alias("alias_one", alias_one());
    let url = resolver(settings)
        .url(
            IMAGE,
            Some("alias_one"),
            "",
            ParameterSet::new()
                .with("w", 111)
                .with("h", 222)
                .with("auto", "override"),
        )
        .unwrap();
    assert_eq!(
        url,
        "https://test1.imgix.net/media/image/image_0001.jpg?auto=override&h=222&w=111"
    );
}

#[test]
fn test_missing_alias_gives_useful_error() {
    let settings = single_domain().with_alias("alias_one", alias_one());
    let err = resolver(settings)
        .resolve(
            &ResolutionRequest::new(IMAGE)
                .alias("alias_two")
                .params(overrides()),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "Alias alias_two not found in aliases");
}

#[test]
fn test_no_aliases_specified_gives_useful_error() {
    let err = resolver(single_domain())
        .resolve(&ResolutionRequest::new(IMAGE).alias("alias_two"))
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::NoAliases(_)));
    assert!(err.to_string().starts_with("No aliases set."));
}

#[test]
fn test_wh_argument() {
    assert_eq!(
        resolve_with(single_domain(), ResolutionRequest::new(IMAGE).param("wh", "1024x768")),
        "https://test1.imgix.net/media/image/image_0001.jpg?h=768&w=1024"
    );
}

#[test]
fn test_wh_argument_overrides_w_and_h() {
    let request = ResolutionRequest::new(IMAGE)
        .params(overrides())
        .param("wh", "1024x768");
    assert_eq!(
        resolve_with(single_domain(), request),
        "https://test1.imgix.net/media/image/image_0001.jpg?auto=format&h=768&w=1024"
    );
}

#[test]
fn test_wh_with_h_0_overrides_w_but_not_h() {
    let request = ResolutionRequest::new(IMAGE)
        .params(overrides())
        .param("wh", "1024x0");
    assert_eq!(
        resolve_with(single_domain(), request),
        "https://test1.imgix.net/media/image/image_0001.jpg?auto=format&h=222&w=1024"
    );
}

#[test]
fn test_wh_with_w_0_overrides_h_but_not_w() {
    let request = ResolutionRequest::new(IMAGE)
        .params(overrides())
        .param("wh", "0x768");
    assert_eq!(
        resolve_with(single_domain(), request),
        "https://test1.imgix.net/media/image/image_0001.jpg?auto=format&h=768&w=111"
    );
}

#[test]
fn test_wh_with_w_0_and_h_0_does_nothing() {
    let request = ResolutionRequest::new(IMAGE)
        .params(overrides())
        .param("wh", "0x0");
    assert_eq!(
        resolve_with(single_domain(), request),
        "https://test1.imgix.net/media/image/image_0001.jpg?auto=format&h=222&w=111"
    );
}

#[test]
fn test_wh_overrides_alias_dimensions() {
    let settings = single_domain().with_alias("alias_one", alias_one());
    let request = ResolutionRequest::new(IMAGE)
        .alias("alias_one")
        .param("wh", "0x768");
    assert_eq!(
        resolve_with(settings, request),
        "https://test1.imgix.net/media/image/image_0001.jpg?auto=format&h=768&w=150"
    );
}

#[test]
fn test_malformed_wh_is_ignored() {
    let request = ResolutionRequest::new(IMAGE)
        .params(overrides())
        .param("wh", "large");
    assert_eq!(
        resolve_with(single_domain(), request),
        "https://test1.imgix.net/media/image/image_0001.jpg?auto=format&h=222&w=111"
    );
}

#[test]
fn test_plain_source_keeps_full_path_when_signing() {
    let settings = single_domain()
        .with_detect_format(true)
        .with_sign_key("1234key");
    let request = ResolutionRequest::new("i.imgur.net/media/image/image_0001.jpg").param("fm", "png");
    assert_eq!(
        resolve_with(settings, request),
        "https://test1.imgix.net/i.imgur.net/media/image/image_0001.jpg?fm=png&s=e999c394eb69bad44b3f605fcf96f4bf"
    );
}

#[test]
fn test_detect_format_for_each_extension() {
    let cases = [
        ("media/image/image_0001.jpg", "jpg"),
        ("media/image/image_0001.jpeg", "jpg"),
        ("media/image/image_0001.png", "png"),
        ("media/image/image_0001.gif", "gif"),
        ("media/image/image_0001.webp", "webp"),
    ];
    let resolver = resolver(single_domain().with_detect_format(true));
    for (path, format) in cases {
        assert_eq!(
            resolver.resolve(&ResolutionRequest::new(path)).unwrap(),
            format!("https://test1.imgix.net/{}?fm={}", path, format)
        );
    }
}

#[test]
fn test_detect_format_ignores_unknown_extension() {
    assert_eq!(
        resolve_with(
            single_domain().with_detect_format(true),
            ResolutionRequest::new("media/image/image_0001.bmp")
        ),
        "https://test1.imgix.net/media/image/image_0001.bmp"
    );
}

#[test]
fn test_fm_in_alias_overrides_detect_format() {
    let settings = single_domain()
        .with_detect_format(true)
        .with_alias("alias_fm", ParameterSet::new().with("fm", "png"));
    assert_eq!(
        resolve_with(settings, ResolutionRequest::new(IMAGE).alias("alias_fm")),
        "https://test1.imgix.net/media/image/image_0001.jpg?fm=png"
    );
}

#[test]
fn test_inline_fm_argument_overrides_detect_format() {
    assert_eq!(
        resolve_with(
            single_domain().with_detect_format(true),
            ResolutionRequest::new(IMAGE).param("fm", "png")
        ),
        "https://test1.imgix.net/media/image/image_0001.jpg?fm=png"
    );
}

#[test]
fn test_web_proxy_without_sign_key_raises() {
    let err = resolver(single_domain().with_web_proxy_source(true))
        .resolve(&ResolutionRequest::new(IMAGE))
        .unwrap_err();
    assert_eq!(err, ConfigurationError::ProxyWithoutSignKey(String::new()));
}

#[test]
fn test_alternative_source() {
    let settings = Settings::new()
        .with_source("", SourceSettings::new("test1.imgix.net"))
        .with_source(
            "proxy",
            SourceSettings::new("test2.imgix.net")
                .with_web_proxy(true)
                .with_sign_key("mock-sign-key"),
        );
    let resolver = resolver(settings);

    assert_eq!(
        resolver.resolve(&ResolutionRequest::new(IMAGE)).unwrap(),
        "https://test1.imgix.net/media/image/image_0001.jpg"
    );
    assert_eq!(
        resolver
            .resolve(&ResolutionRequest::new("http://www.example.com/image1.jpg").source("proxy"))
            .unwrap(),
        "https://test2.imgix.net/http%3A%2F%2Fwww.example.com%2Fimage1.jpg?s=565a44b136186478b1f2805e1e7c8e8c"
    );
}

#[test]
fn test_signed_proxy_url_with_query_in_origin() {
    let settings = Settings::new().with_source(
        "proxy",
        SourceSettings::new("test2.imgix.net")
            .with_web_proxy(true)
            .with_sign_key("mock-sign-key")
            .with_detect_format(true),
    );
    let url = resolver(settings)
        .resolve(
            &ResolutionRequest::new("http://ex.com/a.PNG?x=1")
                .source("proxy")
                .param("w", 10),
        )
        .unwrap();

    // The origin query stays inside the encoded path segment; fm comes from
    // the extension before it and the signature covers the encoded path
    assert_eq!(
        url,
        "https://test2.imgix.net/http%3A%2F%2Fex.com%2Fa.PNG%3Fx%3D1?fm=png&s=52884b514ae53faa9a923d824f8573fc&w=10"
    );
}

#[test]
fn test_unknown_source_raises() {
    let err = resolver(single_domain())
        .resolve(&ResolutionRequest::new(IMAGE).source("missing"))
        .unwrap_err();
    assert_eq!(err, ConfigurationError::SourceNotFound("missing".to_string()));
}

#[test]
fn test_nothing_configured_raises() {
    let err = resolver(Settings::new())
        .resolve(&ResolutionRequest::new(IMAGE))
        .unwrap_err();
    assert_eq!(err, ConfigurationError::NotConfigured);
}

#[test]
fn test_source_without_domains_raises() {
    let settings = Settings::new()
        .with_source("", SourceSettings::new("test1.imgix.net"))
        .with_source("empty", SourceSettings::default());
    let err = resolver(settings)
        .resolve(&ResolutionRequest::new(IMAGE).source("empty"))
        .unwrap_err();
    assert_eq!(err, ConfigurationError::NoDomains("empty".to_string()));
}

#[test]
fn test_query_keys_are_strictly_ascending() {
    let request = ResolutionRequest::new(IMAGE)
        .param("zoom", 2)
        .param("auto", "compress")
        .param("q", 75)
        .param("dpr", 1.5)
        .param("bg", "fff")
        .param("w", 800);
    let url = resolve_with(single_domain().with_sign_key("1234test"), request);
    let query = url.split_once('?').unwrap().1;
    let keys: Vec<&str> = query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap().0)
        .collect();
    assert!(keys.windows(2).all(|w| w[0] < w[1]), "keys not sorted: {:?}", keys);
    assert_eq!(keys.len(), 7);
}

#[test]
fn test_signature_covers_parameters() {
    let resolver = resolver(single_domain().with_sign_key("1234test"));
    let a = resolver
        .resolve(&ResolutionRequest::new(IMAGE).param("w", 100))
        .unwrap();
    let b = resolver
        .resolve(&ResolutionRequest::new(IMAGE).param("w", 200))
        .unwrap();
    let sig = |url: &str| url.rsplit_once("s=").unwrap().1.to_string();
    assert_ne!(sig(&a), sig(&b));
}
