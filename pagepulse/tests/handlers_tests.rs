use pagepulse::handlers::parse_url_line;

#[test]
fn test_parse_url_line_with_scheme() {
    let result = parse_url_line("https://example.com");
    assert_eq!(result, Some("https://example.com".to_string()));
}

#[test]
fn test_parse_url_line_without_scheme() {
    let result = parse_url_line("example.com");
    assert_eq!(result, Some("https://example.com".to_string()));
}

#[test]
fn test_parse_url_line_invalid() {
    let result = parse_url_line("not a valid url!!!");
    assert_eq!(result, None);
}

#[test]
fn test_parse_url_line_keeps_explicit_http() {
    let result = parse_url_line("http://127.0.0.1:8080/");
    assert_eq!(result, Some("http://127.0.0.1:8080/".to_string()));
}
