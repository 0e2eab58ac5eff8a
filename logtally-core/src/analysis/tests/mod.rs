mod aggregate_tests;

pub(super) const SCENARIO: [&str; 3] = [
    r#"1.2.3.4 - - [10/Oct/2023:13:55:36] "GET /index.html" 200"#,
    r#"5.6.7.8 - - [10/Oct/2023:13:56:01] "GET /missing.html" 404"#,
    r#"1.2.3.4 - - [10/Oct/2023:14:01:00] "POST /login" 500"#,
];

/// A combined-format line for `client` hitting `path` with `status`.
pub(super) fn access_line(client: &str, hour: u32, path: &str, status: u16) -> String {
    format!(
        r#"{client} - - [17/May/2015:{hour:02}:05:32 +0000] "GET {path} HTTP/1.1" {status} 512 "-" "curl/8.0""#
    )
}
